use jpeg_encoder::{ColorType, Encoder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::core::grid::{PixelGrid, PixelLayout};
use crate::error::{Error, Result};

/// Write `grid` as a baseline JPEG. JPEG has no alpha channel, so alpha is dropped.
pub fn write_jpeg(output: &Path, grid: &PixelGrid, quality: u8) -> Result<()> {
    let encode_err = |reason: String| Error::Encode {
        path: output.to_path_buf(),
        reason,
    };
    let width = u16::try_from(grid.width)
        .map_err(|_| encode_err(format!("width {} exceeds JPEG limit", grid.width)))?;
    let height = u16::try_from(grid.height)
        .map_err(|_| encode_err(format!("height {} exceeds JPEG limit", grid.height)))?;

    let opaque = grid.without_alpha();
    let color = match opaque.layout {
        PixelLayout::Luma => ColorType::Luma,
        _ => ColorType::Rgb,
    };

    let file = File::create(output).map_err(|e| encode_err(e.to_string()))?;
    let mut writer = BufWriter::new(file);
    let encoder = Encoder::new(&mut writer, quality);
    encoder
        .encode(&opaque.data, width, height, color)
        .map_err(|e| encode_err(e.to_string()))?;
    writer.flush().map_err(|e| encode_err(e.to_string()))?;
    Ok(())
}
