//! Image decode/resize/encode behind a small trait so pipelines can be driven
//! by a different codec (or a fake one in tests).
use std::path::Path;

use image::{ColorType, DynamicImage, ImageError, ImageFormat, ImageReader};

use crate::core::grid::{PixelGrid, PixelLayout};
use crate::core::params::ResizeParams;
use crate::core::processing::resize::resize_to_exact;
use crate::error::{Error, Result};
use crate::io::writers::jpeg::write_jpeg;
use crate::types::{Interpolation, Resolution};

pub trait ImageCodec {
    fn decode(&self, path: &Path) -> Result<PixelGrid>;
    fn resize(&self, grid: &PixelGrid, target: Resolution) -> Result<PixelGrid>;
    fn encode(&self, grid: &PixelGrid, path: &Path) -> Result<()>;
}

/// `image` for decoding and non-JPEG output, `fast_image_resize` for scaling,
/// `jpeg-encoder` for JPEG output.
#[derive(Debug, Clone, Copy)]
pub struct StandardCodec {
    pub interpolation: Interpolation,
    pub jpeg_quality: u8,
}

impl Default for StandardCodec {
    fn default() -> Self {
        Self {
            interpolation: Interpolation::Bilinear,
            jpeg_quality: 95,
        }
    }
}

impl StandardCodec {
    pub fn from_params(params: &ResizeParams) -> Self {
        Self {
            interpolation: params.interpolation,
            jpeg_quality: params.jpeg_quality,
        }
    }
}

fn into_grid(img: DynamicImage) -> Result<PixelGrid> {
    let (layout, width, height, data) = match img {
        DynamicImage::ImageLuma8(b) => (PixelLayout::Luma, b.width(), b.height(), b.into_raw()),
        DynamicImage::ImageLumaA8(b) => {
            (PixelLayout::LumaAlpha, b.width(), b.height(), b.into_raw())
        }
        DynamicImage::ImageRgb8(b) => (PixelLayout::Rgb, b.width(), b.height(), b.into_raw()),
        DynamicImage::ImageRgba8(b) => (PixelLayout::Rgba, b.width(), b.height(), b.into_raw()),
        // Wider sample types are narrowed to 8 bits per channel
        other => {
            let color = other.color();
            if color.has_color() && color.has_alpha() {
                let b = other.to_rgba8();
                (PixelLayout::Rgba, b.width(), b.height(), b.into_raw())
            } else if color.has_color() {
                let b = other.to_rgb8();
                (PixelLayout::Rgb, b.width(), b.height(), b.into_raw())
            } else if color.has_alpha() {
                let b = other.to_luma_alpha8();
                (PixelLayout::LumaAlpha, b.width(), b.height(), b.into_raw())
            } else {
                let b = other.to_luma8();
                (PixelLayout::Luma, b.width(), b.height(), b.into_raw())
            }
        }
    };
    PixelGrid::new(width, height, layout, data)
}

fn color_type(layout: PixelLayout) -> ColorType {
    match layout {
        PixelLayout::Luma => ColorType::L8,
        PixelLayout::LumaAlpha => ColorType::La8,
        PixelLayout::Rgb => ColorType::Rgb8,
        PixelLayout::Rgba => ColorType::Rgba8,
    }
}

impl ImageCodec for StandardCodec {
    /// The format is sniffed from content; the extension only gates discovery.
    fn decode(&self, path: &Path) -> Result<PixelGrid> {
        let decode_err = |source: ImageError| Error::Decode {
            path: path.to_path_buf(),
            source,
        };
        let img = ImageReader::open(path)
            .map_err(|e| decode_err(ImageError::IoError(e)))?
            .with_guessed_format()
            .map_err(|e| decode_err(ImageError::IoError(e)))?
            .decode()
            .map_err(decode_err)?;
        into_grid(img)
    }

    fn resize(&self, grid: &PixelGrid, target: Resolution) -> Result<PixelGrid> {
        resize_to_exact(grid, target, self.interpolation)
    }

    fn encode(&self, grid: &PixelGrid, path: &Path) -> Result<()> {
        let format = ImageFormat::from_path(path).map_err(|_| Error::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        match format {
            ImageFormat::Jpeg => write_jpeg(path, grid, self.jpeg_quality),
            other => image::save_buffer_with_format(
                path,
                &grid.data,
                grid.width,
                grid.height,
                color_type(grid.layout),
                other,
            )
            .map_err(|e| Error::Encode {
                path: path.to_path_buf(),
                reason: e.to_string(),
            }),
        }
    }
}
