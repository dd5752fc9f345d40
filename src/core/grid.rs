use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Channel layout of an 8-bit interleaved pixel buffer.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum PixelLayout {
    Luma,
    LumaAlpha,
    Rgb,
    Rgba,
}

impl PixelLayout {
    pub fn channels(&self) -> usize {
        match self {
            PixelLayout::Luma => 1,
            PixelLayout::LumaAlpha => 2,
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    pub fn has_alpha(&self) -> bool {
        matches!(self, PixelLayout::LumaAlpha | PixelLayout::Rgba)
    }
}

/// Decoded image held in memory between decode, resize and encode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    pub width: u32,
    pub height: u32,
    pub layout: PixelLayout,
    pub data: Vec<u8>,
}

impl PixelGrid {
    pub fn new(width: u32, height: u32, layout: PixelLayout, data: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * layout.channels();
        if data.len() != expected {
            return Err(Error::Processing(format!(
                "pixel buffer of {} bytes does not match {}x{} {:?} ({} bytes expected)",
                data.len(),
                width,
                height,
                layout,
                expected
            )));
        }
        Ok(Self {
            width,
            height,
            layout,
            data,
        })
    }

    /// Same pixels with the alpha channel removed; grids without alpha are cloned.
    pub fn without_alpha(&self) -> PixelGrid {
        if !self.layout.has_alpha() {
            return self.clone();
        }
        let (layout, keep) = match self.layout {
            PixelLayout::LumaAlpha => (PixelLayout::Luma, 1),
            _ => (PixelLayout::Rgb, 3),
        };
        let stride = self.layout.channels();
        let data = self
            .data
            .chunks_exact(stride)
            .flat_map(|px| px[..keep].iter().copied())
            .collect();
        PixelGrid {
            width: self.width,
            height: self.height,
            layout,
            data,
        }
    }
}
