use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer, images::Image};
use tracing::debug;

use crate::core::grid::{PixelGrid, PixelLayout};
use crate::error::{Error, Result};
use crate::types::{Interpolation, Resolution};

fn pixel_type(layout: PixelLayout) -> PixelType {
    match layout {
        PixelLayout::Luma => PixelType::U8,
        PixelLayout::LumaAlpha => PixelType::U8x2,
        PixelLayout::Rgb => PixelType::U8x3,
        PixelLayout::Rgba => PixelType::U8x4,
    }
}

pub fn resize_alg(interpolation: Interpolation) -> ResizeAlg {
    match interpolation {
        Interpolation::Nearest => ResizeAlg::Nearest,
        Interpolation::Bilinear => ResizeAlg::Convolution(FilterType::Bilinear),
        Interpolation::CatmullRom => ResizeAlg::Convolution(FilterType::CatmullRom),
        Interpolation::Lanczos3 => ResizeAlg::Convolution(FilterType::Lanczos3),
    }
}

/// Resize to exactly `target`, stretching if the aspect ratio differs.
pub fn resize_to_exact(
    grid: &PixelGrid,
    target: Resolution,
    interpolation: Interpolation,
) -> Result<PixelGrid> {
    target.validate()?;
    if grid.width == 0 || grid.height == 0 {
        return Err(Error::Processing(format!(
            "cannot resize an empty {}x{} image",
            grid.width, grid.height
        )));
    }

    debug!(
        "Original size: {}x{}, New size: {}",
        grid.width, grid.height, target
    );

    let resize_options = ResizeOptions::new().resize_alg(resize_alg(interpolation));
    let mut resizer = Resizer::new();

    let pixel_type = pixel_type(grid.layout);
    let src_image = Image::from_vec_u8(grid.width, grid.height, grid.data.clone(), pixel_type)
        .map_err(|e| Error::Processing(e.to_string()))?;
    let mut dst_image = Image::new(target.width, target.height, pixel_type);
    resizer
        .resize(&src_image, &mut dst_image, &resize_options)
        .map_err(|e| Error::Processing(e.to_string()))?;

    PixelGrid::new(
        target.width,
        target.height,
        grid.layout,
        dst_image.into_vec(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32, layout: PixelLayout) -> PixelGrid {
        let channels = layout.channels();
        let data = (0..width * height)
            .flat_map(|i| std::iter::repeat((i % 251) as u8).take(channels))
            .collect();
        PixelGrid::new(width, height, layout, data).unwrap()
    }

    #[test]
    fn output_matches_target_even_when_aspect_differs() {
        let src = gradient(40, 10, PixelLayout::Rgb);
        let out = resize_to_exact(&src, Resolution::new(16, 16), Interpolation::Bilinear).unwrap();
        assert_eq!((out.width, out.height), (16, 16));
        assert_eq!(out.layout, PixelLayout::Rgb);
        assert_eq!(out.data.len(), 16 * 16 * 3);
    }

    #[test]
    fn every_layout_and_filter_resizes() {
        let layouts = [
            PixelLayout::Luma,
            PixelLayout::LumaAlpha,
            PixelLayout::Rgb,
            PixelLayout::Rgba,
        ];
        let filters = [
            Interpolation::Nearest,
            Interpolation::Bilinear,
            Interpolation::CatmullRom,
            Interpolation::Lanczos3,
        ];
        for layout in layouts {
            for filter in filters {
                let out =
                    resize_to_exact(&gradient(9, 7, layout), Resolution::new(5, 11), filter)
                        .unwrap();
                assert_eq!(out.data.len(), 5 * 11 * layout.channels());
            }
        }
    }

    #[test]
    fn resizing_is_deterministic() {
        let src = gradient(33, 21, PixelLayout::Rgba);
        let a = resize_to_exact(&src, Resolution::default(), Interpolation::Bilinear).unwrap();
        let b = resize_to_exact(&src, Resolution::default(), Interpolation::Bilinear).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn zero_target_is_rejected() {
        let src = gradient(4, 4, PixelLayout::Luma);
        let err = resize_to_exact(&src, Resolution::new(0, 4), Interpolation::Nearest).unwrap_err();
        assert!(matches!(err, Error::ZeroSize { .. }));
    }
}
