//! Resampling primitives
//!
//! Thin wrappers around the image crate's resize filters so the rest of
//! the core can stay on [`RasterImage`] buffers. Fixed filter choices
//! keep outputs deterministic.

use image::imageops::{self, FilterType};
use image::{RgbImage, RgbaImage};

use crate::raster::{ColorSpace, RasterImage};

/// Resize an sRGB image to exact dimensions
pub fn resize_exact(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, String> {
    if image.color_space != ColorSpace::Srgb {
        return Err(format!(
            "Resize expects an sRGB image, got {}",
            image.color_space.as_str()
        ));
    }
    if width == 0 || height == 0 {
        return Err("Resize target must be non-zero".to_string());
    }
    if width == image.width && height == image.height {
        return Ok(image.clone());
    }

    if image.channels == 4 {
        let buf = RgbaImage::from_raw(image.width, image.height, image.data.clone())
            .ok_or_else(|| "Internal buffer mismatch during resize".to_string())?;
        let resized = imageops::resize(&buf, width, height, filter);
        RasterImage::new(width, height, 4, resized.into_raw(), ColorSpace::Srgb)
    } else {
        let buf = RgbImage::from_raw(image.width, image.height, image.data.clone())
            .ok_or_else(|| "Internal buffer mismatch during resize".to_string())?;
        let resized = imageops::resize(&buf, width, height, filter);
        RasterImage::new(width, height, 3, resized.into_raw(), ColorSpace::Srgb)
    }
}

/// Resize to a target width, preserving aspect ratio
///
/// Height is `round(h * target_width / w)`, clamped to at least one
/// pixel. Lanczos3 is the fixed high-quality filter for normalization.
pub fn resize_to_width(image: &RasterImage, target_width: u32) -> Result<RasterImage, String> {
    if image.width == target_width {
        return Ok(image.clone());
    }
    let height = (image.height as f64 * target_width as f64 / image.width as f64)
        .round()
        .max(1.0) as u32;
    resize_exact(image, target_width, height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_image(width: u32, height: u32) -> RasterImage {
        let mut data = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y) * 255 / (width + height)) as u8;
                data.extend_from_slice(&[v, v, 255 - v]);
            }
        }
        RasterImage::new(width, height, 3, data, ColorSpace::Srgb).unwrap()
    }

    #[test]
    fn test_resize_to_width_rounds_height() {
        let img = gradient_image(2000, 1000);
        let out = resize_to_width(&img, 1200).unwrap();
        assert_eq!(out.width, 1200);
        assert_eq!(out.height, 600);

        // 333 * 1200 / 1000 = 399.6 -> 400
        let img = gradient_image(1000, 333);
        let out = resize_to_width(&img, 1200).unwrap();
        assert_eq!(out.height, 400);
    }

    #[test]
    fn test_resize_same_width_is_identity() {
        let img = gradient_image(64, 48);
        let out = resize_to_width(&img, 64).unwrap();
        assert_eq!(out.data, img.data);
    }

    #[test]
    fn test_resize_rejects_lab() {
        let lab = RasterImage::new(1, 1, 3, vec![0, 128, 128], ColorSpace::Lab).unwrap();
        assert!(resize_exact(&lab, 2, 2, FilterType::Triangle).is_err());
    }
}
