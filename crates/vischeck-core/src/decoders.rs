//! Image decoding
//!
//! Decodes PNG/JPEG screenshots from disk into [`RasterImage`] buffers.
//! Alpha is preserved here; flattening it is a normalization step, not a
//! decode concern.

use std::path::Path;

use crate::raster::{ColorSpace, RasterImage};

/// Decode an image from a file path
///
/// Sources with an alpha channel come back as 4-channel buffers, all
/// others as 3-channel RGB. Output is always tagged sRGB.
pub fn decode_image<P: AsRef<Path>>(path: P) -> Result<RasterImage, String> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(format!("Input file not found: {}", path.display()));
    }

    let decoded = image::open(path)
        .map_err(|e| format!("Failed to decode {}: {}", path.display(), e))?;

    if decoded.color().has_alpha() {
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        RasterImage::new(width, height, 4, rgba.into_raw(), ColorSpace::Srgb)
    } else {
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        RasterImage::new(width, height, 3, rgb.into_raw(), ColorSpace::Srgb)
    }
}
