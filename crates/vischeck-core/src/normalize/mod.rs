//! Normalization pipeline
//!
//! Brings screenshots from arbitrary capture conditions onto a common
//! footing before analysis: decode, composite alpha over white,
//! content-aware auto-crop, and a deterministic Lanczos resize to a
//! target width. Also provides the perceptual hash and summary
//! statistics used for cheap near-duplicate checks.

mod crop;

#[cfg(test)]
mod tests;

pub use crop::auto_crop;

use std::path::Path;

use image::imageops::FilterType;

use crate::color::format_hex;
use crate::decoders::decode_image;
use crate::models::ImageStats;
use crate::raster::{ColorSpace, RasterImage};
use crate::resample::{resize_exact, resize_to_width};
use crate::verbose_println;

/// Hash grid edge length; the hash has `HASH_GRID * HASH_GRID` bits
const HASH_GRID: u32 = 8;

/// Normalize an image file for analysis
///
/// Decodes, flattens any alpha channel over an opaque white background,
/// optionally auto-crops to detected content, and resizes to
/// `target_width` preserving aspect ratio. The result is always a
/// 3-channel sRGB image.
pub fn normalize<P: AsRef<Path>>(
    path: P,
    target_width: u32,
    crop_to_content: bool,
) -> Result<RasterImage, String> {
    if target_width == 0 {
        return Err("Target width must be non-zero".to_string());
    }

    let decoded = decode_image(&path)?;
    verbose_println!(
        "normalize: decoded {}x{} ({} channels)",
        decoded.width,
        decoded.height,
        decoded.channels
    );

    let mut image = flatten_alpha(decoded);

    if crop_to_content {
        let before = (image.width, image.height);
        image = auto_crop(&image)?;
        if (image.width, image.height) != before {
            verbose_println!(
                "normalize: cropped {}x{} -> {}x{}",
                before.0,
                before.1,
                image.width,
                image.height
            );
        }
    }

    resize_to_width(&image, target_width)
}

/// Composite a 4-channel image over an opaque white background
///
/// Per channel: `out = (alpha * fg + (255 - alpha) * 255 + 127) / 255`,
/// the rounded alpha-weighted blend. 3-channel images pass through.
pub fn flatten_alpha(image: RasterImage) -> RasterImage {
    if image.channels != 4 {
        return image;
    }

    let mut data = Vec::with_capacity(image.pixel_count() * 3);
    for px in image.data.chunks_exact(4) {
        let alpha = px[3] as u32;
        for &fg in &px[..3] {
            let blended = (alpha * fg as u32 + (255 - alpha) * 255 + 127) / 255;
            data.push(blended as u8);
        }
    }

    // Invariants hold by construction
    RasterImage {
        width: image.width,
        height: image.height,
        channels: 3,
        data,
        color_space: ColorSpace::Srgb,
    }
}

/// 64-bit perceptual hash as a 16-character hex string
///
/// Downsamples to an 8x8 grayscale grid, thresholds each cell against
/// the grid mean, and packs the bits in raster order, top-left bit most
/// significant. A flat image hashes to all zeros.
pub fn perceptual_hash(image: &RasterImage) -> Result<String, String> {
    let grid = resize_exact(image, HASH_GRID, HASH_GRID, FilterType::Lanczos3)?;
    let cells = grid.to_grayscale();

    let mean = cells.iter().map(|&c| c as f64).sum::<f64>() / cells.len() as f64;

    let mut hash = 0u64;
    for &cell in &cells {
        hash = (hash << 1) | u64::from(cell as f64 > mean);
    }
    Ok(format!("{:016x}", hash))
}

/// Summary statistics of an sRGB image
///
/// The dominant color is the arithmetic mean of all pixels, not a
/// cluster mode; means truncate to integers, deviations round to two
/// decimals, the aspect ratio to three.
pub fn image_stats(image: &RasterImage) -> Result<ImageStats, String> {
    if image.color_space != ColorSpace::Srgb {
        return Err(format!(
            "Image stats expect an sRGB image, got {}",
            image.color_space.as_str()
        ));
    }
    let n = image.pixel_count() as f64;
    if n == 0.0 {
        return Err("Cannot compute stats of an empty image".to_string());
    }

    let ch = image.channels as usize;
    let mut sum = [0.0f64; 3];
    let mut sum_sq = [0.0f64; 3];
    for px in image.data.chunks_exact(ch) {
        for c in 0..3 {
            let v = px[c] as f64;
            sum[c] += v;
            sum_sq[c] += v * v;
        }
    }

    let mut mean_rgb = [0u8; 3];
    let mut std_rgb = [0.0f32; 3];
    for c in 0..3 {
        let mean = sum[c] / n;
        let variance = (sum_sq[c] / n - mean * mean).max(0.0);
        mean_rgb[c] = mean as u8;
        std_rgb[c] = ((variance.sqrt() * 100.0).round() / 100.0) as f32;
    }

    let aspect_ratio =
        ((image.width as f64 / image.height as f64) * 1000.0).round() as f32 / 1000.0;

    Ok(ImageStats {
        width: image.width,
        height: image.height,
        aspect_ratio,
        mean_rgb,
        std_rgb,
        dominant_color: format_hex(mean_rgb),
    })
}
