//! Similarity analyzer
//!
//! Grayscale SSIM scoring between a reference and a candidate image,
//! with localized difference regions, pass/fail gating, and a
//! perceptual distance between individual colors.

mod regions;
mod ssim;

#[cfg(test)]
mod tests;

use image::imageops::FilterType;

use crate::color::{encode_lab_u8, parse_hex, srgb_u8_to_lab};
use crate::models::{ComparisonResult, ScoreBucket, PASS_THRESHOLD};
use crate::raster::{ColorSpace, RasterImage};
use crate::resample::resize_exact;
use crate::verbose_println;

use regions::find_diff_regions;
use ssim::ssim_map;

/// Compare two sRGB images by structural similarity
///
/// Mismatched dimensions are reconciled by resizing both images to the
/// smaller width and height with a bilinear filter before comparison,
/// so candidates rendered at a slightly different scale still score.
/// The scalar score is rounded to four decimals; regions are reported
/// in the reconciled coordinate space.
pub fn structural_similarity(
    reference: &RasterImage,
    candidate: &RasterImage,
) -> Result<ComparisonResult, String> {
    for img in [reference, candidate] {
        if img.color_space != ColorSpace::Srgb {
            return Err(format!(
                "Similarity comparison expects sRGB images, got {}",
                img.color_space.as_str()
            ));
        }
    }

    let width = reference.width.min(candidate.width);
    let height = reference.height.min(candidate.height);

    let (reference, candidate) = if reference.width != candidate.width
        || reference.height != candidate.height
    {
        verbose_println!(
            "similarity: size mismatch {}x{} vs {}x{}, comparing at {}x{}",
            reference.width,
            reference.height,
            candidate.width,
            candidate.height,
            width,
            height
        );
        (
            resize_exact(reference, width, height, FilterType::Triangle)?,
            resize_exact(candidate, width, height, FilterType::Triangle)?,
        )
    } else {
        (reference.clone(), candidate.clone())
    };

    let gray_ref = reference.to_grayscale();
    let gray_cand = candidate.to_grayscale();

    let (raw_score, map) = ssim_map(&gray_ref, &gray_cand, width as usize, height as usize);
    let regions = find_diff_regions(&map, width as usize, height as usize);

    let score = ((raw_score * 10_000.0).round() / 10_000.0) as f32;
    let bucket = ScoreBucket::from_score(score);
    let passed = score >= PASS_THRESHOLD;

    verbose_println!(
        "similarity: score {:.4} ({}), {} region(s)",
        score,
        bucket.as_str(),
        regions.len()
    );

    Ok(ComparisonResult {
        score,
        regions,
        bucket,
        passed,
    })
}

/// Euclidean distance between two hex colors in 8-bit LAB
///
/// Distances live in the same quantized LAB encoding the rest of the
/// toolchain uses, so thresholds are comparable with channel shifts
/// reported by color transfer. Identical colors are exactly 0.
pub fn color_distance(hex_a: &str, hex_b: &str) -> Result<f32, String> {
    let a = encode_lab_u8(srgb_u8_to_lab(parse_hex(hex_a)?));
    let b = encode_lab_u8(srgb_u8_to_lab(parse_hex(hex_b)?));

    let mut sum = 0.0f32;
    for c in 0..3 {
        let d = a[c] as f32 - b[c] as f32;
        sum += d * d;
    }
    Ok(sum.sqrt())
}
