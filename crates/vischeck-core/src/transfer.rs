//! Reinhard color transfer
//!
//! Matches the per-channel LAB mean and standard deviation of a source
//! image to a target image, the classic Reinhard et al. statistical
//! color-grading move. Everything happens in the 8-bit LAB encoding the
//! color engine produces.

use rayon::prelude::*;

use crate::color::{to_lab, to_rgb};
use crate::models::{ColorShift, ColorStats};
use crate::raster::{ColorSpace, RasterImage};

/// Pixel counts at or above this apply the transfer in parallel
const PARALLEL_THRESHOLD: usize = 100_000;

/// Standard deviations below this are considered zero variance
const STD_EPSILON: f32 = 1e-6;

/// Result of a Reinhard transfer
#[derive(Debug, Clone)]
pub struct TransferOutcome {
    /// The recolored source image, back in sRGB
    pub image: RasterImage,

    /// Source LAB channel means before the transfer
    pub source_mean_lab: [f32; 3],

    /// Target LAB channel means
    pub target_mean_lab: [f32; 3],

    /// Qualitative summary of the target-minus-source shift
    pub shift: ColorShift,
}

/// Compute per-channel mean and standard deviation over a LAB image
///
/// Zero-variance channels are floored to a std of 1.0 so that ratio
/// math downstream stays well-defined.
pub fn compute_color_stats(image: &RasterImage) -> Result<ColorStats, String> {
    if image.color_space != ColorSpace::Lab {
        return Err(format!(
            "Color stats expect a LAB image, got {}",
            image.color_space.as_str()
        ));
    }
    let pixels = image.pixel_count();
    if pixels == 0 {
        return Err("Cannot compute stats of an empty image".to_string());
    }

    let mut sum = [0.0f64; 3];
    let mut sum_sq = [0.0f64; 3];
    for px in image.data.chunks_exact(3) {
        for c in 0..3 {
            let v = px[c] as f64;
            sum[c] += v;
            sum_sq[c] += v * v;
        }
    }

    let n = pixels as f64;
    let mut mean = [0.0f32; 3];
    let mut std = [0.0f32; 3];
    for c in 0..3 {
        let m = sum[c] / n;
        mean[c] = m as f32;
        let variance = (sum_sq[c] / n - m * m).max(0.0);
        let s = variance.sqrt() as f32;
        std[c] = if s < STD_EPSILON { 1.0 } else { s };
    }

    Ok(ColorStats { mean, std })
}

/// Apply Reinhard color transfer, matching `source` statistics to `target`
///
/// With `preserve_luminance` only the chrominance channels (a, b) are
/// transferred and L is left untouched.
pub fn reinhard_transfer(
    source: RasterImage,
    target: RasterImage,
    preserve_luminance: bool,
) -> Result<TransferOutcome, String> {
    let source_lab = to_lab(source)?;
    let target_lab = to_lab(target)?;

    let source_stats = compute_color_stats(&source_lab)?;
    let target_stats = compute_color_stats(&target_lab)?;

    let first_channel = if preserve_luminance { 1 } else { 0 };

    let transfer_pixel = |px: &[u8]| -> [u8; 3] {
        let mut out = [px[0], px[1], px[2]];
        for c in first_channel..3 {
            let v = (px[c] as f32 - source_stats.mean[c])
                * (target_stats.std[c] / source_stats.std[c])
                + target_stats.mean[c];
            out[c] = v.round().clamp(0.0, 255.0) as u8;
        }
        out
    };

    let data: Vec<u8> = if source_lab.pixel_count() >= PARALLEL_THRESHOLD {
        source_lab
            .data
            .par_chunks_exact(3)
            .flat_map_iter(|px| transfer_pixel(px).into_iter())
            .collect()
    } else {
        let mut out = Vec::with_capacity(source_lab.data.len());
        for px in source_lab.data.chunks_exact(3) {
            out.extend_from_slice(&transfer_pixel(px));
        }
        out
    };

    let result_lab = RasterImage::new(
        source_lab.width,
        source_lab.height,
        3,
        data,
        ColorSpace::Lab,
    )?;
    let image = to_rgb(result_lab)?;

    let shift = color_shift(&source_stats, &target_stats);

    Ok(TransferOutcome {
        image,
        source_mean_lab: source_stats.mean,
        target_mean_lab: target_stats.mean,
        shift,
    })
}

/// Summarize the target-minus-source mean delta per LAB channel
fn color_shift(source: &ColorStats, target: &ColorStats) -> ColorShift {
    let brightness_change = if target.mean[0] < source.mean[0] {
        "darker"
    } else {
        "lighter"
    };
    let warmth_change = if target.mean[2] > source.mean[2] {
        "warmer"
    } else {
        "cooler"
    };

    ColorShift {
        l_shift: target.mean[0] - source.mean[0],
        a_shift: target.mean[1] - source.mean[1],
        b_shift: target.mean[2] - source.mean[2],
        brightness_change: brightness_change.to_string(),
        warmth_change: warmth_change.to_string(),
    }
}
