//! Palette extraction
//!
//! K-means clustering over filtered pixel samples, frequency ranking,
//! and semantic role assignment (background / accent).

mod kmeans;

#[cfg(test)]
mod tests;

use crate::color::format_hex;
use crate::models::{Palette, PaletteEntry, PaletteRole};
use crate::raster::{ColorSpace, RasterImage};
use crate::verbose_println;

use kmeans::run_kmeans;

/// Fixed clustering seed; extraction must be reproducible run to run
const KMEANS_SEED: u64 = 42;

/// Images larger than this are stride-subsampled before clustering
const MAX_SAMPLES: usize = 200_000;

/// Every channel above this marks a pixel near-white
const NEAR_WHITE_FLOOR: u8 = 250;

/// Every channel below this marks a pixel near-black
const NEAR_BLACK_CEILING: u8 = 5;

/// Extract the dominant-color palette of an sRGB image
///
/// Clusters sampled pixels into at most `k` colors with deterministic
/// k-means (Euclidean distance in RGB), ranked by non-increasing
/// frequency. The near-white/near-black filters drop UI chrome pixels
/// before clustering. If fewer than `k` pixels survive filtering the
/// palette degrades to a single arithmetic-mean entry; if none survive,
/// the filters are relaxed and the mean is taken over all samples.
pub fn extract_palette(
    image: &RasterImage,
    k: usize,
    exclude_near_white: bool,
    exclude_near_black: bool,
) -> Result<Palette, String> {
    if image.color_space != ColorSpace::Srgb {
        return Err(format!(
            "Palette extraction expects an sRGB image, got {}",
            image.color_space.as_str()
        ));
    }
    if k == 0 {
        return Err("Palette size k must be at least 1".to_string());
    }

    let samples = collect_samples(image);
    if samples.is_empty() {
        return Err("No pixels to sample".to_string());
    }

    let filtered: Vec<[u8; 3]> = samples
        .iter()
        .copied()
        .filter(|px| {
            if exclude_near_white && px.iter().all(|&c| c > NEAR_WHITE_FLOOR) {
                return false;
            }
            if exclude_near_black && px.iter().all(|&c| c < NEAR_BLACK_CEILING) {
                return false;
            }
            true
        })
        .collect();

    if filtered.len() < k {
        // Not enough distinct content for clustering; fall back to the
        // mean color of what's left (or of everything, if the filters
        // removed every pixel)
        let pool = if filtered.is_empty() {
            verbose_println!("palette: filters removed all pixels, relaxing");
            &samples
        } else {
            &filtered
        };
        return Ok(mean_color_palette(pool));
    }

    let float_samples: Vec<[f32; 3]> = filtered
        .iter()
        .map(|px| [px[0] as f32, px[1] as f32, px[2] as f32])
        .collect();

    let result = run_kmeans(&float_samples, k, KMEANS_SEED);
    let total = float_samples.len();

    // Pair centroids with their population, drop empty clusters, rank
    // by frequency (stable sort keeps index order on ties)
    let mut clusters: Vec<([f32; 3], usize)> = result
        .centroids
        .into_iter()
        .zip(result.counts)
        .filter(|&(_, count)| count > 0)
        .collect();
    clusters.sort_by(|a, b| b.1.cmp(&a.1));

    let mut entries: Vec<PaletteEntry> = clusters
        .into_iter()
        .map(|(centroid, count)| {
            let rgb = [
                centroid[0].clamp(0.0, 255.0) as u8,
                centroid[1].clamp(0.0, 255.0) as u8,
                centroid[2].clamp(0.0, 255.0) as u8,
            ];
            PaletteEntry {
                hex: format_hex(rgb),
                rgb,
                frequency: count as f32 / total as f32,
                role: None,
            }
        })
        .collect();

    assign_roles(&mut entries);

    verbose_println!(
        "palette: {} entries from {} samples (k={})",
        entries.len(),
        total,
        k
    );

    Ok(Palette {
        entries,
        mean_fallback: false,
    })
}

/// Gather RGB samples, striding large images down to [`MAX_SAMPLES`]
fn collect_samples(image: &RasterImage) -> Vec<[u8; 3]> {
    let pixel_count = image.pixel_count();
    let stride = pixel_count.div_ceil(MAX_SAMPLES).max(1);
    let ch = image.channels as usize;

    image
        .data
        .chunks_exact(ch)
        .step_by(stride)
        .map(|px| [px[0], px[1], px[2]])
        .collect()
}

/// Single-entry palette from the arithmetic mean of a sample pool
fn mean_color_palette(pool: &[[u8; 3]]) -> Palette {
    let n = pool.len() as f64;
    let mut sum = [0.0f64; 3];
    for px in pool {
        for c in 0..3 {
            sum[c] += px[c] as f64;
        }
    }
    // Truncate toward zero, matching the integer-centroid convention
    let rgb = [
        (sum[0] / n) as u8,
        (sum[1] / n) as u8,
        (sum[2] / n) as u8,
    ];

    Palette {
        entries: vec![PaletteEntry {
            hex: format_hex(rgb),
            rgb,
            frequency: 1.0,
            role: Some(PaletteRole::Background),
        }],
        mean_fallback: true,
    }
}

/// Tag the background and accent entries
///
/// Background is the top-ranked entry. Accent is the non-background
/// entry with the widest RGB range (a saturation proxy); when every
/// candidate is neutral the second entry stands in, and a single-entry
/// palette's background doubles as its accent (see
/// [`Palette::accent_hex`]).
fn assign_roles(entries: &mut [PaletteEntry]) {
    if entries.is_empty() {
        return;
    }
    entries[0].role = Some(PaletteRole::Background);

    let mut accent_idx = None;
    let mut max_range = 0u8;
    for (i, entry) in entries.iter().enumerate().skip(1) {
        let max = entry.rgb.iter().copied().max().unwrap_or(0);
        let min = entry.rgb.iter().copied().min().unwrap_or(0);
        let range = max - min;
        if range > max_range {
            max_range = range;
            accent_idx = Some(i);
        }
    }

    if let Some(i) = accent_idx {
        entries[i].role = Some(PaletteRole::Accent);
    } else if entries.len() > 1 {
        entries[1].role = Some(PaletteRole::Accent);
    }
}
