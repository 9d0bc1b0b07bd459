//! Tests for palette extraction

use super::*;
use crate::models::PaletteRole;
use crate::raster::{ColorSpace, RasterImage};

fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> RasterImage {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..width * height {
        data.extend_from_slice(&rgb);
    }
    RasterImage::new(width, height, 3, data, ColorSpace::Srgb).unwrap()
}

/// Image whose left portion is one color and right portion another
fn split_image(width: u32, height: u32, split: u32, left: [u8; 3], right: [u8; 3]) -> RasterImage {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..height {
        for x in 0..width {
            data.extend_from_slice(if x < split { &left } else { &right });
        }
    }
    RasterImage::new(width, height, 3, data, ColorSpace::Srgb).unwrap()
}

#[test]
fn test_k1_solid_color_exact() {
    let img = solid_image(10, 10, [120, 60, 30]);
    let palette = extract_palette(&img, 1, false, false).unwrap();

    assert_eq!(palette.entries.len(), 1);
    assert_eq!(palette.entries[0].hex, "#783c1e");
    assert_eq!(palette.entries[0].rgb, [120, 60, 30]);
    assert!((palette.entries[0].frequency - 1.0).abs() < 1e-6);
}

#[test]
fn test_single_entry_accent_falls_back_to_background() {
    // Regression for the role-fallback rule: a one-entry clustered
    // palette reports its background color as the accent
    let img = solid_image(10, 10, [120, 60, 30]);
    let palette = extract_palette(&img, 1, false, false).unwrap();

    assert_eq!(palette.background().unwrap().role, Some(PaletteRole::Background));
    assert_eq!(palette.accent_hex(), Some("#783c1e"));
}

#[test]
fn test_entries_sorted_by_frequency_and_bounded_by_k() {
    // 75% gray-blue, 25% orange; ask for more clusters than colors
    let img = split_image(40, 10, 30, [100, 110, 140], [220, 120, 40]);
    let palette = extract_palette(&img, 4, false, false).unwrap();

    assert!(palette.entries.len() <= 4);
    assert!(palette.entries.len() >= 2);
    for pair in palette.entries.windows(2) {
        assert!(pair[0].frequency >= pair[1].frequency);
    }
    assert_eq!(palette.entries[0].rgb, [100, 110, 140]);
    assert!((palette.entries[0].frequency - 0.75).abs() < 0.05);
}

#[test]
fn test_background_and_accent_roles() {
    // Dominant near-neutral background, neutral gray, vivid red accent
    let mut data = Vec::new();
    for i in 0..100u32 {
        let px: [u8; 3] = if i < 70 {
            [230, 230, 235]
        } else if i < 90 {
            [128, 128, 128]
        } else {
            [200, 20, 20]
        };
        data.extend_from_slice(&px);
    }
    let img = RasterImage::new(10, 10, 3, data, ColorSpace::Srgb).unwrap();
    let palette = extract_palette(&img, 3, false, false).unwrap();

    let bg = palette.background().unwrap();
    assert_eq!(bg.role, Some(PaletteRole::Background));
    assert_eq!(bg.rgb, [230, 230, 235]);

    let accent = palette.accent().unwrap();
    assert_eq!(accent.rgb, [200, 20, 20]);
}

#[test]
fn test_near_white_filter_drops_chrome() {
    // Mostly pure white with a red block; filtering white leaves red
    let img = split_image(40, 10, 30, [255, 255, 255], [200, 30, 30]);
    let palette = extract_palette(&img, 2, true, false).unwrap();

    assert!(!palette.entries.iter().any(|e| e.rgb == [255, 255, 255]));
    assert_eq!(palette.entries[0].rgb, [200, 30, 30]);
}

#[test]
fn test_mean_fallback_when_filters_remove_everything() {
    let img = solid_image(4, 4, [255, 255, 255]);
    let palette = extract_palette(&img, 3, true, false).unwrap();

    assert!(palette.mean_fallback);
    assert_eq!(palette.entries.len(), 1);
    assert_eq!(palette.entries[0].rgb, [255, 255, 255]);
    assert!((palette.entries[0].frequency - 1.0).abs() < 1e-6);
    assert_eq!(palette.accent_hex(), None);
}

#[test]
fn test_mean_fallback_with_too_few_pixels() {
    // 2 surviving pixels with k=3: mean of the survivors
    let img = split_image(4, 1, 2, [255, 255, 255], [100, 120, 140]);
    let palette = extract_palette(&img, 3, true, false).unwrap();

    assert!(palette.mean_fallback);
    assert_eq!(palette.entries.len(), 1);
    assert_eq!(palette.entries[0].rgb, [100, 120, 140]);
}

#[test]
fn test_extraction_is_deterministic() {
    let img = split_image(64, 32, 20, [10, 200, 90], [240, 240, 10]);
    let a = extract_palette(&img, 4, true, true).unwrap();
    let b = extract_palette(&img, 4, true, true).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_rejects_lab_input_and_zero_k() {
    let lab = RasterImage::new(1, 1, 3, vec![0, 128, 128], ColorSpace::Lab).unwrap();
    assert!(extract_palette(&lab, 3, false, false).is_err());

    let img = solid_image(2, 2, [1, 2, 3]);
    assert!(extract_palette(&img, 0, false, false).is_err());
}

#[test]
fn test_alpha_channel_ignored_for_sampling() {
    let mut data = Vec::new();
    for _ in 0..4 {
        data.extend_from_slice(&[50, 100, 150, 7]);
    }
    let img = RasterImage::new(2, 2, 4, data, ColorSpace::Srgb).unwrap();
    let palette = extract_palette(&img, 1, false, false).unwrap();
    assert_eq!(palette.entries[0].rgb, [50, 100, 150]);
}
