//! Tests for structural similarity and color distance

use super::*;
use crate::models::ScoreBucket;
use crate::raster::{ColorSpace, RasterImage};

fn solid_image(width: u32, height: u32, rgb: [u8; 3]) -> RasterImage {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..width * height {
        data.extend_from_slice(&rgb);
    }
    RasterImage::new(width, height, 3, data, ColorSpace::Srgb).unwrap()
}

fn textured_image(width: u32, height: u32) -> RasterImage {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for y in 0..height {
        for x in 0..width {
            let v = ((x * 7 + y * 13) % 256) as u8;
            data.extend_from_slice(&[v, v / 2, 255 - v]);
        }
    }
    RasterImage::new(width, height, 3, data, ColorSpace::Srgb).unwrap()
}

#[test]
fn test_identical_images_are_perfect() {
    let img = textured_image(64, 64);
    let result = structural_similarity(&img, &img).unwrap();

    assert_eq!(result.score, 1.0);
    assert_eq!(result.bucket, ScoreBucket::Excellent);
    assert!(result.passed);
    assert!(result.regions.is_empty());
}

#[test]
fn test_opposite_images_fail() {
    let black = solid_image(32, 32, [0, 0, 0]);
    let white = solid_image(32, 32, [255, 255, 255]);
    let result = structural_similarity(&black, &white).unwrap();

    assert!(result.score < 0.01);
    assert_eq!(result.bucket, ScoreBucket::Poor);
    assert!(!result.passed);

    // The whole frame differs: one region covering it
    assert_eq!(result.regions.len(), 1);
    assert_eq!(result.regions[0].area, 32 * 32);
    assert_eq!(result.regions[0].bbox.w, 32);
    assert_eq!(result.regions[0].bbox.h, 32);
}

#[test]
fn test_localized_change_is_detected() {
    let reference = solid_image(64, 64, [255, 255, 255]);
    let mut data = reference.data.clone();
    // Black 16x16 block at (24, 24)
    for y in 24..40u32 {
        for x in 24..40u32 {
            let i = ((y * 64 + x) * 3) as usize;
            data[i..i + 3].copy_from_slice(&[0, 0, 0]);
        }
    }
    let candidate = RasterImage::new(64, 64, 3, data, ColorSpace::Srgb).unwrap();

    let result = structural_similarity(&reference, &candidate).unwrap();
    assert!(result.score < 1.0);
    assert_eq!(result.regions.len(), 1);

    // Region covers the block, padded by at most the window radius
    let bbox = result.regions[0].bbox;
    assert!(bbox.x <= 24 && bbox.x >= 21);
    assert!(bbox.y <= 24 && bbox.y >= 21);
    assert!(bbox.x + bbox.w >= 40 && bbox.x + bbox.w <= 43);
    assert!(bbox.y + bbox.h >= 40 && bbox.y + bbox.h <= 43);
}

#[test]
fn test_size_mismatch_is_reconciled() {
    let a = textured_image(40, 40);
    let b = textured_image(32, 36);
    let result = structural_similarity(&a, &b).unwrap();

    // Comparison proceeds at 32x36; no error, score in range
    assert!(result.score >= -1.0 && result.score <= 1.0);
}

#[test]
fn test_single_pixel_difference_scores_high_without_regions() {
    let reference = textured_image(64, 64);
    let mut data = reference.data.clone();
    data[3 * (64 * 30 + 30)] ^= 0x40;
    let candidate = RasterImage::new(64, 64, 3, data, ColorSpace::Srgb).unwrap();

    let result = structural_similarity(&reference, &candidate).unwrap();
    assert!(result.score > 0.9);
    // Any mismatch component is far below the area floor
    assert!(result.regions.is_empty());
}

#[test]
fn test_rejects_lab_input() {
    let lab = RasterImage::new(1, 1, 3, vec![0, 128, 128], ColorSpace::Lab).unwrap();
    let srgb = solid_image(1, 1, [0, 0, 0]);
    assert!(structural_similarity(&lab, &srgb).is_err());
    assert!(structural_similarity(&srgb, &lab).is_err());
}

#[test]
fn test_color_distance_identity_and_ordering() {
    assert_eq!(color_distance("#ff0000", "#ff0000").unwrap(), 0.0);
    assert_eq!(color_distance("#1a2b3c", "1a2b3c").unwrap(), 0.0);

    let red_orange = color_distance("#ff0000", "#ff8800").unwrap();
    let red_blue = color_distance("#ff0000", "#0000ff").unwrap();
    assert!(red_orange > 0.0);
    assert!(red_blue > red_orange);
}

#[test]
fn test_color_distance_rejects_bad_hex() {
    assert!(color_distance("#ff000", "#ffffff").is_err());
    assert!(color_distance("#ffffff", "not-a-color").is_err());
}
