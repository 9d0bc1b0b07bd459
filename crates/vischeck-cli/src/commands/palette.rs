//! `palette` command: dominant-color extraction

use std::path::{Path, PathBuf};

use vischeck_core::decoders::decode_image;
use vischeck_core::palette::extract_palette;

use crate::output::{print_json, PaletteOutput};

/// Extract a k-color palette, filtering near-white and near-black
/// chrome pixels
pub fn run_palette(image: &Path, k: usize) -> Result<PaletteOutput, String> {
    let decoded = decode_image(image)?;
    let palette = extract_palette(&decoded, k, true, true)?;

    Ok(PaletteOutput {
        success: true,
        colors: palette.entries.iter().map(|e| e.hex.clone()).collect(),
        primary_background: palette.background().map(|e| e.hex.clone()),
        accent: palette.accent_hex().map(str::to_string),
        palette_details: palette.entries,
    })
}

pub fn cmd_palette(image: PathBuf, k: usize) -> Result<(), String> {
    let result = run_palette(&image, k)?;
    print_json(&result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    #[test]
    fn test_run_palette_solid_color() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("brand.png");
        RgbImage::from_pixel(20, 20, Rgb([30, 60, 120]))
            .save(&path)
            .unwrap();

        let result = run_palette(&path, 3).unwrap();
        assert!(result.success);
        assert_eq!(result.colors, vec!["#1e3c78"]);
        assert_eq!(result.primary_background.as_deref(), Some("#1e3c78"));
        assert_eq!(result.palette_details.len(), 1);
    }

    #[test]
    fn test_run_palette_white_page_mean_fallback() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.png");
        RgbImage::from_pixel(8, 8, Rgb([255, 255, 255]))
            .save(&path)
            .unwrap();

        // Filters remove everything; the mean fallback has no accent
        let result = run_palette(&path, 6).unwrap();
        assert_eq!(result.colors, vec!["#ffffff"]);
        assert_eq!(result.accent, None);
    }
}
