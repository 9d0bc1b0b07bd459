//! `transfer` command: Reinhard color transfer between two screenshots

use std::path::{Path, PathBuf};

use vischeck_core::decoders::decode_image;
use vischeck_core::exporters::export_image;
use vischeck_core::transfer::reinhard_transfer;

use crate::output::{print_json, TransferOutput};
use crate::paths::{default_output_path, display_absolute};

/// Recolor `source` with the color statistics of `target` and write the
/// result, defaulting to `<source>_matched.png`
pub fn run_transfer(
    source: &Path,
    target: &Path,
    output: Option<PathBuf>,
    preserve_luminance: bool,
) -> Result<TransferOutput, String> {
    let source_img = decode_image(source)?;
    let target_img = decode_image(target)?;

    let outcome = reinhard_transfer(source_img, target_img, preserve_luminance)?;

    let output = output.unwrap_or_else(|| default_output_path(source, "matched"));
    export_image(&outcome.image, &output)?;

    Ok(TransferOutput {
        success: true,
        output: display_absolute(&output),
        source_mean_lab: outcome.source_mean_lab,
        target_mean_lab: outcome.target_mean_lab,
        color_shift: outcome.shift,
    })
}

pub fn cmd_transfer(
    source: PathBuf,
    target: PathBuf,
    output: Option<PathBuf>,
    preserve_luminance: bool,
) -> Result<(), String> {
    let result = run_transfer(&source, &target, output, preserve_luminance)?;
    print_json(&result);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    #[test]
    fn test_run_transfer_writes_default_output() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("gen.png");
        let target = dir.path().join("ref.png");
        RgbImage::from_pixel(16, 16, Rgb([80, 90, 100]))
            .save(&source)
            .unwrap();
        RgbImage::from_pixel(16, 16, Rgb([180, 170, 160]))
            .save(&target)
            .unwrap();

        let result = run_transfer(&source, &target, None, false).unwrap();
        assert!(result.success);
        assert!(result.output.ends_with("gen_matched.png"));
        assert!(dir.path().join("gen_matched.png").exists());
        assert_eq!(result.color_shift.brightness_change, "lighter");
    }

    #[test]
    fn test_run_transfer_missing_source() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("ref.png");
        RgbImage::from_pixel(4, 4, Rgb([0, 0, 0])).save(&target).unwrap();

        let err = run_transfer(dir.path().join("missing.png").as_path(), &target, None, false)
            .unwrap_err();
        assert!(err.contains("not found"));
    }
}
