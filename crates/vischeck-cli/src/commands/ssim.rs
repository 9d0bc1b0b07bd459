//! `ssim` command: structural-similarity gate

use std::path::{Path, PathBuf};

use vischeck_core::decoders::decode_image;
use vischeck_core::similarity::structural_similarity;

use crate::output::{print_json, SsimOutput};

/// Score a generated screenshot against its reference
pub fn run_ssim(reference: &Path, generated: &Path) -> Result<SsimOutput, String> {
    let reference_img = decode_image(reference)?;
    let generated_img = decode_image(generated)?;

    let result = structural_similarity(&reference_img, &generated_img)?;

    Ok(SsimOutput {
        success: true,
        ssim: result.score,
        passed: result.passed,
        difference_regions: result.regions,
        analysis: result.bucket.as_str().to_string(),
    })
}

pub fn cmd_ssim(reference: PathBuf, generated: PathBuf) -> Result<(), String> {
    let result = run_ssim(&reference, &generated)?;
    print_json(&result);
    Ok(())
}
