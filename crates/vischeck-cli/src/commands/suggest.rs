//! `suggest` command: CSS-filter adjustment advice

use std::path::{Path, PathBuf};

use vischeck_core::adjust::{css_filter, suggest_adjustments};
use vischeck_core::decoders::decode_image;
use vischeck_core::palette::extract_palette;

use crate::commands::DEFAULT_PALETTE_K;
use crate::output::{print_json, SuggestOutput, SuggestedFilters};

/// Extract palettes from both screenshots and recommend filter values
/// that pull the generated one toward the reference
pub fn run_suggest(reference: &Path, generated: &Path) -> Result<SuggestOutput, String> {
    let reference_img = decode_image(reference)?;
    let generated_img = decode_image(generated)?;

    let reference_palette = extract_palette(&reference_img, DEFAULT_PALETTE_K, true, true)?;
    let generated_palette = extract_palette(&generated_img, DEFAULT_PALETTE_K, true, true)?;

    let suggestion = suggest_adjustments(&reference_palette, &generated_palette)?;

    Ok(SuggestOutput {
        success: true,
        css_filter: css_filter(&suggestion),
        suggested_filters: SuggestedFilters {
            brightness: suggestion.brightness,
            contrast: suggestion.contrast,
            saturate: suggestion.saturation,
        },
        tone_suggestion: suggestion.tone.as_str().to_string(),
    })
}

pub fn cmd_suggest(reference: PathBuf, generated: PathBuf) -> Result<(), String> {
    let result = run_suggest(&reference, &generated)?;
    print_json(&result);
    Ok(())
}
