//! Adjustment advisor
//!
//! Compares the palettes of a reference and a generated screenshot and
//! recommends parametric filter values (CSS-filter style multipliers)
//! that would pull the generated image toward the reference.

use crate::color::{encode_lab_u8, srgb_u8_to_lab};
use crate::models::{AdjustmentSuggestion, Palette, ToneDelta};

/// L-channel deltas within this band (8-bit LAB encoding) are noise
const L_DEADBAND: f32 = 10.0;

/// Multipliers are clamped to this range
const MULTIPLIER_MIN: f32 = 0.5;
const MULTIPLIER_MAX: f32 = 1.5;

/// Recommend filter multipliers to match a generated palette to a
/// reference palette
///
/// Brightness follows the background L difference: beyond a +/-10
/// deadband it maps linearly as `1 + dL/100`, clamped. Saturation is
/// the ratio of the RGB spread of the two palettes (a generated spread
/// of zero yields the identity). Contrast is a fixed identity value,
/// not yet derived from the data.
pub fn suggest_adjustments(
    reference: &Palette,
    generated: &Palette,
) -> Result<AdjustmentSuggestion, String> {
    if reference.is_empty() || generated.is_empty() {
        return Err("No palette data available".to_string());
    }

    let ref_lab = encode_lab_u8(srgb_u8_to_lab(reference.entries[0].rgb));
    let gen_lab = encode_lab_u8(srgb_u8_to_lab(generated.entries[0].rgb));
    let l_diff = ref_lab[0] as f32 - gen_lab[0] as f32;

    let brightness = if l_diff.abs() > L_DEADBAND {
        round2(1.0 + l_diff / 100.0).clamp(MULTIPLIER_MIN, MULTIPLIER_MAX)
    } else {
        1.0
    };

    let ref_spread = rgb_spread(reference);
    let gen_spread = rgb_spread(generated);
    let saturation = if gen_spread > 0.0 {
        round2(ref_spread / gen_spread).clamp(MULTIPLIER_MIN, MULTIPLIER_MAX)
    } else {
        1.0
    };

    let tone = if l_diff < -L_DEADBAND {
        ToneDelta::Darker
    } else if l_diff > L_DEADBAND {
        ToneDelta::Lighter
    } else {
        ToneDelta::Neutral
    };

    Ok(AdjustmentSuggestion {
        brightness,
        contrast: 1.0,
        saturation,
        tone,
    })
}

/// Render a suggestion as a CSS filter declaration
pub fn css_filter(suggestion: &AdjustmentSuggestion) -> String {
    format!(
        "filter: brightness({}) contrast({}) saturate({});",
        suggestion.brightness, suggestion.contrast, suggestion.saturation
    )
}

/// Population standard deviation over every RGB component of every
/// palette entry, a coarse colorfulness proxy
fn rgb_spread(palette: &Palette) -> f32 {
    let values: Vec<f64> = palette
        .entries
        .iter()
        .flat_map(|e| e.rgb.iter().map(|&c| c as f64))
        .collect();

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / n;
    variance.sqrt() as f32
}

fn round2(value: f32) -> f32 {
    (value * 100.0).round() / 100.0
}
