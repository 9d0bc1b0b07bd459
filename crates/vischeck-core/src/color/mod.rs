//! Color-space engine
//!
//! RGB⇄LAB conversion and hex color utilities. This is the foundation
//! every other component builds on: statistics, color transfer, and
//! perceptual distance all operate in LAB.

mod lab;
mod srgb;


pub use lab::{
    decode_lab_u8, encode_lab_u8, lab_to_rgb, lab_to_srgb_u8, rgb_to_lab, srgb_u8_to_lab, to_lab,
    to_rgb, Lab,
};
pub use srgb::{linear_to_srgb, srgb_to_linear};

/// Parse a `#rrggbb` hex color string into an RGB triple
pub fn parse_hex(hex: &str) -> Result<[u8; 3], String> {
    let raw = hex.strip_prefix('#').unwrap_or(hex);
    if raw.len() != 6 || !raw.is_ascii() {
        return Err(format!("Invalid hex color: {}", hex));
    }

    let mut rgb = [0u8; 3];
    for (i, channel) in rgb.iter_mut().enumerate() {
        *channel = u8::from_str_radix(&raw[i * 2..i * 2 + 2], 16)
            .map_err(|e| format!("Invalid hex color {}: {}", hex, e))?;
    }
    Ok(rgb)
}

/// Format an RGB triple as a lowercase `#rrggbb` hex string
pub fn format_hex(rgb: [u8; 3]) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb[0], rgb[1], rgb[2])
}
