//! Codec capability probe
//!
//! Run once at process start, before any real work. Decodes and
//! re-encodes an embedded one-pixel PNG so that a build missing codec
//! support fails up front with one structured error instead of deep in
//! a call stack.

use std::io::Cursor;

/// Hint emitted alongside a failed capability probe
pub const INSTALL_HINT: &str =
    "rebuild vischeck with the image crate's \"png\" and \"jpeg\" features enabled";

/// Minimal valid 1x1 white RGB PNG
const PROBE_PNG: [u8; 69] = [
    0x89, 0x50, 0x4e, 0x47, 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x00, 0x00, 0x0d, 0x49, 0x48, 0x44,
    0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x02, 0x00, 0x00, 0x00, 0x90,
    0x77, 0x53, 0xde, 0x00, 0x00, 0x00, 0x0c, 0x49, 0x44, 0x41, 0x54, 0x78, 0x9c, 0x63, 0xf8,
    0xff, 0xff, 0x3f, 0x00, 0x05, 0xfe, 0x02, 0xfe, 0x0d, 0xef, 0x46, 0xb8, 0x00, 0x00, 0x00,
    0x00, 0x49, 0x45, 0x4e, 0x44, 0xae, 0x42, 0x60, 0x82,
];

/// Verify that image decode and encode support is compiled in
///
/// Returns a descriptive error when the probe fails; callers surface it
/// as a structured JSON object together with [`INSTALL_HINT`].
pub fn check_capabilities() -> Result<(), String> {
    let decoded = image::load_from_memory(&PROBE_PNG)
        .map_err(|e| format!("Image decode support unavailable: {}", e))?;

    let mut encoded = Cursor::new(Vec::new());
    decoded
        .write_to(&mut encoded, image::ImageFormat::Png)
        .map_err(|e| format!("Image encode support unavailable: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_succeeds() {
        assert!(check_capabilities().is_ok());
    }

    #[test]
    fn test_probe_image_is_white_pixel() {
        let img = image::load_from_memory(&PROBE_PNG).unwrap().to_rgb8();
        assert_eq!(img.dimensions(), (1, 1));
        assert_eq!(img.get_pixel(0, 0).0, [255, 255, 255]);
    }
}
