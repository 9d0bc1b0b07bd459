//! Image exporters
//!
//! Writes sRGB raster buffers to PNG or JPEG. The whole file is encoded
//! in memory first and written in one step, so a failed call never
//! leaves a partial output file behind.

use std::io::Cursor;
use std::path::Path;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};

use crate::raster::{ColorSpace, RasterImage};

/// JPEG quality used for all JPEG output
const JPEG_QUALITY: u8 = 95;

/// Export an sRGB image, choosing PNG or JPEG by the path's extension
///
/// JPEG has no alpha, so 4-channel buffers are reduced to RGB first.
/// Parent directories are created as needed.
pub fn export_image<P: AsRef<Path>>(image: &RasterImage, path: P) -> Result<(), String> {
    let path = path.as_ref();

    if image.color_space != ColorSpace::Srgb {
        return Err(format!(
            "Export expects an sRGB image, got {}",
            image.color_space.as_str()
        ));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let encoded = match extension.as_str() {
        "jpg" | "jpeg" => encode_jpeg(image)?,
        _ => encode_png(image)?,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create output directory: {}", e))?;
        }
    }

    std::fs::write(path, encoded)
        .map_err(|e| format!("Failed to write {}: {}", path.display(), e))
}

fn encode_png(image: &RasterImage) -> Result<Vec<u8>, String> {
    let color_type = if image.channels == 4 {
        ExtendedColorType::Rgba8
    } else {
        ExtendedColorType::Rgb8
    };

    let mut buf = Cursor::new(Vec::new());
    PngEncoder::new(&mut buf)
        .write_image(&image.data, image.width, image.height, color_type)
        .map_err(|e| format!("Failed to encode PNG: {}", e))?;
    Ok(buf.into_inner())
}

fn encode_jpeg(image: &RasterImage) -> Result<Vec<u8>, String> {
    let rgb = if image.channels == 4 {
        image.clone().without_alpha()
    } else {
        image.clone()
    };

    let mut buf = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut buf, JPEG_QUALITY)
        .write_image(&rgb.data, rgb.width, rgb.height, ExtendedColorType::Rgb8)
        .map_err(|e| format!("Failed to encode JPEG: {}", e))?;
    Ok(buf.into_inner())
}
