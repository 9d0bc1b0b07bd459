//! Content-aware auto-crop
//!
//! Finds the high-contrast content of a screenshot by combining a
//! gradient edge mask with a near-white threshold mask, dilating to
//! merge nearby components, and taking the union bounding box. The crop
//! is discarded per-dimension when it would cover less than half the
//! image, so near-blank pages keep their full extent.

use crate::models::BoundingBox;
use crate::raster::RasterImage;

/// Sobel gradient magnitudes above this mark an edge pixel
const EDGE_GRADIENT_THRESHOLD: f64 = 50.0;

/// Grayscale values at or below this count as content (not page white)
const NEAR_WHITE_THRESHOLD: u8 = 250;

/// Square dilation radius applied to the combined mask
const DILATE_RADIUS: usize = 2;

/// Number of dilation passes
const DILATE_PASSES: usize = 2;

/// Margin around the content box, as a fraction of the smaller dimension
const MARGIN_RATIO: f64 = 0.02;

/// Minimum fraction of a dimension the crop must cover to be kept
const MIN_COVERAGE: f64 = 0.5;

/// Crop an sRGB image to its detected content box
///
/// Returns the input unchanged when no content is detected or when the
/// guard rejects the crop in both dimensions.
pub fn auto_crop(image: &RasterImage) -> Result<RasterImage, String> {
    if image.color_space != crate::raster::ColorSpace::Srgb {
        return Err(format!(
            "Auto-crop expects an sRGB image, got {}",
            image.color_space.as_str()
        ));
    }
    let bbox = match content_box(image) {
        Some(bbox) => bbox,
        None => return Ok(image.clone()),
    };
    if bbox.x == 0 && bbox.y == 0 && bbox.w == image.width && bbox.h == image.height {
        return Ok(image.clone());
    }
    crop(image, bbox)
}

/// Detected content bounding box with margin and coverage guard applied
pub(crate) fn content_box(image: &RasterImage) -> Option<BoundingBox> {
    let width = image.width as usize;
    let height = image.height as usize;
    let gray = image.to_grayscale();

    let mut mask = vec![false; width * height];
    for (i, &g) in gray.iter().enumerate() {
        if g <= NEAR_WHITE_THRESHOLD {
            mask[i] = true;
        }
    }
    mark_edges(&gray, width, height, &mut mask);

    for _ in 0..DILATE_PASSES {
        mask = dilate(&mask, width, height);
    }

    let (mut min_x, mut min_y, mut max_x, mut max_y) = (width, height, 0usize, 0usize);
    let mut any = false;
    for y in 0..height {
        for x in 0..width {
            if mask[y * width + x] {
                any = true;
                min_x = min_x.min(x);
                min_y = min_y.min(y);
                max_x = max_x.max(x);
                max_y = max_y.max(y);
            }
        }
    }
    if !any {
        return None;
    }

    let margin = (MARGIN_RATIO * width.min(height) as f64) as usize;
    let x0 = min_x.saturating_sub(margin);
    let y0 = min_y.saturating_sub(margin);
    let x1 = (max_x + margin + 1).min(width);
    let y1 = (max_y + margin + 1).min(height);

    // Coverage guard, applied independently per axis
    let (x0, x1) = if ((x1 - x0) as f64) < MIN_COVERAGE * width as f64 {
        (0, width)
    } else {
        (x0, x1)
    };
    let (y0, y1) = if ((y1 - y0) as f64) < MIN_COVERAGE * height as f64 {
        (0, height)
    } else {
        (y0, y1)
    };

    Some(BoundingBox {
        x: x0 as u32,
        y: y0 as u32,
        w: (x1 - x0) as u32,
        h: (y1 - y0) as u32,
    })
}

/// OR Sobel edge pixels into the mask
fn mark_edges(gray: &[u8], width: usize, height: usize, mask: &mut [bool]) {
    if width < 3 || height < 3 {
        return;
    }
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let p = |dx: i64, dy: i64| {
                gray[(y as i64 + dy) as usize * width + (x as i64 + dx) as usize] as f64
            };
            let gx = p(1, -1) + 2.0 * p(1, 0) + p(1, 1) - p(-1, -1) - 2.0 * p(-1, 0) - p(-1, 1);
            let gy = p(-1, 1) + 2.0 * p(0, 1) + p(1, 1) - p(-1, -1) - 2.0 * p(0, -1) - p(1, -1);
            if (gx * gx + gy * gy).sqrt() > EDGE_GRADIENT_THRESHOLD {
                mask[y * width + x] = true;
            }
        }
    }
}

/// Square dilation by [`DILATE_RADIUS`]
fn dilate(mask: &[bool], width: usize, height: usize) -> Vec<bool> {
    let r = DILATE_RADIUS as i64;
    let mut out = vec![false; mask.len()];
    for y in 0..height as i64 {
        for x in 0..width as i64 {
            'probe: for dy in -r..=r {
                for dx in -r..=r {
                    let nx = x + dx;
                    let ny = y + dy;
                    if nx >= 0
                        && ny >= 0
                        && nx < width as i64
                        && ny < height as i64
                        && mask[ny as usize * width + nx as usize]
                    {
                        out[y as usize * width + x as usize] = true;
                        break 'probe;
                    }
                }
            }
        }
    }
    out
}

/// Extract a sub-image
fn crop(image: &RasterImage, bbox: BoundingBox) -> Result<RasterImage, String> {
    if bbox.x + bbox.w > image.width || bbox.y + bbox.h > image.height {
        return Err(format!(
            "Crop box {}x{}+{}+{} exceeds image bounds {}x{}",
            bbox.w, bbox.h, bbox.x, bbox.y, image.width, image.height
        ));
    }

    let ch = image.channels as usize;
    let src_row = image.width as usize * ch;
    let mut data = Vec::with_capacity(bbox.w as usize * bbox.h as usize * ch);
    for y in bbox.y..bbox.y + bbox.h {
        let start = y as usize * src_row + bbox.x as usize * ch;
        data.extend_from_slice(&image.data[start..start + bbox.w as usize * ch]);
    }

    RasterImage::new(bbox.w, bbox.h, image.channels, data, image.color_space)
}
