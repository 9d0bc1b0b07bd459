//! LAB (CIE L*a*b*) color space conversions
//!
//! Conversions go sRGB -> linear RGB -> XYZ (D65) -> LAB and back.
//! Image buffers store LAB in the 8-bit encoding `L*255/100, a+128,
//! b+128` so that channel statistics stay in the 0-255 domain the rest
//! of the pipeline works in.

use rayon::prelude::*;

use super::srgb::{linear_to_srgb, srgb_to_linear};
use crate::raster::{ColorSpace, RasterImage};

/// LAB color representation (CIE L*a*b*)
/// - L: 0.0-100.0 (lightness)
/// - a: approximately -128 to +128 (green-red axis)
/// - b: approximately -128 to +128 (blue-yellow axis)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

/// D65 standard illuminant reference white point
const D65_X: f32 = 0.95047;
const D65_Y: f32 = 1.00000;
const D65_Z: f32 = 1.08883;

/// Linear sRGB to XYZ matrix (D65)
const SRGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.119_192, 0.9503041],
];

/// XYZ to linear sRGB matrix (D65)
const XYZ_TO_SRGB: [[f32; 3]; 3] = [
    [3.2404542, -1.5371385, -0.4985314],
    [-0.969_266, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
];

/// Pixel counts at or above this run color space conversion in parallel
const PARALLEL_THRESHOLD: usize = 100_000;

/// LAB f(t) function
#[inline]
fn lab_f(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;
    const DELTA_CUBED: f32 = DELTA * DELTA * DELTA; // ~0.008856

    if t > DELTA_CUBED {
        t.cbrt()
    } else {
        t / (3.0 * DELTA * DELTA) + 4.0 / 29.0
    }
}

/// LAB f^-1(t) inverse function
#[inline]
fn lab_f_inv(t: f32) -> f32 {
    const DELTA: f32 = 6.0 / 29.0;

    if t > DELTA {
        t * t * t
    } else {
        3.0 * DELTA * DELTA * (t - 4.0 / 29.0)
    }
}

/// Convert linear RGB to CIE LAB (D65 illuminant)
///
/// Input: linear RGB values in range 0.0-1.0
/// Output: LAB where L is 0-100, a and b are approximately -128 to +128
#[inline]
pub fn rgb_to_lab(r: f32, g: f32, b: f32) -> Lab {
    let r = r.max(0.0);
    let g = g.max(0.0);
    let b = b.max(0.0);

    let x = SRGB_TO_XYZ[0][0] * r + SRGB_TO_XYZ[0][1] * g + SRGB_TO_XYZ[0][2] * b;
    let y = SRGB_TO_XYZ[1][0] * r + SRGB_TO_XYZ[1][1] * g + SRGB_TO_XYZ[1][2] * b;
    let z = SRGB_TO_XYZ[2][0] * r + SRGB_TO_XYZ[2][1] * g + SRGB_TO_XYZ[2][2] * b;

    // Normalize by reference white
    let fx = lab_f(x / D65_X);
    let fy = lab_f(y / D65_Y);
    let fz = lab_f(z / D65_Z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// Convert CIE LAB to linear RGB (D65 illuminant)
///
/// Output may fall outside 0.0-1.0 for out-of-gamut colors; callers
/// clamp before encoding.
#[inline]
pub fn lab_to_rgb(lab: Lab) -> (f32, f32, f32) {
    let Lab { l, a, b } = lab;

    let fy = (l + 16.0) / 116.0;
    let fx = a / 500.0 + fy;
    let fz = fy - b / 200.0;

    let x = D65_X * lab_f_inv(fx);
    let y = D65_Y * lab_f_inv(fy);
    let z = D65_Z * lab_f_inv(fz);

    let r = XYZ_TO_SRGB[0][0] * x + XYZ_TO_SRGB[0][1] * y + XYZ_TO_SRGB[0][2] * z;
    let g = XYZ_TO_SRGB[1][0] * x + XYZ_TO_SRGB[1][1] * y + XYZ_TO_SRGB[1][2] * z;
    let b = XYZ_TO_SRGB[2][0] * x + XYZ_TO_SRGB[2][1] * y + XYZ_TO_SRGB[2][2] * z;

    (r, g, b)
}

/// Convert a gamma-encoded 8-bit sRGB triple to LAB
#[inline]
pub fn srgb_u8_to_lab(rgb: [u8; 3]) -> Lab {
    rgb_to_lab(
        srgb_to_linear(rgb[0]),
        srgb_to_linear(rgb[1]),
        srgb_to_linear(rgb[2]),
    )
}

/// Convert LAB back to a gamma-encoded 8-bit sRGB triple
///
/// Out-of-gamut linear values are clamped to 0.0-1.0 before encoding.
#[inline]
pub fn lab_to_srgb_u8(lab: Lab) -> [u8; 3] {
    let (r, g, b) = lab_to_rgb(lab);
    [linear_to_srgb(r), linear_to_srgb(g), linear_to_srgb(b)]
}

/// Encode a LAB value into the 8-bit buffer representation
///
/// Out-of-range values are clipped, not wrapped.
#[inline]
pub fn encode_lab_u8(lab: Lab) -> [u8; 3] {
    [
        (lab.l * 255.0 / 100.0).round().clamp(0.0, 255.0) as u8,
        (lab.a + 128.0).round().clamp(0.0, 255.0) as u8,
        (lab.b + 128.0).round().clamp(0.0, 255.0) as u8,
    ]
}

/// Decode the 8-bit buffer representation back into a LAB value
#[inline]
pub fn decode_lab_u8(encoded: [u8; 3]) -> Lab {
    Lab {
        l: encoded[0] as f32 * 100.0 / 255.0,
        a: encoded[1] as f32 - 128.0,
        b: encoded[2] as f32 - 128.0,
    }
}

/// Convert an sRGB image to an 8-bit-encoded LAB image
///
/// Four-channel input has its alpha dropped before conversion; alpha is
/// not carried through.
pub fn to_lab(image: RasterImage) -> Result<RasterImage, String> {
    if image.color_space != ColorSpace::Srgb {
        return Err(format!(
            "to_lab expects an sRGB image, got {}",
            image.color_space.as_str()
        ));
    }

    let rgb = image.without_alpha();
    let data = convert_buffer(&rgb.data, |px| encode_lab_u8(srgb_u8_to_lab(px)));

    RasterImage::new(rgb.width, rgb.height, 3, data, ColorSpace::Lab)
}

/// Convert an 8-bit-encoded LAB image back to sRGB
pub fn to_rgb(image: RasterImage) -> Result<RasterImage, String> {
    if image.color_space != ColorSpace::Lab {
        return Err(format!(
            "to_rgb expects a LAB image, got {}",
            image.color_space.as_str()
        ));
    }

    let data = convert_buffer(&image.data, |px| lab_to_srgb_u8(decode_lab_u8(px)));

    RasterImage::new(image.width, image.height, 3, data, ColorSpace::Srgb)
}

/// Apply a per-pixel triple conversion, in parallel for large buffers
fn convert_buffer<F>(data: &[u8], convert: F) -> Vec<u8>
where
    F: Fn([u8; 3]) -> [u8; 3] + Sync,
{
    if data.len() / 3 >= PARALLEL_THRESHOLD {
        data.par_chunks_exact(3)
            .flat_map_iter(|px| convert([px[0], px[1], px[2]]).into_iter())
            .collect()
    } else {
        let mut out = Vec::with_capacity(data.len());
        for px in data.chunks_exact(3) {
            out.extend_from_slice(&convert([px[0], px[1], px[2]]));
        }
        out
    }
}
