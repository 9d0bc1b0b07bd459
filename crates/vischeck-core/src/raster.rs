//! Raster image buffer
//!
//! The canonical in-memory pixel representation shared by every pipeline
//! stage. Buffers are row-major, 8 bits per channel, tagged with the
//! color space they currently hold. Transform functions consume an image
//! and return a new instance; channel data is never reinterpreted
//! in-place across color spaces.

/// Color space tag for a [`RasterImage`] buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    /// Gamma-encoded sRGB
    Srgb,

    /// CIE L*a*b* in the 8-bit encoding (L*255/100, a+128, b+128)
    Lab,
}

impl ColorSpace {
    /// Get the color space name as a string
    pub fn as_str(&self) -> &str {
        match self {
            Self::Srgb => "sRGB",
            Self::Lab => "LAB",
        }
    }
}

/// Decoded raster image data
#[derive(Debug, Clone)]
pub struct RasterImage {
    /// Image width in pixels
    pub width: u32,

    /// Image height in pixels
    pub height: u32,

    /// Number of channels (3 for RGB/LAB, 4 for RGB + alpha)
    pub channels: u8,

    /// Interleaved pixel data, row-major, 8 bits per channel
    pub data: Vec<u8>,

    /// Color space the buffer currently holds
    pub color_space: ColorSpace,
}

impl RasterImage {
    /// Create a raster image, validating the buffer invariant
    /// `data.len() == width * height * channels`
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        data: Vec<u8>,
        color_space: ColorSpace,
    ) -> Result<Self, String> {
        if channels != 3 && channels != 4 {
            return Err(format!("Unsupported channel count: {}", channels));
        }
        if channels == 4 && color_space == ColorSpace::Lab {
            return Err("LAB buffers must be 3-channel".to_string());
        }
        let expected = width as usize * height as usize * channels as usize;
        if data.len() != expected {
            return Err(format!(
                "Buffer size mismatch: expected {}, got {}",
                expected,
                data.len()
            ));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
            color_space,
        })
    }

    /// Number of pixels in the image
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// First three channels of the pixel at (x, y)
    ///
    /// Callers must keep coordinates in bounds; interior loops index the
    /// buffer directly.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        let idx = (y as usize * self.width as usize + x as usize) * self.channels as usize;
        [self.data[idx], self.data[idx + 1], self.data[idx + 2]]
    }

    /// Drop the alpha channel, returning a 3-channel image
    ///
    /// This is a plain channel drop. For alpha-aware compositing over a
    /// background, use `normalize::flatten_alpha` instead.
    pub fn without_alpha(self) -> RasterImage {
        if self.channels == 3 {
            return self;
        }

        let mut rgb = Vec::with_capacity(self.pixel_count() * 3);
        for px in self.data.chunks_exact(4) {
            rgb.push(px[0]);
            rgb.push(px[1]);
            rgb.push(px[2]);
        }

        RasterImage {
            width: self.width,
            height: self.height,
            channels: 3,
            data: rgb,
            color_space: self.color_space,
        }
    }

    /// Convert to a single-channel grayscale buffer (Rec.601 weights)
    ///
    /// Alpha, if present, is ignored.
    pub fn to_grayscale(&self) -> Vec<u8> {
        let ch = self.channels as usize;
        self.data
            .chunks_exact(ch)
            .map(|px| {
                let luma =
                    0.299 * px[0] as f32 + 0.587 * px[1] as f32 + 0.114 * px[2] as f32;
                luma.round().clamp(0.0, 255.0) as u8
            })
            .collect()
    }
}
