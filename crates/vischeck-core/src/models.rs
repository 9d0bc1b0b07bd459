//! Data models for Vischeck
//!
//! Immutable value objects returned by the analysis components. Each is
//! constructed once and handed to the caller; nothing here caches or
//! shares mutable state.

use serde::Serialize;

/// Per-channel mean and standard deviation over a LAB image
///
/// Standard deviations carry an epsilon floor: channels with
/// essentially zero variance are clamped to 1.0 so downstream ratio
/// math never divides by zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ColorStats {
    /// Per-channel mean (L, a, b in the 8-bit encoding)
    pub mean: [f32; 3],

    /// Per-channel standard deviation, floored to 1.0 when below 1e-6
    pub std: [f32; 3],
}

/// Semantic role of a palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteRole {
    /// Highest-frequency color, assumed to be the page background
    Background,

    /// Most saturated non-background color
    Accent,
}

/// One extracted palette color
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    /// Lowercase `#rrggbb` representation
    pub hex: String,

    /// Centroid RGB, truncated to integers
    pub rgb: [u8; 3],

    /// Fraction of sampled pixels assigned to this cluster (0-1)
    pub frequency: f32,

    /// Semantic role, if one was assigned
    pub role: Option<PaletteRole>,
}

/// Ordered color palette, strictly non-increasing by frequency
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    pub entries: Vec<PaletteEntry>,

    /// True when clustering was skipped and the single entry is an
    /// arithmetic mean over the sampled pixels
    pub mean_fallback: bool,
}

impl Palette {
    /// The background entry (always the first, when present)
    pub fn background(&self) -> Option<&PaletteEntry> {
        self.entries.first()
    }

    /// The entry tagged with the accent role
    pub fn accent(&self) -> Option<&PaletteEntry> {
        self.entries
            .iter()
            .find(|e| e.role == Some(PaletteRole::Accent))
    }

    /// Accent color for reporting
    ///
    /// Prefers the tagged accent entry; a single-entry clustered
    /// palette reports its background as the accent. The mean-color
    /// fallback has no accent at all.
    pub fn accent_hex(&self) -> Option<&str> {
        if self.mean_fallback {
            return None;
        }
        if let Some(accent) = self.accent() {
            return Some(&accent.hex);
        }
        self.background().map(|bg| bg.hex.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Axis-aligned bounding box in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BoundingBox {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// One localized difference region from structural comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiffRegion {
    pub bbox: BoundingBox,

    /// Region size in pixels
    pub area: u32,
}

/// Qualitative similarity bucket derived from the SSIM score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBucket {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBucket {
    /// Bucket a similarity score by the fixed thresholds
    pub fn from_score(score: f32) -> Self {
        if score >= 0.95 {
            Self::Excellent
        } else if score >= 0.90 {
            Self::Good
        } else if score >= 0.80 {
            Self::Fair
        } else {
            Self::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Fair => "fair",
            Self::Poor => "poor",
        }
    }
}

/// Minimum SSIM score for a comparison to pass the fidelity gate
pub const PASS_THRESHOLD: f32 = 0.94;

/// Result of a structural-similarity comparison
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    /// Scalar similarity score, 0-1, rounded to four decimals
    pub score: f32,

    /// Localized difference regions, discovery order, at most 5
    pub regions: Vec<DiffRegion>,

    /// Qualitative bucket for the score
    pub bucket: ScoreBucket,

    /// Whether the score clears [`PASS_THRESHOLD`]
    pub passed: bool,
}

/// Qualitative tone delta between two palettes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneDelta {
    Darker,
    Lighter,
    Neutral,
}

impl ToneDelta {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Darker => "darker",
            Self::Lighter => "lighter",
            Self::Neutral => "neutral",
        }
    }
}

/// Recommended parametric correction for a generated image
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjustmentSuggestion {
    /// Brightness multiplier, clamped to 0.5-1.5
    pub brightness: f32,

    /// Contrast multiplier. Currently a fixed identity value; not yet
    /// derived from the data.
    pub contrast: f32,

    /// Saturation multiplier, clamped to 0.5-1.5
    pub saturation: f32,

    /// Qualitative tone delta
    pub tone: ToneDelta,
}

/// Per-channel LAB mean delta between a transfer's target and source
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorShift {
    #[serde(rename = "L_shift")]
    pub l_shift: f32,
    pub a_shift: f32,
    pub b_shift: f32,

    /// "darker" when the target mean L is below the source, else "lighter"
    pub brightness_change: String,

    /// "warmer" when the target mean b is above the source, else "cooler"
    /// (positive b is the yellow end of the axis)
    pub warmth_change: String,
}

/// Summary statistics of a normalized image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageStats {
    pub width: u32,
    pub height: u32,

    /// Width / height, rounded to three decimals
    pub aspect_ratio: f32,

    /// Per-channel mean, truncated to integers
    pub mean_rgb: [u8; 3],

    /// Per-channel standard deviation, rounded to two decimals
    pub std_rgb: [f32; 3],

    /// Arithmetic mean RGB of all pixels as hex (not a cluster mode)
    pub dominant_color: String,
}
