//! Vischeck Core Library
//!
//! Image analysis for validating that a generated UI screenshot visually
//! matches a reference screenshot: deterministic normalization, Reinhard
//! color transfer, k-means palette extraction, and structural-similarity
//! scoring with localized difference regions.
//!
//! Every operation is a synchronous, pure computation over in-memory
//! buffers; file I/O only happens in `decoders` and `exporters`.

pub mod adjust;
pub mod capabilities;
pub mod color;
pub mod config;
pub mod decoders;
pub mod exporters;
pub mod models;
pub mod normalize;
pub mod palette;
pub mod raster;
pub mod resample;
pub mod similarity;
pub mod transfer;

// Re-export commonly used types
pub use color::Lab;
pub use models::{
    AdjustmentSuggestion, BoundingBox, ColorShift, ColorStats, ComparisonResult, DiffRegion,
    ImageStats, Palette, PaletteEntry, PaletteRole, ScoreBucket, ToneDelta,
};
pub use raster::{ColorSpace, RasterImage};
