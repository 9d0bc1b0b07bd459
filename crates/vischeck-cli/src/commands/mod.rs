//! Command implementations for the vischeck CLI
//!
//! Each command has a `run_*` function that returns its typed output
//! struct (unit-testable without capturing stdout) and a thin `cmd_*`
//! wrapper that prints the JSON.

mod palette;
mod ssim;
mod suggest;
mod transfer;

pub use palette::{cmd_palette, run_palette};
pub use ssim::{cmd_ssim, run_ssim};
pub use suggest::{cmd_suggest, run_suggest};
pub use transfer::{cmd_transfer, run_transfer};

/// Cluster count used when a command extracts palettes implicitly
pub(crate) const DEFAULT_PALETTE_K: usize = 6;
