//! Shared utilities for the vischeck command-line tools
//!
//! Both binaries (`vischeck` and `visnorm`) emit a single JSON object on
//! stdout and exit non-zero on failure. The command implementations here
//! build typed output structs so the JSON shape is fixed at compile time
//! rather than assembled ad hoc.

pub mod commands;
pub mod output;
pub mod paths;

pub use commands::{run_palette, run_ssim, run_suggest, run_transfer};
pub use output::{exit_with_error, print_json};
pub use paths::{default_output_path, display_absolute};
