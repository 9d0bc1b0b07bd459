//! Typed JSON output for the command-line tools
//!
//! One struct per command, serialized with serde_json. Keeping the
//! shapes as structs (not ad hoc maps) means a field rename is a
//! compile error, not a silent contract break with downstream tooling.

use serde::Serialize;
use vischeck_core::models::{ColorShift, DiffRegion, ImageStats, PaletteEntry};

/// `transfer` command result
#[derive(Debug, Serialize)]
pub struct TransferOutput {
    pub success: bool,
    pub output: String,
    pub source_mean_lab: [f32; 3],
    pub target_mean_lab: [f32; 3],
    pub color_shift: ColorShift,
}

/// `palette` command result
#[derive(Debug, Serialize)]
pub struct PaletteOutput {
    pub success: bool,
    pub colors: Vec<String>,
    pub palette_details: Vec<PaletteEntry>,
    pub primary_background: Option<String>,
    pub accent: Option<String>,
}

/// `ssim` command result
#[derive(Debug, Serialize)]
pub struct SsimOutput {
    pub success: bool,
    pub ssim: f32,
    pub passed: bool,
    pub difference_regions: Vec<DiffRegion>,
    pub analysis: String,
}

/// Filter multipliers inside [`SuggestOutput`]
#[derive(Debug, Serialize)]
pub struct SuggestedFilters {
    pub brightness: f32,
    pub contrast: f32,
    pub saturate: f32,
}

/// `suggest` command result
#[derive(Debug, Serialize)]
pub struct SuggestOutput {
    pub success: bool,
    pub suggested_filters: SuggestedFilters,
    pub css_filter: String,
    pub tone_suggestion: String,
}

/// `visnorm` result
#[derive(Debug, Serialize)]
pub struct NormalizeOutput {
    pub success: bool,
    pub input: String,
    pub output: String,
    pub width: u32,
    pub height: u32,
    pub hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<ImageStats>,
}

/// Failure payload shared by every command
#[derive(Debug, Serialize)]
pub struct ErrorOutput {
    pub success: bool,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub install: Option<String>,
}

/// Print a result object to stdout as pretty JSON
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(1);
        }
    }
}

/// Emit a structured failure object and exit non-zero
pub fn exit_with_error(error: String, install: Option<String>) -> ! {
    let payload = ErrorOutput {
        success: false,
        error,
        install,
    };
    match serde_json::to_string(&payload) {
        Ok(json) => println!("{}", json),
        Err(_) => eprintln!("Error: {}", payload.error),
    }
    std::process::exit(1);
}
