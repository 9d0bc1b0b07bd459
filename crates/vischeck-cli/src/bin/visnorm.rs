use clap::Parser;
use std::path::PathBuf;

use vischeck_cli::output::{exit_with_error, print_json, NormalizeOutput};
use vischeck_cli::paths::{default_output_path, display_absolute};
use vischeck_core::capabilities::{check_capabilities, INSTALL_HINT};
use vischeck_core::config::set_verbose;
use vischeck_core::exporters::export_image;
use vischeck_core::normalize::{image_stats, normalize, perceptual_hash};

#[derive(Parser)]
#[command(name = "visnorm")]
#[command(version, about = "Normalize screenshots for visual comparison", long_about = None)]
struct Cli {
    /// Input image path
    #[arg(short, long, value_name = "PATH")]
    input: PathBuf,

    /// Output path (default: <input>_normalized.png)
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Target width
    #[arg(short, long, default_value = "1200")]
    width: u32,

    /// Disable content auto-crop
    #[arg(long)]
    no_crop: bool,

    /// Include image statistics in the output
    #[arg(long)]
    stats: bool,

    /// Print progress details to stderr
    #[arg(long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    set_verbose(cli.verbose);

    if let Err(e) = check_capabilities() {
        exit_with_error(e, Some(INSTALL_HINT.to_string()));
    }

    if let Err(e) = run(cli) {
        exit_with_error(e, None);
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let image = normalize(&cli.input, cli.width, !cli.no_crop)?;

    let output = cli
        .output
        .unwrap_or_else(|| default_output_path(&cli.input, "normalized"));
    export_image(&image, &output)?;

    let payload = NormalizeOutput {
        success: true,
        input: display_absolute(&cli.input),
        output: display_absolute(&output),
        width: image.width,
        height: image.height,
        hash: perceptual_hash(&image)?,
        stats: if cli.stats {
            Some(image_stats(&image)?)
        } else {
            None
        },
    };
    print_json(&payload);
    Ok(())
}
