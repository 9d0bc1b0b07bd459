use clap::{Parser, Subcommand};
use std::path::PathBuf;

use vischeck_cli::commands::{cmd_palette, cmd_ssim, cmd_suggest, cmd_transfer};
use vischeck_cli::output::exit_with_error;
use vischeck_core::capabilities::{check_capabilities, INSTALL_HINT};
use vischeck_core::config::set_verbose;

#[derive(Parser)]
#[command(name = "vischeck")]
#[command(version, about = "Screenshot color and similarity analysis", long_about = None)]
struct Cli {
    /// Print progress details to stderr
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply Reinhard color transfer from a target onto a source image
    Transfer {
        /// Source image (to be recolored)
        #[arg(short, long, value_name = "PATH")]
        source: PathBuf,

        /// Target image providing the color statistics
        #[arg(short, long, value_name = "PATH")]
        target: PathBuf,

        /// Output path (default: <source>_matched.png)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Only transfer chrominance, keeping the source lightness
        #[arg(long)]
        preserve_luminance: bool,
    },

    /// Extract the dominant color palette of an image
    Palette {
        /// Input image
        #[arg(short, long, value_name = "PATH")]
        image: PathBuf,

        /// Number of colors to extract
        #[arg(short, long, default_value = "6")]
        k: usize,
    },

    /// Score structural similarity between two screenshots
    Ssim {
        /// Reference image
        #[arg(short = 'r', long = "ref", value_name = "PATH")]
        reference: PathBuf,

        /// Generated image
        #[arg(short = 'g', long = "gen", value_name = "PATH")]
        generated: PathBuf,
    },

    /// Suggest CSS filter adjustments to match a reference
    Suggest {
        /// Reference image
        #[arg(short = 'r', long = "ref", value_name = "PATH")]
        reference: PathBuf,

        /// Generated image
        #[arg(short = 'g', long = "gen", value_name = "PATH")]
        generated: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();
    set_verbose(cli.verbose);

    // Probe codec support once, before touching any input
    if let Err(e) = check_capabilities() {
        exit_with_error(e, Some(INSTALL_HINT.to_string()));
    }

    let result = match cli.command {
        Commands::Transfer {
            source,
            target,
            output,
            preserve_luminance,
        } => cmd_transfer(source, target, output, preserve_luminance),

        Commands::Palette { image, k } => cmd_palette(image, k),

        Commands::Ssim {
            reference,
            generated,
        } => cmd_ssim(reference, generated),

        Commands::Suggest {
            reference,
            generated,
        } => cmd_suggest(reference, generated),
    };

    if let Err(e) = result {
        exit_with_error(e, None);
    }
}
