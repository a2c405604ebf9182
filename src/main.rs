use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use halftoner::{
    config::{ColorMode, DEFAULT_OUT_DIR, ProcessConfig},
    dithering::{Algorithm, error_diffusion::Traversal},
};

/// Dither images to pure black and white with error diffusion
#[derive(Parser, Debug)]
#[command(name = "halftoner")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Images to dither, each one produces `<name>.<algorithm>.<ext>`
    #[arg(required = true, value_name = "INPUT")]
    inputs: Vec<PathBuf>,

    /// Directory the dithered images are written to (created if missing)
    #[arg(short, long, default_value = DEFAULT_OUT_DIR)]
    out_dir: PathBuf,

    /// Algorithm to run: floyd or atkinson (repeatable, default: all)
    #[arg(short, long = "algorithm", value_name = "NAME")]
    algorithms: Vec<Algorithm>,

    /// Dither red, green and blue separately instead of luminance
    #[arg(long)]
    color: bool,

    /// Scan odd rows right-to-left
    #[arg(long)]
    serpentine: bool,
}

impl Cli {
    fn config(&self) -> ProcessConfig {
        ProcessConfig::default()
            .with_out_dir(&self.out_dir)
            .with_algorithms(self.algorithms.iter().copied())
            .with_color_mode(if self.color {
                ColorMode::Rgb
            } else {
                ColorMode::Luma
            })
            .with_traversal(if self.serpentine {
                Traversal::Serpentine
            } else {
                Traversal::Raster
            })
    }
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "halftoner=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    let config = cli.config();
    tracing::debug!(?config, inputs = cli.inputs.len(), "starting");

    let report = halftoner::run(&config, cli.inputs.as_slice())?;

    let written = report.written().count();
    if report.is_success() {
        tracing::info!(written, "done");
        return Ok(ExitCode::SUCCESS);
    }

    eprintln!("some images failed:\n{}", report.failure_summary());
    tracing::info!(written, "done with failures");
    Ok(ExitCode::FAILURE)
}
