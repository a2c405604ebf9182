use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "xtask")]
#[command(about = "Development tasks for halftoner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write gradient test images to dither by hand
    Samples {
        #[arg(long, default_value = "./samples")]
        out_dir: PathBuf,
        #[arg(long, default_value_t = 256)]
        size: u32,
    },
    Ci,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Samples { out_dir, size } => samples(&out_dir, size),
        Commands::Ci => ci(),
    }
}

/// A horizontal gray ramp and an RGB ramp, the usual way to eyeball how a
/// kernel handles every tone.
fn samples(out_dir: &Path, size: u32) -> Result<()> {
    anyhow::ensure!(size > 1, "size must be at least 2");
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("creating {}", out_dir.display()))?;

    let last = size - 1;
    let ramp = image::GrayImage::from_fn(size, size / 4, |x, _| {
        image::Luma([(x * 255 / last) as u8])
    });
    ramp.save(out_dir.join("ramp.png"))?;

    let colors = image::RgbImage::from_fn(size, size, |x, y| {
        image::Rgb([
            (x * 255 / last) as u8,
            (y * 255 / last) as u8,
            ((last - x) * 255 / last) as u8,
        ])
    });
    colors.save(out_dir.join("colors.png"))?;

    println!("wrote samples to {}", out_dir.display());
    Ok(())
}

fn ci() -> Result<()> {
    run_command("cargo", &["fmt", "--all", "--check"])?;
    run_command(
        "cargo",
        &[
            "clippy",
            "--all-targets",
            "--all-features",
            "--",
            "-D",
            "warnings",
        ],
    )?;
    run_command("cargo", &["build", "--all-features"])?;
    run_command("cargo", &["test", "--all-features"])?;
    Ok(())
}

fn run_command(cmd: &str, args: &[&str]) -> Result<()> {
    use std::process::Command;
    let status = Command::new(cmd).args(args).status()?;
    if !status.success() {
        anyhow::bail!("Command failed: {} {}", cmd, args.join(" "));
    }
    Ok(())
}
