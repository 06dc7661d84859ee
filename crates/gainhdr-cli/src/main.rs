//! gainhdr - rebuild HDR images from SDR base images and gain maps

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use gainhdr_core::{ColorPrimaries, TransferFunction};
use gainhdr_ops::Interpolation;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod image_io;

#[derive(Parser)]
#[command(name = "gainhdr")]
#[command(author, version, about = "Gain-map HDR reconstruction")]
#[command(long_about = "
Rebuilds an HDR image from an SDR base image, its gain map and the gain
metadata, then writes it in a standard HDR encoding (BT.2100 PQ by default).

Examples:
  gainhdr convert base.png gain.png -o hdr.png --apple-headroom-tag 1.01 --apple-gain-tag 0.012
  gainhdr convert base.png gain.png -o hdr.png --min-stops 0 --max-stops 2.5
  gainhdr convert base.png -o p3.png --target-primaries 'Display P3' --transfer sRGB --depth 8
  gainhdr convert base.png gain.png -o hdr.png --headroom 4 --config hlg.yaml
  gainhdr headroom --headroom-tag 1.01 --gain-tag 0.012
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Number of threads (0 = auto)
    #[arg(short = 'j', long, global = true, default_value = "0")]
    threads: usize,
}

#[derive(Subcommand)]
enum Commands {
    /// Reconstruct and encode an HDR image
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Print the headroom derived from Apple maker notes
    Headroom(HeadroomArgs),
}

#[derive(Args)]
struct ConvertArgs {
    /// SDR base image (PNG, RGB)
    base: PathBuf,

    /// Gain map (PNG, grayscale); omit for the SDR-only path
    gainmap: Option<PathBuf>,

    /// Output image (PNG)
    #[arg(short, long)]
    output: PathBuf,

    /// YAML conversion config; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Primaries of the base image
    #[arg(long, default_value = "Display P3")]
    base_primaries: ColorPrimaries,

    /// Transfer function of the base image
    #[arg(long, default_value = "sRGB")]
    base_transfer: TransferFunction,

    /// Transfer function the gain map is stored with
    #[arg(long, default_value = "sRGB")]
    gain_transfer: TransferFunction,

    /// Minimum gain in stops
    #[arg(long, allow_hyphen_values = true)]
    min_stops: Option<f32>,

    /// Maximum gain in stops
    #[arg(long, allow_hyphen_values = true)]
    max_stops: Option<f32>,

    /// Gain-map gamma
    #[arg(long)]
    gamma: Option<f32>,

    /// Linear headroom (Apple-style linear gain curve)
    #[arg(long, conflicts_with_all = ["min_stops", "max_stops"])]
    headroom: Option<f32>,

    /// Apple maker note 0x0021 (HDRHeadroom)
    #[arg(long, requires = "apple_gain_tag")]
    apple_headroom_tag: Option<f32>,

    /// Apple maker note 0x0030 (HDRGain)
    #[arg(long, requires = "apple_headroom_tag")]
    apple_gain_tag: Option<f32>,

    /// Output primaries: sRGB, Display P3, DCI-P3, BT.2020, ProPhoto, ACES AP1
    #[arg(long)]
    target_primaries: Option<ColorPrimaries>,

    /// Output transfer: linear, sRGB, gamma22, BT.709, PQ, HLG
    #[arg(short = 't', long)]
    transfer: Option<TransferFunction>,

    /// Output bit depth: 8 or 16
    #[arg(short = 'd', long)]
    depth: Option<u32>,

    /// Reference white in cd/m2
    #[arg(long)]
    white_nits: Option<f32>,

    /// Ordered dithering for 8-bit output
    #[arg(long)]
    dither: bool,

    /// Gain-map filter: nearest, bilinear, bicubic
    #[arg(long)]
    interpolation: Option<Interpolation>,
}

#[derive(Args)]
struct HeadroomArgs {
    /// Apple maker note 0x0021 (HDRHeadroom)
    #[arg(long)]
    headroom_tag: f32,

    /// Apple maker note 0x0030 (HDRGain)
    #[arg(long, allow_hyphen_values = true)]
    gain_tag: f32,
}

fn init_logging(verbose: u8) -> Result<()> {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("Failed to install logger")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    // Configure thread pool
    if cli.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(cli.threads)
            .build_global()
            .context("Failed to configure thread pool")?;
    }

    match cli.command {
        Commands::Convert(args) => commands::convert::run(args),
        Commands::Headroom(args) => commands::headroom::run(args),
    }
}
