//! Contour overlay generator.
//!
//! Reads a bitmap, runs parallel marching squares over it and writes the
//! result:
//! - Rescales sources larger than the rescale target (bicubic)
//! - Thresholds the working bitmap into an occupancy grid
//! - Stamps one contour tile per grid cell

mod config;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use marching::{io, Coordinator};

#[derive(Parser, Debug)]
#[command(name = "marching-squares")]
#[command(about = "Draw a marching-squares contour overlay onto a bitmap")]
pub struct Args {
    /// Input bitmap (PPM or PNG)
    pub input: PathBuf,

    /// Output bitmap; the format follows the extension
    pub output: PathBuf,

    /// Number of worker threads
    pub workers: usize,

    /// Directory containing contour tiles 0..15
    #[arg(long, env = "MARCH_TILES_DIR", default_value = "contours")]
    pub tiles_dir: PathBuf,

    /// File extension of the contour tiles
    #[arg(long, default_value = "ppm")]
    pub tiles_ext: String,

    /// Draw the standard contour tiles instead of loading them
    #[arg(long)]
    pub synthesize_tiles: bool,

    /// Also write the contour tiles in use to this directory
    #[arg(long)]
    pub export_tiles: Option<PathBuf>,

    /// YAML configuration file
    #[arg(long, env = "MARCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Sampling step in pixels (both axes)
    #[arg(long)]
    pub step: Option<usize>,

    /// Luminance threshold; pixels at or below it are occupied
    #[arg(long)]
    pub threshold: Option<u8>,

    /// Rescale target in pixels (both axes)
    #[arg(long)]
    pub rescale: Option<usize>,

    /// Log level
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,
}

fn main() -> Result<()> {
    // Load environment from .env file if present
    dotenvy::dotenv().ok();

    let args = Args::parse();
    init_tracing(&args.log_level, args.json_logs)?;

    // Validate everything before touching the input
    let march_config = config::resolve(&args)?;
    let coordinator = Coordinator::new(march_config.clone(), args.workers)?;
    let tiles = config::load_tiles(&args, &march_config)?;

    let source = io::load_bitmap(&args.input)?;
    let outcome = coordinator.run(source, &tiles)?;

    // Nothing is written until the run has succeeded
    io::save_bitmap(&outcome.bitmap, &args.output)?;

    if let Some(dir) = &args.export_tiles {
        tiles
            .save(dir, &args.tiles_ext)
            .with_context(|| format!("failed to export tiles to {}", dir.display()))?;
        info!(dir = %dir.display(), "Exported contour tiles");
    }

    info!(
        output = %args.output.display(),
        workers = coordinator.workers(),
        width = outcome.bitmap.width(),
        height = outcome.bitmap.height(),
        rescaled = outcome.rescaled,
        resample_ms = outcome.timings.resample.map(|d| d.as_millis() as u64),
        sample_ms = outcome.timings.sample.as_millis() as u64,
        march_ms = outcome.timings.march.as_millis() as u64,
        "Wrote contour overlay"
    );

    Ok(())
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_names(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}
