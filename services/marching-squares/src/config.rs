//! Resolve the run configuration and contour tiles from CLI arguments.
//!
//! Precedence, lowest first: built-in defaults, YAML file (`--config`),
//! `MARCH_*` environment variables, command-line flags.

use anyhow::{Context, Result};
use contour_common::MarchConfig;
use marching::ContourTileSet;
use tracing::info;

use crate::Args;

pub fn resolve(args: &Args) -> Result<MarchConfig> {
    let base = match &args.config {
        Some(path) => MarchConfig::from_yaml_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MarchConfig::default(),
    };

    let config = apply_flags(base.with_env_overrides(), args);
    config.validate()?;
    Ok(config)
}

fn apply_flags(mut config: MarchConfig, args: &Args) -> MarchConfig {
    if let Some(step) = args.step {
        config.step_x = step;
        config.step_y = step;
    }
    if let Some(threshold) = args.threshold {
        config.threshold = threshold;
    }
    if let Some(size) = args.rescale {
        config.rescale_width = size;
        config.rescale_height = size;
    }
    config
}

pub fn load_tiles(args: &Args, config: &MarchConfig) -> Result<ContourTileSet> {
    if args.synthesize_tiles {
        info!(
            step_x = config.step_x,
            step_y = config.step_y,
            "Synthesizing contour tiles"
        );
        return Ok(ContourTileSet::synthesize(config.step_x, config.step_y)?);
    }

    let tiles = ContourTileSet::load_for(&args.tiles_dir, &args.tiles_ext, config)
        .with_context(|| format!("failed to load contour tiles from {}", args.tiles_dir.display()))?;
    Ok(tiles)
}
