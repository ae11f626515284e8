//! Configuration for the marching-squares pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ContourError, Result};

/// Number of contour tiles, one per 4-bit corner configuration.
pub const TILE_COUNT: usize = 16;

/// Default sampling step in pixels (both axes).
pub const DEFAULT_STEP: usize = 8;

/// Default luminance threshold: pixels at or below it are occupied.
pub const DEFAULT_THRESHOLD: u8 = 200;

/// Default rescale target (both axes).
pub const DEFAULT_RESCALE_SIZE: usize = 2048;

/// Algorithm constants for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarchConfig {
    /// Horizontal distance between grid samples, and contour tile width.
    pub step_x: usize,

    /// Vertical distance between grid samples, and contour tile height.
    pub step_y: usize,

    /// Luminance at or below this value marks a grid point as occupied.
    pub threshold: u8,

    /// Width of the working bitmap when the source has to be rescaled.
    pub rescale_width: usize,

    /// Height of the working bitmap when the source has to be rescaled.
    pub rescale_height: usize,
}

impl Default for MarchConfig {
    fn default() -> Self {
        Self {
            step_x: DEFAULT_STEP,
            step_y: DEFAULT_STEP,
            threshold: DEFAULT_THRESHOLD,
            rescale_width: DEFAULT_RESCALE_SIZE,
            rescale_height: DEFAULT_RESCALE_SIZE,
        }
    }
}

impl MarchConfig {
    /// Apply `MARCH_*` environment overrides on top of `self`.
    ///
    /// Unparseable values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(val) = std::env::var("MARCH_STEP") {
            if let Ok(step) = val.parse() {
                self.step_x = step;
                self.step_y = step;
            }
        }

        if let Ok(val) = std::env::var("MARCH_STEP_X") {
            if let Ok(step) = val.parse() {
                self.step_x = step;
            }
        }

        if let Ok(val) = std::env::var("MARCH_STEP_Y") {
            if let Ok(step) = val.parse() {
                self.step_y = step;
            }
        }

        if let Ok(val) = std::env::var("MARCH_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                self.threshold = threshold;
            }
        }

        if let Ok(val) = std::env::var("MARCH_RESCALE_WIDTH") {
            if let Ok(width) = val.parse() {
                self.rescale_width = width;
            }
        }

        if let Ok(val) = std::env::var("MARCH_RESCALE_HEIGHT") {
            if let Ok(height) = val.parse() {
                self.rescale_height = height;
            }
        }

        self
    }

    /// Parse configuration from YAML. Missing fields take their defaults.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ContourError::resource(path, e.to_string()))?;
        Self::from_yaml_str(&contents)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.step_x == 0 || self.step_y == 0 {
            return Err(ContourError::config(format!(
                "step must be > 0 (got {}x{})",
                self.step_x, self.step_y
            )));
        }

        if self.rescale_width == 0 || self.rescale_height == 0 {
            return Err(ContourError::config(format!(
                "rescale target must be > 0 (got {}x{})",
                self.rescale_width, self.rescale_height
            )));
        }

        Ok(())
    }

    /// Whether a source of the given size exceeds the rescale target in
    /// either dimension.
    pub fn needs_rescale(&self, width: usize, height: usize) -> bool {
        width > self.rescale_width || height > self.rescale_height
    }

    /// Grid dimensions `(rows, cols)` for a working bitmap of the given size,
    /// including the extra boundary row and column.
    pub fn grid_dimensions(&self, width: usize, height: usize) -> (usize, usize) {
        (height / self.step_y + 1, width / self.step_x + 1)
    }
}
