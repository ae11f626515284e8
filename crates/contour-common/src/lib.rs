//! Common types shared across the marching-squares workspace.
//!
//! - [`Pixel`] and [`Bitmap`]: 3-channel 8-bit raster buffers
//! - [`MarchConfig`]: algorithm constants (step size, threshold, rescale target)
//! - [`ContourError`]: the workspace-wide error type

pub mod bitmap;
pub mod config;
pub mod error;
pub mod pixel;

pub use bitmap::{try_filled_vec, Bitmap};
pub use config::{MarchConfig, DEFAULT_RESCALE_SIZE, DEFAULT_STEP, DEFAULT_THRESHOLD, TILE_COUNT};
pub use error::{ContourError, Result};
pub use pixel::Pixel;
