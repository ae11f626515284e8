//! Common test fixtures for marching-squares tests.

use contour_common::MarchConfig;

/// Worker counts exercised by determinism tests: one, a few, a count that
/// does not divide typical grid sizes, and more workers than grid rows.
pub const WORKER_COUNTS: [usize; 6] = [1, 2, 3, 4, 7, 64];

/// Configuration with a `step × step` grid and a small rescale target, so
/// tests can trigger resampling without 2048×2048 buffers.
pub fn small_config(step: usize, rescale: usize) -> MarchConfig {
    MarchConfig {
        step_x: step,
        step_y: step,
        rescale_width: rescale,
        rescale_height: rescale,
        ..Default::default()
    }
}
