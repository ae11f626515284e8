//! Shared test utilities for the marching-squares workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic bitmap generators (solid, disc, stripes, noise)
//! - Contour tile sets with one distinct colour per configuration
//! - Small configurations that keep tests fast
//!
//! # Usage
//!
//! Add to your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```
//!
//! Then import in your tests:
//!
//! ```ignore
//! use test_utils::{disc_bitmap, indexed_tiles, small_config};
//! ```

pub mod fixtures;
pub mod generators;

// Re-export commonly used items at the crate root
pub use fixtures::*;
pub use generators::*;

pub use contour_common::{Bitmap, Pixel};

/// Assert that two bitmaps are identical, reporting the first differing
/// pixel instead of dumping both buffers.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_bitmaps_eq;
///
/// assert_bitmaps_eq!(single_worker.bitmap, many_workers.bitmap);
/// ```
#[macro_export]
macro_rules! assert_bitmaps_eq {
    ($left:expr, $right:expr) => {{
        let left: &$crate::Bitmap = &$left;
        let right: &$crate::Bitmap = &$right;
        assert_eq!(
            left.dimensions(),
            right.dimensions(),
            "bitmap dimensions differ"
        );
        if let Some((idx, (l, r))) = left
            .pixels()
            .iter()
            .zip(right.pixels())
            .enumerate()
            .find(|(_, (l, r))| l != r)
        {
            panic!(
                "bitmaps differ at ({}, {}): {:?} != {:?}",
                idx % left.width(),
                idx / left.width(),
                l,
                r
            );
        }
    }};
}
