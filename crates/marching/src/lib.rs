//! Parallel marching-squares contour extraction.
//!
//! The pipeline runs three phases over a fixed pool of workers, with a
//! barrier between each:
//!
//! ```text
//! source Bitmap
//!      │
//!      ├─► resample   (only if larger than the rescale target; bicubic)
//!      │        ── barrier ──
//!      ├─► sample     (threshold into an OccupancyGrid)
//!      │        ── barrier ──
//!      └─► march      (stamp one ContourTileSet tile per grid cell)
//!               ── join ──
//!               ▼
//!        working Bitmap
//! ```
//!
//! Every phase splits its output buffer into disjoint row bands with
//! [`partition::split_rows_mut`] before handing them to workers, so no two
//! workers can ever write the same memory.
//!
//! # Example
//!
//! ```ignore
//! use marching::{io, ContourTileSet, Coordinator};
//! use contour_common::MarchConfig;
//!
//! let config = MarchConfig::default();
//! let tiles = ContourTileSet::load_for("contours", "ppm", &config)?;
//! let source = io::load_bitmap("in.ppm")?;
//!
//! let outcome = Coordinator::new(config, 4)?.run(source, &tiles)?;
//! io::save_bitmap(&outcome.bitmap, "out.ppm")?;
//! ```

pub mod grid;
pub mod io;
pub mod march;
pub mod partition;
pub mod pipeline;
pub mod resample;
pub mod tiles;

pub use grid::{sample_grid, OccupancyGrid};
pub use march::{configuration_index, march_grid};
pub use partition::{partition, partitions};
pub use pipeline::{Coordinator, MarchOutcome, PhaseTimings};
pub use resample::{rescale, sample_bicubic};
pub use tiles::ContourTileSet;
