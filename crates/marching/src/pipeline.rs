//! Parallel coordinator: resample, sample and march over a fixed worker pool.
//!
//! Each phase hands exactly one job to each of the `P` workers and returns
//! only when all of them are done, which is the barrier between phases.
//! Jobs own disjoint `&mut` bands of the phase's output buffer, split before
//! the workers start; everything else they touch is shared read-only.

use std::ops::Range;
use std::time::{Duration, Instant};

use contour_common::{Bitmap, ContourError, MarchConfig, Result};
use rayon::{ThreadPool, ThreadPoolBuilder};
use tracing::{debug, info, trace};

use crate::grid::{sample_band, OccupancyGrid};
use crate::march::march_band;
use crate::partition::{partitions, split_rows_mut};
use crate::resample::resample_rows;
use crate::tiles::ContourTileSet;

/// Wall-clock time spent in each phase.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PhaseTimings {
    /// `None` when no rescale was needed.
    pub resample: Option<Duration>,
    pub sample: Duration,
    pub march: Duration,
}

/// Result of one run.
#[derive(Debug, Clone)]
pub struct MarchOutcome {
    /// The working bitmap with contour tiles stamped in.
    pub bitmap: Bitmap,
    /// Whether the source was resampled to the rescale target.
    pub rescaled: bool,
    /// Occupancy grid dimensions `(rows, cols)`, boundary included.
    pub grid_dimensions: (usize, usize),
    pub timings: PhaseTimings,
}

/// Drives the three phases over a fixed number of workers.
#[derive(Debug, Clone)]
pub struct Coordinator {
    config: MarchConfig,
    workers: usize,
}

impl Coordinator {
    /// Create a coordinator. Fails if the configuration is invalid or
    /// `workers` is zero.
    pub fn new(config: MarchConfig, workers: usize) -> Result<Self> {
        config.validate()?;
        if workers == 0 {
            return Err(ContourError::config("worker count must be at least 1"));
        }
        Ok(Self { config, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run the full pipeline on `source`.
    ///
    /// The source is moved in as the working bitmap when it fits within the
    /// rescale target; otherwise it is resampled into a freshly allocated
    /// target and dropped.
    pub fn run(&self, source: Bitmap, tiles: &ContourTileSet) -> Result<MarchOutcome> {
        let config = &self.config;
        source.ensure_not_empty()?;
        tiles.ensure_matches(config)?;

        info!(
            width = source.width(),
            height = source.height(),
            workers = self.workers,
            "Starting marching squares"
        );

        let pool = build_pool(self.workers)?;
        let mut timings = PhaseTimings::default();

        // Phase 1: resample
        let rescaled = config.needs_rescale(source.width(), source.height());
        let mut working = if rescaled {
            let start = Instant::now();
            let target = self.resample(&pool, &source)?;
            drop(source);
            timings.resample = Some(start.elapsed());
            debug!(
                width = target.width(),
                height = target.height(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "Resample phase complete"
            );
            target
        } else {
            source
        };

        // Phase 2: sample
        let start = Instant::now();
        let grid = self.sample(&pool, &working)?;
        timings.sample = start.elapsed();
        debug!(
            rows = grid.rows(),
            cols = grid.cols(),
            occupied = grid.occupied_count(),
            elapsed_ms = timings.sample.as_millis() as u64,
            "Sample phase complete"
        );

        // Phase 3: march
        let start = Instant::now();
        self.march(&pool, &grid, tiles, &mut working);
        timings.march = start.elapsed();
        debug!(
            elapsed_ms = timings.march.as_millis() as u64,
            "March phase complete"
        );

        let grid_dimensions = (grid.rows(), grid.cols());
        drop(grid);
        drop(pool);

        info!(
            width = working.width(),
            height = working.height(),
            rescaled,
            "Marching squares complete"
        );

        Ok(MarchOutcome {
            bitmap: working,
            rescaled,
            grid_dimensions,
            timings,
        })
    }

    /// Resample `source` into a new `rescale_width × rescale_height` bitmap,
    /// each worker filling a band of target rows.
    fn resample(&self, pool: &ThreadPool, source: &Bitmap) -> Result<Bitmap> {
        let (width, height) = (self.config.rescale_width, self.config.rescale_height);
        let mut target = Bitmap::try_new(width, height)?;

        let ranges = partitions(self.workers, height);
        let bands = split_rows_mut(target.pixels_mut(), width, &ranges);
        let jobs: Vec<_> = ranges.into_iter().zip(bands).collect();

        run_phase(pool, jobs, |worker, (rows, band)| {
            trace!(worker, rows = ?rows, "Resampling rows");
            resample_rows(source, band, rows, width, height);
        });

        Ok(target)
    }

    /// Sample the occupancy grid. Workers split the `p` cell rows; the last
    /// worker's band also holds boundary row `p`.
    fn sample(&self, pool: &ThreadPool, working: &Bitmap) -> Result<OccupancyGrid> {
        let config = &self.config;
        let mut grid = OccupancyGrid::for_bitmap(working.width(), working.height(), config)?;
        let (rows, cols) = (grid.rows(), grid.cols());

        let mut ranges = partitions(self.workers, grid.cell_rows());
        if let Some(last) = ranges.last_mut() {
            last.end = rows;
        }
        let bands = split_rows_mut(grid.cells_mut(), cols, &ranges);
        let jobs: Vec<_> = ranges.into_iter().zip(bands).collect();

        run_phase(pool, jobs, |worker, (rows, band)| {
            trace!(worker, rows = ?rows, "Sampling grid rows");
            sample_band(working, band, rows, cols, config);
        });

        Ok(grid)
    }

    /// Stamp tiles into `working`. Each worker owns the pixel rows under its
    /// cell rows; the last one also owns any remainder rows below the grid.
    fn march(
        &self,
        pool: &ThreadPool,
        grid: &OccupancyGrid,
        tiles: &ContourTileSet,
        working: &mut Bitmap,
    ) {
        let (width, height) = working.dimensions();
        let cell_ranges = partitions(self.workers, grid.cell_rows());
        let pixel_ranges = pixel_row_ranges(&cell_ranges, self.config.step_y, height);

        let bands = split_rows_mut(working.pixels_mut(), width, &pixel_ranges);
        let jobs: Vec<_> = cell_ranges.into_iter().zip(bands).collect();

        run_phase(pool, jobs, |worker, (rows, band)| {
            trace!(worker, rows = ?rows, "Marching cell rows");
            march_band(grid, tiles, band, width, rows);
        });
    }
}

/// Pixel rows covered by each range of cell rows. The last range is
/// extended to `height`.
fn pixel_row_ranges(cell_ranges: &[Range<usize>], step_y: usize, height: usize) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = cell_ranges
        .iter()
        .map(|r| r.start * step_y..r.end * step_y)
        .collect();
    if let Some(last) = ranges.last_mut() {
        last.end = height;
    }
    ranges
}

/// Build a pool of exactly `workers` threads.
fn build_pool(workers: usize) -> Result<ThreadPool> {
    ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("march-worker-{}", i))
        .build()
        .map_err(|e| ContourError::ThreadPool(e.to_string()))
}

/// Run one job per worker and return once every worker has finished.
fn run_phase<J, F>(pool: &ThreadPool, jobs: Vec<J>, work: F)
where
    J: Send,
    F: Fn(usize, J) + Sync,
{
    let work = &work;
    pool.scope(|scope| {
        for (worker, job) in jobs.into_iter().enumerate() {
            scope.spawn(move |_| work(worker, job));
        }
    });
}
