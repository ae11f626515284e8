//! Occupancy grid sampling.
//!
//! The grid has one point every `step_y` rows and `step_x` columns of the
//! working bitmap, plus one extra row and column sampled from the bitmap's
//! last row and last column:
//!
//! ```text
//!            j = 0      1    ...   q-1  │  q (last column)
//!  i = 0     (0,0)    (0,sx)             │  (0, w-1)
//!  i = 1     (sy,0)                      │
//!  ...                                   │
//!  i = p-1                               │
//!  ──────────────────────────────────────┼──────────
//!  i = p     (h-1,0)  (h-1,sx)  ...      │  always 0
//! ```

use std::ops::Range;

use contour_common::{try_filled_vec, Bitmap, MarchConfig, Pixel, Result};

/// Binary occupancy grid, row-major, one byte per cell (0 or 1).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyGrid {
    rows: usize,
    cols: usize,
    cells: Vec<u8>,
}

impl OccupancyGrid {
    /// Allocate a zeroed grid.
    pub fn try_new(rows: usize, cols: usize) -> Result<Self> {
        let len = rows.saturating_mul(cols);
        let cells = try_filled_vec("occupancy grid", len, 0u8)?;
        Ok(Self { rows, cols, cells })
    }

    /// Allocate a zeroed grid sized for a working bitmap of the given
    /// dimensions.
    pub fn for_bitmap(width: usize, height: usize, config: &MarchConfig) -> Result<Self> {
        let (rows, cols) = config.grid_dimensions(width, height);
        Self::try_new(rows, cols)
    }

    /// Total rows, including the boundary row.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Total columns, including the boundary column.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of marchable cell rows (`p`).
    pub fn cell_rows(&self) -> usize {
        self.rows.saturating_sub(1)
    }

    /// Number of marchable cell columns (`q`).
    pub fn cell_cols(&self) -> usize {
        self.cols.saturating_sub(1)
    }

    #[inline]
    pub fn get(&self, i: usize, j: usize) -> u8 {
        self.cells[i * self.cols + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: u8) {
        self.cells[i * self.cols + j] = value;
    }

    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    pub fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    /// Number of occupied points.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c == 1).count()
    }
}

/// 1 if the pixel's luminance is at or below `threshold`, else 0.
#[inline]
pub fn occupancy(pixel: Pixel, threshold: u8) -> u8 {
    u8::from(pixel.luminance() <= threshold)
}

/// Sample grid rows `rows` into `band`.
///
/// `band` holds exactly those rows of a grid with `cols` columns. Rows below
/// `p` get their interior cells and boundary-column cell; row `p`, if in
/// range, gets the boundary row and the forced-zero corner.
pub fn sample_band(
    bitmap: &Bitmap,
    band: &mut [u8],
    rows: Range<usize>,
    cols: usize,
    config: &MarchConfig,
) {
    debug_assert_eq!(band.len(), rows.len() * cols);

    let (width, height) = bitmap.dimensions();
    let p = height / config.step_y;
    let q = cols - 1;
    let threshold = config.threshold;

    for (local, i) in rows.enumerate() {
        let out = &mut band[local * cols..(local + 1) * cols];

        if i < p {
            let y = i * config.step_y;
            for (j, cell) in out[..q].iter_mut().enumerate() {
                *cell = occupancy(bitmap.pixel(j * config.step_x, y), threshold);
            }
            out[q] = occupancy(bitmap.pixel(width - 1, y), threshold);
        } else {
            let y = height - 1;
            for (j, cell) in out[..q].iter_mut().enumerate() {
                *cell = occupancy(bitmap.pixel(j * config.step_x, y), threshold);
            }
            out[q] = 0;
        }
    }
}

/// Sample the whole grid on the calling thread.
pub fn sample_grid(bitmap: &Bitmap, config: &MarchConfig) -> Result<OccupancyGrid> {
    bitmap.ensure_not_empty()?;
    let mut grid = OccupancyGrid::for_bitmap(bitmap.width(), bitmap.height(), config)?;
    let (rows, cols) = (grid.rows(), grid.cols());
    sample_band(bitmap, grid.cells_mut(), 0..rows, cols, config);
    Ok(grid)
}
