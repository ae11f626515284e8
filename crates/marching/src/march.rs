//! Contour marching: stamp one tile per grid cell.

use std::ops::Range;

use contour_common::{Bitmap, Pixel};

use crate::grid::OccupancyGrid;
use crate::tiles::ContourTileSet;

/// 4-bit configuration index of a cell from its corner occupancies.
///
/// Bit order, most significant first: top-left, top-right, bottom-right,
/// bottom-left.
#[inline]
pub fn configuration_index(top_left: u8, top_right: u8, bottom_right: u8, bottom_left: u8) -> usize {
    (8 * top_left + 4 * top_right + 2 * bottom_right + bottom_left) as usize
}

/// Configuration index of cell `(i, j)`.
#[inline]
pub fn cell_configuration(grid: &OccupancyGrid, i: usize, j: usize) -> usize {
    configuration_index(
        grid.get(i, j),
        grid.get(i, j + 1),
        grid.get(i + 1, j + 1),
        grid.get(i + 1, j),
    )
}

/// March cell rows `rows`, writing into `band`.
///
/// `band` is the slab of a `width`-wide bitmap whose first row is pixel row
/// `rows.start * step_y`. Every cell `(i, j)` in range gets tile
/// `cell_configuration(i, j)` copied with its top-left corner at pixel row
/// `i * step_y`, column `j * step_x`.
pub fn march_band(
    grid: &OccupancyGrid,
    tiles: &ContourTileSet,
    band: &mut [Pixel],
    width: usize,
    rows: Range<usize>,
) {
    let step_x = tiles.tile_width();
    let step_y = tiles.tile_height();
    let band_origin = rows.start * step_y;

    for i in rows {
        for j in 0..grid.cell_cols() {
            let tile = tiles.get(cell_configuration(grid, i, j));
            stamp_tile(band, width, tile, i * step_y - band_origin, j * step_x);
        }
    }
}

/// Copy `tile` into `band` with its top-left corner at (`row`, `col`).
fn stamp_tile(band: &mut [Pixel], width: usize, tile: &Bitmap, row: usize, col: usize) {
    let tile_width = tile.width();
    for ty in 0..tile.height() {
        let start = (row + ty) * width + col;
        band[start..start + tile_width].copy_from_slice(tile.row(ty));
    }
}

/// March the whole grid on the calling thread.
pub fn march_grid(grid: &OccupancyGrid, tiles: &ContourTileSet, bitmap: &mut Bitmap) {
    let width = bitmap.width();
    march_band(grid, tiles, bitmap.pixels_mut(), width, 0..grid.cell_rows());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn indexed_tiles(step: usize) -> ContourTileSet {
        let tiles = (0..16)
            .map(|k| Bitmap::filled(step, step, Pixel::gray(k as u8 * 10)).unwrap())
            .collect();
        ContourTileSet::from_tiles(tiles).unwrap()
    }

    #[test]
    fn test_configuration_index_bit_order() {
        assert_eq!(configuration_index(0, 0, 0, 0), 0);
        assert_eq!(configuration_index(1, 1, 1, 1), 15);
        assert_eq!(configuration_index(1, 0, 0, 0), 8);
        assert_eq!(configuration_index(0, 1, 0, 0), 4);
        assert_eq!(configuration_index(0, 0, 1, 0), 2);
        assert_eq!(configuration_index(0, 0, 0, 1), 1);
    }

    #[test]
    fn test_every_configuration_is_unique() {
        let mut seen = HashSet::new();
        for bits in 0u8..16 {
            let k = configuration_index(bits >> 3 & 1, bits >> 2 & 1, bits >> 1 & 1, bits & 1);
            assert!(k < 16);
            assert!(seen.insert(k));
        }
        assert_eq!(seen.len(), 16);
    }

    #[test]
    fn test_cell_configuration_reads_four_corners() {
        let mut grid = OccupancyGrid::try_new(2, 2).unwrap();
        grid.set(0, 1, 1);
        grid.set(1, 0, 1);
        assert_eq!(cell_configuration(&grid, 0, 0), 4 + 1);
    }

    #[test]
    fn test_march_stamps_tiles_at_cell_offsets() {
        let tiles = indexed_tiles(2);
        // 3x3 grid -> 2x2 cells
        let mut grid = OccupancyGrid::try_new(3, 3).unwrap();
        grid.set(1, 1, 1);

        let mut bmp = Bitmap::filled(5, 5, Pixel::WHITE).unwrap();
        march_grid(&grid, &tiles, &mut bmp);

        // Cell (0,0): only bottom-right occupied -> k = 2
        assert_eq!(bmp.pixel(0, 0), Pixel::gray(20));
        assert_eq!(bmp.pixel(1, 1), Pixel::gray(20));
        // Cell (0,1): bottom-left occupied -> k = 1
        assert_eq!(bmp.pixel(2, 0), Pixel::gray(10));
        // Cell (1,0): top-right occupied -> k = 4
        assert_eq!(bmp.pixel(0, 2), Pixel::gray(40));
        // Cell (1,1): top-left occupied -> k = 8
        assert_eq!(bmp.pixel(3, 3), Pixel::gray(80));
        // Remainder column and row are left untouched
        assert_eq!(bmp.pixel(4, 0), Pixel::WHITE);
        assert_eq!(bmp.pixel(0, 4), Pixel::WHITE);
    }

    #[test]
    fn test_march_band_uses_local_offsets() {
        let tiles = indexed_tiles(2);
        let grid = OccupancyGrid::try_new(3, 3).unwrap();

        let mut full = Bitmap::filled(4, 4, Pixel::WHITE).unwrap();
        march_grid(&grid, &tiles, &mut full);

        // Second cell row only: pixel rows 2..4
        let mut band = vec![Pixel::WHITE; 2 * 4];
        march_band(&grid, &tiles, &mut band, 4, 1..2);
        assert_eq!(&band[..], &full.pixels()[2 * 4..]);
    }
}
