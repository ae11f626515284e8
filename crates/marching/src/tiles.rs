//! The 16 contour tiles, one per 4-bit corner configuration.
//!
//! Tiles are normally loaded from `<dir>/0.<ext>` … `<dir>/15.<ext>`.
//! [`ContourTileSet::synthesize`] draws the classic marching-squares cases
//! instead, for runs without an asset directory: the occupied side of the
//! contour is shaded and the contour itself is stroked in black.

use std::path::Path;

use contour_common::{Bitmap, ContourError, MarchConfig, Pixel, Result, TILE_COUNT};
use tracing::debug;

use crate::io;

/// A cell edge crossed by a contour segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Top,
    Right,
    Bottom,
    Left,
}

/// Contour segments for configuration `k` (bits: top-left, top-right,
/// bottom-right, bottom-left). Saddles (5 and 10) get two segments.
fn case_segments(k: usize) -> &'static [(Edge, Edge)] {
    use Edge::*;
    match k {
        0 | 15 => &[],
        1 | 14 => &[(Left, Bottom)],
        2 | 13 => &[(Bottom, Right)],
        3 | 12 => &[(Left, Right)],
        4 | 11 => &[(Top, Right)],
        5 => &[(Top, Right), (Left, Bottom)],
        6 | 9 => &[(Top, Bottom)],
        7 | 8 => &[(Left, Top)],
        10 => &[(Left, Top), (Bottom, Right)],
        _ => &[],
    }
}

/// Fill for the occupied side of a synthesized tile.
const INSIDE_SHADE: [u8; 3] = [208, 208, 208];

/// Cell corners clockwise from top-left, as configuration bits.
const CORNER_BITS: [usize; 4] = [8, 4, 2, 1];

/// Edge between corner `c` and corner `c + 1` (clockwise).
const EDGES_CW: [Edge; 4] = [Edge::Top, Edge::Right, Edge::Bottom, Edge::Left];

/// Outline vertex of an occupied region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Vertex {
    Corner(usize),
    Midpoint(Edge),
}

/// Polygons covering the occupied corners of configuration `k`.
///
/// Walks the cell perimeter clockwise, keeping occupied corners and the
/// midpoints of crossed edges. Saddles are split per corner so the shading
/// agrees with [`case_segments`].
fn occupied_regions(k: usize) -> Vec<Vec<Vertex>> {
    let occupied = |c: usize| k & CORNER_BITS[c] != 0;

    if k == 5 || k == 10 {
        return (0..4)
            .filter(|&c| occupied(c))
            .map(|c| {
                vec![
                    Vertex::Midpoint(EDGES_CW[(c + 3) % 4]),
                    Vertex::Corner(c),
                    Vertex::Midpoint(EDGES_CW[c]),
                ]
            })
            .collect();
    }

    let mut outline = Vec::with_capacity(8);
    for c in 0..4 {
        if occupied(c) {
            outline.push(Vertex::Corner(c));
        }
        if occupied(c) != occupied((c + 1) % 4) {
            outline.push(Vertex::Midpoint(EDGES_CW[c]));
        }
    }

    if outline.is_empty() {
        Vec::new()
    } else {
        vec![outline]
    }
}

/// Immutable set of exactly [`TILE_COUNT`] equally sized tiles.
#[derive(Debug, Clone)]
pub struct ContourTileSet {
    tiles: Vec<Bitmap>,
    tile_width: usize,
    tile_height: usize,
}

impl ContourTileSet {
    /// Build a tile set from 16 bitmaps of identical, non-zero size.
    pub fn from_tiles(tiles: Vec<Bitmap>) -> Result<Self> {
        if tiles.len() != TILE_COUNT {
            return Err(ContourError::config(format!(
                "expected {} contour tiles, got {}",
                TILE_COUNT,
                tiles.len()
            )));
        }

        let (tile_width, tile_height) = tiles[0].dimensions();
        if tile_width == 0 || tile_height == 0 {
            return Err(ContourError::config("contour tiles must not be empty"));
        }
        if let Some((k, tile)) = tiles
            .iter()
            .enumerate()
            .find(|(_, t)| t.dimensions() != (tile_width, tile_height))
        {
            return Err(ContourError::config(format!(
                "contour tile {} is {}x{}, expected {}x{}",
                k,
                tile.width(),
                tile.height(),
                tile_width,
                tile_height
            )));
        }

        Ok(Self {
            tiles,
            tile_width,
            tile_height,
        })
    }

    /// Load `<dir>/<k>.<ext>` for k in 0..16.
    pub fn load(dir: impl AsRef<Path>, ext: &str) -> Result<Self> {
        let dir = dir.as_ref();
        let mut tiles = Vec::with_capacity(TILE_COUNT);
        for k in 0..TILE_COUNT {
            let path = dir.join(format!("{}.{}", k, ext));
            tiles.push(io::load_bitmap(&path)?);
        }

        let set = Self::from_tiles(tiles)?;
        debug!(
            dir = %dir.display(),
            width = set.tile_width,
            height = set.tile_height,
            "Loaded contour tiles"
        );
        Ok(set)
    }

    /// Load tiles and check they match the configured step size.
    pub fn load_for(dir: impl AsRef<Path>, ext: &str, config: &MarchConfig) -> Result<Self> {
        let set = Self::load(dir, ext)?;
        set.ensure_matches(config)?;
        Ok(set)
    }

    /// Draw the 16 standard tiles at `step_x × step_y`: white background,
    /// shaded occupied corners, black segments joining the midpoints of
    /// crossed edges.
    pub fn synthesize(step_x: usize, step_y: usize) -> Result<Self> {
        use tiny_skia::{
            Color, FillRule, LineCap, Paint, PathBuilder, Pixmap, Stroke, Transform,
        };

        let mut pixmap = Pixmap::new(step_x as u32, step_y as u32).ok_or_else(|| {
            ContourError::config(format!("cannot draw {}x{} contour tiles", step_x, step_y))
        })?;

        let (w, h) = (step_x as f32, step_y as f32);
        let midpoint = |edge: Edge| match edge {
            Edge::Top => (w / 2.0, 0.0),
            Edge::Right => (w, h / 2.0),
            Edge::Bottom => (w / 2.0, h),
            Edge::Left => (0.0, h / 2.0),
        };
        let position = |vertex: Vertex| match vertex {
            Vertex::Corner(0) => (0.0, 0.0),
            Vertex::Corner(1) => (w, 0.0),
            Vertex::Corner(2) => (w, h),
            Vertex::Corner(_) => (0.0, h),
            Vertex::Midpoint(edge) => midpoint(edge),
        };

        let mut shade = Paint::default();
        let [r, g, b] = INSIDE_SHADE;
        shade.set_color_rgba8(r, g, b, 255);
        shade.anti_alias = false;

        let mut paint = Paint::default();
        paint.set_color_rgba8(0, 0, 0, 255);
        paint.anti_alias = false;

        let mut stroke = Stroke::default();
        stroke.width = (w.min(h) / 6.0).max(1.5);
        stroke.line_cap = LineCap::Square;

        let mut tiles = Vec::with_capacity(TILE_COUNT);
        for k in 0..TILE_COUNT {
            pixmap.fill(Color::WHITE);

            let mut fill = PathBuilder::new();
            for region in occupied_regions(k) {
                for (n, &vertex) in region.iter().enumerate() {
                    let (x, y) = position(vertex);
                    if n == 0 {
                        fill.move_to(x, y);
                    } else {
                        fill.line_to(x, y);
                    }
                }
                fill.close();
            }
            if let Some(path) = fill.finish() {
                pixmap.fill_path(&path, &shade, FillRule::Winding, Transform::identity(), None);
            }

            let mut pb = PathBuilder::new();
            for &(from, to) in case_segments(k) {
                let (x0, y0) = midpoint(from);
                let (x1, y1) = midpoint(to);
                pb.move_to(x0, y0);
                pb.line_to(x1, y1);
            }
            if let Some(path) = pb.finish() {
                pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
            }

            // Opaque background, so premultiplied RGB equals straight RGB
            let pixels = pixmap
                .pixels()
                .iter()
                .map(|p| Pixel::new(p.red(), p.green(), p.blue()))
                .collect();
            tiles.push(Bitmap::from_pixels(step_x, step_y, pixels)?);
        }

        Self::from_tiles(tiles)
    }

    /// Write the tiles as `<dir>/<k>.<ext>`, creating `dir` if needed.
    pub fn save(&self, dir: impl AsRef<Path>, ext: &str) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        for (k, tile) in self.tiles.iter().enumerate() {
            io::save_bitmap(tile, dir.join(format!("{}.{}", k, ext)))?;
        }
        Ok(())
    }

    /// Tile dimensions must equal the step size, or stamping would overrun
    /// the grid cell.
    pub fn ensure_matches(&self, config: &MarchConfig) -> Result<()> {
        if (self.tile_width, self.tile_height) != (config.step_x, config.step_y) {
            return Err(ContourError::config(format!(
                "contour tiles are {}x{} but the sampling step is {}x{}",
                self.tile_width, self.tile_height, config.step_x, config.step_y
            )));
        }
        Ok(())
    }

    /// Tile for configuration `k`.
    ///
    /// # Panics
    /// Panics if `k >= 16`.
    #[inline]
    pub fn get(&self, k: usize) -> &Bitmap {
        &self.tiles[k]
    }

    pub fn tile_width(&self) -> usize {
        self.tile_width
    }

    pub fn tile_height(&self) -> usize {
        self.tile_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_segments_cover_crossed_edges() {
        for k in 0..TILE_COUNT {
            let corners = [(k >> 3) & 1, (k >> 2) & 1, (k >> 1) & 1, k & 1];
            let [tl, tr, br, bl] = corners;
            let mut crossed = Vec::new();
            if tl != tr {
                crossed.push(Edge::Top);
            }
            if tr != br {
                crossed.push(Edge::Right);
            }
            if bl != br {
                crossed.push(Edge::Bottom);
            }
            if tl != bl {
                crossed.push(Edge::Left);
            }

            let mut touched: Vec<Edge> = case_segments(k)
                .iter()
                .flat_map(|&(a, b)| [a, b])
                .collect();
            touched.sort_by_key(|e| *e as u8);
            crossed.sort_by_key(|e| *e as u8);
            assert_eq!(touched, crossed, "configuration {}", k);
        }
    }

    #[test]
    fn test_from_tiles_requires_sixteen() {
        let tiles = vec![Bitmap::try_new(2, 2).unwrap(); 15];
        assert!(ContourTileSet::from_tiles(tiles).unwrap_err().is_config());
    }

    #[test]
    fn test_from_tiles_requires_uniform_size() {
        let mut tiles = vec![Bitmap::try_new(2, 2).unwrap(); 16];
        tiles[9] = Bitmap::try_new(3, 2).unwrap();
        let err = ContourTileSet::from_tiles(tiles).unwrap_err();
        assert!(err.to_string().contains("tile 9"));
    }

    #[test]
    fn test_ensure_matches_step() {
        let set = ContourTileSet::from_tiles(vec![Bitmap::try_new(8, 8).unwrap(); 16]).unwrap();
        assert!(set.ensure_matches(&MarchConfig::default()).is_ok());

        let config = MarchConfig {
            step_x: 4,
            ..Default::default()
        };
        assert!(set.ensure_matches(&config).unwrap_err().is_config());
    }

    #[test]
    fn test_synthesized_tiles() {
        let set = ContourTileSet::synthesize(8, 8).unwrap();
        assert_eq!((set.tile_width(), set.tile_height()), (8, 8));

        let shade = Pixel::from_channels(INSIDE_SHADE);
        let strokes = |k: usize| -> Vec<bool> {
            set.get(k).pixels().iter().map(|p| *p == Pixel::BLACK).collect()
        };

        // Uniform cells have no contour; the full one is shaded throughout
        assert!(set.get(0).pixels().iter().all(|p| *p == Pixel::WHITE));
        assert!(set.get(15).pixels().iter().all(|p| *p == shade));
        assert_ne!(set.get(0), set.get(15));

        // Every other configuration strokes a contour
        for k in 1..15 {
            assert!(strokes(k).contains(&true), "tile {} has no contour", k);
        }

        // Complementary configurations share a segment but shade opposite sides
        assert_eq!(strokes(3), strokes(12));
        assert_ne!(set.get(3), set.get(12));
        assert_ne!(strokes(3), strokes(6));
    }

    #[test]
    fn test_synthesized_shading_follows_corners() {
        let set = ContourTileSet::synthesize(8, 8).unwrap();
        let shade = Pixel::from_channels(INSIDE_SHADE);

        // k = 3: bottom-left and bottom-right occupied
        assert_eq!(set.get(3).pixel(0, 0), Pixel::WHITE);
        assert_eq!(set.get(3).pixel(0, 7), shade);
        assert_eq!(set.get(3).pixel(7, 7), shade);

        // k = 5 saddle: top-right and bottom-left shaded, others not
        let saddle = set.get(5);
        assert_eq!(saddle.pixel(7, 0), shade);
        assert_eq!(saddle.pixel(0, 7), shade);
        assert_eq!(saddle.pixel(0, 0), Pixel::WHITE);
        assert_eq!(saddle.pixel(7, 7), Pixel::WHITE);
    }

    #[test]
    fn test_occupied_regions() {
        assert!(occupied_regions(0).is_empty());
        assert_eq!(
            occupied_regions(15),
            vec![(0..4).map(Vertex::Corner).collect::<Vec<_>>()]
        );
        assert_eq!(
            occupied_regions(8),
            vec![vec![
                Vertex::Corner(0),
                Vertex::Midpoint(Edge::Top),
                Vertex::Midpoint(Edge::Left)
            ]]
        );
        assert_eq!(occupied_regions(10).len(), 2);
    }

    #[test]
    fn test_synthesize_rejects_zero_size() {
        assert!(ContourTileSet::synthesize(0, 8).is_err());
    }
}
