//! Test data generators for creating synthetic bitmaps and tile sets.
//!
//! These generators create predictable, verifiable patterns that can be used
//! across the test suite. All of them are deterministic.

use contour_common::{Bitmap, Pixel, TILE_COUNT};

/// A bitmap with every pixel set to `pixel`.
pub fn solid_bitmap(width: usize, height: usize, pixel: Pixel) -> Bitmap {
    Bitmap::filled(width, height, pixel).expect("test bitmap allocation")
}

/// A dark disc centred in a white bitmap.
///
/// # Example
///
/// ```
/// use test_utils::disc_bitmap;
/// use contour_common::Pixel;
///
/// let bmp = disc_bitmap(32, 32, 10.0);
/// assert_eq!(bmp.pixel(16, 16), Pixel::BLACK);
/// assert_eq!(bmp.pixel(0, 0), Pixel::WHITE);
/// ```
pub fn disc_bitmap(width: usize, height: usize, radius: f32) -> Bitmap {
    let mut bmp = solid_bitmap(width, height, Pixel::WHITE);
    let cx = width as f32 / 2.0;
    let cy = height as f32 / 2.0;
    for y in 0..height {
        for x in 0..width {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            if dx * dx + dy * dy <= radius * radius {
                bmp.set(x, y, Pixel::BLACK);
            }
        }
    }
    bmp
}

/// Alternating dark and light vertical stripes, `stripe` pixels wide.
pub fn striped_bitmap(width: usize, height: usize, stripe: usize) -> Bitmap {
    let mut bmp = solid_bitmap(width, height, Pixel::WHITE);
    for y in 0..height {
        for x in 0..width {
            if (x / stripe.max(1)) % 2 == 0 {
                bmp.set(x, y, Pixel::gray(40));
            }
        }
    }
    bmp
}

/// Pseudo-random colours from a fixed-seed xorshift generator.
///
/// The same `seed` always yields the same bitmap.
pub fn noise_bitmap(width: usize, height: usize, seed: u64) -> Bitmap {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };

    let mut bmp = solid_bitmap(width, height, Pixel::BLACK);
    for y in 0..height {
        for x in 0..width {
            let v = next();
            bmp.set(x, y, Pixel::new(v as u8, (v >> 8) as u8, (v >> 16) as u8));
        }
    }
    bmp
}

/// The colour used for tile `k` by [`indexed_tiles`].
///
/// Every index maps to a different colour, and none of them is pure white.
pub fn tile_color(k: usize) -> Pixel {
    Pixel::new((k * 15) as u8, (255 - k * 15) as u8, (k * 7 + 3) as u8)
}

/// 16 solid tiles of `width × height`, tile `k` filled with [`tile_color`].
pub fn indexed_tiles(width: usize, height: usize) -> Vec<Bitmap> {
    (0..TILE_COUNT)
        .map(|k| solid_bitmap(width, height, tile_color(k)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_tile_colors_are_distinct() {
        let colors: HashSet<_> = (0..TILE_COUNT).map(tile_color).collect();
        assert_eq!(colors.len(), TILE_COUNT);
        assert!(!colors.contains(&Pixel::WHITE));
    }

    #[test]
    fn test_noise_is_deterministic() {
        assert_eq!(noise_bitmap(8, 8, 42), noise_bitmap(8, 8, 42));
        assert_ne!(noise_bitmap(8, 8, 42), noise_bitmap(8, 8, 43));
    }

    #[test]
    fn test_striped_bitmap() {
        let bmp = striped_bitmap(8, 2, 2);
        assert_eq!(bmp.pixel(0, 0), Pixel::gray(40));
        assert_eq!(bmp.pixel(2, 1), Pixel::WHITE);
        assert_eq!(bmp.pixel(5, 0), Pixel::gray(40));
    }
}
