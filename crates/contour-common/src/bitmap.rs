//! Row-major RGB bitmap.

use crate::error::{ContourError, Result};
use crate::pixel::Pixel;

/// Allocate a vector of `len` copies of `value`, reporting allocation
/// failure as an error instead of aborting.
pub fn try_filled_vec<T: Clone>(what: &'static str, len: usize, value: T) -> Result<Vec<T>> {
    let mut data = Vec::new();
    data.try_reserve_exact(len)
        .map_err(|_| ContourError::allocation(what, len))?;
    data.resize(len, value);
    Ok(data)
}

/// A bitmap of `width * height` pixels stored row by row.
///
/// Pixel `(x, y)` lives at index `y * width + x`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Bitmap {
    /// Allocate a black bitmap.
    pub fn try_new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, Pixel::BLACK)
    }

    /// Allocate a bitmap with every pixel set to `pixel`.
    pub fn filled(width: usize, height: usize, pixel: Pixel) -> Result<Self> {
        let len = checked_len(width, height)?;
        let pixels = try_filled_vec("bitmap pixels", len, pixel)?;
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Wrap an existing pixel buffer. The buffer length must be `width * height`.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self> {
        let len = checked_len(width, height)?;
        if pixels.len() != len {
            return Err(ContourError::InvalidBitmap(format!(
                "expected {} pixels for {}x{}, got {}",
                len,
                width,
                height,
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Build a bitmap from packed RGB bytes (3 bytes per pixel).
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        let len = checked_len(width, height)?;
        if bytes.len() != len * 3 {
            return Err(ContourError::InvalidBitmap(format!(
                "expected {} RGB bytes for {}x{}, got {}",
                len * 3,
                width,
                height,
                bytes.len()
            )));
        }
        let mut pixels = Vec::new();
        pixels
            .try_reserve_exact(len)
            .map_err(|_| ContourError::allocation("bitmap pixels", len))?;
        pixels.extend(
            bytes
                .chunks_exact(3)
                .map(|c| Pixel::new(c[0], c[1], c[2])),
        );
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Packed RGB bytes, row by row.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * 3);
        for pixel in &self.pixels {
            bytes.extend_from_slice(&pixel.channels());
        }
        bytes
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Fail with [`ContourError::InvalidBitmap`] if the bitmap has no pixels.
    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.is_empty() {
            return Err(ContourError::InvalidBitmap(format!(
                "bitmap is {}x{}",
                self.width, self.height
            )));
        }
        Ok(())
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    /// Panics if the coordinates are out of bounds.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Pixel {
        debug_assert!(x < self.width && y < self.height);
        self.pixels[y * self.width + x]
    }

    /// Pixel with coordinates clamped into the bitmap (edge replication).
    #[inline]
    pub fn pixel_clamped(&self, x: i64, y: i64) -> Pixel {
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        self.pixels[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) {
        let idx = y * self.width + x;
        self.pixels[idx] = pixel;
    }

    /// One row of pixels.
    pub fn row(&self, y: usize) -> &[Pixel] {
        let start = y * self.width;
        &self.pixels[start..start + self.width]
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize> {
    width.checked_mul(height).ok_or_else(|| {
        ContourError::InvalidBitmap(format!("dimensions {}x{} overflow", width, height))
    })
}
