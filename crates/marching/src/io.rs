//! Bitmap loading and saving.
//!
//! The on-disk format follows the file extension: `.ppm` is written as
//! binary P6, `.png` as 8-bit RGB PNG. Any alpha channel in the input is
//! discarded.

use std::path::Path;

use contour_common::{Bitmap, ContourError, Result};
use image::RgbImage;

/// Read a bitmap from `path`.
pub fn load_bitmap(path: impl AsRef<Path>) -> Result<Bitmap> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|e| ContourError::resource(path, e.to_string()))?
        .to_rgb8();

    let (width, height) = image.dimensions();
    Bitmap::from_rgb_bytes(width as usize, height as usize, image.as_raw())
}

/// Write `bitmap` to `path`, overwriting any existing file.
pub fn save_bitmap(bitmap: &Bitmap, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let image = to_rgb_image(bitmap)?;
    image
        .save(path)
        .map_err(|e| ContourError::Image(format!("{}: {}", path.display(), e)))
}

/// Convert to an `image` buffer.
pub fn to_rgb_image(bitmap: &Bitmap) -> Result<RgbImage> {
    let width = u32::try_from(bitmap.width())
        .map_err(|_| ContourError::InvalidBitmap(format!("width {} too large", bitmap.width())))?;
    let height = u32::try_from(bitmap.height()).map_err(|_| {
        ContourError::InvalidBitmap(format!("height {} too large", bitmap.height()))
    })?;

    RgbImage::from_raw(width, height, bitmap.to_rgb_bytes())
        .ok_or_else(|| ContourError::InvalidBitmap("pixel buffer size mismatch".to_string()))
}
