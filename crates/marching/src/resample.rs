//! Bicubic resampling of RGB bitmaps.

use std::ops::Range;

use contour_common::{Bitmap, Pixel, Result};

/// Sample `source` at normalized coordinates `(u, v)` in `[0, 1]²`.
///
/// The coordinate maps to source position `(u·width − 0.5, v·height − 0.5)`.
/// The 4×4 neighbourhood around it is read with clamped indices (edge
/// replication), interpolated per channel with a Catmull-Rom cubic along x
/// then y, and clamped to `[0, 255]`.
///
/// # Panics
/// Panics if `source` is empty.
pub fn sample_bicubic(source: &Bitmap, u: f32, v: f32) -> Pixel {
    let x = u * source.width() as f32 - 0.5;
    let y = v * source.height() as f32 - 0.5;

    let xi = x.floor();
    let yi = y.floor();
    let xf = x - xi;
    let yf = y - yi;
    let xi = xi as i64;
    let yi = yi as i64;

    // 4x4 neighbourhood, rows then columns
    let mut neighbourhood = [[Pixel::BLACK; 4]; 4];
    for (j, row) in neighbourhood.iter_mut().enumerate() {
        for (i, pixel) in row.iter_mut().enumerate() {
            *pixel = source.pixel_clamped(xi + i as i64 - 1, yi + j as i64 - 1);
        }
    }

    let mut channels = [0u8; 3];
    for (c, out) in channels.iter_mut().enumerate() {
        let mut row_values = [0.0f32; 4];
        for (j, row) in neighbourhood.iter().enumerate() {
            row_values[j] = cubic_1d(
                row[0].channels()[c] as f32,
                row[1].channels()[c] as f32,
                row[2].channels()[c] as f32,
                row[3].channels()[c] as f32,
                xf,
            );
        }
        let value = cubic_1d(row_values[0], row_values[1], row_values[2], row_values[3], yf);
        *out = value.clamp(0.0, 255.0) as u8;
    }

    Pixel::from_channels(channels)
}

/// 1D cubic interpolation using Catmull-Rom spline.
fn cubic_1d(p0: f32, p1: f32, p2: f32, p3: f32, t: f32) -> f32 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = -0.5 * p0 + 1.5 * p1 - 1.5 * p2 + 0.5 * p3;
    let b = p0 - 2.5 * p1 + 2.0 * p2 - 0.5 * p3;
    let c = -0.5 * p0 + 0.5 * p2;
    let d = p1;

    a * t3 + b * t2 + c * t + d
}

/// Fill target rows `rows` of a `target_width × target_height` bitmap.
///
/// `band` holds exactly those rows (`rows.len() * target_width` pixels).
/// Target pixel `(c, r)` is sampled at `u = c / (target_width − 1)`,
/// `v = r / (target_height − 1)`.
pub fn resample_rows(
    source: &Bitmap,
    band: &mut [Pixel],
    rows: Range<usize>,
    target_width: usize,
    target_height: usize,
) {
    debug_assert_eq!(band.len(), rows.len() * target_width);

    let u_den = (target_width.max(2) - 1) as f32;
    let v_den = (target_height.max(2) - 1) as f32;

    for (local, r) in rows.enumerate() {
        let v = r as f32 / v_den;
        let out_row = &mut band[local * target_width..(local + 1) * target_width];
        for (c, out) in out_row.iter_mut().enumerate() {
            let u = c as f32 / u_den;
            *out = sample_bicubic(source, u, v);
        }
    }
}

/// Resample a whole bitmap on the calling thread.
pub fn rescale(source: &Bitmap, target_width: usize, target_height: usize) -> Result<Bitmap> {
    source.ensure_not_empty()?;
    let mut target = Bitmap::try_new(target_width, target_height)?;
    resample_rows(
        source,
        target.pixels_mut(),
        0..target_height,
        target_width,
        target_height,
    );
    Ok(target)
}
