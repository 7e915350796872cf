//! Discrete line stepping between two pixel positions.
//!
//! The major axis is picked from the slope: shallow lines (`|dy| <= |dx|`) advance one column per
//! step, steep lines one row per step, and the minor coordinate is the rounded offset along the
//! slope. Both endpoints are part of the output.

/// Round half toward positive infinity, so steps are symmetric under translation.
pub(crate) fn round_half_up(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Pixels on the segment from `start` to `end`, both inclusive, in travel order.
///
/// Coordinates are signed so callers can rasterize segments that leave the plane and filter
/// afterwards. A zero-length segment yields a single pixel.
pub fn line_pixels(start: (i64, i64), end: (i64, i64)) -> Vec<(i64, i64)> {
    let (sx, sy) = start;
    let (ex, ey) = end;
    let dx = ex - sx;
    let dy = ey - sy;

    let mut out = Vec::with_capacity((dx.unsigned_abs().max(dy.unsigned_abs()) + 1) as usize);
    out.push(start);

    if dx != 0 && dy.abs() <= dx.abs() {
        let m = dy as f64 / dx as f64;
        let step = dx.signum();
        let mut d = step;
        while d.abs() < dx.abs() {
            out.push((sx + d, sy + round_half_up(d as f64 * m)));
            d += step;
        }
    } else if dy != 0 {
        let inv_m = dx as f64 / dy as f64;
        let step = dy.signum();
        let mut d = step;
        while d.abs() < dy.abs() {
            out.push((sx + round_half_up(d as f64 * inv_m), sy + d));
            d += step;
        }
    }

    if end != start {
        out.push(end);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/capture/raster.rs"]
mod tests;
