use crate::capture::raster::{line_pixels, round_half_up};
use crate::foundation::core::{Plane, Point};
use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::path::model::PathBuilder;

/// Turns a pointer stroke (press, moves) into a rasterized [`PathBuilder`].
///
/// Raw samples are rounded to the nearest pixel and clamped onto the plane before rasterizing, so
/// out-of-bounds pointer positions never reach the tour builder. Consecutive segments share their
/// joint pixel only once.
#[derive(Clone, Debug)]
pub struct PathRecorder {
    plane: Plane,
    cursor: Option<Point>,
    path: PathBuilder,
    clamped: u64,
}

impl PathRecorder {
    /// Create an idle recorder for `plane`.
    pub fn new(plane: Plane) -> Self {
        Self {
            plane,
            cursor: None,
            path: PathBuilder::new(plane),
            clamped: 0,
        }
    }

    /// Start a new stroke at `(x, y)`, discarding any previously recorded samples.
    pub fn press(&mut self, x: f64, y: f64) -> EpicycleResult<Point> {
        let p = self.snap(x, y)?;
        self.path = PathBuilder::new(self.plane);
        self.path.push(p)?;
        self.cursor = Some(p);
        Ok(p)
    }

    /// Extend the stroke with a straight segment to `(x, y)`.
    ///
    /// Returns the number of samples appended. Moving before any press behaves like a press.
    pub fn drag(&mut self, x: f64, y: f64) -> EpicycleResult<usize> {
        let Some(from) = self.cursor else {
            self.press(x, y)?;
            return Ok(1);
        };
        let to = self.snap(x, y)?;
        if to == from {
            return Ok(0);
        }

        let before = self.path.len();
        let px = line_pixels(
            (i64::from(from.x), i64::from(from.y)),
            (i64::from(to.x), i64::from(to.y)),
        );
        // Both endpoints are on the plane, so every stepped pixel is too.
        let plane = self.plane;
        self.path
            .extend(px.into_iter().skip(1).map(|(x, y)| plane.clamp(x, y)))?;
        self.cursor = Some(to);
        Ok(self.path.len() - before)
    }

    /// Current pen position.
    pub fn cursor(&self) -> Option<Point> {
        self.cursor
    }

    /// Number of samples recorded so far.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// Return `true` before the first press.
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// How many raw samples had to be clamped onto the plane.
    pub fn clamped_samples(&self) -> u64 {
        self.clamped
    }

    /// Hand the recorded samples over to the tour builder.
    pub fn finish(self) -> PathBuilder {
        self.path
    }

    fn snap(&mut self, x: f64, y: f64) -> EpicycleResult<Point> {
        if !x.is_finite() || !y.is_finite() {
            return Err(EpicycleError::validation(format!(
                "pointer sample ({x}, {y}) must be finite"
            )));
        }
        let (rx, ry) = (round_half_up(x), round_half_up(y));
        if !self.plane.contains(rx, ry) {
            self.clamped += 1;
            tracing::debug!(x = rx, y = ry, "clamping pointer sample onto plane");
        }
        Ok(self.plane.clamp(rx, ry))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/recorder.rs"]
mod tests;
