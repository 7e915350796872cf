use crate::foundation::error::{EpicycleError, EpicycleResult};
use std::time::Duration;

pub use kurbo::{BezPath, Vec2};

/// Tick index of the animation driver, counted from the last commit.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Integer pixel coordinate on a [`Plane`].
///
/// `Point` does not know its plane; [`Plane::point`] and [`Plane::clamp`] are the checked ways to
/// build one that satisfies `x < width` and `y < height`.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Point {
    /// Column, growing to the right.
    pub x: u32,
    /// Row, growing downward (screen orientation).
    pub y: u32,
}

impl Point {
    /// Create a point without bounds checking.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Column accessor.
    pub fn x(self) -> u32 {
        self.x
    }

    /// Row accessor.
    pub fn y(self) -> u32 {
        self.y
    }

    /// Squared Euclidean distance to `other`.
    pub fn dist_sq(self, other: Point) -> u64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        (dx * dx + dy * dy) as u64
    }

    /// Euclidean distance to `other`.
    pub fn dist(self, other: Point) -> f64 {
        (self.dist_sq(other) as f64).sqrt()
    }
}

/// Compact single-integer encoding of a [`Point`]: `x + y * width`.
///
/// Only meaningful together with the [`Plane`] that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PixelIndex(pub u32);

/// Bounded pixel plane that every captured [`Point`] lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Plane {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Plane {
    /// Create a validated plane.
    ///
    /// Both dimensions must be non-zero and every pixel must be addressable by a [`PixelIndex`].
    pub fn new(width: u32, height: u32) -> EpicycleResult<Self> {
        if width == 0 || height == 0 {
            return Err(EpicycleError::validation(
                "plane width/height must be non-zero",
            ));
        }
        if u64::from(width) * u64::from(height) > u64::from(u32::MAX) {
            return Err(EpicycleError::validation(format!(
                "plane {width}x{height} has too many pixels to index"
            )));
        }
        Ok(Self { width, height })
    }

    /// Return `true` when `(x, y)` is inside the plane.
    pub fn contains(self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < i64::from(self.width) && y < i64::from(self.height)
    }

    /// Build a point, rejecting coordinates outside the plane.
    pub fn point(self, x: i64, y: i64) -> EpicycleResult<Point> {
        if !self.contains(x, y) {
            return Err(EpicycleError::out_of_bounds(format!(
                "({x}, {y}) is outside the {}x{} plane",
                self.width, self.height
            )));
        }
        Ok(Point::new(x as u32, y as u32))
    }

    /// Build a point, clamping coordinates onto the plane edge.
    pub fn clamp(self, x: i64, y: i64) -> Point {
        let max_x = i64::from(self.width.saturating_sub(1));
        let max_y = i64::from(self.height.saturating_sub(1));
        Point::new(x.clamp(0, max_x) as u32, y.clamp(0, max_y) as u32)
    }

    /// Encode a point as `x + y * width`.
    pub fn encode(self, p: Point) -> PixelIndex {
        PixelIndex(p.x + p.y * self.width)
    }

    /// Decode an index produced by [`Plane::encode`].
    pub fn decode(self, idx: PixelIndex) -> Point {
        Point::new(idx.0 % self.width, idx.0 / self.width)
    }

    /// Plane center in pixel space.
    pub fn center(self) -> Vec2 {
        Vec2::new(f64::from(self.width) / 2.0, f64::from(self.height) / 2.0)
    }

    /// Offset of `p` from the center with the vertical axis pointing up.
    pub fn to_centered(self, p: Point) -> Vec2 {
        let c = self.center();
        Vec2::new(f64::from(p.x) - c.x, c.y - f64::from(p.y))
    }

    /// Inverse of [`Plane::to_centered`] for arbitrary (non-integer) positions.
    pub fn to_screen(self, v: Vec2) -> kurbo::Point {
        let c = self.center();
        kurbo::Point::new(v.x + c.x, c.y - v.y)
    }

    /// Squared length of the plane diagonal, an upper bound for any [`Point::dist_sq`].
    pub fn diagonal_sq(self) -> u64 {
        let w = u64::from(self.width);
        let h = u64::from(self.height);
        w * w + h * h
    }
}

/// Frames-per-second represented as a rational `num/den`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be non-zero.
    pub den: u32,
}

impl Fps {
    /// Create a validated FPS value.
    pub fn new(num: u32, den: u32) -> EpicycleResult<Self> {
        if den == 0 {
            return Err(EpicycleError::validation("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(EpicycleError::validation("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Convert to floating-point FPS.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }

    /// Duration of one frame in seconds.
    pub fn frame_duration_secs(self) -> f64 {
        f64::from(self.den) / f64::from(self.num)
    }

    /// Duration of one frame.
    pub fn interval(self) -> Duration {
        Duration::from_secs_f64(self.frame_duration_secs())
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 60, den: 1 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
