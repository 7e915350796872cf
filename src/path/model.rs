use crate::foundation::core::{PixelIndex, Plane, Point};
use crate::foundation::error::EpicycleResult;
use std::sync::Arc;

/// Growable path used while samples are still being captured or ordered.
///
/// Samples are stored as [`PixelIndex`] values; callers only ever see [`Point`]s.
#[derive(Clone, Debug)]
pub struct PathBuilder {
    plane: Plane,
    samples: Vec<PixelIndex>,
}

impl PathBuilder {
    /// Create an empty builder on `plane`.
    pub fn new(plane: Plane) -> Self {
        Self {
            plane,
            samples: Vec::new(),
        }
    }

    /// Build from points that are already known to lie on `plane`.
    pub fn from_points(
        plane: Plane,
        points: impl IntoIterator<Item = Point>,
    ) -> EpicycleResult<Self> {
        let mut b = Self::new(plane);
        b.extend(points)?;
        Ok(b)
    }

    /// Append one sample, rejecting points outside the plane.
    pub fn push(&mut self, p: Point) -> EpicycleResult<()> {
        let p = self.plane.point(i64::from(p.x), i64::from(p.y))?;
        self.samples.push(self.plane.encode(p));
        Ok(())
    }

    /// Append every point from `points`; stops at the first out-of-bounds point.
    pub fn extend(&mut self, points: impl IntoIterator<Item = Point>) -> EpicycleResult<()> {
        for p in points {
            self.push(p)?;
        }
        Ok(())
    }

    /// Plane the samples live on.
    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Return `true` when no sample has been captured.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Last captured sample.
    pub fn last(&self) -> Option<Point> {
        self.samples.last().map(|&idx| self.plane.decode(idx))
    }

    /// Iterate samples in insertion order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.samples.iter().map(|&idx| self.plane.decode(idx))
    }

    /// Decode all samples, giving up the builder.
    pub fn into_points(self) -> Vec<Point> {
        let plane = self.plane;
        self.samples.into_iter().map(|idx| plane.decode(idx)).collect()
    }

    /// Freeze the samples into an immutable [`Path`] without reordering them.
    pub fn freeze(self) -> Path {
        Path {
            plane: self.plane,
            samples: self.samples.into(),
        }
    }
}

/// Ordered, immutable sample sequence handed to the Fourier analyzer.
///
/// Cloning is cheap; the samples are shared.
#[derive(Clone, Debug)]
pub struct Path {
    plane: Plane,
    samples: Arc<[PixelIndex]>,
}

impl Path {
    /// Empty path on `plane`.
    pub fn empty(plane: Plane) -> Self {
        PathBuilder::new(plane).freeze()
    }

    /// Build a frozen path from ordered points.
    pub fn from_points(
        plane: Plane,
        points: impl IntoIterator<Item = Point>,
    ) -> EpicycleResult<Self> {
        Ok(PathBuilder::from_points(plane, points)?.freeze())
    }

    /// Plane the samples live on.
    pub fn plane(&self) -> Plane {
        self.plane
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Return `true` for the degenerate zero-length path.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at position `i`.
    pub fn get(&self, i: usize) -> Option<Point> {
        self.samples.get(i).map(|&idx| self.plane.decode(idx))
    }

    /// First sample, the start of the traversal.
    pub fn first(&self) -> Option<Point> {
        self.get(0)
    }

    /// Iterate samples in traversal order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.samples.iter().map(|&idx| self.plane.decode(idx))
    }

    /// Length of the closed polyline through all samples, including the last → first edge.
    pub fn closed_length(&self) -> f64 {
        let points: Vec<Point> = self.points().collect();
        closed_tour_length(&points)
    }
}

/// Sum of consecutive Euclidean distances, closing the loop from the last point to the first.
pub fn closed_tour_length(points: &[Point]) -> f64 {
    if points.len() < 2 {
        return 0.0;
    }
    let open: f64 = points.windows(2).map(|w| w[0].dist(w[1])).sum();
    open + points[points.len() - 1].dist(points[0])
}

#[cfg(test)]
#[path = "../../tests/unit/path/model.rs"]
mod tests;
