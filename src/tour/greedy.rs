use crate::foundation::core::Point;

/// Order `points` by greedy nearest-neighbour, starting from the first point.
///
/// Each step appends the remaining point with the smallest squared distance to the last appended
/// one. Ties go to the point that comes first among the remaining ones, and removal keeps the
/// remaining points in their original relative order, so the result is fully deterministic.
///
/// Runs in `O(n^2)`. Inputs with fewer than two points are returned unchanged.
pub fn nearest_neighbor(mut points: Vec<Point>) -> Vec<Point> {
    if points.len() < 2 {
        return points;
    }

    let mut ordered = Vec::with_capacity(points.len());
    ordered.push(points.remove(0));

    while !points.is_empty() {
        let cur = ordered[ordered.len() - 1];
        let mut nearest = 0;
        let mut best = u64::MAX;
        for (i, &p) in points.iter().enumerate() {
            let d = cur.dist_sq(p);
            if d < best {
                nearest = i;
                best = d;
            }
        }
        ordered.push(points.remove(nearest));
    }
    ordered
}

#[cfg(test)]
#[path = "../../tests/unit/tour/greedy.rs"]
mod tests;
