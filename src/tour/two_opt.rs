use crate::foundation::core::Point;

/// Minimum gain for a reversal to count; keeps float noise from cycling.
const MIN_GAIN: f64 = 1e-9;

/// Refine a closed tour in place by reversing segments that remove edge crossings.
///
/// A reversal is applied only when it strictly shortens the closed tour, so the tour length never
/// grows. The first point stays first. Stops after a pass without improvement or after
/// `max_passes` passes. Returns the number of reversals applied.
pub fn two_opt(points: &mut [Point], max_passes: u32) -> usize {
    let n = points.len();
    if n < 4 {
        return 0;
    }

    let mut applied = 0;
    for _ in 0..max_passes {
        let mut improved = false;
        for i in 0..n - 2 {
            for j in i + 2..n {
                if i == 0 && j == n - 1 {
                    // (p[n-1], p[0]) and (p[0], p[1]) share a vertex.
                    continue;
                }
                let a = points[i];
                let b = points[i + 1];
                let c = points[j];
                let d = points[(j + 1) % n];
                let gain = a.dist(b) + c.dist(d) - a.dist(c) - b.dist(d);
                if gain > MIN_GAIN {
                    points[i + 1..=j].reverse();
                    applied += 1;
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
    }
    applied
}

#[cfg(test)]
#[path = "../../tests/unit/tour/two_opt.rs"]
mod tests;
