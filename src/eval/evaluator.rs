use crate::foundation::core::Vec2;
use crate::fourier::analyzer::{Coefficients, frequency_of};
use num_complex::Complex64;

/// One rotating vector of the chain, positioned for a specific phase.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct Epicycle {
    /// Signed rotation frequency `n`.
    pub frequency: i64,
    /// Circle center: the sum of every vector before this one.
    pub center: Vec2,
    /// `c(n) * e^{i n t}`, from the center to the point on the circle.
    pub vector: Vec2,
    /// Circle radius, `|c(n)|`.
    pub radius: f64,
}

impl Epicycle {
    /// Angular position of the vector, in radians.
    pub fn angle(&self) -> f64 {
        self.vector.atan2()
    }

    /// End of the vector, which is the center of the next epicycle.
    pub fn tip(&self) -> Vec2 {
        self.center + self.vector
    }
}

/// Geometry of the whole epicycle chain at phase `t`.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EpicycleFrame {
    /// Phase the frame was evaluated at.
    pub t: f64,
    /// Chain anchor, `c(0)`.
    pub anchor: Vec2,
    /// Epicycles in coefficient order, excluding the constant term.
    pub epicycles: Vec<Epicycle>,
    /// Traced point: the end of the last vector.
    pub tip: Vec2,
}

/// Stateless evaluator from coefficients and phase to epicycle geometry.
///
/// Both entry points are pure; identical inputs produce bit-identical outputs.
pub struct Evaluator;

impl Evaluator {
    /// Evaluate the full chain at phase `t`.
    pub fn eval_frame(coeffs: &Coefficients, t: f64) -> EpicycleFrame {
        let values = coeffs.as_slice();
        let Some(&c0) = values.first() else {
            return EpicycleFrame {
                t,
                anchor: Vec2::ZERO,
                epicycles: Vec::new(),
                tip: Vec2::ZERO,
            };
        };

        let anchor = Vec2::new(c0.re, c0.im);
        let mut pos = anchor;
        let mut epicycles = Vec::with_capacity(values.len() - 1);
        for (cn, &c) in values.iter().enumerate().skip(1) {
            let n = frequency_of(cn);
            let vector = rotate(c, n, t);
            epicycles.push(Epicycle {
                frequency: n,
                center: pos,
                vector,
                radius: vector.hypot(),
            });
            pos += vector;
        }

        EpicycleFrame {
            t,
            anchor,
            epicycles,
            tip: pos,
        }
    }

    /// Traced point at phase `t`, without materializing the chain.
    pub fn trace_point(coeffs: &Coefficients, t: f64) -> Vec2 {
        let values = coeffs.as_slice();
        let Some(&c0) = values.first() else {
            return Vec2::ZERO;
        };

        let mut pos = Vec2::new(c0.re, c0.im);
        for (cn, &c) in values.iter().enumerate().skip(1) {
            pos += rotate(c, frequency_of(cn), t);
        }
        pos
    }
}

/// `c * e^{i n t}` written out component-wise.
fn rotate(c: Complex64, n: i64, t: f64) -> Vec2 {
    let (sin, cos) = (n as f64 * t).sin_cos();
    Vec2::new(c.re * cos - c.im * sin, c.re * sin + c.im * cos)
}

#[cfg(test)]
#[path = "../../tests/unit/eval/evaluator.rs"]
mod tests;
