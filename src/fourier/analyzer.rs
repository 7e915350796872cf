use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::path::model::Path;
use num_complex::Complex64;
use std::f64::consts::TAU;

/// Signed frequency stored at position `index` of an interleaved coefficient sequence.
///
/// `0 -> 0`, then odd indices are positive and even indices negative: `1 -> +1`, `2 -> -1`,
/// `3 -> +2`, `4 -> -2`, ...
pub fn frequency_of(index: usize) -> i64 {
    let k = index.div_ceil(2) as i64;
    if index % 2 == 1 { k } else { -k }
}

/// Position of frequency `n` in an interleaved coefficient sequence.
///
/// `None` when the position does not fit in `usize`.
pub fn index_of(n: i64) -> Option<usize> {
    let doubled = usize::try_from(n.unsigned_abs()).ok()?.checked_mul(2)?;
    Some(if n > 0 { doubled - 1 } else { doubled })
}

/// Fourier coefficients of one path, ordered `c(0), c(+1), c(-1), c(+2), c(-2), ...`.
///
/// Immutable once computed; a changed path gets a fresh set from [`analyze`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(into = "CoefficientsDef", try_from = "CoefficientsDef")]
pub struct Coefficients {
    accuracy: u32,
    values: Vec<Complex64>,
}

impl Coefficients {
    /// The empty set produced by a zero-length path.
    pub fn empty(accuracy: u32) -> Self {
        Self {
            accuracy,
            values: Vec::new(),
        }
    }

    /// Wrap an interleaved sequence. Its length must be `2 * accuracy + 1` (or zero).
    pub fn from_interleaved(accuracy: u32, values: Vec<Complex64>) -> EpicycleResult<Self> {
        let expected = 2 * accuracy as usize + 1;
        if !values.is_empty() && values.len() != expected {
            return Err(EpicycleError::validation(format!(
                "accuracy {accuracy} needs {expected} coefficients, got {}",
                values.len()
            )));
        }
        Ok(Self { accuracy, values })
    }

    /// Largest `|n|` the set was computed for.
    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    /// Number of coefficients.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Return `true` for the set of a zero-length path.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Coefficients in interleaved order.
    pub fn as_slice(&self) -> &[Complex64] {
        &self.values
    }

    /// Coefficient for frequency `n`, if it was computed.
    pub fn get(&self, n: i64) -> Option<Complex64> {
        self.values.get(index_of(n)?).copied()
    }

    /// Iterate `(n, c(n))` in interleaved order.
    pub fn iter(&self) -> impl Iterator<Item = (i64, Complex64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(|(i, &c)| (frequency_of(i), c))
    }

    /// Evaluate the truncated series `sum c(n) e^{i n t}` at phase `t`.
    pub fn reconstruct(&self, t: f64) -> Complex64 {
        self.iter()
            .map(|(n, c)| c * Complex64::from_polar(1.0, n as f64 * t))
            .sum()
    }
}

/// Fourier coefficient `c(n)` of `path`, by a left-endpoint Riemann sum over one period.
///
/// Samples are taken as uniformly spaced in `t` over `[0, 2pi)` and measured from the plane
/// center with the vertical axis pointing up.
pub fn fourier_coefficient(path: &Path, n: i64) -> Complex64 {
    let samples = centered_samples(path);
    coefficient_of(&samples, n)
}

/// Compute `c(n)` for every `n` in `-accuracy..=accuracy`, interleaved.
///
/// `O(len * accuracy)`. A zero-length path yields an empty set.
#[tracing::instrument(skip(path), fields(samples = path.len()))]
pub fn analyze(path: &Path, accuracy: u32) -> Coefficients {
    analyze_samples(&centered_samples(path), accuracy)
}

/// [`analyze`] over an arbitrary periodic signal, one complex sample per step of `2pi / len`.
pub fn analyze_samples(samples: &[Complex64], accuracy: u32) -> Coefficients {
    if samples.is_empty() {
        return Coefficients::empty(accuracy);
    }

    let mut values = Vec::with_capacity(2 * accuracy as usize + 1);
    values.push(coefficient_of(samples, 0));
    for k in 1..=i64::from(accuracy) {
        values.push(coefficient_of(samples, k));
        values.push(coefficient_of(samples, -k));
    }
    tracing::debug!(coefficients = values.len(), "computed fourier coefficients");
    Coefficients { accuracy, values }
}

fn centered_samples(path: &Path) -> Vec<Complex64> {
    let plane = path.plane();
    path.points()
        .map(|p| {
            let v = plane.to_centered(p);
            Complex64::new(v.x, v.y)
        })
        .collect()
}

fn coefficient_of(samples: &[Complex64], n: i64) -> Complex64 {
    if samples.is_empty() {
        return Complex64::new(0.0, 0.0);
    }
    let dt = TAU / samples.len() as f64;
    let mut re = 0.0;
    let mut im = 0.0;
    for (p, f) in samples.iter().enumerate() {
        let angle = -(n as f64) * (p as f64 * dt);
        let (sin, cos) = angle.sin_cos();
        re += (f.re * cos - f.im * sin) * dt;
        im += (f.re * sin + f.im * cos) * dt;
    }
    Complex64::new(re / TAU, im / TAU)
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct CoefficientsDef {
    accuracy: u32,
    terms: Vec<TermDef>,
}

#[derive(serde::Serialize, serde::Deserialize)]
#[serde(deny_unknown_fields)]
struct TermDef {
    n: i64,
    re: f64,
    im: f64,
}

impl From<Coefficients> for CoefficientsDef {
    fn from(c: Coefficients) -> Self {
        Self {
            accuracy: c.accuracy,
            terms: c
                .iter()
                .map(|(n, v)| TermDef {
                    n,
                    re: v.re,
                    im: v.im,
                })
                .collect(),
        }
    }
}

impl TryFrom<CoefficientsDef> for Coefficients {
    type Error = EpicycleError;

    fn try_from(def: CoefficientsDef) -> Result<Self, Self::Error> {
        for (i, term) in def.terms.iter().enumerate() {
            if term.n != frequency_of(i) {
                return Err(EpicycleError::serde(format!(
                    "term {i} has frequency {}, expected {}",
                    term.n,
                    frequency_of(i)
                )));
            }
        }
        let values = def
            .terms
            .into_iter()
            .map(|t| Complex64::new(t.re, t.im))
            .collect();
        Self::from_interleaved(def.accuracy, values)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fourier/analyzer.rs"]
mod tests;
