use super::*;
use crate::foundation::core::{Plane, Point};

fn assert_close(a: Complex64, b: Complex64, tol: f64) {
    assert!((a - b).norm() <= tol, "{a} != {b} (tol {tol})");
}

fn unit_circle(samples: usize) -> Vec<Complex64> {
    (0..samples)
        .map(|p| Complex64::from_polar(1.0, TAU * p as f64 / samples as f64))
        .collect()
}

fn square_outline(side: u32) -> (Plane, Vec<Point>) {
    let plane = Plane::new(side + 20, side + 20).unwrap();
    let (x0, y0) = (10, 10);
    let mut pts = Vec::new();
    for i in 0..side {
        pts.push(Point::new(x0 + i, y0));
    }
    for i in 0..side {
        pts.push(Point::new(x0 + side, y0 + i));
    }
    for i in 0..side {
        pts.push(Point::new(x0 + side - i, y0 + side));
    }
    for i in 0..side {
        pts.push(Point::new(x0, y0 + side - i));
    }
    (plane, pts)
}

fn rms_error(coeffs: &Coefficients, samples: &[Complex64]) -> f64 {
    let dt = TAU / samples.len() as f64;
    let sum: f64 = samples
        .iter()
        .enumerate()
        .map(|(p, &f)| (coeffs.reconstruct(p as f64 * dt) - f).norm_sqr())
        .sum();
    (sum / samples.len() as f64).sqrt()
}

#[test]
fn interleaved_frequency_mapping() {
    let expected = [0, 1, -1, 2, -2, 3, -3];
    for (i, &n) in expected.iter().enumerate() {
        assert_eq!(frequency_of(i), n);
        assert_eq!(index_of(n), Some(i));
    }
}

#[test]
fn extreme_frequencies_are_absent() {
    let coeffs = analyze_samples(&unit_circle(16), 2);
    assert_eq!(coeffs.get(i64::MIN), None);
    assert_eq!(coeffs.get(i64::MAX), None);
    assert_eq!(coeffs.get(3), None);
    assert_eq!(index_of(i64::MIN), None);
}

#[test]
fn zero_length_path_gives_empty_set() {
    let plane = Plane::new(8, 8).unwrap();
    let coeffs = analyze(&Path::empty(plane), 10);
    assert!(coeffs.is_empty());
    assert_eq!(coeffs.accuracy(), 10);
    assert_eq!(coeffs.reconstruct(1.0), Complex64::new(0.0, 0.0));
}

#[test]
fn accuracy_zero_keeps_only_the_mean() {
    let plane = Plane::new(8, 8).unwrap();
    let path = Path::from_points(plane, [Point::new(1, 1), Point::new(5, 3)]).unwrap();
    assert_eq!(analyze(&path, 0).len(), 1);
}

#[test]
fn c0_is_mean_of_center_offsets() {
    let plane = Plane::new(40, 30).unwrap();
    let pts = [
        Point::new(3, 7),
        Point::new(30, 2),
        Point::new(22, 25),
        Point::new(9, 19),
        Point::new(14, 14),
    ];
    let path = Path::from_points(plane, pts).unwrap();
    let coeffs = analyze(&path, 3);

    let mut mean = Complex64::new(0.0, 0.0);
    for p in pts {
        let v = plane.to_centered(p);
        mean += Complex64::new(v.x, v.y);
    }
    mean /= pts.len() as f64;

    assert_close(coeffs.get(0).unwrap(), mean, 1e-9);
    assert_close(fourier_coefficient(&path, 0), mean, 1e-9);
}

#[test]
fn unit_circle_is_a_single_frequency() {
    let samples = unit_circle(360);
    let coeffs = analyze_samples(&samples, 1);
    assert_eq!(coeffs.len(), 3);
    assert_close(coeffs.get(1).unwrap(), Complex64::new(1.0, 0.0), 1e-9);
    assert_close(coeffs.get(0).unwrap(), Complex64::new(0.0, 0.0), 1e-9);
    assert_close(coeffs.get(-1).unwrap(), Complex64::new(0.0, 0.0), 1e-9);
    assert!(rms_error(&coeffs, &samples) < 1e-9);
}

#[test]
fn reconstruction_error_shrinks_with_accuracy() {
    let (plane, pts) = square_outline(50);
    let path = Path::from_points(plane, pts).unwrap();
    let samples: Vec<Complex64> = path
        .points()
        .map(|p| {
            let v = plane.to_centered(p);
            Complex64::new(v.x, v.y)
        })
        .collect();

    let mut last = f64::INFINITY;
    let mut first = None;
    for accuracy in [1, 2, 5, 10, 25, 50] {
        let err = rms_error(&analyze(&path, accuracy), &samples);
        assert!(err <= last + 1e-9, "accuracy {accuracy}: {err} > {last}");
        first.get_or_insert(err);
        last = err;
    }
    assert!(last < first.unwrap() / 4.0);
}

#[test]
fn unit_square_scenario() {
    let plane = Plane::new(2, 2).unwrap();
    let path = Path::from_points(
        plane,
        [
            Point::new(0, 0),
            Point::new(1, 0),
            Point::new(1, 1),
            Point::new(0, 1),
        ],
    )
    .unwrap();
    let coeffs = analyze(&path, 2);
    assert_eq!(coeffs.len(), 5);
    assert_eq!(
        coeffs.iter().map(|(n, _)| n).collect::<Vec<_>>(),
        vec![0, 1, -1, 2, -2]
    );
    // Sample 0 sits at (-1, +1) relative to the center of a 2x2 plane.
    assert_close(coeffs.reconstruct(0.0), Complex64::new(-1.0, 1.0), 1e-12);
}

#[test]
fn interleaved_length_is_checked() {
    assert!(Coefficients::from_interleaved(2, vec![Complex64::new(0.0, 0.0); 5]).is_ok());
    assert!(Coefficients::from_interleaved(2, vec![Complex64::new(0.0, 0.0); 4]).is_err());
    assert!(Coefficients::from_interleaved(2, vec![]).is_ok());
}

#[test]
fn json_keeps_frequencies_explicit() {
    let coeffs = analyze_samples(&unit_circle(16), 1);
    let json = serde_json::to_value(&coeffs).unwrap();
    assert_eq!(json["accuracy"], 1);
    assert_eq!(json["terms"][1]["n"], 1);
    assert_eq!(json["terms"][2]["n"], -1);

    let back: Coefficients = serde_json::from_value(json).unwrap();
    assert_eq!(back.len(), coeffs.len());
    for ((n_a, a), (n_b, b)) in back.iter().zip(coeffs.iter()) {
        assert_eq!(n_a, n_b);
        assert_close(a, b, 1e-12);
    }

    let bad = r#"{ "accuracy": 1, "terms": [
        { "n": 0, "re": 0.0, "im": 0.0 },
        { "n": -1, "re": 0.0, "im": 0.0 },
        { "n": 1, "re": 0.0, "im": 0.0 }
    ] }"#;
    assert!(serde_json::from_str::<Coefficients>(bad).is_err());
}
