use super::*;
use crate::fourier::analyzer::analyze_samples;
use num_complex::Complex64;

fn circle_coeffs(radius: f64) -> Arc<Coefficients> {
    let samples: Vec<Complex64> = (0..90)
        .map(|p| Complex64::from_polar(radius, TAU * p as f64 / 90.0))
        .collect();
    Arc::new(analyze_samples(&samples, 2))
}

fn driver(speed: f64, clear_on_wrap: bool) -> AnimationDriver {
    AnimationDriver::new(
        circle_coeffs(50.0),
        AnimationOpts {
            rotation_speed: speed,
            clear_on_wrap,
        },
    )
    .unwrap()
}

#[test]
fn starts_at_phase_zero_with_seeded_trace() {
    let d = driver(0.1, false);
    assert_eq!(d.phase(), 0.0);
    assert_eq!(d.trace().len(), 1);
    assert_eq!(d.trace()[0], Evaluator::trace_point(d.coefficients(), 0.0));
    assert_eq!(d.state().ticks(), FrameIndex(0));
}

#[test]
fn each_tick_plots_then_steps_phase() {
    let mut d = driver(0.1, false);
    let first = d.tick();
    assert_eq!(first.frame, FrameIndex(0));
    assert_eq!(first.t, 0.0);
    assert!(!first.wrapped);
    // The seed already holds the phase-zero point.
    assert_eq!(d.trace().len(), 1);

    let second = d.tick();
    assert_eq!(second.frame, FrameIndex(1));
    assert!((second.t - 0.1).abs() < 1e-12);
    assert_eq!(d.trace().len(), 2);
    assert_eq!(d.trace()[1], second.point);
    assert!((d.phase() - 0.2).abs() < 1e-12);
}

#[test]
fn phase_wraps_within_a_period_of_ticks() {
    for speed in [0.01, 0.05, 0.3, 1.0] {
        let mut d = driver(speed, false);
        let ticks = (TAU / speed).ceil() as u64;
        let mut wrapped = false;
        for _ in 0..ticks {
            wrapped |= d.tick().wrapped;
        }
        assert!(wrapped, "speed {speed} did not wrap in {ticks} ticks");
        assert_eq!(d.state().wraps(), 1);
        assert!(d.phase() < TAU);
    }
}

#[test]
fn speeds_dividing_a_full_turn_wrap_on_schedule() {
    for k in [100u64, 360, 628, 1000] {
        let mut d = driver(TAU / k as f64, false);
        let mut wrapped_at = None;
        for i in 1..=k {
            if d.tick().wrapped {
                wrapped_at = Some(i);
                break;
            }
        }
        assert_eq!(wrapped_at, Some(k), "speed 2pi/{k}");
        assert_eq!(d.phase(), 0.0);
    }
}

#[test]
fn trace_stops_growing_after_the_first_revolution() {
    let mut d = driver(0.05, false);
    let per_rev = (TAU / 0.05).ceil() as u64;
    for _ in 0..per_rev {
        d.tick();
    }
    assert_eq!(d.state().wraps(), 1);
    assert!(d.state().is_closed());
    let len = d.trace().len();
    assert_eq!(d.trace().first(), d.trace().last());

    for _ in 0..9 * per_rev {
        d.tick();
    }
    assert_eq!(d.state().wraps(), 10);
    assert_eq!(d.trace().len(), len);
}

#[test]
fn clear_on_wrap_restarts_the_trace() {
    let mut d = driver(0.5, true);
    let mut outcome = d.tick();
    while !outcome.wrapped {
        outcome = d.tick();
    }
    assert_eq!(d.phase(), 0.0);
    assert_eq!(d.trace().len(), 1);

    let mut keep = driver(0.5, false);
    let mut outcome = keep.tick();
    while !outcome.wrapped {
        outcome = keep.tick();
    }
    assert!(keep.trace().len() > 10);
}

#[test]
fn traced_points_follow_the_circle() {
    let mut d = driver(0.2, false);
    for _ in 0..20 {
        let out = d.tick();
        assert!((out.point.hypot() - 50.0).abs() < 1e-6);
    }
}

#[test]
fn tick_frame_matches_tick() {
    let mut a = driver(0.3, false);
    let mut b = driver(0.3, false);
    for _ in 0..5 {
        let (frame, out_a) = a.tick_frame();
        let out_b = b.tick();
        assert_eq!(out_a, out_b);
        assert_eq!(frame.tip, out_a.point);
    }
    assert_eq!(a.trace(), b.trace());
}

#[test]
fn trace_path_is_a_polyline() {
    let mut d = driver(0.4, false);
    for _ in 0..6 {
        d.tick();
    }
    let path = d.trace_path();
    assert_eq!(path.elements().len(), d.trace().len());
}

#[test]
fn reset_returns_to_seed() {
    let mut d = driver(0.4, false);
    for _ in 0..6 {
        d.tick();
    }
    d.reset();
    assert_eq!(d.phase(), 0.0);
    assert_eq!(d.trace().len(), 1);
    assert_eq!(d.state().wraps(), 0);
}

#[test]
fn rejects_non_positive_speed() {
    for speed in [0.0, -0.1, f64::NAN, f64::INFINITY] {
        let res = AnimationDriver::new(
            circle_coeffs(1.0),
            AnimationOpts {
                rotation_speed: speed,
                clear_on_wrap: false,
            },
        );
        assert!(res.is_err());
    }
}

#[test]
fn empty_coefficients_animate_at_origin() {
    let mut d = AnimationDriver::new(Arc::new(Coefficients::empty(3)), AnimationOpts::default())
        .unwrap();
    assert_eq!(d.tick().point, Vec2::ZERO);
    assert_eq!(d.trace(), &[Vec2::ZERO]);
}
