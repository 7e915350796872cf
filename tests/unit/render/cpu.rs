use super::*;
use crate::eval::evaluator::Epicycle;

fn plane() -> Plane {
    Plane::new(20, 16).unwrap()
}

fn empty_frame() -> EpicycleFrame {
    EpicycleFrame {
        t: 0.0,
        anchor: Vec2::ZERO,
        epicycles: Vec::new(),
        tip: Vec2::ZERO,
    }
}

fn one_circle(radius: f64) -> EpicycleFrame {
    EpicycleFrame {
        t: 0.0,
        anchor: Vec2::ZERO,
        epicycles: vec![Epicycle {
            frequency: 1,
            center: Vec2::ZERO,
            vector: Vec2::new(radius, 0.0),
            radius,
        }],
        tip: Vec2::new(radius, 0.0),
    }
}

#[test]
fn output_matches_plane_size() {
    let mut b = CpuBackend::new(plane(), CpuBackendOpts::default());
    let out = b.render_frame(&empty_frame(), &[]).unwrap();
    assert_eq!((out.width, out.height), (20, 16));
    out.validate().unwrap();
    assert!(out.data.iter().all(|&b| b == 0));
}

#[test]
fn clear_color_fills_background() {
    let opts = CpuBackendOpts::default().with_clear_rgba(Some([1, 2, 3, 255]));
    let mut b = CpuBackend::new(plane(), opts);
    let out = b.render_frame(&empty_frame(), &[]).unwrap();
    assert_eq!(out.pixel(0, 0), Some([1, 2, 3, 255]));
    assert_eq!(out.pixel(19, 15), Some([1, 2, 3, 255]));
}

#[test]
fn trace_is_drawn_as_connected_segments_in_screen_space() {
    let mut b = CpuBackend::new(plane(), CpuBackendOpts::default());
    let trace = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(4.0, 3.0)];
    let out = b.render_frame(&empty_frame(), &trace).unwrap();
    let purple = b.style().trace_rgba;

    // Center (0, 0) maps to (10, 8); y grows up in plane space.
    for x in 10..=14 {
        assert_eq!(out.pixel(x, 8), Some(purple), "x = {x}");
    }
    for y in 5..=8 {
        assert_eq!(out.pixel(14, y), Some(purple), "y = {y}");
    }
    assert_eq!(out.pixel(9, 8), Some([0, 0, 0, 0]));
}

#[test]
fn single_trace_point_is_plotted() {
    let mut b = CpuBackend::new(plane(), CpuBackendOpts::default());
    let out = b.render_frame(&empty_frame(), &[Vec2::new(-2.0, 1.0)]).unwrap();
    assert_eq!(out.pixel(8, 7), Some(b.style().trace_rgba));
}

#[test]
fn circles_and_centers_use_their_colors() {
    let mut b = CpuBackend::new(plane(), CpuBackendOpts::default());
    let out = b.render_frame(&one_circle(3.0), &[]).unwrap();
    let style = b.style();
    assert_eq!(out.pixel(10, 8), Some(style.center_rgba));
    assert_eq!(out.pixel(13, 8), Some(style.circle_rgba));
    assert_eq!(out.pixel(7, 8), Some(style.circle_rgba));
    assert_eq!(out.pixel(10, 5), Some(style.circle_rgba));
    assert_eq!(out.pixel(10, 11), Some(style.circle_rgba));
    assert_eq!(out.pixel(11, 9), Some([0, 0, 0, 0]));
}

#[test]
fn circles_can_be_disabled() {
    let style = RenderStyle {
        draw_circles: false,
        ..RenderStyle::default()
    };
    let mut b = CpuBackend::new(plane(), CpuBackendOpts::default().with_style(style));
    let out = b.render_frame(&one_circle(3.0), &[]).unwrap();
    assert!(out.data.iter().all(|&b| b == 0));
}

#[test]
fn off_plane_geometry_is_clipped() {
    let mut b = CpuBackend::new(plane(), CpuBackendOpts::default());
    let trace = [Vec2::new(-100.0, 0.0), Vec2::new(100.0, 0.0)];
    let out = b.render_frame(&one_circle(50.0), &trace).unwrap();
    out.validate().unwrap();
    for x in (0..20).filter(|&x| x != 10) {
        assert_eq!(out.pixel(x, 8), Some(b.style().trace_rgba), "x = {x}");
    }
    assert_eq!(out.pixel(10, 8), Some(b.style().center_rgba));
}

#[test]
fn rendered_frame_reads_back_as_pixel_source() {
    use crate::capture::extract::extract_centered;

    let mut b = CpuBackend::new(plane(), CpuBackendOpts::default());
    let out = b
        .render_frame(&empty_frame(), &[Vec2::ZERO, Vec2::new(2.0, 0.0)])
        .unwrap();
    let pts = extract_centered(&out, plane()).unwrap().into_points();
    assert_eq!(pts.len(), 3);
    assert_eq!(pts[0], crate::foundation::core::Point::new(10, 8));
}
