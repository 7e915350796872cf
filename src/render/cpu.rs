use crate::capture::raster::line_pixels;
use crate::eval::evaluator::EpicycleFrame;
use crate::foundation::core::{Plane, Vec2};
use crate::foundation::error::EpicycleResult;
use crate::render::backend::{FrameRGBA, RenderBackend, RenderStyle};

/// Options for the CPU rasterizer.
#[derive(Debug, Clone, Copy, Default)]
pub struct CpuBackendOpts {
    pub(crate) style: RenderStyle,
}

impl CpuBackendOpts {
    /// Return options with a configured clear color for the output frame.
    pub fn with_clear_rgba(mut self, clear: Option<[u8; 4]>) -> Self {
        self.style.clear_rgba = clear;
        self
    }

    /// Return options with a full drawing style.
    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }
}

/// Pixel-exact rasterizer: one-pixel lines, midpoint circle outlines, no anti-aliasing.
pub struct CpuBackend {
    plane: Plane,
    style: RenderStyle,
}

impl CpuBackend {
    /// Create a backend drawing onto frames the size of `plane`.
    pub fn new(plane: Plane, opts: CpuBackendOpts) -> Self {
        Self {
            plane,
            style: opts.style,
        }
    }

    /// Drawing style in use.
    pub fn style(&self) -> RenderStyle {
        self.style
    }

    fn screen(&self, v: Vec2) -> (i64, i64) {
        let p = self.plane.to_screen(v);
        (round_px(p.x), round_px(p.y))
    }

    fn draw_trace(&self, out: &mut FrameRGBA, trace: &[Vec2]) {
        let rgba = self.style.trace_rgba;
        match trace {
            [] => {}
            [only] => {
                let (x, y) = self.screen(*only);
                out.put(x, y, rgba);
            }
            _ => {
                for w in trace.windows(2) {
                    for (x, y) in line_pixels(self.screen(w[0]), self.screen(w[1])) {
                        out.put(x, y, rgba);
                    }
                }
            }
        }
    }

    fn draw_chain(&self, out: &mut FrameRGBA, frame: &EpicycleFrame) {
        for e in &frame.epicycles {
            let (cx, cy) = self.screen(e.center);
            out.put(cx, cy, self.style.center_rgba);
            draw_circle(out, (cx, cy), round_px(e.radius), self.style.circle_rgba);
        }
    }
}

impl RenderBackend for CpuBackend {
    fn render_frame(&mut self, frame: &EpicycleFrame, trace: &[Vec2]) -> EpicycleResult<FrameRGBA> {
        let mut out = match self.style.clear_rgba {
            Some(rgba) => FrameRGBA::filled(self.plane.width, self.plane.height, rgba),
            None => FrameRGBA::new(self.plane.width, self.plane.height),
        };
        self.draw_trace(&mut out, trace);
        if self.style.draw_circles {
            self.draw_chain(&mut out, frame);
        }
        Ok(out)
    }
}

fn round_px(v: f64) -> i64 {
    (v + 0.5).floor() as i64
}

/// Midpoint circle outline; off-frame pixels are dropped by [`FrameRGBA::put`].
fn draw_circle(out: &mut FrameRGBA, (cx, cy): (i64, i64), r: i64, rgba: [u8; 4]) {
    if r <= 0 {
        return;
    }
    let mut x = r;
    let mut y = 0;
    let mut err = 1 - r;
    while x >= y {
        for (dx, dy) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            out.put(cx + dx, cy + dy, rgba);
        }
        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
