use crate::eval::evaluator::{EpicycleFrame, Evaluator};
use crate::foundation::core::{BezPath, FrameIndex, Vec2};
use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::fourier::analyzer::Coefficients;
use std::f64::consts::TAU;
use std::sync::Arc;

/// Slack on the `2pi` wrap test, so speeds that divide `2pi` exactly wrap on schedule.
const WRAP_EPSILON: f64 = 1e-9;

/// Playback options for [`AnimationDriver`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationOpts {
    /// Phase increment per tick, in radians.
    pub rotation_speed: f64,
    /// Drop the accumulated trace each time the phase wraps past `2pi`.
    pub clear_on_wrap: bool,
}

impl Default for AnimationOpts {
    fn default() -> Self {
        Self {
            rotation_speed: 0.01,
            clear_on_wrap: false,
        }
    }
}

/// Mutable playback state: phase, counters and the traced output curve.
///
/// Trace points are in plane-centered coordinates (y up).
#[derive(Clone, Debug, Default)]
pub struct AnimationState {
    t: f64,
    cycle_ticks: u64,
    ticks: u64,
    wraps: u64,
    trace: Vec<Vec2>,
    closed: bool,
}

impl AnimationState {
    /// Current phase in `[0, 2pi]`.
    pub fn phase(&self) -> f64 {
        self.t
    }

    /// Ticks since the state was created.
    pub fn ticks(&self) -> FrameIndex {
        FrameIndex(self.ticks)
    }

    /// How many times the phase wrapped back to zero.
    pub fn wraps(&self) -> u64 {
        self.wraps
    }

    /// Traced points; consecutive points are joined by straight segments.
    pub fn trace(&self) -> &[Vec2] {
        &self.trace
    }

    /// `true` once a full revolution has been traced and the curve is closed.
    ///
    /// Later revolutions retrace the same points, so nothing more is appended.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn plot(&mut self, p: Vec2) {
        if !self.closed && self.trace.last() != Some(&p) {
            self.trace.push(p);
        }
    }

    fn close(&mut self) {
        if let Some(&first) = self.trace.first() {
            self.plot(first);
        }
        self.closed = true;
    }
}

/// What a single [`AnimationDriver::tick`] did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickOutcome {
    /// Tick that was just executed.
    pub frame: FrameIndex,
    /// Phase the point was evaluated at.
    pub t: f64,
    /// Point appended to the trace.
    pub point: Vec2,
    /// `true` when the phase wrapped to zero after this tick.
    pub wrapped: bool,
}

/// Owns the phase and the trace, and advances both one fixed step per tick.
pub struct AnimationDriver {
    coeffs: Arc<Coefficients>,
    opts: AnimationOpts,
    state: AnimationState,
}

impl AnimationDriver {
    /// Start playback at phase zero with the trace seeded by the phase-zero point.
    pub fn new(coeffs: Arc<Coefficients>, opts: AnimationOpts) -> EpicycleResult<Self> {
        if !opts.rotation_speed.is_finite() || opts.rotation_speed <= 0.0 {
            return Err(EpicycleError::validation(format!(
                "rotation_speed must be a positive finite number, got {}",
                opts.rotation_speed
            )));
        }
        let mut driver = Self {
            coeffs,
            opts,
            state: AnimationState::default(),
        };
        driver.seed();
        Ok(driver)
    }

    /// Coefficients being played back.
    pub fn coefficients(&self) -> &Arc<Coefficients> {
        &self.coeffs
    }

    /// Playback options.
    pub fn opts(&self) -> AnimationOpts {
        self.opts
    }

    /// Current playback state.
    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Current phase.
    pub fn phase(&self) -> f64 {
        self.state.t
    }

    /// Traced points so far.
    pub fn trace(&self) -> &[Vec2] {
        self.state.trace()
    }

    /// The trace as a polyline in plane-centered coordinates.
    pub fn trace_path(&self) -> BezPath {
        let mut path = BezPath::new();
        let mut points = self.state.trace.iter();
        if let Some(first) = points.next() {
            path.move_to(first.to_point());
            for p in points {
                path.line_to(p.to_point());
            }
        }
        path
    }

    /// Advance one tick: plot the point at the current phase, then step the phase.
    pub fn tick(&mut self) -> TickOutcome {
        let point = Evaluator::trace_point(&self.coeffs, self.state.t);
        self.advance(point)
    }

    /// Like [`AnimationDriver::tick`], also returning the full chain for rendering.
    pub fn tick_frame(&mut self) -> (EpicycleFrame, TickOutcome) {
        let frame = Evaluator::eval_frame(&self.coeffs, self.state.t);
        let outcome = self.advance(frame.tip);
        (frame, outcome)
    }

    /// Chain geometry at the current phase, without advancing.
    pub fn current_frame(&self) -> EpicycleFrame {
        Evaluator::eval_frame(&self.coeffs, self.state.t)
    }

    /// Return to phase zero with a freshly seeded trace.
    pub fn reset(&mut self) {
        self.state = AnimationState::default();
        self.seed();
    }

    fn seed(&mut self) {
        let p = Evaluator::trace_point(&self.coeffs, 0.0);
        self.state.plot(p);
    }

    fn advance(&mut self, point: Vec2) -> TickOutcome {
        let frame = FrameIndex(self.state.ticks);
        let t = self.state.t;
        self.state.plot(point);
        self.state.ticks += 1;

        // Phase comes from the per-cycle count, so rounding does not accumulate across ticks.
        self.state.cycle_ticks += 1;
        self.state.t = self.state.cycle_ticks as f64 * self.opts.rotation_speed;
        let wrapped = self.state.t > TAU - WRAP_EPSILON;
        if wrapped {
            self.state.t = 0.0;
            self.state.cycle_ticks = 0;
            self.state.wraps += 1;
            if self.opts.clear_on_wrap {
                self.state.trace.clear();
                self.seed();
            } else if !self.state.closed {
                self.state.close();
            }
            tracing::debug!(wraps = self.state.wraps, "phase wrapped");
        }

        TickOutcome {
            frame,
            t,
            point,
            wrapped,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/driver.rs"]
mod tests;
