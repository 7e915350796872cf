use crate::foundation::core::Fps;
use std::time::{Duration, Instant};

/// Fixed-rate tick gate driven by an external frame callback.
///
/// The host calls [`FrameClock::poll`] as often as it likes (e.g. on every display refresh); a
/// tick is due once more than one interval has elapsed. The reference time is then moved to the
/// last interval boundary, so the cadence does not drift when callbacks arrive late.
#[derive(Clone, Debug)]
pub struct FrameClock {
    interval: Duration,
    then: Option<Instant>,
}

impl FrameClock {
    /// Create a stopped clock for `fps`.
    pub fn new(fps: Fps) -> Self {
        Self {
            interval: fps.interval(),
            then: None,
        }
    }

    /// Target interval between ticks.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start (or restart) counting from `now`.
    pub fn start(&mut self, now: Instant) {
        self.then = Some(now);
    }

    /// Stop the clock; the next poll restarts it.
    pub fn stop(&mut self) {
        self.then = None;
    }

    /// Return `true` when a tick is due at `now`.
    ///
    /// A stopped clock starts at `now` and reports no tick.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(then) = self.then else {
            self.start(now);
            return false;
        };
        let delta = now.saturating_duration_since(then);
        if delta <= self.interval {
            return false;
        }

        let interval_ns = self.interval.as_nanos().max(1);
        let rem_ns = delta.as_nanos() % interval_ns;
        let rem = Duration::from_nanos(u64::try_from(rem_ns).unwrap_or(u64::MAX));
        self.then = Some(now.checked_sub(rem).unwrap_or(now));
        true
    }

    /// Time left until the next tick is due, for hosts that sleep between polls.
    pub fn until_next(&self, now: Instant) -> Duration {
        match self.then {
            Some(then) => (then + self.interval).saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/clock.rs"]
mod tests;
