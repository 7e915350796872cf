use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::render::backend::{FrameRGBA, RenderBackend};
use crate::session::epicycle_session::{EpicycleSession, SessionState};

/// Tick range and sampling for [`render_ticks`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderTicksOpts {
    /// Number of ticks to advance.
    pub ticks: u64,
    /// Emit a frame after every `every`-th tick; the final tick is always emitted.
    pub every: u64,
}

impl Default for RenderTicksOpts {
    fn default() -> Self {
        Self {
            ticks: 1,
            every: 1,
        }
    }
}

/// Aggregated counters of one [`render_ticks`] run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Ticks advanced.
    pub ticks: u64,
    /// Frames pushed to the sink.
    pub frames_written: u64,
    /// Phase wraps observed.
    pub wraps: u64,
}

/// Render the chain at the session's current phase over the trace so far, without ticking.
pub fn render_current(
    session: &EpicycleSession,
    backend: &mut dyn RenderBackend,
) -> EpicycleResult<FrameRGBA> {
    let driver = session
        .driver()
        .ok_or_else(|| EpicycleError::state("render requires an animating session"))?;
    backend.render_frame(&driver.current_frame(), driver.trace())
}

/// Advance an animating session `opts.ticks` times and stream rendered frames into `sink`.
///
/// Each emitted frame shows the chain at the phase of the tick that produced it, over the trace
/// including that tick's point. Sink frame indices count emitted frames from zero.
#[tracing::instrument(skip(session, backend, sink))]
pub fn render_ticks(
    session: &mut EpicycleSession,
    opts: RenderTicksOpts,
    backend: &mut dyn RenderBackend,
    sink: &mut dyn FrameSink,
) -> EpicycleResult<RenderStats> {
    if opts.every == 0 {
        return Err(EpicycleError::validation("render every must be non-zero"));
    }
    if session.state() != SessionState::Animating {
        return Err(EpicycleError::state(format!(
            "render requires an animating session, session is {:?}",
            session.state()
        )));
    }

    let settings = session.settings();
    sink.begin(SinkConfig {
        width: settings.plane.width,
        height: settings.plane.height,
        fps: settings.fps,
    })?;

    let mut stats = RenderStats::default();
    for i in 0..opts.ticks {
        let Some((frame, outcome)) = session.tick_frame() else {
            break;
        };
        stats.ticks += 1;
        if outcome.wrapped {
            stats.wraps += 1;
        }

        let last = i + 1 == opts.ticks;
        if (i + 1) % opts.every != 0 && !last {
            continue;
        }
        let trace = session.driver().map(|d| d.trace()).unwrap_or_default();
        let pixels = backend.render_frame(&frame, trace)?;
        sink.push_frame(FrameIndex(stats.frames_written), &pixels)?;
        stats.frames_written += 1;
    }
    sink.end()?;

    tracing::info!(
        ticks = stats.ticks,
        frames = stats.frames_written,
        wraps = stats.wraps,
        "rendered ticks"
    );
    Ok(stats)
}

#[cfg(test)]
#[path = "../../tests/unit/render/pipeline.rs"]
mod tests;
