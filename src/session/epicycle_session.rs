use crate::animation::driver::{AnimationDriver, TickOutcome};
use crate::capture::extract::{PixelSource, extract_centered};
use crate::capture::recorder::PathRecorder;
use crate::config::settings::Settings;
use crate::eval::evaluator::EpicycleFrame;
use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::fourier::analyzer::{Coefficients, analyze};
use crate::path::model::{Path, PathBuilder};
use crate::tour::builder::build_tour;
use std::sync::Arc;

/// Lifecycle of a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing captured, nothing animating.
    Idle,
    /// A pointer stroke is being recorded.
    Capturing,
    /// Samples are being toured and analyzed; ticks are ignored.
    Analyzing,
    /// Coefficients are committed and ticks advance the animation.
    Animating,
}

/// Single owner of capture, analysis and playback state.
///
/// Events are methods. Starting a capture always stops the running animation and drops the
/// previous path and coefficients before anything new is recorded, and ticks only reach the
/// driver in [`SessionState::Animating`], so a tick can never observe half-reset state.
pub struct EpicycleSession {
    settings: Settings,
    state: SessionState,
    recorder: Option<PathRecorder>,
    path: Option<Path>,
    coeffs: Option<Arc<Coefficients>>,
    driver: Option<AnimationDriver>,
}

impl EpicycleSession {
    /// Create an idle session. `settings` are validated.
    pub fn new(settings: Settings) -> EpicycleResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            state: SessionState::Idle,
            recorder: None,
            path: None,
            coeffs: None,
            driver: None,
        })
    }

    /// Settings the session was created with.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Toured path of the last commit.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_ref()
    }

    /// Coefficients of the last commit.
    pub fn coefficients(&self) -> Option<&Arc<Coefficients>> {
        self.coeffs.as_ref()
    }

    /// Animation driver, present while animating.
    pub fn driver(&self) -> Option<&AnimationDriver> {
        self.driver.as_ref()
    }

    /// `new-capture-start`: stop playback, clear all state and start a stroke at `(x, y)`.
    pub fn begin_capture(&mut self, x: f64, y: f64) -> EpicycleResult<()> {
        self.reset();
        let mut recorder = PathRecorder::new(self.settings.plane);
        recorder.press(x, y)?;
        self.recorder = Some(recorder);
        self.state = SessionState::Capturing;
        tracing::debug!(x, y, "capture started");
        Ok(())
    }

    /// Pointer move. Extends the stroke while capturing; ignored otherwise.
    ///
    /// Returns the number of samples appended.
    pub fn extend_capture(&mut self, x: f64, y: f64) -> EpicycleResult<usize> {
        match (self.state, self.recorder.as_mut()) {
            (SessionState::Capturing, Some(recorder)) => recorder.drag(x, y),
            _ => Ok(0),
        }
    }

    /// `capture-end`: tour and analyze the stroke, then start animating.
    pub fn end_capture(&mut self) -> EpicycleResult<Arc<Coefficients>> {
        if self.state != SessionState::Capturing {
            return Err(EpicycleError::state(format!(
                "end_capture requires Capturing, session is {:?}",
                self.state
            )));
        }
        let recorder = self
            .recorder
            .take()
            .ok_or_else(|| EpicycleError::state("capturing without a recorder"))?;
        if recorder.clamped_samples() > 0 {
            tracing::info!(
                clamped = recorder.clamped_samples(),
                "stroke left the plane; samples were clamped"
            );
        }
        self.commit(recorder.finish())
    }

    /// Replace everything with an already captured point set (e.g. an image outline).
    ///
    /// Takes the same tour-and-analyze route as a finished stroke.
    pub fn load_points(&mut self, samples: PathBuilder) -> EpicycleResult<Arc<Coefficients>> {
        if samples.plane() != self.settings.plane {
            return Err(EpicycleError::validation(format!(
                "samples are on a {}x{} plane, session plane is {}x{}",
                samples.plane().width,
                samples.plane().height,
                self.settings.plane.width,
                self.settings.plane.height
            )));
        }
        self.reset();
        self.commit(samples)
    }

    /// Center an outline image on the plane and load its marked pixels.
    pub fn load_image(&mut self, image: &impl PixelSource) -> EpicycleResult<Arc<Coefficients>> {
        let samples = extract_centered(image, self.settings.plane)?;
        self.load_points(samples)
    }

    /// Periodic tick. Advances the animation only in [`SessionState::Animating`].
    pub fn tick(&mut self) -> Option<TickOutcome> {
        if self.state != SessionState::Animating {
            return None;
        }
        self.driver.as_mut().map(AnimationDriver::tick)
    }

    /// Like [`EpicycleSession::tick`], also returning the chain geometry of the tick.
    pub fn tick_frame(&mut self) -> Option<(EpicycleFrame, TickOutcome)> {
        if self.state != SessionState::Animating {
            return None;
        }
        self.driver.as_mut().map(AnimationDriver::tick_frame)
    }

    /// Stop playback and drop all captured and derived state.
    pub fn reset(&mut self) {
        self.driver = None;
        self.coeffs = None;
        self.path = None;
        self.recorder = None;
        self.state = SessionState::Idle;
    }

    #[tracing::instrument(skip(self, samples), fields(samples = samples.len()))]
    fn commit(&mut self, samples: PathBuilder) -> EpicycleResult<Arc<Coefficients>> {
        self.state = SessionState::Analyzing;
        let committed = self.analyze_and_start(samples);
        if committed.is_err() {
            self.reset();
        }
        committed
    }

    fn analyze_and_start(&mut self, samples: PathBuilder) -> EpicycleResult<Arc<Coefficients>> {
        let path = build_tour(samples, &self.settings.tour)?;
        let coeffs = Arc::new(analyze(&path, self.settings.accuracy));
        let driver = AnimationDriver::new(coeffs.clone(), self.settings.animation_opts())?;
        tracing::info!(
            samples = path.len(),
            coefficients = coeffs.len(),
            "committed path; animating"
        );

        self.path = Some(path);
        self.coeffs = Some(coeffs.clone());
        self.driver = Some(driver);
        self.state = SessionState::Animating;
        Ok(coeffs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/epicycle_session.rs"]
mod tests;
