use crate::animation::driver::AnimationOpts;
use crate::foundation::core::{Fps, Plane};
use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::tour::builder::TourOpts;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Largest accepted `accuracy`; analysis cost grows with `accuracy * path length`.
pub const MAX_ACCURACY: u32 = 1400;

/// User-facing configuration for a session.
///
/// Every field has a default, so a settings file only needs the values it changes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Highest frequency `|n|` kept in the series.
    pub accuracy: u32,
    /// Phase increment per tick, in radians.
    pub rotation_speed: f64,
    /// Target tick rate of the animation clock.
    pub fps: Fps,
    /// Drawing plane size in pixels.
    pub plane: Plane,
    /// Clear the trace whenever the phase wraps.
    pub clear_on_wrap: bool,
    /// Tour builder options.
    pub tour: TourOpts,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            accuracy: 100,
            rotation_speed: 0.01,
            fps: Fps::default(),
            plane: Plane {
                width: 800,
                height: 600,
            },
            clear_on_wrap: false,
            tour: TourOpts::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a JSON reader. The result is validated.
    pub fn from_reader<R: std::io::Read>(r: R) -> EpicycleResult<Self> {
        let settings: Settings = serde_json::from_reader(r)
            .map_err(|e| EpicycleError::serde(format!("parse settings JSON: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Parse settings from a JSON file on disk. The result is validated.
    pub fn from_path(path: impl AsRef<Path>) -> EpicycleResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            EpicycleError::validation(format!("open settings JSON '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> EpicycleResult<()> {
        if self.accuracy == 0 || self.accuracy > MAX_ACCURACY {
            return Err(EpicycleError::validation(format!(
                "accuracy must be in 1..={MAX_ACCURACY}, got {}",
                self.accuracy
            )));
        }
        if !self.rotation_speed.is_finite() || self.rotation_speed <= 0.0 {
            return Err(EpicycleError::validation(format!(
                "rotation_speed must be a positive finite number, got {}",
                self.rotation_speed
            )));
        }
        Fps::new(self.fps.num, self.fps.den)?;
        Plane::new(self.plane.width, self.plane.height)?;
        Ok(())
    }

    /// Animation options derived from these settings.
    pub fn animation_opts(&self) -> AnimationOpts {
        AnimationOpts {
            rotation_speed: self.rotation_speed,
            clear_on_wrap: self.clear_on_wrap,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/settings.rs"]
mod tests;
