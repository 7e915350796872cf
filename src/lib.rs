//! Epicycles turns a drawn or image-derived closed path into a truncated Fourier series and plays
//! back its rotating-vector reconstruction.
//!
//! The pipeline is session-oriented:
//!
//! - Capture a stroke ([`EpicycleSession::begin_capture`], [`EpicycleSession::extend_capture`])
//!   or load an outline image ([`EpicycleSession::load_image`])
//! - Commit it ([`EpicycleSession::end_capture`]): the samples are ordered into a short closed
//!   tour and analyzed into [`Coefficients`]
//! - Drive playback with [`EpicycleSession::tick`], or stream rendered frames into a
//!   [`FrameSink`] with [`render_ticks`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod capture;
pub(crate) mod config;
/// Encoding sinks.
pub mod encode;
pub(crate) mod eval;
pub(crate) mod fourier;
pub(crate) mod path;
/// Rendering backend(s).
pub mod render;
pub(crate) mod session;
pub(crate) mod tour;

pub use crate::foundation::core::{BezPath, Fps, FrameIndex, PixelIndex, Plane, Point, Vec2};
pub use crate::foundation::error::{EpicycleError, EpicycleResult};

pub use crate::animation::clock::FrameClock;
pub use crate::animation::driver::{AnimationDriver, AnimationOpts, AnimationState, TickOutcome};
pub use crate::capture::decode::{decode_outline, load_outline};
pub use crate::capture::extract::{PixelSource, Region, extract_centered, extract_region};
pub use crate::capture::raster::line_pixels;
pub use crate::capture::recorder::PathRecorder;
pub use crate::config::settings::{MAX_ACCURACY, Settings};
pub use crate::encode::png::{PngSequenceOpts, PngSequenceSink};
pub use crate::encode::sink::{FrameSink, InMemorySink, SinkConfig};
pub use crate::eval::evaluator::{Epicycle, EpicycleFrame, Evaluator};
pub use crate::fourier::analyzer::{
    Coefficients, analyze, analyze_samples, fourier_coefficient, frequency_of, index_of,
};
pub use crate::path::model::{Path, PathBuilder, closed_tour_length};
pub use crate::render::backend::{FrameRGBA, RenderBackend, RenderStyle};
pub use crate::render::cpu::{CpuBackend, CpuBackendOpts};
pub use crate::render::pipeline::{RenderStats, RenderTicksOpts, render_current, render_ticks};
pub use crate::session::epicycle_session::{EpicycleSession, SessionState};
pub use crate::tour::builder::{TourOpts, build_tour};
pub use crate::tour::greedy::nearest_neighbor;
pub use crate::tour::two_opt::two_opt;

pub use num_complex::Complex64;
