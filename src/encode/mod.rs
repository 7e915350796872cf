//! Encoding sinks.
//!
//! Sinks consume rendered frames in tick order and are driven by [`crate::render_ticks`].

/// PNG image sequence output.
pub mod png;
/// Generic frame sink trait and built-in sinks.
pub mod sink;
