use crate::eval::evaluator::EpicycleFrame;
use crate::foundation::core::Vec2;
use crate::foundation::error::{EpicycleError, EpicycleResult};

/// A rendered frame as RGBA8 pixels.
///
/// Pixels are straight (not premultiplied) alpha. With a clear color set every pixel is opaque;
/// without one, untouched pixels stay fully transparent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, [0, 0, 0, 0])
    }

    /// Frame with every pixel set to `rgba`.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let n = (width as usize) * (height as usize);
        let mut data = Vec::with_capacity(n * 4);
        for _ in 0..n {
            data.extend_from_slice(&rgba);
        }
        Self {
            width,
            height,
            data,
        }
    }

    /// Read one pixel.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let i = self.offset(i64::from(x), i64::from(y))?;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Set one pixel; coordinates off the frame are ignored.
    pub fn put(&mut self, x: i64, y: i64, rgba: [u8; 4]) {
        if let Some(i) = self.offset(x, y)
            && let Some(px) = self.data.get_mut(i..i + 4)
        {
            px.copy_from_slice(&rgba);
        }
    }

    /// Check that `data` matches `width * height * 4`.
    pub fn validate(&self) -> EpicycleResult<()> {
        let expected = (self.width as usize) * (self.height as usize) * 4;
        if self.data.len() != expected {
            return Err(EpicycleError::validation(format!(
                "frame data is {} bytes, expected {expected} for {}x{}",
                self.data.len(),
                self.width,
                self.height
            )));
        }
        Ok(())
    }

    fn offset(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 || x >= i64::from(self.width) || y >= i64::from(self.height) {
            return None;
        }
        Some(((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }
}

/// Colors used to draw a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderStyle {
    /// Background fill; `None` leaves the frame transparent.
    pub clear_rgba: Option<[u8; 4]>,
    /// Epicycle circle outlines.
    pub circle_rgba: [u8; 4],
    /// One-pixel marker at each circle center.
    pub center_rgba: [u8; 4],
    /// Traced output curve.
    pub trace_rgba: [u8; 4],
    /// Draw the epicycle circles and centers, not just the trace.
    pub draw_circles: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            clear_rgba: None,
            circle_rgba: [150, 150, 100, 255],
            center_rgba: [0, 0, 255, 255],
            trace_rgba: [128, 0, 128, 255],
            draw_circles: true,
        }
    }
}

/// Turns one evaluated chain plus the trace so far into pixels.
///
/// `trace` is in plane-centered coordinates, as produced by the animation driver.
pub trait RenderBackend {
    /// Draw `frame` over `trace` into a fresh [`FrameRGBA`].
    fn render_frame(&mut self, frame: &EpicycleFrame, trace: &[Vec2]) -> EpicycleResult<FrameRGBA>;
}
