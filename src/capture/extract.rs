use crate::foundation::core::{Plane, Point};
use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::path::model::PathBuilder;
use crate::render::backend::FrameRGBA;

/// Read-only presence query over a pixel buffer.
pub trait PixelSource {
    /// Buffer size in pixels as `(width, height)`.
    fn dimensions(&self) -> (u32, u32);

    /// Return `true` when the pixel at `(x, y)` is part of the drawing.
    ///
    /// Callers guarantee `(x, y)` is within [`PixelSource::dimensions`].
    fn is_marked(&self, x: u32, y: u32) -> bool;
}

fn rgba_marked(px: [u8; 4]) -> bool {
    px.iter().map(|&c| u16::from(c)).sum::<u16>() > 0
}

impl PixelSource for image::RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn is_marked(&self, x: u32, y: u32) -> bool {
        rgba_marked(self.get_pixel(x, y).0)
    }
}

impl PixelSource for FrameRGBA {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn is_marked(&self, x: u32, y: u32) -> bool {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        match self.data.get(i..i + 4) {
            Some(px) => rgba_marked([px[0], px[1], px[2], px[3]]),
            None => false,
        }
    }
}

/// Axis-aligned pixel rectangle `[x, x + width) x [y, y + height)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Region {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Region {
    /// Region covering the whole plane.
    pub fn full(plane: Plane) -> Self {
        Self {
            x: 0,
            y: 0,
            width: plane.width,
            height: plane.height,
        }
    }

    fn fits(self, width: u32, height: u32) -> bool {
        u64::from(self.x) + u64::from(self.width) <= u64::from(width)
            && u64::from(self.y) + u64::from(self.height) <= u64::from(height)
    }
}

/// Collect every marked pixel of `region` as an unordered point set.
///
/// `source` is addressed in plane coordinates, so the region has to fit both the plane and the
/// buffer. Points come out in row-major scan order; ordering them is the tour builder's job.
#[tracing::instrument(skip(source))]
pub fn extract_region(
    source: &impl PixelSource,
    plane: Plane,
    region: Region,
) -> EpicycleResult<PathBuilder> {
    if !region.fits(plane.width, plane.height) {
        return Err(EpicycleError::out_of_bounds(format!(
            "region {region:?} exceeds the {}x{} plane",
            plane.width, plane.height
        )));
    }
    let (sw, sh) = source.dimensions();
    if !region.fits(sw, sh) {
        return Err(EpicycleError::out_of_bounds(format!(
            "region {region:?} exceeds the {sw}x{sh} pixel buffer"
        )));
    }

    let mut out = PathBuilder::new(plane);
    for y in region.y..region.y + region.height {
        for x in region.x..region.x + region.width {
            if source.is_marked(x, y) {
                out.push(Point::new(x, y))?;
            }
        }
    }
    tracing::debug!(marked = out.len(), "extracted marked pixels");
    Ok(out)
}

/// Place `source` centered on `plane` and collect its marked pixels in plane coordinates.
///
/// The source must fit on the plane once centered.
#[tracing::instrument(skip(source))]
pub fn extract_centered(source: &impl PixelSource, plane: Plane) -> EpicycleResult<PathBuilder> {
    let (sw, sh) = source.dimensions();
    let ox = (f64::from(plane.width) / 2.0 - f64::from(sw) / 2.0).round() as i64;
    let oy = (f64::from(plane.height) / 2.0 - f64::from(sh) / 2.0).round() as i64;
    if ox < 0
        || oy < 0
        || ox + i64::from(sw) > i64::from(plane.width)
        || oy + i64::from(sh) > i64::from(plane.height)
    {
        return Err(EpicycleError::out_of_bounds(format!(
            "{sw}x{sh} image does not fit on the {}x{} plane",
            plane.width, plane.height
        )));
    }

    let mut out = PathBuilder::new(plane);
    for y in 0..sh {
        for x in 0..sw {
            if source.is_marked(x, y) {
                out.push(plane.point(ox + i64::from(x), oy + i64::from(y))?)?;
            }
        }
    }
    tracing::debug!(marked = out.len(), ox, oy, "extracted centered image");
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/extract.rs"]
mod tests;
