use anyhow::Context;
use std::path::Path;

use crate::foundation::error::EpicycleResult;

/// Decode encoded image bytes (PNG, JPEG, ...) into straight-alpha RGBA8.
pub fn decode_outline(bytes: &[u8]) -> EpicycleResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode outline image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Read and decode an outline image from disk.
///
/// Outlines are expected to be one pixel thick on a transparent background; every pixel with any
/// non-zero channel becomes a sample.
pub fn load_outline(path: impl AsRef<Path>) -> EpicycleResult<image::RgbaImage> {
    let path = path.as_ref();
    let bytes =
        std::fs::read(path).with_context(|| format!("read outline image '{}'", path.display()))?;
    decode_outline(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/capture/decode.rs"]
mod tests;
