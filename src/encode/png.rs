use crate::encode::sink::{FrameSink, SinkConfig};
use crate::foundation::core::FrameIndex;
use crate::foundation::error::{EpicycleError, EpicycleResult};
use crate::render::backend::FrameRGBA;
use anyhow::Context as _;
use std::path::{Path, PathBuf};

/// Options for [`PngSequenceSink`].
#[derive(Clone, Debug)]
pub struct PngSequenceOpts {
    /// Directory the frames are written into; created if missing.
    pub out_dir: PathBuf,
    /// File name prefix, followed by a zero-padded frame number.
    pub prefix: String,
    /// Overwrite frames that already exist.
    pub overwrite: bool,
}

impl PngSequenceOpts {
    /// Write `frame_00000.png`, `frame_00001.png`, ... into `out_dir`.
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            prefix: "frame_".to_string(),
            overwrite: true,
        }
    }
}

/// Writes every pushed frame as its own PNG file.
pub struct PngSequenceSink {
    opts: PngSequenceOpts,
    cfg: Option<SinkConfig>,
    last_idx: Option<FrameIndex>,
    written: Vec<PathBuf>,
}

impl PngSequenceSink {
    /// Create a sink writing into `opts.out_dir`.
    pub fn new(opts: PngSequenceOpts) -> Self {
        Self {
            opts,
            cfg: None,
            last_idx: None,
            written: Vec::new(),
        }
    }

    /// Paths written so far, in push order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    /// Path a frame with index `idx` is written to.
    pub fn frame_path(&self, idx: FrameIndex) -> PathBuf {
        self.opts
            .out_dir
            .join(format!("{}{:05}.png", self.opts.prefix, idx.0))
    }
}

impl FrameSink for PngSequenceSink {
    fn begin(&mut self, cfg: SinkConfig) -> EpicycleResult<()> {
        cfg.validate()?;
        ensure_dir(&self.opts.out_dir)?;
        self.cfg = Some(cfg);
        self.last_idx = None;
        self.written.clear();
        Ok(())
    }

    fn push_frame(&mut self, idx: FrameIndex, frame: &FrameRGBA) -> EpicycleResult<()> {
        let cfg = self
            .cfg
            .as_ref()
            .ok_or_else(|| EpicycleError::state("png sink not started"))?;
        if let Some(last) = self.last_idx
            && idx <= last
        {
            return Err(EpicycleError::state(
                "png sink received out-of-order frame index",
            ));
        }
        cfg.check_frame(frame)?;

        let path = self.frame_path(idx);
        if !self.opts.overwrite && path.exists() {
            return Err(EpicycleError::validation(format!(
                "output file '{}' already exists",
                path.display()
            )));
        }
        image::save_buffer_with_format(
            &path,
            &frame.data,
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png frame '{}'", path.display()))?;

        tracing::debug!(frame = idx.0, path = %path.display(), "wrote png frame");
        self.last_idx = Some(idx);
        self.written.push(path);
        Ok(())
    }

    fn end(&mut self) -> EpicycleResult<()> {
        if self.cfg.take().is_none() {
            return Err(EpicycleError::state("png sink not started"));
        }
        tracing::info!(
            frames = self.written.len(),
            dir = %self.opts.out_dir.display(),
            "png sequence finished"
        );
        Ok(())
    }
}

fn ensure_dir(dir: &Path) -> EpicycleResult<()> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory '{}'", dir.display()))?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/encode/png.rs"]
mod tests;
