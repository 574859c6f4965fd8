use std::path::{Path, PathBuf};

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{BoothError, BoothResult};

/// Frame rate used for recordings.
pub const RECORD_FPS: u32 = 30;

/// Configuration handed to a [`FrameSink`] when the first frame arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkConfig {
    /// Frame width in pixels, fixed for the lifetime of the recording.
    pub width: u32,
    /// Frame height in pixels, fixed for the lifetime of the recording.
    pub height: u32,
    /// Frames per second.
    pub fps: u32,
}

/// Consumer of a stream of equally sized RGB frames.
pub trait FrameSink: Send {
    /// Called once before any frame is pushed.
    fn begin(&mut self, cfg: SinkConfig) -> BoothResult<()>;
    /// Append one frame.
    fn push_frame(&mut self, frame: &PixelBuffer) -> BoothResult<()>;
    /// Called once after the last frame.
    fn end(&mut self) -> BoothResult<()>;
}

/// In-memory sink for tests and debugging.
#[derive(Debug, Default)]
pub struct InMemorySink {
    cfg: Option<SinkConfig>,
    frames: Vec<PixelBuffer>,
    ended: bool,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration captured in `begin`, if any.
    pub fn config(&self) -> Option<&SinkConfig> {
        self.cfg.as_ref()
    }

    /// Frames in push order.
    pub fn frames(&self) -> &[PixelBuffer] {
        &self.frames
    }

    /// Return `true` once `end` has been called.
    pub fn is_ended(&self) -> bool {
        self.ended
    }
}

impl FrameSink for InMemorySink {
    fn begin(&mut self, cfg: SinkConfig) -> BoothResult<()> {
        self.cfg = Some(cfg);
        self.frames.clear();
        self.ended = false;
        Ok(())
    }

    fn push_frame(&mut self, frame: &PixelBuffer) -> BoothResult<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn end(&mut self) -> BoothResult<()> {
        self.ended = true;
        Ok(())
    }
}

/// Lazily opened recorder bound to one output path.
///
/// The sink is started by the first frame, whose size becomes the recording size. Later frames
/// of a different size are rejected. [`VideoRecorder::close`] finalizes once; further calls are
/// no-ops.
pub struct VideoRecorder {
    path: PathBuf,
    fps: u32,
    sink: Box<dyn FrameSink>,
    size: Option<(u32, u32)>,
    closed: bool,
    frames_written: u64,
}

impl std::fmt::Debug for VideoRecorder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VideoRecorder")
            .field("path", &self.path)
            .field("fps", &self.fps)
            .field("size", &self.size)
            .field("closed", &self.closed)
            .field("frames_written", &self.frames_written)
            .finish_non_exhaustive()
    }
}

impl VideoRecorder {
    /// Bind a recorder to `path`, writing through `sink` at [`RECORD_FPS`].
    pub fn new(path: impl Into<PathBuf>, sink: Box<dyn FrameSink>) -> Self {
        Self::with_fps(path, RECORD_FPS, sink)
    }

    /// Bind a recorder with an explicit frame rate.
    pub fn with_fps(path: impl Into<PathBuf>, fps: u32, sink: Box<dyn FrameSink>) -> Self {
        Self {
            path: path.into(),
            fps,
            sink,
            size: None,
            closed: false,
            frames_written: 0,
        }
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Return `true` once the sink has been started.
    pub fn is_open(&self) -> bool {
        self.size.is_some() && !self.closed
    }

    /// Recording size, fixed by the first frame.
    pub fn frame_size(&self) -> Option<(u32, u32)> {
        self.size
    }

    /// Frames successfully written.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    /// Start the sink using `frame`'s dimensions if it is not running yet.
    pub fn ensure_open(&mut self, frame: &PixelBuffer) -> BoothResult<()> {
        if self.closed {
            return Err(BoothError::encode(format!(
                "recorder for '{}' is already closed",
                self.path.display()
            )));
        }
        if self.size.is_some() {
            return Ok(());
        }
        if frame.is_empty() {
            return Err(BoothError::validation("cannot record an empty frame"));
        }
        if self.fps == 0 {
            return Err(BoothError::validation("recording fps must be non-zero"));
        }
        let (width, height) = frame.dimensions();
        self.sink.begin(SinkConfig {
            width,
            height,
            fps: self.fps,
        })?;
        self.size = Some((width, height));
        tracing::info!(path = %self.path.display(), width, height, fps = self.fps, "recording started");
        Ok(())
    }

    /// Append `frame`, opening the sink first if needed.
    pub fn write(&mut self, frame: &PixelBuffer) -> BoothResult<()> {
        self.ensure_open(frame)?;
        if let Some((w, h)) = self.size
            && frame.dimensions() != (w, h)
        {
            return Err(BoothError::validation(format!(
                "frame size mismatch: got {}x{}, expected {w}x{h}",
                frame.width(),
                frame.height()
            )));
        }
        self.sink.push_frame(frame)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Finalize the output. Safe to call repeatedly.
    pub fn close(&mut self) -> BoothResult<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.size.is_some() {
            self.sink.end()?;
            tracing::info!(
                path = %self.path.display(),
                frames = self.frames_written,
                "recording finished"
            );
        }
        Ok(())
    }
}

impl Drop for VideoRecorder {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            tracing::warn!(error = %e, "failed to finalize recording");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/encode/sink.rs"]
mod tests;
