//! Frame sources: a single still image or a live camera stream behind one trait.

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::BoothResult;

/// Camera capture through a producer thread.
pub mod camera;
/// Detection overlay drawn on camera frames.
pub mod detect;
/// Single-image source.
pub mod still;

/// Pull-based producer of raw frames.
pub trait FrameSource {
    /// Next frame, or `None` when nothing new is available.
    ///
    /// For live sources `None` is end-of-stream and terminal.
    fn next_frame(&mut self) -> BoothResult<Option<PixelBuffer>>;

    /// Return `true` for sources that keep producing frames until end-of-stream.
    fn is_live(&self) -> bool;
}
