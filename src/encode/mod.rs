//! Recording of the displayed frame stream.
//!
//! A [`VideoRecorder`](crate::VideoRecorder) opens its [`FrameSink`](crate::FrameSink) lazily on the
//! first frame and fixes the recording size from it.

/// `ffmpeg`-based sink (MP4 output via the system `ffmpeg`).
pub mod ffmpeg;
/// Sink trait, in-memory sink, and the lazy recorder.
pub mod sink;
