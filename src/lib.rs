//! Stickerbooth is the core of an interactive photo-booth editor.
//!
//! It decorates a still image or a live camera stream with bitmap stickers and one-shot colour
//! filters, keeps an undo history, and records the displayed stream to MP4 through the system
//! `ffmpeg`. Windowing is left to the caller:
//!
//! - Build a [`FilterCatalog`] and a [`StickerSheet`]
//! - Create an [`Editor`] in [`Mode::Still`] or [`Mode::Camera`]
//! - Drive it with a [`FrameSource`], a [`Surface`] and a [`PathPrompt`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod effects;
/// Video recording sinks.
pub mod encode;
pub(crate) mod layout;
/// Editing session: controller, history, input and configuration.
pub mod session;
/// Still and camera frame sources.
pub mod source;

pub use crate::foundation::core::{Channels, PixelBuffer, Rect};
pub use crate::foundation::error::{BoothError, BoothResult};

pub use crate::assets::decode::{decode_image, decode_sticker, load_image, load_sticker, save_image};
pub use crate::assets::store::{
    DEFAULT_STICKERS, ManifestEntry, Sticker, StickerSheet, THUMB_SIZE,
};
pub use crate::effects::bilateral::bilateral_filter;
pub use crate::effects::blur::gaussian_blur;
pub use crate::effects::colormap::{ColorRamp, apply_color_ramp};
pub use crate::effects::composite::{BoundaryPolicy, composite, composite_with};
pub use crate::effects::filters::{
    CatalogEntry, CatalogPreset, Filter, FilterCatalog, apply as apply_filter, parse_filter,
};
pub use crate::layout::bands::{BandLayout, Hit};
pub use crate::layout::viewport::{Viewport, resize, resize_for_display, scale_to_fit};

pub use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts, VideoCodec};
pub use crate::encode::sink::{FrameSink, InMemorySink, RECORD_FPS, SinkConfig, VideoRecorder};
pub use crate::session::config::{EditorOpts, RecordOpts};
pub use crate::session::editor::{
    DisplayFrame, Editor, Mode, PathPrompt, PlacedSticker, SessionSummary, Surface,
};
pub use crate::session::history::History;
pub use crate::session::input::{InputEvent, Key};
pub use crate::session::script::{Script, ScriptedPrompt, ScriptedSurface};
pub use crate::source::FrameSource;
pub use crate::source::camera::{CameraOpts, CameraSource, FrameGrabber};
pub use crate::source::detect::{DetectionOverlay, DetectionRegion, RegionClassifier, RegionKind};
pub use crate::source::still::StillSource;
