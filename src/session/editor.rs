use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::save_image;
use crate::assets::store::StickerSheet;
use crate::effects::composite::composite_with;
use crate::effects::filters::FilterCatalog;
use crate::encode::ffmpeg::{FfmpegSink, FfmpegSinkOpts};
use crate::encode::sink::{FrameSink, VideoRecorder};
use crate::foundation::core::{PixelBuffer, Rect};
use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::bands::Hit;
use crate::layout::viewport::{Viewport, resize_for_display};
use crate::session::config::{EditorOpts, RecordOpts};
use crate::session::history::History;
use crate::session::input::{InputEvent, Key};
use crate::source::FrameSource;
use crate::source::detect::{DetectionOverlay, DetectionRegion};

/// What the editor is working on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// One loaded image; edits accumulate and can be undone.
    Still,
    /// Live frames; stickers are remembered as positions and replayed on every frame.
    Camera,
}

/// A sticker placement remembered in camera mode, in model coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlacedSticker {
    /// Index into the sticker sheet.
    pub sticker: usize,
    /// Left edge.
    pub x: i64,
    /// Top edge.
    pub y: i64,
}

/// Everything the presentation layer needs to draw one cycle.
#[derive(Clone, Debug)]
pub struct DisplayFrame {
    /// Working buffer scaled to the display frame.
    pub canvas: PixelBuffer,
    /// Where `canvas` sits in the window.
    pub viewport: Viewport,
    /// Selected filter.
    pub filter_index: usize,
    /// Selected sticker.
    pub sticker_index: usize,
    /// Whether a recording is running.
    pub recording: bool,
    /// Regions outlined on the current camera frame.
    pub detections: Vec<DetectionRegion>,
}

/// Presentation collaborator: shows frames and reports input.
pub trait Surface {
    /// Show `frame`.
    fn present(&mut self, frame: &DisplayFrame) -> BoothResult<()>;
    /// Events since the last poll, or `None` once the surface has closed.
    fn poll_events(&mut self) -> BoothResult<Option<Vec<InputEvent>>>;
}

/// Save-dialog collaborator.
pub trait PathPrompt {
    /// Ask for an output path. `None` means the user cancelled.
    fn save_path(&mut self) -> Option<PathBuf>;
}

/// Builds the sink a new recording writes to.
pub type SinkFactory = Box<dyn FnMut(&Path, &RecordOpts) -> Box<dyn FrameSink> + Send>;

/// Counters reported by [`Editor::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionSummary {
    /// Loop iterations completed.
    pub iterations: u64,
    /// Frames pulled from the source.
    pub frames: u64,
    /// Frames handed to the surface.
    pub presented: u64,
    /// Frames written to recordings.
    pub recorded: u64,
    /// Whether the session ended through the quit key.
    pub quit: bool,
}

// Still-mode undo entry: the buffer plus the filter that produced it.
#[derive(Clone, Debug)]
struct Snapshot {
    image: PixelBuffer,
    filter_index: usize,
}

/// Session controller. Owns the working buffer, the undo history and the recorder.
pub struct Editor {
    mode: Mode,
    opts: EditorOpts,
    catalog: Arc<FilterCatalog>,
    stickers: Arc<StickerSheet>,
    original: Option<PixelBuffer>,
    working: Option<PixelBuffer>,
    history: Option<History<Snapshot>>,
    placed: Vec<PlacedSticker>,
    detections: Vec<DetectionRegion>,
    filter_index: usize,
    sticker_index: usize,
    overlay: Option<DetectionOverlay>,
    recorder: Option<VideoRecorder>,
    sink_factory: SinkFactory,
    recorded: u64,
    dirty: bool,
    quit: bool,
}

impl std::fmt::Debug for Editor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Editor")
            .field("mode", &self.mode)
            .field("filter_index", &self.filter_index)
            .field("sticker_index", &self.sticker_index)
            .field("placed", &self.placed.len())
            .field("history", &self.history.as_ref().map(History::len))
            .field("recording", &self.recorder.is_some())
            .finish_non_exhaustive()
    }
}

fn ffmpeg_sink(path: &Path, rec: &RecordOpts) -> Box<dyn FrameSink> {
    let mut opts = FfmpegSinkOpts::new(path);
    opts.codec = rec.codec;
    Box::new(FfmpegSink::new(opts))
}

impl Editor {
    /// Create an editor with no image yet.
    pub fn new(
        mode: Mode,
        catalog: Arc<FilterCatalog>,
        stickers: Arc<StickerSheet>,
        opts: EditorOpts,
    ) -> BoothResult<Self> {
        opts.validate()?;
        Ok(Self {
            mode,
            opts,
            catalog,
            stickers,
            original: None,
            working: None,
            history: None,
            placed: Vec::new(),
            detections: Vec::new(),
            filter_index: 0,
            sticker_index: 0,
            overlay: None,
            recorder: None,
            sink_factory: Box::new(ffmpeg_sink),
            recorded: 0,
            dirty: false,
            quit: false,
        })
    }

    /// Create a still-mode editor on `image`.
    pub fn still(
        image: PixelBuffer,
        catalog: Arc<FilterCatalog>,
        stickers: Arc<StickerSheet>,
        opts: EditorOpts,
    ) -> BoothResult<Self> {
        let mut editor = Self::new(Mode::Still, catalog, stickers, opts)?;
        editor.ingest(image)?;
        Ok(editor)
    }

    /// Outline detections on every camera frame before filtering.
    pub fn with_overlay(mut self, overlay: DetectionOverlay) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Replace the sink used by new recordings (system ffmpeg by default).
    pub fn with_sink_factory(mut self, factory: SinkFactory) -> Self {
        self.sink_factory = factory;
        self
    }

    /// Session mode.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Current working buffer, once an image or frame has arrived.
    pub fn working(&self) -> Option<&PixelBuffer> {
        self.working.as_ref()
    }

    /// Unfiltered source: the loaded image, or the latest annotated camera frame.
    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    /// Selected filter index.
    pub fn filter_index(&self) -> usize {
        self.filter_index
    }

    /// Selected sticker index.
    pub fn sticker_index(&self) -> usize {
        self.sticker_index
    }

    /// Camera-mode placements, oldest first.
    pub fn placed(&self) -> &[PlacedSticker] {
        &self.placed
    }

    /// Still-mode undo depth (1 means nothing to undo).
    pub fn history_len(&self) -> usize {
        self.history.as_ref().map_or(0, History::len)
    }

    /// Whether a recording is running.
    pub fn is_recording(&self) -> bool {
        self.recorder.is_some()
    }

    /// Frames written to finished and running recordings.
    pub fn recorded_frames(&self) -> u64 {
        self.recorded + self.recorder.as_ref().map_or(0, VideoRecorder::frames_written)
    }

    /// Whether the quit key has been pressed.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Take in a new source frame.
    ///
    /// Still mode starts over on the new image. Camera mode annotates the frame, filters it and
    /// replays every placed sticker.
    pub fn ingest(&mut self, frame: PixelBuffer) -> BoothResult<()> {
        if frame.is_empty() {
            return Err(BoothError::validation("source frame is empty"));
        }
        let mut frame = frame.to_rgb();
        match self.mode {
            Mode::Still => {
                let start = Snapshot {
                    image: frame.clone(),
                    filter_index: 0,
                };
                let history = match self.opts.history_limit {
                    Some(limit) => History::with_limit(start, limit)?,
                    None => History::new(start),
                };
                self.working = Some(frame.clone());
                self.original = Some(frame);
                self.history = Some(history);
                self.filter_index = 0;
                self.dirty = true;
            }
            Mode::Camera => {
                self.detections = match &self.overlay {
                    Some(overlay) => overlay.annotate(&mut frame),
                    None => Vec::new(),
                };
                self.original = Some(frame);
                self.rebuild_camera()?;
            }
        }
        Ok(())
    }

    fn rebuild_camera(&mut self) -> BoothResult<()> {
        let Some(raw) = self.original.as_ref() else {
            return Ok(());
        };
        let mut working = self.catalog.apply(raw, self.filter_index)?;
        for p in &self.placed {
            if let Some(bmp) = self.stickers.bitmap(p.sticker) {
                composite_with(&mut working, bmp, p.x, p.y, self.opts.boundary);
            }
        }
        self.working = Some(working);
        self.dirty = true;
        Ok(())
    }

    /// Dispatch one input event.
    pub fn handle_event(&mut self, event: &InputEvent, prompt: &mut dyn PathPrompt) -> BoothResult<()> {
        match *event {
            InputEvent::PointerDown { x, y } => self.pointer_down(x, y, prompt),
            InputEvent::Wheel { delta } => {
                self.cycle_sticker(delta);
                Ok(())
            }
            InputEvent::Key { key } => self.key(key, prompt),
        }
    }

    /// Apply a command key.
    pub fn key(&mut self, key: Key, prompt: &mut dyn PathPrompt) -> BoothResult<()> {
        match key {
            Key::Escape => {
                tracing::info!("quit requested");
                self.quit = true;
            }
            Key::Save => self.save(prompt)?,
            Key::NextFilter => self.next_filter()?,
            Key::CycleSticker => self.cycle_sticker(1),
            Key::Undo => self.undo()?,
        }
        Ok(())
    }

    /// Route a pointer-down at window coordinates through the band layout.
    pub fn pointer_down(&mut self, px: i64, py: i64, prompt: &mut dyn PathPrompt) -> BoothResult<()> {
        let Some(working) = self.working.as_ref() else {
            return Ok(());
        };
        let layout = self.opts.layout;
        let vp = layout.viewport(working.width(), working.height())?;
        let hit = layout.hit_test(px, py, &vp, self.stickers.len(), self.catalog.len());
        tracing::debug!(px, py, ?hit, "pointer down");
        match hit {
            Hit::Sticker(i) => self.select_sticker(i),
            Hit::Canvas { x, y } => {
                self.place_sticker(x, y)?;
            }
            Hit::Filter(i) => self.select_filter(i)?,
            Hit::Save => self.save(prompt)?,
            Hit::Undo => self.undo()?,
            Hit::Nothing => {}
        }
        Ok(())
    }

    /// Select sticker `index`; out-of-range indices are ignored.
    pub fn select_sticker(&mut self, index: usize) {
        if index < self.stickers.len() {
            self.sticker_index = index;
            self.dirty = true;
        }
    }

    /// Move the sticker selection by the sign of `delta`, wrapping around.
    pub fn cycle_sticker(&mut self, delta: i32) {
        let len = self.stickers.len() as i64;
        if len == 0 || delta == 0 {
            return;
        }
        let next = (self.sticker_index as i64 + i64::from(delta.signum())).rem_euclid(len);
        self.select_sticker(next as usize);
    }

    /// Select filter `index`; out-of-range indices are ignored.
    ///
    /// Still mode replaces the working buffer with the filtered original image and records it
    /// for undo. Camera mode applies the filter from the next frame on (and re-renders the
    /// current one).
    pub fn select_filter(&mut self, index: usize) -> BoothResult<()> {
        if index >= self.catalog.len() {
            return Ok(());
        }
        self.filter_index = index;
        tracing::debug!(index, name = self.catalog.name(index), "filter selected");
        match self.mode {
            Mode::Still => {
                let Some(original) = self.original.as_ref() else {
                    return Ok(());
                };
                let filtered = self.catalog.apply(original, index)?;
                if let Some(history) = self.history.as_mut() {
                    history.push(Snapshot {
                        image: filtered.clone(),
                        filter_index: index,
                    });
                }
                self.working = Some(filtered);
                self.dirty = true;
                Ok(())
            }
            Mode::Camera => self.rebuild_camera(),
        }
    }

    /// Select the next filter, wrapping to the identity after the last one.
    pub fn next_filter(&mut self) -> BoothResult<()> {
        let next = (self.filter_index + 1) % self.catalog.len().max(1);
        self.select_filter(next)
    }

    /// Stamp the selected sticker at model coordinates `(x, y)`.
    ///
    /// Returns the region written, or `None` when nothing changed.
    pub fn place_sticker(&mut self, x: i64, y: i64) -> BoothResult<Option<Rect>> {
        let Some(bmp) = self.stickers.bitmap(self.sticker_index) else {
            return Ok(None);
        };
        let Some(working) = self.working.as_mut() else {
            return Ok(None);
        };
        let Some(region) = composite_with(working, bmp, x, y, self.opts.boundary) else {
            return Ok(None);
        };
        match self.mode {
            Mode::Still => {
                if let Some(history) = self.history.as_mut() {
                    history.push(Snapshot {
                        image: working.clone(),
                        filter_index: self.filter_index,
                    });
                }
            }
            Mode::Camera => self.placed.push(PlacedSticker {
                sticker: self.sticker_index,
                x,
                y,
            }),
        }
        self.dirty = true;
        Ok(Some(region))
    }

    /// Undo the last edit. A no-op when there is nothing to undo.
    ///
    /// Still mode also restores the filter selection that was active before the edit.
    pub fn undo(&mut self) -> BoothResult<()> {
        match self.mode {
            Mode::Still => {
                let restored = self
                    .history
                    .as_mut()
                    .and_then(|h| h.pop().cloned());
                match restored {
                    Some(prev) => {
                        self.working = Some(prev.image);
                        self.filter_index = prev.filter_index;
                        self.dirty = true;
                    }
                    None => tracing::debug!("nothing to undo"),
                }
                Ok(())
            }
            Mode::Camera => {
                if self.placed.pop().is_some() {
                    self.rebuild_camera()?;
                }
                Ok(())
            }
        }
    }

    /// Still mode: write the working buffer to a prompted path. Camera mode: toggle recording.
    ///
    /// A cancelled prompt changes nothing. Failing to write the image is logged.
    pub fn save(&mut self, prompt: &mut dyn PathPrompt) -> BoothResult<()> {
        match self.mode {
            Mode::Camera => self.toggle_recording(prompt),
            Mode::Still => {
                let Some(working) = self.working.as_ref() else {
                    return Ok(());
                };
                let Some(path) = prompt.save_path() else {
                    tracing::info!("save cancelled");
                    return Ok(());
                };
                match save_image(working, &path) {
                    Ok(()) => tracing::info!(path = %path.display(), "image saved"),
                    Err(e) => tracing::warn!(path = %path.display(), error = %e, "save failed"),
                }
                Ok(())
            }
        }
    }

    /// Start a recording, or finish the running one.
    pub fn toggle_recording(&mut self, prompt: &mut dyn PathPrompt) -> BoothResult<()> {
        if self.recorder.is_some() {
            return self.stop_recording();
        }
        let path = match self.opts.record.path.clone() {
            Some(p) => p,
            None => match prompt.save_path() {
                Some(p) => p,
                None => {
                    tracing::info!("recording cancelled");
                    return Ok(());
                }
            },
        };
        let sink = (self.sink_factory)(&path, &self.opts.record);
        self.recorder = Some(VideoRecorder::with_fps(path, self.opts.record.fps, sink));
        self.dirty = true;
        Ok(())
    }

    /// Finish the running recording, if any.
    pub fn stop_recording(&mut self) -> BoothResult<()> {
        if let Some(mut rec) = self.recorder.take() {
            self.recorded += rec.frames_written();
            rec.close()?;
        }
        Ok(())
    }

    /// Scale the working buffer for display.
    pub fn render(&self) -> BoothResult<Option<DisplayFrame>> {
        let Some(working) = self.working.as_ref() else {
            return Ok(None);
        };
        let layout = &self.opts.layout;
        let (canvas, _) = resize_for_display(working, (layout.frame_w, layout.frame_h))?;
        let viewport = layout.viewport(working.width(), working.height())?;
        Ok(Some(DisplayFrame {
            canvas,
            viewport,
            filter_index: self.filter_index,
            sticker_index: self.sticker_index,
            recording: self.recorder.is_some(),
            detections: self.detections.clone(),
        }))
    }

    /// Drive the session until the source ends, the surface closes, or quit is pressed.
    ///
    /// Each iteration pulls a frame, applies the pending input, then presents (and records) the
    /// result if anything changed.
    #[tracing::instrument(skip_all, fields(mode = ?self.mode))]
    pub fn run(
        &mut self,
        source: &mut dyn FrameSource,
        surface: &mut dyn Surface,
        prompt: &mut dyn PathPrompt,
    ) -> BoothResult<SessionSummary> {
        if source.is_live() != (self.mode == Mode::Camera) {
            return Err(BoothError::validation(format!(
                "{:?} mode cannot run on this frame source",
                self.mode
            )));
        }
        let mut summary = SessionSummary::default();
        let result = self.run_loop(source, surface, prompt, &mut summary);
        let closed = self.stop_recording();
        result?;
        closed?;
        summary.recorded = self.recorded;
        summary.quit = self.quit;
        tracing::info!(
            iterations = summary.iterations,
            frames = summary.frames,
            recorded = summary.recorded,
            "session finished"
        );
        Ok(summary)
    }

    fn run_loop(
        &mut self,
        source: &mut dyn FrameSource,
        surface: &mut dyn Surface,
        prompt: &mut dyn PathPrompt,
        summary: &mut SessionSummary,
    ) -> BoothResult<()> {
        let live = source.is_live();
        while !self.quit {
            match source.next_frame()? {
                Some(frame) => {
                    self.ingest(frame)?;
                    summary.frames += 1;
                }
                None if live => break,
                None => {}
            }
            if self.working.is_none() {
                return Err(BoothError::validation("no image to edit"));
            }

            let Some(events) = surface.poll_events()? else {
                break;
            };
            for ev in &events {
                self.handle_event(ev, prompt)?;
                if self.quit {
                    break;
                }
            }
            if self.quit {
                break;
            }

            if self.dirty {
                self.present(surface)?;
                summary.presented += 1;
            }
            summary.iterations += 1;
        }
        Ok(())
    }

    fn present(&mut self, surface: &mut dyn Surface) -> BoothResult<()> {
        let Some(frame) = self.render()? else {
            return Ok(());
        };
        surface.present(&frame)?;
        let failed = match self.recorder.as_mut() {
            Some(rec) => rec.write(&frame.canvas).err(),
            None => None,
        };
        if let Some(e) = failed {
            tracing::warn!(error = %e, "recording stopped after a write failure");
            if let Some(rec) = self.recorder.take() {
                self.recorded += rec.frames_written();
            }
        }
        self.dirty = false;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/editor.rs"]
mod tests;
