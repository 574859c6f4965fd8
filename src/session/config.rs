use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::effects::composite::BoundaryPolicy;
use crate::effects::filters::{CatalogPreset, FilterCatalog};
use crate::encode::ffmpeg::VideoCodec;
use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::bands::BandLayout;
use crate::source::camera::CameraOpts;

/// Recording settings.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RecordOpts {
    /// Output path. When unset the save prompt is asked.
    pub path: Option<PathBuf>,
    /// Frames per second.
    pub fps: u32,
    /// Video codec.
    pub codec: VideoCodec,
}

impl Default for RecordOpts {
    fn default() -> Self {
        Self {
            path: None,
            fps: crate::encode::sink::RECORD_FPS,
            codec: VideoCodec::default(),
        }
    }
}

/// Editor configuration. Every field has a default, so a config file may set any subset.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct EditorOpts {
    /// Window band geometry.
    pub layout: BandLayout,
    /// Filter catalog preset.
    pub catalog: CatalogPreset,
    /// Keep only the first `n` filters of the preset.
    pub filter_count: Option<usize>,
    /// What to do with stickers crossing the image edge.
    pub boundary: BoundaryPolicy,
    /// Maximum number of undo snapshots, counting the initial image (unbounded when unset).
    pub history_limit: Option<usize>,
    /// Recording settings.
    pub record: RecordOpts,
    /// Camera device settings.
    pub camera: CameraOpts,
}

impl EditorOpts {
    /// Parse options from JSON text.
    pub fn from_json_str(text: &str) -> BoothResult<Self> {
        let opts: Self = serde_json::from_str(text)
            .map_err(|e| BoothError::validation(format!("invalid editor config: {e}")))?;
        opts.validate()?;
        Ok(opts)
    }

    /// Load options from a JSON file.
    pub fn from_json_file(path: &Path) -> BoothResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Reject geometry and rates the editor cannot work with.
    pub fn validate(&self) -> BoothResult<()> {
        let l = &self.layout;
        if l.window_w == 0 || l.frame_w == 0 || l.frame_h == 0 {
            return Err(BoothError::validation(
                "layout window and frame sizes must be non-zero",
            ));
        }
        if l.sticker_cell_w == 0 {
            return Err(BoothError::validation("layout.sticker_cell_w must be > 0"));
        }
        if self.filter_count == Some(0) {
            return Err(BoothError::validation("filter_count must be >= 1"));
        }
        if self.history_limit.is_some_and(|n| n < 2) {
            return Err(BoothError::validation(
                "history_limit must be >= 2 (the initial image is always kept)",
            ));
        }
        if self.record.fps == 0 {
            return Err(BoothError::validation("record.fps must be > 0"));
        }
        Ok(())
    }

    /// Build the configured filter catalog.
    pub fn filter_catalog(&self) -> FilterCatalog {
        let mut catalog = FilterCatalog::preset(self.catalog);
        if let Some(n) = self.filter_count {
            catalog.truncate(n);
        }
        catalog
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
