use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::assets::decode::load_sticker;
use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{BoothError, BoothResult};
use crate::layout::viewport::resize;

/// On-screen edge length of sticker thumbnails in the sticker bar.
pub const THUMB_SIZE: u32 = 80;

/// Default sticker set, in bar order. Each loads from `<dir>/<name>.png`.
pub const DEFAULT_STICKERS: [&str; 6] = ["eyeglasses", "hat", "star", "tree", "moose", "nativity"];

/// A named sticker bitmap.
#[derive(Clone, Debug)]
pub struct Sticker {
    /// Display name.
    pub name: String,
    /// `Rgba` (masked) or `Rgb` (opaque) pixels.
    pub bitmap: Arc<PixelBuffer>,
}

/// One entry of a sticker manifest file.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ManifestEntry {
    /// Display name.
    pub name: String,
    /// Bitmap path, relative to the manifest's directory unless absolute.
    pub path: PathBuf,
}

/// Ordered, read-only collection of sticker bitmaps.
#[derive(Clone, Debug, Default)]
pub struct StickerSheet {
    stickers: Vec<Sticker>,
}

impl StickerSheet {
    /// Wrap already-decoded stickers.
    pub fn new(stickers: Vec<Sticker>) -> Self {
        Self { stickers }
    }

    /// Load the default set from `dir`. A missing or undecodable file is fatal.
    #[tracing::instrument(skip_all, fields(dir = %dir.display()))]
    pub fn load_dir(dir: &Path) -> BoothResult<Self> {
        let entries: Vec<ManifestEntry> = DEFAULT_STICKERS
            .iter()
            .map(|name| ManifestEntry {
                name: (*name).to_string(),
                path: PathBuf::from(format!("{name}.png")),
            })
            .collect();
        Self::load_entries(dir, &entries)
    }

    /// Load stickers listed in a JSON manifest (`[{"name": .., "path": ..}, ..]`).
    #[tracing::instrument(skip_all, fields(manifest = %path.display()))]
    pub fn load_manifest(path: &Path) -> BoothResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            BoothError::asset(format!("read sticker manifest '{}': {e}", path.display()))
        })?;
        let entries: Vec<ManifestEntry> = serde_json::from_str(&text).map_err(|e| {
            BoothError::asset(format!("parse sticker manifest '{}': {e}", path.display()))
        })?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Self::load_entries(base, &entries)
    }

    /// Load from a directory or, when `path` is a file, from a manifest.
    pub fn load(path: &Path) -> BoothResult<Self> {
        if path.is_dir() {
            Self::load_dir(path)
        } else {
            Self::load_manifest(path)
        }
    }

    fn load_entries(base: &Path, entries: &[ManifestEntry]) -> BoothResult<Self> {
        let mut stickers = Vec::with_capacity(entries.len());
        for e in entries {
            let full = if e.path.is_absolute() {
                e.path.clone()
            } else {
                base.join(&e.path)
            };
            let bitmap = load_sticker(&full).map_err(|err| {
                BoothError::asset(format!(
                    "sticker '{}' ({}): {err}",
                    e.name,
                    full.display()
                ))
            })?;
            tracing::debug!(
                name = %e.name,
                width = bitmap.width(),
                height = bitmap.height(),
                "loaded sticker"
            );
            stickers.push(Sticker {
                name: e.name.clone(),
                bitmap: Arc::new(bitmap),
            });
        }
        Ok(Self { stickers })
    }

    /// Number of stickers.
    pub fn len(&self) -> usize {
        self.stickers.len()
    }

    /// Return `true` when no sticker is loaded.
    pub fn is_empty(&self) -> bool {
        self.stickers.is_empty()
    }

    /// Sticker at `index`.
    pub fn get(&self, index: usize) -> Option<&Sticker> {
        self.stickers.get(index)
    }

    /// Bitmap at `index`.
    pub fn bitmap(&self, index: usize) -> Option<&PixelBuffer> {
        self.stickers.get(index).map(|s| s.bitmap.as_ref())
    }

    /// Bitmap at `index` scaled to a `THUMB_SIZE` square for the sticker bar.
    pub fn thumbnail(&self, index: usize) -> BoothResult<Option<PixelBuffer>> {
        self.bitmap(index)
            .map(|b| resize(b, THUMB_SIZE, THUMB_SIZE))
            .transpose()
    }

    /// Names in order.
    pub fn names(&self) -> Vec<&str> {
        self.stickers.iter().map(|s| s.name.as_str()).collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/store.rs"]
mod tests;
