use image::GrayImage;

use crate::foundation::core::{PixelBuffer, Rect};
use crate::foundation::math::luma_u8;

/// Outline thickness in pixels.
pub const OUTLINE_WIDTH: u32 = 2;

/// Kind of detected region, which selects its outline colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// Face.
    Face,
    /// Eye, found inside a face.
    Eye,
    /// Smile, found inside a face.
    Smile,
}

impl RegionKind {
    /// Outline colour (RGB).
    pub fn color(self) -> [u8; 3] {
        match self {
            Self::Face => [0, 255, 0],
            Self::Eye => [0, 0, 255],
            Self::Smile => [255, 255, 0],
        }
    }
}

/// A rectangle reported by a classifier, in frame coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DetectionRegion {
    /// Region kind.
    pub kind: RegionKind,
    /// Bounds in frame pixels.
    pub rect: Rect,
}

/// External object classifier.
///
/// Receives an equalized grayscale image and returns rectangles in that image's coordinates.
pub trait RegionClassifier: Send + Sync {
    /// Detect regions in `gray`.
    fn detect(&self, gray: &GrayImage) -> Vec<Rect>;
}

/// Face detector with optional nested eye and smile detectors.
///
/// Outlines are drawn straight onto the frame; nothing is remembered between frames.
pub struct DetectionOverlay {
    face: Box<dyn RegionClassifier>,
    eye: Option<Box<dyn RegionClassifier>>,
    smile: Option<Box<dyn RegionClassifier>>,
}

impl std::fmt::Debug for DetectionOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetectionOverlay")
            .field("eye", &self.eye.is_some())
            .field("smile", &self.smile.is_some())
            .finish_non_exhaustive()
    }
}

impl DetectionOverlay {
    /// Overlay that only looks for faces.
    pub fn new(face: Box<dyn RegionClassifier>) -> Self {
        Self {
            face,
            eye: None,
            smile: None,
        }
    }

    /// Also look for eyes inside each face.
    pub fn with_eyes(mut self, eye: Box<dyn RegionClassifier>) -> Self {
        self.eye = Some(eye);
        self
    }

    /// Also look for smiles inside each face.
    pub fn with_smiles(mut self, smile: Box<dyn RegionClassifier>) -> Self {
        self.smile = Some(smile);
        self
    }

    /// Run the classifiers on `frame` and return every region found, faces first.
    pub fn detect(&self, frame: &PixelBuffer) -> Vec<DetectionRegion> {
        let gray = equalize(&to_gray(frame));
        let bounds = Rect::new(0, 0, gray.width(), gray.height());
        let mut out = Vec::new();
        for face in self.face.detect(&gray) {
            let Some(face) = face.intersect(bounds) else {
                continue;
            };
            out.push(DetectionRegion {
                kind: RegionKind::Face,
                rect: face,
            });
            let roi = image::imageops::crop_imm(
                &gray,
                face.x as u32,
                face.y as u32,
                face.width,
                face.height,
            )
            .to_image();
            for (kind, clf) in [(RegionKind::Eye, &self.eye), (RegionKind::Smile, &self.smile)] {
                let Some(clf) = clf else { continue };
                for r in clf.detect(&roi) {
                    if let Some(rect) = r.offset(face.x, face.y).intersect(face) {
                        out.push(DetectionRegion { kind, rect });
                    }
                }
            }
        }
        out
    }

    /// Detect and outline regions on `frame` in place.
    pub fn annotate(&self, frame: &mut PixelBuffer) -> Vec<DetectionRegion> {
        let regions = self.detect(frame);
        for r in &regions {
            draw_outline(frame, r.rect, r.kind.color(), OUTLINE_WIDTH);
        }
        if !regions.is_empty() {
            tracing::trace!(count = regions.len(), "detections drawn");
        }
        regions
    }
}

/// Luma copy of `frame`.
pub fn to_gray(frame: &PixelBuffer) -> GrayImage {
    let n = frame.channels().count();
    let data = frame
        .as_raw()
        .chunks_exact(n)
        .map(|p| luma_u8(p[0], p[1], p[2]))
        .collect();
    GrayImage::from_raw(frame.width(), frame.height(), data)
        .unwrap_or_else(|| GrayImage::new(frame.width(), frame.height()))
}

/// Histogram equalization (cumulative distribution remap).
pub fn equalize(gray: &GrayImage) -> GrayImage {
    let mut hist = [0u64; 256];
    for &v in gray.as_raw() {
        hist[v as usize] += 1;
    }
    let total: u64 = hist.iter().sum();
    let mut out = gray.clone();
    let Some(first) = hist.iter().position(|&c| c > 0) else {
        return out;
    };
    let cdf_min = hist[first];
    if total == cdf_min {
        return out;
    }
    let scale = 255.0 / (total - cdf_min) as f64;
    let mut lut = [0u8; 256];
    let mut acc = 0u64;
    for (i, &c) in hist.iter().enumerate() {
        acc += c;
        if i >= first {
            lut[i] = ((acc - cdf_min) as f64 * scale).round().min(255.0) as u8;
        }
    }
    for v in out.iter_mut() {
        *v = lut[*v as usize];
    }
    out
}

/// Stroke the inside edge of `rect` with `thickness` pixels of `color`, clipped to the frame.
pub fn draw_outline(frame: &mut PixelBuffer, rect: Rect, color: [u8; 3], thickness: u32) {
    let Some(clip) = rect.intersect(frame.bounds()) else {
        return;
    };
    let t = i64::from(thickness);
    for y in clip.y..clip.bottom() {
        for x in clip.x..clip.right() {
            let on_edge = x - rect.x < t
                || rect.right() - 1 - x < t
                || y - rect.y < t
                || rect.bottom() - 1 - y < t;
            if on_edge && let Some(px) = frame.pixel_mut(x as u32, y as u32) {
                px[..3].copy_from_slice(&color);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/detect.rs"]
mod tests;
