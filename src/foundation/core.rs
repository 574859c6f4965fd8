use crate::foundation::error::{BoothError, BoothResult};

/// Sample layout of a [`PixelBuffer`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Channels {
    /// Three interleaved samples per pixel: red, green, blue.
    Rgb,
    /// Four interleaved samples per pixel: red, green, blue, straight alpha.
    Rgba,
}

impl Channels {
    /// Number of samples per pixel.
    pub fn count(self) -> usize {
        match self {
            Self::Rgb => 3,
            Self::Rgba => 4,
        }
    }

    /// Return `true` when the layout carries an alpha channel.
    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Rgba)
    }
}

/// Dense row-major 8-bit raster.
///
/// Frames and working images are `Rgb`; sticker bitmaps may be `Rgba`. Buffers are plain values:
/// cloning is a deep copy, which is what undo snapshots rely on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zero-filled buffer.
    pub fn new(width: u32, height: u32, channels: Channels) -> Self {
        let len = (width as usize) * (height as usize) * channels.count();
        Self {
            width,
            height,
            channels,
            data: vec![0u8; len],
        }
    }

    /// Allocate a buffer where every pixel equals `px`.
    ///
    /// `px.len()` selects the layout (3 or 4 samples).
    pub fn filled(width: u32, height: u32, px: &[u8]) -> BoothResult<Self> {
        let channels = match px.len() {
            3 => Channels::Rgb,
            4 => Channels::Rgba,
            n => {
                return Err(BoothError::validation(format!(
                    "fill pixel must have 3 or 4 samples, got {n}"
                )));
            }
        };
        let data = px.repeat((width as usize) * (height as usize));
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Wrap raw interleaved samples, validating the length.
    pub fn from_raw(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> BoothResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(channels.count()))
            .ok_or_else(|| BoothError::validation("pixel buffer size overflow"))?;
        if data.len() != expected {
            return Err(BoothError::validation(format!(
                "pixel buffer expects {expected} bytes for {width}x{height}x{}, got {}",
                channels.count(),
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Sample layout.
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// Return `true` when the buffer has no pixels.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Raw interleaved samples.
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Mutable raw interleaved samples.
    pub fn as_raw_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consume the buffer and return the raw samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width as usize * self.channels.count()
    }

    /// Samples of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let n = self.channels.count();
        let off = (y as usize) * self.stride() + (x as usize) * n;
        Some(&self.data[off..off + n])
    }

    /// Mutable samples of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let n = self.channels.count();
        let off = (y as usize) * self.stride() + (x as usize) * n;
        Some(&mut self.data[off..off + n])
    }

    /// Copy the `rect` region into a new buffer with the same layout.
    ///
    /// The rect is intersected with the buffer bounds first.
    pub fn crop(&self, rect: Rect) -> PixelBuffer {
        let Some(r) = rect.intersect(self.bounds()) else {
            return PixelBuffer::new(0, 0, self.channels);
        };
        let n = self.channels.count();
        let row_len = r.width as usize * n;
        let mut data = Vec::with_capacity(row_len * r.height as usize);
        for y in r.y..r.y + r.height as i64 {
            let off = (y as usize) * self.stride() + (r.x as usize) * n;
            data.extend_from_slice(&self.data[off..off + row_len]);
        }
        PixelBuffer {
            width: r.width,
            height: r.height,
            channels: self.channels,
            data,
        }
    }

    /// Full-buffer rectangle at the origin.
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// Drop the alpha channel (no-op copy for `Rgb`).
    pub fn to_rgb(&self) -> PixelBuffer {
        match self.channels {
            Channels::Rgb => self.clone(),
            Channels::Rgba => {
                let mut data = Vec::with_capacity(self.data.len() / 4 * 3);
                for px in self.data.chunks_exact(4) {
                    data.extend_from_slice(&px[..3]);
                }
                PixelBuffer {
                    width: self.width,
                    height: self.height,
                    channels: Channels::Rgb,
                    data,
                }
            }
        }
    }
}

/// Axis-aligned integer rectangle in pixel space.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i64,
    /// Top edge (inclusive).
    pub y: i64,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Create a rectangle.
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (exclusive).
    pub fn right(self) -> i64 {
        self.x + i64::from(self.width)
    }

    /// Bottom edge (exclusive).
    pub fn bottom(self) -> i64 {
        self.y + i64::from(self.height)
    }

    /// Return `true` when the rectangle covers no pixels.
    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Return `true` when `(px, py)` lies inside `[x, right) x [y, bottom)`.
    pub fn contains(self, px: i64, py: i64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Overlap of two rectangles, `None` when disjoint.
    pub fn intersect(self, other: Rect) -> Option<Rect> {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(Rect::new(x0, y0, (x1 - x0) as u32, (y1 - y0) as u32))
    }

    /// Translate by `(dx, dy)`.
    pub fn offset(self, dx: i64, dy: i64) -> Rect {
        Rect::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
