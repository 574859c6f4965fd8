use crate::foundation::core::{Channels, PixelBuffer};
use crate::foundation::error::{BoothError, BoothResult};

/// Uniform scale that fits `img` inside `frame`, and the displayed size it produces.
///
/// `scale = min(frame_w / img_w, frame_h / img_h)`, displayed sizes are floored.
pub fn scale_to_fit(img_w: u32, img_h: u32, frame_w: u32, frame_h: u32) -> BoothResult<(f64, u32, u32)> {
    if img_w == 0 || img_h == 0 {
        return Err(BoothError::validation("cannot fit an empty image"));
    }
    if frame_w == 0 || frame_h == 0 {
        return Err(BoothError::validation("display frame must be non-empty"));
    }
    let scale = (f64::from(frame_w) / f64::from(img_w)).min(f64::from(frame_h) / f64::from(img_h));
    let disp_w = (f64::from(img_w) * scale).floor() as u32;
    let disp_h = (f64::from(img_h) * scale).floor() as u32;
    Ok((scale, disp_w, disp_h))
}

/// Placement of the scaled canvas inside the window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Model-to-display scale.
    pub scale: f64,
    /// Displayed canvas width.
    pub disp_w: u32,
    /// Displayed canvas height.
    pub disp_h: u32,
    /// Canvas left edge in window coordinates.
    pub x_off: i64,
    /// Canvas top edge in window coordinates.
    pub y_off: i64,
}

impl Viewport {
    /// Fit an `img_w x img_h` model into `frame`, centred horizontally in a `window_w` wide
    /// window and placed `y_off` pixels from the top.
    pub fn fit(
        img_w: u32,
        img_h: u32,
        frame: (u32, u32),
        window_w: u32,
        y_off: u32,
    ) -> BoothResult<Self> {
        let (scale, disp_w, disp_h) = scale_to_fit(img_w, img_h, frame.0, frame.1)?;
        Ok(Self {
            scale,
            disp_w,
            disp_h,
            x_off: (i64::from(window_w) - i64::from(disp_w)) / 2,
            y_off: i64::from(y_off),
        })
    }

    /// Map a window point to model coordinates (floored; may fall outside the model).
    pub fn to_model(&self, px: i64, py: i64) -> (i64, i64) {
        let mx = ((px - self.x_off) as f64 / self.scale).floor() as i64;
        let my = ((py - self.y_off) as f64 / self.scale).floor() as i64;
        (mx, my)
    }

    /// Map a model point to window coordinates (floored).
    pub fn to_display(&self, mx: i64, my: i64) -> (i64, i64) {
        let px = (mx as f64 * self.scale).floor() as i64 + self.x_off;
        let py = (my as f64 * self.scale).floor() as i64 + self.y_off;
        (px, py)
    }

    /// Return `true` when a window point lies on the displayed canvas.
    pub fn contains(&self, px: i64, py: i64) -> bool {
        px >= self.x_off
            && px < self.x_off + i64::from(self.disp_w)
            && py >= self.y_off
            && py < self.y_off + i64::from(self.disp_h)
    }
}

/// Resample `src` to `width x height` with bilinear (triangle) filtering.
pub fn resize(src: &PixelBuffer, width: u32, height: u32) -> BoothResult<PixelBuffer> {
    if src.dimensions() == (width, height) {
        return Ok(src.clone());
    }
    if src.is_empty() || width == 0 || height == 0 {
        return Ok(PixelBuffer::new(width, height, src.channels()));
    }
    let (w, h) = src.dimensions();
    let filter = image::imageops::FilterType::Triangle;
    match src.channels() {
        Channels::Rgb => {
            let img = image::RgbImage::from_raw(w, h, src.as_raw().to_vec())
                .ok_or_else(|| BoothError::validation("pixel buffer does not match its dimensions"))?;
            let out = image::imageops::resize(&img, width, height, filter);
            PixelBuffer::from_raw(width, height, Channels::Rgb, out.into_raw())
        }
        Channels::Rgba => {
            let img = image::RgbaImage::from_raw(w, h, src.as_raw().to_vec())
                .ok_or_else(|| BoothError::validation("pixel buffer does not match its dimensions"))?;
            let out = image::imageops::resize(&img, width, height, filter);
            PixelBuffer::from_raw(width, height, Channels::Rgba, out.into_raw())
        }
    }
}

/// Scale `src` to fit `frame`, returning the displayed buffer and its scale.
pub fn resize_for_display(src: &PixelBuffer, frame: (u32, u32)) -> BoothResult<(PixelBuffer, f64)> {
    let (scale, disp_w, disp_h) = scale_to_fit(src.width(), src.height(), frame.0, frame.1)?;
    Ok((resize(src, disp_w, disp_h)?, scale))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/viewport.rs"]
mod tests;
