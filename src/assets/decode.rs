use std::path::Path;

use anyhow::Context;

use crate::foundation::core::{Channels, PixelBuffer};
use crate::foundation::error::{BoothError, BoothResult};

/// Decode an encoded image (any format the `image` crate recognises) into an `Rgb` buffer.
pub fn decode_image(bytes: &[u8]) -> BoothResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgb = dyn_img.to_rgb8();
    let (width, height) = rgb.dimensions();
    PixelBuffer::from_raw(width, height, Channels::Rgb, rgb.into_raw())
}

/// Decode an encoded image keeping its alpha channel when it has one.
pub fn decode_sticker(bytes: &[u8]) -> BoothResult<PixelBuffer> {
    let dyn_img = image::load_from_memory(bytes).context("decode sticker from memory")?;
    from_dynamic(dyn_img)
}

/// Load an image file as a 3-channel working buffer.
pub fn load_image(path: &Path) -> BoothResult<PixelBuffer> {
    let dyn_img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    let rgb = dyn_img.to_rgb8();
    let (width, height) = rgb.dimensions();
    PixelBuffer::from_raw(width, height, Channels::Rgb, rgb.into_raw())
}

/// Load a sticker bitmap; images with an alpha channel load as `Rgba`, others as `Rgb`.
pub fn load_sticker(path: &Path) -> BoothResult<PixelBuffer> {
    let dyn_img =
        image::open(path).with_context(|| format!("open sticker '{}'", path.display()))?;
    from_dynamic(dyn_img)
}

fn from_dynamic(dyn_img: image::DynamicImage) -> BoothResult<PixelBuffer> {
    if dyn_img.color().has_alpha() {
        let rgba = dyn_img.to_rgba8();
        let (w, h) = rgba.dimensions();
        PixelBuffer::from_raw(w, h, Channels::Rgba, rgba.into_raw())
    } else {
        let rgb = dyn_img.to_rgb8();
        let (w, h) = rgb.dimensions();
        PixelBuffer::from_raw(w, h, Channels::Rgb, rgb.into_raw())
    }
}

/// Write `buf` to `path`. The format follows the extension; paths without one are written as PNG.
pub fn save_image(buf: &PixelBuffer, path: &Path) -> BoothResult<()> {
    if buf.is_empty() {
        return Err(BoothError::validation("cannot save an empty image"));
    }
    let (w, h) = buf.dimensions();
    let dyn_img = match buf.channels() {
        Channels::Rgb => image::RgbImage::from_raw(w, h, buf.as_raw().to_vec())
            .map(image::DynamicImage::ImageRgb8),
        Channels::Rgba => image::RgbaImage::from_raw(w, h, buf.as_raw().to_vec())
            .map(image::DynamicImage::ImageRgba8),
    }
    .ok_or_else(|| BoothError::validation("pixel buffer does not match its dimensions"))?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    let has_ext = path.extension().is_some_and(|e| !e.is_empty());
    let res = if has_ext {
        dyn_img.save(path)
    } else {
        dyn_img.save_with_format(path, image::ImageFormat::Png)
    };
    res.with_context(|| format!("write image '{}'", path.display()))?;
    Ok(())
}
