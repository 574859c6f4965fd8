use crate::foundation::core::{PixelBuffer, Rect};

/// What to do when a sticker extends past the background's right or bottom edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Write the in-bounds part of the sticker.
    #[default]
    Clip,
    /// Skip placements that do not fit entirely.
    Skip,
}

/// Stamp `sticker` onto `bg` with its top-left corner at `(x, y)`, clipping to `bg`.
///
/// See [`composite_with`].
pub fn composite(bg: &mut PixelBuffer, sticker: &PixelBuffer, x: i64, y: i64) -> Option<Rect> {
    composite_with(bg, sticker, x, y, BoundaryPolicy::Clip)
}

/// Stamp `sticker` onto `bg` using a binary alpha mask.
///
/// Sticker pixels with alpha exactly 255 replace the background colour; every other pixel leaves
/// the background untouched. An `Rgb` sticker is fully opaque. The background's own alpha, if any,
/// is never written.
///
/// Negative origins, empty stickers, and placements entirely outside `bg` change nothing.
/// Returns the background region that was considered for writing.
pub fn composite_with(
    bg: &mut PixelBuffer,
    sticker: &PixelBuffer,
    x: i64,
    y: i64,
    policy: BoundaryPolicy,
) -> Option<Rect> {
    if x < 0 || y < 0 || sticker.is_empty() || bg.is_empty() {
        return None;
    }
    let placed = Rect::new(x, y, sticker.width(), sticker.height());
    let region = placed.intersect(bg.bounds())?;
    if policy == BoundaryPolicy::Skip && region != placed {
        return None;
    }

    let sn = sticker.channels().count();
    let bn = bg.channels().count();
    let has_alpha = sticker.channels().has_alpha();
    let s_stride = sticker.stride();
    let b_stride = bg.stride();
    let src = sticker.as_raw();
    let dst = bg.as_raw_mut();

    for row in 0..region.height as usize {
        let s_row = &src[row * s_stride..row * s_stride + region.width as usize * sn];
        let b_off = (region.y as usize + row) * b_stride + region.x as usize * bn;
        let b_row = &mut dst[b_off..b_off + region.width as usize * bn];
        for (d, s) in b_row.chunks_exact_mut(bn).zip(s_row.chunks_exact(sn)) {
            if is_opaque(s, has_alpha) {
                d[..3].copy_from_slice(&s[..3]);
            }
        }
    }
    Some(region)
}

fn is_opaque(px: &[u8], has_alpha: bool) -> bool {
    !has_alpha || px[3] == 255
}

#[cfg(test)]
#[path = "../../tests/unit/effects/composite.rs"]
mod tests;
