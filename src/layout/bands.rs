use crate::layout::viewport::Viewport;

/// Window geometry: four stacked horizontal bands.
///
/// From the top: sticker bar, canvas (as tall as the displayed image), filter bar, button bar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BandLayout {
    /// Window width.
    pub window_w: u32,
    /// Window height.
    pub window_h: u32,
    /// Width of the area the canvas is fitted into.
    pub frame_w: u32,
    /// Height of the area the canvas is fitted into.
    pub frame_h: u32,
    /// Sticker bar height.
    pub sticker_bar_h: u32,
    /// Width of one sticker cell.
    pub sticker_cell_w: u32,
    /// Filter bar height.
    pub filter_bar_h: u32,
    /// Button bar height.
    pub button_bar_h: u32,
    /// Width of the Save and Undo buttons.
    pub button_w: u32,
    /// Distance of each button from the window centre line.
    pub button_gap: u32,
}

impl Default for BandLayout {
    fn default() -> Self {
        Self {
            window_w: 1366,
            window_h: 768,
            frame_w: 768,
            frame_h: 432,
            sticker_bar_h: 100,
            sticker_cell_w: 90,
            filter_bar_h: 100,
            button_bar_h: 50,
            button_w: 200,
            button_gap: 20,
        }
    }
}

/// What a pointer-down landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hit {
    /// Sticker bar cell.
    Sticker(usize),
    /// Displayed canvas, in model coordinates.
    Canvas {
        /// Model x.
        x: i64,
        /// Model y.
        y: i64,
    },
    /// Filter bar cell.
    Filter(usize),
    /// Save button.
    Save,
    /// Undo button.
    Undo,
    /// Anything else.
    Nothing,
}

impl BandLayout {
    /// Fit a model of `img_w x img_h` into this layout's canvas band.
    pub fn viewport(&self, img_w: u32, img_h: u32) -> crate::BoothResult<Viewport> {
        Viewport::fit(
            img_w,
            img_h,
            (self.frame_w, self.frame_h),
            self.window_w,
            self.sticker_bar_h,
        )
    }

    /// Width of one filter cell for a bar holding `filter_count` entries.
    pub fn filter_cell_w(&self, filter_count: usize) -> u32 {
        let n = u32::try_from(filter_count.max(1)).unwrap_or(u32::MAX);
        (self.window_w / n).max(1)
    }

    /// Left edges of the Save and Undo buttons.
    pub fn button_xs(&self) -> (i64, i64) {
        let mid = i64::from(self.window_w / 2);
        let save = mid - i64::from(self.button_w) - i64::from(self.button_gap);
        let undo = mid + i64::from(self.button_gap);
        (save, undo)
    }

    /// Classify a window point.
    ///
    /// Bands are half-open `[top, top + height)`. Bar indices at or beyond the item count hit
    /// nothing.
    pub fn hit_test(
        &self,
        px: i64,
        py: i64,
        vp: &Viewport,
        sticker_count: usize,
        filter_count: usize,
    ) -> Hit {
        if px < 0 || px >= i64::from(self.window_w) || py < 0 {
            return Hit::Nothing;
        }
        let canvas_top = i64::from(self.sticker_bar_h);
        let filter_top = canvas_top + i64::from(vp.disp_h);
        let button_top = filter_top + i64::from(self.filter_bar_h);
        let bottom = button_top + i64::from(self.button_bar_h);

        if py < canvas_top {
            let idx = (px / i64::from(self.sticker_cell_w.max(1))) as usize;
            return if idx < sticker_count {
                Hit::Sticker(idx)
            } else {
                Hit::Nothing
            };
        }
        if py < filter_top {
            if !vp.contains(px, py) {
                return Hit::Nothing;
            }
            let (x, y) = vp.to_model(px, py);
            return Hit::Canvas { x, y };
        }
        if py < button_top {
            let idx = (px / i64::from(self.filter_cell_w(filter_count))) as usize;
            return if idx < filter_count {
                Hit::Filter(idx)
            } else {
                Hit::Nothing
            };
        }
        if py < bottom {
            let (save, undo) = self.button_xs();
            let w = i64::from(self.button_w);
            if (save..save + w).contains(&px) {
                return Hit::Save;
            }
            if (undo..undo + w).contains(&px) {
                return Hit::Undo;
            }
        }
        Hit::Nothing
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/bands.rs"]
mod tests;
