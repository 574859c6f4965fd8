use crate::foundation::core::PixelBuffer;
use crate::foundation::math::{luma_u8, round_clamp_u8};

/// Fixed 256-entry colour ramps used by the pseudo-colour filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorRamp {
    /// Sepia-tinted ramp: `sqrt((2*grey + hot) / 3)` per channel.
    Pink,
    /// Red → yellow → green → blue → violet.
    Rainbow,
}

impl ColorRamp {
    /// Build the ramp's lookup table (index = grey level).
    pub fn table(self) -> [[u8; 3]; 256] {
        let mut lut = [[0u8; 3]; 256];
        for (i, entry) in lut.iter_mut().enumerate() {
            let x = i as f32 / 255.0;
            let rgb = match self {
                Self::Pink => pink(x),
                Self::Rainbow => rainbow(x),
            };
            *entry = rgb.map(|v| round_clamp_u8(v * 255.0));
        }
        lut
    }
}

/// Map every pixel's luma through `ramp`. Alpha, when present, is kept.
pub fn apply_color_ramp(src: &PixelBuffer, ramp: ColorRamp) -> PixelBuffer {
    let lut = ramp.table();
    let n = src.channels().count();
    let mut out = src.clone();
    for px in out.as_raw_mut().chunks_exact_mut(n) {
        let y = luma_u8(px[0], px[1], px[2]);
        px[..3].copy_from_slice(&lut[y as usize]);
    }
    out
}

fn hot(x: f32) -> [f32; 3] {
    [
        (x * 8.0 / 3.0).clamp(0.0, 1.0),
        ((x - 3.0 / 8.0) * 8.0 / 3.0).clamp(0.0, 1.0),
        ((x - 3.0 / 4.0) * 4.0).clamp(0.0, 1.0),
    ]
}

fn pink(x: f32) -> [f32; 3] {
    hot(x).map(|h| ((2.0 * x + h) / 3.0).sqrt())
}

fn rainbow(x: f32) -> [f32; 3] {
    let r = if x < 0.4 {
        1.0
    } else if x < 0.6 {
        -5.0 * x + 3.0
    } else if x >= 0.8 {
        10.0 / 3.0 * x - 8.0 / 3.0
    } else {
        0.0
    };
    let g = if x < 0.4 {
        2.5 * x
    } else if x < 0.6 {
        1.0
    } else if x < 0.8 {
        -5.0 * x + 4.0
    } else {
        0.0
    };
    let b = if (0.6..0.8).contains(&x) {
        5.0 * x - 3.0
    } else if x >= 0.8 {
        1.0
    } else {
        0.0
    };
    [r, g, b]
}

#[cfg(test)]
#[path = "../../tests/unit/effects/colormap.rs"]
mod tests;
