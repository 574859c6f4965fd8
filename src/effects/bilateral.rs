use rayon::prelude::*;

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{BoothError, BoothResult};
use crate::foundation::math::{reflect101, round_clamp_u8};

/// Edge-preserving smoothing over a circular neighbourhood of the given `diameter`.
///
/// Range distance is the L1 distance over the RGB samples. Alpha, when present, is copied
/// through. Borders use reflect-101.
pub fn bilateral_filter(
    src: &PixelBuffer,
    diameter: u32,
    sigma_color: f32,
    sigma_space: f32,
) -> BoothResult<PixelBuffer> {
    if !(sigma_color.is_finite() && sigma_color > 0.0 && sigma_space.is_finite() && sigma_space > 0.0)
    {
        return Err(BoothError::validation(
            "bilateral sigmas must be finite and > 0",
        ));
    }
    let radius = (diameter / 2) as i64;
    if radius == 0 || src.is_empty() {
        return Ok(src.clone());
    }

    let space = space_taps(radius, sigma_space);
    let color_coeff = -0.5 / (sigma_color * sigma_color);
    let color_weight: Vec<f32> = (0..256 * 3)
        .map(|d| ((d * d) as f32 * color_coeff).exp())
        .collect();

    let w = src.width() as usize;
    let h = src.height() as usize;
    let n = src.channels().count();
    let stride = src.stride();
    let data = src.as_raw();

    let mut out = src.clone();
    out.as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            for x in 0..w {
                let centre = &data[y * stride + x * n..y * stride + x * n + 3];
                let mut sum = [0.0f32; 3];
                let mut wsum = 0.0f32;
                for &(dx, dy, ws) in &space {
                    let sx = reflect101(x as i64 + dx, w);
                    let sy = reflect101(y as i64 + dy, h);
                    let p = &data[sy * stride + sx * n..sy * stride + sx * n + 3];
                    let dist = p
                        .iter()
                        .zip(centre)
                        .map(|(&a, &b)| (i32::from(a) - i32::from(b)).unsigned_abs() as usize)
                        .sum::<usize>();
                    let wt = ws * color_weight[dist];
                    for c in 0..3 {
                        sum[c] += wt * f32::from(p[c]);
                    }
                    wsum += wt;
                }
                for c in 0..3 {
                    row_out[x * n + c] = round_clamp_u8(sum[c] / wsum);
                }
            }
        });
    Ok(out)
}

fn space_taps(radius: i64, sigma_space: f32) -> Vec<(i64, i64, f32)> {
    let coeff = -0.5 / (sigma_space * sigma_space);
    let mut taps = Vec::new();
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            let r2 = (dx * dx + dy * dy) as f32;
            if r2.sqrt() > radius as f32 {
                continue;
            }
            taps.push((dx, dy, (r2 * coeff).exp()));
        }
    }
    taps
}

#[cfg(test)]
#[path = "../../tests/unit/effects/bilateral.rs"]
mod tests;
