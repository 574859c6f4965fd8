use rayon::prelude::*;

use crate::foundation::core::PixelBuffer;
use crate::foundation::error::{BoothError, BoothResult};
use crate::foundation::math::{q16_to_u8, reflect101};

/// Sigma used when a Gaussian is requested with `sigma <= 0` ("auto"), derived from the kernel
/// size the same way common imaging libraries do.
pub fn auto_sigma(ksize: u32) -> f32 {
    0.3 * ((ksize as f32 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Separable Gaussian blur with an odd `ksize x ksize` kernel and reflect-101 borders.
///
/// Every channel (alpha included) is filtered. Output has the same layout as `src`.
pub fn gaussian_blur(src: &PixelBuffer, ksize: u32, sigma: f32) -> BoothResult<PixelBuffer> {
    if ksize == 0 || ksize.is_multiple_of(2) {
        return Err(BoothError::validation("blur kernel size must be odd and > 0"));
    }
    if ksize == 1 || src.is_empty() {
        return Ok(src.clone());
    }
    let sigma = if sigma > 0.0 { sigma } else { auto_sigma(ksize) };
    let kernel = gaussian_kernel_q16(ksize / 2, sigma)?;

    let mut tmp = src.clone();
    let mut out = src.clone();
    horizontal_pass(src, &mut tmp, &kernel);
    vertical_pass(&tmp, &mut out, &kernel);
    Ok(out)
}

fn gaussian_kernel_q16(radius: u32, sigma: f32) -> BoothResult<Vec<u32>> {
    if radius == 0 {
        return Ok(vec![1 << 16]);
    }
    if !sigma.is_finite() || sigma <= 0.0 {
        return Err(BoothError::validation("blur sigma must be > 0"));
    }

    let r = radius as i32;
    let mut weights_f = Vec::<f64>::with_capacity((2 * r + 1) as usize);
    let mut sum = 0.0f64;
    let sigma = sigma as f64;
    let denom = 2.0 * sigma * sigma;
    for i in -r..=r {
        let x = i as f64;
        let w = (-x * x / denom).exp();
        weights_f.push(w);
        sum += w;
    }
    if sum <= 0.0 {
        return Err(BoothError::validation("gaussian kernel sum is zero"));
    }

    let mut weights = Vec::<u32>::with_capacity(weights_f.len());
    let mut acc: i64 = 0;
    for &wf in &weights_f {
        let q = ((wf / sum) * 65536.0).round() as i64;
        let q = q.clamp(0, 65536);
        weights.push(q as u32);
        acc += q;
    }
    // Fold the rounding residue into the centre tap so flat regions stay exact.
    let delta = 65536i64 - acc;
    if delta != 0 {
        let mid = weights.len() / 2;
        let new_mid = (i64::from(weights[mid]) + delta).clamp(0, 65536);
        weights[mid] = new_mid as u32;
    }

    Ok(weights)
}

fn horizontal_pass(src: &PixelBuffer, dst: &mut PixelBuffer, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let w = src.width() as usize;
    let n = src.channels().count();
    let stride = src.stride();
    let src = src.as_raw();

    dst.as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            let row = &src[y * stride..(y + 1) * stride];
            for x in 0..w {
                let mut acc = [0u64; 4];
                for (ki, &kw) in k.iter().enumerate() {
                    let sx = reflect101(x as i64 + ki as i64 - radius, w);
                    let idx = sx * n;
                    for c in 0..n {
                        acc[c] += u64::from(kw) * u64::from(row[idx + c]);
                    }
                }
                for c in 0..n {
                    row_out[x * n + c] = q16_to_u8(acc[c]);
                }
            }
        });
}

fn vertical_pass(src: &PixelBuffer, dst: &mut PixelBuffer, k: &[u32]) {
    let radius = (k.len() / 2) as i64;
    let h = src.height() as usize;
    let stride = src.stride();
    let src = src.as_raw();

    dst.as_raw_mut()
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(y, row_out)| {
            for (i, out) in row_out.iter_mut().enumerate() {
                let mut acc = 0u64;
                for (ki, &kw) in k.iter().enumerate() {
                    let sy = reflect101(y as i64 + ki as i64 - radius, h);
                    acc += u64::from(kw) * u64::from(src[sy * stride + i]);
                }
                *out = q16_to_u8(acc);
            }
        });
}

#[cfg(test)]
#[path = "../../tests/unit/effects/blur.rs"]
mod tests;
