/// BT.601 luma in 14-bit fixed point, rounded.
pub(crate) fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    const R: u32 = 4899;
    const G: u32 = 9617;
    const B: u32 = 1868;
    let y = (u32::from(r) * R + u32::from(g) * G + u32::from(b) * B + (1 << 13)) >> 14;
    y.min(255) as u8
}

/// Round half away from zero and saturate into `[0, 255]`.
pub(crate) fn round_clamp_u8(v: f32) -> u8 {
    if !v.is_finite() || v <= 0.0 {
        return 0;
    }
    v.round().min(255.0) as u8
}

/// Mirror an out-of-range index back into `[0, len)` without repeating the edge sample
/// (`gfedcb|abcdefgh|gfedcba`).
pub(crate) fn reflect101(i: i64, len: usize) -> usize {
    let n = len as i64;
    if n <= 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let mut m = i.rem_euclid(period);
    if m >= n {
        m = period - m;
    }
    m as usize
}

pub(crate) fn q16_to_u8(acc: u64) -> u8 {
    let v = (acc + 32768) >> 16;
    (v.min(255)) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
