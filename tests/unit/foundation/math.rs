use super::*;

#[test]
fn luma_of_grey_is_identity() {
    for v in [0u8, 1, 77, 128, 254, 255] {
        assert_eq!(luma_u8(v, v, v), v);
    }
}

#[test]
fn luma_weights_green_heaviest() {
    assert_eq!(luma_u8(255, 0, 0), 76);
    assert_eq!(luma_u8(0, 255, 0), 150);
    assert_eq!(luma_u8(0, 0, 255), 29);
}

#[test]
fn round_clamp_saturates() {
    assert_eq!(round_clamp_u8(-3.0), 0);
    assert_eq!(round_clamp_u8(f32::NAN), 0);
    assert_eq!(round_clamp_u8(12.5), 13);
    assert_eq!(round_clamp_u8(300.0), 255);
}

#[test]
fn reflect101_mirrors_without_edge_repeat() {
    let idx: Vec<usize> = (-3..8).map(|i| reflect101(i, 5)).collect();
    assert_eq!(idx, vec![3, 2, 1, 0, 1, 2, 3, 4, 3, 2, 1]);
    assert_eq!(reflect101(-4, 1), 0);
}

#[test]
fn q16_rounds_to_nearest() {
    assert_eq!(q16_to_u8(0), 0);
    assert_eq!(q16_to_u8(65536 * 10), 10);
    assert_eq!(q16_to_u8(65536 * 10 + 32768), 11);
    assert_eq!(q16_to_u8(65536 * 400), 255);
}
