use super::*;

#[test]
fn pink_endpoints() {
    let lut = ColorRamp::Pink.table();
    assert_eq!(lut[0], [0, 0, 0]);
    assert_eq!(lut[255], [255, 255, 255]);
    // Red leads the other channels through the mid tones.
    assert!(lut[100][0] > lut[100][1]);
    assert!(lut[100][1] > lut[100][2]);
}

#[test]
fn rainbow_sweeps_red_to_violet() {
    let lut = ColorRamp::Rainbow.table();
    assert_eq!(lut[0], [255, 0, 0]);
    assert_eq!(lut[255], [170, 0, 255]);
    let green = lut[(0.5f32 * 255.0) as usize];
    assert!(green[1] == 255 && green[2] == 0);
}

#[test]
fn ramp_is_driven_by_luma_only() {
    let a = PixelBuffer::filled(1, 1, &[128, 128, 128]).unwrap();
    let b = PixelBuffer::filled(1, 1, &[128, 128, 128, 9]).unwrap();
    let oa = apply_color_ramp(&a, ColorRamp::Rainbow);
    let ob = apply_color_ramp(&b, ColorRamp::Rainbow);
    assert_eq!(oa.as_raw()[..3], ob.as_raw()[..3]);
    assert_eq!(ob.as_raw()[3], 9);
}
