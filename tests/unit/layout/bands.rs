use super::*;

fn setup() -> (BandLayout, Viewport) {
    let layout = BandLayout::default();
    // 640x480 fits the 768x432 frame at 0.9 -> 576x432, x_off 395.
    let vp = layout.viewport(640, 480).unwrap();
    (layout, vp)
}

#[test]
fn sticker_bar_buckets_by_cell_width() {
    let (l, vp) = setup();
    assert_eq!(l.hit_test(0, 0, &vp, 6, 11), Hit::Sticker(0));
    assert_eq!(l.hit_test(89, 99, &vp, 6, 11), Hit::Sticker(0));
    assert_eq!(l.hit_test(90, 50, &vp, 6, 11), Hit::Sticker(1));
    assert_eq!(l.hit_test(5 * 90 + 10, 50, &vp, 6, 11), Hit::Sticker(5));
    assert_eq!(l.hit_test(6 * 90, 50, &vp, 6, 11), Hit::Nothing);
}

#[test]
fn canvas_maps_to_model_coordinates() {
    let (l, vp) = setup();
    assert_eq!(vp.x_off, 395);
    assert_eq!(l.hit_test(395, 100, &vp, 6, 11), Hit::Canvas { x: 0, y: 0 });
    assert_eq!(
        l.hit_test(395 + 90, 100 + 45, &vp, 6, 11),
        Hit::Canvas { x: 100, y: 50 }
    );
    assert_eq!(l.hit_test(394, 200, &vp, 6, 11), Hit::Nothing);
    assert_eq!(l.hit_test(395 + 576, 200, &vp, 6, 11), Hit::Nothing);
}

#[test]
fn filter_bar_follows_the_canvas() {
    let (l, vp) = setup();
    let top = 100 + 432;
    let cell = 1366 / 11;
    assert_eq!(l.filter_cell_w(11), cell);
    assert_eq!(l.hit_test(0, top, &vp, 6, 11), Hit::Filter(0));
    assert_eq!(l.hit_test(i64::from(cell) * 3 + 1, top + 99, &vp, 6, 11), Hit::Filter(3));
    // The remainder strip past the last full cell hits nothing.
    assert_eq!(l.hit_test(i64::from(cell) * 11, top, &vp, 6, 11), Hit::Nothing);
}

#[test]
fn buttons_sit_around_the_centre() {
    let (l, vp) = setup();
    let top = 100 + 432 + 100;
    assert_eq!(l.button_xs(), (683 - 220, 683 + 20));
    assert_eq!(l.hit_test(463, top, &vp, 6, 11), Hit::Save);
    assert_eq!(l.hit_test(662, top + 49, &vp, 6, 11), Hit::Save);
    assert_eq!(l.hit_test(683, top, &vp, 6, 11), Hit::Nothing);
    assert_eq!(l.hit_test(703, top, &vp, 6, 11), Hit::Undo);
    assert_eq!(l.hit_test(902, top, &vp, 6, 11), Hit::Undo);
    assert_eq!(l.hit_test(903, top, &vp, 6, 11), Hit::Nothing);
    assert_eq!(l.hit_test(703, top + 50, &vp, 6, 11), Hit::Nothing);
}

#[test]
fn outside_window_hits_nothing() {
    let (l, vp) = setup();
    assert_eq!(l.hit_test(-1, 10, &vp, 6, 11), Hit::Nothing);
    assert_eq!(l.hit_test(1366, 10, &vp, 6, 11), Hit::Nothing);
    assert_eq!(l.hit_test(10, -3, &vp, 6, 11), Hit::Nothing);
}
