use super::*;
use crate::foundation::core::Channels;

fn sticker(w: u32, h: u32, alpha: u8) -> PixelBuffer {
    PixelBuffer::filled(w, h, &[200, 10, 10, alpha]).unwrap()
}

#[test]
fn opaque_pixels_replace_background() {
    let mut bg = PixelBuffer::new(10, 10, Channels::Rgb);
    let r = composite(&mut bg, &sticker(3, 2, 255), 4, 5).unwrap();
    assert_eq!(r, Rect::new(4, 5, 3, 2));
    assert_eq!(bg.pixel(4, 5).unwrap(), &[200, 10, 10]);
    assert_eq!(bg.pixel(6, 6).unwrap(), &[200, 10, 10]);
    assert_eq!(bg.pixel(7, 5).unwrap(), &[0, 0, 0]);
    assert_eq!(bg.pixel(4, 7).unwrap(), &[0, 0, 0]);
}

#[test]
fn mask_is_binary() {
    let mut bg = PixelBuffer::filled(4, 4, &[5, 5, 5]).unwrap();
    let before = bg.clone();
    composite(&mut bg, &sticker(4, 4, 254), 0, 0);
    assert_eq!(bg, before);
}

#[test]
fn rgb_sticker_is_fully_opaque() {
    let mut bg = PixelBuffer::new(4, 4, Channels::Rgb);
    let s = PixelBuffer::filled(2, 2, &[1, 2, 3]).unwrap();
    composite(&mut bg, &s, 1, 1);
    assert_eq!(bg.pixel(2, 2).unwrap(), &[1, 2, 3]);
}

#[test]
fn clips_at_right_and_bottom_edges() {
    let mut bg = PixelBuffer::new(200, 100, Channels::Rgb);
    let r = composite(&mut bg, &sticker(20, 20, 255), 190, 90).unwrap();
    assert_eq!(r, Rect::new(190, 90, 10, 10));
    assert_eq!(bg.pixel(199, 99).unwrap(), &[200, 10, 10]);
    assert_eq!(bg.pixel(189, 99).unwrap(), &[0, 0, 0]);
}

#[test]
fn skip_policy_ignores_partial_placements() {
    let mut bg = PixelBuffer::new(20, 20, Channels::Rgb);
    let before = bg.clone();
    assert!(composite_with(&mut bg, &sticker(5, 5, 255), 18, 0, BoundaryPolicy::Skip).is_none());
    assert_eq!(bg, before);
    assert!(composite_with(&mut bg, &sticker(5, 5, 255), 15, 15, BoundaryPolicy::Skip).is_some());
}

#[test]
fn degenerate_placements_are_no_ops() {
    let mut bg = PixelBuffer::new(8, 8, Channels::Rgb);
    let before = bg.clone();
    assert!(composite(&mut bg, &sticker(2, 2, 255), -1, 0).is_none());
    assert!(composite(&mut bg, &sticker(2, 2, 255), 8, 0).is_none());
    assert!(composite(&mut bg, &sticker(0, 2, 255), 1, 1).is_none());
    assert_eq!(bg, before);
}

#[test]
fn background_alpha_is_kept() {
    let mut bg = PixelBuffer::filled(2, 2, &[0, 0, 0, 17]).unwrap();
    composite(&mut bg, &sticker(1, 1, 255), 0, 0);
    assert_eq!(bg.pixel(0, 0).unwrap(), &[200, 10, 10, 17]);
}
