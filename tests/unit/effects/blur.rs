use super::*;
use crate::foundation::core::Channels;

#[test]
fn auto_sigma_for_15_tap_kernel() {
    assert!((auto_sigma(15) - 2.6).abs() < 1e-5);
}

#[test]
fn blur_rejects_even_kernel() {
    let src = PixelBuffer::new(2, 2, Channels::Rgb);
    assert!(gaussian_blur(&src, 4, 0.0).is_err());
    assert!(gaussian_blur(&src, 0, 0.0).is_err());
}

#[test]
fn blur_ksize_1_is_identity() {
    let src = PixelBuffer::from_raw(1, 2, Channels::Rgb, vec![1, 2, 3, 4, 5, 6]).unwrap();
    let out = gaussian_blur(&src, 1, 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_constant_image_is_identity() {
    let src = PixelBuffer::filled(9, 7, &[10, 20, 30]).unwrap();
    let out = gaussian_blur(&src, 15, 0.0).unwrap();
    assert_eq!(out, src);
}

#[test]
fn blur_spreads_energy_from_single_pixel() {
    let mut src = PixelBuffer::new(21, 21, Channels::Rgb);
    src.pixel_mut(10, 10).unwrap().copy_from_slice(&[255, 255, 255]);

    let out = gaussian_blur(&src, 5, 1.2).unwrap();

    let nonzero = out.as_raw().chunks_exact(3).filter(|px| px[0] != 0).count();
    assert!(nonzero > 1);

    let sum: u32 = out.as_raw().chunks_exact(3).map(|px| u32::from(px[0])).sum();
    assert!((sum as i32 - 255).abs() <= 16);
}

#[test]
fn blur_preserves_layout() {
    let src = PixelBuffer::filled(5, 4, &[1, 2, 3, 255]).unwrap();
    let out = gaussian_blur(&src, 3, 0.0).unwrap();
    assert_eq!(out.channels(), Channels::Rgba);
    assert_eq!(out.dimensions(), (5, 4));
}
