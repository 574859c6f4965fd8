use super::*;
use crate::foundation::core::Channels;

struct Fixed(Vec<Rect>);

impl RegionClassifier for Fixed {
    fn detect(&self, _gray: &GrayImage) -> Vec<Rect> {
        self.0.clone()
    }
}

/// Reports a rect only if it receives an image of the expected size.
struct ExpectSize(u32, u32, Rect);

impl RegionClassifier for ExpectSize {
    fn detect(&self, gray: &GrayImage) -> Vec<Rect> {
        if gray.dimensions() == (self.0, self.1) {
            vec![self.2]
        } else {
            Vec::new()
        }
    }
}

#[test]
fn outline_is_two_pixels_inside_the_rect() {
    let mut frame = PixelBuffer::new(10, 10, Channels::Rgb);
    draw_outline(&mut frame, Rect::new(1, 1, 8, 8), [0, 255, 0], 2);
    assert_eq!(frame.pixel(1, 1).unwrap(), &[0, 255, 0]);
    assert_eq!(frame.pixel(2, 5).unwrap(), &[0, 255, 0]);
    assert_eq!(frame.pixel(8, 8).unwrap(), &[0, 255, 0]);
    assert_eq!(frame.pixel(3, 3).unwrap(), &[0, 0, 0]);
    assert_eq!(frame.pixel(0, 0).unwrap(), &[0, 0, 0]);
    assert_eq!(frame.pixel(9, 9).unwrap(), &[0, 0, 0]);
}

#[test]
fn outline_clips_at_frame_edges() {
    let mut frame = PixelBuffer::new(4, 4, Channels::Rgb);
    draw_outline(&mut frame, Rect::new(-2, -2, 5, 5), [1, 1, 1], 2);
    // Only the right and bottom strokes fall inside the frame.
    assert_eq!(frame.pixel(2, 0).unwrap(), &[1, 1, 1]);
    assert_eq!(frame.pixel(0, 2).unwrap(), &[1, 1, 1]);
    assert_eq!(frame.pixel(0, 0).unwrap(), &[0, 0, 0]);
    assert_eq!(frame.pixel(3, 3).unwrap(), &[0, 0, 0]);
}

#[test]
fn equalize_spreads_two_levels_to_full_range() {
    let gray = GrayImage::from_raw(2, 1, vec![100, 110]).unwrap();
    let eq = equalize(&gray);
    assert_eq!(eq.as_raw(), &vec![0, 255]);
}

#[test]
fn equalize_leaves_flat_image_alone() {
    let gray = GrayImage::from_raw(2, 2, vec![7; 4]).unwrap();
    assert_eq!(equalize(&gray), gray);
}

#[test]
fn nested_detections_are_offset_into_the_face() {
    let face = Rect::new(10, 5, 20, 16);
    let overlay = DetectionOverlay::new(Box::new(Fixed(vec![face])))
        .with_eyes(Box::new(ExpectSize(20, 16, Rect::new(2, 3, 4, 4))))
        .with_smiles(Box::new(Fixed(vec![Rect::new(5, 10, 10, 4)])));
    let mut frame = PixelBuffer::filled(40, 30, &[50, 50, 50]).unwrap();
    let before = frame.clone();
    let regions = overlay.annotate(&mut frame);

    assert_eq!(
        regions,
        vec![
            DetectionRegion {
                kind: RegionKind::Face,
                rect: face
            },
            DetectionRegion {
                kind: RegionKind::Eye,
                rect: Rect::new(12, 8, 4, 4)
            },
            DetectionRegion {
                kind: RegionKind::Smile,
                rect: Rect::new(15, 15, 10, 4)
            },
        ]
    );
    assert_eq!(frame.pixel(10, 5).unwrap(), &[0, 255, 0]);
    assert_eq!(frame.pixel(12, 8).unwrap(), &[0, 0, 255]);
    assert_eq!(frame.pixel(15, 15).unwrap(), &[255, 255, 0]);
    // Pixels away from any stroke are untouched.
    assert_eq!(frame.pixel(0, 0), before.pixel(0, 0));
    assert_eq!(frame.pixel(20, 12), before.pixel(20, 12));
}

#[test]
fn no_faces_means_no_changes() {
    let overlay = DetectionOverlay::new(Box::new(Fixed(Vec::new())));
    let mut frame = PixelBuffer::filled(8, 8, &[9, 9, 9]).unwrap();
    let before = frame.clone();
    assert!(overlay.annotate(&mut frame).is_empty());
    assert_eq!(frame, before);
}
