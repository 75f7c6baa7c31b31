use super::*;

#[test]
fn thumbnail_canvas_is_1280x720() {
    assert_eq!(Canvas::default(), Canvas::THUMBNAIL);
    assert_eq!(Canvas::THUMBNAIL.width, 1280);
    assert_eq!(Canvas::THUMBNAIL.height, 720);
    assert_eq!(Canvas::THUMBNAIL.pixel_count(), 921_600);
}

#[test]
fn allocate_fills_opaque() {
    let img = Canvas {
        width: 3,
        height: 2,
    }
    .allocate(Rgb8::new(10, 20, 30))
    .unwrap();
    assert_eq!(img.dimensions(), (3, 2));
    assert!(img.pixels().all(|p| p.0 == [10, 20, 30, 255]));
}

#[test]
fn allocate_reports_impossible_sizes() {
    let err = Canvas {
        width: u32::MAX,
        height: u32::MAX,
    }
    .allocate(Rgb8::WHITE)
    .unwrap_err();
    assert!(matches!(err, ThumbkitError::Allocation(_)));
}
