use super::*;
use crate::scene::model::{Alignment, FontWeight, Stroke};

const RED: [u8; 4] = [255, 0, 0, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];
const WHITE: [u8; 4] = [255, 255, 255, 255];

fn white(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba(WHITE))
}

fn text(content: &str, x: i32, y: i32, alignment: Alignment, stroke: u32) -> TextElement {
    TextElement {
        role: None,
        content: content.to_owned(),
        x,
        y,
        font_size: 8,
        color: "#FF0000".to_owned(),
        font_weight: FontWeight::Bold,
        alignment,
        stroke: Stroke {
            color: "#000000".to_owned(),
            width: stroke,
        },
    }
}

fn bounds(outcome: PaintOutcome) -> Rect {
    match outcome {
        PaintOutcome::Painted { bounds } => bounds,
        PaintOutcome::Skipped(reason) => panic!("skipped: {reason:?}"),
    }
}

#[test]
fn left_aligned_fill_without_stroke() {
    let fonts = FontResolver::builtin_only();
    let mut painter = TextPainter::new(&fonts);
    let mut c = white(40, 20);
    let b = bounds(painter.draw(&mut c, &text("H", 10, 5, Alignment::Left, 0)));
    assert_eq!(b, Rect::new(10.0, 5.0, 15.0, 12.0));
    // Both legs of the H, full height.
    for y in 5..12 {
        assert_eq!(c.get_pixel(10, y).0, RED);
        assert_eq!(c.get_pixel(14, y).0, RED);
    }
    assert_eq!(c.get_pixel(12, 5).0, WHITE);
    assert_eq!(c.get_pixel(9, 5).0, WHITE);
}

#[test]
fn center_and_right_alignment_shift_the_box() {
    let fonts = FontResolver::builtin_only();
    let mut painter = TextPainter::new(&fonts);
    let mut c = white(40, 20);
    let centered = bounds(painter.draw(&mut c, &text("H", 20, 0, Alignment::Center, 0)));
    assert_eq!(centered.x0, 18.0);
    let right = bounds(painter.draw(&mut c, &text("H", 20, 0, Alignment::Right, 0)));
    assert_eq!(right.x0, 15.0);
    assert_eq!(right.x1, 20.0);
}

#[test]
fn box_is_pulled_back_inside_the_canvas() {
    let fonts = FontResolver::builtin_only();
    let mut painter = TextPainter::new(&fonts);
    let mut c = white(40, 20);
    let b = bounds(painter.draw(&mut c, &text("HH", 1280, 720, Alignment::Left, 0)));
    assert_eq!(b, Rect::new(29.0, 13.0, 40.0, 20.0));

    let b = bounds(painter.draw(&mut c, &text("H", 1, 0, Alignment::Right, 0)));
    assert_eq!(b.x0, 0.0);
}

#[test]
fn text_wider_than_canvas_is_pinned_and_cropped() {
    let fonts = FontResolver::builtin_only();
    let mut painter = TextPainter::new(&fonts);
    let mut c = white(20, 10);
    let b = bounds(painter.draw(&mut c, &text("HHHHHH", 7, 3, Alignment::Center, 0)));
    assert_eq!(b, Rect::new(0.0, 3.0, 20.0, 10.0));
}

#[test]
fn stroke_is_a_disc_under_the_fill() {
    let fonts = FontResolver::builtin_only();
    let mut painter = TextPainter::new(&fonts);
    let mut c = white(40, 20);
    bounds(painter.draw(&mut c, &text("H", 10, 5, Alignment::Left, 2)));
    // Fill wins where it covers.
    assert_eq!(c.get_pixel(10, 8).0, RED);
    // Two pixels left of the leg is within the disc.
    assert_eq!(c.get_pixel(8, 8).0, BLACK);
    assert_eq!(c.get_pixel(7, 8).0, WHITE);
    // (dx, dy) = (-2, -2) is outside a radius-2 disc; (-1, -1) is inside.
    assert_eq!(c.get_pixel(8, 3).0, WHITE);
    assert_eq!(c.get_pixel(9, 4).0, BLACK);
}

#[test]
fn stroke_is_clipped_at_canvas_edges() {
    let fonts = FontResolver::builtin_only();
    let mut painter = TextPainter::new(&fonts);
    let mut c = white(10, 10);
    let b = bounds(painter.draw(&mut c, &text("H", 0, 0, Alignment::Left, 3)));
    assert_eq!(b, Rect::new(0.0, 0.0, 5.0, 7.0));
    assert_eq!(c.get_pixel(0, 0).0, RED);
    assert_eq!(c.get_pixel(7, 2).0, BLACK);
}

#[test]
fn blank_content_is_skipped() {
    let fonts = FontResolver::builtin_only();
    let mut painter = TextPainter::new(&fonts);
    let mut c = white(10, 10);
    for content in ["", "   "] {
        let outcome = painter.draw(&mut c, &text(content, 0, 0, Alignment::Left, 3));
        assert_eq!(outcome, PaintOutcome::Skipped(SkipReason::EmptyContent));
    }
    assert!(c.pixels().all(|p| p.0 == WHITE));
}

#[test]
fn invalid_fill_color_paints_black() {
    let fonts = FontResolver::builtin_only();
    let mut painter = TextPainter::new(&fonts);
    let mut c = white(10, 10);
    let mut el = text("H", 0, 0, Alignment::Left, 0);
    el.color = "crimson".to_owned();
    bounds(painter.draw(&mut c, &el));
    assert_eq!(c.get_pixel(0, 0).0, BLACK);
}

#[test]
fn huge_font_size_is_pinned_and_cropped() {
    let fonts = FontResolver::builtin_only();
    let mut painter = TextPainter::new(&fonts);
    let mut c = white(64, 32);
    let mut el = text("Hi", 30, 10, Alignment::Left, 2);
    el.font_size = 2_000_000_000;
    let b = bounds(painter.draw(&mut c, &el));
    assert_eq!(b, Rect::new(0.0, 0.0, 64.0, 32.0));
    // The window is inside the left stem of the H.
    assert!(c.pixels().all(|p| p.0 == RED));
}

#[test]
fn huge_stroke_width_is_bounded() {
    let fonts = FontResolver::builtin_only();
    let mut painter = TextPainter::new(&fonts);
    let mut capped = white(200, 120);
    let mut huge = white(200, 120);
    let mut el = text("H", 100, 60, Alignment::Left, MAX_STROKE_RADIUS);
    painter.draw(&mut capped, &el);
    el.stroke.width = u32::MAX;
    painter.draw(&mut huge, &el);
    assert_eq!(capped.as_raw(), huge.as_raw());
}
