use super::*;
use crate::scene::model::{Background, Element, ImageElement};
use serde_json::json;

fn layout(v: serde_json::Value) -> LayoutDocument {
    crate::schema::parse::parse_layout_value(v)
}

fn gray_subject() -> DynamicImage {
    DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        100,
        100,
        image::Rgb([90, 90, 90]),
    ))
}

#[test]
fn canvas_is_always_thumbnail_sized() {
    let r = ThumbnailRenderer::builtin_fonts();
    let img = r.render(&layout(json!({})), None).unwrap();
    assert_eq!(img.dimensions(), (1280, 720));
    assert!(img.pixels().all(|p| p.0[3] == 255));
}

#[test]
fn images_paint_before_text_regardless_of_order() {
    let doc = layout(json!({
        "background": {"type": "solid", "color": "#FFFFFF"},
        "elements": [
            {"type": "text", "role": "title", "content": "HI", "x": 10, "y": 10,
             "fontSize": 40, "color": "#FF0000", "stroke": {"width": 0}},
            {"type": "image", "x": 0, "y": 0, "width": 300, "height": 300},
        ]
    }));
    let r = ThumbnailRenderer::builtin_fonts().with_subject_filter(FilterType::Nearest);
    let (img, report) = r.render_with_report(&doc, Some(&gray_subject())).unwrap();

    let order: Vec<_> = report.elements.iter().map(|e| e.index).collect();
    assert_eq!(order, vec![1, 0]);
    // Left leg of the H at scale 5 covers x 10..15.
    assert_eq!(img.get_pixel(12, 12).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(200, 200).0, [90, 90, 90, 255]);
}

#[test]
fn missing_subject_skips_image_only() {
    let doc = LayoutDocument::fallback();
    let (_, report) = ThumbnailRenderer::builtin_fonts()
        .render_with_report(&doc, None)
        .unwrap();
    assert_eq!(report.outcome(2), Some(&PaintOutcome::Skipped(SkipReason::NoSubject)));
    assert_eq!(report.painted().count(), 2);
    assert_eq!(report.skipped().count(), 1);
}

#[test]
fn painted_bounds_stay_on_canvas() {
    let mut doc = LayoutDocument::fallback();
    if let Element::Text(title) = &mut doc.elements[0] {
        title.content = "A very long line of text that will not fit anywhere".to_owned();
        title.x = 1280;
        title.y = 720;
        title.font_size = 200;
    }
    doc.elements.push(Element::Image(ImageElement {
        x: 1280,
        y: 720,
        width: 2000,
        height: 50,
        rotation: 0,
    }));
    doc.background = Background::Solid {
        color: "#202020".to_owned(),
    };
    let (_, report) = ThumbnailRenderer::builtin_fonts()
        .render_with_report(&doc, Some(&gray_subject()))
        .unwrap();
    assert_eq!(report.painted().count(), 4);
    for (_, b) in report.painted() {
        assert!(b.x0 >= 0.0 && b.y0 >= 0.0, "{b:?}");
        assert!(b.x1 <= 1280.0 && b.y1 <= 720.0, "{b:?}");
    }
    assert_eq!(report.outcome(3), Some(&PaintOutcome::Painted {
        bounds: Rect::new(1230.0, 670.0, 1280.0, 720.0)
    }));
}

#[test]
fn report_display_is_readable() {
    assert_eq!(SkipReason::NoSubject.to_string(), "no subject image");
    assert_eq!(
        SkipReason::FontFailure("boom".into()).to_string(),
        "font failure: boom"
    );
}

#[test]
fn settings_builder() {
    let s = RenderSettings::default()
        .with_font_dir("/nonexistent/fonts")
        .with_system_fonts(false)
        .with_subject_filter(FilterType::Triangle);
    assert_eq!(s.font_dirs, vec![PathBuf::from("/nonexistent/fonts")]);
    assert!(!s.system_fonts);
    let r = ThumbnailRenderer::from_settings(s);
    assert_eq!(r.subject_filter, FilterType::Triangle);
}
