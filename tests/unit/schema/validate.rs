use super::*;
use serde_json::json;

fn run(v: serde_json::Value) -> Validated {
    validate_with_diagnostics(RawLayoutDocument::from_value(v).unwrap())
}

fn only_text(layout: &LayoutDocument) -> &TextElement {
    match layout.elements.as_slice() {
        [Element::Text(t)] => t,
        other => panic!("expected one text element, got {other:?}"),
    }
}

#[test]
fn empty_document_gets_default_gradient_and_no_elements() {
    let out = run(json!({}));
    assert_eq!(out.layout.background, Background::default());
    assert_eq!(
        out.layout.background,
        Background::Gradient {
            start: "#FF6B6B".to_owned(),
            end: "#4ECDC4".to_owned(),
            direction: GradientDirection::Horizontal,
        }
    );
    assert!(out.layout.elements.is_empty());
}

#[test]
fn bare_text_element_gets_body_defaults() {
    let out = run(json!({"elements": [{"type": "text"}]}));
    let t = only_text(&out.layout);
    assert_eq!(t.font_size, 36);
    assert_eq!(t.color, "#FFFFFF");
    assert_eq!(t.font_weight, FontWeight::Bold);
    assert_eq!(t.alignment, Alignment::Left);
    assert_eq!(
        t.stroke,
        Stroke {
            color: "#000000".to_owned(),
            width: 3
        }
    );
    assert_eq!((t.x, t.y), (0, 0));
    assert_eq!(t.content, "");
}

#[test]
fn missing_stroke_width_depends_on_role() {
    let out = run(json!({
        "elements": [
            {"type": "text", "role": "title", "content": "Big"},
            {"type": "text", "role": "subtitle", "content": "small"},
            {"type": "text", "role": "badge", "content": "new"},
        ]
    }));
    let widths: Vec<_> = out.layout.texts().map(|(_, t)| t.stroke.width).collect();
    assert_eq!(widths, vec![4, 3, 3]);
    let sizes: Vec<_> = out.layout.texts().map(|(_, t)| t.font_size).collect();
    assert_eq!(sizes, vec![72, 36, 36]);
    assert_eq!(out.layout.background, Background::default());
}

#[test]
fn partial_stroke_is_completed() {
    let out = run(json!({
        "elements": [
            {"type": "text", "role": "title", "stroke": {"color": "#FF0000"}},
            {"type": "text", "stroke": {"width": -2}},
        ]
    }));
    let strokes: Vec<_> = out.layout.texts().map(|(_, t)| t.stroke.clone()).collect();
    assert_eq!(strokes[0].color, "#FF0000");
    assert_eq!(strokes[0].width, 4);
    assert_eq!(strokes[1].color, "#000000");
    assert_eq!(strokes[1].width, 0);
}

#[test]
fn coordinates_are_clamped_to_canvas() {
    let out = run(json!({
        "elements": [
            {"type": "text", "x": -50, "y": 5000},
            {"type": "image", "x": 99999, "y": -1},
        ]
    }));
    let Element::Text(t) = &out.layout.elements[0] else {
        panic!("expected text");
    };
    assert_eq!((t.x, t.y), (0, 720));
    let Element::Image(img) = &out.layout.elements[1] else {
        panic!("expected image");
    };
    assert_eq!((img.x, img.y), (1280, 0));
    assert!(out.warnings().any(|d| d.path_string() == "$.elements[0].x"));
}

#[test]
fn image_defaults_and_rotation_is_forced_to_zero() {
    let out = run(json!({
        "elements": [
            {"type": "image"},
            {"type": "image", "width": 0, "height": 120, "rotation": 90},
        ]
    }));
    let images: Vec<_> = out.layout.images().map(|(_, i)| i.clone()).collect();
    assert_eq!((images[0].width, images[0].height), (350, 350));
    assert_eq!((images[1].width, images[1].height), (350, 120));
    assert!(images.iter().all(|i| i.rotation == 0));
    assert!(
        out.warnings()
            .any(|d| d.path_string() == "$.elements[1].rotation")
    );
}

#[test]
fn unknown_elements_are_dropped_with_warning() {
    let out = run(json!({"elements": [{"type": "shape"}, {"type": "text", "role": "title"}]}));
    assert_eq!(out.layout.elements.len(), 1);
    assert!(out.warnings().any(|d| d.path_string() == "$.elements[0]"));
}

#[test]
fn missing_roles_are_advisory_only() {
    let with_roles = run(json!({"elements": [
        {"type": "text", "role": "title"},
        {"type": "text", "role": "subtitle"},
    ]}));
    assert!(
        !with_roles
            .warnings()
            .any(|d| d.message.contains("no text element"))
    );

    let without = run(json!({"elements": [{"type": "text"}]}));
    let role_warnings: Vec<_> = without
        .warnings()
        .filter(|d| d.message.contains("no text element"))
        .collect();
    assert_eq!(role_warnings.len(), 2);
    assert_eq!(
        without.layout,
        validate(RawLayoutDocument::from_value(json!({"elements": [{"type": "text"}]})).unwrap())
    );
}

#[test]
fn background_variants() {
    let solid = run(json!({"background": {"type": "solid"}}));
    assert_eq!(
        solid.layout.background,
        Background::Solid {
            color: "#FFFFFF".to_owned()
        }
    );

    let inferred = run(json!({"background": {"gradientStart": "#111111"}}));
    assert_eq!(
        inferred.layout.background,
        Background::Gradient {
            start: "#111111".to_owned(),
            end: "#000000".to_owned(),
            direction: GradientDirection::Horizontal,
        }
    );

    let diag = run(json!({"background": {"type": "Gradient", "direction": "DIAGONAL"}}));
    assert!(matches!(
        diag.layout.background,
        Background::Gradient {
            direction: GradientDirection::Diagonal,
            ..
        }
    ));

    let bad = run(json!({"background": {"type": "noise"}}));
    assert_eq!(bad.layout.background, Background::default());
    assert!(
        bad.warnings()
            .any(|d| d.path_string() == "$.background.type")
    );
}

#[test]
fn invalid_colors_are_kept_but_flagged() {
    let out = run(json!({"elements": [{"type": "text", "color": "red"}]}));
    assert_eq!(only_text(&out.layout).color, "red");
    assert!(
        out.warnings()
            .any(|d| d.path_string() == "$.elements[0].color")
    );
}

#[test]
fn out_of_domain_enums_fall_back() {
    let out = run(json!({"elements": [
        {"type": "text", "fontWeight": "black", "alignment": "justify", "fontSize": -4}
    ]}));
    let t = only_text(&out.layout);
    assert_eq!(t.font_weight, FontWeight::Bold);
    assert_eq!(t.alignment, Alignment::Left);
    assert_eq!(t.font_size, 36);
}

#[test]
fn validation_is_idempotent_through_json() {
    let first = validate(
        RawLayoutDocument::from_value(json!({
            "background": {"type": "gradient", "gradientStart": "#000000", "direction": "vertical"},
            "elements": [
                {"type": "image", "x": 2000, "width": 500},
                {"type": "text", "role": "title", "content": "Hello", "x": 640, "alignment": "center"},
            ]
        }))
        .unwrap(),
    );
    let again = validate(RawLayoutDocument::from_json_str(&first.to_json_pretty().unwrap()).unwrap());
    assert_eq!(again, first);
}

#[test]
fn diagnostic_display_includes_path() {
    let d = Diagnostic::at(
        &[
            PathElem::Field("elements"),
            PathElem::Index(3),
            PathElem::Field("fontSize"),
        ],
        Severity::Info,
        "missing",
    );
    assert_eq!(d.to_string(), "$.elements[3].fontSize: missing");
}
