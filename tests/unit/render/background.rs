use super::*;

fn canvas(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba([255, 255, 255, 255]))
}

fn gradient(start: &str, end: &str, direction: GradientDirection) -> Background {
    Background::Gradient {
        start: start.to_owned(),
        end: end.to_owned(),
        direction,
    }
}

#[test]
fn solid_fills_every_pixel() {
    let mut c = canvas(8, 4);
    paint_background(
        &mut c,
        &Background::Solid {
            color: "#123456".to_owned(),
        },
    );
    assert!(c.pixels().all(|p| p.0 == [0x12, 0x34, 0x56, 255]));
}

#[test]
fn solid_with_bad_color_is_black() {
    let mut c = canvas(3, 3);
    paint_background(
        &mut c,
        &Background::Solid {
            color: "tomato".to_owned(),
        },
    );
    assert!(c.pixels().all(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn horizontal_endpoints_truncate_and_increase() {
    let mut c = canvas(1280, 2);
    paint_background(&mut c, &gradient("#000000", "#FFFFFF", GradientDirection::Horizontal));
    assert_eq!(c.get_pixel(0, 0).0, [0, 0, 0, 255]);
    assert_eq!(c.get_pixel(1279, 1).0, [254, 254, 254, 255]);
    for x in 1..1280 {
        assert!(c.get_pixel(x, 0).0[0] >= c.get_pixel(x - 1, 0).0[0]);
        assert_eq!(c.get_pixel(x, 0), c.get_pixel(x, 1));
    }
}

#[test]
fn vertical_is_constant_across_rows() {
    let mut c = canvas(5, 10);
    paint_background(&mut c, &gradient("#000000", "#0000FF", GradientDirection::Vertical));
    for y in 0..10 {
        let expected = lerp(0, 255, f64::from(y) / 10.0);
        for x in 0..5 {
            assert_eq!(c.get_pixel(x, y).0, [0, 0, expected, 255]);
        }
    }
}

#[test]
fn diagonal_measures_distance_from_origin() {
    let mut c = canvas(40, 30);
    paint_background(&mut c, &gradient("#000000", "#FF0000", GradientDirection::Diagonal));
    assert_eq!(c.get_pixel(0, 0).0, [0, 0, 0, 255]);
    // (30, 0) and (18, 24) are both 30 px from the corner.
    assert_eq!(c.get_pixel(30, 0), c.get_pixel(18, 24));
    let far = c.get_pixel(39, 29).0[0];
    assert!(far > 240 && far < 255);
}

#[test]
fn bad_gradient_end_falls_back_to_start() {
    let mut c = canvas(6, 6);
    paint_background(&mut c, &gradient("#00FF00", "??", GradientDirection::Diagonal));
    assert!(c.pixels().all(|p| p.0 == [0, 255, 0, 255]));
}
