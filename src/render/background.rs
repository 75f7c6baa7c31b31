//! Canvas fill for [`Background`].

use image::RgbaImage;

use crate::assets::color::{hex_to_rgb, parse_hex};
use crate::foundation::core::Rgb8;
use crate::foundation::math::lerp;
use crate::scene::model::{Background, GradientDirection};

/// Fill the whole canvas according to `background`.
pub fn paint_background(canvas: &mut RgbaImage, background: &Background) {
    match background {
        Background::Solid { color } => fill(canvas, hex_to_rgb(color)),
        Background::Gradient {
            start,
            end,
            direction,
        } => match (parse_hex(start), parse_hex(end)) {
            (Some(a), Some(b)) => paint_gradient(canvas, a, b, *direction),
            _ => {
                tracing::warn!(%start, %end, "unparseable gradient color; filling with start color");
                fill(canvas, hex_to_rgb(start));
            }
        },
    }
}

pub(crate) fn fill(canvas: &mut RgbaImage, color: Rgb8) {
    let px = color.to_rgba();
    for p in canvas.pixels_mut() {
        *p = px;
    }
}

fn mix(a: Rgb8, b: Rgb8, ratio: f64) -> image::Rgba<u8> {
    Rgb8::new(lerp(a.r, b.r, ratio), lerp(a.g, b.g, ratio), lerp(a.b, b.b, ratio)).to_rgba()
}

fn paint_gradient(canvas: &mut RgbaImage, a: Rgb8, b: Rgb8, direction: GradientDirection) {
    let (w, h) = canvas.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    match direction {
        GradientDirection::Horizontal => {
            let cols: Vec<_> = (0..w)
                .map(|x| mix(a, b, f64::from(x) / f64::from(w)))
                .collect();
            for row in canvas.rows_mut() {
                for (px, c) in row.zip(&cols) {
                    *px = *c;
                }
            }
        }
        GradientDirection::Vertical => {
            for (y, row) in canvas.rows_mut().enumerate() {
                let c = mix(a, b, y as f64 / f64::from(h));
                for px in row {
                    *px = c;
                }
            }
        }
        GradientDirection::Diagonal => {
            // Distance from the top-left corner, normalized by the canvas diagonal.
            let diag = f64::from(w).hypot(f64::from(h));
            let xx: Vec<f64> = (0..w).map(|x| f64::from(x) * f64::from(x)).collect();
            for (y, row) in canvas.rows_mut().enumerate() {
                let yy = (y as f64) * (y as f64);
                for (px, x2) in row.zip(&xx) {
                    let ratio = ((x2 + yy).sqrt() / diag).min(1.0);
                    *px = mix(a, b, ratio);
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/background.rs"]
mod tests;
