//! Subject image compositing.

use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};

use crate::foundation::math::{aspect_fit, clamp};
use crate::render::renderer::{PaintOutcome, SkipReason};
use crate::render::text::clipped_rect;
use crate::scene::model::ImageElement;

/// Fit `subject` into the element's box and composite it onto the canvas.
///
/// The element box is a maximum: the subject keeps its aspect ratio and the position is
/// re-clamped against the resized extent. Subjects with an alpha channel are blended through it;
/// opaque subjects replace the covered pixels.
pub(crate) fn draw_image(
    canvas: &mut RgbaImage,
    el: &ImageElement,
    subject: &DynamicImage,
    filter: FilterType,
) -> PaintOutcome {
    let (sw, sh) = (subject.width(), subject.height());
    if sw == 0 || sh == 0 {
        return PaintOutcome::Skipped(SkipReason::RasterFailure(format!(
            "subject image is {sw}x{sh}"
        )));
    }
    let (w, h) = aspect_fit(sw, sh, el.width, el.height);
    let resized = if (w, h) == (sw, sh) {
        subject.to_rgba8()
    } else {
        subject.resize_exact(w, h, filter).to_rgba8()
    };

    let (cw, ch) = canvas.dimensions();
    let x = clamp(i64::from(el.x), 0, i64::from(cw) - i64::from(w));
    let y = clamp(i64::from(el.y), 0, i64::from(ch) - i64::from(h));
    if subject.color().has_alpha() {
        imageops::overlay(canvas, &resized, x, y);
    } else {
        imageops::replace(canvas, &resized, x, y);
    }
    tracing::debug!(w, h, x, y, "subject composited");

    PaintOutcome::Painted {
        bounds: clipped_rect(x, y, w, h, cw, ch),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/subject.rs"]
mod tests;
