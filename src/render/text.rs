//! Stroked text painting.

use image::RgbaImage;

use crate::assets::color::hex_to_rgb;
use crate::assets::fonts::{FontResolver, ResolvedFont};
use crate::assets::text::{GlyphMask, ShapedText, TextLayoutEngine};
use crate::foundation::core::{Rect, Rgb8};
use crate::foundation::math::{blend_channel, clamp};
use crate::render::renderer::{PaintOutcome, SkipReason};
use crate::scene::model::TextElement;

/// Largest stroke radius painted; wider strokes are drawn at this radius.
pub(crate) const MAX_STROKE_RADIUS: u32 = 32;

/// Paints [`TextElement`]s, sharing one shaping context across a render.
pub(crate) struct TextPainter<'a> {
    fonts: &'a FontResolver,
    engine: TextLayoutEngine,
}

impl<'a> TextPainter<'a> {
    pub(crate) fn new(fonts: &'a FontResolver) -> Self {
        Self {
            fonts,
            engine: TextLayoutEngine::new(),
        }
    }

    /// Draw one text element; failures skip the element and leave the canvas untouched.
    pub(crate) fn draw(&mut self, canvas: &mut RgbaImage, el: &TextElement) -> PaintOutcome {
        if el.content.trim().is_empty() {
            return PaintOutcome::Skipped(SkipReason::EmptyContent);
        }

        let font = self.fonts.resolve(el.font_weight, &el.content);
        let shaped = match ShapedText::new(&mut self.engine, &font, &el.content, el.font_size) {
            Ok(s) => s,
            Err(e) => return PaintOutcome::Skipped(SkipReason::FontFailure(e.to_string())),
        };
        let (cw, ch) = canvas.dimensions();
        let x = i64::from(el.alignment.resolve_x(el.x, shaped.width));
        let x = clamp(x, 0, i64::from(cw) - i64::from(shaped.width));
        let y = clamp(i64::from(el.y), 0, i64::from(ch) - i64::from(shaped.height));

        let radius = i64::from(el.stroke.width.min(MAX_STROKE_RADIUS));
        // Mask pixels past this window land off-canvas for every stroke offset.
        let window_w = (i64::from(cw) - x + radius).clamp(0, i64::from(u32::MAX)) as u32;
        let window_h = (i64::from(ch) - y + radius).clamp(0, i64::from(u32::MAX)) as u32;
        let mask = match shaped.rasterize(window_w, window_h) {
            Ok(m) => m,
            Err(e) => return PaintOutcome::Skipped(SkipReason::RasterFailure(e.to_string())),
        };
        if let ResolvedFont::Outline(f) = &font {
            tracing::debug!(font = %f.candidate.path.display(), w = shaped.width, h = shaped.height, "text shaped");
        }

        if radius > 0 {
            let stroke = hex_to_rgb(&el.stroke.color);
            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    if dx * dx + dy * dy <= radius * radius {
                        blit_mask(canvas, &mask, x + dx, y + dy, stroke);
                    }
                }
            }
        }
        blit_mask(canvas, &mask, x, y, hex_to_rgb(&el.color));

        PaintOutcome::Painted {
            bounds: clipped_rect(x, y, shaped.width, shaped.height, cw, ch),
        }
    }
}

pub(crate) fn clipped_rect(x: i64, y: i64, w: u32, h: u32, cw: u32, ch: u32) -> Rect {
    let x1 = (x + i64::from(w)).min(i64::from(cw));
    let y1 = (y + i64::from(h)).min(i64::from(ch));
    Rect::new(x as f64, y as f64, x1 as f64, y1 as f64)
}

/// Source-over `color` through `mask` with its top-left at `(ox, oy)`, clipped to the canvas.
fn blit_mask(canvas: &mut RgbaImage, mask: &GlyphMask, ox: i64, oy: i64, color: Rgb8) {
    let (cw, ch) = canvas.dimensions();
    let x0 = ox.max(0);
    let y0 = oy.max(0);
    let x1 = (ox + i64::from(mask.width)).min(i64::from(cw));
    let y1 = (oy + i64::from(mask.height)).min(i64::from(ch));
    for cy in y0..y1 {
        for cx in x0..x1 {
            let a = mask.get((cx - ox) as u32, (cy - oy) as u32);
            if a == 0 {
                continue;
            }
            let px = canvas.get_pixel_mut(cx as u32, cy as u32);
            let [r, g, b, alpha] = px.0;
            px.0 = [
                blend_channel(r, color.r, a),
                blend_channel(g, color.g, a),
                blend_channel(b, color.b, a),
                blend_channel(alpha, 255, a),
            ];
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
