//! Single-line shaping and coverage-mask rasterization.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::assets::builtin_font;
use crate::assets::fonts::{LoadedFont, ResolvedFont};
use crate::foundation::error::{ThumbkitError, ThumbkitResult};

/// Single-channel coverage mask, row-major, one byte per pixel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct GlyphMask {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) alpha: Vec<u8>,
}

impl GlyphMask {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            alpha: vec![0; (width as usize).saturating_mul(height as usize)],
        }
    }

    pub(crate) fn get(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.alpha[(y as usize) * (self.width as usize) + (x as usize)]
    }

    pub(crate) fn set(&mut self, x: u32, y: u32, a: u8) {
        if x >= self.width || y >= self.height {
            return;
        }
        self.alpha[(y as usize) * (self.width as usize) + (x as usize)] = a;
    }

    /// Set every pixel in `[x0, x1) x [y0, y1)`, clipped to the mask.
    pub(crate) fn fill_rect(&mut self, x0: u32, y0: u32, x1: u32, y1: u32, a: u8) {
        let x1 = x1.min(self.width);
        let y1 = y1.min(self.height);
        if x0 >= x1 {
            return;
        }
        let stride = self.width as usize;
        for y in y0..y1 {
            let row = y as usize * stride;
            self.alpha[row + x0 as usize..row + x1 as usize].fill(a);
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

const COVERAGE_BRUSH: TextBrushRgba8 = TextBrushRgba8 {
    r: 255,
    g: 255,
    b: 255,
    a: 255,
};

/// Face registered with the shaping context under a family name of its own.
#[derive(Clone, Debug)]
struct RegisteredFace {
    family: String,
    weight: parley::style::FontWeight,
    style: parley::style::FontStyle,
    width: parley::style::FontWidth,
}

/// Stateful helper for building Parley text layouts from loaded faces.
///
/// Each face is registered once per engine under a private family name, and layouts request
/// exactly that face's attributes, so shaping never silently switches to a sibling face.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    faces: HashMap<(PathBuf, u32), RegisteredFace>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            faces: HashMap::new(),
        }
    }

    fn register(&mut self, font: &LoadedFont) -> ThumbkitResult<RegisteredFace> {
        let key = (font.candidate.path.clone(), font.candidate.index);
        if let Some(face) = self.faces.get(&key) {
            return Ok(face.clone());
        }

        let family = format!("thumbkit-face-{}", self.faces.len());
        let families = self.font_ctx.collection.register_fonts(
            font.bytes.clone(),
            Some(parley::fontique::FontInfoOverride {
                family_name: Some(family.as_str()),
                ..Default::default()
            }),
        );
        let info = families
            .iter()
            .flat_map(|(_, infos)| infos.iter())
            .find(|info| info.index() == font.candidate.index)
            .ok_or_else(|| {
                ThumbkitError::font(format!(
                    "face {} of '{}' was not registered",
                    font.candidate.index,
                    font.candidate.path.display()
                ))
            })?;

        let face = RegisteredFace {
            family,
            weight: info.weight(),
            style: info.style(),
            width: info.width(),
        };
        self.faces.insert(key, face.clone());
        Ok(face)
    }

    /// Shape `text` as a single unwrapped line using exactly `font`.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &LoadedFont,
        size_px: f32,
    ) -> ThumbkitResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ThumbkitError::font("text size must be finite and > 0"));
        }
        let face = self.register(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Single(parley::style::FontFamily::Named(
                std::borrow::Cow::Owned(face.family),
            )),
        ));
        builder.push_default(parley::style::StyleProperty::FontWeight(face.weight));
        builder.push_default(parley::style::StyleProperty::FontStyle(face.style));
        builder.push_default(parley::style::StyleProperty::FontWidth(face.width));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(COVERAGE_BRUSH));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

enum Shape {
    Outline(parley::Layout<TextBrushRgba8>),
    Builtin { text: String, font_size: u32 },
}

/// Text that has been shaped and measured but not yet rasterized.
pub(crate) struct ShapedText {
    shape: Shape,
    pub(crate) width: u32,
    pub(crate) height: u32,
}

impl ShapedText {
    /// Shape with the resolved font, measuring the box the glyphs occupy.
    pub(crate) fn new(
        engine: &mut TextLayoutEngine,
        font: &ResolvedFont,
        text: &str,
        font_size: u32,
    ) -> ThumbkitResult<Self> {
        match font {
            ResolvedFont::Outline(loaded) => Self::outline(engine, loaded, text, font_size),
            ResolvedFont::Builtin => Ok(Self::builtin(text, font_size)),
        }
    }

    pub(crate) fn builtin(text: &str, font_size: u32) -> Self {
        let (width, height) = builtin_font::measure(text, font_size);
        Self {
            shape: Shape::Builtin {
                text: text.to_owned(),
                font_size,
            },
            width,
            height,
        }
    }

    fn outline(
        engine: &mut TextLayoutEngine,
        loaded: &LoadedFont,
        text: &str,
        font_size: u32,
    ) -> ThumbkitResult<Self> {
        let layout = engine.layout_line(text, loaded, font_size as f32)?;
        let width = layout.width().ceil();
        let height = layout.height().ceil();
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(ThumbkitError::font("text layout produced a non-finite extent"));
        }
        // Float casts saturate; `rasterize` bounds what is actually drawn.
        Ok(Self {
            shape: Shape::Outline(layout),
            width: width as u32,
            height: height as u32,
        })
    }

    /// Rasterize the top-left `max_width x max_height` window of the text box.
    ///
    /// The mask is `min(width, max_width) x min(height, max_height)`; callers pass the part of
    /// the box that can still reach the canvas.
    pub(crate) fn rasterize(&self, max_width: u32, max_height: u32) -> ThumbkitResult<GlyphMask> {
        let width = self.width.min(max_width);
        let height = self.height.min(max_height);
        if u64::from(width) * u64::from(height) > MAX_MASK_PIXELS {
            return Err(ThumbkitError::raster(format!(
                "text mask {width}x{height} exceeds {MAX_MASK_PIXELS} pixels"
            )));
        }
        match &self.shape {
            Shape::Builtin { text, font_size } => {
                Ok(builtin_font::rasterize(text, *font_size, width, height))
            }
            Shape::Outline(_)
                if self.width > MAX_OUTLINE_EXTENT || self.height > MAX_OUTLINE_EXTENT =>
            {
                Err(ThumbkitError::raster(format!(
                    "outline text box {}x{} exceeds {MAX_OUTLINE_EXTENT} px",
                    self.width, self.height
                )))
            }
            Shape::Outline(layout) => rasterize_outline(layout, width, height),
        }
    }
}

/// Upper bound on mask area, far above anything that can reach a canvas.
pub(crate) const MAX_MASK_PIXELS: u64 = 1 << 24;

/// Largest outline text box, in either dimension, that is handed to the glyph rasterizer.
pub(crate) const MAX_OUTLINE_EXTENT: u32 = u16::MAX as u32;

fn rasterize_outline(
    layout: &parley::Layout<TextBrushRgba8>,
    width: u32,
    height: u32,
) -> ThumbkitResult<GlyphMask> {
    if width == 0 || height == 0 {
        return Ok(GlyphMask::new(width, height));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| ThumbkitError::raster("text width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| ThumbkitError::raster("text height exceeds u16"))?;

    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                id: g.id,
                x: g.x,
                y: g.y,
            });
            // The run's own face: glyph ids are only meaningful against it.
            ctx.glyph_run(run.run().font())
                .font_size(run.run().font_size())
                .fill_glyphs(glyphs);
        }
    }
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);

    let mut mask = GlyphMask::new(width, height);
    for (dst, px) in mask
        .alpha
        .iter_mut()
        .zip(pixmap.data_as_u8_slice().chunks_exact(4))
    {
        *dst = px[3];
    }
    Ok(mask)
}
