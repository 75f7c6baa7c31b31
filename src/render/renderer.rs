//! Render orchestration and per-element reporting.

use std::fmt;
use std::path::PathBuf;

use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};

use crate::assets::fonts::FontResolver;
use crate::foundation::core::{Canvas, Rect, Rgb8};
use crate::foundation::error::ThumbkitResult;
use crate::render::background::paint_background;
use crate::render::subject::draw_image;
use crate::render::text::TextPainter;
use crate::scene::model::LayoutDocument;

/// Why an element left the canvas untouched.
#[derive(Clone, Debug, PartialEq)]
pub enum SkipReason {
    /// Image element with no subject image supplied.
    NoSubject,
    /// Text element whose content is empty or whitespace only.
    EmptyContent,
    /// The selected face could not shape the content.
    FontFailure(String),
    /// Glyph or subject rasterization failed.
    RasterFailure(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSubject => f.write_str("no subject image"),
            Self::EmptyContent => f.write_str("empty content"),
            Self::FontFailure(msg) => write!(f, "font failure: {msg}"),
            Self::RasterFailure(msg) => write!(f, "raster failure: {msg}"),
        }
    }
}

/// Result of painting one element.
#[derive(Clone, Debug, PartialEq)]
pub enum PaintOutcome {
    /// Painted; `bounds` is the element box clipped to the canvas (stroke not included).
    Painted {
        /// Pixel box in canvas coordinates.
        bounds: Rect,
    },
    /// Not painted.
    Skipped(SkipReason),
}

/// Outcome for the element at `index` in the layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ElementReport {
    /// Position of the element in [`LayoutDocument::elements`].
    pub index: usize,
    /// What happened to it.
    pub outcome: PaintOutcome,
}

/// Per-element outcomes in paint order (images first, then text).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RenderReport {
    /// One entry per visited element, in paint order.
    pub elements: Vec<ElementReport>,
}

impl RenderReport {
    /// Outcome for layout element `index`, if it was visited.
    pub fn outcome(&self, index: usize) -> Option<&PaintOutcome> {
        self.elements
            .iter()
            .find(|e| e.index == index)
            .map(|e| &e.outcome)
    }

    /// `(index, bounds)` of every painted element.
    pub fn painted(&self) -> impl Iterator<Item = (usize, Rect)> + '_ {
        self.elements.iter().filter_map(|e| match e.outcome {
            PaintOutcome::Painted { bounds } => Some((e.index, bounds)),
            PaintOutcome::Skipped(_) => None,
        })
    }

    /// `(index, reason)` of every skipped element.
    pub fn skipped(&self) -> impl Iterator<Item = (usize, &SkipReason)> + '_ {
        self.elements.iter().filter_map(|e| match &e.outcome {
            PaintOutcome::Painted { .. } => None,
            PaintOutcome::Skipped(r) => Some((e.index, r)),
        })
    }
}

/// Renderer configuration.
#[derive(Clone, Debug)]
pub struct RenderSettings {
    /// Directories searched for fonts before the platform tables.
    pub font_dirs: Vec<PathBuf>,
    /// Whether to consult the system font database.
    pub system_fonts: bool,
    /// Resampling filter for the subject image.
    pub subject_filter: FilterType,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            font_dirs: Vec::new(),
            system_fonts: true,
            subject_filter: FilterType::Lanczos3,
        }
    }
}

impl RenderSettings {
    /// Add a font directory, searched in insertion order.
    pub fn with_font_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.font_dirs.push(dir.into());
        self
    }

    /// Enable or disable the system font database.
    pub fn with_system_fonts(mut self, enabled: bool) -> Self {
        self.system_fonts = enabled;
        self
    }

    /// Set the subject resampling filter.
    pub fn with_subject_filter(mut self, filter: FilterType) -> Self {
        self.subject_filter = filter;
        self
    }
}

#[derive(Debug)]
enum Fonts {
    Shared(&'static FontResolver),
    Owned(FontResolver),
}

impl Fonts {
    fn get(&self) -> &FontResolver {
        match self {
            Self::Shared(r) => r,
            Self::Owned(r) => r,
        }
    }
}

/// Composes a [`LayoutDocument`] and an optional subject image into a 1280x720 canvas.
///
/// Holds no per-render state; one renderer may be shared across threads.
#[derive(Debug)]
pub struct ThumbnailRenderer {
    fonts: Fonts,
    subject_filter: FilterType,
}

impl Default for ThumbnailRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl ThumbnailRenderer {
    /// Renderer backed by the process-wide [`FontResolver::shared`].
    pub fn new() -> Self {
        Self {
            fonts: Fonts::Shared(FontResolver::shared()),
            subject_filter: FilterType::Lanczos3,
        }
    }

    /// Renderer configured from `settings`. Default font settings reuse the shared resolver.
    pub fn from_settings(settings: RenderSettings) -> Self {
        let fonts = if settings.font_dirs.is_empty() && settings.system_fonts {
            Fonts::Shared(FontResolver::shared())
        } else {
            Fonts::Owned(FontResolver::with_options(
                settings.font_dirs,
                settings.system_fonts,
            ))
        };
        Self {
            fonts,
            subject_filter: settings.subject_filter,
        }
    }

    /// Renderer with an explicit font resolver.
    pub fn with_fonts(fonts: FontResolver) -> Self {
        Self {
            fonts: Fonts::Owned(fonts),
            subject_filter: FilterType::Lanczos3,
        }
    }

    /// Renderer that draws all text with the built-in bitmap font. Output does not depend on
    /// installed fonts.
    pub fn builtin_fonts() -> Self {
        Self::with_fonts(FontResolver::builtin_only())
    }

    /// Replace the subject resampling filter.
    pub fn with_subject_filter(mut self, filter: FilterType) -> Self {
        self.subject_filter = filter;
        self
    }

    /// Font resolver used for text elements.
    pub fn fonts(&self) -> &FontResolver {
        self.fonts.get()
    }

    /// Render `layout`. Only canvas allocation failure is returned as an error.
    pub fn render(
        &self,
        layout: &LayoutDocument,
        subject: Option<&DynamicImage>,
    ) -> ThumbkitResult<RgbaImage> {
        self.render_with_report(layout, subject).map(|(img, _)| img)
    }

    /// Render `layout` and report what happened to each element.
    #[tracing::instrument(skip_all, fields(elements = layout.elements.len(), subject = subject.is_some()))]
    pub fn render_with_report(
        &self,
        layout: &LayoutDocument,
        subject: Option<&DynamicImage>,
    ) -> ThumbkitResult<(RgbaImage, RenderReport)> {
        let mut canvas = Canvas::THUMBNAIL.allocate(Rgb8::WHITE)?;
        paint_background(&mut canvas, &layout.background);

        let mut report = RenderReport::default();
        for (index, el) in layout.images() {
            let outcome = match subject {
                Some(subject) => draw_image(&mut canvas, el, subject, self.subject_filter),
                None => PaintOutcome::Skipped(SkipReason::NoSubject),
            };
            report.push(index, outcome);
        }

        let mut painter = TextPainter::new(self.fonts.get());
        for (index, el) in layout.texts() {
            let outcome = painter.draw(&mut canvas, el);
            report.push(index, outcome);
        }

        Ok((canvas, report))
    }
}

impl RenderReport {
    fn push(&mut self, index: usize, outcome: PaintOutcome) {
        if let PaintOutcome::Skipped(reason) = &outcome {
            match reason {
                SkipReason::NoSubject | SkipReason::EmptyContent => {
                    tracing::debug!(index, %reason, "element skipped")
                }
                SkipReason::FontFailure(_) | SkipReason::RasterFailure(_) => {
                    tracing::warn!(index, %reason, "element skipped")
                }
            }
        }
        self.elements.push(ElementReport { index, outcome });
    }
}

/// Render with the default [`ThumbnailRenderer`].
pub fn render(layout: &LayoutDocument, subject: Option<&DynamicImage>) -> ThumbkitResult<RgbaImage> {
    ThumbnailRenderer::new().render(layout, subject)
}

#[cfg(test)]
#[path = "../../tests/unit/render/renderer.rs"]
mod tests;
