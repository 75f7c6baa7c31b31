//! Thumbkit composes 1280x720 thumbnails from declarative layouts.
//!
//! A layout arrives as loosely-typed JSON from an upstream generator. It is repaired into a
//! canonical [`LayoutDocument`] and rendered deterministically:
//!
//! - Parse and canonicalize with [`parse_layout`] (or [`validate`] on a [`RawLayoutDocument`])
//! - Optionally cut out the subject with [`prepare_subject`]
//! - Render with [`ThumbnailRenderer`] and export with [`encode`] / [`save`]
//!
//! Rendering never fails because of bad input: unparseable colors paint black, unusable fonts
//! degrade to a built-in bitmap face, and elements that cannot be painted are skipped and listed
//! in the [`RenderReport`]. Only canvas allocation failure is returned as an error.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

/// Canvas painters, orchestration and export.
pub mod render;
/// Canonical and wire-level layout models.
pub mod scene;
/// Layout validation and parsing.
pub mod schema;

pub use crate::foundation::core::{CANVAS_HEIGHT, CANVAS_WIDTH, Canvas, Rect, Rgb8};
pub use crate::foundation::error::{ThumbkitError, ThumbkitResult};
pub use crate::foundation::math::{aspect_fit, clamp, lerp};

pub use crate::assets::color::{hex_to_rgb, parse_hex, to_hex};
pub use crate::assets::fonts::{
    DirectoryFonts, FONT_DIR_ENV, FontCandidate, FontProvider, FontResolver, LoadedFont, Platform,
    PlatformFonts, ResolvedFont, SystemFontDb,
};
pub use crate::assets::subject::{
    BackgroundRemover, NEAR_WHITE_THRESHOLD, decode_subject, isolate_foreground_fallback,
    prepare_subject,
};

pub use crate::render::background::paint_background;
pub use crate::render::export::{ExportFormat, ExportOpts, add_border, encode, save};
pub use crate::render::renderer::{
    ElementReport, PaintOutcome, RenderReport, RenderSettings, SkipReason, ThumbnailRenderer,
    render,
};
pub use crate::scene::model::{
    Alignment, Background, Element, FontWeight, GradientDirection, ImageElement, LayoutDocument,
    Stroke, TextElement,
};
pub use crate::scene::raw::{
    RawBackground, RawElement, RawImageElement, RawLayoutDocument, RawStroke, RawTextElement,
};
pub use crate::schema::parse::{parse_layout, parse_layout_value};
pub use crate::schema::validate::{
    Diagnostic, PathElem, Severity, Validated, validate, validate_with_diagnostics,
};
