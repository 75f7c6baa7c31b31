//! Canonicalizing validation with path-tagged diagnostics.

use std::fmt;

use crate::assets::color::parse_hex;
use crate::foundation::core::{CANVAS_HEIGHT, CANVAS_WIDTH};
use crate::foundation::math::clamp;
use crate::scene::model::{
    Alignment, Background, Element, FontWeight, GradientDirection, ImageElement, LayoutDocument,
    ROLE_SUBTITLE, ROLE_TITLE, Stroke, TextElement,
};
use crate::scene::raw::{
    RawBackground, RawElement, RawImageElement, RawLayoutDocument, RawStroke, RawTextElement,
};

/// Default fill color for text.
pub const DEFAULT_TEXT_COLOR: &str = "#FFFFFF";
/// Default outline color for text.
pub const DEFAULT_STROKE_COLOR: &str = "#000000";
/// Default font size for `title` text.
pub const TITLE_FONT_SIZE: u32 = 72;
/// Default font size for any other text.
pub const BODY_FONT_SIZE: u32 = 36;
/// Default outline width for `title` text.
pub const TITLE_STROKE_WIDTH: u32 = 4;
/// Default outline width for any other text.
pub const BODY_STROKE_WIDTH: u32 = 3;
/// Default image slot edge length.
pub const DEFAULT_IMAGE_SIZE: u32 = 350;

/// One step in a JSON path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathElem {
    /// Object field.
    Field(&'static str),
    /// Array index.
    Index(usize),
}

/// How much a diagnostic matters to a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// A field was absent and filled with its default.
    Info,
    /// The input was out of domain and repaired, or an expectation was not met.
    Warning,
}

/// Advisory note produced while canonicalizing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Location in the input document.
    pub path: Vec<PathElem>,
    /// Severity.
    pub severity: Severity,
    /// Human readable description.
    pub message: String,
}

impl Diagnostic {
    fn at(path: &[PathElem], severity: Severity, message: impl Into<String>) -> Self {
        Self {
            path: path.to_vec(),
            severity,
            message: message.into(),
        }
    }

    /// Path formatted as `$.elements[0].fontSize`.
    pub fn path_string(&self) -> String {
        let mut s = String::from("$");
        for p in &self.path {
            match *p {
                PathElem::Field(name) => {
                    s.push('.');
                    s.push_str(name);
                }
                PathElem::Index(i) => {
                    s.push('[');
                    s.push_str(&i.to_string());
                    s.push(']');
                }
            }
        }
        s
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path_string(), self.message)
    }
}

/// Canonical layout plus everything the validator noticed on the way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated {
    /// Fully defaulted and clamped layout.
    pub layout: LayoutDocument,
    /// Advisory notes, in document order.
    pub diagnostics: Vec<Diagnostic>,
}

impl Validated {
    /// Diagnostics at [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

/// Canonicalize an untrusted layout. Never fails.
///
/// Diagnostics are emitted through `tracing` (warnings at WARN, defaults at DEBUG).
#[tracing::instrument(skip(raw))]
pub fn validate(raw: RawLayoutDocument) -> LayoutDocument {
    let validated = validate_with_diagnostics(raw);
    for d in &validated.diagnostics {
        match d.severity {
            Severity::Warning => tracing::warn!(path = %d.path_string(), "{}", d.message),
            Severity::Info => tracing::debug!(path = %d.path_string(), "{}", d.message),
        }
    }
    validated.layout
}

/// Canonicalize an untrusted layout and return the diagnostics as data.
pub fn validate_with_diagnostics(raw: RawLayoutDocument) -> Validated {
    let mut v = Validator::default();
    let background = v.background(raw.background);
    let elements = v.elements(raw.elements);
    let layout = LayoutDocument {
        background,
        elements,
    };
    v.check_roles(&layout);
    Validated {
        layout,
        diagnostics: v.diagnostics,
    }
}

#[derive(Default)]
struct Validator {
    diagnostics: Vec<Diagnostic>,
}

impl Validator {
    fn info(&mut self, path: &[PathElem], message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::at(path, Severity::Info, message));
    }

    fn warn(&mut self, path: &[PathElem], message: impl Into<String>) {
        self.diagnostics
            .push(Diagnostic::at(path, Severity::Warning, message));
    }

    fn color_or(&mut self, path: &[PathElem], value: Option<String>, default: &str) -> String {
        match value {
            Some(c) => {
                if parse_hex(&c).is_none() {
                    self.warn(path, format!("\"{c}\" is not a #RRGGBB color; renders as black"));
                }
                c
            }
            None => {
                self.info(path, format!("missing; defaulted to {default}"));
                default.to_owned()
            }
        }
    }

    fn coord(&mut self, path: &[PathElem], value: Option<i64>, hi: u32) -> i32 {
        let Some(v) = value else {
            self.info(path, "missing; defaulted to 0");
            return 0;
        };
        let c = clamp(v, 0, i64::from(hi));
        if c != v {
            self.warn(path, format!("{v} clamped to {c}"));
        }
        c as i32
    }

    fn positive(&mut self, path: &[PathElem], value: Option<i64>, default: u32) -> u32 {
        match value {
            Some(v) if v > 0 => u32::try_from(v).unwrap_or(u32::MAX),
            Some(v) => {
                self.warn(path, format!("{v} is not positive; defaulted to {default}"));
                default
            }
            None => {
                self.info(path, format!("missing; defaulted to {default}"));
                default
            }
        }
    }

    fn background(&mut self, raw: Option<RawBackground>) -> Background {
        let path = [PathElem::Field("background")];
        let Some(bg) = raw else {
            self.info(&path, "missing; defaulted to the standard gradient");
            return Background::default();
        };

        let kind = bg.kind.as_deref().map(|k| k.trim().to_ascii_lowercase());
        let kind = match kind {
            Some(k) => k,
            None if bg.gradient_start.is_some() || bg.gradient_end.is_some() => {
                "gradient".to_owned()
            }
            None => "solid".to_owned(),
        };

        match kind.as_str() {
            "solid" => Background::Solid {
                color: self.color_or(
                    &[PathElem::Field("background"), PathElem::Field("color")],
                    bg.color,
                    "#FFFFFF",
                ),
            },
            "gradient" => {
                let start = self.color_or(
                    &[PathElem::Field("background"), PathElem::Field("gradientStart")],
                    bg.gradient_start,
                    "#FFFFFF",
                );
                let end = self.color_or(
                    &[PathElem::Field("background"), PathElem::Field("gradientEnd")],
                    bg.gradient_end,
                    "#000000",
                );
                let dir_path = [PathElem::Field("background"), PathElem::Field("direction")];
                let direction = match bg.direction {
                    None => GradientDirection::default(),
                    Some(d) => GradientDirection::parse(&d).unwrap_or_else(|| {
                        self.warn(&dir_path, format!("unknown direction \"{d}\"; using horizontal"));
                        GradientDirection::default()
                    }),
                };
                Background::Gradient {
                    start,
                    end,
                    direction,
                }
            }
            other => {
                self.warn(
                    &[PathElem::Field("background"), PathElem::Field("type")],
                    format!("unknown background type \"{other}\"; using the standard gradient"),
                );
                Background::default()
            }
        }
    }

    fn elements(&mut self, raw: Option<Vec<RawElement>>) -> Vec<Element> {
        let Some(raw) = raw else {
            self.info(&[PathElem::Field("elements")], "missing; defaulted to []");
            return Vec::new();
        };
        let mut out = Vec::with_capacity(raw.len());
        for (i, el) in raw.into_iter().enumerate() {
            let base = [PathElem::Field("elements"), PathElem::Index(i)];
            match el {
                RawElement::Text(t) => out.push(Element::Text(self.text(&base, t))),
                RawElement::Image(img) => out.push(Element::Image(self.image(&base, img))),
                RawElement::Unknown { kind } => {
                    let kind = kind.unwrap_or_else(|| "<none>".to_owned());
                    self.warn(&base, format!("dropped element of unknown type \"{kind}\""));
                }
            }
        }
        out
    }

    fn text(&mut self, base: &[PathElem; 2], raw: RawTextElement) -> TextElement {
        let field = |name: &'static str| [base[0], base[1], PathElem::Field(name)];
        let is_title = raw.role.as_deref() == Some(ROLE_TITLE);
        let (size_default, stroke_default) = if is_title {
            (TITLE_FONT_SIZE, TITLE_STROKE_WIDTH)
        } else {
            (BODY_FONT_SIZE, BODY_STROKE_WIDTH)
        };

        let content = raw.content.unwrap_or_else(|| {
            self.info(&field("content"), "missing; defaulted to \"\"");
            String::new()
        });
        let x = self.coord(&field("x"), raw.x, CANVAS_WIDTH);
        let y = self.coord(&field("y"), raw.y, CANVAS_HEIGHT);
        let font_size = self.positive(&field("fontSize"), raw.font_size, size_default);
        let color = self.color_or(&field("color"), raw.color, DEFAULT_TEXT_COLOR);

        let font_weight = match raw.font_weight {
            None => {
                self.info(&field("fontWeight"), "missing; defaulted to bold");
                FontWeight::default()
            }
            Some(w) => FontWeight::parse(&w).unwrap_or_else(|| {
                self.warn(&field("fontWeight"), format!("unknown weight \"{w}\"; using bold"));
                FontWeight::default()
            }),
        };
        let alignment = match raw.alignment {
            None => {
                self.info(&field("alignment"), "missing; defaulted to left");
                Alignment::default()
            }
            Some(a) => Alignment::parse(&a).unwrap_or_else(|| {
                self.warn(&field("alignment"), format!("unknown alignment \"{a}\"; using left"));
                Alignment::default()
            }),
        };

        let stroke = self.stroke(&field("stroke"), raw.stroke, stroke_default);

        TextElement {
            role: raw.role,
            content,
            x,
            y,
            font_size,
            color,
            font_weight,
            alignment,
            stroke,
        }
    }

    fn stroke(&mut self, path: &[PathElem; 3], raw: Option<RawStroke>, width_default: u32) -> Stroke {
        let Some(raw) = raw else {
            self.info(
                path,
                format!("missing; defaulted to {DEFAULT_STROKE_COLOR} width {width_default}"),
            );
            return Stroke {
                color: DEFAULT_STROKE_COLOR.to_owned(),
                width: width_default,
            };
        };
        let sub = |name: &'static str| [path[0], path[1], path[2], PathElem::Field(name)];
        let color = self.color_or(&sub("color"), raw.color, DEFAULT_STROKE_COLOR);
        let width = match raw.width {
            None => {
                self.info(&sub("width"), format!("missing; defaulted to {width_default}"));
                width_default
            }
            Some(w) if w < 0 => {
                self.warn(&sub("width"), format!("{w} is negative; using 0"));
                0
            }
            Some(w) => u32::try_from(w).unwrap_or(u32::MAX),
        };
        Stroke { color, width }
    }

    fn image(&mut self, base: &[PathElem; 2], raw: RawImageElement) -> ImageElement {
        let field = |name: &'static str| [base[0], base[1], PathElem::Field(name)];
        let x = self.coord(&field("x"), raw.x, CANVAS_WIDTH);
        let y = self.coord(&field("y"), raw.y, CANVAS_HEIGHT);
        let width = self.positive(&field("width"), raw.width, DEFAULT_IMAGE_SIZE);
        let height = self.positive(&field("height"), raw.height, DEFAULT_IMAGE_SIZE);
        if let Some(r) = raw.rotation
            && r != 0
        {
            self.warn(&field("rotation"), format!("rotation {r} is not supported; using 0"));
        }
        ImageElement {
            x,
            y,
            width,
            height,
            rotation: 0,
        }
    }

    fn check_roles(&mut self, layout: &LayoutDocument) {
        for role in [ROLE_TITLE, ROLE_SUBTITLE] {
            let found = layout
                .texts()
                .any(|(_, t)| t.role.as_deref() == Some(role));
            if !found {
                self.warn(
                    &[PathElem::Field("elements")],
                    format!("no text element with role \"{role}\""),
                );
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/schema/validate.rs"]
mod tests;
