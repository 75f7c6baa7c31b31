//! Canonical layout model.
//!
//! Values of these types are produced by the validator (or [`LayoutDocument::fallback`]) and are
//! safe to render directly. They serialize to the same JSON grammar the boundary accepts.

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ThumbkitError, ThumbkitResult};

/// Default gradient start when a layout has no background.
pub const DEFAULT_GRADIENT_START: &str = "#FF6B6B";
/// Default gradient end when a layout has no background.
pub const DEFAULT_GRADIENT_END: &str = "#4ECDC4";

/// Background + positioned elements for one thumbnail.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutDocument {
    /// Canvas fill.
    pub background: Background,
    /// Elements in document order.
    pub elements: Vec<Element>,
}

/// How the canvas is filled before elements are painted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Background {
    /// Single color.
    Solid {
        /// `#RRGGBB`.
        color: String,
    },
    /// Two-stop gradient.
    Gradient {
        /// `#RRGGBB` at ratio 0.
        #[serde(rename = "gradientStart")]
        start: String,
        /// `#RRGGBB` at ratio 1.
        #[serde(rename = "gradientEnd")]
        end: String,
        /// Interpolation axis.
        #[serde(default)]
        direction: GradientDirection,
    },
}

impl Default for Background {
    fn default() -> Self {
        Self::Gradient {
            start: DEFAULT_GRADIENT_START.to_owned(),
            end: DEFAULT_GRADIENT_END.to_owned(),
            direction: GradientDirection::Horizontal,
        }
    }
}

/// Gradient interpolation axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientDirection {
    /// Left to right; constant down each column.
    #[default]
    Horizontal,
    /// Top to bottom; constant across each row.
    Vertical,
    /// Distance from the top-left corner over the canvas diagonal length.
    Diagonal,
}

impl GradientDirection {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "horizontal" => Some(Self::Horizontal),
            "vertical" => Some(Self::Vertical),
            "diagonal" => Some(Self::Diagonal),
            _ => None,
        }
    }
}

/// A positioned element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    /// Stroked text.
    Text(TextElement),
    /// Slot for the subject image.
    Image(ImageElement),
}

/// Stroked text element.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextElement {
    /// Semantic role (`title`, `subtitle`, or free-form).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Text to draw, one line.
    pub content: String,
    /// Anchor x; meaning depends on [`TextElement::alignment`].
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Size in pixels, > 0.
    pub font_size: u32,
    /// Fill color `#RRGGBB`.
    pub color: String,
    /// Requested weight.
    pub font_weight: FontWeight,
    /// Horizontal anchoring of `x`.
    pub alignment: Alignment,
    /// Outline drawn under the fill.
    pub stroke: Stroke,
}

impl TextElement {
    /// Whether this element carries the `title` role.
    pub fn is_title(&self) -> bool {
        self.role.as_deref() == Some(ROLE_TITLE)
    }
}

/// Role marking the main title.
pub const ROLE_TITLE: &str = "title";
/// Role marking the subtitle.
pub const ROLE_SUBTITLE: &str = "subtitle";

/// Text outline parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stroke {
    /// Outline color `#RRGGBB`.
    pub color: String,
    /// Outline radius in pixels; 0 disables the outline.
    pub width: u32,
}

/// Font weight request.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    /// Regular cut.
    Normal,
    /// Bold cut.
    #[default]
    Bold,
}

impl FontWeight {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" | "regular" => Some(Self::Normal),
            "bold" => Some(Self::Bold),
            _ => None,
        }
    }
}

/// Horizontal anchoring of a text element's `x`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// `x` is the left edge.
    #[default]
    Left,
    /// `x` is the horizontal center.
    Center,
    /// `x` is the right edge.
    Right,
}

impl Alignment {
    pub(crate) fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Some(Self::Left),
            "center" | "centre" => Some(Self::Center),
            "right" => Some(Self::Right),
            _ => None,
        }
    }

    /// Left edge of a box of `width` anchored at `x`.
    pub fn resolve_x(self, x: i32, width: u32) -> i32 {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        match self {
            Self::Left => x,
            Self::Center => x.saturating_sub(w / 2),
            Self::Right => x.saturating_sub(w),
        }
    }
}

/// Slot for the subject image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageElement {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Maximum width; the subject is aspect-fit inside.
    pub width: u32,
    /// Maximum height; the subject is aspect-fit inside.
    pub height: u32,
    /// Always 0. Rotation is not supported.
    #[serde(default)]
    pub rotation: i32,
}

impl LayoutDocument {
    /// Layout used when the generator's payload cannot be parsed at all.
    pub fn fallback() -> Self {
        Self {
            background: Background::default(),
            elements: vec![
                Element::Text(TextElement {
                    role: Some(ROLE_TITLE.to_owned()),
                    content: "YouTube Thumbnail".to_owned(),
                    x: 100,
                    y: 100,
                    font_size: 72,
                    color: "#FFFFFF".to_owned(),
                    font_weight: FontWeight::Bold,
                    alignment: Alignment::Left,
                    stroke: Stroke {
                        color: "#000000".to_owned(),
                        width: 4,
                    },
                }),
                Element::Text(TextElement {
                    role: Some(ROLE_SUBTITLE.to_owned()),
                    content: "Subtitle".to_owned(),
                    x: 100,
                    y: 220,
                    font_size: 36,
                    color: "#FFFFFF".to_owned(),
                    font_weight: FontWeight::Bold,
                    alignment: Alignment::Left,
                    stroke: Stroke {
                        color: "#000000".to_owned(),
                        width: 3,
                    },
                }),
                Element::Image(ImageElement {
                    x: 800,
                    y: 200,
                    width: 400,
                    height: 400,
                    rotation: 0,
                }),
            ],
        }
    }

    /// Text elements in document order.
    pub fn texts(&self) -> impl Iterator<Item = (usize, &TextElement)> {
        self.elements.iter().enumerate().filter_map(|(i, e)| match e {
            Element::Text(t) => Some((i, t)),
            Element::Image(_) => None,
        })
    }

    /// Image elements in document order.
    pub fn images(&self) -> impl Iterator<Item = (usize, &ImageElement)> {
        self.elements.iter().enumerate().filter_map(|(i, e)| match e {
            Element::Image(img) => Some((i, img)),
            Element::Text(_) => None,
        })
    }

    /// Pretty JSON in the boundary grammar.
    pub fn to_json_pretty(&self) -> ThumbkitResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ThumbkitError::encode(format!("layout json: {e}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
