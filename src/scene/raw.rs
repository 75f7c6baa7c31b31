//! Lenient boundary model of the layout JSON produced by the generator.
//!
//! Every field is optional and wrong-typed values read as absent, so any JSON object parses.
//! The validator turns a [`RawLayoutDocument`] into a canonical
//! [`LayoutDocument`](crate::scene::model::LayoutDocument).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::foundation::error::{ThumbkitError, ThumbkitResult};
use crate::scene::lenient;

/// Untrusted layout document.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawLayoutDocument {
    /// Background, if present and an object.
    #[serde(default, deserialize_with = "lenient::object")]
    pub background: Option<RawBackground>,
    /// Elements, if present and an array.
    #[serde(default, deserialize_with = "lenient::elements")]
    pub elements: Option<Vec<RawElement>>,
}

impl RawLayoutDocument {
    /// Parse JSON text. Fails only if the text is not JSON or not an object.
    pub fn from_json_str(s: &str) -> ThumbkitResult<Self> {
        let v: Value = serde_json::from_str(s)
            .map_err(|e| ThumbkitError::decode(format!("layout json: {e}")))?;
        Self::from_value(v)
    }

    /// Interpret an already-parsed JSON value. Fails only if it is not an object.
    pub fn from_value(v: Value) -> ThumbkitResult<Self> {
        if !v.is_object() {
            return Err(ThumbkitError::decode("layout json must be an object"));
        }
        serde_json::from_value(v).map_err(|e| ThumbkitError::decode(format!("layout json: {e}")))
    }
}

/// Untrusted background.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawBackground {
    /// `solid` or `gradient`.
    #[serde(rename = "type", default, deserialize_with = "lenient::string")]
    pub kind: Option<String>,
    /// Solid fill color.
    #[serde(default, deserialize_with = "lenient::string")]
    pub color: Option<String>,
    /// Gradient start color.
    #[serde(default, deserialize_with = "lenient::string")]
    pub gradient_start: Option<String>,
    /// Gradient end color.
    #[serde(default, deserialize_with = "lenient::string")]
    pub gradient_end: Option<String>,
    /// `horizontal`, `vertical` or `diagonal`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub direction: Option<String>,
}

/// Untrusted element, dispatched on its `type` field.
#[derive(Clone, Debug, PartialEq)]
pub enum RawElement {
    /// `"type": "text"`.
    Text(RawTextElement),
    /// `"type": "image"`.
    Image(RawImageElement),
    /// Anything else, including non-objects and missing `type`.
    Unknown {
        /// The `type` string, if there was one.
        kind: Option<String>,
    },
}

impl RawElement {
    /// Classify a JSON value.
    pub fn from_value(v: Value) -> Self {
        let kind = v
            .get("type")
            .and_then(Value::as_str)
            .map(|s| s.trim().to_ascii_lowercase());
        let parsed = match kind.as_deref() {
            Some("text") => serde_json::from_value(v).map(Self::Text).ok(),
            Some("image") => serde_json::from_value(v).map(Self::Image).ok(),
            _ => None,
        };
        parsed.unwrap_or(Self::Unknown { kind })
    }
}

impl<'de> Deserialize<'de> for RawElement {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(Self::from_value(Value::deserialize(deserializer)?))
    }
}

/// Untrusted text element.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTextElement {
    /// Free-form role tag such as `title`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub role: Option<String>,
    /// Text to draw.
    #[serde(default, deserialize_with = "lenient::string")]
    pub content: Option<String>,
    /// Anchor x in canvas pixels.
    #[serde(default, deserialize_with = "lenient::int")]
    pub x: Option<i64>,
    /// Top edge in canvas pixels.
    #[serde(default, deserialize_with = "lenient::int")]
    pub y: Option<i64>,
    /// Font size in pixels.
    #[serde(default, deserialize_with = "lenient::int")]
    pub font_size: Option<i64>,
    /// Fill color, `#RRGGBB`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub color: Option<String>,
    /// `bold` or `normal`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub font_weight: Option<String>,
    /// `left`, `center` or `right`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub alignment: Option<String>,
    /// Outline, if present and an object.
    #[serde(default, deserialize_with = "lenient::object")]
    pub stroke: Option<RawStroke>,
}

/// Untrusted text outline.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawStroke {
    /// Outline color, `#RRGGBB`.
    #[serde(default, deserialize_with = "lenient::string")]
    pub color: Option<String>,
    /// Outline radius in pixels.
    #[serde(default, deserialize_with = "lenient::int")]
    pub width: Option<i64>,
}

/// Untrusted image slot.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct RawImageElement {
    /// Left edge of the slot.
    #[serde(default, deserialize_with = "lenient::int")]
    pub x: Option<i64>,
    /// Top edge of the slot.
    #[serde(default, deserialize_with = "lenient::int")]
    pub y: Option<i64>,
    /// Slot width.
    #[serde(default, deserialize_with = "lenient::int")]
    pub width: Option<i64>,
    /// Slot height.
    #[serde(default, deserialize_with = "lenient::int")]
    pub height: Option<i64>,
    /// Rotation in degrees; carried but not applied.
    #[serde(default, deserialize_with = "lenient::int")]
    pub rotation: Option<i64>,
}

#[cfg(test)]
#[path = "../../tests/unit/scene/raw.rs"]
mod tests;
