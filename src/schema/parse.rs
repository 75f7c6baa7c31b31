//! Entry points for layout payloads arriving from the generator.

use serde_json::Value;

use crate::scene::model::LayoutDocument;
use crate::scene::raw::RawLayoutDocument;
use crate::schema::validate::validate;

/// Parse and canonicalize a layout payload.
///
/// A payload that is not JSON, or not a JSON object, is replaced by
/// [`LayoutDocument::fallback`] and never reaches the validator.
pub fn parse_layout(json: &str) -> LayoutDocument {
    match RawLayoutDocument::from_json_str(json) {
        Ok(raw) => validate(raw),
        Err(e) => {
            tracing::warn!(error = %e, "unparseable layout; using fallback layout");
            LayoutDocument::fallback()
        }
    }
}

/// Like [`parse_layout`], for a payload that is already a JSON value.
pub fn parse_layout_value(value: Value) -> LayoutDocument {
    match RawLayoutDocument::from_value(value) {
        Ok(raw) => validate(raw),
        Err(e) => {
            tracing::warn!(error = %e, "layout is not an object; using fallback layout");
            LayoutDocument::fallback()
        }
    }
}
