//! Parsing and canonicalizing layouts.

/// Payload parsing with fallback.
pub mod parse;
/// Canonicalizing validation.
pub mod validate;
