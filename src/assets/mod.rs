//! Fonts, text shaping, colors and subject images.

pub(crate) mod builtin_font;
pub mod color;
pub mod fonts;
pub mod subject;
pub(crate) mod text;
