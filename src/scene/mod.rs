//! Layout models: the untrusted wire shape and the canonical form.

pub(crate) mod lenient;
/// Canonical layout model.
pub mod model;
/// Lenient wire model.
pub mod raw;
