//! Core types, errors and integer math shared by every layer.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
