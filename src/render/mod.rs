//! Canvas painters, orchestration and export.

/// Solid and gradient backgrounds.
pub mod background;
/// PNG/JPEG encoding and borders.
pub mod export;
/// Render orchestration.
pub mod renderer;
pub(crate) mod subject;
pub(crate) mod text;
