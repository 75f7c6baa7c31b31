//! Subject-image preparation at the background-removal boundary.

use image::{DynamicImage, RgbaImage};

use crate::foundation::error::{ThumbkitError, ThumbkitResult};

/// Channel value above which a pixel counts as near-white background.
pub const NEAR_WHITE_THRESHOLD: u8 = 240;

/// An external service (or local model) that cuts the subject out of a photo.
pub trait BackgroundRemover {
    /// Return an RGBA image whose background is transparent.
    fn remove_background(&self, image: &DynamicImage) -> ThumbkitResult<RgbaImage>;
}

/// Crude foreground isolation: RGBA copy with near-white pixels made fully transparent.
pub fn isolate_foreground_fallback(image: &DynamicImage) -> RgbaImage {
    let mut out = image.to_rgba8();
    for px in out.pixels_mut() {
        let [r, g, b, _] = px.0;
        if r > NEAR_WHITE_THRESHOLD && g > NEAR_WHITE_THRESHOLD && b > NEAR_WHITE_THRESHOLD {
            px.0 = [255, 255, 255, 0];
        }
    }
    out
}

/// Produce the subject image handed to the renderer.
///
/// Uses `remover` when present and successful; otherwise applies
/// [`isolate_foreground_fallback`].
pub fn prepare_subject(
    remover: Option<&dyn BackgroundRemover>,
    image: &DynamicImage,
) -> DynamicImage {
    if let Some(remover) = remover {
        match remover.remove_background(image) {
            Ok(cut) => return DynamicImage::ImageRgba8(cut),
            Err(e) => {
                tracing::warn!(error = %e, "background removal failed; using near-white fallback");
            }
        }
    }
    DynamicImage::ImageRgba8(isolate_foreground_fallback(image))
}

/// Decode subject bytes in any format the `image` crate recognizes.
pub fn decode_subject(bytes: &[u8]) -> ThumbkitResult<DynamicImage> {
    image::load_from_memory(bytes).map_err(|e| ThumbkitError::decode(format!("subject image: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/subject.rs"]
mod tests;
