//! Encoding and post-processing of finished thumbnails.

use std::path::Path;

use anyhow::Context;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::foundation::core::Rgb8;
use crate::foundation::error::{ThumbkitError, ThumbkitResult};

/// Output encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    /// Lossless, keeps alpha.
    #[default]
    Png,
    /// Lossy, alpha dropped.
    Jpeg,
}

impl ExportFormat {
    /// Pick a format from the file extension (`png`, `jpg`, `jpeg`; case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }
}

/// Encoder selection for [`encode`] and [`save`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExportOpts {
    /// Output container.
    pub format: ExportFormat,
    /// JPEG quality, 1..=100. Ignored for PNG.
    pub jpeg_quality: u8,
}

impl Default for ExportOpts {
    fn default() -> Self {
        Self {
            format: ExportFormat::Png,
            jpeg_quality: 90,
        }
    }
}

impl ExportOpts {
    /// Lossless PNG.
    pub fn png() -> Self {
        Self::default()
    }

    /// Baseline JPEG at `quality`, clamped to 1..=100 when encoding.
    pub fn jpeg(quality: u8) -> Self {
        Self {
            format: ExportFormat::Jpeg,
            jpeg_quality: quality,
        }
    }
}

/// Encode `canvas` in memory.
pub fn encode(canvas: &RgbaImage, opts: &ExportOpts) -> ThumbkitResult<Vec<u8>> {
    let (w, h) = canvas.dimensions();
    let mut out = Vec::new();
    match opts.format {
        ExportFormat::Png => PngEncoder::new(&mut out)
            .write_image(canvas.as_raw(), w, h, ExtendedColorType::Rgba8)
            .map_err(|e| ThumbkitError::encode(format!("png: {e}")))?,
        ExportFormat::Jpeg => {
            let rgb = image::DynamicImage::ImageRgba8(canvas.clone()).to_rgb8();
            JpegEncoder::new_with_quality(&mut out, opts.jpeg_quality.clamp(1, 100))
                .write_image(rgb.as_raw(), w, h, ExtendedColorType::Rgb8)
                .map_err(|e| ThumbkitError::encode(format!("jpeg: {e}")))?
        }
    }
    Ok(out)
}

/// Encode `canvas` and write it to `path`.
pub fn save(canvas: &RgbaImage, path: &Path, opts: &ExportOpts) -> ThumbkitResult<()> {
    let bytes = encode(canvas, opts)?;
    std::fs::write(path, bytes).with_context(|| format!("write '{}'", path.display()))?;
    Ok(())
}

/// Draw `width` nested one-pixel rectangle outlines, outermost on the canvas edge.
pub fn add_border(canvas: &mut RgbaImage, width: u32, color: Rgb8) {
    let (w, h) = canvas.dimensions();
    let px = color.to_rgba();
    for i in 0..width {
        if 2 * i >= w || 2 * i >= h {
            break;
        }
        let (x0, y0, x1, y1) = (i, i, w - 1 - i, h - 1 - i);
        for x in x0..=x1 {
            canvas.put_pixel(x, y0, px);
            canvas.put_pixel(x, y1, px);
        }
        for y in y0..=y1 {
            canvas.put_pixel(x0, y, px);
            canvas.put_pixel(x1, y, px);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
