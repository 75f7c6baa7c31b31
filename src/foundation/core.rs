use crate::foundation::error::{ThumbkitError, ThumbkitResult};

pub use kurbo::Rect;

/// Output width of every thumbnail, in pixels.
pub const CANVAS_WIDTH: u32 = 1280;
/// Output height of every thumbnail, in pixels.
pub const CANVAS_HEIGHT: u32 = 720;

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Canvas {
    /// The fixed 1280x720 thumbnail canvas.
    pub const THUMBNAIL: Canvas = Canvas {
        width: CANVAS_WIDTH,
        height: CANVAS_HEIGHT,
    };

    /// Number of pixels covered by the canvas.
    pub fn pixel_count(self) -> usize {
        (self.width as usize).saturating_mul(self.height as usize)
    }

    /// Allocate an opaque RGBA canvas filled with `fill`.
    ///
    /// Allocation uses `try_reserve_exact`, so an impossible size surfaces as
    /// [`ThumbkitError::Allocation`] instead of aborting the process.
    pub fn allocate(self, fill: Rgb8) -> ThumbkitResult<image::RgbaImage> {
        let len = self.pixel_count().checked_mul(4).ok_or_else(|| {
            ThumbkitError::allocation(format!(
                "canvas {}x{} overflows the address space",
                self.width, self.height
            ))
        })?;
        let mut data = Vec::<u8>::new();
        data.try_reserve_exact(len).map_err(|e| {
            ThumbkitError::allocation(format!(
                "canvas {}x{} ({len} bytes): {e}",
                self.width, self.height
            ))
        })?;
        let px = [fill.r, fill.g, fill.b, 255];
        for _ in 0..self.pixel_count() {
            data.extend_from_slice(&px);
        }
        image::RgbaImage::from_raw(self.width, self.height, data)
            .ok_or_else(|| ThumbkitError::allocation("canvas buffer length mismatch"))
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self::THUMBNAIL
    }
}

/// Straight (opaque) RGB8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Opaque black.
    pub const BLACK: Rgb8 = Rgb8::new(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Rgb8 = Rgb8::new(255, 255, 255);

    /// Construct from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an `(r, g, b)` tuple.
    pub fn to_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Opaque RGBA pixel.
    pub fn to_rgba(self) -> image::Rgba<u8> {
        image::Rgba([self.r, self.g, self.b, 255])
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
