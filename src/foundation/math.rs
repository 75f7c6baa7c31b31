/// Linear interpolation between two channel values, truncated toward zero.
///
/// `ratio` is expected in `[0, 1]`; values outside are clamped.
pub fn lerp(a: u8, b: u8, ratio: f64) -> u8 {
    let ratio = if ratio.is_finite() {
        ratio.clamp(0.0, 1.0)
    } else {
        0.0
    };
    let v = f64::from(a) + (f64::from(b) - f64::from(a)) * ratio;
    clamp(v as i64, 0, 255) as u8
}

/// Standard clamp that tolerates `lo > hi` by preferring `lo`.
///
/// Dimension-aware clamps compute `hi = canvas - extent`, which goes negative for elements wider
/// than the canvas; those pin to `lo`.
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v > hi {
        if hi < lo { lo } else { hi }
    } else if v < lo {
        lo
    } else {
        v
    }
}

/// Fit `src` inside `box` preserving aspect ratio.
///
/// Exactly one output dimension equals its box counterpart; the other is shrunk (truncated) and
/// never drops below 1. Degenerate sources return the box unchanged.
pub fn aspect_fit(src_w: u32, src_h: u32, box_w: u32, box_h: u32) -> (u32, u32) {
    if src_w == 0 || src_h == 0 || box_w == 0 || box_h == 0 {
        return (box_w, box_h);
    }
    let (sw, sh) = (u64::from(src_w), u64::from(src_h));
    let (bw, bh) = (u64::from(box_w), u64::from(box_h));
    // sw/sh >= bw/bh  <=>  sw*bh >= bw*sh
    if sw * bh >= bw * sh {
        let h = (sh * bw / sw).clamp(1, bh);
        (box_w, h as u32)
    } else {
        let w = (sw * bh / sh).clamp(1, bw);
        (w as u32, box_h)
    }
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// Source-over of an opaque color with coverage `alpha` onto an opaque destination channel.
pub(crate) fn blend_channel(dst: u8, src: u8, alpha: u8) -> u8 {
    let a = u16::from(alpha);
    (mul_div255_u16(u16::from(src), a) + mul_div255_u16(u16::from(dst), 255 - a)).min(255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
