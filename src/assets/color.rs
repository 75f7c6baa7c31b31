//! `#RRGGBB` color parsing.

use crate::foundation::core::Rgb8;

/// Strict `#RRGGBB` parse. The leading `#` is optional; surrounding whitespace is ignored.
pub fn parse_hex(s: &str) -> Option<Rgb8> {
    let s = s.trim();
    let s = s.strip_prefix('#').unwrap_or(s);
    if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&s[i..i + 2], 16).ok();
    Some(Rgb8::new(byte(0)?, byte(2)?, byte(4)?))
}

/// Parse `#RRGGBB`, failing closed to black.
pub fn hex_to_rgb(s: &str) -> Rgb8 {
    parse_hex(s).unwrap_or(Rgb8::BLACK)
}

/// Format as uppercase `#RRGGBB`.
pub fn to_hex(c: Rgb8) -> String {
    format!("#{:02X}{:02X}{:02X}", c.r, c.g, c.b)
}
