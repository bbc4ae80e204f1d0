//! Color parsing: 24-bit hex (`#RRGGBB`, `0xRRGGBB`, `RRGGBB`).

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use crate::properties::PropertyError;

/// 8-bit sRGB fill color for the watermark.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Create a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black, the default watermark color.
    pub const fn black() -> Self {
        Self::new(0, 0, 0)
    }

    /// Channels scaled to `0.0..=1.0`, as PDF `rg` operands expect.
    pub fn to_unit(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl FromStr for Rgb {
    type Err = PropertyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_color(s)
    }
}

/// Parse a hex color string into an [`Rgb`].
///
/// Accepts, case-insensitively:
/// - `#RRGGBB`
/// - `0xRRGGBB`
/// - `RRGGBB`
///
/// Empty or blank input means "no override" and yields black. Anything else
/// that is not exactly six hex digits after the prefix is rejected with
/// [`PropertyError::InvalidColorFormat`].
pub fn parse_hex_color(s: &str) -> Result<Rgb, PropertyError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Ok(Rgb::black());
    }

    let hex = strip_prefix(trimmed);
    parse_hex(hex).ok_or_else(|| PropertyError::InvalidColorFormat(String::from(s)))
}

fn strip_prefix(s: &str) -> &str {
    if let Some(rest) = s.strip_prefix('#') {
        return rest;
    }
    match s.as_bytes() {
        [b'0', b'x' | b'X', ..] => &s[2..],
        _ => s,
    }
}

fn parse_hex(hex: &str) -> Option<Rgb> {
    let bytes = hex.as_bytes();
    if bytes.len() != 6 {
        return None;
    }
    let r = parse_byte(bytes[0], bytes[1])?;
    let g = parse_byte(bytes[2], bytes[3])?;
    let b = parse_byte(bytes[4], bytes[5])?;
    Some(Rgb { r, g, b })
}

fn hex_val(ch: u8) -> Option<u8> {
    match ch {
        b'0'..=b'9' => Some(ch - b'0'),
        b'a'..=b'f' => Some(ch - b'a' + 10),
        b'A'..=b'F' => Some(ch - b'A' + 10),
        _ => None,
    }
}

fn parse_byte(hi: u8, lo: u8) -> Option<u8> {
    Some(hex_val(hi)? << 4 | hex_val(lo)?)
}
