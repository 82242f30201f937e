//! Color parsing and the region palette
//!
//! Supports hex color strings: `#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`.

use image::Rgba;
use thiserror::Error;

/// Error type for color parsing failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// Input string was empty
    #[error("empty color string")]
    Empty,
    /// Input string doesn't start with '#'
    #[error("color must start with '#'")]
    MissingHash,
    /// Invalid length (must be 3, 4, 6, or 8 hex chars after #)
    #[error("invalid color length {0}, expected 3, 4, 6, or 8")]
    InvalidLength(usize),
    /// Contains non-hex characters
    #[error("invalid hex character '{0}'")]
    InvalidHex(char),
}

/// Twenty-color categorical palette used for color-style rendering.
///
/// Same ordering as matplotlib's `tab20b`.
pub const TAB20B: [Rgba<u8>; 20] = [
    Rgba([0x39, 0x3b, 0x79, 255]),
    Rgba([0x52, 0x54, 0xa3, 255]),
    Rgba([0x6b, 0x6e, 0xcf, 255]),
    Rgba([0x9c, 0x9e, 0xde, 255]),
    Rgba([0x63, 0x79, 0x39, 255]),
    Rgba([0x8c, 0xa2, 0x52, 255]),
    Rgba([0xb5, 0xcf, 0x6b, 255]),
    Rgba([0xce, 0xdb, 0x9c, 255]),
    Rgba([0x8c, 0x6d, 0x31, 255]),
    Rgba([0xbd, 0x9e, 0x39, 255]),
    Rgba([0xe7, 0xba, 0x52, 255]),
    Rgba([0xe7, 0xcb, 0x94, 255]),
    Rgba([0x84, 0x3c, 0x39, 255]),
    Rgba([0xad, 0x49, 0x4a, 255]),
    Rgba([0xd6, 0x61, 0x6b, 255]),
    Rgba([0xe7, 0x96, 0x9c, 255]),
    Rgba([0x7b, 0x41, 0x73, 255]),
    Rgba([0xa5, 0x51, 0x94, 255]),
    Rgba([0xce, 0x6d, 0xbd, 255]),
    Rgba([0xde, 0x9e, 0xd6, 255]),
];

/// Palette color for the `index`-th distinct value, cycling past 20.
pub fn palette_color(index: usize) -> Rgba<u8> {
    TAB20B[index % TAB20B.len()]
}

/// Palette color of `value` by its rank in the sorted `values`.
///
/// `values` is a grid's `distinct_values()`, background included, so every
/// view of the same grid colors a value identically.
pub fn value_color(values: &[i64], value: i64) -> Rgba<u8> {
    palette_color(values.binary_search(&value).unwrap_or_else(|i| i))
}

/// Parse a hex color string into an RGBA color.
///
/// - `#RGB` - 3-digit hex, each digit is doubled (e.g., `#F00` -> red)
/// - `#RGBA` - 4-digit hex, each digit is doubled
/// - `#RRGGBB` - 6-digit hex, alpha defaults to 255 (opaque)
/// - `#RRGGBBAA` - 8-digit hex, explicit alpha channel
///
/// # Examples
///
/// ```
/// use tetrogrid::color::parse_color;
///
/// assert_eq!(parse_color("#F00").unwrap(), image::Rgba([255, 0, 0, 255]));
/// assert_eq!(parse_color("#333333").unwrap(), image::Rgba([51, 51, 51, 255]));
/// ```
pub fn parse_color(s: &str) -> Result<Rgba<u8>, ColorError> {
    if s.is_empty() {
        return Err(ColorError::Empty);
    }
    let hex = s.strip_prefix('#').ok_or(ColorError::MissingHash)?;

    // Validate all characters are hex
    if let Some(c) = hex.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(ColorError::InvalidHex(c));
    }
    let digits: Vec<u8> = hex.bytes().map(hex_digit).collect();

    match digits.len() {
        3 => Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, 255])),
        4 => Ok(Rgba([digits[0] * 17, digits[1] * 17, digits[2] * 17, digits[3] * 17])),
        6 => Ok(Rgba([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            255,
        ])),
        8 => Ok(Rgba([
            digits[0] * 16 + digits[1],
            digits[2] * 16 + digits[3],
            digits[4] * 16 + digits[5],
            digits[6] * 16 + digits[7],
        ])),
        len => Err(ColorError::InvalidLength(len)),
    }
}

/// Value of an ASCII hex digit already validated by the caller.
fn hex_digit(b: u8) -> u8 {
    match b {
        b'0'..=b'9' => b - b'0',
        b'a'..=b'f' => b - b'a' + 10,
        _ => b - b'A' + 10,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(parse_color("#FFF"), Ok(Rgba([255, 255, 255, 255])));
        assert_eq!(parse_color("#F008"), Ok(Rgba([255, 0, 0, 136])));
        assert_eq!(parse_color("#00ff00"), Ok(Rgba([0, 255, 0, 255])));
        assert_eq!(parse_color("#0000FF80"), Ok(Rgba([0, 0, 255, 128])));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse_color(""), Err(ColorError::Empty));
        assert_eq!(parse_color("333"), Err(ColorError::MissingHash));
        assert_eq!(parse_color("#12345"), Err(ColorError::InvalidLength(5)));
        assert_eq!(parse_color("#GGG"), Err(ColorError::InvalidHex('G')));
    }

    #[test]
    fn test_palette_cycles() {
        assert_eq!(palette_color(0), TAB20B[0]);
        assert_eq!(palette_color(21), TAB20B[1]);
        assert_eq!(value_color(&[0, 4, 9], 9), TAB20B[2]);
        assert_eq!(value_color(&[0, 4, 9], 0), TAB20B[0]);
    }
}
