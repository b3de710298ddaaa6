//! Hex color parsing and colorimetric conversions.
//!
//! Every color that enters the palette model passes through [`normalize`],
//! so the rest of the crate only ever sees the canonical `#RRGGBB` form.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors produced while parsing a color.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorError {
    /// The input is not 3 or 6 hex digits (optionally prefixed with `#`).
    #[error("Invalid hex color: '{input}'")]
    InvalidFormat {
        /// The rejected input, as given
        input: String,
    },
}

/// A color in canonical `#RRGGBB` uppercase form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HexColor(String);

impl HexColor {
    /// Parse and normalize a hex string. Equivalent to [`normalize`].
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        normalize(input)
    }

    /// The canonical `#RRGGBB` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Byte channels of this color.
    pub fn rgb(&self) -> Rgb {
        let digits = &self.0.as_bytes()[1..];
        let channel = |i: usize| (hex_value(digits[i]) << 4) | hex_value(digits[i + 1]);
        Rgb::new(channel(0), channel(2), channel(4))
    }

    /// Relative luminance in `[0, 1]`.
    pub fn luminance(&self) -> f64 {
        relative_luminance(self.rgb())
    }

    /// Hue/saturation/brightness components.
    pub fn hsb(&self) -> Hsb {
        Hsb::from(self.rgb())
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        normalize(s)
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<Rgb> for HexColor {
    fn from(rgb: Rgb) -> Self {
        HexColor(format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b))
    }
}

/// Normalize a user-supplied hex string to `#RRGGBB`.
///
/// Surrounding whitespace and one leading `#` are ignored. Exactly 3 or 6
/// hex digits are accepted in any case; the 3-digit form is expanded by
/// doubling each digit.
pub fn normalize(input: &str) -> Result<HexColor, ColorError> {
    let trimmed = input.trim();
    let raw = trimmed.strip_prefix('#').unwrap_or(trimmed);

    let invalid = || ColorError::InvalidFormat {
        input: input.to_string(),
    };

    if !raw.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let mut hex = String::with_capacity(7);
    hex.push('#');
    match raw.len() {
        3 => {
            for c in raw.chars() {
                let upper = c.to_ascii_uppercase();
                hex.push(upper);
                hex.push(upper);
            }
        }
        6 => hex.push_str(&raw.to_ascii_uppercase()),
        _ => return Err(invalid()),
    }

    Ok(HexColor(hex))
}

/// Value of a single ASCII hex digit. Callers guarantee validity.
fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        b'A'..=b'F' => digit - b'A' + 10,
        _ => 0,
    }
}

/// An 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Create a color from byte channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from unit-range components, rounding to the nearest byte.
    pub fn from_unit(unit: UnitRgb) -> Self {
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        Self::new(to_byte(unit.r), to_byte(unit.g), to_byte(unit.b))
    }

    /// Components scaled to `[0, 1]`.
    pub fn to_unit(self) -> UnitRgb {
        UnitRgb {
            r: f64::from(self.r) / 255.0,
            g: f64::from(self.g) / 255.0,
            b: f64::from(self.b) / 255.0,
        }
    }

    /// Canonical hex form.
    pub fn to_hex(self) -> HexColor {
        HexColor::from(self)
    }
}

/// An sRGB color with floating-point components in `[0, 1]`.
///
/// This is how colors arrive from native pickers and color-list files.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitRgb {
    /// Red component
    pub r: f64,
    /// Green component
    pub g: f64,
    /// Blue component
    pub b: f64,
}

impl UnitRgb {
    /// Create a unit color. Components are not clamped until conversion.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Hue/saturation/brightness representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsb {
    /// Hue in degrees, `[0, 360)`
    pub hue: f64,
    /// Saturation, `[0, 1]`
    pub saturation: f64,
    /// Brightness, `[0, 1]`
    pub brightness: f64,
}

impl From<Rgb> for Hsb {
    fn from(rgb: Rgb) -> Self {
        let UnitRgb { r, g, b } = rgb.to_unit();
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let saturation = if max > 0.0 { delta / max } else { 0.0 };

        let hue = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * ((g - b) / delta)
        } else if max == g {
            60.0 * ((b - r) / delta + 2.0)
        } else {
            60.0 * ((r - g) / delta + 4.0)
        };
        let hue = if hue < 0.0 { hue + 360.0 } else { hue };

        Hsb {
            hue,
            saturation,
            brightness: max,
        }
    }
}

/// Relative luminance of an sRGB color.
///
/// Channels are linearized with the piecewise sRGB transfer function and
/// weighted `0.2126 R + 0.7152 G + 0.0722 B`. Used as an ordering key.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    fn linearize(v: f64) -> f64 {
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    }

    let UnitRgb { r, g, b } = rgb.to_unit();
    0.2126 * linearize(r) + 0.7152 * linearize(g) + 0.0722 * linearize(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> HexColor {
        normalize(s).unwrap()
    }

    #[test]
    fn test_normalize_expands_shorthand() {
        assert_eq!(hex("#abc").as_str(), "#AABBCC");
        assert_eq!(hex("abc").as_str(), "#AABBCC");
        assert_eq!(hex("  #1a2B3c \n").as_str(), "#1A2B3C");
    }

    #[test]
    fn test_normalize_rejects_bad_input() {
        assert!(normalize("xyz").is_err());
        assert!(normalize("1234").is_err());
        assert!(normalize("").is_err());
        assert!(normalize("#").is_err());
        assert!(normalize("##abc").is_err());
        assert!(normalize("#12345G").is_err());
        assert!(normalize("1234567").is_err());
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["#abc", "FFF", "#123456", "a1b2c3", " #DeAdBe "] {
            let once = hex(input);
            let twice = normalize(once.as_str()).unwrap();
            assert_eq!(once, twice);
        }
    }

    #[test]
    fn test_error_keeps_input() {
        let err = normalize("nope").unwrap_err();
        assert_eq!(
            err,
            ColorError::InvalidFormat {
                input: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_rgb_roundtrip_all_bytes() {
        for v in 0..=255u8 {
            let rgb = Rgb::new(v, 255 - v, v / 2);
            assert_eq!(rgb.to_hex().rgb(), rgb);
        }
        assert_eq!(hex("#0A0B0C").rgb(), Rgb::new(10, 11, 12));
    }

    #[test]
    fn test_hex_roundtrip_through_rgb() {
        for input in ["#abc", "#F5F5F7", "1f2d3a", "#000", "#fff"] {
            let normalized = hex(input);
            assert_eq!(normalized.rgb().to_hex(), normalized);
        }
    }

    #[test]
    fn test_from_unit_rounds() {
        let rgb = Rgb::from_unit(UnitRgb::new(0.5, 1.2, -0.1));
        assert_eq!(rgb, Rgb::new(128, 255, 0));
    }

    #[test]
    fn test_luminance_ordering() {
        let white = hex("#FFFFFF").luminance();
        let gray = hex("#808080").luminance();
        let black = hex("#000000").luminance();

        assert!((white - 1.0).abs() < 1e-9);
        assert!(white > gray);
        assert!(gray > black);
        assert_eq!(black, 0.0);
    }

    #[test]
    fn test_hsb_primaries() {
        let red = hex("#FF0000").hsb();
        assert!(red.hue.abs() < 0.01);
        assert!((red.saturation - 1.0).abs() < 0.01);
        assert!((red.brightness - 1.0).abs() < 0.01);

        let green = hex("#00FF00").hsb();
        assert!((green.hue - 120.0).abs() < 0.01);

        let blue = hex("#0000FF").hsb();
        assert!((blue.hue - 240.0).abs() < 0.01);

        let magenta_ish = hex("#FF00FE").hsb();
        assert!(magenta_ish.hue > 270.0 && magenta_ish.hue < 360.0);
    }

    #[test]
    fn test_hsb_gray_has_no_saturation() {
        let gray = hex("#808080").hsb();
        assert_eq!(gray.hue, 0.0);
        assert_eq!(gray.saturation, 0.0);
        assert!((gray.brightness - 128.0 / 255.0).abs() < 1e-9);

        let black = hex("#000").hsb();
        assert_eq!(black.saturation, 0.0);
        assert_eq!(black.brightness, 0.0);
    }
}
