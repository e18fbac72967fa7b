//! Color types and utilities

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a color string cannot be parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// String does not start with `#`
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),

    /// Wrong number of hex digits
    #[error("color must have 6 or 8 hex digits: {0:?}")]
    InvalidLength(String),

    /// Non-hex character
    #[error("invalid hex digits in color: {0:?}")]
    InvalidDigit(String),
}

/// RGBA color with f32 components (0.0 to 1.0)
///
/// Serialized as a `#RRGGBB` / `#RRGGBBAA` string.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };

    /// Create from u8 components (0-255)
    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Create from hex value (0xRRGGBB or 0xRRGGBBAA)
    pub fn from_hex(hex: u32) -> Self {
        if hex > 0xFFFFFF {
            Self::from_rgba8(
                ((hex >> 24) & 0xFF) as u8,
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
            )
        } else {
            Self::from_rgba8(
                ((hex >> 16) & 0xFF) as u8,
                ((hex >> 8) & 0xFF) as u8,
                (hex & 0xFF) as u8,
                255,
            )
        }
    }

    /// Parse a `#RRGGBB` or `#RRGGBBAA` string
    pub fn parse(s: &str) -> Result<Self, ColorParseError> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if digits.len() != 6 && digits.len() != 8 {
            return Err(ColorParseError::InvalidLength(s.to_string()));
        }
        // from_str_radix alone would accept a leading '+'
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorParseError::InvalidDigit(s.to_string()));
        }
        let value = u32::from_str_radix(digits, 16)
            .map_err(|_| ColorParseError::InvalidDigit(s.to_string()))?;

        if digits.len() == 8 {
            Ok(Self::from_rgba8(
                ((value >> 24) & 0xFF) as u8,
                ((value >> 16) & 0xFF) as u8,
                ((value >> 8) & 0xFF) as u8,
                (value & 0xFF) as u8,
            ))
        } else {
            Ok(Self::from_hex(value))
        }
    }

    /// Convert to u8 array [r, g, b, a]
    pub fn to_rgba8(&self) -> [u8; 4] {
        [
            channel_to_u8(self.r),
            channel_to_u8(self.g),
            channel_to_u8(self.b),
            channel_to_u8(self.a),
        ]
    }

    /// Format as `#RRGGBB`, or `#RRGGBBAA` when not fully opaque
    pub fn to_hex_string(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 255 {
            format!("#{:02X}{:02X}{:02X}", r, g, b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", r, g, b, a)
        }
    }
}

fn channel_to_u8(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

impl TryFrom<String> for Color {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex_string()
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}
