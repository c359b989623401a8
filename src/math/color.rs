//! Color implementation with hex parsing and CSS output.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a CSS hex color cannot be parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid hex color `{0}`")]
pub struct ParseColorError(pub String);

/// RGB color with values in 0.0-1.0 range.
///
/// Serialized as a `#rrggbb` string so page configs can use the same notation
/// as the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    /// Red component (0.0 to 1.0).
    pub r: f32,
    /// Green component (0.0 to 1.0).
    pub g: f32,
    /// Blue component (0.0 to 1.0).
    pub b: f32,
}

impl Color {
    /// White (1, 1, 1).
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Create a new color from RGB values (0.0-1.0).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create from a hex integer (0xRRGGBB).
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }

    /// Convert to hex integer.
    pub fn to_hex(&self) -> u32 {
        let [r, g, b] = self.to_rgb_bytes();
        ((r as u32) << 16) | ((g as u32) << 8) | b as u32
    }

    /// Create from RGB bytes (0-255).
    pub fn from_rgb_bytes(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
        }
    }

    /// Convert to RGB bytes.
    pub fn to_rgb_bytes(&self) -> [u8; 3] {
        [
            (self.r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (self.b.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }

    /// Parse a CSS hex color (`#rrggbb` or `#rgb`, leading `#` optional).
    pub fn parse_css_hex(s: &str) -> Result<Self, ParseColorError> {
        let digits = s.trim().trim_start_matches('#');
        let err = || ParseColorError(s.to_string());
        match digits.len() {
            6 => u32::from_str_radix(digits, 16)
                .map(Self::from_hex)
                .map_err(|_| err()),
            3 => {
                let short = u32::from_str_radix(digits, 16).map_err(|_| err())?;
                let r = (short >> 8) & 0xF;
                let g = (short >> 4) & 0xF;
                let b = short & 0xF;
                Ok(Self::from_hex((r * 17) << 16 | (g * 17) << 8 | b * 17))
            }
            _ => Err(err()),
        }
    }

    /// CSS `#rrggbb` notation.
    pub fn to_css_hex(&self) -> String {
        format!("#{:06x}", self.to_hex())
    }

    /// CSS `rgba(r, g, b, a)` notation.
    pub fn to_css_rgba(&self, alpha: f32) -> String {
        let [r, g, b] = self.to_rgb_bytes();
        format!("rgba({}, {}, {}, {})", r, g, b, alpha.clamp(0.0, 1.0))
    }

    /// Check if approximately equal.
    #[inline]
    pub fn approx_eq(&self, other: &Color, epsilon: f32) -> bool {
        (self.r - other.r).abs() < epsilon
            && (self.g - other.g).abs() < epsilon
            && (self.b - other.b).abs() < epsilon
    }
}

impl std::str::FromStr for Color {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_css_hex(s)
    }
}

impl Serialize for Color {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse_css_hex(&s).map_err(serde::de::Error::custom)
    }
}

/// The page's accent colors, in the order the stylesheet declares them.
pub const PALETTE: [u32; 4] = [0xf7426f, 0x00d9c0, 0x00ff87, 0xff0844];

/// Accent palette as [`Color`] values.
pub fn palette() -> Vec<Color> {
    PALETTE.iter().copied().map(Color::from_hex).collect()
}
