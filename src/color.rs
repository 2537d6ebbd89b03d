//! RGBA colors used for joint and limb styling.

use std::fmt;
use std::str::FromStr;

use image::Rgba;
use palette::{Srgb, Srgba};
use serde::{Deserialize, Serialize};

use crate::error::RigError;

/// An 8-bit sRGB color with alpha.
///
/// Serializes as a hex string: `"#rrggbb"` when opaque, `"#rrggbbaa"`
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[cfg_attr(feature = "jsonschema", schemars(with = "String"))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLUE: Color = Color::rgb(0, 0, 255);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parses `#rgb`, `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, RigError> {
        let trimmed = hex.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(RigError::InvalidColor(hex.to_string()));
        }

        let (rgb_digits, alpha) = match digits.len() {
            3 | 6 => (digits, 255),
            8 => {
                let alpha = u8::from_str_radix(&digits[6..], 16)
                    .map_err(|_| RigError::InvalidColor(hex.to_string()))?;
                (&digits[..6], alpha)
            }
            _ => return Err(RigError::InvalidColor(hex.to_string())),
        };

        let rgb: Srgb<u8> = rgb_digits
            .parse()
            .map_err(|_| RigError::InvalidColor(hex.to_string()))?;
        Ok(Self::rgba(rgb.red, rgb.green, rgb.blue, alpha))
    }

    /// Formats the color as a hex string.
    pub fn to_hex(&self) -> String {
        if self.is_opaque() {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    /// The `#rrggbb` part only, for SVG paint attributes.
    pub fn to_rgb_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Alpha as a 0.0-1.0 opacity.
    pub fn opacity(&self) -> f32 {
        self.to_srgba().into_format::<f32, f32>().alpha
    }

    pub fn is_opaque(&self) -> bool {
        self.a == 255
    }

    pub fn to_srgba(&self) -> Srgba<u8> {
        Srgba::new(self.r, self.g, self.b, self.a)
    }
}

impl From<Srgba<u8>> for Color {
    fn from(c: Srgba<u8>) -> Self {
        Self::rgba(c.red, c.green, c.blue, c.alpha)
    }
}

impl From<Srgb<u8>> for Color {
    fn from(c: Srgb<u8>) -> Self {
        Self::rgb(c.red, c.green, c.blue)
    }
}

impl From<Color> for Rgba<u8> {
    fn from(c: Color) -> Self {
        Rgba([c.r, c.g, c.b, c.a])
    }
}

impl FromStr for Color {
    type Err = RigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = RigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}
