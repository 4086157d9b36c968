use anyhow::{bail, Result};
use palette::{IntoColor, Oklch, Srgb};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A single swatch color.
/// Wraps sRGB u8 components; travels over the wire as a `#rrggbb` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a hex color string like `#ff8800` or `#FF8800`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let hex = hex.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            bail!("invalid hex color: expected 6 hex digits, got {:?}", hex);
        }
        let r = u8::from_str_radix(&hex[0..2], 16)?;
        let g = u8::from_str_radix(&hex[2..4], 16)?;
        let b = u8::from_str_radix(&hex[4..6], 16)?;
        Ok(Self { r, g, b })
    }

    /// Serialize to lowercase hex `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to Oklch (perceptual lightness drives label contrast).
    pub fn to_oklch(self) -> Oklch {
        let srgb_f32: Srgb<f32> = Srgb::new(self.r, self.g, self.b).into_format();
        srgb_f32.into_color()
    }

    /// Whether dark text reads better than light text on this color.
    pub fn prefers_dark_text(self) -> bool {
        self.to_oklch().l > 0.65
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Color::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}
