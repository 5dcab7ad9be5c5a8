//! Colour type, hex parsing and colour keys.

use std::fmt;
use std::str::FromStr;

use crate::error::{PxSvgError, Result};

/// Colour key used for fully transparent colours.
pub const TRANSPARENT_KEY: &str = "transparent";

/// An RGBA colour value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Colour {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Colour {
    /// Create a new colour from RGBA components.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a new opaque colour from RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Fully transparent colour.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White.
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// Build a colour from unchecked channel values, clamping each into 0..=255.
    ///
    /// Returns the colour and whether any channel had to be clamped.
    pub fn from_channels_clamped(channels: [i32; 4]) -> (Self, bool) {
        let clamped = channels.map(|c| c.clamp(0, 255));
        let changed = clamped != channels;
        let [r, g, b, a] = clamped.map(|c| c as u8);
        (Self::new(r, g, b, a), changed)
    }

    /// Parse a hex colour string.
    ///
    /// Supports formats:
    /// - `#RGB` (3 digits, expanded to 6)
    /// - `#RGBA` (4 digits, expanded to 8)
    /// - `#RRGGBB` (6 digits)
    /// - `#RRGGBBAA` (8 digits)
    pub fn from_hex(s: &str) -> Result<Self> {
        let s = s.trim();
        let hex = s.strip_prefix('#').unwrap_or(s);

        if !hex.is_ascii() {
            return Err(invalid_hex(s));
        }

        match hex.len() {
            3 | 4 => {
                let mut nibbles = [0u8, 0, 0, 0xF];
                for (slot, c) in nibbles.iter_mut().zip(hex.chars()) {
                    *slot = parse_hex_digit(c)?;
                }
                let [r, g, b, a] = nibbles.map(|n| n << 4 | n);
                Ok(Self::new(r, g, b, a))
            }
            6 | 8 => {
                let r = parse_hex_byte(&hex[0..2])?;
                let g = parse_hex_byte(&hex[2..4])?;
                let b = parse_hex_byte(&hex[4..6])?;
                let a = if hex.len() == 8 {
                    parse_hex_byte(&hex[6..8])?
                } else {
                    255
                };
                Ok(Self::new(r, g, b, a))
            }
            _ => Err(invalid_hex(s)),
        }
    }

    /// Canonical colour key for this colour.
    ///
    /// `#rrggbb` when fully opaque, `rgba(r,g,b,a)` with a two-decimal alpha when
    /// translucent, and `transparent` when alpha is zero. Equal colours always
    /// produce identical keys.
    pub fn key(self) -> String {
        match self.a {
            0 => TRANSPARENT_KEY.to_string(),
            255 => format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b),
            a => format!(
                "rgba({},{},{},{:.2})",
                self.r,
                self.g,
                self.b,
                f64::from(a) / 255.0
            ),
        }
    }

    /// Convert to RGBA array.
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Check if the colour is fully transparent.
    pub fn is_transparent(self) -> bool {
        self.a == 0
    }
}

impl FromStr for Colour {
    type Err = PxSvgError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Colour {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key())
    }
}

fn invalid_hex(s: &str) -> PxSvgError {
    PxSvgError::Parse {
        message: format!("Invalid hex colour: {}", s),
        help: Some("Use #RGB, #RGBA, #RRGGBB, or #RRGGBBAA format".to_string()),
    }
}

/// Parse a single hex digit.
fn parse_hex_digit(c: char) -> Result<u8> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or_else(|| PxSvgError::Parse {
            message: format!("Invalid hex digit: {}", c),
            help: None,
        })
}

/// Parse a two-character hex byte.
fn parse_hex_byte(s: &str) -> Result<u8> {
    u8::from_str_radix(s, 16).map_err(|_| PxSvgError::Parse {
        message: format!("Invalid hex byte: {}", s),
        help: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_opaque() {
        assert_eq!(Colour::rgb(255, 0, 0).key(), "#ff0000");
        assert_eq!(Colour::rgb(0x1a, 0x1a, 0x2e).key(), "#1a1a2e");
    }

    #[test]
    fn test_key_translucent() {
        assert_eq!(Colour::new(255, 0, 0, 128).key(), "rgba(255,0,0,0.50)");
        assert_eq!(Colour::new(10, 20, 30, 1).key(), "rgba(10,20,30,0.00)");
        assert_eq!(Colour::new(10, 20, 30, 254).key(), "rgba(10,20,30,1.00)");
    }

    #[test]
    fn test_key_transparent_ignores_rgb() {
        assert_eq!(Colour::new(255, 0, 0, 0).key(), "transparent");
        assert_eq!(Colour::new(1, 2, 3, 0).key(), "transparent");
        assert_eq!(Colour::TRANSPARENT.key(), TRANSPARENT_KEY);
    }

    #[test]
    fn test_key_is_deterministic() {
        let c = Colour::new(12, 34, 56, 200);
        assert_eq!(c.key(), c.key());
        assert_eq!(format!("{}", c), c.key());
    }

    #[test]
    fn test_from_channels_clamped() {
        let (c, clamped) = Colour::from_channels_clamped([300, -5, 128, 255]);
        assert_eq!(c, Colour::new(255, 0, 128, 255));
        assert!(clamped);

        let (c, clamped) = Colour::from_channels_clamped([1, 2, 3, 4]);
        assert_eq!(c, Colour::new(1, 2, 3, 4));
        assert!(!clamped);
    }

    #[test]
    fn test_from_hex_6digit() {
        let c = Colour::from_hex("#FF0000").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));

        let c = Colour::from_hex("#1a1a2e").unwrap();
        assert_eq!(c, Colour::rgb(0x1a, 0x1a, 0x2e));
    }

    #[test]
    fn test_from_hex_short_forms() {
        assert_eq!(Colour::from_hex("#ABC").unwrap(), Colour::rgb(0xAA, 0xBB, 0xCC));
        assert_eq!(Colour::from_hex("#F008").unwrap(), Colour::new(255, 0, 0, 0x88));
    }

    #[test]
    fn test_from_hex_8digit() {
        let c = Colour::from_hex("#FF000080").unwrap();
        assert_eq!(c, Colour::new(255, 0, 0, 128));
    }

    #[test]
    fn test_from_hex_no_hash() {
        let c = Colour::from_hex("FF0000").unwrap();
        assert_eq!(c, Colour::rgb(255, 0, 0));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Colour::from_hex("#GGG").is_err());
        assert!(Colour::from_hex("#12345").is_err());
        assert!(Colour::from_hex("").is_err());
        assert!(Colour::from_hex("#ééé").is_err());
    }
}
