//! Color types.
//!
//! RGBA with 8-bit components, plus `#rrggbb` / `#rrggbbaa` parsing for configuration
//! files.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Muted blue used for cells.
    pub const CELL_BLUE: Self = Self::rgb(31, 119, 180);
    /// Muted red used for I/O pads.
    pub const PAD_RED: Self = Self::rgb(214, 39, 40);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Convert to array representation.
    #[must_use]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Create from array representation.
    #[must_use]
    pub const fn from_array(arr: [u8; 4]) -> Self {
        Self::new(arr[0], arr[1], arr[2], arr[3])
    }

    /// Parse `#rrggbb` or `#rrggbbaa` (the `#` is optional).
    pub fn from_hex(s: &str) -> Result<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !matches!(hex.len(), 6 | 8) || !hex.is_ascii() {
            return Err(Error::Rendering(format!("invalid color '{s}'")));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| Error::Rendering(format!("invalid color '{s}'")))
        };

        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if self.a != 255 {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::CELL_BLUE.a, 255);
        assert_eq!(Rgba::PAD_RED.a, 255);
    }

    #[test]
    fn test_rgba_with_alpha() {
        let semi_red = Rgba::PAD_RED.with_alpha(128);
        assert_eq!(semi_red.r, 214);
        assert_eq!(semi_red.a, 128);
    }

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba::from_hex("#1f77b4").unwrap(), Rgba::CELL_BLUE);
        assert_eq!(Rgba::from_hex("d62728").unwrap(), Rgba::PAD_RED);
        assert_eq!(Rgba::from_hex("#ff000080").unwrap(), Rgba::new(255, 0, 0, 128));
    }

    #[test]
    fn test_from_hex_invalid() {
        assert!(Rgba::from_hex("#12345").is_err());
        assert!(Rgba::from_hex("#gg0000").is_err());
        assert!(Rgba::from_hex("").is_err());
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        assert_eq!(Rgba::PAD_RED.to_string(), "#d62728");
        assert_eq!(Rgba::new(1, 2, 3, 4).to_string(), "#01020304");
        let parsed: Rgba = "#01020304".parse().unwrap();
        assert_eq!(parsed, Rgba::new(1, 2, 3, 4));
    }
}
