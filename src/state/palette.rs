//! Night light colors: the sRGB value type and the fixed palette.

use anyhow::{Result, bail};
use std::fmt;

use crate::common::constants::DEFAULT_CUSTOM_COLOR;

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(0xFF, 0xFF, 0xFF);
    pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);
    /// Neutral gray used for a dark (switched off) light.
    pub const NEUTRAL_GRAY: Rgb = Rgb::new(0x8E, 0x8E, 0x93);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `RGB`, `RRGGBB` or `AARRGGBB` hex, with an optional leading `#`.
    ///
    /// The alpha byte of the 8-digit form is accepted and dropped; palette
    /// opacity always comes from the light's brightness.
    pub fn from_hex(input: &str) -> Result<Self> {
        let hex = input.trim().trim_start_matches('#');

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            bail!("Invalid hex color '{input}': only 0-9 and A-F are allowed");
        }

        let value = match u32::from_str_radix(hex, 16) {
            Ok(value) => value,
            Err(_) => bail!("Invalid hex color '{input}'"),
        };

        match hex.len() {
            3 => {
                let expand = |nibble: u32| (nibble & 0xF) as u8 * 17;
                Ok(Self::new(expand(value >> 8), expand(value >> 4), expand(value)))
            }
            6 | 8 => Ok(Self::new(
                (value >> 16) as u8,
                (value >> 8) as u8,
                value as u8,
            )),
            n => bail!("Invalid hex color '{input}': expected 3, 6 or 8 digits, got {n}"),
        }
    }

    /// Uppercase `RRGGBB` without the `#`.
    pub fn to_hex(self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Composite this color at `opacity` over `background`.
    pub fn blend_over(self, background: Rgb, opacity: f32) -> Rgb {
        let alpha = opacity.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| {
            (f32::from(fg) * alpha + f32::from(bg) * (1.0 - alpha)).round() as u8
        };
        Rgb::new(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// Built-in entries, in display order. The custom slot follows them.
pub const BUILTIN_COLORS: [Rgb; 7] = [
    Rgb::WHITE,
    Rgb::new(0xFF, 0xB3, 0xBA),
    Rgb::new(0xBA, 0xFF, 0xC9),
    Rgb::new(0xBA, 0xE1, 0xFF),
    Rgb::new(0xFF, 0xFF, 0xBA),
    Rgb::new(0xFF, 0xD8, 0xB3),
    Rgb::new(0xE0, 0xBB, 0xE4),
];

pub const PALETTE_SIZE: usize = BUILTIN_COLORS.len() + 1;

/// Ordered, fixed-size palette whose last slot is user-replaceable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [Rgb; PALETTE_SIZE],
}

impl Palette {
    pub fn new(custom: Rgb) -> Self {
        let mut entries = [custom; PALETTE_SIZE];
        entries[..BUILTIN_COLORS.len()].copy_from_slice(&BUILTIN_COLORS);
        Self { entries }
    }

    pub const fn len(&self) -> usize {
        PALETTE_SIZE
    }

    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Index of the reserved custom slot.
    pub const fn custom_index(&self) -> usize {
        PALETTE_SIZE - 1
    }

    /// Look up an entry; indices wrap modulo the palette size.
    pub fn get(&self, index: usize) -> Rgb {
        self.entries[index % PALETTE_SIZE]
    }

    pub fn custom(&self) -> Rgb {
        self.entries[self.custom_index()]
    }

    pub fn set_custom(&mut self, color: Rgb) {
        let slot = self.custom_index();
        self.entries[slot] = color;
    }

    pub fn iter(&self) -> impl Iterator<Item = Rgb> + '_ {
        self.entries.iter().copied()
    }
}

impl Default for Palette {
    fn default() -> Self {
        let custom = Rgb::from_hex(DEFAULT_CUSTOM_COLOR).unwrap_or(Rgb::WHITE);
        Self::new(custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_accepts_all_lengths() {
        assert_eq!(Rgb::from_hex("FFB3BA").unwrap(), Rgb::new(0xFF, 0xB3, 0xBA));
        assert_eq!(Rgb::from_hex("#fff").unwrap(), Rgb::WHITE);
        assert_eq!(Rgb::from_hex("f80").unwrap(), Rgb::new(0xFF, 0x88, 0x00));
        assert_eq!(
            Rgb::from_hex("80E0BBE4").unwrap(),
            Rgb::new(0xE0, 0xBB, 0xE4)
        );
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(Rgb::from_hex("").is_err());
        assert!(Rgb::from_hex("12345").is_err());
        assert!(Rgb::from_hex("GG0000").is_err());
        assert!(Rgb::from_hex("+12345").is_err());
    }

    #[test]
    fn test_hex_display() {
        let color = Rgb::new(0x0A, 0xBC, 0xFF);
        assert_eq!(color.to_hex(), "0ABCFF");
        assert_eq!(color.to_string(), "#0ABCFF");
    }

    #[test]
    fn test_blend_over_black() {
        assert_eq!(Rgb::WHITE.blend_over(Rgb::BLACK, 1.0), Rgb::WHITE);
        assert_eq!(Rgb::WHITE.blend_over(Rgb::BLACK, 0.0), Rgb::BLACK);
        assert_eq!(
            Rgb::WHITE.blend_over(Rgb::BLACK, 0.5),
            Rgb::new(128, 128, 128)
        );
    }

    #[test]
    fn test_default_palette_layout() {
        let palette = Palette::default();
        assert_eq!(palette.len(), 8);
        assert_eq!(palette.get(0), Rgb::WHITE);
        assert_eq!(palette.custom_index(), 7);
        assert_eq!(palette.custom(), Rgb::new(0xFF, 0xD1, 0xA4));
        assert_eq!(palette.get(8), palette.get(0));
    }

    #[test]
    fn test_set_custom_only_touches_last_slot() {
        let mut palette = Palette::default();
        let before: Vec<Rgb> = palette.iter().take(7).collect();
        palette.set_custom(Rgb::new(1, 2, 3));
        assert_eq!(palette.custom(), Rgb::new(1, 2, 3));
        assert_eq!(palette.iter().take(7).collect::<Vec<_>>(), before);
    }
}
