// src/color.rs

//! Defines the `Rgb` color value used for pixels and rectangle fills,
//! together with palette quantization and hex rendering.

use std::fmt;

/// Fill used for expanded boxes when pink debug mode is active.
pub const PINK: Rgb = Rgb::new(255, 192, 203);

/// An opaque sRGB color, each component from 0 to 255.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Reduces the color to a 4096 entry palette.
    ///
    /// Every channel keeps its high nibble and repeats it in the low nibble,
    /// so `0x3c` becomes `0x33`. That gives 16 levels per channel, and every
    /// quantized color can be written with the 3-digit `#rgb` shorthand.
    pub const fn quantized(self) -> Self {
        Rgb {
            r: quantize_channel(self.r),
            g: quantize_channel(self.g),
            b: quantize_channel(self.b),
        }
    }

    /// True if both colors land in the same quantization bucket.
    pub fn same_bucket(self, other: Rgb) -> bool {
        self.quantized() == other.quantized()
    }

    /// True if the color has an exact `#rgb` shorthand form.
    pub fn has_shorthand(self) -> bool {
        [self.r, self.g, self.b]
            .iter()
            .all(|&c| (c >> 4) == (c & 0x0f))
    }

    /// Returns the shortest hex form of the color (`#rgb` or `#rrggbb`).
    pub fn to_hex(self) -> String {
        if self.has_shorthand() {
            format!("#{:x}{:x}{:x}", self.r & 0x0f, self.g & 0x0f, self.b & 0x0f)
        } else {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        }
    }

    /// Parses `#rgb` or `#rrggbb` (case-insensitive).
    pub fn from_hex(hex: &str) -> Option<Self> {
        let digits = hex.strip_prefix('#')?;
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        match digits.len() {
            3 => {
                let nibble = |i: usize| u8::from_str_radix(&digits[i..i + 1], 16).ok();
                Some(Rgb::new(
                    nibble(0)? * 0x11,
                    nibble(1)? * 0x11,
                    nibble(2)? * 0x11,
                ))
            }
            6 => {
                let byte = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
                Some(Rgb::new(byte(0)?, byte(2)?, byte(4)?))
            }
            _ => None,
        }
    }
}

const fn quantize_channel(c: u8) -> u8 {
    (c >> 4) * 0x11
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn it_should_use_the_shorthand_when_nibbles_repeat() {
        assert_eq!(Rgb::new(255, 0, 0).to_hex(), "#f00");
        assert_eq!(Rgb::new(0x11, 0x22, 0x33).to_hex(), "#123");
        assert_eq!(Rgb::new(255, 192, 203).to_hex(), "#ffc0cb");
        assert_eq!(Rgb::new(0, 0, 1).to_hex(), "#000001");
    }

    #[test]
    fn it_should_parse_both_hex_forms() {
        assert_eq!(Rgb::from_hex("#f00"), Some(Rgb::new(255, 0, 0)));
        assert_eq!(Rgb::from_hex("#FFC0CB"), Some(PINK));
        assert_eq!(Rgb::from_hex("ffc0cb"), None);
        assert_eq!(Rgb::from_hex("#ffc0c"), None);
        assert_eq!(Rgb::from_hex("#gg0"), None);
    }

    #[test]
    fn quantization_caps_the_palette_at_4096_colors() {
        let levels: HashSet<u8> = (0..=255u8).map(quantize_channel).collect();
        assert_eq!(levels.len(), 16);
        assert_eq!(levels.len().pow(3), 4096);
    }

    #[test]
    fn quantized_colors_always_have_a_shorthand() {
        for c in (0..=255u8).step_by(7) {
            let q = Rgb::new(c, 255 - c, c / 2).quantized();
            assert!(q.has_shorthand(), "{:?} has no shorthand", q);
            assert_eq!(q.quantized(), q, "quantization must be idempotent");
        }
    }

    #[test]
    fn colors_in_one_bucket_compare_equal() {
        assert!(Rgb::new(0x30, 0x40, 0x50).same_bucket(Rgb::new(0x3f, 0x4a, 0x51)));
        assert!(!Rgb::new(0x30, 0x40, 0x50).same_bucket(Rgb::new(0x2f, 0x40, 0x50)));
    }
}
