//! RGB/HSL value types and conversion.
//!
//! Colors are plain values: an RGB triple with integer channels 0-255, and a
//! cylindrical HSL form (hue in degrees, saturation/lightness in integer
//! percent) used for harmony derivation. Round-tripping RGB -> HSL -> RGB is
//! exact only to integer rounding: most colors come back within one count
//! per channel, the worst case is five.

use serde::{Deserialize, Serialize};

use crate::error::ColorError;

/// An sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A color in hue/saturation/lightness form.
///
/// `h` is in degrees `[0, 360)`; `s` and `l` are integer percent `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse a strict `#RRGGBB` hex string (case-insensitive digits).
    ///
    /// Anything else -- missing `#`, wrong length, shorthand `#RGB`,
    /// non-hex characters -- is rejected as [`ColorError::MalformedColor`].
    /// There is no partial parsing and no fallback color.
    pub fn from_hex(input: &str) -> Result<Self, ColorError> {
        let malformed = || ColorError::MalformedColor {
            input: input.to_string(),
        };

        let digits = input.strip_prefix('#').ok_or_else(malformed)?;
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(malformed());
        }

        let channel = |range| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| malformed())
        };
        Ok(Self {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    /// Format as lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Convert to HSL.
    ///
    /// Channels are normalized to `[0, 1]`; hue is rounded to the nearest
    /// degree and saturation/lightness to the nearest percent. Achromatic
    /// colors (`max == min`) get `h = s = 0`.
    pub fn to_hsl(self) -> Hsl {
        let r = self.r as f64 / 255.0;
        let g = self.g as f64 / 255.0;
        let b = self.b as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            // Achromatic: hue is undefined, pinned to zero.
            return Hsl {
                h: 0,
                s: 0,
                l: (l * 100.0).round() as u8,
            };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let segment = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        let h = segment / 6.0;

        Hsl {
            h: (h * 360.0).round() as u16 % 360,
            s: (s * 100.0).round() as u8,
            l: (l * 100.0).round() as u8,
        }
    }
}

impl Hsl {
    pub const fn new(h: u16, s: u8, l: u8) -> Self {
        Self { h, s, l }
    }

    /// Convert to RGB using the chroma/hue-segment method.
    ///
    /// Hue is taken modulo 360 and saturation/lightness clamped to
    /// `[0, 100]` before normalizing; output channels are rounded to the
    /// nearest integer.
    pub fn to_rgb(self) -> Rgb {
        let h = (self.h % 360) as f64;
        let s = (self.s.min(100)) as f64 / 100.0;
        let l = (self.l.min(100)) as f64 / 100.0;

        let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
        let m = l - c / 2.0;

        let (r, g, b) = if h < 60.0 {
            (c, x, 0.0)
        } else if h < 120.0 {
            (x, c, 0.0)
        } else if h < 180.0 {
            (0.0, c, x)
        } else if h < 240.0 {
            (0.0, x, c)
        } else if h < 300.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
        Rgb {
            r: channel(r),
            g: channel(g),
            b: channel(b),
        }
    }

    /// Shorthand for `to_rgb().to_hex()`.
    pub fn to_hex(self) -> String {
        self.to_rgb().to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parse_valid_hex() {
        assert_eq!(Rgb::from_hex("#ff0000"), Ok(Rgb::new(255, 0, 0)));
        assert_eq!(Rgb::from_hex("#00FF7f"), Ok(Rgb::new(0, 255, 127)));
    }

    #[test]
    fn parse_rejects_malformed() {
        for bad in ["ff0000", "#fff", "#ff00", "#ff0000aa", "#gg0000", "", "#"] {
            assert!(
                matches!(Rgb::from_hex(bad), Err(ColorError::MalformedColor { .. })),
                "expected {bad:?} to be rejected"
            );
        }
    }

    #[test]
    fn hex_round_trip() {
        assert_eq!(Rgb::from_hex("#1a2b3c").unwrap().to_hex(), "#1a2b3c");
    }

    #[test]
    fn primary_colors_to_hsl() {
        assert_eq!(Rgb::new(255, 0, 0).to_hsl(), Hsl::new(0, 100, 50));
        assert_eq!(Rgb::new(0, 255, 0).to_hsl(), Hsl::new(120, 100, 50));
        assert_eq!(Rgb::new(0, 0, 255).to_hsl(), Hsl::new(240, 100, 50));
    }

    #[test]
    fn achromatic_has_zero_hue_and_saturation() {
        assert_eq!(Rgb::new(0, 0, 0).to_hsl(), Hsl::new(0, 0, 0));
        assert_eq!(Rgb::new(255, 255, 255).to_hsl(), Hsl::new(0, 0, 100));
        assert_eq!(Rgb::new(128, 128, 128).to_hsl(), Hsl::new(0, 0, 50));
    }

    #[test]
    fn hsl_to_rgb_primaries() {
        assert_eq!(Hsl::new(0, 100, 50).to_rgb(), Rgb::new(255, 0, 0));
        assert_eq!(Hsl::new(120, 100, 50).to_rgb(), Rgb::new(0, 255, 0));
        assert_eq!(Hsl::new(240, 100, 50).to_rgb(), Rgb::new(0, 0, 255));
        assert_eq!(Hsl::new(180, 100, 50).to_rgb(), Rgb::new(0, 255, 255));
    }

    #[test]
    fn hue_wraps_modulo_360() {
        assert_eq!(Hsl::new(360, 100, 50).to_rgb(), Hsl::new(0, 100, 50).to_rgb());
        assert_eq!(Hsl::new(480, 100, 50).to_rgb(), Hsl::new(120, 100, 50).to_rgb());
    }

    #[test]
    fn saturation_and_lightness_clamped() {
        // Out-of-range percent behaves like 100.
        assert_eq!(Hsl::new(0, 200, 50).to_rgb(), Hsl::new(0, 100, 50).to_rgb());
        assert_eq!(Hsl::new(0, 100, 255).to_rgb(), Rgb::new(255, 255, 255));
    }

    #[test]
    fn round_trip_near_identity_for_common_colors() {
        // Within one count per channel for colors that sit close to the
        // integer-percent HSL grid.
        for hex in [
            "#ff0000", "#00ff00", "#0000ff", "#00ffff", "#ff00ff", "#ffff00",
            "#ffffff", "#000000", "#808080", "#ff8000", "#4080c0",
        ] {
            let original = Rgb::from_hex(hex).unwrap();
            let back = original.to_hsl().to_rgb();
            assert!((original.r as i16 - back.r as i16).abs() <= 1, "{hex}");
            assert!((original.g as i16 - back.g as i16).abs() <= 1, "{hex}");
            assert!((original.b as i16 - back.b as i16).abs() <= 1, "{hex}");
        }
    }

    proptest! {
        /// RGB -> HSL -> RGB round-trip error is bounded. Quantizing hue to
        /// whole degrees and saturation/lightness to whole percent costs up
        /// to five counts per channel in the worst case; most colors stay
        /// within one.
        #[test]
        fn round_trip_error_is_bounded(r: u8, g: u8, b: u8) {
            let original = Rgb::new(r, g, b);
            let back = original.to_hsl().to_rgb();
            prop_assert!((original.r as i16 - back.r as i16).abs() <= 5);
            prop_assert!((original.g as i16 - back.g as i16).abs() <= 5);
            prop_assert!((original.b as i16 - back.b as i16).abs() <= 5);
        }
    }
}
