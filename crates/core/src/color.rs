//! Hex color validation and the hex → `rgba()` conversion used by every
//! serializer and by the rasterizer.
//!
//! Only two syntaxes are accepted: `#RGB` and `#RRGGBB`, case-insensitive.
//! Three-digit colors are expanded by digit duplication (`#abc` → `#aabbcc`)
//! before they are stored, so a [`HexColor`] is always seven bytes long.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::GradientError;
use crate::random::Xorshift64;

/// A validated color in normalized `#rrggbb` form (lowercase).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexColor(String);

/// An sRGB color with 8-bit channels and a fractional alpha in [0, 1].
///
/// `Display` renders the CSS function form, e.g. `rgba(59, 130, 246, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

/// Returns true if `s` is `#` followed by exactly 3 or 6 hex digits.
pub fn is_valid_hex(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(digits) => {
            matches!(digits.len(), 3 | 6) && digits.bytes().all(|b| b.is_ascii_hexdigit())
        }
        None => false,
    }
}

/// Validates `s` and expands it to lowercase `#rrggbb`.
pub fn normalize_hex(s: &str) -> Result<String, GradientError> {
    if !is_valid_hex(s) {
        return Err(GradientError::InvalidColor(s.to_string()));
    }
    let digits = &s[1..];
    let expanded: String = if digits.len() == 3 {
        digits.chars().flat_map(|c| [c, c]).collect()
    } else {
        digits.to_string()
    };
    Ok(format!("#{}", expanded.to_ascii_lowercase()))
}

/// Converts a hex color plus opacity to [`Rgba`].
///
/// `hex_to_rgba("#abc", a)` and `hex_to_rgba("#aabbcc", a)` are equal.
pub fn hex_to_rgba(hex: &str, opacity: f64) -> Result<Rgba, GradientError> {
    Ok(HexColor::parse(hex)?.to_rgba(opacity))
}

impl HexColor {
    /// Parses and normalizes a `#RGB` / `#RRGGBB` string.
    pub fn parse(s: &str) -> Result<Self, GradientError> {
        normalize_hex(s).map(HexColor)
    }

    /// Draws six uniform hex digits from `rng`.
    pub fn random(rng: &mut Xorshift64) -> Self {
        let digits: String = (0..6)
            .map(|_| format!("{:x}", rng.hex_digit()))
            .collect();
        HexColor(format!("#{digits}"))
    }

    /// Returns the normalized `#rrggbb` string.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the red, green and blue channels.
    pub fn rgb(&self) -> [u8; 3] {
        [self.channel(0), self.channel(1), self.channel(2)]
    }

    /// Pairs this color with an opacity.
    pub fn to_rgba(&self, opacity: f64) -> Rgba {
        let [r, g, b] = self.rgb();
        Rgba { r, g, b, a: opacity }
    }

    fn channel(&self, i: usize) -> u8 {
        let start = 1 + 2 * i;
        // Always valid after `parse`; mirrors the 0 fallback of a failed base-16 parse.
        u8::from_str_radix(&self.0[start..start + 2], 16).unwrap_or(0)
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for HexColor {
    type Err = GradientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for HexColor {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for HexColor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        HexColor::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl Rgba {
    /// Channels as floats in [0, 1], alpha clamped to [0, 1].
    pub fn to_unit(self) -> [f64; 4] {
        [
            f64::from(self.r) / 255.0,
            f64::from(self.g) / 255.0,
            f64::from(self.b) / 255.0,
            self.a.clamp(0.0, 1.0),
        ]
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_three_and_six_digit_forms() {
        assert!(is_valid_hex("#abc"));
        assert!(is_valid_hex("#ABC"));
        assert!(is_valid_hex("#3b82f6"));
        assert!(is_valid_hex("#FF5F6D"));
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", "#", "abc", "3b82f6", "#ab", "#abcd", "#12345", "#1234567", "#ggg", "#12345g", " #abc"] {
            assert!(!is_valid_hex(bad), "{bad:?} should be rejected");
            assert!(HexColor::parse(bad).is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn three_digit_form_expands_by_duplication() {
        assert_eq!(normalize_hex("#abc").unwrap(), "#aabbcc");
        assert_eq!(normalize_hex("#F0a").unwrap(), "#ff00aa");
    }

    #[test]
    fn six_digit_form_is_lowercased() {
        assert_eq!(HexColor::parse("#FF5F6D").unwrap().as_str(), "#ff5f6d");
    }

    #[test]
    fn short_and_long_forms_convert_identically() {
        let short = hex_to_rgba("#abc", 0.5).unwrap();
        let long = hex_to_rgba("#aabbcc", 0.5).unwrap();
        assert_eq!(short, long);
        assert_eq!((short.r, short.g, short.b), (0xaa, 0xbb, 0xcc));
    }

    #[test]
    fn rgba_display_matches_css_function_form() {
        let rgba = hex_to_rgba("#3b82f6", 1.0).unwrap();
        assert_eq!(rgba.to_string(), "rgba(59, 130, 246, 1)");
        let translucent = hex_to_rgba("#8b5cf6", 0.35).unwrap();
        assert_eq!(translucent.to_string(), "rgba(139, 92, 246, 0.35)");
        let clear = hex_to_rgba("#000", 0.0).unwrap();
        assert_eq!(clear.to_string(), "rgba(0, 0, 0, 0)");
    }

    #[test]
    fn to_unit_scales_channels() {
        let unit = hex_to_rgba("#ff0000", 2.0).unwrap().to_unit();
        assert_eq!(unit, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn random_colors_are_valid_and_reproducible() {
        let mut a = Xorshift64::new(11);
        let mut b = Xorshift64::new(11);
        for _ in 0..20 {
            let ca = HexColor::random(&mut a);
            assert!(is_valid_hex(ca.as_str()), "{ca} is not valid hex");
            assert_eq!(ca, HexColor::random(&mut b));
        }
    }

    #[test]
    fn serde_uses_plain_string() {
        let color = HexColor::parse("#ABC").unwrap();
        let json = serde_json::to_string(&color).unwrap();
        assert_eq!(json, "\"#aabbcc\"");
        let back: HexColor = serde_json::from_str(&json).unwrap();
        assert_eq!(back, color);
    }

    #[test]
    fn deserializing_invalid_string_fails() {
        assert!(serde_json::from_str::<HexColor>("\"blue\"").is_err());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn six_digit_channels_match_input(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
                let hex = format!("#{r:02X}{g:02x}{b:02X}");
                let color = HexColor::parse(&hex).unwrap();
                prop_assert_eq!(color.rgb(), [r, g, b]);
            }

            #[test]
            fn short_form_equals_duplicated_long_form(
                r in 0_u8..16,
                g in 0_u8..16,
                b in 0_u8..16,
                opacity in 0.0_f64..=1.0,
            ) {
                let short = format!("#{r:x}{g:x}{b:x}");
                let long = format!("#{r:x}{r:x}{g:x}{g:x}{b:x}{b:x}");
                prop_assert_eq!(
                    hex_to_rgba(&short, opacity).unwrap(),
                    hex_to_rgba(&long, opacity).unwrap()
                );
            }

            #[test]
            fn arbitrary_strings_never_panic(s in ".{0,10}") {
                let _ = HexColor::parse(&s);
            }
        }
    }
}
