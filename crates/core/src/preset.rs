//! Built-in preset gallery: nine two-color linear gradients.

use crate::color::HexColor;
use crate::error::GradientError;
use crate::gradient::GradientSpec;
use crate::stop::ColorStop;

/// A named two-color preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub name: &'static str,
    pub colors: [&'static str; 2],
}

/// Gallery order.
pub const PRESETS: [Preset; 9] = [
    Preset { name: "Sunset", colors: ["#FF5F6D", "#FFC371"] },
    Preset { name: "Ocean", colors: ["#00c6ff", "#0072ff"] },
    Preset { name: "Emerald", colors: ["#11998e", "#38ef7d"] },
    Preset { name: "Purple", colors: ["#7F00FF", "#E100FF"] },
    Preset { name: "Peach", colors: ["#FFD194", "#D1913C"] },
    Preset { name: "Mint", colors: ["#4AC29A", "#BDFFF3"] },
    Preset { name: "Bloody", colors: ["#f85032", "#e73827"] },
    Preset { name: "Deep Sea", colors: ["#2b5876", "#4e4376"] },
    Preset { name: "Citrus", colors: ["#FDC830", "#F37335"] },
];

impl Preset {
    /// Looks up a preset by name, ignoring case and surrounding whitespace.
    pub fn find(name: &str) -> Result<&'static Preset, GradientError> {
        PRESETS
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name.trim()))
            .ok_or_else(|| GradientError::UnknownPreset(name.to_string()))
    }

    /// Preset names in gallery order.
    pub fn list_names() -> Vec<&'static str> {
        PRESETS.iter().map(|p| p.name).collect()
    }

    /// The gradient this preset loads: linear, 90°, opaque stops at 0% and 100%.
    pub fn spec(&self) -> GradientSpec {
        let [first, last] = self
            .colors
            .map(|hex| HexColor::parse(hex).expect("preset hex values are valid"));
        GradientSpec::from_stops(vec![
            ColorStop::opaque(1, first, 0),
            ColorStop::opaque(2, last, 100),
        ])
        .expect("preset has two stops")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::css::to_css;
    use crate::gradient::{GradientKind, DEFAULT_ANGLE};

    #[test]
    fn gallery_has_nine_presets() {
        assert_eq!(PRESETS.len(), 9);
        assert_eq!(Preset::list_names().first(), Some(&"Sunset"));
        assert_eq!(Preset::list_names().last(), Some(&"Citrus"));
    }

    #[test]
    fn every_preset_builds_a_two_stop_linear_spec() {
        for preset in &PRESETS {
            let spec = preset.spec();
            assert_eq!(spec.kind(), GradientKind::Linear, "{}", preset.name);
            assert_eq!(spec.angle(), DEFAULT_ANGLE, "{}", preset.name);
            assert_eq!(spec.stops().len(), 2, "{}", preset.name);
            assert_eq!(spec.stops()[0].position(), 0);
            assert_eq!(spec.stops()[1].position(), 100);
        }
    }

    #[test]
    fn find_is_case_insensitive() {
        assert_eq!(Preset::find("deep sea").unwrap().name, "Deep Sea");
        assert_eq!(Preset::find(" OCEAN ").unwrap().name, "Ocean");
    }

    #[test]
    fn find_unknown_reports_name() {
        assert!(matches!(
            Preset::find("Lagoon"),
            Err(GradientError::UnknownPreset(ref n)) if n == "Lagoon"
        ));
    }

    #[test]
    fn sunset_serializes() {
        let spec = Preset::find("Sunset").unwrap().spec();
        assert_eq!(
            to_css(&spec),
            "linear-gradient(90deg, rgba(255, 95, 109, 1) 0%, rgba(255, 195, 113, 1) 100%)"
        );
    }
}
