//! A single color stop: id, color, position along the gradient line, opacity.

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::{HexColor, Rgba};
use crate::error::GradientError;

/// Highest stop position, in percent.
pub const MAX_POSITION: u8 = 100;

/// A color stop within a gradient.
///
/// `id` is stable once assigned and only correlates a stop with its UI
/// control; it never affects ordering. Position is an integer percent in
/// [0, 100] and opacity a fraction in [0, 1]; setters clamp into range,
/// and so does deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    id: u32,
    color: HexColor,
    #[serde(deserialize_with = "position_from_number")]
    position: u8,
    #[serde(default = "full_opacity", deserialize_with = "opacity_from_number")]
    opacity: f64,
}

impl ColorStop {
    /// Creates a stop, clamping position to [0, 100] and opacity to [0, 1].
    ///
    /// A NaN opacity becomes fully opaque.
    pub fn new(id: u32, color: HexColor, position: i32, opacity: f64) -> Self {
        Self {
            id,
            color,
            position: clamp_position(position),
            opacity: if opacity.is_nan() {
                1.0
            } else {
                opacity.clamp(0.0, 1.0)
            },
        }
    }

    /// Creates a fully opaque stop.
    pub fn opaque(id: u32, color: HexColor, position: i32) -> Self {
        Self::new(id, color, position, 1.0)
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn color(&self) -> &HexColor {
        &self.color
    }

    /// Position in percent, [0, 100].
    pub fn position(&self) -> u8 {
        self.position
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// The stop's color token, e.g. `rgba(59, 130, 246, 1)`.
    pub fn to_rgba(&self) -> Rgba {
        self.color.to_rgba(self.opacity)
    }

    pub(crate) fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    pub fn set_color(&mut self, color: HexColor) {
        self.color = color;
    }

    /// Sets the position, clamping to [0, 100].
    pub fn set_position(&mut self, position: i32) {
        self.position = clamp_position(position);
    }

    /// Sets the opacity, clamping to [0, 1].
    ///
    /// Returns `GradientError::InvalidOpacity` for NaN and leaves the stop unchanged.
    pub fn set_opacity(&mut self, opacity: f64) -> Result<(), GradientError> {
        if opacity.is_nan() {
            return Err(GradientError::InvalidOpacity(opacity));
        }
        self.opacity = opacity.clamp(0.0, 1.0);
        Ok(())
    }

    pub fn make_opaque(&mut self) {
        self.opacity = 1.0;
    }

    /// Compares color, position and opacity, ignoring the id.
    pub fn same_value(&self, other: &ColorStop) -> bool {
        self.color == other.color
            && self.position == other.position
            && self.opacity == other.opacity
    }
}

fn clamp_position(position: i32) -> u8 {
    position.clamp(0, i32::from(MAX_POSITION)) as u8
}

fn full_opacity() -> f64 {
    1.0
}

fn position_from_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.round().clamp(0.0, f64::from(MAX_POSITION)) as u8)
}

fn opacity_from_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let raw = f64::deserialize(deserializer)?;
    Ok(raw.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blue() -> HexColor {
        HexColor::parse("#3b82f6").unwrap()
    }

    #[test]
    fn new_clamps_position_and_opacity() {
        let stop = ColorStop::new(1, blue(), 140, -0.5);
        assert_eq!(stop.position(), 100);
        assert_eq!(stop.opacity(), 0.0);

        let stop = ColorStop::new(1, blue(), -3, 1.7);
        assert_eq!(stop.position(), 0);
        assert_eq!(stop.opacity(), 1.0);
    }

    #[test]
    fn nan_opacity_on_construction_is_opaque() {
        let stop = ColorStop::new(1, blue(), 50, f64::NAN);
        assert_eq!(stop.opacity(), 1.0);
    }

    #[test]
    fn set_opacity_rejects_nan_and_keeps_previous() {
        let mut stop = ColorStop::new(1, blue(), 50, 0.4);
        assert!(matches!(
            stop.set_opacity(f64::NAN),
            Err(GradientError::InvalidOpacity(_))
        ));
        assert_eq!(stop.opacity(), 0.4);
    }

    #[test]
    fn set_position_clamps() {
        let mut stop = ColorStop::opaque(1, blue(), 10);
        stop.set_position(250);
        assert_eq!(stop.position(), 100);
        stop.set_position(-1);
        assert_eq!(stop.position(), 0);
    }

    #[test]
    fn same_value_ignores_id() {
        let a = ColorStop::opaque(1, blue(), 30);
        let b = ColorStop::opaque(9, blue(), 30);
        assert!(a.same_value(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn to_rgba_uses_opacity() {
        let stop = ColorStop::new(3, blue(), 0, 0.5);
        assert_eq!(stop.to_rgba().to_string(), "rgba(59, 130, 246, 0.5)");
    }

    #[test]
    fn json_uses_flat_record_shape() {
        let stop = ColorStop::new(2, blue(), 75, 0.25);
        let v = serde_json::to_value(&stop).unwrap();
        assert_eq!(
            v,
            serde_json::json!({"id": 2, "color": "#3b82f6", "position": 75, "opacity": 0.25})
        );
    }

    #[test]
    fn deserializing_out_of_range_values_clamps() {
        let stop: ColorStop = serde_json::from_str(
            r##"{"id": 4, "color": "#FFF", "position": 130.4, "opacity": 3}"##,
        )
        .unwrap();
        assert_eq!(stop.position(), 100);
        assert_eq!(stop.opacity(), 1.0);
        assert_eq!(stop.color().as_str(), "#ffffff");
    }

    #[test]
    fn missing_opacity_defaults_to_opaque() {
        let stop: ColorStop =
            serde_json::from_str(r##"{"id": 1, "color": "#000000", "position": 0}"##).unwrap();
        assert_eq!(stop.opacity(), 1.0);
    }
}
