//! The gradient model: an ordered set of color stops plus style parameters.
//!
//! [`GradientSpec`] owns normalization (stops sorted ascending by position,
//! ties kept in insertion order) and the bounds checks applied at the edit
//! boundary. Every stop mutation re-normalizes, so [`GradientSpec::stops`]
//! is always sorted.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::HexColor;
use crate::error::GradientError;
use crate::random::Xorshift64;
use crate::stop::{ColorStop, MAX_POSITION};

/// Minimum number of stops a gradient may hold.
pub const MIN_STOPS: usize = 2;

/// Default CSS angle for new and preset gradients ("to right").
pub const DEFAULT_ANGLE: i32 = 90;

/// Linear or radial gradient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
}

/// Ending shape of a radial gradient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RadialShape {
    #[default]
    Circle,
    Ellipse,
}

/// Size keyword of a radial gradient.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RadialSize {
    ClosestSide,
    FarthestSide,
    ClosestCorner,
    #[default]
    FarthestCorner,
}

impl GradientKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GradientKind::Linear => "linear",
            GradientKind::Radial => "radial",
        }
    }
}

impl RadialShape {
    pub fn as_str(self) -> &'static str {
        match self {
            RadialShape::Circle => "circle",
            RadialShape::Ellipse => "ellipse",
        }
    }
}

impl RadialSize {
    pub fn as_str(self) -> &'static str {
        match self {
            RadialSize::ClosestSide => "closest-side",
            RadialSize::FarthestSide => "farthest-side",
            RadialSize::ClosestCorner => "closest-corner",
            RadialSize::FarthestCorner => "farthest-corner",
        }
    }

    pub fn all() -> [RadialSize; 4] {
        [
            RadialSize::ClosestSide,
            RadialSize::FarthestSide,
            RadialSize::ClosestCorner,
            RadialSize::FarthestCorner,
        ]
    }
}

macro_rules! keyword_traits {
    ($ty:ty, $what:literal, [$($variant:expr),+ $(,)?]) => {
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $ty {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s.trim()))
                    .ok_or_else(|| format!("unknown {} '{s}'", $what))
            }
        }
    };
}

keyword_traits!(GradientKind, "gradient type", [GradientKind::Linear, GradientKind::Radial]);
keyword_traits!(RadialShape, "radial shape", [RadialShape::Circle, RadialShape::Ellipse]);
keyword_traits!(
    RadialSize,
    "radial size",
    [
        RadialSize::ClosestSide,
        RadialSize::FarthestSide,
        RadialSize::ClosestCorner,
        RadialSize::FarthestCorner,
    ]
);

/// A complete gradient definition.
///
/// Serializes to the history record shape:
/// `{"type", "repeating", "angle", "radialShape", "radialSize", "colorStops"}`.
/// The three style fields added after the first release default when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradientSpec {
    #[serde(rename = "type")]
    kind: GradientKind,
    #[serde(default)]
    repeating: bool,
    #[serde(default = "default_angle", deserialize_with = "angle_from_json")]
    angle: i32,
    #[serde(default)]
    radial_shape: RadialShape,
    #[serde(default)]
    radial_size: RadialSize,
    #[serde(rename = "colorStops")]
    stops: Vec<ColorStop>,
}

impl Default for GradientSpec {
    fn default() -> Self {
        let stop = |id, hex, position| {
            let color = HexColor::parse(hex).expect("default stop colors are valid hex");
            ColorStop::opaque(id, color, position)
        };
        Self {
            kind: GradientKind::Linear,
            repeating: false,
            angle: DEFAULT_ANGLE,
            radial_shape: RadialShape::default(),
            radial_size: RadialSize::default(),
            stops: vec![stop(1, "#3b82f6", 0), stop(2, "#8b5cf6", 100)],
        }
    }
}

impl GradientSpec {
    /// Creates a linear 90° gradient from `stops`, sorted by position.
    ///
    /// Returns `GradientError::TooFewStops` for fewer than two stops.
    pub fn from_stops(stops: Vec<ColorStop>) -> Result<Self, GradientError> {
        let mut spec = Self {
            stops,
            ..Self::default()
        };
        spec.check()?;
        spec.normalize();
        Ok(spec)
    }

    pub fn with_kind(mut self, kind: GradientKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_angle(mut self, angle: i32) -> Self {
        self.angle = angle;
        self
    }

    pub fn with_repeating(mut self, repeating: bool) -> Self {
        self.repeating = repeating;
        self
    }

    pub fn with_radial_shape(mut self, shape: RadialShape) -> Self {
        self.radial_shape = shape;
        self
    }

    pub fn with_radial_size(mut self, size: RadialSize) -> Self {
        self.radial_size = size;
        self
    }

    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    pub fn repeating(&self) -> bool {
        self.repeating
    }

    /// CSS angle in degrees; only meaningful for linear gradients.
    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn radial_shape(&self) -> RadialShape {
        self.radial_shape
    }

    pub fn radial_size(&self) -> RadialSize {
        self.radial_size
    }

    /// Stops in their current order (sorted after any mutation).
    pub fn stops(&self) -> &[ColorStop] {
        &self.stops
    }

    pub fn stop(&self, id: u32) -> Option<&ColorStop> {
        self.stops.iter().find(|s| s.id() == id)
    }

    /// Stops sorted ascending by position without mutating the gradient.
    ///
    /// Equal positions keep their relative order.
    pub fn sorted_stops(&self) -> Vec<&ColorStop> {
        let mut sorted: Vec<&ColorStop> = self.stops.iter().collect();
        sorted.sort_by_key(|s| s.position());
        sorted
    }

    /// Sorts stops ascending by position (stable) and gives every stop
    /// whose id repeats an earlier one a fresh id.
    pub fn normalize(&mut self) {
        self.stops.sort_by_key(|s| s.position());
        self.reassign_duplicate_ids();
    }

    fn reassign_duplicate_ids(&mut self) {
        let mut seen = HashSet::with_capacity(self.stops.len());
        let duplicates: Vec<usize> = self
            .stops
            .iter()
            .enumerate()
            .filter(|(_, s)| !seen.insert(s.id()))
            .map(|(i, _)| i)
            .collect();
        for i in duplicates {
            let id = self.next_stop_id();
            tracing::debug!(old = self.stops[i].id(), new = id, "reassigned duplicate stop id");
            self.stops[i].set_id(id);
        }
    }

    /// Verifies the stop-count floor; used on construction and after loading.
    pub fn check(&self) -> Result<(), GradientError> {
        if self.stops.len() < MIN_STOPS {
            return Err(GradientError::TooFewStops {
                count: self.stops.len(),
                min: MIN_STOPS,
            });
        }
        Ok(())
    }

    /// One more than the largest id in use. Once `u32::MAX` is taken, the
    /// smallest id not in use.
    pub fn next_stop_id(&self) -> u32 {
        match self.stops.iter().map(ColorStop::id).max() {
            None => 1,
            Some(max) => max.checked_add(1).unwrap_or_else(|| self.smallest_unused_id()),
        }
    }

    fn smallest_unused_id(&self) -> u32 {
        let used: HashSet<u32> = self.stops.iter().map(ColorStop::id).collect();
        (1..=u32::MAX).find(|id| !used.contains(id)).unwrap_or(0)
    }

    /// Midpoint of the widest gap between adjacent sorted positions.
    ///
    /// The first of several equally wide gaps wins; the midpoint rounds half up.
    pub fn insertion_position(&self) -> u8 {
        let sorted = self.sorted_stops();
        let widest = sorted
            .windows(2)
            .map(|pair| (pair[0].position(), pair[1].position()))
            .fold(None::<(u8, u8)>, |best, (lo, hi)| match best {
                Some((blo, bhi)) if bhi - blo >= hi - lo => Some((blo, bhi)),
                _ => Some((lo, hi)),
            });
        match widest {
            Some((lo, hi)) => ((u16::from(lo) + u16::from(hi) + 1) / 2) as u8,
            None => MAX_POSITION / 2,
        }
    }

    /// Inserts an opaque stop of `color` at [`insertion_position`](Self::insertion_position).
    ///
    /// Returns the new stop's id.
    pub fn add_stop(&mut self, color: HexColor) -> u32 {
        let id = self.next_stop_id();
        let position = self.insertion_position();
        self.stops
            .push(ColorStop::opaque(id, color, i32::from(position)));
        self.normalize();
        tracing::debug!(id, position, "added color stop");
        id
    }

    /// Inserts a stop with a random color.
    pub fn add_random_stop(&mut self, rng: &mut Xorshift64) -> u32 {
        self.add_stop(HexColor::random(rng))
    }

    /// Removes the stop with `id`.
    ///
    /// Returns `GradientError::StopFloor` if only [`MIN_STOPS`] remain (the
    /// gradient is left unchanged), or `GradientError::StopNotFound`.
    pub fn remove_stop(&mut self, id: u32) -> Result<ColorStop, GradientError> {
        if self.stops.len() <= MIN_STOPS {
            return Err(GradientError::StopFloor { min: MIN_STOPS });
        }
        let index = self
            .stops
            .iter()
            .position(|s| s.id() == id)
            .ok_or(GradientError::StopNotFound(id))?;
        Ok(self.stops.remove(index))
    }

    /// Sets a stop's color from user input.
    ///
    /// Invalid hex is rejected with `GradientError::InvalidColor` and the
    /// previous color is retained.
    pub fn set_stop_color(&mut self, id: u32, color: &str) -> Result<(), GradientError> {
        let color = HexColor::parse(color)?;
        self.stop_mut(id)?.set_color(color);
        Ok(())
    }

    /// Sets a stop's opacity, clamped to [0, 1].
    pub fn set_stop_opacity(&mut self, id: u32, opacity: f64) -> Result<(), GradientError> {
        self.stop_mut(id)?.set_opacity(opacity)
    }

    /// Sets a stop's position, clamped to [0, 100], and re-sorts.
    pub fn set_stop_position(&mut self, id: u32, position: i32) -> Result<(), GradientError> {
        self.stop_mut(id)?.set_position(position);
        self.normalize();
        Ok(())
    }

    pub fn set_kind(&mut self, kind: GradientKind) {
        self.kind = kind;
    }

    pub fn set_repeating(&mut self, repeating: bool) {
        self.repeating = repeating;
    }

    pub fn toggle_repeating(&mut self) {
        self.repeating = !self.repeating;
    }

    pub fn set_radial_shape(&mut self, shape: RadialShape) {
        self.radial_shape = shape;
    }

    pub fn set_radial_size(&mut self, size: RadialSize) {
        self.radial_size = size;
    }

    /// Sets the angle. Any integer is stored; CSS wraps it.
    pub fn set_angle(&mut self, angle: i32) {
        self.angle = angle;
    }

    /// Gives every stop a random opaque color and spreads the positions.
    ///
    /// The first stop moves to 0, the last to 100, interior stops to random
    /// positions in [0, 100). Linear gradients also get a random angle.
    pub fn randomize(&mut self, rng: &mut Xorshift64) {
        let last = self.stops.len().saturating_sub(1);
        for (i, stop) in self.stops.iter_mut().enumerate() {
            stop.set_color(HexColor::random(rng));
            stop.make_opaque();
            let position = match i {
                0 => 0,
                i if i == last => i32::from(MAX_POSITION),
                _ => i32::from(rng.position()),
            };
            stop.set_position(position);
        }
        if self.kind == GradientKind::Linear {
            self.angle = rng.angle();
        }
        self.normalize();
    }

    /// Design equality used for history de-duplication.
    ///
    /// Compares type, angle, repeat flag, radial shape and size, and the
    /// sorted stops by color, position and opacity. Stop ids are ignored.
    pub fn same_design(&self, other: &GradientSpec) -> bool {
        self.kind == other.kind
            && self.angle == other.angle
            && self.repeating == other.repeating
            && self.radial_shape == other.radial_shape
            && self.radial_size == other.radial_size
            && self.stops.len() == other.stops.len()
            && self
                .sorted_stops()
                .into_iter()
                .zip(other.sorted_stops())
                .all(|(a, b)| a.same_value(b))
    }

    fn stop_mut(&mut self, id: u32) -> Result<&mut ColorStop, GradientError> {
        self.stops
            .iter_mut()
            .find(|s| s.id() == id)
            .ok_or(GradientError::StopNotFound(id))
    }
}

fn default_angle() -> i32 {
    DEFAULT_ANGLE
}

/// Accepts the angle as a number or a numeric string (older records stored
/// the raw slider value).
fn angle_from_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Angle {
        Number(f64),
        Text(String),
    }

    let degrees = match Angle::deserialize(deserializer)? {
        Angle::Number(n) => n,
        Angle::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid angle '{s}': {e}")))?,
    };
    if !degrees.is_finite() {
        return Err(serde::de::Error::custom("angle must be finite"));
    }
    Ok(degrees.round() as i32)
}
