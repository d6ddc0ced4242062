//! Maps pixel coordinates to ramp offsets.
//!
//! Coordinates are y-down with the origin at the top-left corner, like a
//! canvas. CSS angles put 0° at "to top" and grow clockwise; rotating by
//! -90° gives the canvas convention of 0° along +x.

use glam::DVec2;
use gradient_studio_core::{GradientKind, GradientSpec};

/// Gradient geometry for a bitmap of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    /// Offset 0 at `start`, 1 at `end`, constant along perpendiculars.
    Linear { start: DVec2, end: DVec2 },
    /// Offset 0 at `center`, 1 at distance `radius`.
    Radial { center: DVec2, radius: f64 },
}

impl Geometry {
    pub fn for_spec(spec: &GradientSpec, width: u32, height: u32) -> Self {
        match spec.kind() {
            GradientKind::Linear => Self::linear(spec.angle(), width, height),
            GradientKind::Radial => Self::radial(width, height),
        }
    }

    /// Gradient line through the box center at CSS angle `angle_deg`.
    ///
    /// Its half-length is the box's half-diagonal projected onto the line
    /// direction, so the corners the line points away from and toward land
    /// exactly on offsets 0 and 1.
    pub fn linear(angle_deg: i32, width: u32, height: u32) -> Self {
        let size = DVec2::new(f64::from(width), f64::from(height));
        let center = size / 2.0;
        let theta = (f64::from(angle_deg) - 90.0).to_radians();
        let dir = DVec2::new(theta.cos(), theta.sin());
        let half_len = (center * dir.abs()).element_sum();
        Geometry::Linear {
            start: center - dir * half_len,
            end: center + dir * half_len,
        }
    }

    /// Concentric gradient centered in the box with radius half the longer
    /// side. The CSS shape and size keywords are not modeled here.
    pub fn radial(width: u32, height: u32) -> Self {
        let size = DVec2::new(f64::from(width), f64::from(height));
        Geometry::Radial {
            center: size / 2.0,
            radius: size.max_element() / 2.0,
        }
    }

    /// Ramp offset at `point`. Degenerate geometry samples as 0.
    pub fn offset_at(&self, point: DVec2) -> f64 {
        match *self {
            Geometry::Linear { start, end } => {
                let axis = end - start;
                let len_sq = axis.length_squared();
                if len_sq == 0.0 {
                    return 0.0;
                }
                (point - start).dot(axis) / len_sq
            }
            Geometry::Radial { center, radius } => {
                if radius == 0.0 {
                    return 0.0;
                }
                point.distance(center) / radius
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn assert_point(actual: DVec2, expected: (f64, f64)) {
        assert!(
            (actual.x - expected.0).abs() < EPSILON && (actual.y - expected.1).abs() < EPSILON,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn ninety_degrees_runs_left_to_right() {
        let Geometry::Linear { start, end } = Geometry::linear(90, 200, 100) else {
            panic!("expected linear geometry");
        };
        assert_point(start, (0.0, 50.0));
        assert_point(end, (200.0, 50.0));
    }

    #[test]
    fn zero_degrees_runs_bottom_to_top() {
        let Geometry::Linear { start, end } = Geometry::linear(0, 200, 100) else {
            panic!("expected linear geometry");
        };
        assert_point(start, (100.0, 100.0));
        assert_point(end, (100.0, 0.0));
    }

    #[test]
    fn one_eighty_runs_top_to_bottom() {
        let geom = Geometry::linear(180, 10, 10);
        assert!(geom.offset_at(DVec2::new(5.0, 0.0)).abs() < EPSILON);
        assert!((geom.offset_at(DVec2::new(5.0, 10.0)) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn diagonal_reaches_corners() {
        // 135deg = "to bottom right" on a square: top-left is 0, bottom-right is 1.
        let geom = Geometry::linear(135, 100, 100);
        assert!(geom.offset_at(DVec2::new(0.0, 0.0)).abs() < EPSILON);
        assert!((geom.offset_at(DVec2::new(100.0, 100.0)) - 1.0).abs() < EPSILON);
        assert!((geom.offset_at(DVec2::new(100.0, 0.0)) - 0.5).abs() < EPSILON);
    }

    #[test]
    fn angle_wraps_a_full_turn() {
        let a = Geometry::linear(45, 64, 32);
        let b = Geometry::linear(405, 64, 32);
        let p = DVec2::new(10.0, 20.0);
        assert!((a.offset_at(p) - b.offset_at(p)).abs() < EPSILON);
    }

    #[test]
    fn extreme_angles_stay_finite() {
        for angle in [i32::MIN, i32::MAX] {
            let geom = Geometry::linear(angle, 40, 20);
            let t = geom.offset_at(DVec2::new(3.0, 7.0));
            assert!(t.is_finite(), "angle {angle} gave {t}");
        }
    }

    #[test]
    fn radial_uses_half_longer_side() {
        let geom = Geometry::radial(200, 100);
        assert_eq!(
            geom,
            Geometry::Radial {
                center: DVec2::new(100.0, 50.0),
                radius: 100.0,
            }
        );
        assert!(geom.offset_at(DVec2::new(100.0, 50.0)).abs() < EPSILON);
        assert!((geom.offset_at(DVec2::new(200.0, 50.0)) - 1.0).abs() < EPSILON);
    }

    #[test]
    fn degenerate_boxes_sample_zero() {
        assert_eq!(Geometry::linear(90, 0, 0).offset_at(DVec2::ONE), 0.0);
        assert_eq!(Geometry::radial(0, 0).offset_at(DVec2::ONE), 0.0);
    }

    #[test]
    fn for_spec_picks_kind() {
        let spec = GradientSpec::default();
        assert!(matches!(
            Geometry::for_spec(&spec, 4, 4),
            Geometry::Linear { .. }
        ));
        let radial = spec.with_kind(GradientKind::Radial);
        assert!(matches!(
            Geometry::for_spec(&radial, 4, 4),
            Geometry::Radial { .. }
        ));
    }
}
