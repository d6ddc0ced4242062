//! Color ramp: the 1-D color function a gradient paints along its axis.
//!
//! Colors are held premultiplied so that fading into a transparent stop does
//! not drag the hue toward black, matching how canvas gradients interpolate.

use gradient_studio_core::GradientSpec;

/// A stop on the ramp: offset in [0, 1] and premultiplied RGBA in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
struct RampStop {
    offset: f64,
    color: [f64; 4],
}

/// Piecewise-linear color function built from a gradient's stops.
#[derive(Debug, Clone)]
pub struct ColorRamp {
    stops: Vec<RampStop>,
    repeating: bool,
}

impl ColorRamp {
    /// Builds the ramp from `spec`'s stops in sorted order.
    pub fn from_spec(spec: &GradientSpec) -> Self {
        let stops = spec
            .sorted_stops()
            .into_iter()
            .map(|stop| {
                let [r, g, b, a] = stop.to_rgba().to_unit();
                RampStop {
                    offset: f64::from(stop.position()) / 100.0,
                    color: [r * a, g * a, b * a, a],
                }
            })
            .collect();
        Self {
            stops,
            repeating: spec.repeating(),
        }
    }

    /// Premultiplied color at `t`.
    ///
    /// Outside the first..last stop interval the end colors extend (pad),
    /// unless the ramp repeats, in which case `t` wraps into that interval.
    /// Stops sharing an offset produce a hard edge: at that offset the later
    /// stop wins.
    pub fn sample(&self, t: f64) -> [f64; 4] {
        let (first, last) = match (self.stops.first(), self.stops.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return [0.0; 4],
        };
        let mut t = if t.is_nan() { 0.0 } else { t };

        let span = last.offset - first.offset;
        if self.repeating && span > 0.0 {
            t = first.offset + (t - first.offset).rem_euclid(span);
        }

        if t < first.offset {
            return first.color;
        }
        if t >= last.offset {
            return last.color;
        }

        // first.offset <= t < last.offset, so 1 <= idx <= len - 1.
        let idx = self.stops.partition_point(|s| s.offset <= t);
        let lo = &self.stops[idx - 1];
        let hi = &self.stops[idx];
        let frac = (t - lo.offset) / (hi.offset - lo.offset);
        std::array::from_fn(|i| lo.color[i] + frac * (hi.color[i] - lo.color[i]))
    }
}
