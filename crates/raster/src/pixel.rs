//! Pure-computation RGBA8 rasterization of a [`GradientSpec`].
//!
//! Always available (no feature gate) so callers that only need a pixel
//! buffer do not pull in the `image` crate.

use glam::DVec2;
use gradient_studio_core::{GradientError, GradientSpec};

use crate::geometry::Geometry;
use crate::ramp::ColorRamp;

/// Paints `spec` into a `width * height * 4` RGBA8 buffer (straight alpha,
/// row-major, top row first).
///
/// Each pixel is sampled at its center. Returns
/// `GradientError::InvalidDimensions` if either side is zero or the buffer
/// size overflows `usize`.
pub fn spec_to_rgba(spec: &GradientSpec, width: u32, height: u32) -> Result<Vec<u8>, GradientError> {
    let len = buffer_len(width, height)?;
    let geometry = Geometry::for_spec(spec, width, height);
    let ramp = ColorRamp::from_spec(spec);

    let mut buf = Vec::with_capacity(len);
    for y in 0..height {
        for x in 0..width {
            let center = DVec2::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let premultiplied = ramp.sample(geometry.offset_at(center));
            buf.extend_from_slice(&to_rgba8(premultiplied));
        }
    }
    Ok(buf)
}

fn buffer_len(width: u32, height: u32) -> Result<usize, GradientError> {
    if width == 0 || height == 0 {
        return Err(GradientError::InvalidDimensions);
    }
    usize::try_from(width)
        .ok()
        .zip(usize::try_from(height).ok())
        .and_then(|(w, h)| w.checked_mul(h))
        .and_then(|n| n.checked_mul(4))
        .ok_or(GradientError::InvalidDimensions)
}

/// Un-premultiplies and quantizes one color.
fn to_rgba8([r, g, b, a]: [f64; 4]) -> [u8; 4] {
    let quantize = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    if a <= 0.0 {
        return [0, 0, 0, 0];
    }
    [quantize(r / a), quantize(g / a), quantize(b / a), quantize(a)]
}
