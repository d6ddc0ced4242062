#![deny(unsafe_code)]
//! Rasterizer for gradient-studio gradients.
//!
//! Turns a [`GradientSpec`](gradient_studio_core::GradientSpec) into a bitmap
//! that approximates the CSS preview: linear gradients follow the CSS angle
//! convention exactly, radial gradients are a single concentric ramp centered
//! in the bitmap with radius half the longer side.
//!
//! The pixel path ([`pixel`]) is always available; PNG encoding
//! ([`snapshot`]) sits behind the default `png` feature.

pub mod geometry;
pub mod pixel;
pub mod ramp;

#[cfg(feature = "png")]
pub mod snapshot;

pub use geometry::Geometry;
pub use pixel::spec_to_rgba;
pub use ramp::ColorRamp;
