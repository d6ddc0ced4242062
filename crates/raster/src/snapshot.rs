//! PNG export of a rasterized gradient.
//!
//! Feature-gated behind `png` (default on). The pixel buffer itself comes
//! from [`crate::pixel`].

use std::io::Cursor;
use std::path::Path;

use gradient_studio_core::{GradientError, GradientSpec};
use image::{ImageFormat, RgbaImage};

use crate::pixel::spec_to_rgba;

/// File name offered for the downloaded image.
pub const DEFAULT_FILE_NAME: &str = "gradient.png";

/// Rasterizes `spec` into an in-memory image.
pub fn render_image(spec: &GradientSpec, width: u32, height: u32) -> Result<RgbaImage, GradientError> {
    let rgba = spec_to_rgba(spec, width, height)?;
    RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| GradientError::Io("RGBA buffer size mismatch".into()))
}

/// Rasterizes `spec` and encodes it as a PNG byte stream.
pub fn encode_png(spec: &GradientSpec, width: u32, height: u32) -> Result<Vec<u8>, GradientError> {
    let img = render_image(spec, width, height)?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| GradientError::Io(e.to_string()))?;
    tracing::debug!(width, height, bytes = bytes.len(), "encoded gradient png");
    Ok(bytes)
}

/// Rasterizes `spec` and writes it to `path` as PNG, whatever the extension.
pub fn write_png(spec: &GradientSpec, width: u32, height: u32, path: &Path) -> Result<(), GradientError> {
    render_image(spec, width, height)?
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| GradientError::Io(e.to_string()))
}
