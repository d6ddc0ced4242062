//! CSS gradient serialization and the text export formats built on it.
//!
//! [`to_css`] is the single source of truth for the gradient function string:
//! the live preview, every export template and the history thumbnails all
//! derive from it.

use std::fmt;
use std::str::FromStr;

use crate::gradient::{GradientKind, GradientSpec};

/// Text export format for the output panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    #[default]
    Css,
    Tailwind,
    React,
    Js,
}

impl ExportFormat {
    /// Maps a format tag to a format, falling back to [`ExportFormat::Css`]
    /// for anything unrecognized.
    pub fn from_tag(tag: &str) -> Self {
        Self::all()
            .into_iter()
            .find(|f| f.tag().eq_ignore_ascii_case(tag.trim()))
            .unwrap_or_default()
    }

    pub fn tag(self) -> &'static str {
        match self {
            ExportFormat::Css => "css",
            ExportFormat::Tailwind => "tailwind",
            ExportFormat::React => "react",
            ExportFormat::Js => "js",
        }
    }

    pub fn all() -> [ExportFormat; 4] {
        [
            ExportFormat::Css,
            ExportFormat::Tailwind,
            ExportFormat::React,
            ExportFormat::Js,
        ]
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ExportFormat {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_tag(s))
    }
}

/// CSS function name for a gradient type and repeat flag,
/// e.g. `repeating-radial-gradient`.
pub fn function_name(kind: GradientKind, repeating: bool) -> &'static str {
    match (kind, repeating) {
        (GradientKind::Linear, false) => "linear-gradient",
        (GradientKind::Linear, true) => "repeating-linear-gradient",
        (GradientKind::Radial, false) => "radial-gradient",
        (GradientKind::Radial, true) => "repeating-radial-gradient",
    }
}

/// Comma-separated `rgba(...) <pos>%` list, sorted by position.
pub fn stop_list(spec: &GradientSpec) -> String {
    spec.sorted_stops()
        .into_iter()
        .map(|stop| format!("{} {}%", stop.to_rgba(), stop.position()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Serializes a gradient to a CSS gradient function call.
///
/// ```
/// use gradient_studio_core::{css, GradientSpec};
///
/// assert_eq!(
///     css::to_css(&GradientSpec::default()),
///     "linear-gradient(90deg, rgba(59, 130, 246, 1) 0%, rgba(139, 92, 246, 1) 100%)"
/// );
/// ```
pub fn to_css(spec: &GradientSpec) -> String {
    let head = match spec.kind() {
        GradientKind::Linear => format!("{}deg", spec.angle()),
        GradientKind::Radial => format!("{} {}", spec.radial_shape(), spec.radial_size()),
    };
    format!(
        "{}({head}, {})",
        function_name(spec.kind(), spec.repeating()),
        stop_list(spec)
    )
}

/// Wraps a serialized gradient in the template for `format`.
pub fn export(gradient: &str, format: ExportFormat) -> String {
    match format {
        ExportFormat::Css => format!("background: {gradient};"),
        ExportFormat::Tailwind => format!(
            "You'll need to add this to your Tailwind config:\n\
             \n\
             module.exports = {{\n  \
               theme: {{\n    \
                 extend: {{\n      \
                   backgroundImage: {{\n        \
                     'my-gradient': '{gradient}'\n      \
                   }}\n    \
                 }}\n  \
               }}\n\
             }}\n\
             \n\
             Then use it as:\n\
             \n\
             <div class=\"bg-my-gradient\"></div>"
        ),
        ExportFormat::React => format!("<div style={{{{ \n  background: '{gradient}'\n}}}}></div>"),
        ExportFormat::Js => format!("element.style.background = '{gradient}';"),
    }
}

/// Serializes `spec` and wraps it for `format`.
pub fn export_spec(spec: &GradientSpec, format: ExportFormat) -> String {
    export(&to_css(spec), format)
}
