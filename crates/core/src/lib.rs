#![deny(unsafe_code)]
//! Core model for the gradient-studio CSS gradient editor.
//!
//! Provides the `GradientSpec` model (color stops plus linear/radial style),
//! hex color validation and `rgba()` conversion, CSS serialization with the
//! CSS/Tailwind/React/JS export templates, the preset gallery, the persisted
//! saved-gradient history, and the command-driven `Editor` session.

pub mod color;
pub mod css;
pub mod editor;
pub mod error;
pub mod gradient;
pub mod history;
pub mod preset;
pub mod random;
pub mod stop;
pub mod storage;

pub use color::{HexColor, Rgba};
pub use css::ExportFormat;
pub use editor::{ClipboardSink, Command, Editor, Notice, Outcome};
pub use error::GradientError;
pub use gradient::{GradientKind, GradientSpec, RadialShape, RadialSize};
pub use history::{History, SaveOutcome, SavedGradient};
pub use preset::Preset;
pub use random::Xorshift64;
pub use stop::ColorStop;
pub use storage::{FileStorage, MemoryStorage, Storage};
