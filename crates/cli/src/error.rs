//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: gradient error (too few stops, unknown preset, bad history index)
//! - 11: I/O error (history file, PNG write)
//! - 12: input error (bad `--stop`, bad config file)
//! - 13: serialization error
//! - 14: clipboard error

use gradient_studio_core::GradientError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
#[derive(Debug)]
pub enum CliError {
    /// A model-level error surfaced by the core crate.
    Gradient(GradientError),
    Io(String),
    /// A user input error (malformed flag value, unreadable config).
    Input(String),
    Serialization(String),
    /// The clipboard could not be opened or written.
    Clipboard(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Gradient(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
            CliError::Clipboard(_) => 14,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Gradient(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
            CliError::Clipboard(msg) => write!(f, "clipboard: {msg}"),
        }
    }
}

impl From<GradientError> for CliError {
    fn from(e: GradientError) -> Self {
        match e {
            GradientError::Io(msg) => CliError::Io(msg),
            GradientError::Serialization(msg) => CliError::Serialization(msg),
            other => CliError::Gradient(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        CliError::Io(e.to_string())
    }
}
