//! Optional `gradient-studio.toml` configuration.
//!
//! Every key is optional; a missing file yields [`Config::default`].
//! Command-line flags override whatever the file sets.

use std::fs;
use std::path::{Path, PathBuf};

use gradient_studio_core::ExportFormat;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

/// Looked up in the working directory when `--config` is not given.
pub const CONFIG_FILE: &str = "gradient-studio.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Directory holding `savedGradients.json`.
    pub history_dir: PathBuf,
    /// PNG width in pixels.
    pub width: u32,
    /// PNG height in pixels.
    pub height: u32,
    /// Export format tag; unknown tags fall back to plain CSS.
    pub format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_dir: PathBuf::from(".gradient-studio"),
            width: 800,
            height: 400,
            format: ExportFormat::Css.tag().to_string(),
        }
    }
}

impl Config {
    /// Loads `explicit` if given (it must exist), otherwise [`CONFIG_FILE`]
    /// from the working directory if present, otherwise the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, CliError> {
        match explicit {
            Some(path) => Self::load_file(path),
            None => {
                let path = Path::new(CONFIG_FILE);
                if path.exists() {
                    Self::load_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn load_file(path: &Path) -> Result<Self, CliError> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::Input(format!("failed to read {}: {e}", path.display())))?;
        let config = Self::from_toml_str(&content)
            .map_err(|e| CliError::Input(format!("failed to parse {}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn export_format(&self) -> ExportFormat {
        ExportFormat::from_tag(&self.format)
    }
}
