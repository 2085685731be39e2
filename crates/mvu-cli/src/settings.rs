//! User settings.
//!
//! Stored as TOML in the platform config directory. Every field has a default,
//! so partial files are fine. Command-line flags take precedence over values
//! read here.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::logging::LogFormat;

/// File name inside the config directory.
pub const SETTINGS_FILE: &str = "settings.toml";

/// Errors raised while reading settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Persisted preferences.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub output: OutputSettings,
}

/// `[logging]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log format used when `--log-format` is not given.
    pub format: LogFormat,
    /// Include timestamps in log lines.
    pub timestamps: bool,
    /// Include the module path in log lines.
    pub target: bool,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Table rows shown by `render` when `--rows` is not given.
    pub preview_rows: usize,
    /// Emit JSON from `run` by default.
    pub json: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            preview_rows: 5,
            json: false,
        }
    }
}

impl Settings {
    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no settings file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, falling back to the defaults on any error.
    ///
    /// Logging is not set up yet when this runs, so problems go to stderr.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load_from(path).unwrap_or_else(|error| {
            eprintln!("warning: {error}; using default settings");
            Self::default()
        })
    }

    /// Default settings path for this platform.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "mvu", "mvu-counter")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE))
    }
}
