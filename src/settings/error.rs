//! Errors raised while loading application settings.

use std::path::PathBuf;
use thiserror::Error;

/// Why settings could not be loaded.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A settings file was named explicitly but does not exist.
    #[error("Settings file not found: {0}")]
    NotFound(PathBuf),

    /// The settings file exists but could not be read.
    #[error("Failed to read settings file '{path}': {source}")]
    Read {
        /// The file.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML for [`Settings`](super::Settings).
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("Invalid setting '{key}': {message}")]
    Invalid {
        /// Dotted key, e.g. `widget.tick_interval_ms`.
        key: String,
        /// What is wrong with it.
        message: String,
    },

    /// An override variable holds an unusable value.
    #[error("Failed to parse environment variable '{var}': {message}")]
    Env {
        /// The variable name.
        var: String,
        /// Why its value was rejected.
        message: String,
    },
}

impl SettingsError {
    /// Builds [`SettingsError::Invalid`].
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            key: key.into(),
            message: message.into(),
        }
    }

    /// Builds [`SettingsError::Env`].
    pub fn env(var: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Env {
            var: var.into(),
            message: message.into(),
        }
    }
}

/// Result alias for [`SettingsError`].
pub type SettingsResult<T> = Result<T, SettingsError>;
