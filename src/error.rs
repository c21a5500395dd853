//! Crate-level error type for the `countdown` binary and library callers.

use crate::dashboard::HostError;
use crate::settings::SettingsError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop the `countdown` binary.
#[derive(Debug, Error)]
pub enum Error {
    /// A dashboard host call failed.
    #[error(transparent)]
    Host(#[from] HostError),

    /// Settings could not be loaded.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// The log file could not be opened.
    #[error("Failed to open log file '{path}': {source}")]
    Log {
        /// The log file.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// The terminal program failed to start or crashed.
    #[error("Terminal program failed: {0}")]
    Program(#[from] bubbletea_rs::Error),
}

/// Result alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Operation;

    #[test]
    fn test_host_errors_pass_through() {
        let err: Error = HostError::rejected(Operation::ReadConfig, "offline").into();
        assert_eq!(err.to_string(), "host rejected reading configuration: offline");
    }

    #[test]
    fn test_settings_errors_pass_through() {
        let err: Error = SettingsError::invalid("widget.progress_width", "must be greater than zero").into();
        assert_eq!(
            err.to_string(),
            "Invalid setting 'widget.progress_width': must be greater than zero"
        );
    }
}
