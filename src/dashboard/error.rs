//! Errors reported by host collaborator calls.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// The fallible host operations, named for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// [`DashboardApi::read_config`](super::DashboardApi::read_config).
    ReadConfig,
    /// [`DashboardApi::store_config`](super::DashboardApi::store_config).
    StoreConfig,
    /// [`DashboardApi::exit_config_mode`](super::DashboardApi::exit_config_mode).
    ExitConfigMode,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Operation::ReadConfig => "reading configuration",
                Operation::StoreConfig => "saving configuration",
                Operation::ExitConfigMode => "leaving configuration mode",
            }
        )
    }
}

/// Failure of a host call.
#[derive(Debug, Error)]
pub enum HostError {
    /// The backing store could not be read or written.
    #[error("widget storage '{path}' is not accessible: {source}")]
    Storage {
        /// The file involved.
        path: PathBuf,
        /// The underlying failure.
        #[source]
        source: std::io::Error,
    },

    /// Stored configuration could not be (de)serialized.
    #[error("widget configuration is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The host refused the call.
    #[error("host rejected {operation}: {reason}")]
    Rejected {
        /// The refused call.
        operation: Operation,
        /// Reason given by the host.
        reason: String,
    },
}

impl HostError {
    /// Builds [`HostError::Storage`].
    pub fn storage(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Storage {
            path: path.into(),
            source,
        }
    }

    /// Builds [`HostError::Rejected`].
    pub fn rejected(operation: Operation, reason: impl Into<String>) -> Self {
        Self::Rejected {
            operation,
            reason: reason.into(),
        }
    }
}

/// Result alias for [`HostError`].
pub type HostResult<T> = Result<T, HostError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_names_operation() {
        let err = HostError::rejected(Operation::StoreConfig, "quota exceeded");
        assert_eq!(
            err.to_string(),
            "host rejected saving configuration: quota exceeded"
        );
    }

    #[test]
    fn test_storage_error_keeps_source() {
        use std::error::Error as _;

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = HostError::storage("/tmp/widget.json", io);
        assert!(err.to_string().contains("/tmp/widget.json"));
        assert!(err.source().is_some());
    }
}
