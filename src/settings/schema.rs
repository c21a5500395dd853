//! Settings file layout.
//!
//! ```toml
//! [widget]
//! tick_interval_ms = 1000
//! progress_width = 40
//!
//! [storage]
//! path = "/home/me/.local/share/countdown-widget/widget.json"
//!
//! [logging]
//! file = "/tmp/countdown.log"
//! level = "debug"
//! ```
//!
//! Every key is optional.

use crate::countdown::COUNTDOWN_TICK_MS;
use crate::widget::Options;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// The whole settings file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// The `[widget]` table.
    pub widget: WidgetSettings,
    /// The `[storage]` table.
    pub storage: StorageSettings,
    /// The `[logging]` table.
    pub logging: LoggingSettings,
}

/// Presentation of the countdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WidgetSettings {
    /// Refresh interval of the running countdown.
    pub tick_interval_ms: u64,
    /// Width of the progress bar, percentage label included.
    pub progress_width: usize,
}

impl Default for WidgetSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: COUNTDOWN_TICK_MS,
            progress_width: 40,
        }
    }
}

impl WidgetSettings {
    /// Widget options for these settings.
    pub fn options(&self) -> Options {
        Options {
            tick_interval: Duration::from_millis(self.tick_interval_ms),
            progress_width: self.progress_width,
        }
    }
}

/// Where the file-backed host keeps the widget configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Overrides the platform data directory.
    pub path: Option<PathBuf>,
}

/// Log output of the binary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log file; defaults to the platform data directory.
    pub file: Option<PathBuf>,
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file: None,
            level: "info".to_string(),
        }
    }
}
