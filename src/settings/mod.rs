//! Application settings for the `countdown` binary.
//!
//! These are the host application's own knobs (refresh interval, bar width,
//! storage and log locations). The widget's configuration, the countdown the
//! user picked, is stored separately by the dashboard host.
//!
//! # Resolution
//!
//! The first existing file wins:
//!
//! 1. `--settings <FILE>` (must exist)
//! 2. `COUNTDOWN_SETTINGS` environment variable
//! 3. `./countdown.toml`
//! 4. `countdown.toml` in the platform config directory
//!
//! Without a file the built-in defaults apply. `COUNTDOWN_TICK_MS`,
//! `COUNTDOWN_STORAGE` and `COUNTDOWN_LOG` override the corresponding keys
//! either way.

mod error;
mod loader;
mod schema;

pub use error::{SettingsError, SettingsResult};
pub use loader::{project_dirs, resolve_settings_path, SettingsLoader};
pub use schema::{LoggingSettings, Settings, StorageSettings, WidgetSettings};
