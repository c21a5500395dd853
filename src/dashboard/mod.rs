//! The dashboard host as seen from the widget.
//!
//! The widget never reaches for global state: everything it needs from the
//! embedding dashboard arrives as an injected [`DashboardApi`]. Two hosts are
//! provided:
//!
//! - [`MemoryDashboard`] keeps everything in memory, records every call and
//!   can be told to fail, which makes it the fake of choice in tests.
//! - [`FileDashboard`] persists the widget configuration as a JSON file.
//!
//! Both keep a [`Chrome`], the host-side state the widget influences (title,
//! configuration-mode marker, removal request and the registered hooks).

pub mod config;
pub mod error;
pub mod file;
pub mod memory;

pub use config::WidgetConfig;
pub use error::{HostError, HostResult, Operation};
pub use file::FileDashboard;
pub use memory::{HostCall, MemoryDashboard};

use crate::widget::WidgetHooks;
use async_trait::async_trait;
use bubbletea_rs::Msg;
use parking_lot::Mutex;
use std::sync::Arc;

/// Capabilities the embedding dashboard offers to a widget.
#[async_trait]
pub trait DashboardApi: Send + Sync {
    /// Persisted configuration, or `None` if the widget was never configured.
    async fn read_config(&self) -> HostResult<Option<WidgetConfig>>;

    /// Atomically replaces the persisted configuration.
    async fn store_config(&self, config: WidgetConfig) -> HostResult<()>;

    /// Shows the widget inside the host's edit chrome.
    fn enter_config_mode(&self);

    /// Leaves the edit chrome.
    async fn exit_config_mode(&self) -> HostResult<()>;

    /// Sets the title drawn by the host around the widget.
    fn set_title(&self, title: &str);

    /// Asks the host to delete this widget instance.
    fn remove_widget(&self);
}

/// Lets a widget hand its hooks back to the host when it is mounted.
pub trait RegisterWidgetApi {
    /// Receives the hooks of a newly built widget.
    fn register(&self, hooks: WidgetHooks);
}

#[derive(Debug, Default)]
struct ChromeState {
    title: Option<String>,
    config_mode: bool,
    removed: bool,
    hooks: Option<WidgetHooks>,
}

/// Host-side chrome state. Clones share the same state.
#[derive(Debug, Clone, Default)]
pub struct Chrome {
    state: Arc<Mutex<ChromeState>>,
}

impl Chrome {
    /// Chrome with no title, outside config mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// The title drawn around the widget, if one was set.
    pub fn title(&self) -> Option<String> {
        self.state.lock().title.clone()
    }

    /// Whether the edit chrome is shown.
    pub fn in_config_mode(&self) -> bool {
        self.state.lock().config_mode
    }

    /// Whether the widget asked to be deleted.
    pub fn removed(&self) -> bool {
        self.state.lock().removed
    }

    /// Hooks of the registered widget.
    pub fn hooks(&self) -> Option<WidgetHooks> {
        self.state.lock().hooks
    }

    /// Switches the host into configuration mode and returns the message that
    /// sends the registered widget there too. `None` until a widget registers.
    pub fn configure(&self) -> Option<Msg> {
        let mut state = self.state.lock();
        let hooks = state.hooks?;
        state.config_mode = true;
        Some(hooks.on_configure())
    }

    pub(crate) fn set_title(&self, title: &str) {
        self.state.lock().title = Some(title.to_string());
    }

    pub(crate) fn set_config_mode(&self, on: bool) {
        self.state.lock().config_mode = on;
    }

    pub(crate) fn mark_removed(&self) {
        let mut state = self.state.lock();
        state.removed = true;
        state.config_mode = false;
    }
}

impl RegisterWidgetApi for Chrome {
    fn register(&self, hooks: WidgetHooks) {
        self.state.lock().hooks = Some(hooks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::ConfigureMsg;

    #[test]
    fn test_configure_needs_a_registered_widget() {
        let chrome = Chrome::new();
        assert!(chrome.configure().is_none());
        assert!(!chrome.in_config_mode());
    }

    #[test]
    fn test_configure_targets_registered_widget() {
        let chrome = Chrome::new();
        let clock = std::sync::Arc::new(crate::clock::SystemClock);
        let host = std::sync::Arc::new(MemoryDashboard::new());
        let widget = crate::widget::register_widget(host, &chrome, clock, Default::default());

        let msg = chrome.configure().unwrap();
        let configure = msg.downcast_ref::<ConfigureMsg>().unwrap();
        assert_eq!(configure.id, widget.id());
        assert!(chrome.in_config_mode());
    }
}
