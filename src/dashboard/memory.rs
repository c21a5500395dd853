//! In-memory dashboard host.
//!
//! Records every call in order and can be told to fail specific operations,
//! which is how the widget's error paths are exercised.
//!
//! ```rust
//! use countdown_widget::dashboard::{DashboardApi, HostCall, MemoryDashboard};
//!
//! let host = MemoryDashboard::new();
//! host.set_title("Time to: Launch");
//! assert_eq!(host.chrome().title().as_deref(), Some("Time to: Launch"));
//! assert_eq!(host.calls(), vec![HostCall::SetTitle("Time to: Launch".into())]);
//! ```

use super::{Chrome, DashboardApi, HostError, HostResult, Operation, RegisterWidgetApi, WidgetConfig};
use crate::widget::WidgetHooks;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

/// One observed call into the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    /// `read_config`.
    ReadConfig,
    /// `store_config` with the config passed.
    StoreConfig(WidgetConfig),
    /// `enter_config_mode`.
    EnterConfigMode,
    /// `exit_config_mode`.
    ExitConfigMode,
    /// `set_title` with the title passed.
    SetTitle(String),
    /// `remove_widget`.
    RemoveWidget,
}

#[derive(Debug, Default)]
struct MemoryState {
    config: Option<WidgetConfig>,
    calls: Vec<HostCall>,
    failing: HashSet<Operation>,
}

/// Host that keeps everything in memory. Clones share state.
#[derive(Debug, Clone, Default)]
pub struct MemoryDashboard {
    state: Arc<Mutex<MemoryState>>,
    chrome: Chrome,
}

impl MemoryDashboard {
    /// A host with nothing stored.
    pub fn new() -> Self {
        Self::default()
    }

    /// A host with `config` already stored.
    pub fn with_config(config: WidgetConfig) -> Self {
        let host = Self::new();
        host.state.lock().config = Some(config);
        host
    }

    /// Shared handle on the host chrome.
    pub fn chrome(&self) -> Chrome {
        self.chrome.clone()
    }

    /// Currently persisted configuration.
    pub fn stored(&self) -> Option<WidgetConfig> {
        self.state.lock().config.clone()
    }

    /// Replaces the stored configuration without recording a call.
    pub fn put(&self, config: Option<WidgetConfig>) {
        self.state.lock().config = config;
    }

    /// Calls received so far, oldest first.
    pub fn calls(&self) -> Vec<HostCall> {
        self.state.lock().calls.clone()
    }

    /// Forgets the recorded calls.
    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Makes every subsequent `operation` fail until [`recover`](Self::recover).
    pub fn fail(&self, operation: Operation) {
        self.state.lock().failing.insert(operation);
    }

    /// Lets `operation` succeed again.
    pub fn recover(&self, operation: Operation) {
        self.state.lock().failing.remove(&operation);
    }

    fn record(&self, call: HostCall) {
        self.state.lock().calls.push(call);
    }

    fn check(&self, operation: Operation) -> HostResult<()> {
        if self.state.lock().failing.contains(&operation) {
            return Err(HostError::rejected(operation, "injected failure"));
        }
        Ok(())
    }
}

#[async_trait]
impl DashboardApi for MemoryDashboard {
    async fn read_config(&self) -> HostResult<Option<WidgetConfig>> {
        self.record(HostCall::ReadConfig);
        self.check(Operation::ReadConfig)?;
        Ok(self.stored())
    }

    async fn store_config(&self, config: WidgetConfig) -> HostResult<()> {
        self.record(HostCall::StoreConfig(config.clone()));
        self.check(Operation::StoreConfig)?;
        self.state.lock().config = Some(config);
        self.chrome.set_config_mode(false);
        Ok(())
    }

    fn enter_config_mode(&self) {
        self.record(HostCall::EnterConfigMode);
        self.chrome.set_config_mode(true);
    }

    async fn exit_config_mode(&self) -> HostResult<()> {
        self.record(HostCall::ExitConfigMode);
        self.check(Operation::ExitConfigMode)?;
        self.chrome.set_config_mode(false);
        Ok(())
    }

    fn set_title(&self, title: &str) {
        self.record(HostCall::SetTitle(title.to_string()));
        self.chrome.set_title(title);
    }

    fn remove_widget(&self) {
        self.record(HostCall::RemoveWidget);
        self.chrome.mark_removed();
    }
}

impl RegisterWidgetApi for MemoryDashboard {
    fn register(&self, hooks: WidgetHooks) {
        self.chrome.register(hooks);
    }
}
