//! Messages exchanged between the widget and the commands it issues.
//!
//! Every message carries the id of the widget it belongs to; a widget ignores
//! messages addressed to another instance.

use crate::dashboard::{Operation, WidgetConfig};

/// Result of reading the stored configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoadedMsg {
    /// Recipient widget.
    pub id: i64,
    /// `None` when nothing is stored.
    pub config: Option<WidgetConfig>,
}

/// The host accepted a save.
#[derive(Debug, Clone)]
pub struct ConfigStoredMsg {
    /// Recipient widget.
    pub id: i64,
    /// What was stored.
    pub config: WidgetConfig,
}

/// Stored configuration as read when the user pressed cancel.
#[derive(Debug, Clone)]
pub struct CancelResolvedMsg {
    /// Recipient widget.
    pub id: i64,
    /// `None` when the widget was never saved.
    pub config: Option<WidgetConfig>,
}

/// Sent by the host to force the widget back into configuration mode.
#[derive(Debug, Clone)]
pub struct ConfigureMsg {
    /// Recipient widget.
    pub id: i64,
}

/// A host call failed.
#[derive(Debug, Clone)]
pub struct HostErrorMsg {
    /// Recipient widget.
    pub id: i64,
    /// The failed call.
    pub operation: Operation,
    /// The host's error, rendered.
    pub message: String,
}
