#![warn(missing_docs)]

//! # countdown-widget
//!
//! A countdown timer widget for dashboard hosts, built from
//! [bubbletea-rs](https://github.com/joshka/bubbletea-rs) components.
//!
//! The widget shows the days, hours, minutes and (optionally) seconds left
//! until a target date together with a progress bar of the elapsed share.
//! Until it is configured it shows a form for the title, the target date and
//! the seconds toggle. Everything it needs from its surroundings arrives
//! through the [`dashboard::DashboardApi`] it is registered with.
//!
//! ## Components
//!
//! | Module       | Description                                      |
//! |--------------|--------------------------------------------------|
//! | [`widget`]   | The countdown widget and its configuration form  |
//! | [`countdown`]| Remaining-time arithmetic and display snapshots  |
//! | [`dashboard`]| Host contract plus in-memory and file hosts      |
//! | [`timer`]    | Scoped refresh tick                              |
//! | [`textinput`], [`datetime`], [`checkbox`] | Form fields         |
//! | [`progress`], [`help`] | Display helpers                        |
//!
//! ## Mounting a widget
//!
//! ```rust
//! use countdown_widget::prelude::*;
//! use std::sync::Arc;
//!
//! let host = MemoryDashboard::new();
//! let widget = register_widget(
//!     Arc::new(host.clone()),
//!     &host,
//!     Arc::new(SystemClock),
//!     WidgetOptions::default(),
//! );
//!
//! // The first command reads the stored configuration; hand it to the
//! // bubbletea runtime and feed its result back into `widget.update`.
//! let _read = widget.init();
//! ```

pub mod checkbox;
pub mod clock;
pub mod countdown;
pub mod dashboard;
pub mod datetime;
pub mod error;
pub mod help;
pub mod key;
pub mod progress;
pub mod settings;
pub mod textinput;
pub mod timer;
pub mod widget;

use bubbletea_rs::Cmd;

/// Focus management shared by the form fields.
///
/// Only the focused field reacts to keys and draws its cursor or
/// highlight; blurring it stops both.
///
/// ```rust
/// use countdown_widget::prelude::*;
///
/// let mut input = textinput_new();
/// assert!(!input.focused());
///
/// input.focus();
/// assert!(input.focused());
///
/// input.blur();
/// assert!(!input.focused());
/// ```
pub trait Component {
    /// Focuses the component. The returned command, if any, should be run
    /// by the runtime.
    fn focus(&mut self) -> Option<Cmd>;

    /// Removes focus.
    fn blur(&mut self);

    /// Whether the component has focus.
    fn focused(&self) -> bool;
}

pub use checkbox::Model as Checkbox;
pub use clock::{Clock, ManualClock, SystemClock};
pub use countdown::{Breakdown, Snapshot};
pub use dashboard::{
    Chrome, DashboardApi, FileDashboard, HostError, MemoryDashboard, RegisterWidgetApi,
    WidgetConfig,
};
pub use datetime::Model as DateTimePicker;
pub use error::{Error, Result};
pub use help::Model as HelpModel;
pub use key::{matches_binding, new_binding, with_disabled, with_help, with_keys_str, Binding, KeyMap};
pub use progress::Model as Progress;
pub use settings::{Settings, SettingsLoader};
pub use textinput::{new as textinput_new, Model as TextInput};
pub use timer::{Model as Timer, TickMsg as TimerTickMsg};
pub use widget::{register_widget, Model as CountdownWidget, Options as WidgetOptions, WidgetHooks};

/// Common imports for embedding the widget.
///
/// ```rust
/// use countdown_widget::prelude::*;
/// ```
pub mod prelude {
    pub use crate::Component;

    pub use crate::{
        register_widget, CountdownWidget, WidgetHooks, WidgetOptions,
    };

    pub use crate::{
        Chrome, DashboardApi, FileDashboard, HostError, MemoryDashboard, RegisterWidgetApi,
        WidgetConfig,
    };

    pub use crate::{Clock, ManualClock, SystemClock};

    pub use crate::{Breakdown, Snapshot};

    pub use crate::{
        matches_binding, new_binding, with_disabled, with_help, with_keys_str, Binding, KeyMap,
    };

    pub use crate::{textinput_new, Checkbox, DateTimePicker, HelpModel, Progress, TextInput, Timer};
}
