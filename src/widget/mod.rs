//! The countdown widget.
//!
//! A widget is either being configured (showing the [`Form`]) or running
//! (showing the live countdown). Every host interaction is issued as a
//! command whose result comes back as a message, so `update` itself never
//! blocks:
//!
//! | Trigger            | Host calls                               | Result message          |
//! |--------------------|------------------------------------------|-------------------------|
//! | [`Model::init`]    | `read_config`                            | [`ConfigLoadedMsg`]     |
//! | save               | `store_config`                           | [`ConfigStoredMsg`]     |
//! | cancel             | `read_config`                            | [`CancelResolvedMsg`]   |
//! | cancel, configured | `exit_config_mode`, then `read_config`   | [`ConfigLoadedMsg`]     |
//!
//! A failing call produces a [`HostErrorMsg`] instead. The widget logs it,
//! shows it as an inline notice and otherwise stays where it was.
//!
//! # Example
//!
//! ```rust
//! use countdown_widget::clock::SystemClock;
//! use countdown_widget::dashboard::MemoryDashboard;
//! use countdown_widget::widget::{register_widget, Options};
//! use std::sync::Arc;
//!
//! let host = MemoryDashboard::new();
//! let widget = register_widget(
//!     Arc::new(host.clone()),
//!     &host,
//!     Arc::new(SystemClock),
//!     Options::default(),
//! );
//! assert_eq!(host.chrome().hooks().map(|h| h.widget_id()), Some(widget.id()));
//! assert!(widget.is_configuring());
//! ```

mod display;
pub mod form;
pub mod messages;
pub mod state;
pub mod styles;


pub use form::{Field, Form, FormEvent, FormKeys};
pub use messages::{
    CancelResolvedMsg, ConfigLoadedMsg, ConfigStoredMsg, ConfigureMsg, HostErrorMsg,
};
pub use state::{Countdown, Draft, State};
pub use styles::Styles;

use crate::clock::Clock;
use crate::countdown::{Snapshot, COUNTDOWN_TICK_MS};
use crate::dashboard::{DashboardApi, HostError, Operation, RegisterWidgetApi, WidgetConfig};
use crate::{help, progress, timer};
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration;

static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Callbacks a widget hands to its host when it is registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetHooks {
    widget_id: i64,
}

impl WidgetHooks {
    /// Id of the widget these hooks belong to.
    pub fn widget_id(&self) -> i64 {
        self.widget_id
    }

    /// Message that puts the widget back into configuration mode.
    pub fn on_configure(&self) -> Msg {
        Box::new(ConfigureMsg {
            id: self.widget_id,
        })
    }
}

/// Presentation settings for a widget instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Refresh interval of the running countdown.
    pub tick_interval: Duration,
    /// Progress bar width, label included.
    pub progress_width: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(COUNTDOWN_TICK_MS),
            progress_width: 40,
        }
    }
}

/// Builds a widget bound to `api` and registers its hooks with the host.
pub fn register_widget(
    api: Arc<dyn DashboardApi>,
    registrar: &dyn RegisterWidgetApi,
    clock: Arc<dyn Clock>,
    options: Options,
) -> Model {
    let model = Model::new(api, clock, options);
    registrar.register(model.hooks());
    tracing::debug!(widget = model.id, "widget registered");
    model
}

/// A countdown widget instance.
pub struct Model {
    id: i64,
    api: Arc<dyn DashboardApi>,
    clock: Arc<dyn Clock>,
    state: State,
    ticker: timer::Model,
    progress: progress::Model,
    help: help::Model,
    /// Styles of both modes.
    pub styles: Styles,
    notice: Option<String>,
    removed: bool,
}

impl Model {
    /// Builds an unregistered widget showing an empty form. Most callers
    /// want [`register_widget`].
    pub fn new(api: Arc<dyn DashboardApi>, clock: Arc<dyn Clock>, options: Options) -> Self {
        let now = clock.now();
        Self {
            id: next_id(),
            api,
            clock,
            state: State::Configuring(Form::new(&Draft::fresh(now))),
            ticker: timer::new(options.tick_interval),
            progress: progress::new(&[progress::with_width(options.progress_width)]),
            help: help::Model::new(),
            styles: Styles::default(),
            notice: None,
            removed: false,
        }
    }

    /// Instance id carried by this widget's messages.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Hooks to hand to the host.
    pub fn hooks(&self) -> WidgetHooks {
        WidgetHooks { widget_id: self.id }
    }

    /// Current mode.
    pub fn state(&self) -> &State {
        &self.state
    }

    /// Whether the form is shown.
    pub fn is_configuring(&self) -> bool {
        self.state.is_configuring()
    }

    /// Whether the widget asked the host to delete it.
    pub fn removed(&self) -> bool {
        self.removed
    }

    /// The inline error notice, if a host call failed since the last success.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether the refresh tick is currently scheduled.
    pub fn ticking(&self) -> bool {
        self.ticker.running()
    }

    /// Current display state, when running.
    pub fn snapshot(&self) -> Option<Snapshot> {
        match &self.state {
            State::Running(countdown) => Some(countdown.snapshot(self.clock.now())),
            State::Configuring(_) => None,
        }
    }

    /// Reads the stored configuration.
    pub fn init(&self) -> Cmd {
        self.read_config_cmd()
    }

    /// Stops the refresh tick. Call when the widget is unmounted.
    pub fn deactivate(&mut self) {
        tracing::debug!(widget = self.id, "widget deactivated");
        self.ticker.stop();
    }

    /// Handles ticks, key presses while configuring, host results and the
    /// configure hook. Messages for other widgets are ignored, as is
    /// everything once the widget was removed.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if self.removed {
            return None;
        }

        if msg.downcast_ref::<timer::TickMsg>().is_some() {
            return self.ticker.update(msg);
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            return self.handle_key(key);
        }

        if let Some(m) = msg.downcast_ref::<ConfigLoadedMsg>() {
            return (m.id == self.id).then(|| self.on_config_loaded(m.config.clone()))?;
        }
        if let Some(m) = msg.downcast_ref::<ConfigStoredMsg>() {
            return (m.id == self.id).then(|| self.on_config_stored(m.config.clone()))?;
        }
        if let Some(m) = msg.downcast_ref::<CancelResolvedMsg>() {
            return (m.id == self.id).then(|| self.on_cancel_resolved(m.config.clone()))?;
        }
        if let Some(m) = msg.downcast_ref::<ConfigureMsg>() {
            if m.id == self.id {
                self.on_configure();
            }
            return None;
        }
        if let Some(m) = msg.downcast_ref::<HostErrorMsg>() {
            return (m.id == self.id).then(|| self.on_host_error(m))?;
        }

        None
    }

    fn handle_key(&mut self, key: &KeyMsg) -> Option<Cmd> {
        let now = self.clock.now();
        let State::Configuring(form) = &mut self.state else {
            return None;
        };
        match form.handle_key(key, now) {
            FormEvent::Save => self.save(),
            FormEvent::Cancel => Some(self.cancel()),
            FormEvent::Edited | FormEvent::Ignored => None,
        }
    }

    fn save(&mut self) -> Option<Cmd> {
        let State::Configuring(form) = &self.state else {
            return None;
        };
        if !form.can_save() {
            return None;
        }
        let config = form.draft().to_config();
        tracing::info!(widget = self.id, title = %config.countdown_title, "saving countdown");

        let api = Arc::clone(&self.api);
        let id = self.id;
        Some(Box::pin(async move {
            let msg: Msg = match api.store_config(config.clone()).await {
                Ok(()) => Box::new(ConfigStoredMsg { id, config }),
                Err(err) => host_error(id, Operation::StoreConfig, &err),
            };
            Some(msg)
        }))
    }

    fn cancel(&self) -> Cmd {
        tracing::info!(widget = self.id, "configuration cancelled");
        let api = Arc::clone(&self.api);
        let id = self.id;
        Box::pin(async move {
            let msg: Msg = match api.read_config().await {
                Ok(config) => Box::new(CancelResolvedMsg { id, config }),
                Err(err) => host_error(id, Operation::ReadConfig, &err),
            };
            Some(msg)
        })
    }

    fn read_config_cmd(&self) -> Cmd {
        let api = Arc::clone(&self.api);
        let id = self.id;
        Box::pin(async move {
            let msg: Msg = match api.read_config().await {
                Ok(config) => Box::new(ConfigLoadedMsg { id, config }),
                Err(err) => host_error(id, Operation::ReadConfig, &err),
            };
            Some(msg)
        })
    }

    fn on_config_loaded(&mut self, config: Option<WidgetConfig>) -> Option<Cmd> {
        self.notice = None;
        match config {
            None => {
                tracing::debug!(widget = self.id, "no stored configuration, entering configuration");
                self.api.enter_config_mode();
                self.enter_configuring();
                None
            }
            Some(config) => {
                tracing::debug!(widget = self.id, title = %config.countdown_title, "configuration loaded");
                self.state = State::Running(config.into());
                self.ensure_ticking()
            }
        }
    }

    fn on_config_stored(&mut self, config: WidgetConfig) -> Option<Cmd> {
        self.notice = None;
        self.api.set_title(&config.title_for_host());
        self.state = State::Running(config.into());
        self.ensure_ticking()
    }

    fn on_cancel_resolved(&mut self, config: Option<WidgetConfig>) -> Option<Cmd> {
        self.notice = None;
        let Some(config) = config else {
            tracing::info!(widget = self.id, "cancelled before first save, removing widget");
            self.ticker.stop();
            self.removed = true;
            self.api.remove_widget();
            return None;
        };

        self.state = State::Running(config.into());
        let api = Arc::clone(&self.api);
        let id = self.id;
        Some(Box::pin(async move {
            if let Err(err) = api.exit_config_mode().await {
                return Some(host_error(id, Operation::ExitConfigMode, &err));
            }
            let msg: Msg = match api.read_config().await {
                Ok(config) => Box::new(ConfigLoadedMsg { id, config }),
                Err(err) => host_error(id, Operation::ReadConfig, &err),
            };
            Some(msg)
        }))
    }

    fn on_configure(&mut self) {
        tracing::debug!(widget = self.id, "host requested configuration");
        self.enter_configuring();
    }

    fn on_host_error(&mut self, err: &HostErrorMsg) -> Option<Cmd> {
        tracing::error!(widget = self.id, operation = %err.operation, error = %err.message, "host call failed");
        self.notice = Some(format!("Error while {}: {}", err.operation, err.message));
        if matches!(self.state, State::Running(_)) {
            return self.ensure_ticking();
        }
        None
    }

    /// Switches to the form, seeded from the running countdown if there is
    /// one. An open form is left untouched.
    fn enter_configuring(&mut self) {
        self.ticker.stop();
        if let State::Running(countdown) = &self.state {
            self.state = State::Configuring(Form::new(&countdown.to_draft()));
        }
    }

    fn ensure_ticking(&mut self) -> Option<Cmd> {
        if self.ticker.running() {
            None
        } else {
            Some(self.ticker.start())
        }
    }

    /// The form or the countdown, followed by the notice if any. Empty once
    /// removed.
    pub fn view(&self) -> String {
        if self.removed {
            return String::new();
        }

        let body = match &self.state {
            State::Configuring(form) => form.view(&self.styles, &self.help),
            State::Running(countdown) => {
                display::render(&countdown.snapshot(self.clock.now()), &self.progress, &self.styles)
            }
        };

        match &self.notice {
            Some(notice) => format!("{body}\n\n{}", self.styles.notice.render(notice)),
            None => body,
        }
    }
}

fn host_error(id: i64, operation: Operation, err: &HostError) -> Msg {
    Box::new(HostErrorMsg {
        id,
        operation,
        message: err.to_string(),
    })
}
