//! The widget's two modes as an explicit state type.

use super::form::Form;
use crate::countdown::Snapshot;
use crate::dashboard::WidgetConfig;
use chrono::{DateTime, Utc};

/// Editable values of the configuration form.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    /// Countdown title.
    pub title: String,
    /// Target instant.
    pub target: DateTime<Utc>,
    /// Duration captured when the target was picked.
    pub total_diff_ms: Option<i64>,
    /// Whether seconds are shown.
    pub show_seconds: bool,
}

impl Draft {
    /// What a never-configured widget starts with.
    pub fn fresh(now: DateTime<Utc>) -> Self {
        Self {
            title: String::new(),
            target: now,
            total_diff_ms: None,
            show_seconds: true,
        }
    }

    /// The record to persist.
    pub fn to_config(&self) -> WidgetConfig {
        WidgetConfig {
            countdown_date_time: self.target,
            countdown_title: self.title.clone(),
            total_diff_ms: self.total_diff_ms,
            show_seconds: self.show_seconds,
        }
    }
}

/// A configured, running countdown.
#[derive(Debug, Clone, PartialEq)]
pub struct Countdown {
    /// Countdown title.
    pub title: String,
    /// Target instant.
    pub target: DateTime<Utc>,
    /// Progress bar denominator.
    pub total_diff_ms: Option<i64>,
    /// Whether seconds are shown.
    pub show_seconds: bool,
}

impl Countdown {
    /// The display as of `now`.
    pub fn snapshot(&self, now: DateTime<Utc>) -> Snapshot {
        Snapshot::compute(
            &self.title,
            self.target,
            self.total_diff_ms,
            self.show_seconds,
            now,
        )
    }

    /// Seeds a form for reconfiguration.
    pub fn to_draft(&self) -> Draft {
        Draft {
            title: self.title.clone(),
            target: self.target,
            total_diff_ms: self.total_diff_ms,
            show_seconds: self.show_seconds,
        }
    }
}

impl From<WidgetConfig> for Countdown {
    fn from(config: WidgetConfig) -> Self {
        Self {
            title: config.countdown_title,
            target: config.countdown_date_time,
            total_diff_ms: config.total_diff_ms,
            show_seconds: config.show_seconds,
        }
    }
}

/// Which mode the widget is in.
#[derive(Debug, Clone)]
pub enum State {
    /// The configuration form is shown.
    Configuring(Form),
    /// The countdown is shown.
    Running(Countdown),
}

impl State {
    /// Whether the form is shown.
    pub fn is_configuring(&self) -> bool {
        matches!(self, State::Configuring(_))
    }
}
