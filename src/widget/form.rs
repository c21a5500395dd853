//! Configuration form: title, target date/time and the seconds toggle.

use super::state::Draft;
use super::styles::Styles;
use crate::key::{self, matches_binding, new_binding, with_help, with_keys_str, Binding};
use crate::{checkbox, datetime, help, textinput, Component};
use bubbletea_rs::KeyMsg;
use chrono::{DateTime, Utc};

/// Focusable parts of the form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Title input.
    Title,
    /// Date/time picker.
    Target,
    /// Seconds checkbox.
    ShowSeconds,
    /// Save button.
    Save,
    /// Cancel button.
    Cancel,
}

const FIELDS: [Field; 5] = [
    Field::Title,
    Field::Target,
    Field::ShowSeconds,
    Field::Save,
    Field::Cancel,
];

/// What the form wants the widget to do after a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// The key meant nothing to the form.
    Ignored,
    /// A field changed or focus moved.
    Edited,
    /// Save was requested and is allowed.
    Save,
    /// Cancel was requested.
    Cancel,
}

/// Form-level keys; field editing keys live on the fields.
#[derive(Debug, Clone)]
pub struct FormKeys {
    /// Focuses the next field.
    pub next: Binding,
    /// Focuses the previous field.
    pub prev: Binding,
    /// Saves from any field. Disabled while saving is not allowed.
    pub save: Binding,
    /// Cancels from any field.
    pub cancel: Binding,
    /// Presses the focused button.
    pub activate: Binding,
}

impl Default for FormKeys {
    fn default() -> Self {
        Self {
            next: new_binding(vec![with_keys_str(&["tab"]), with_help("tab", "next field")]),
            prev: new_binding(vec![with_keys_str(&["shift+tab"]), with_help("shift+tab", "previous")]),
            save: new_binding(vec![with_keys_str(&["ctrl+s"]), with_help("ctrl+s", "save")]),
            cancel: new_binding(vec![with_keys_str(&["esc"]), with_help("esc", "cancel")]),
            activate: new_binding(vec![with_keys_str(&["enter"]), with_help("enter", "confirm")]),
        }
    }
}

impl key::KeyMap for FormKeys {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.next, &self.prev, &self.save, &self.cancel]
    }
}

/// The configuration form.
#[derive(Debug, Clone)]
pub struct Form {
    /// Countdown title.
    pub title: textinput::Model,
    /// Target date and time, edited in local time.
    pub target: datetime::Model,
    /// Seconds toggle.
    pub show_seconds: checkbox::Model,
    /// Form-level keys.
    pub keys: FormKeys,
    target_utc: DateTime<Utc>,
    total_diff_ms: Option<i64>,
    focus: usize,
}

impl Form {
    /// A form showing `draft`, with the title focused.
    pub fn new(draft: &Draft) -> Self {
        let mut title = textinput::new().with_placeholder("Enter countdown title");
        title.set_value(&draft.title);

        let mut form = Self {
            title,
            target: datetime::from_utc(draft.target),
            show_seconds: checkbox::new("Show seconds in countdown", draft.show_seconds),
            keys: FormKeys::default(),
            target_utc: draft.target,
            total_diff_ms: draft.total_diff_ms,
            focus: 0,
        };
        form.sync_focus();
        form
    }

    /// Current values of the form.
    pub fn draft(&self) -> Draft {
        Draft {
            title: self.title.value(),
            target: self.target_utc,
            total_diff_ms: self.total_diff_ms,
            show_seconds: self.show_seconds.checked(),
        }
    }

    /// Saving requires a non-empty title.
    pub fn can_save(&self) -> bool {
        !self.title.is_empty()
    }

    /// The focused field.
    pub fn focused_field(&self) -> Field {
        FIELDS[self.focus]
    }

    /// Moves focus to `field`.
    pub fn focus_field(&mut self, field: Field) {
        self.focus = FIELDS.iter().position(|f| *f == field).unwrap_or(0);
        self.sync_focus();
    }

    /// Takes the picker's current value as the target and captures the
    /// duration from `now` to it as the progress denominator.
    fn capture_target(&mut self, now: DateTime<Utc>) {
        self.target_utc = self.target.value_utc();
        let total = self.target_utc.timestamp_millis() - now.timestamp_millis();
        self.total_diff_ms = Some(total);
        tracing::debug!(target = %self.target_utc, total_diff_ms = total, "countdown target picked");
    }

    /// Routes a key press. Picking a date captures the duration from `now`.
    pub fn handle_key(&mut self, msg: &KeyMsg, now: DateTime<Utc>) -> FormEvent {
        self.keys.save.set_enabled(self.can_save());

        if matches_binding(msg, &self.keys.save) {
            return FormEvent::Save;
        }
        if matches_binding(msg, &self.keys.cancel) {
            return FormEvent::Cancel;
        }
        if matches_binding(msg, &self.keys.next) {
            self.focus = (self.focus + 1) % FIELDS.len();
            self.sync_focus();
            return FormEvent::Ignored;
        }
        if matches_binding(msg, &self.keys.prev) {
            self.focus = (self.focus + FIELDS.len() - 1) % FIELDS.len();
            self.sync_focus();
            return FormEvent::Ignored;
        }

        match self.focused_field() {
            Field::Save if matches_binding(msg, &self.keys.activate) => {
                if self.can_save() {
                    FormEvent::Save
                } else {
                    FormEvent::Ignored
                }
            }
            Field::Cancel if matches_binding(msg, &self.keys.activate) => FormEvent::Cancel,
            Field::Title => {
                if self.title.handle_key(msg) {
                    self.keys.save.set_enabled(self.can_save());
                    FormEvent::Edited
                } else {
                    FormEvent::Ignored
                }
            }
            Field::Target => {
                if self.target.handle_key(msg) {
                    self.capture_target(now);
                    FormEvent::Edited
                } else {
                    FormEvent::Ignored
                }
            }
            Field::ShowSeconds => {
                if self.show_seconds.handle_key(msg) {
                    FormEvent::Edited
                } else {
                    FormEvent::Ignored
                }
            }
            _ => FormEvent::Ignored,
        }
    }

    fn sync_focus(&mut self) {
        let field = self.focused_field();
        focus_if(&mut self.title, field == Field::Title);
        focus_if(&mut self.target, field == Field::Target);
        focus_if(&mut self.show_seconds, field == Field::ShowSeconds);
    }

    /// Renders the fields, the buttons and a help line.
    pub fn view(&self, styles: &Styles, help: &help::Model) -> String {
        let button = |label: &str, field: Field, enabled: bool| {
            let text = format!("[ {label} ]");
            if !enabled {
                styles.button_disabled.render(&text)
            } else if self.focused_field() == field {
                styles.button_focused.render(&text)
            } else {
                styles.button.render(&text)
            }
        };

        let mut keys = self.keys.clone();
        keys.save.set_enabled(self.can_save());

        [
            styles.field_label.render("Countdown title"),
            self.title.view(),
            styles.field_label.render("Target date and time"),
            self.target.view(),
            self.show_seconds.view(),
            String::new(),
            format!(
                "{}  {}",
                button("Save", Field::Save, self.can_save()),
                button("Cancel", Field::Cancel, true)
            ),
            String::new(),
            help.view(&keys),
        ]
        .join("\n")
    }
}

fn focus_if<C: Component>(component: &mut C, focused: bool) {
    if focused {
        let _ = component.focus();
    } else {
        component.blur();
    }
}
