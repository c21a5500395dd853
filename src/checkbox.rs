//! Labelled boolean toggle.

use crate::key::{matches_binding, new_binding, with_keys_str, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg};
use lipgloss_extras::prelude::*;

/// A checkbox with a label.
#[derive(Debug, Clone)]
pub struct Model {
    /// Text shown after the box.
    pub label: String,
    /// Keys that flip the box.
    pub toggle: Binding,
    /// Style of the whole line while focused.
    pub focused_style: Style,
    checked: bool,
    focus: bool,
}

/// Creates an unfocused checkbox.
pub fn new(label: impl Into<String>, checked: bool) -> Model {
    Model {
        label: label.into(),
        toggle: new_binding(vec![with_keys_str(&["space", "enter", "x"])]),
        focused_style: Style::new().bold(true),
        checked,
        focus: false,
    }
}

impl Model {
    /// Whether the box is ticked.
    pub fn checked(&self) -> bool {
        self.checked
    }

    /// Ticks or clears the box.
    pub fn set_checked(&mut self, checked: bool) {
        self.checked = checked;
    }

    /// Flips the box when focused and `key` is the toggle key.
    pub fn handle_key(&mut self, key: &KeyMsg) -> bool {
        if self.focus && matches_binding(key, &self.toggle) {
            self.checked = !self.checked;
            return true;
        }
        false
    }

    /// Renders `[x] label` or `[ ] label`.
    pub fn view(&self) -> String {
        let mark = if self.checked { "[x]" } else { "[ ]" };
        let line = format!("{} {}", mark, self.label);
        if self.focus {
            self.focused_style.render(&line)
        } else {
            line
        }
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focus = true;
        None
    }

    fn blur(&mut self) {
        self.focus = false;
    }

    fn focused(&self) -> bool {
        self.focus
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn space() -> KeyMsg {
        KeyMsg {
            key: KeyCode::Char(' '),
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_toggle_only_when_focused() {
        let mut cb = new("Show seconds in countdown", true);
        assert!(!cb.handle_key(&space()));
        assert!(cb.checked());

        cb.focus();
        assert!(cb.handle_key(&space()));
        assert!(!cb.checked());
    }

    #[test]
    fn test_view_marks_state() {
        let mut cb = new("Show seconds in countdown", false);
        assert_eq!(cb.view(), "[ ] Show seconds in countdown");
        cb.set_checked(true);
        assert_eq!(cb.view(), "[x] Show seconds in countdown");
    }
}
