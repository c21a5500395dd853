//! Single-line text input used for the countdown title.
//!
//! Editing works on grapheme clusters, so combining marks and emoji are
//! inserted and deleted as one unit.
//!
//! ```rust
//! use countdown_widget::textinput::new;
//! use countdown_widget::Component;
//!
//! let mut input = new().with_placeholder("Enter countdown title");
//! input.focus();
//! input.set_value("Release");
//! assert_eq!(input.value(), "Release");
//! assert_eq!(input.position(), 7);
//! ```

use crate::key::{matches_binding, new_binding, with_keys_str, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use crossterm::event::{KeyCode, KeyModifiers};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use unicode_segmentation::UnicodeSegmentation;

/// Editing keys understood by the input.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Moves right one grapheme.
    pub character_forward: Binding,
    /// Moves left one grapheme.
    pub character_backward: Binding,
    /// Deletes the grapheme before the cursor.
    pub delete_character_backward: Binding,
    /// Deletes the grapheme under the cursor.
    pub delete_character_forward: Binding,
    /// Deletes everything before the cursor.
    pub delete_before_cursor: Binding,
    /// Deletes from the cursor to the end.
    pub delete_after_cursor: Binding,
    /// Jumps to the start.
    pub line_start: Binding,
    /// Jumps to the end.
    pub line_end: Binding,
}

/// Emacs-style defaults. `ctrl+e` stays unbound so the host can use it.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        character_forward: new_binding(vec![with_keys_str(&["right", "ctrl+f"])]),
        character_backward: new_binding(vec![with_keys_str(&["left", "ctrl+b"])]),
        delete_character_backward: new_binding(vec![with_keys_str(&["backspace", "ctrl+h"])]),
        delete_character_forward: new_binding(vec![with_keys_str(&["delete", "ctrl+d"])]),
        delete_before_cursor: new_binding(vec![with_keys_str(&["ctrl+u"])]),
        delete_after_cursor: new_binding(vec![with_keys_str(&["ctrl+k"])]),
        line_start: new_binding(vec![with_keys_str(&["home", "ctrl+a"])]),
        line_end: new_binding(vec![with_keys_str(&["end"])]),
    }
}

/// Text input state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Drawn before the text.
    pub prompt: String,
    /// Style of the prompt.
    pub prompt_style: Style,
    /// Style of the entered text.
    pub text_style: Style,
    /// Shown while empty.
    pub placeholder: String,
    /// Style of the placeholder.
    pub placeholder_style: Style,
    /// Style of the grapheme under the cursor.
    pub cursor_style: Style,
    /// Maximum number of graphemes accepted; 0 means no limit.
    pub char_limit: usize,
    /// Editing keys.
    pub key_map: KeyMap,
    value: Vec<String>,
    pos: usize,
    focus: bool,
}

/// Creates an empty, unfocused input with a `> ` prompt.
pub fn new() -> Model {
    Model {
        prompt: "> ".to_string(),
        prompt_style: Style::new(),
        text_style: Style::new(),
        placeholder: String::new(),
        placeholder_style: Style::new().foreground(lipgloss::Color::from("240")),
        cursor_style: Style::new().reverse(true),
        char_limit: 0,
        key_map: default_key_map(),
        value: Vec::new(),
        pos: 0,
        focus: false,
    }
}

impl Default for Model {
    fn default() -> Self {
        new()
    }
}

impl Model {
    /// Sets the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Sets the grapheme limit; 0 means none.
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = limit;
        self
    }

    /// The entered text.
    pub fn value(&self) -> String {
        self.value.concat()
    }

    /// Whether no text is entered.
    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replaces the content and moves the cursor to the end.
    pub fn set_value(&mut self, s: &str) {
        self.value = s.graphemes(true).map(str::to_string).collect();
        if self.char_limit > 0 {
            self.value.truncate(self.char_limit);
        }
        self.pos = self.value.len();
    }

    /// Cursor position in graphemes.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Moves the cursor, clamped to the text length.
    pub fn set_cursor(&mut self, pos: usize) {
        self.pos = pos.min(self.value.len());
    }

    /// Inserts at the cursor. A combining mark typed on its own joins the
    /// grapheme before the cursor. Returns `true` if anything was inserted.
    pub fn insert_str(&mut self, s: &str) -> bool {
        let mut changed = false;
        for g in s.graphemes(true) {
            if let Some(prev) = self.pos.checked_sub(1).and_then(|i| self.value.get_mut(i)) {
                let joined = format!("{prev}{g}");
                if joined.graphemes(true).count() == 1 {
                    *prev = joined;
                    changed = true;
                    continue;
                }
            }
            if self.char_limit > 0 && self.value.len() >= self.char_limit {
                break;
            }
            self.value.insert(self.pos, g.to_string());
            self.pos += 1;
            changed = true;
        }
        changed
    }

    /// Clears the text.
    pub fn reset(&mut self) {
        self.value.clear();
        self.pos = 0;
    }

    /// Handles a key message when focused. Returns `true` if the value changed.
    pub fn handle_key(&mut self, key: &KeyMsg) -> bool {
        if !self.focus {
            return false;
        }
        let before = self.value.len();
        let km = &self.key_map;

        if matches_binding(key, &km.delete_character_backward) {
            if self.pos > 0 {
                self.pos -= 1;
                self.value.remove(self.pos);
                return true;
            }
        } else if matches_binding(key, &km.delete_character_forward) {
            if self.pos < self.value.len() {
                self.value.remove(self.pos);
                return true;
            }
        } else if matches_binding(key, &km.delete_before_cursor) {
            self.value.drain(..self.pos);
            self.pos = 0;
        } else if matches_binding(key, &km.delete_after_cursor) {
            self.value.truncate(self.pos);
        } else if matches_binding(key, &km.character_backward) {
            self.pos = self.pos.saturating_sub(1);
        } else if matches_binding(key, &km.character_forward) {
            self.pos = (self.pos + 1).min(self.value.len());
        } else if matches_binding(key, &km.line_start) {
            self.pos = 0;
        } else if matches_binding(key, &km.line_end) {
            self.pos = self.value.len();
        } else if let KeyCode::Char(c) = key.key {
            if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
                return false;
            }
            return self.insert_str(&c.to_string());
        }
        self.value.len() != before
    }

    /// Applies a key message; other messages are ignored.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            self.handle_key(key);
        }
        None
    }

    /// Renders the prompt and text, or the placeholder when empty.
    pub fn view(&self) -> String {
        let prompt = self.prompt_style.render(&self.prompt);

        if self.value.is_empty() && !self.placeholder.is_empty() {
            let mut chars = self.placeholder.graphemes(true);
            let first = chars.next().unwrap_or(" ");
            let rest: String = chars.collect();
            let head = if self.focus {
                self.cursor_style.render(first)
            } else {
                self.placeholder_style.render(first)
            };
            return format!("{}{}{}", prompt, head, self.placeholder_style.render(&rest));
        }

        let before = self.value[..self.pos].concat();
        let mut v = self.text_style.render(&before);
        if self.focus {
            let under = self.value.get(self.pos).map(String::as_str).unwrap_or(" ");
            v.push_str(&self.cursor_style.render(under));
            if self.pos + 1 < self.value.len() {
                v.push_str(&self.text_style.render(&self.value[self.pos + 1..].concat()));
            }
        } else if self.pos < self.value.len() {
            v.push_str(&self.text_style.render(&self.value[self.pos..].concat()));
        }
        format!("{}{}", prompt, v)
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

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn ctrl(c: char) -> KeyMsg {
        KeyMsg {
            key: KeyCode::Char(c),
            modifiers: KeyModifiers::CONTROL,
        }
    }

    fn focused_input() -> Model {
        let mut input = new();
        input.focus();
        input
    }

    fn plain(s: &str) -> String {
        String::from_utf8_lossy(&strip_ansi_escapes::strip(s)).into_owned()
    }

    #[test]
    fn test_typing_inserts_at_cursor() {
        let mut input = focused_input();
        for c in "Lanch".chars() {
            input.handle_key(&key(KeyCode::Char(c)));
        }
        input.set_cursor(2);
        input.handle_key(&key(KeyCode::Char('u')));
        assert_eq!(input.value(), "Launch");
        assert_eq!(input.position(), 3);
    }

    #[test]
    fn test_blurred_input_ignores_keys() {
        let mut input = new();
        assert!(!input.handle_key(&key(KeyCode::Char('x'))));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_backspace_removes_whole_grapheme() {
        let mut input = focused_input();
        input.set_value("cafe\u{301}");
        assert_eq!(input.position(), 4);

        assert!(input.handle_key(&key(KeyCode::Backspace)));
        assert_eq!(input.value(), "caf");
    }

    #[test]
    fn test_typed_combining_mark_joins_previous_grapheme() {
        let mut input = focused_input();
        for c in "cafe\u{301}".chars() {
            assert!(input.handle_key(&key(KeyCode::Char(c))));
        }
        assert_eq!(input.value(), "cafe\u{301}");
        assert_eq!(input.position(), 4);

        assert!(input.handle_key(&key(KeyCode::Backspace)));
        assert_eq!(input.value(), "caf");
    }

    #[test]
    fn test_ctrl_e_is_left_to_the_host() {
        let mut input = focused_input();
        input.set_value("abc");
        input.set_cursor(0);
        assert!(!input.handle_key(&ctrl('e')));
        assert_eq!(input.position(), 0);
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_clear_before_cursor() {
        let mut input = focused_input();
        input.set_value("New Year");
        input.set_cursor(4);
        assert!(input.handle_key(&ctrl('u')));
        assert_eq!(input.value(), "Year");
        assert_eq!(input.position(), 0);
    }

    #[test]
    fn test_movement_keys() {
        let mut input = focused_input();
        input.set_value("abc");
        input.handle_key(&key(KeyCode::Home));
        assert_eq!(input.position(), 0);
        input.handle_key(&key(KeyCode::Left));
        assert_eq!(input.position(), 0);
        input.handle_key(&key(KeyCode::Right));
        assert_eq!(input.position(), 1);
        input.handle_key(&key(KeyCode::End));
        assert_eq!(input.position(), 3);
        assert!(!input.handle_key(&key(KeyCode::Delete)));
    }

    #[test]
    fn test_control_chars_are_not_inserted() {
        let mut input = focused_input();
        assert!(!input.handle_key(&ctrl('s')));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn test_char_limit() {
        let mut input = new().with_char_limit(3);
        input.set_value("abcdef");
        assert_eq!(input.value(), "abc");
    }

    #[test]
    fn test_placeholder_view() {
        let input = new().with_placeholder("Enter countdown title");
        assert_eq!(plain(&input.view()), "> Enter countdown title");
    }

    #[test]
    fn test_value_view_with_cursor_at_end() {
        let mut input = focused_input();
        input.set_value("Go");
        assert_eq!(plain(&input.view()), "> Go ");
    }
}
