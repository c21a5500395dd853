//! Key bindings shared by the form fields and the widget.
//!
//! A [`Binding`] groups one or more key presses under a help entry. Bindings
//! are declared with human-readable key names, the same names shown in the
//! help line:
//!
//! ```rust
//! use countdown_widget::key::{matches_binding, new_binding, with_help, with_keys_str};
//! use bubbletea_rs::KeyMsg;
//! use crossterm::event::{KeyCode, KeyModifiers};
//!
//! let save = new_binding(vec![with_keys_str(&["ctrl+s"]), with_help("ctrl+s", "save")]);
//! let msg = KeyMsg {
//!     key: KeyCode::Char('s'),
//!     modifiers: KeyModifiers::CONTROL,
//! };
//! assert!(matches_binding(&msg, &save));
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key with its modifiers.
pub type KeyPress = (KeyCode, KeyModifiers);

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Key name as shown, e.g. `ctrl+s`.
    pub key: String,
    /// What the key does.
    pub desc: String,
}

/// A set of key presses that trigger one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

/// Option applied by [`new_binding`].
pub enum BindingOpt {
    /// The presses that trigger the binding.
    Keys(Vec<KeyPress>),
    /// Help line entry.
    Help(Help),
    /// Starts disabled.
    Disabled,
}

/// Builds a binding from options, later ones overriding earlier ones.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        match opt {
            BindingOpt::Keys(keys) => binding.keys = keys,
            BindingOpt::Help(help) => binding.help = help,
            BindingOpt::Disabled => binding.disabled = true,
        }
    }
    binding
}

/// Keys given by name, e.g. `"ctrl+s"`, `"shift+tab"`, `"esc"`, `"a"`.
/// Unknown names are skipped.
pub fn with_keys_str(names: &[&str]) -> BindingOpt {
    BindingOpt::Keys(names.iter().filter_map(|n| parse_key(n)).collect())
}

/// Help entry for the binding.
pub fn with_help(key: impl Into<String>, desc: impl Into<String>) -> BindingOpt {
    BindingOpt::Help(Help {
        key: key.into(),
        desc: desc.into(),
    })
}

/// Creates the binding disabled.
pub fn with_disabled() -> BindingOpt {
    BindingOpt::Disabled
}

impl Binding {
    /// The bound presses.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// The help entry.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Enabled and bound to at least one key.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding without touching its keys.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Whether `press` triggers this binding. Disabled bindings match nothing.
    pub fn matches(&self, press: KeyPress) -> bool {
        if !self.enabled() {
            return false;
        }
        let press = normalize(press);
        self.keys.iter().any(|k| normalize(*k) == press)
    }
}

/// Whether a key message triggers `binding`.
pub fn matches_binding(msg: &KeyMsg, binding: &Binding) -> bool {
    binding.matches((msg.key, msg.modifiers))
}

/// Implemented by anything that can describe its bindings in the help line.
pub trait KeyMap {
    /// Bindings for the one-line help.
    fn short_help(&self) -> Vec<&Binding>;

    /// Bindings grouped in columns; defaults to the short help.
    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![self.short_help()]
    }
}

// Terminals disagree on whether shift is reported for back-tab and
// upper-case characters; the key code alone already carries it.
fn normalize((code, mods): KeyPress) -> KeyPress {
    match code {
        KeyCode::BackTab => (code, mods - KeyModifiers::SHIFT),
        KeyCode::Char(c) if c.is_uppercase() => (code, mods - KeyModifiers::SHIFT),
        _ => (code, mods),
    }
}

fn parse_key(name: &str) -> Option<KeyPress> {
    let mut mods = KeyModifiers::NONE;
    let mut parts: Vec<&str> = name.split('+').collect();
    // "+" on its own is a key, not a separator.
    if name.ends_with("++") || name == "+" {
        parts.retain(|p| !p.is_empty());
        parts.push("+");
    }
    let key = parts.pop()?;
    for m in parts {
        match m {
            "ctrl" => mods |= KeyModifiers::CONTROL,
            "alt" => mods |= KeyModifiers::ALT,
            "shift" => mods |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match key {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" if mods.contains(KeyModifiers::SHIFT) => {
            mods -= KeyModifiers::SHIFT;
            KeyCode::BackTab
        }
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" => KeyCode::PageUp,
        "pgdown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        single => {
            let mut chars = single.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };
    Some((code, mods))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(key: KeyCode, modifiers: KeyModifiers) -> KeyMsg {
        KeyMsg { key, modifiers }
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(parse_key("esc"), Some((KeyCode::Esc, KeyModifiers::NONE)));
        assert_eq!(
            parse_key("ctrl+s"),
            Some((KeyCode::Char('s'), KeyModifiers::CONTROL))
        );
        assert_eq!(
            parse_key("shift+tab"),
            Some((KeyCode::BackTab, KeyModifiers::NONE))
        );
        assert_eq!(parse_key("space"), Some((KeyCode::Char(' '), KeyModifiers::NONE)));
        assert_eq!(parse_key("hyper+x"), None);
        assert_eq!(parse_key("nonsense"), None);
    }

    #[test]
    fn test_matches_with_modifiers() {
        let save = new_binding(vec![with_keys_str(&["ctrl+s"])]);
        assert!(matches_binding(
            &msg(KeyCode::Char('s'), KeyModifiers::CONTROL),
            &save
        ));
        assert!(!matches_binding(
            &msg(KeyCode::Char('s'), KeyModifiers::NONE),
            &save
        ));
    }

    #[test]
    fn test_backtab_ignores_reported_shift() {
        let prev = new_binding(vec![with_keys_str(&["shift+tab"])]);
        assert!(matches_binding(&msg(KeyCode::BackTab, KeyModifiers::SHIFT), &prev));
        assert!(matches_binding(&msg(KeyCode::BackTab, KeyModifiers::NONE), &prev));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = new_binding(vec![with_keys_str(&["enter"]), with_disabled()]);
        assert!(!b.enabled());
        assert!(!matches_binding(&msg(KeyCode::Enter, KeyModifiers::NONE), &b));

        b.set_enabled(true);
        assert!(matches_binding(&msg(KeyCode::Enter, KeyModifiers::NONE), &b));
    }

    #[test]
    fn test_help_is_kept() {
        let b = new_binding(vec![with_keys_str(&["esc"]), with_help("esc", "cancel")]);
        assert_eq!(b.help().key, "esc");
        assert_eq!(b.help().desc, "cancel");
    }
}
