//! One-line key help shown under the widget.
//!
//! Renders the enabled bindings of a [`KeyMap`] as `key desc • key desc`,
//! truncating with an ellipsis when a width is set and the line would not fit.

use crate::key::{Binding, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles of the help line.
#[derive(Debug, Clone)]
pub struct Styles {
    /// The ellipsis.
    pub ellipsis: Style,
    /// Key names.
    pub key: Style,
    /// Key descriptions.
    pub desc: Style,
    /// The separator between entries.
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        let key_style = Style::new().foreground(AdaptiveColor {
            Light: "#909090",
            Dark: "#626262",
        });
        let desc_style = Style::new().foreground(AdaptiveColor {
            Light: "#B2B2B2",
            Dark: "#4A4A4A",
        });
        let sep_style = Style::new().foreground(AdaptiveColor {
            Light: "#DDDADA",
            Dark: "#3C3C3C",
        });

        Self {
            ellipsis: sep_style.clone(),
            key: key_style,
            desc: desc_style,
            separator: sep_style,
        }
    }
}

/// Help line renderer.
#[derive(Debug, Clone)]
pub struct Model {
    /// Maximum visible width; zero disables truncation.
    pub width: usize,
    /// Placed between entries.
    pub separator: String,
    /// Shown when entries are cut off.
    pub ellipsis: String,
    /// Colours of the line.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            width: 0,
            separator: " • ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Help without a width limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum visible width.
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the short help of `keymap`.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        self.short_help_view(keymap.short_help())
    }

    /// Renders the enabled `bindings` on one line.
    pub fn short_help_view(&self, bindings: Vec<&Binding>) -> String {
        let separator = self
            .styles
            .separator
            .clone()
            .inline(true)
            .render(&self.separator);

        let mut builder = String::new();
        let mut total_width = 0;

        for kb in bindings.into_iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let help = kb.help();
            let item = format!(
                "{}{} {}",
                sep,
                self.styles.key.clone().inline(true).render(&help.key),
                self.styles.desc.clone().inline(true).render(&help.desc)
            );
            let item_width = lipgloss::width_visible(&item);

            if self.width > 0 && total_width + item_width > self.width {
                let tail = format!(
                    " {}",
                    self.styles.ellipsis.clone().inline(true).render(&self.ellipsis)
                );
                if total_width + lipgloss::width_visible(&tail) < self.width {
                    builder.push_str(&tail);
                }
                break;
            }

            total_width += item_width;
            builder.push_str(&item);
        }
        builder
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{new_binding, with_disabled, with_help, with_keys_str};

    struct Keys {
        save: Binding,
        cancel: Binding,
        hidden: Binding,
    }

    impl KeyMap for Keys {
        fn short_help(&self) -> Vec<&Binding> {
            vec![&self.save, &self.hidden, &self.cancel]
        }
    }

    fn keys() -> Keys {
        Keys {
            save: new_binding(vec![with_keys_str(&["ctrl+s"]), with_help("ctrl+s", "save")]),
            cancel: new_binding(vec![with_keys_str(&["esc"]), with_help("esc", "cancel")]),
            hidden: new_binding(vec![
                with_keys_str(&["x"]),
                with_help("x", "hidden"),
                with_disabled(),
            ]),
        }
    }

    fn plain(s: &str) -> String {
        String::from_utf8_lossy(&strip_ansi_escapes::strip(s)).into_owned()
    }

    #[test]
    fn test_skips_disabled_bindings() {
        let view = plain(&Model::new().view(&keys()));
        assert_eq!(view, "ctrl+s save • esc cancel");
    }

    #[test]
    fn test_truncates_to_width() {
        let view = plain(&Model::new().with_width(14).view(&keys()));
        assert!(view.starts_with("ctrl+s save"));
        assert!(!view.contains("cancel"));
        assert!(view.ends_with('…'));
    }

    #[test]
    fn test_empty_keymap_renders_nothing() {
        assert_eq!(Model::new().short_help_view(vec![]), "");
    }
}
