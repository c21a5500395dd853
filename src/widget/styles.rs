//! Colours and text attributes of the widget.

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles for both widget modes. The `zero_*` variants replace their
/// regular counterparts once the countdown has arrived; they are underlined
/// as well as recoloured so the arrival still shows without colour.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Heading while counting down.
    pub title: Style,
    /// Heading once arrived.
    pub zero_title: Style,
    /// Unit values while counting down.
    pub value: Style,
    /// Unit values once arrived.
    pub zero_value: Style,
    /// Unit captions.
    pub label: Style,
    /// Form field captions.
    pub field_label: Style,
    /// Unfocused button.
    pub button: Style,
    /// Focused button.
    pub button_focused: Style,
    /// Save while the title is empty.
    pub button_disabled: Style,
    /// Inline error notice.
    pub notice: Style,
}

impl Default for Styles {
    fn default() -> Self {
        let accent = lipgloss::Color::from("#7571F9");
        let alarm = lipgloss::Color::from("#FF5F87");
        let muted = lipgloss::Color::from("#626262");

        Self {
            title: Style::new().bold(true),
            zero_title: Style::new().bold(true).underline(true).foreground(alarm.clone()),
            value: Style::new().bold(true).foreground(accent.clone()),
            zero_value: Style::new().bold(true).underline(true).foreground(alarm.clone()),
            label: Style::new().foreground(muted.clone()),
            field_label: Style::new().foreground(muted.clone()),
            button: Style::new(),
            button_focused: Style::new().reverse(true).foreground(accent),
            button_disabled: Style::new().foreground(muted),
            notice: Style::new().foreground(alarm),
        }
    }
}
