//! Progress bar showing how much of the countdown has elapsed.
//!
//! The bar stores whatever fraction it is given. Values outside `0.0..=1.0`
//! (or non-finite ones, from a zero-length countdown) are kept as-is so the
//! caller can inspect them; only the drawing is bounded by the bar width.
//!
//! # Basic Usage
//!
//! ```rust
//! use countdown_widget::progress::{new, with_width, without_percentage};
//!
//! let mut bar = new(&[with_width(20), without_percentage()]);
//! bar.set_percent(1.5);
//! assert_eq!(bar.percent(), 1.5);
//! assert_eq!(bar.filled_width(), 20);
//! ```

use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

const DEFAULT_WIDTH: usize = 40;

/// Configuration options applied by [`new`].
pub enum ProgressOption {
    /// Colour of the filled portion.
    WithSolidFill(String),
    /// Characters for the filled and empty portions.
    WithFillCharacters(char, char),
    /// Hides the trailing percentage label.
    WithoutPercentage,
    /// Total width including the percentage label.
    WithWidth(usize),
}

impl ProgressOption {
    fn apply(&self, m: &mut Model) {
        match self {
            ProgressOption::WithSolidFill(color) => m.full_color = color.clone(),
            ProgressOption::WithFillCharacters(full, empty) => {
                m.full = *full;
                m.empty = *empty;
            }
            ProgressOption::WithoutPercentage => m.show_percentage = false,
            ProgressOption::WithWidth(width) => m.width = *width,
        }
    }
}

/// Fills the bar with one colour.
pub fn with_solid_fill(color: impl Into<String>) -> ProgressOption {
    ProgressOption::WithSolidFill(color.into())
}

/// Sets the filled and empty characters.
pub fn with_fill_characters(full: char, empty: char) -> ProgressOption {
    ProgressOption::WithFillCharacters(full, empty)
}

/// Hides the percentage label.
pub fn without_percentage() -> ProgressOption {
    ProgressOption::WithoutPercentage
}

/// Sets the total width, label included.
pub fn with_width(width: usize) -> ProgressOption {
    ProgressOption::WithWidth(width)
}

/// Progress bar state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Total width, label included.
    pub width: usize,
    /// Character of the filled part.
    pub full: char,
    /// Colour of the filled part.
    pub full_color: String,
    /// Character of the empty part.
    pub empty: char,
    /// Colour of the empty part.
    pub empty_color: String,
    /// Whether the percentage label is drawn.
    pub show_percentage: bool,
    /// Style of the percentage label.
    pub percentage_style: Style,
    percent: f64,
}

/// Creates a bar at 0%, then applies `opts` in order.
pub fn new(opts: &[ProgressOption]) -> Model {
    let mut m = Model {
        width: DEFAULT_WIDTH,
        full: '█',
        full_color: "#7571F9".to_string(),
        empty: '░',
        empty_color: "#606060".to_string(),
        show_percentage: true,
        percentage_style: Style::new(),
        percent: 0.0,
    };

    for opt in opts {
        opt.apply(&mut m);
    }

    m
}

impl Model {
    /// The fraction last passed to [`set_percent`](Self::set_percent), unclamped.
    pub fn percent(&self) -> f64 {
        self.percent
    }

    /// Stores `p` as given.
    pub fn set_percent(&mut self, p: f64) {
        self.percent = p;
    }

    /// Renders the stored fraction.
    pub fn view(&self) -> String {
        self.view_as(self.percent)
    }

    /// Renders `percent` without storing it. Non-finite values draw empty.
    pub fn view_as(&self, percent: f64) -> String {
        let percent_view = self.percentage_view(percent);
        let percent_width = lipgloss::width_visible(&percent_view);
        format!("{}{}", self.bar_view(percent, percent_width), percent_view)
    }

    /// Number of filled cells the current fraction draws.
    pub fn filled_width(&self) -> usize {
        let text_width = lipgloss::width_visible(&self.percentage_view(self.percent));
        fill_cells(self.width.saturating_sub(text_width), self.percent)
    }

    fn bar_view(&self, percent: f64, text_width: usize) -> String {
        let tw = self.width.saturating_sub(text_width);
        let fw = fill_cells(tw, percent);

        let full = Style::new()
            .foreground(lipgloss::Color::from(self.full_color.as_str()))
            .render(&self.full.to_string());
        let empty = Style::new()
            .foreground(lipgloss::Color::from(self.empty_color.as_str()))
            .render(&self.empty.to_string());

        let mut result = full.repeat(fw);
        result.push_str(&empty.repeat(tw - fw));
        result
    }

    fn percentage_view(&self, percent: f64) -> String {
        if !self.show_percentage {
            return String::new();
        }
        let shown = if percent.is_finite() {
            percent.clamp(0.0, 1.0)
        } else {
            0.0
        };
        self.percentage_style
            .render(&format!(" {:3.0}%", shown * 100.0))
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}

fn fill_cells(total: usize, percent: f64) -> usize {
    if !percent.is_finite() || percent <= 0.0 {
        return 0;
    }
    ((total as f64 * percent).round() as usize).min(total)
}
