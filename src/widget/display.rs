//! Running-mode rendering.

use super::styles::Styles;
use crate::countdown::{Snapshot, Unit};
use crate::progress;
use lipgloss_extras::lipgloss;
use unicode_width::UnicodeWidthStr;

const COLUMN_GAP: &str = "   ";

fn center(text: &str, width: usize) -> (String, String) {
    let pad = width.saturating_sub(text.width());
    let left = pad / 2;
    (" ".repeat(left), " ".repeat(pad - left))
}

fn unit_column(unit: &Unit, arrived: bool, styles: &Styles) -> String {
    let width = unit.value.width().max(unit.label.width());
    let value_style = if arrived {
        &styles.zero_value
    } else {
        &styles.value
    };

    let (l, r) = center(&unit.value, width);
    let value = format!("{l}{}{r}", value_style.render(&unit.value));
    let (l, r) = center(unit.label, width);
    let label = format!("{l}{}{r}", styles.label.render(unit.label));
    format!("{value}\n{label}")
}

/// Heading, unit columns and progress bar for one frame.
///
/// A countdown whose duration was never captured draws an empty bar.
pub fn render(snapshot: &Snapshot, bar: &progress::Model, styles: &Styles) -> String {
    let arrived = snapshot.arrived();
    let heading = if arrived {
        styles.zero_title.render(&snapshot.heading())
    } else {
        styles.title.render(&snapshot.heading())
    };

    let columns: Vec<String> = snapshot
        .units()
        .iter()
        .map(|unit| unit_column(unit, arrived, styles))
        .collect();
    let mut parts: Vec<&str> = Vec::with_capacity(columns.len() * 2);
    for (i, column) in columns.iter().enumerate() {
        if i > 0 {
            parts.push(COLUMN_GAP);
        }
        parts.push(column.as_str());
    }
    let units = lipgloss::join_horizontal(lipgloss::TOP, &parts);

    let bar = bar.view_as(snapshot.progress.unwrap_or(0.0));

    format!("{heading}\n\n{units}\n\n{bar}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};

    fn plain(s: &str) -> String {
        String::from_utf8_lossy(&strip_ansi_escapes::strip(s)).into_owned()
    }

    fn bar() -> progress::Model {
        progress::new(&[progress::with_width(20)])
    }

    #[test]
    fn test_render_lists_units_in_order() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let target = now + ChronoDuration::milliseconds(90_061_000);
        let snap = Snapshot::compute("Launch", target, Some(180_000_000), true, now);

        let out = plain(&render(&snap, &bar(), &Styles::default()));
        assert!(out.starts_with("Time to: Launch"));
        let labels = out.lines().find(|l| l.contains("Days")).unwrap();
        let positions: Vec<usize> = ["Days", "Hours", "Minutes", "Seconds"]
            .iter()
            .map(|l| labels.find(l).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
        let values = out.lines().find(|l| l.contains("01")).unwrap();
        assert_eq!(values.split_whitespace().collect::<Vec<_>>(), vec!["01", "01", "01", "01"]);
    }

    #[test]
    fn test_render_without_seconds() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let snap = Snapshot::compute("Trip", now + ChronoDuration::days(2), None, false, now);
        let out = plain(&render(&snap, &bar(), &Styles::default()));
        assert!(out.contains("Minutes"));
        assert!(!out.contains("Seconds"));
    }

    #[test]
    fn test_arrived_renders_zeros_and_full_bar() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let snap = Snapshot::compute("Done", now - ChronoDuration::hours(1), Some(60_000), true, now);
        assert!(snap.arrived());

        let out = plain(&render(&snap, &bar(), &Styles::default()));
        let values = out.lines().find(|l| l.contains("00")).unwrap();
        assert_eq!(values.split_whitespace().count(), 4);
        assert!(out.contains("100%"));
    }

    #[test]
    fn test_arrival_is_styled_apart_from_running() {
        let now = Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap();
        let running = Snapshot::compute("X", now + ChronoDuration::hours(1), None, true, now);
        let arrived = Snapshot::compute("X", now - ChronoDuration::hours(1), None, true, now);
        let styles = Styles::default();

        let running_out = render(&running, &bar(), &styles);
        let arrived_out = render(&arrived, &bar(), &styles);
        let heading = |s: &str| s.lines().next().unwrap_or_default().to_string();
        assert_eq!(plain(&heading(&running_out)), plain(&heading(&arrived_out)));
        assert_ne!(heading(&running_out), heading(&arrived_out));

        // Same digits either way, so only the styling can tell them apart.
        let zero = Snapshot { remaining_ms: 0, ..running.clone() };
        let flagged = render(&zero, &bar(), &styles);
        let plain_values = |s: &str| plain(s).lines().nth(2).unwrap_or_default().to_string();
        assert_eq!(plain_values(&flagged), plain_values(&running_out));
        assert_ne!(flagged.lines().nth(2), running_out.lines().nth(2));
    }
}
