//! Calendar arithmetic behind the countdown display.
//!
//! Everything in this module is pure: given a target instant, the captured
//! total duration and "now", it derives the remaining time, its
//! days/hours/minutes/seconds breakdown and the elapsed fraction shown by the
//! progress bar. The widget recomputes a [`Snapshot`] on every tick.
//!
//! # Examples
//!
//! ```rust
//! use countdown_widget::countdown::{pad_unit, remaining_ms, Breakdown};
//!
//! let now = 1_700_000_000_000;
//! let remaining = remaining_ms(now + 90_061_000, now);
//! let parts = Breakdown::from_millis(remaining);
//!
//! assert_eq!(pad_unit(parts.days), "01");
//! assert_eq!(pad_unit(parts.seconds), "01");
//! ```

use chrono::{DateTime, Utc};

/// Interval between display refreshes.
pub const COUNTDOWN_TICK_MS: u64 = 1000;

/// Milliseconds in a second.
pub const MS_IN_SEC: i64 = 1000;
/// Seconds in a minute.
pub const SEC_IN_MIN: i64 = 60;
/// Minutes in an hour.
pub const MIN_IN_HOUR: i64 = 60;
/// Hours in a day.
pub const HOURS_IN_DAY: i64 = 24;
/// Milliseconds in a minute.
pub const MS_IN_MIN: i64 = SEC_IN_MIN * MS_IN_SEC;
/// Seconds in an hour.
pub const SEC_IN_HOUR: i64 = SEC_IN_MIN * MIN_IN_HOUR;
/// Milliseconds in an hour.
pub const MS_IN_HOUR: i64 = MS_IN_SEC * SEC_IN_HOUR;
/// Milliseconds in a day.
pub const MS_IN_DAY: i64 = MS_IN_HOUR * HOURS_IN_DAY;

/// Milliseconds left until `target_epoch_ms`, as seen at `now_epoch_ms`.
///
/// The absolute value is taken of the target epoch itself, not of the
/// difference. Anything under one second, including a target that has
/// already passed, is reported as zero ("arrived").
pub fn remaining_ms(target_epoch_ms: i64, now_epoch_ms: i64) -> i64 {
    let diff = target_epoch_ms.saturating_abs().saturating_sub(now_epoch_ms);
    if diff < MS_IN_SEC {
        0
    } else {
        diff
    }
}

/// A duration split into mutually exclusive day/hour/minute/second units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Breakdown {
    /// Whole days; unbounded.
    pub days: i64,
    /// Hours past the last whole day, `0..24`.
    pub hours: i64,
    /// Minutes past the last whole hour, `0..60`.
    pub minutes: i64,
    /// Seconds past the last whole minute, `0..60`.
    pub seconds: i64,
}

impl Breakdown {
    /// Splits a non-negative millisecond count. Sub-second remainders are
    /// floored away.
    pub fn from_millis(ms: i64) -> Self {
        let days = ms / MS_IN_DAY;
        let hours = ms / MS_IN_HOUR - days * HOURS_IN_DAY;
        let minutes = ms / MS_IN_MIN - hours * MIN_IN_HOUR - days * HOURS_IN_DAY * MIN_IN_HOUR;
        let seconds = ms / MS_IN_SEC
            - minutes * SEC_IN_MIN
            - hours * SEC_IN_HOUR
            - days * HOURS_IN_DAY * SEC_IN_HOUR;

        Self {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    /// Reassembles the whole-second total in milliseconds.
    pub fn total_millis(&self) -> i64 {
        self.days * MS_IN_DAY
            + self.hours * MS_IN_HOUR
            + self.minutes * MS_IN_MIN
            + self.seconds * MS_IN_SEC
    }

    /// Whether every unit is zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::default()
    }
}

/// Renders a unit value with a leading zero when it is a single character.
pub fn pad_unit(n: i64) -> String {
    let s = n.to_string();
    if s.chars().count() == 1 {
        format!("0{s}")
    } else {
        s
    }
}

/// Elapsed fraction of the captured duration.
///
/// Not clamped: a stale total can push the value past 1 or below 0, and a
/// zero total yields a non-finite result. `None` means no duration was ever
/// captured for this countdown.
pub fn progress_fraction(total_diff_ms: Option<i64>, remaining: i64) -> Option<f64> {
    total_diff_ms.map(|total| {
        let total = total as f64;
        (total - remaining as f64) / total
    })
}

/// One labelled unit of the display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Unit {
    /// Caption under the value, e.g. `Days`.
    pub label: &'static str,
    /// Zero-padded value.
    pub value: String,
}

/// Everything the running view needs for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Countdown title as configured.
    pub title: String,
    /// Output of [`remaining_ms`] at the snapshot instant.
    pub remaining_ms: i64,
    /// `remaining_ms` split into units.
    pub breakdown: Breakdown,
    /// Unclamped elapsed fraction; see [`progress_fraction`].
    pub progress: Option<f64>,
    /// Whether the seconds column is drawn.
    pub show_seconds: bool,
}

impl Snapshot {
    /// Derives the frame for `now`.
    pub fn compute(
        title: &str,
        target: DateTime<Utc>,
        total_diff_ms: Option<i64>,
        show_seconds: bool,
        now: DateTime<Utc>,
    ) -> Self {
        let remaining = remaining_ms(target.timestamp_millis(), now.timestamp_millis());
        Self {
            title: title.to_string(),
            remaining_ms: remaining,
            breakdown: Breakdown::from_millis(remaining),
            progress: progress_fraction(total_diff_ms, remaining),
            show_seconds,
        }
    }

    /// Whether the target has been reached.
    pub fn arrived(&self) -> bool {
        self.remaining_ms == 0
    }

    /// Heading text, also used as the host chrome title.
    pub fn heading(&self) -> String {
        format!("Time to: {}", self.title)
    }

    /// Display columns in order: days, hours, minutes and, if enabled,
    /// seconds.
    pub fn units(&self) -> Vec<Unit> {
        let b = self.breakdown;
        let mut units = vec![
            Unit {
                label: "Days",
                value: pad_unit(b.days),
            },
            Unit {
                label: "Hours",
                value: pad_unit(b.hours),
            },
            Unit {
                label: "Minutes",
                value: pad_unit(b.minutes),
            },
        ];
        if self.show_seconds {
            units.push(Unit {
                label: "Seconds",
                value: pad_unit(b.seconds),
            });
        }
        units
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_one_of_each_unit() {
        let target = now() + ChronoDuration::milliseconds(90_061_000);
        let snap = Snapshot::compute("Launch", target, Some(90_061_000), true, now());

        let values: Vec<_> = snap.units().into_iter().map(|u| u.value).collect();
        assert_eq!(values, vec!["01", "01", "01", "01"]);
        assert!(!snap.arrived());
    }

    #[test]
    fn test_hidden_seconds_do_not_change_math() {
        let target = now() + ChronoDuration::milliseconds(90_061_000);
        let with = Snapshot::compute("Launch", target, None, true, now());
        let without = Snapshot::compute("Launch", target, None, false, now());

        assert_eq!(with.breakdown, without.breakdown);
        assert_eq!(without.units().len(), 3);
        assert!(without.units().iter().all(|u| u.label != "Seconds"));
    }

    #[test]
    fn test_past_target_clamps_to_zero() {
        let target = now() - ChronoDuration::milliseconds(5000);
        let snap = Snapshot::compute("Gone", target, Some(10_000), true, now());

        assert_eq!(snap.remaining_ms, 0);
        assert!(snap.arrived());
        assert!(snap.units().iter().all(|u| u.value == "00"));
    }

    #[test]
    fn test_sub_second_remaining_is_zero() {
        let base = now().timestamp_millis();
        for ms in [0, 1, 500, 999] {
            assert_eq!(remaining_ms(base + ms, base), 0, "offset {ms}");
        }
        assert_eq!(remaining_ms(base + 1000, base), 1000);
    }

    #[test]
    fn test_abs_is_applied_to_target_not_difference() {
        // A pre-epoch target is mirrored around the epoch.
        assert_eq!(remaining_ms(-5_000_000, 1_000_000), 4_000_000);
    }

    #[test]
    fn test_breakdown_reconstructs_total() {
        let samples = [
            1_000,
            59_999,
            3_600_000,
            86_399_999,
            90_061_000,
            1_234_567_890,
            987_654_321_000,
        ];
        for ms in samples {
            let b = Breakdown::from_millis(ms);
            assert_eq!(b.total_millis(), ms - ms % MS_IN_SEC, "ms {ms}");
            assert!((0..24).contains(&b.hours));
            assert!((0..60).contains(&b.minutes));
            assert!((0..60).contains(&b.seconds));
        }
    }

    #[test]
    fn test_padding() {
        for n in 0..10 {
            assert_eq!(pad_unit(n), format!("0{n}"));
        }
        assert_eq!(pad_unit(10), "10");
        assert_eq!(pad_unit(365), "365");
    }

    #[test]
    fn test_progress_is_not_clamped() {
        assert_eq!(progress_fraction(Some(10_000), 2_500), Some(0.75));
        assert_eq!(progress_fraction(Some(10_000), 20_000), Some(-1.0));
        assert_eq!(progress_fraction(None, 2_500), None);
        assert!(!progress_fraction(Some(0), 0).unwrap().is_finite());
    }

    #[test]
    fn test_progress_with_extreme_totals() {
        let low = progress_fraction(Some(i64::MIN), 90_061_000).unwrap();
        let high = progress_fraction(Some(i64::MAX), 90_061_000).unwrap();
        assert!((low - 1.0).abs() < 1e-9);
        assert!((high - 1.0).abs() < 1e-9);
        assert!(progress_fraction(Some(i64::MIN), i64::MAX).unwrap().is_finite());
    }

    #[test]
    fn test_snapshot_is_deterministic() {
        let target = now() + ChronoDuration::hours(5);
        let a = Snapshot::compute("Same", target, Some(1), false, now());
        let b = Snapshot::compute("Same", target, Some(1), false, now());
        assert_eq!(a, b);
        assert_eq!(a.heading(), "Time to: Same");
    }
}
