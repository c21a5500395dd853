//! Section-based date/time picker for the countdown target.
//!
//! The value is edited as local wall-clock time, one section at a time:
//! `left`/`right` select a section and `up`/`down` step it. Stepping wraps
//! within the section (December steps to January of the same year, the 31st
//! steps to the 1st), and a month or year change clamps the day to the length
//! of the new month.
//!
//! ```rust
//! use countdown_widget::datetime::{new, Section};
//! use chrono::NaiveDate;
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap().and_hms_opt(9, 0, 0).unwrap();
//! let mut picker = new(start);
//! picker.select(Section::Month);
//! picker.step(1);
//! assert_eq!(picker.value().to_string(), "2024-02-29 09:00:00");
//! ```

use crate::key::{matches_binding, new_binding, with_keys_str, Binding};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg};
use chrono::{
    DateTime, Datelike, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};
use lipgloss_extras::prelude::*;

/// An editable part of the date/time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Calendar year.
    Year,
    /// Month, 1 to 12.
    Month,
    /// Day of the month.
    Day,
    /// Hour, 0 to 23.
    Hour,
    /// Minute.
    Minute,
    /// Second.
    Second,
}

const SECTIONS: [Section; 6] = [
    Section::Year,
    Section::Month,
    Section::Day,
    Section::Hour,
    Section::Minute,
    Section::Second,
];

/// Keys understood by the picker.
#[derive(Debug, Clone)]
pub struct KeyMap {
    /// Selects the section to the right.
    pub next_section: Binding,
    /// Selects the section to the left.
    pub prev_section: Binding,
    /// Steps the selected section up.
    pub increment: Binding,
    /// Steps the selected section down.
    pub decrement: Binding,
}

/// Arrow keys plus the vim-style `hjkl`.
pub fn default_key_map() -> KeyMap {
    KeyMap {
        next_section: new_binding(vec![with_keys_str(&["right", "l"])]),
        prev_section: new_binding(vec![with_keys_str(&["left", "h"])]),
        increment: new_binding(vec![with_keys_str(&["up", "k", "+"])]),
        decrement: new_binding(vec![with_keys_str(&["down", "j", "-"])]),
    }
}

/// Date/time picker state.
#[derive(Debug, Clone)]
pub struct Model {
    /// Navigation and stepping keys.
    pub key_map: KeyMap,
    /// Highlight of the selected section while focused.
    pub section_style: Style,
    value: NaiveDateTime,
    section: usize,
    focus: bool,
}

/// Creates a picker showing `value` with the year section selected.
pub fn new(value: NaiveDateTime) -> Model {
    Model {
        key_map: default_key_map(),
        section_style: Style::new().reverse(true),
        value: value.with_nanosecond(0).unwrap_or(value),
        section: 0,
        focus: false,
    }
}

/// Creates a picker showing `instant` in the local time zone.
pub fn from_utc(instant: DateTime<Utc>) -> Model {
    new(instant.with_timezone(&Local).naive_local())
}

impl Model {
    /// The picked wall-clock time.
    pub fn value(&self) -> NaiveDateTime {
        self.value
    }

    /// Replaces the value, dropping sub-second precision.
    pub fn set_value(&mut self, value: NaiveDateTime) {
        self.value = value.with_nanosecond(0).unwrap_or(value);
    }

    /// The picked wall-clock time resolved in the local time zone.
    ///
    /// An ambiguous time (DST fall-back) resolves to the earlier instant; a
    /// time inside a DST gap is read as UTC.
    pub fn value_utc(&self) -> DateTime<Utc> {
        match Local.from_local_datetime(&self.value).earliest() {
            Some(local) => local.with_timezone(&Utc),
            None => self.value.and_utc(),
        }
    }

    /// The selected section.
    pub fn section(&self) -> Section {
        SECTIONS[self.section]
    }

    /// Selects `section`.
    pub fn select(&mut self, section: Section) {
        self.section = SECTIONS.iter().position(|s| *s == section).unwrap_or(0);
    }

    /// Moves the selected section by `delta` units, wrapping within it.
    pub fn step(&mut self, delta: i32) {
        let date = self.value.date();
        let time = self.value.time();

        let stepped = match self.section() {
            Section::Year => with_year_month(date, date.year() + delta, date.month())
                .map(|d| NaiveDateTime::new(d, time)),
            Section::Month => {
                let month = wrap(date.month() as i32 - 1 + delta, 12) + 1;
                with_year_month(date, date.year(), month as u32)
                    .map(|d| NaiveDateTime::new(d, time))
            }
            Section::Day => {
                let max = days_in_month(date.year(), date.month()) as i32;
                let day = wrap(date.day() as i32 - 1 + delta, max) + 1;
                NaiveDate::from_ymd_opt(date.year(), date.month(), day as u32)
                    .map(|d| NaiveDateTime::new(d, time))
            }
            Section::Hour => NaiveTime::from_hms_opt(
                wrap(time.hour() as i32 + delta, 24) as u32,
                time.minute(),
                time.second(),
            )
            .map(|t| NaiveDateTime::new(date, t)),
            Section::Minute => NaiveTime::from_hms_opt(
                time.hour(),
                wrap(time.minute() as i32 + delta, 60) as u32,
                time.second(),
            )
            .map(|t| NaiveDateTime::new(date, t)),
            Section::Second => NaiveTime::from_hms_opt(
                time.hour(),
                time.minute(),
                wrap(time.second() as i32 + delta, 60) as u32,
            )
            .map(|t| NaiveDateTime::new(date, t)),
        };

        if let Some(dt) = stepped {
            self.value = dt;
        }
    }

    /// Handles navigation and stepping keys. Returns `true` if the value changed.
    pub fn handle_key(&mut self, key: &KeyMsg) -> bool {
        if !self.focus {
            return false;
        }
        if matches_binding(key, &self.key_map.next_section) {
            self.section = (self.section + 1) % SECTIONS.len();
            false
        } else if matches_binding(key, &self.key_map.prev_section) {
            self.section = (self.section + SECTIONS.len() - 1) % SECTIONS.len();
            false
        } else if matches_binding(key, &self.key_map.increment) {
            let before = self.value;
            self.step(1);
            before != self.value
        } else if matches_binding(key, &self.key_map.decrement) {
            let before = self.value;
            self.step(-1);
            before != self.value
        } else {
            false
        }
    }

    /// Renders `YYYY-MM-DD HH:MM:SS`, highlighting the selected section
    /// when focused.
    pub fn view(&self) -> String {
        let v = self.value;
        let parts = [
            format!("{:04}", v.year()),
            format!("{:02}", v.month()),
            format!("{:02}", v.day()),
            format!("{:02}", v.hour()),
            format!("{:02}", v.minute()),
            format!("{:02}", v.second()),
        ];
        let seps = ["-", "-", " ", ":", ":", ""];

        let mut out = String::new();
        for (i, (part, sep)) in parts.iter().zip(seps).enumerate() {
            if self.focus && i == self.section {
                out.push_str(&self.section_style.render(part));
            } else {
                out.push_str(part);
            }
            out.push_str(sep);
        }
        out
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

fn wrap(value: i32, modulus: i32) -> i32 {
    value.rem_euclid(modulus)
}

fn with_year_month(date: NaiveDate, year: i32, month: u32) -> Option<NaiveDate> {
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Number of days in `month` of `year`.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(31)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, mo, d)
            .unwrap()
            .and_hms_opt(h, mi, s)
            .unwrap()
    }

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_days_in_month() {
        assert_eq!(days_in_month(2024, 2), 29);
        assert_eq!(days_in_month(2023, 2), 28);
        assert_eq!(days_in_month(2024, 12), 31);
        assert_eq!(days_in_month(2024, 4), 30);
    }

    #[test]
    fn test_month_step_clamps_day() {
        let mut p = new(at(2023, 1, 31, 8, 0, 0));
        p.select(Section::Month);
        p.step(1);
        assert_eq!(p.value(), at(2023, 2, 28, 8, 0, 0));
    }

    #[test]
    fn test_sections_wrap_without_carrying() {
        let mut p = new(at(2024, 12, 31, 23, 59, 59));
        p.select(Section::Month);
        p.step(1);
        assert_eq!(p.value(), at(2024, 1, 31, 23, 59, 59));

        p.select(Section::Day);
        p.step(1);
        assert_eq!(p.value(), at(2024, 1, 1, 23, 59, 59));

        p.select(Section::Hour);
        p.step(1);
        p.select(Section::Minute);
        p.step(1);
        p.select(Section::Second);
        p.step(1);
        assert_eq!(p.value(), at(2024, 1, 1, 0, 0, 0));

        p.select(Section::Second);
        p.step(-1);
        assert_eq!(p.value(), at(2024, 1, 1, 0, 0, 59));
    }

    #[test]
    fn test_leap_day_year_step() {
        let mut p = new(at(2024, 2, 29, 0, 0, 0));
        p.select(Section::Year);
        p.step(1);
        assert_eq!(p.value(), at(2025, 2, 28, 0, 0, 0));
    }

    #[test]
    fn test_keys_move_and_step() {
        let mut p = new(at(2030, 6, 15, 10, 30, 0));
        assert!(!p.handle_key(&key(KeyCode::Up)));

        p.focus();
        assert!(!p.handle_key(&key(KeyCode::Right)));
        assert_eq!(p.section(), Section::Month);
        assert!(p.handle_key(&key(KeyCode::Up)));
        assert_eq!(p.value(), at(2030, 7, 15, 10, 30, 0));

        assert!(!p.handle_key(&key(KeyCode::Left)));
        assert!(!p.handle_key(&key(KeyCode::Left)));
        assert_eq!(p.section(), Section::Second);
        assert!(p.handle_key(&key(KeyCode::Down)));
        assert_eq!(p.value(), at(2030, 7, 15, 10, 30, 59));
    }

    #[test]
    fn test_view_unfocused() {
        let p = new(at(2030, 6, 5, 7, 8, 9));
        assert_eq!(p.view(), "2030-06-05 07:08:09");
    }

    #[test]
    fn test_subsecond_precision_is_dropped() {
        let with_nanos = at(2030, 1, 1, 0, 0, 0).with_nanosecond(123_000_000).unwrap();
        let p = new(with_nanos);
        assert_eq!(p.value(), at(2030, 1, 1, 0, 0, 0));
    }
}
