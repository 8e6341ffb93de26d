use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use std::fmt;

use crate::domain::utils::time_format::{format_12h, parse_12h};

/// Half-open reservable window `[start, start + length)` on some day.
///
/// Stored and displayed as a label such as `"10:00 AM - 11:00 AM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimeSlot {
    pub start: NaiveTime,
    pub length: TimeDelta,
}

impl TimeSlot {
    pub fn new(start: NaiveTime, length: TimeDelta) -> Self {
        TimeSlot { start, length }
    }

    pub fn end(&self) -> NaiveTime {
        self.start.overflowing_add_signed(self.length).0
    }

    pub fn label(&self) -> String {
        format!("{} - {}", format_12h(self.start), format_12h(self.end()))
    }

    /// Parses a stored label back into a slot. Labels whose end lies before their start run past
    /// midnight.
    pub fn parse(label: &str) -> Option<TimeSlot> {
        let (start, end) = label.split_once(" - ")?;
        let start = parse_12h(start)?;
        let end = parse_12h(end)?;

        let length = if end <= start { end - start + TimeDelta::days(1) } else { end - start };

        Some(TimeSlot { start, length })
    }

    pub fn start_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.start)
    }

    pub fn end_on(&self, date: NaiveDate) -> NaiveDateTime {
        self.start_on(date) + self.length
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}
