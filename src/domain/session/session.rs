use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};
use rust_decimal::Decimal;
use std::fmt;

use crate::domain::catalog::beverage::BeverageSelections;
use crate::domain::utils::id::{SessionId, StationId};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Cash,
    Online,
    Other(String),
}

impl PaymentMethod {
    pub fn parse(value: &str) -> PaymentMethod {
        match value.trim() {
            "Cash" => PaymentMethod::Cash,
            "Online" => PaymentMethod::Online,
            other => PaymentMethod::Other(other.to_string()),
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => f.write_str("Cash"),
            PaymentMethod::Online => f.write_str("Online"),
            PaymentMethod::Other(value) => f.write_str(value),
        }
    }
}

/// One-time token handed to the customer. Issuing and checking it happens outside the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redemption {
    pub token: String,
    pub redeemed: bool,
}

/// A customer's timed occupation of a station.
///
/// Only the time of day of entry and exit is stored. An exit earlier than the entry belongs to the
/// next calendar day, see [`Session::exit_at`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: SessionId,
    pub serial_number: u32,
    pub date: NaiveDate,
    pub customer_name: String,
    pub mobile_number: String,
    pub gaming_option: String,
    pub station: Option<StationId>,
    pub entry_time: NaiveTime,
    pub exit_time: NaiveTime,
    pub duration_minutes: u32,
    pub discount_applied: bool,
    pub custom_hourly_rate: Option<Decimal>,
    pub beverages: BeverageSelections,
    pub gaming_price: Decimal,
    pub beverage_price: Decimal,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub note: Option<String>,
    pub redemption: Option<Redemption>,
}

impl Session {
    pub fn entry_at(&self) -> NaiveDateTime {
        self.date.and_time(self.entry_time)
    }

    pub fn exit_at(&self) -> NaiveDateTime {
        let exit = self.date.and_time(self.exit_time);

        if self.exit_time < self.entry_time { exit + TimeDelta::days(1) } else { exit }
    }

    /// Length the session was booked for, or `fallback` when none was recorded.
    pub fn planned_duration(&self, fallback: TimeDelta) -> TimeDelta {
        if self.duration_minutes == 0 { fallback } else { TimeDelta::minutes(i64::from(self.duration_minutes)) }
    }

    /// Editing a session this long after its exit needs an operator unlock.
    pub fn requires_admin_unlock(&self, now: NaiveDateTime, edit_lock_window: TimeDelta) -> bool {
        now > self.exit_at() + edit_lock_window
    }

    /// Stores a trimmed note. A blank note removes the existing one.
    pub fn set_note(&mut self, note: &str) {
        let trimmed = note.trim();
        self.note = if trimmed.is_empty() { None } else { Some(trimmed.to_string()) };
    }

    pub fn clear_note(&mut self) {
        self.note = None;
    }
}

/// Time of day a session started at `entry` ends, wrapping past midnight.
pub fn compute_exit_time(entry: NaiveTime, duration_minutes: u32) -> NaiveTime {
    let (exit, _) = entry.overflowing_add_signed(TimeDelta::minutes(i64::from(duration_minutes)));
    exit
}

/// Serial number for the next session created on `date`, one past the day's highest.
pub fn next_serial(sessions: &[Session], date: NaiveDate) -> u32 {
    sessions.iter().filter(|session| session.date == date).map(|session| session.serial_number).max().unwrap_or(0) + 1
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteReminder {
    pub note: String,
    pub from: String,
    pub date: NaiveDate,
}

/// The most recent note left on any session of the customer with this mobile number.
pub fn last_note_for_customer(mobile_number: &str, sessions: &[Session]) -> Option<NoteReminder> {
    sessions
        .iter()
        .filter(|session| session.mobile_number == mobile_number)
        .filter_map(|session| session.note.as_ref().map(|note| (session, note)))
        .max_by_key(|(session, _)| (session.entry_at(), session.serial_number))
        .map(|(session, note)| NoteReminder { note: note.clone(), from: session.customer_name.clone(), date: session.date })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn exit_time_wraps_past_midnight() {
        assert_eq!(compute_exit_time(t(23, 30), 90), t(1, 0));
        assert_eq!(compute_exit_time(t(10, 0), 60), t(11, 0));
    }

    #[test]
    fn payment_method_round_trips_text() {
        assert_eq!(PaymentMethod::parse("Online"), PaymentMethod::Online);
        assert_eq!(PaymentMethod::parse("Card").to_string(), "Card");
        assert_eq!(PaymentMethod::default().to_string(), "Cash");
    }
}
