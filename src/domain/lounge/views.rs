use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use rust_decimal::Decimal;
use std::collections::HashSet;

use crate::domain::booking::advance_booking::AdvanceBooking;
use crate::domain::session::session::Session;
use crate::domain::session::status::{SessionStatus, evaluate_status, recently_finished, within_occupancy_grace};
use crate::domain::settings::EngineSettings;
use crate::domain::utils::id::SessionId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EntriesFilter {
    /// Every session started today.
    AllToday,
    /// Sessions of today and yesterday that are running or finished within the occupancy grace.
    #[default]
    ActiveWithGrace,
}

/// Sessions for the entries table, highest serial number first.
pub fn entries_view<'s>(sessions: &'s [Session], filter: EntriesFilter, now: NaiveDateTime, settings: &EngineSettings) -> Vec<&'s Session> {
    let today = now.date();
    let yesterday = today - TimeDelta::days(1);

    let mut entries: Vec<&Session> = sessions
        .iter()
        .filter(|session| match filter {
            EntriesFilter::AllToday => session.date == today,
            EntriesFilter::ActiveWithGrace => {
                (session.date == today || session.date == yesterday)
                    && (evaluate_status(session, now, settings).status.occupies_station() || within_occupancy_grace(session, now, settings))
            }
        })
        .collect();

    entries.sort_by(|a, b| b.serial_number.cmp(&a.serial_number));
    entries
}

/// Timed-up sessions that ended within the recently finished window, latest exit first.
pub fn recently_finished_sessions<'s>(sessions: &'s [Session], now: NaiveDateTime, settings: &EngineSettings) -> Vec<&'s Session> {
    let mut finished: Vec<&Session> = sessions
        .iter()
        .filter(|session| evaluate_status(session, now, settings).status == SessionStatus::TimeUp && recently_finished(session, now, settings))
        .collect();

    finished.sort_by_key(|session| std::cmp::Reverse(session.exit_at()));
    finished
}

/// Today's bookings starting after `now` and within the upcoming horizon, earliest first.
pub fn upcoming_bookings<'b>(bookings: &'b [AdvanceBooking], now: NaiveDateTime, settings: &EngineSettings) -> Vec<&'b AdvanceBooking> {
    let horizon = now.checked_add_signed(settings.upcoming_booking_horizon).unwrap_or(NaiveDateTime::MAX);

    let mut upcoming: Vec<&AdvanceBooking> = bookings
        .iter()
        .filter(|booking| booking.booking_date == now.date())
        .filter(|booking| {
            let start = booking.starts_at();
            start > now && start <= horizon
        })
        .collect();

    upcoming.sort_by_key(|booking| booking.starts_at());
    upcoming
}

/// Sum of the bills of sessions dated `date`.
pub fn day_collection(sessions: &[Session], date: NaiveDate) -> Decimal {
    sessions.iter().filter(|session| session.date == date).map(|session| session.total).fold(Decimal::ZERO, Decimal::saturating_add)
}

pub fn selected_total(sessions: &[Session], selected: &HashSet<SessionId>) -> Decimal {
    sessions.iter().filter(|session| selected.contains(&session.id)).map(|session| session.total).fold(Decimal::ZERO, Decimal::saturating_add)
}
