use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashSet;

use crate::domain::booking::advance_booking::AdvanceBooking;
use crate::domain::booking::time_slot::TimeSlot;
use crate::domain::clock::clock::SharedClock;
use crate::domain::session::session::Session;
use crate::domain::session::status::{SessionStatus, evaluate_status};
use crate::domain::settings::EngineSettings;
use crate::domain::utils::id::{BookingId, SessionId, StationId};

/// A session ran out of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpiryAlert {
    pub session_id: SessionId,
    pub customer_name: String,
    pub gaming_option: String,
    pub station: Option<StationId>,
    pub raised_at: NaiveDateTime,
}

/// A booked slot is about to start or running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReminder {
    pub booking_id: BookingId,
    pub customer_name: String,
    pub booking_date: NaiveDate,
    pub time_slot: TimeSlot,
    pub num_players: u32,
    pub raised_at: NaiveDateTime,
}

/// Alerts currently on display after a tick.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActiveNotifications {
    pub expiry_alert: Option<ExpiryAlert>,
    pub booking_reminder: Option<BookingReminder>,
}

/// One-shot expiry alerts and booking reminders.
///
/// Every entity alerts at most once. While an alert of a stream is on display no other candidate of
/// that stream surfaces. When it expires or is dismissed, the next candidate surfaces on the
/// following tick. Forgetting an entity makes it eligible again.
#[derive(Debug)]
pub struct NotificationScheduler {
    clock: SharedClock,
    settings: EngineSettings,
    notified_sessions: HashSet<SessionId>,
    notified_bookings: HashSet<BookingId>,
    expiry_alert: Option<ExpiryAlert>,
    booking_reminder: Option<BookingReminder>,
}

impl NotificationScheduler {
    pub fn new(clock: SharedClock, settings: EngineSettings) -> Self {
        NotificationScheduler {
            clock,
            settings,
            notified_sessions: HashSet::new(),
            notified_bookings: HashSet::new(),
            expiry_alert: None,
            booking_reminder: None,
        }
    }

    /// Re-evaluates both streams at the clock's current instant.
    ///
    /// `sessions` is scanned in the given order, the first timed-up session not yet notified wins.
    /// Bookings are considered earliest start first.
    pub fn tick(&mut self, sessions: &[Session], bookings: &[AdvanceBooking]) -> ActiveNotifications {
        let now = self.clock.now();
        self.tick_at(now, sessions, bookings)
    }

    /// Same as [`NotificationScheduler::tick`] at an instant the caller already read from the clock.
    pub fn tick_at(&mut self, now: NaiveDateTime, sessions: &[Session], bookings: &[AdvanceBooking]) -> ActiveNotifications {
        self.tick_expiry(sessions, now);
        self.tick_reminder(bookings, now);

        self.active()
    }

    pub fn active(&self) -> ActiveNotifications {
        ActiveNotifications { expiry_alert: self.expiry_alert.clone(), booking_reminder: self.booking_reminder.clone() }
    }

    fn tick_expiry(&mut self, sessions: &[Session], now: NaiveDateTime) {
        if let Some(alert) = &self.expiry_alert {
            if now - alert.raised_at >= self.settings.expiry_alert_display {
                tracing::debug!(SessionId = %alert.session_id, LogDescription = "Expiry alert timed out");
                self.expiry_alert = None;
            }
            return;
        }

        let candidate = sessions.iter().find(|session| {
            !self.notified_sessions.contains(&session.id) && evaluate_status(session, now, &self.settings).status == SessionStatus::TimeUp
        });

        if let Some(session) = candidate {
            self.notified_sessions.insert(session.id.clone());

            tracing::info!(
                SessionId = %session.id,
                Customer = %session.customer_name,
                Station = session.station.as_ref().map(StationId::as_str).unwrap_or("-"),
                GamingOption = %session.gaming_option,
                LogDescription = "Expiry alert raised",
            );

            self.expiry_alert = Some(ExpiryAlert {
                session_id: session.id.clone(),
                customer_name: session.customer_name.clone(),
                gaming_option: session.gaming_option.clone(),
                station: session.station.clone(),
                raised_at: now,
            });
        }
    }

    fn tick_reminder(&mut self, bookings: &[AdvanceBooking], now: NaiveDateTime) {
        if let Some(reminder) = &self.booking_reminder {
            if now - reminder.raised_at >= self.settings.booking_reminder_display {
                tracing::debug!(BookingId = %reminder.booking_id, LogDescription = "Booking reminder timed out");
                self.booking_reminder = None;
            }
            return;
        }

        let candidate = bookings
            .iter()
            .filter(|booking| !self.notified_bookings.contains(&booking.id))
            .filter(|booking| {
                let start = booking.starts_at();
                let opens = start.checked_sub_signed(self.settings.reminder_lead).is_none_or(|opens| now >= opens);
                let closes = start.checked_add_signed(self.settings.reminder_tail).is_none_or(|closes| now <= closes);
                opens && closes
            })
            .min_by_key(|booking| booking.starts_at());

        if let Some(booking) = candidate {
            self.notified_bookings.insert(booking.id.clone());

            tracing::info!(
                BookingId = %booking.id,
                Customer = %booking.customer_name,
                TimeSlot = %booking.time_slot,
                Players = booking.num_players,
                LogDescription = "Booking reminder raised",
            );

            self.booking_reminder = Some(BookingReminder {
                booking_id: booking.id.clone(),
                customer_name: booking.customer_name.clone(),
                booking_date: booking.booking_date,
                time_slot: booking.time_slot,
                num_players: booking.num_players,
                raised_at: now,
            });
        }
    }

    pub fn dismiss_expiry_alert(&mut self) {
        self.expiry_alert = None;
    }

    pub fn dismiss_booking_reminder(&mut self) {
        self.booking_reminder = None;
    }

    /// Drops every trace of a deleted session, including an alert on display.
    pub fn forget_session(&mut self, id: &SessionId) {
        self.notified_sessions.remove(id);

        if self.expiry_alert.as_ref().is_some_and(|alert| &alert.session_id == id) {
            self.expiry_alert = None;
        }
    }

    pub fn forget_booking(&mut self, id: &BookingId) {
        self.notified_bookings.remove(id);

        if self.booking_reminder.as_ref().is_some_and(|reminder| &reminder.booking_id == id) {
            self.booking_reminder = None;
        }
    }

    pub fn was_notified_session(&self, id: &SessionId) -> bool {
        self.notified_sessions.contains(id)
    }

    pub fn was_notified_booking(&self, id: &BookingId) -> bool {
        self.notified_bookings.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::beverage::BeverageSelections;
    use crate::domain::clock::clock_mock::MockClock;
    use crate::domain::session::session::PaymentMethod;
    use chrono::{NaiveTime, TimeDelta};
    use rust_decimal::Decimal;
    use tracing_test::traced_test;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 29).unwrap().and_hms_opt(h, m, 0).unwrap()
    }

    fn session(id: &str, entry: (u32, u32), minutes: u32) -> Session {
        let entry_time = NaiveTime::from_hms_opt(entry.0, entry.1, 0).unwrap();
        Session {
            id: SessionId::new(id),
            serial_number: 1,
            date: NaiveDate::from_ymd_opt(2025, 6, 29).unwrap(),
            customer_name: format!("Customer {}", id),
            mobile_number: "9876543210".to_string(),
            gaming_option: "PS(2P)".to_string(),
            station: Some(StationId::new("PS-1")),
            entry_time,
            exit_time: crate::domain::session::session::compute_exit_time(entry_time, minutes),
            duration_minutes: minutes,
            discount_applied: false,
            custom_hourly_rate: None,
            beverages: BeverageSelections::new(),
            gaming_price: Decimal::ZERO,
            beverage_price: Decimal::ZERO,
            total: Decimal::ZERO,
            payment_method: PaymentMethod::Cash,
            note: None,
            redemption: None,
        }
    }

    #[test]
    #[traced_test]
    fn expiry_alert_is_logged_with_the_station() {
        let clock = MockClock::new(at(11, 0));
        let mut scheduler = NotificationScheduler::new(clock.shared(), EngineSettings::default());

        let active = scheduler.tick(&[session("s1", (10, 0), 60)], &[]);

        assert_eq!(active.expiry_alert.map(|alert| alert.session_id), Some(SessionId::new("s1")));
        assert!(logs_contain("Expiry alert raised"));
        assert!(logs_contain("PS-1"));
    }

    #[test]
    #[traced_test]
    fn timed_out_alert_is_logged_and_cleared() {
        let clock = MockClock::new(at(11, 0));
        let mut scheduler = NotificationScheduler::new(clock.shared(), EngineSettings::default());
        let sessions = [session("s1", (10, 0), 60)];

        scheduler.tick(&sessions, &[]);
        clock.advance(TimeDelta::seconds(15));

        assert_eq!(scheduler.tick(&sessions, &[]).expiry_alert, None);
        assert!(logs_contain("Expiry alert timed out"));
    }
}
