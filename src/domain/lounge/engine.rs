use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use crate::domain::allocation::station_allocator::{Occupancy, StationAllocator, StationSummary};
use crate::domain::booking::advance_booking::{AdvanceBooking, BookingDraft, sort_chronologically};
use crate::domain::booking::slot_generator::BookingSlotGenerator;
use crate::domain::booking::time_slot::TimeSlot;
use crate::domain::catalog::beverage::{BeverageCatalog, BeverageKey};
use crate::domain::clock::clock::SharedClock;
use crate::domain::lounge::config::LoungeConfig;
use crate::domain::lounge::snapshot::LoungeSnapshot;
use crate::domain::lounge::views::{EntriesFilter, day_collection, entries_view, recently_finished_sessions, upcoming_bookings};
use crate::domain::notification::notification_scheduler::{ActiveNotifications, NotificationScheduler};
use crate::domain::pricing::pricing_engine::PricingEngine;
use crate::domain::session::draft::{SessionDraft, SessionEdit};
use crate::domain::session::planner::SessionPlanner;
use crate::domain::session::session::Session;
use crate::domain::session::status::{StatusReport, evaluate_status};
use crate::domain::utils::id::{BeverageId, BookingId, SessionId};
use crate::domain::validation::ValidationError;

/// A session as shown in the entries table.
#[derive(Debug, Clone)]
pub struct SessionRow {
    pub session: Session,
    pub status: StatusReport,
    pub requires_admin_unlock: bool,
}

/// Everything the host displays after one tick.
#[derive(Debug, Clone)]
pub struct DerivedViews {
    pub now: NaiveDateTime,
    pub entries: Vec<SessionRow>,
    pub occupancy: Occupancy,
    pub station_summary: StationSummary,
    pub recently_finished: Vec<Session>,
    pub upcoming_bookings: Vec<AdvanceBooking>,
    /// Bookings of the selected booking date, earliest first.
    pub bookings: Vec<AdvanceBooking>,
    pub booking_date: NaiveDate,
    pub booking_slots: Vec<TimeSlot>,
    pub today_collection: Decimal,
    pub notifications: ActiveNotifications,
}

/// Composes the scheduling components for a host that ticks once per second or so.
///
/// Apart from the notification de-duplication state, every view is recomputed from the snapshot
/// and the clock on each call.
#[derive(Debug)]
pub struct LoungeEngine {
    config: LoungeConfig,
    clock: SharedClock,
    notifications: NotificationScheduler,
    pub entries_filter: EntriesFilter,
    /// Date the booking views show. `None` follows the clock's current date.
    pub booking_date: Option<NaiveDate>,
}

impl LoungeEngine {
    pub fn new(config: LoungeConfig, clock: SharedClock) -> Self {
        let notifications = NotificationScheduler::new(clock.clone(), config.settings.clone());

        LoungeEngine { config, clock, notifications, entries_filter: EntriesFilter::default(), booking_date: None }
    }

    pub fn config(&self) -> &LoungeConfig {
        &self.config
    }

    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Standard beverages plus the snapshot's admin-added ones.
    pub fn beverage_catalog(&self, snapshot: &LoungeSnapshot) -> BeverageCatalog {
        self.config.beverages.clone().with_dynamic(snapshot.dynamic_beverages.clone())
    }

    pub fn allocator(&self) -> StationAllocator<'_> {
        StationAllocator::new(&self.config.stations, &self.config.gaming_options, &self.config.settings)
    }

    pub fn slot_generator(&self) -> BookingSlotGenerator<'_> {
        BookingSlotGenerator::new(&self.config.settings)
    }

    pub fn pricing<'a>(&'a self, beverages: &'a BeverageCatalog) -> PricingEngine<'a> {
        PricingEngine::new(&self.config.gaming_options, beverages)
    }

    /// Re-evaluates all views at the clock's instant and advances the notification streams.
    pub fn evaluate(&mut self, snapshot: &LoungeSnapshot) -> DerivedViews {
        let mut views = self.derive(snapshot, self.clock.now());

        let scan_order: Vec<Session> = views.entries.iter().map(|row| row.session.clone()).collect();
        views.notifications = self.notifications.tick_at(views.now, &scan_order, &snapshot.bookings);

        views
    }

    /// Pure part of [`LoungeEngine::evaluate`]. Reports the alerts currently on display without
    /// raising new ones.
    pub fn derive(&self, snapshot: &LoungeSnapshot, now: NaiveDateTime) -> DerivedViews {
        let settings = &self.config.settings;
        let allocator = self.allocator();

        let entries = entries_view(&snapshot.sessions, self.entries_filter, now, settings)
            .into_iter()
            .map(|session| SessionRow {
                session: session.clone(),
                status: evaluate_status(session, now, settings),
                requires_admin_unlock: session.requires_admin_unlock(now, settings.edit_lock_window),
            })
            .collect();

        let booking_date = self.booking_date.unwrap_or_else(|| now.date());
        let mut bookings: Vec<AdvanceBooking> = snapshot.bookings.iter().filter(|booking| booking.booking_date == booking_date).cloned().collect();
        sort_chronologically(&mut bookings);

        DerivedViews {
            now,
            entries,
            occupancy: allocator.occupancy(&snapshot.sessions, now),
            station_summary: allocator.summary(&snapshot.sessions, now),
            recently_finished: recently_finished_sessions(&snapshot.sessions, now, settings).into_iter().cloned().collect(),
            upcoming_bookings: upcoming_bookings(&snapshot.bookings, now, settings).into_iter().cloned().collect(),
            bookings,
            booking_date,
            booking_slots: self.slot_generator().slots(booking_date, now),
            today_collection: day_collection(&snapshot.sessions, now.date()),
            notifications: self.notifications.active(),
        }
    }

    /// Validates a new session and adds it to the snapshot.
    pub fn start_session(&self, snapshot: &mut LoungeSnapshot, draft: &SessionDraft) -> Result<SessionId, ValidationError> {
        let beverages = self.beverage_catalog(snapshot);
        let planner = SessionPlanner::new(&self.config.stations, &self.config.gaming_options, &beverages, &self.config.settings);

        let session = planner.create(draft, &snapshot.sessions, self.clock.now())?;
        let id = session.id.clone();
        snapshot.sessions.push(session);

        Ok(id)
    }

    /// Applies a whole-session edit in place. Fails for ids that are not in the snapshot.
    pub fn edit_session(&self, snapshot: &mut LoungeSnapshot, id: &SessionId, edit: &SessionEdit) -> Result<(), ValidationError> {
        let beverages = self.beverage_catalog(snapshot);
        let planner = SessionPlanner::new(&self.config.stations, &self.config.gaming_options, &beverages, &self.config.settings);

        let index = snapshot.sessions.iter().position(|session| &session.id == id).ok_or_else(|| ValidationError::UnknownSession(id.clone()))?;
        let updated = planner.edit(&snapshot.sessions[index], edit, &snapshot.sessions, self.clock.now())?;
        snapshot.sessions[index] = updated;

        Ok(())
    }

    pub fn add_booking(&self, snapshot: &mut LoungeSnapshot, draft: BookingDraft) -> Result<BookingId, ValidationError> {
        let booking = draft.validate_into(&self.config.gaming_options, &self.slot_generator(), self.clock.now())?;
        let id = booking.id.clone();
        snapshot.bookings.push(booking);

        Ok(id)
    }

    /// Rewrites a booking in place, keeping its id. A booking whose start moves may be reminded again.
    pub fn edit_booking(&mut self, snapshot: &mut LoungeSnapshot, id: &BookingId, draft: BookingDraft) -> Result<(), ValidationError> {
        let booking = snapshot.bookings.iter_mut().find(|booking| &booking.id == id).ok_or_else(|| ValidationError::UnknownBooking(id.clone()))?;
        let previous_start = booking.starts_at();

        booking.apply(draft, &self.config.gaming_options, &BookingSlotGenerator::new(&self.config.settings), self.clock.now())?;

        if booking.starts_at() != previous_start {
            self.notifications.forget_booking(id);
        }

        Ok(())
    }

    pub fn add_beverage(&self, snapshot: &mut LoungeSnapshot, name: &str, price: Decimal) -> Result<BeverageKey, ValidationError> {
        let mut catalog = self.beverage_catalog(snapshot);
        let key = catalog.add_dynamic(name, price)?;
        snapshot.dynamic_beverages = catalog.dynamic().to_vec();

        Ok(key)
    }

    pub fn remove_beverage(&self, snapshot: &mut LoungeSnapshot, id: &BeverageId) -> bool {
        let mut catalog = self.beverage_catalog(snapshot);
        let removed = catalog.remove_dynamic(id);
        snapshot.dynamic_beverages = catalog.dynamic().to_vec();

        removed
    }

    /// Removes a session and lets a future session with the same id alert again.
    pub fn delete_session(&mut self, snapshot: &mut LoungeSnapshot, id: &SessionId) -> bool {
        let before = snapshot.sessions.len();
        snapshot.sessions.retain(|session| &session.id != id);
        self.notifications.forget_session(id);

        let removed = before != snapshot.sessions.len();
        if removed {
            log::info!("Session {} deleted.", id);
        }
        removed
    }

    pub fn delete_booking(&mut self, snapshot: &mut LoungeSnapshot, id: &BookingId) -> bool {
        let before = snapshot.bookings.len();
        snapshot.bookings.retain(|booking| &booking.id != id);
        self.notifications.forget_booking(id);

        let removed = before != snapshot.bookings.len();
        if removed {
            log::info!("Booking {} deleted.", id);
        }
        removed
    }

    pub fn dismiss_expiry_alert(&mut self) {
        self.notifications.dismiss_expiry_alert();
    }

    pub fn dismiss_booking_reminder(&mut self) {
        self.notifications.dismiss_booking_reminder();
    }
}
