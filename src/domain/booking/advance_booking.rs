use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::booking::slot_generator::{BookingSlotGenerator, reselect};
use crate::domain::booking::time_slot::TimeSlot;
use crate::domain::catalog::gaming_option::GamingCatalog;
use crate::domain::utils::id::BookingId;
use crate::domain::validation::{ValidationError, require, validate_mobile_number};

/// Reservation of a future time slot. Independent of the sessions it may later turn into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvanceBooking {
    pub id: BookingId,
    pub booking_date: NaiveDate,
    pub time_slot: TimeSlot,
    pub customer_name: String,
    pub mobile_number: String,
    pub num_players: u32,
    pub gaming_option: String,
}

impl AdvanceBooking {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.time_slot.start_on(self.booking_date)
    }

    /// Replaces every field but the id with the validated draft.
    pub fn apply(&mut self, draft: BookingDraft, options: &GamingCatalog, slots: &BookingSlotGenerator<'_>, now: NaiveDateTime) -> Result<(), ValidationError> {
        let time_slot = draft.validate(options, slots, now)?;

        self.booking_date = draft.booking_date;
        self.time_slot = time_slot;
        self.customer_name = draft.customer_name.trim().to_string();
        self.mobile_number = draft.mobile_number.trim().to_string();
        self.num_players = draft.num_players;
        self.gaming_option = draft.gaming_option;

        log::info!("Booking {} updated: {} on {} for {} ({} players).", self.id, self.time_slot, self.booking_date, self.customer_name, self.num_players);

        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub customer_name: String,
    pub mobile_number: String,
    pub num_players: u32,
    pub gaming_option: String,
    pub booking_date: NaiveDate,
    pub time_slot: Option<TimeSlot>,
}

impl BookingDraft {
    /// Form prefilled from a stored booking.
    pub fn from_booking(booking: &AdvanceBooking) -> Self {
        BookingDraft {
            customer_name: booking.customer_name.clone(),
            mobile_number: booking.mobile_number.clone(),
            num_players: booking.num_players,
            gaming_option: booking.gaming_option.clone(),
            booking_date: booking.booking_date,
            time_slot: Some(booking.time_slot),
        }
    }

    /// Regenerates the slots of the chosen date and keeps the current choice only while it is offered.
    pub fn reselect_slot(&mut self, slots: &BookingSlotGenerator<'_>, now: NaiveDateTime) -> Vec<TimeSlot> {
        let offered = slots.slots(self.booking_date, now);
        self.time_slot = reselect(self.time_slot.as_ref(), &offered);
        offered
    }

    /// Checks the draft against the slots offered at `now`.
    pub fn validate(&self, options: &GamingCatalog, slots: &BookingSlotGenerator<'_>, now: NaiveDateTime) -> Result<TimeSlot, ValidationError> {
        require(&self.customer_name, "name")?;
        require(&self.mobile_number, "mobile number")?;
        let time_slot = self.time_slot.ok_or(ValidationError::MissingField("time slot"))?;

        if self.num_players == 0 {
            return Err(ValidationError::InvalidPlayerCount);
        }

        if options.get(&self.gaming_option).is_none() {
            return Err(ValidationError::UnknownGamingOption(self.gaming_option.clone()));
        }

        validate_mobile_number(self.mobile_number.trim())?;

        if self.booking_date == now.date() && time_slot.start_on(self.booking_date) < now {
            log::warn!("Refused booking for {} at {}: the slot has already started.", self.booking_date, time_slot);
            return Err(ValidationError::PastBookingSlot);
        }

        if !slots.is_offered(&time_slot, self.booking_date, now) {
            return Err(ValidationError::SlotNotOffered(time_slot.label(), self.booking_date));
        }

        Ok(time_slot)
    }

    /// Validates and builds the booking with a fresh id.
    pub fn validate_into(self, options: &GamingCatalog, slots: &BookingSlotGenerator<'_>, now: NaiveDateTime) -> Result<AdvanceBooking, ValidationError> {
        let time_slot = self.validate(options, slots, now)?;

        let booking = AdvanceBooking {
            id: BookingId::generate(),
            booking_date: self.booking_date,
            time_slot,
            customer_name: self.customer_name.trim().to_string(),
            mobile_number: self.mobile_number.trim().to_string(),
            num_players: self.num_players,
            gaming_option: self.gaming_option,
        };

        log::info!("Booked {} on {} for {} ({} players).", booking.time_slot, booking.booking_date, booking.customer_name, booking.num_players);

        Ok(booking)
    }
}

/// Orders bookings by the instant their slot starts.
pub fn sort_chronologically(bookings: &mut [AdvanceBooking]) {
    bookings.sort_by_key(|booking| booking.starts_at());
}
