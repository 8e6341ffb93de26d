use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

use crate::domain::booking::time_slot::TimeSlot;
use crate::domain::settings::EngineSettings;

/// Produces the reservable windows of a day.
#[derive(Debug, Clone, Copy)]
pub struct BookingSlotGenerator<'a> {
    settings: &'a EngineSettings,
}

impl<'a> BookingSlotGenerator<'a> {
    pub fn new(settings: &'a EngineSettings) -> Self {
        BookingSlotGenerator { settings }
    }

    /// Windows still bookable on `date` as seen at `now`, in chronological order.
    ///
    /// Today, a window is offered until `slot_past_buffer` after its start. Later days offer every
    /// window, earlier days none. No window ends after midnight at the end of `date`.
    pub fn slots(&self, date: NaiveDate, now: NaiveDateTime) -> Vec<TimeSlot> {
        let today = now.date();
        if date < today || self.settings.slot_step <= TimeDelta::zero() {
            return Vec::new();
        }

        let day_start = date.and_time(NaiveTime::MIN);
        let Some(end_of_day) = day_start.checked_add_signed(TimeDelta::days(1)) else {
            return Vec::new();
        };
        // A buffer reaching before the calendar's start excludes nothing.
        let earliest_start = if date == today { now.checked_sub_signed(self.settings.slot_past_buffer) } else { None };
        let last_start = date.and_time(self.settings.slot_last_start);

        let mut slots = Vec::new();
        let mut start = date.and_time(self.settings.slot_opening);

        while start <= last_start {
            let fits_the_day = start.checked_add_signed(self.settings.slot_length).is_some_and(|end| end <= end_of_day);
            let started_long_ago = earliest_start.is_some_and(|earliest| start < earliest);

            if !started_long_ago && fits_the_day {
                slots.push(TimeSlot::new(start.time(), self.settings.slot_length));
            }

            match start.checked_add_signed(self.settings.slot_step) {
                Some(next) => start = next,
                None => break,
            }
        }

        slots
    }

    pub fn is_offered(&self, slot: &TimeSlot, date: NaiveDate, now: NaiveDateTime) -> bool {
        self.slots(date, now).contains(slot)
    }
}

/// Keeps the previous choice while it is still offered, else falls back to the first offered slot.
pub fn reselect(previous: Option<&TimeSlot>, slots: &[TimeSlot]) -> Option<TimeSlot> {
    match previous {
        Some(slot) if slots.contains(slot) => Some(*slot),
        _ => slots.first().copied(),
    }
}
