mod common;

use chrono::TimeDelta;

use common::{at, day, t};
use lounge_scheduler::domain::booking::advance_booking::{BookingDraft, sort_chronologically};
use lounge_scheduler::domain::booking::slot_generator::{BookingSlotGenerator, reselect};
use lounge_scheduler::domain::booking::time_slot::TimeSlot;
use lounge_scheduler::domain::catalog::gaming_option::GamingCatalog;
use lounge_scheduler::domain::settings::EngineSettings;
use lounge_scheduler::domain::validation::ValidationError;

fn slot(h: u32, m: u32) -> TimeSlot {
    TimeSlot::new(t(h, m), TimeDelta::minutes(60))
}

fn draft(slot: Option<TimeSlot>) -> BookingDraft {
    BookingDraft {
        customer_name: "Ravi".to_string(),
        mobile_number: "9123456780".to_string(),
        num_players: 2,
        gaming_option: "PS(2P)".to_string(),
        booking_date: day(),
        time_slot: slot,
    }
}

#[test]
fn whole_day_is_offered_before_opening() {
    let settings = EngineSettings::default();
    let slots = BookingSlotGenerator::new(&settings).slots(day(), at(9, 0));

    assert_eq!(slots.len(), 27);
    assert_eq!(slots.first().map(TimeSlot::label), Some("10:00 AM - 11:00 AM".to_string()));
    assert_eq!(slots.last().map(TimeSlot::label), Some("11:00 PM - 12:00 AM".to_string()));
}

#[test]
fn late_evening_offers_only_slots_within_the_buffer() {
    let settings = EngineSettings::default();
    let slots = BookingSlotGenerator::new(&settings).slots(day(), at(22, 45));

    assert_eq!(slots, vec![slot(23, 0)]);
    assert!(BookingSlotGenerator::new(&settings).slots(day(), at(22, 34)).contains(&slot(22, 30)));
}

#[test]
fn future_dates_offer_everything_and_past_dates_nothing() {
    let settings = EngineSettings::default();
    let generator = BookingSlotGenerator::new(&settings);

    assert_eq!(generator.slots(day().succ_opt().unwrap(), at(22, 45)).len(), 27);
    assert!(generator.slots(day().pred_opt().unwrap(), at(9, 0)).is_empty());
}

#[test]
fn slots_never_run_past_midnight() {
    let settings = EngineSettings { slot_last_start: t(23, 30), ..EngineSettings::default() };
    let slots = BookingSlotGenerator::new(&settings).slots(day(), at(9, 0));

    assert_eq!(slots.last(), Some(&slot(23, 0)));
}

#[test]
fn thresholds_past_the_calendar_end_the_walk() {
    let huge = TimeDelta::days(100_000_000);

    let settings = EngineSettings { slot_step: huge, ..EngineSettings::default() };
    assert_eq!(BookingSlotGenerator::new(&settings).slots(day(), at(9, 0)), vec![slot(10, 0)]);

    let settings = EngineSettings { slot_length: huge, ..EngineSettings::default() };
    assert!(BookingSlotGenerator::new(&settings).slots(day(), at(9, 0)).is_empty());

    let settings = EngineSettings { slot_past_buffer: huge, ..EngineSettings::default() };
    assert_eq!(BookingSlotGenerator::new(&settings).slots(day(), at(15, 0)).len(), 27);
}

#[test]
fn previous_choice_survives_while_offered() {
    let settings = EngineSettings::default();
    let slots = BookingSlotGenerator::new(&settings).slots(day(), at(22, 45));

    assert_eq!(reselect(Some(&slot(23, 0)), &slots), Some(slot(23, 0)));
    assert_eq!(reselect(Some(&slot(12, 0)), &slots), Some(slot(23, 0)));
    assert_eq!(reselect(None, &[]), None);
}

#[test]
fn labels_parse_back_into_slots() {
    assert_eq!(TimeSlot::parse("11:00 PM - 12:00 AM"), Some(slot(23, 0)));
    assert_eq!(TimeSlot::parse("10:30 AM - 11:30 AM"), Some(slot(10, 30)));
    assert_eq!(TimeSlot::parse("whenever"), None);
}

#[test]
fn booking_draft_is_checked_against_the_offered_slots() {
    let settings = EngineSettings::default();
    let options = GamingCatalog::default_lounge();
    let generator = BookingSlotGenerator::new(&settings);

    assert_eq!(draft(Some(slot(18, 0))).validate(&options, &generator, at(12, 0)), Ok(slot(18, 0)));
    assert_eq!(draft(None).validate(&options, &generator, at(12, 0)), Err(ValidationError::MissingField("time slot")));
    assert_eq!(draft(Some(slot(11, 0))).validate(&options, &generator, at(12, 0)), Err(ValidationError::PastBookingSlot));
    assert_eq!(
        draft(Some(slot(9, 0))).validate(&options, &generator, at(8, 0)),
        Err(ValidationError::SlotNotOffered("9:00 AM - 10:00 AM".to_string(), day()))
    );

    let no_players = BookingDraft { num_players: 0, ..draft(Some(slot(18, 0))) };
    assert_eq!(no_players.validate(&options, &generator, at(12, 0)), Err(ValidationError::InvalidPlayerCount));

    let bad_mobile = BookingDraft { mobile_number: "12345".to_string(), ..draft(Some(slot(18, 0))) };
    assert_eq!(bad_mobile.validate(&options, &generator, at(12, 0)), Err(ValidationError::InvalidMobileNumber));
}

#[test]
fn bookings_sort_by_date_then_slot() {
    let settings = EngineSettings::default();
    let options = GamingCatalog::default_lounge();
    let generator = BookingSlotGenerator::new(&settings);

    let tomorrow_morning =
        BookingDraft { booking_date: day().succ_opt().unwrap(), ..draft(Some(slot(10, 0))) }.validate_into(&options, &generator, at(9, 0)).unwrap();
    let tonight = draft(Some(slot(21, 0))).validate_into(&options, &generator, at(9, 0)).unwrap();
    let this_afternoon = draft(Some(slot(14, 30))).validate_into(&options, &generator, at(9, 0)).unwrap();

    let mut bookings = vec![tomorrow_morning.clone(), tonight.clone(), this_afternoon.clone()];
    sort_chronologically(&mut bookings);

    assert_eq!(bookings, vec![this_afternoon, tonight, tomorrow_morning]);
}
