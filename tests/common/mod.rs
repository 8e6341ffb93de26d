#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use lounge_scheduler::domain::catalog::beverage::BeverageSelections;
use lounge_scheduler::domain::clock::clock_mock::MockClock;
use lounge_scheduler::domain::lounge::config::LoungeConfig;
use lounge_scheduler::domain::lounge::engine::LoungeEngine;
use lounge_scheduler::domain::session::session::{PaymentMethod, Session, compute_exit_time};
use lounge_scheduler::domain::utils::id::{SessionId, StationId};

pub fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 29).unwrap()
}

pub fn t(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn at(h: u32, m: u32) -> NaiveDateTime {
    day().and_time(t(h, m))
}

pub fn at_s(h: u32, m: u32, s: u32) -> NaiveDateTime {
    day().and_hms_opt(h, m, s).unwrap()
}

/// Session of the default lounge on `day()`, prices left at zero.
pub fn session(id: &str, serial_number: u32, option: &str, station: &str, entry: NaiveTime, minutes: u32) -> Session {
    Session {
        id: SessionId::new(id),
        serial_number,
        date: day(),
        customer_name: format!("Customer {}", id),
        mobile_number: "9876543210".to_string(),
        gaming_option: option.to_string(),
        station: Some(StationId::new(station)),
        entry_time: entry,
        exit_time: compute_exit_time(entry, minutes),
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

pub fn engine_at(now: NaiveDateTime) -> (LoungeEngine, MockClock) {
    let clock = MockClock::new(now);
    (LoungeEngine::new(LoungeConfig::default(), clock.shared()), clock)
}
