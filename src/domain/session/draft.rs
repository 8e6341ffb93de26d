use chrono::{NaiveTime, TimeDelta};
use rust_decimal::prelude::*;

use crate::domain::catalog::beverage::BeverageSelections;
use crate::domain::session::session::PaymentMethod;
use crate::domain::utils::id::StationId;
use crate::domain::validation::ValidationError;

/// Durations offered in the session form, in minutes.
pub const PRESET_DURATIONS: [u32; 6] = [60, 120, 180, 240, 300, 360];

const MINUTES_PER_DAY: u32 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DurationChoice {
    Preset(u32),
    /// Free-form duration entered in hours, e.g. `1.5`.
    CustomHours(Decimal),
}

impl DurationChoice {
    /// Length in whole minutes, rounded to the nearest minute.
    pub fn minutes(&self) -> Result<u32, ValidationError> {
        let minutes = match self {
            DurationChoice::Preset(minutes) => *minutes,
            DurationChoice::CustomHours(hours) => {
                if *hours <= Decimal::ZERO {
                    return Err(ValidationError::NonPositiveDuration);
                }

                hours.checked_mul(Decimal::from(60)).and_then(|minutes| minutes.round().to_u32()).ok_or(ValidationError::DurationTooLong)?
            }
        };

        if minutes == 0 {
            return Err(ValidationError::NonPositiveDuration);
        }

        if minutes >= MINUTES_PER_DAY {
            return Err(ValidationError::DurationTooLong);
        }

        Ok(minutes)
    }
}

/// Recovers the form choice for a stored session from its entry and exit times of day.
pub fn duration_choice_from_times(entry: NaiveTime, exit: NaiveTime) -> DurationChoice {
    let span = if exit < entry { exit - entry + TimeDelta::days(1) } else { exit - entry };

    let minutes = span.num_minutes();

    match PRESET_DURATIONS.iter().find(|preset| i64::from(**preset) == minutes) {
        Some(preset) => DurationChoice::Preset(*preset),
        None => DurationChoice::CustomHours(Decimal::from(minutes) / Decimal::from(60)),
    }
}

/// Everything the operator enters to start a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDraft {
    pub customer_name: String,
    pub mobile_number: String,
    pub gaming_option: String,
    pub station: Option<StationId>,
    pub entry_time: Option<NaiveTime>,
    pub duration: DurationChoice,
    pub discount_applied: bool,
    pub custom_hourly_rate: Option<Decimal>,
    pub beverages: BeverageSelections,
    pub payment_method: PaymentMethod,
    pub note: Option<String>,
}

impl SessionDraft {
    pub fn new(customer_name: &str, mobile_number: &str, gaming_option: &str) -> Self {
        SessionDraft {
            customer_name: customer_name.to_string(),
            mobile_number: mobile_number.to_string(),
            gaming_option: gaming_option.to_string(),
            station: None,
            entry_time: None,
            duration: DurationChoice::Preset(PRESET_DURATIONS[0]),
            discount_applied: false,
            custom_hourly_rate: None,
            beverages: BeverageSelections::new(),
            payment_method: PaymentMethod::Cash,
            note: None,
        }
    }

    pub fn at_station(mut self, station: &str) -> Self {
        self.station = Some(StationId::new(station));
        self
    }

    pub fn entering_at(mut self, entry_time: NaiveTime) -> Self {
        self.entry_time = Some(entry_time);
        self
    }

    pub fn lasting(mut self, duration: DurationChoice) -> Self {
        self.duration = duration;
        self
    }
}

/// Whole-session edit. The entry time is kept, everything derived from these fields is recomputed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEdit {
    pub gaming_option: String,
    pub station: Option<StationId>,
    pub duration: DurationChoice,
    pub discount_applied: bool,
    pub custom_hourly_rate: Option<Decimal>,
    pub beverages: BeverageSelections,
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn custom_hours_convert_to_minutes() {
        assert_eq!(DurationChoice::CustomHours(Decimal::new(15, 1)).minutes(), Ok(90));
        assert_eq!(DurationChoice::CustomHours(Decimal::new(3333, 4)).minutes(), Ok(20));
        assert_eq!(DurationChoice::CustomHours(Decimal::ZERO).minutes(), Err(ValidationError::NonPositiveDuration));
        assert_eq!(DurationChoice::CustomHours(Decimal::from(24)).minutes(), Err(ValidationError::DurationTooLong));
        assert_eq!(DurationChoice::Preset(0).minutes(), Err(ValidationError::NonPositiveDuration));
    }

    #[test]
    fn recovers_presets_across_midnight() {
        assert_eq!(duration_choice_from_times(t(23, 0), t(1, 0)), DurationChoice::Preset(120));
        assert_eq!(duration_choice_from_times(t(10, 0), t(11, 30)), DurationChoice::CustomHours(Decimal::new(15, 1)));
    }
}
