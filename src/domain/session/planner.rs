use chrono::NaiveDateTime;
use rust_decimal::Decimal;

use crate::domain::allocation::station_allocator::StationAllocator;
use crate::domain::catalog::beverage::{BeverageCatalog, BeverageSelections};
use crate::domain::catalog::gaming_option::{GamingCatalog, GamingOptionSpec};
use crate::domain::catalog::station::StationCatalog;
use crate::domain::pricing::pricing_engine::{PriceBreakdown, PricingEngine, hours_from_minutes};
use crate::domain::session::draft::{DurationChoice, SessionDraft, SessionEdit};
use crate::domain::session::session::{Session, compute_exit_time, next_serial};
use crate::domain::settings::EngineSettings;
use crate::domain::utils::id::{SessionId, StationId};
use crate::domain::validation::{ValidationError, require, validate_mobile_number};

/// Turns validated operator input into sessions, computing exit time and prices.
#[derive(Debug, Clone, Copy)]
pub struct SessionPlanner<'a> {
    stations: &'a StationCatalog,
    options: &'a GamingCatalog,
    beverages: &'a BeverageCatalog,
    settings: &'a EngineSettings,
}

impl<'a> SessionPlanner<'a> {
    pub fn new(stations: &'a StationCatalog, options: &'a GamingCatalog, beverages: &'a BeverageCatalog, settings: &'a EngineSettings) -> Self {
        SessionPlanner { stations, options, beverages, settings }
    }

    fn allocator(&self) -> StationAllocator<'a> {
        StationAllocator::new(self.stations, self.options, self.settings)
    }

    /// Validates a draft against the live sessions and builds the new session dated `now`.
    pub fn create(&self, draft: &SessionDraft, sessions: &[Session], now: NaiveDateTime) -> Result<Session, ValidationError> {
        let customer_name = require(&draft.customer_name, "name")?;
        let mobile_number = require(&draft.mobile_number, "mobile number")?;
        let entry_time = draft.entry_time.ok_or(ValidationError::MissingField("entry time"))?;

        let (spec, station, duration_minutes, custom_hourly_rate) =
            self.validate_terms(&draft.gaming_option, draft.station.as_ref(), &draft.duration, draft.custom_hourly_rate, sessions, now, None)?;

        validate_mobile_number(mobile_number)?;

        let beverages = without_empty_lines(&draft.beverages);
        let price = self.price(spec, duration_minutes, custom_hourly_rate, draft.discount_applied, &beverages);
        let date = now.date();

        let session = Session {
            id: SessionId::generate(),
            serial_number: next_serial(sessions, date),
            date,
            customer_name: customer_name.to_string(),
            mobile_number: mobile_number.to_string(),
            gaming_option: spec.name.clone(),
            station: Some(station),
            entry_time,
            exit_time: compute_exit_time(entry_time, duration_minutes),
            duration_minutes,
            discount_applied: draft.discount_applied,
            custom_hourly_rate,
            beverages,
            gaming_price: price.gaming,
            beverage_price: price.beverage,
            total: price.total,
            payment_method: draft.payment_method.clone(),
            note: draft.note.as_deref().map(str::trim).filter(|note| !note.is_empty()).map(str::to_string),
            redemption: None,
        };

        log::info!(
            "Session #{} created for {} on {} ({}, {} min, total {}).",
            session.serial_number,
            session.customer_name,
            station_label(session.station.as_ref()),
            session.gaming_option,
            session.duration_minutes,
            session.total
        );

        Ok(session)
    }

    /// Applies a whole-session edit. The session's own load is not counted against the new station.
    pub fn edit(&self, session: &Session, edit: &SessionEdit, sessions: &[Session], now: NaiveDateTime) -> Result<Session, ValidationError> {
        let (spec, station, duration_minutes, custom_hourly_rate) =
            self.validate_terms(&edit.gaming_option, edit.station.as_ref(), &edit.duration, edit.custom_hourly_rate, sessions, now, Some(session))?;

        let beverages = without_empty_lines(&edit.beverages);
        let price = self.price(spec, duration_minutes, custom_hourly_rate, edit.discount_applied, &beverages);

        let mut updated = session.clone();
        updated.gaming_option = spec.name.clone();
        updated.station = Some(station);
        updated.duration_minutes = duration_minutes;
        updated.exit_time = compute_exit_time(session.entry_time, duration_minutes);
        updated.discount_applied = edit.discount_applied;
        updated.custom_hourly_rate = custom_hourly_rate;
        updated.beverages = beverages;
        updated.gaming_price = price.gaming;
        updated.beverage_price = price.beverage;
        updated.total = price.total;
        updated.payment_method = edit.payment_method.clone();

        log::info!("Session #{} of {} updated, new total {}.", updated.serial_number, updated.customer_name, updated.total);

        Ok(updated)
    }

    #[allow(clippy::too_many_arguments)]
    fn validate_terms(
        &self,
        option: &str,
        station: Option<&StationId>,
        duration: &DurationChoice,
        custom_hourly_rate: Option<Decimal>,
        sessions: &[Session],
        now: NaiveDateTime,
        editing: Option<&Session>,
    ) -> Result<(&'a GamingOptionSpec, StationId, u32, Option<Decimal>), ValidationError> {
        let spec = self.options.get(option).ok_or_else(|| ValidationError::UnknownGamingOption(option.to_string()))?;
        let station = station.ok_or(ValidationError::MissingField("station"))?;

        self.allocator().check_station(option, station, sessions, now, editing)?;

        let duration_minutes = duration.minutes()?;

        let custom_hourly_rate = if spec.variable_rate {
            match custom_hourly_rate {
                Some(rate) if rate > Decimal::ZERO && rate.checked_mul(hours_from_minutes(duration_minutes)).is_some() => Some(rate),
                _ => return Err(ValidationError::InvalidCustomRate(spec.name.clone())),
            }
        } else {
            None
        };

        Ok((spec, station.clone(), duration_minutes, custom_hourly_rate))
    }

    fn price(&self, spec: &GamingOptionSpec, minutes: u32, custom_rate: Option<Decimal>, discount: bool, beverages: &BeverageSelections) -> PriceBreakdown {
        PricingEngine::new(self.options, self.beverages).quote(&spec.name, hours_from_minutes(minutes), custom_rate, discount, beverages)
    }
}

fn without_empty_lines(selections: &BeverageSelections) -> BeverageSelections {
    selections.iter().filter(|(_, quantity)| **quantity > 0).map(|(key, quantity)| (key.clone(), *quantity)).collect()
}

fn station_label(station: Option<&StationId>) -> &str {
    station.map(StationId::as_str).unwrap_or("no station")
}
