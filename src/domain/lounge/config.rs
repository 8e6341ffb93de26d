use chrono::{NaiveTime, TimeDelta};
use rust_decimal::Decimal;

use crate::api::config_dto::{EngineSettingsDto, LoungeConfigDto};
use crate::domain::catalog::beverage::{BeverageCatalog, FixedBeverage};
use crate::domain::catalog::gaming_option::{GamingCatalog, GamingOptionSpec};
use crate::domain::catalog::station::{Station, StationCatalog, StationKind};
use crate::domain::settings::EngineSettings;
use crate::domain::utils::time_format::parse_hhmm;
use crate::error::{Error, Result};
use crate::loader::parser::parse_json_file;

/// Validated catalogs and thresholds the engine runs with.
#[derive(Debug, Clone, Default)]
pub struct LoungeConfig {
    pub stations: StationCatalog,
    pub gaming_options: GamingCatalog,
    pub beverages: BeverageCatalog,
    pub settings: EngineSettings,
}

impl LoungeConfig {
    pub fn load(file_path: &str) -> Result<Self> {
        let dto: LoungeConfigDto = parse_json_file(file_path)?;
        let config = Self::from_dto(dto)?;

        log::info!(
            "Lounge configuration loaded from '{}': {} stations, {} gaming options.",
            file_path,
            config.stations.len(),
            config.gaming_options.iter().count()
        );

        Ok(config)
    }

    pub fn from_dto(dto: LoungeConfigDto) -> Result<Self> {
        let stations = match dto.stations {
            Some(stations) => {
                let mut converted = Vec::with_capacity(stations.len());
                for station in stations {
                    let station = match station.kind {
                        StationKind::SingleOccupancy => Station::single(station.id),
                        StationKind::Shared => match station.capacity {
                            Some(capacity) if capacity > 0 => Station::shared(station.id, capacity),
                            _ => return Err(Error::InvalidConfigError(format!("shared station '{}' needs a capacity above zero", station.id))),
                        },
                    };

                    if converted.iter().any(|existing: &Station| existing.id == station.id) {
                        return Err(Error::InvalidConfigError(format!("station '{}' is listed twice", station.id)));
                    }
                    converted.push(station);
                }
                StationCatalog::new(converted)
            }
            None => StationCatalog::default_lounge(),
        };

        let gaming_options = match dto.gaming_options {
            Some(options) => {
                let mut converted = Vec::with_capacity(options.len());
                for option in options {
                    if option.hourly_rate < Decimal::ZERO {
                        return Err(Error::InvalidConfigError(format!("gaming option '{}' has a negative rate", option.name)));
                    }
                    if converted.iter().any(|existing: &GamingOptionSpec| existing.name == option.name) {
                        return Err(Error::InvalidConfigError(format!("gaming option '{}' is listed twice", option.name)));
                    }
                    converted.push(GamingOptionSpec {
                        name: option.name,
                        hourly_rate: option.hourly_rate,
                        slots_consumed: option.slots_consumed,
                        station_kind: option.station_kind,
                        variable_rate: option.variable_rate,
                    });
                }
                GamingCatalog::new(converted)
            }
            None => GamingCatalog::default_lounge(),
        };

        let beverages = match dto.beverages {
            Some(beverages) => BeverageCatalog::new(beverages.into_iter().map(|b| FixedBeverage { name: b.name, price: b.price }).collect()),
            None => BeverageCatalog::default_lounge(),
        };

        let settings = settings_from_dto(dto.settings)?;
        settings.validate().map_err(Error::InvalidConfigError)?;

        Ok(LoungeConfig { stations, gaming_options, beverages, settings })
    }
}

fn settings_from_dto(dto: EngineSettingsDto) -> Result<EngineSettings> {
    let defaults = EngineSettings::default();
    let minutes = |value: Option<i64>, field: &str, fallback: TimeDelta| threshold(value, field, "minutes", TimeDelta::try_minutes, fallback);
    let seconds = |value: Option<i64>, field: &str, fallback: TimeDelta| threshold(value, field, "seconds", TimeDelta::try_seconds, fallback);

    Ok(EngineSettings {
        critical_window: minutes(dto.critical_window_minutes, "criticalWindowMinutes", defaults.critical_window)?,
        final_window: seconds(dto.final_window_seconds, "finalWindowSeconds", defaults.final_window)?,
        occupancy_grace: minutes(dto.occupancy_grace_minutes, "occupancyGraceMinutes", defaults.occupancy_grace)?,
        recently_finished_window: minutes(dto.recently_finished_minutes, "recentlyFinishedMinutes", defaults.recently_finished_window)?,
        edit_lock_window: minutes(dto.edit_lock_minutes, "editLockMinutes", defaults.edit_lock_window)?,
        default_planned_duration: minutes(dto.default_planned_duration_minutes, "defaultPlannedDurationMinutes", defaults.default_planned_duration)?,
        expiry_alert_display: seconds(dto.expiry_alert_seconds, "expiryAlertSeconds", defaults.expiry_alert_display)?,
        booking_reminder_display: seconds(dto.booking_reminder_seconds, "bookingReminderSeconds", defaults.booking_reminder_display)?,
        reminder_lead: minutes(dto.reminder_lead_minutes, "reminderLeadMinutes", defaults.reminder_lead)?,
        reminder_tail: minutes(dto.reminder_tail_minutes, "reminderTailMinutes", defaults.reminder_tail)?,
        slot_opening: time_of_day(dto.slot_opening.as_deref(), "slotOpening", defaults.slot_opening)?,
        slot_last_start: time_of_day(dto.slot_last_start.as_deref(), "slotLastStart", defaults.slot_last_start)?,
        slot_step: minutes(dto.slot_step_minutes, "slotStepMinutes", defaults.slot_step)?,
        slot_length: minutes(dto.slot_length_minutes, "slotLengthMinutes", defaults.slot_length)?,
        slot_past_buffer: minutes(dto.slot_past_buffer_minutes, "slotPastBufferMinutes", defaults.slot_past_buffer)?,
        upcoming_booking_horizon: minutes(dto.upcoming_booking_horizon_minutes, "upcomingBookingHorizonMinutes", defaults.upcoming_booking_horizon)?,
    })
}

fn threshold(value: Option<i64>, field: &str, unit: &str, convert: fn(i64) -> Option<TimeDelta>, fallback: TimeDelta) -> Result<TimeDelta> {
    match value {
        Some(raw) => convert(raw).ok_or_else(|| Error::InvalidConfigError(format!("{} is out of range, got {} {}", field, raw, unit))),
        None => Ok(fallback),
    }
}

fn time_of_day(value: Option<&str>, field: &str, fallback: NaiveTime) -> Result<NaiveTime> {
    match value {
        Some(raw) => parse_hhmm(raw).ok_or_else(|| Error::InvalidConfigError(format!("{} must be HH:MM, got '{}'", field, raw))),
        None => Ok(fallback),
    }
}
