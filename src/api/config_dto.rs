use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::catalog::station::StationKind;

/// Lounge configuration file. Every section may be left out, the built-in lounge is used instead.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoungeConfigDto {
    pub stations: Option<Vec<StationDto>>,
    pub gaming_options: Option<Vec<GamingOptionDto>>,
    pub beverages: Option<Vec<FixedBeverageDto>>,
    pub settings: EngineSettingsDto,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id: String,
    pub kind: StationKind,
    /// Ignored for single occupancy stations.
    pub capacity: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GamingOptionDto {
    pub name: String,
    pub hourly_rate: Decimal,
    pub slots_consumed: u32,
    pub station_kind: Option<StationKind>,
    #[serde(default)]
    pub variable_rate: bool,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct FixedBeverageDto {
    pub name: String,
    pub price: Decimal,
}

/// Thresholds in whole minutes or seconds, as named. Times of day use `HH:MM`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineSettingsDto {
    pub critical_window_minutes: Option<i64>,
    pub final_window_seconds: Option<i64>,
    pub occupancy_grace_minutes: Option<i64>,
    pub recently_finished_minutes: Option<i64>,
    pub edit_lock_minutes: Option<i64>,
    pub default_planned_duration_minutes: Option<i64>,
    pub expiry_alert_seconds: Option<i64>,
    pub booking_reminder_seconds: Option<i64>,
    pub reminder_lead_minutes: Option<i64>,
    pub reminder_tail_minutes: Option<i64>,
    pub slot_opening: Option<String>,
    pub slot_last_start: Option<String>,
    pub slot_step_minutes: Option<i64>,
    pub slot_length_minutes: Option<i64>,
    pub slot_past_buffer_minutes: Option<i64>,
    pub upcoming_booking_horizon_minutes: Option<i64>,
}
