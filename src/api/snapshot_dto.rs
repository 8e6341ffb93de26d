use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Live entity collections as the host stores them.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoungeSnapshotDto {
    pub sessions: Vec<SessionDto>,
    pub advance_bookings: Vec<AdvanceBookingDto>,
    pub beverages: Vec<DynamicBeverageDto>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDto {
    pub id: String,
    pub serial_number: u32,
    /// `YYYY-MM-DD`
    pub date: String,
    pub name: String,
    pub mobile_number: String,
    pub gaming_option: String,
    #[serde(default)]
    pub station_number: Option<String>,
    /// `HH:MM`
    pub entry_time: String,
    /// `HH:MM`, earlier than `entry_time` when the session runs past midnight.
    pub out_time: String,
    /// Custom durations are stored as fractional hours times sixty, so this may carry a fraction.
    #[serde(default)]
    pub duration_minutes: f64,
    #[serde(default)]
    pub is_discount_applied: bool,
    #[serde(default)]
    pub custom_hourly_rate: Option<Decimal>,
    #[serde(default)]
    pub beverages: BTreeMap<String, u32>,
    #[serde(default)]
    pub gaming_pricing: Decimal,
    #[serde(default)]
    pub beverage_pricing: Decimal,
    #[serde(default)]
    pub total_bill: Decimal,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub redemption_token: Option<String>,
    #[serde(default)]
    pub is_redeemed: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvanceBookingDto {
    pub id: String,
    pub name: String,
    pub mobile_number: String,
    pub num_players: u32,
    pub gaming_option: String,
    /// Label such as `10:00 AM - 11:00 AM`.
    pub time_slot: String,
    /// `YYYY-MM-DD`
    pub booking_date: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DynamicBeverageDto {
    pub id: String,
    pub name: String,
    pub price: Decimal,
}
