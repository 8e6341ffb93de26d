use chrono::NaiveDate;
use rust_decimal::prelude::*;

use crate::api::snapshot_dto::{AdvanceBookingDto, DynamicBeverageDto, LoungeSnapshotDto, SessionDto};
use crate::domain::booking::advance_booking::AdvanceBooking;
use crate::domain::booking::time_slot::TimeSlot;
use crate::domain::catalog::beverage::{BeverageCatalog, BeverageSelections, DynamicBeverage};
use crate::domain::session::session::{PaymentMethod, Redemption, Session};
use crate::domain::utils::id::{BeverageId, BookingId, SessionId, StationId};
use crate::domain::utils::time_format::{format_hhmm, parse_hhmm};
use crate::error::{Error, Result};
use crate::loader::parser::parse_json_file;

/// The host's current entity collections. Replaced as a whole between ticks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoungeSnapshot {
    pub sessions: Vec<Session>,
    pub bookings: Vec<AdvanceBooking>,
    pub dynamic_beverages: Vec<DynamicBeverage>,
}

impl LoungeSnapshot {
    pub fn load(file_path: &str, standard_beverages: &BeverageCatalog) -> Result<Self> {
        let dto: LoungeSnapshotDto = parse_json_file(file_path)?;
        Self::from_dto(dto, standard_beverages)
    }

    /// Converts stored records. Beverage keys are resolved against `standard_beverages`, anything
    /// that is not a standard name is taken as the id of an admin-added item.
    pub fn from_dto(dto: LoungeSnapshotDto, standard_beverages: &BeverageCatalog) -> Result<Self> {
        let dynamic_beverages: Vec<DynamicBeverage> = dto.beverages.into_iter().map(DynamicBeverage::from).collect();
        let catalog = standard_beverages.clone().with_dynamic(dynamic_beverages.clone());

        let sessions = dto.sessions.into_iter().map(|session| session_from_dto(session, &catalog)).collect::<Result<Vec<_>>>()?;
        let bookings = dto.advance_bookings.into_iter().map(AdvanceBooking::try_from).collect::<Result<Vec<_>>>()?;

        log::debug!("Snapshot converted: {} sessions, {} bookings, {} dynamic beverages.", sessions.len(), bookings.len(), dynamic_beverages.len());

        Ok(LoungeSnapshot { sessions, bookings, dynamic_beverages })
    }
}

fn parse_date(value: &str, record: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|e| Error::SnapshotConversionError(format!("{}: invalid date '{}': {}", record, value, e)))
}

fn session_from_dto(dto: SessionDto, catalog: &BeverageCatalog) -> Result<Session> {
    let record = format!("session {}", dto.id);

    let entry_time =
        parse_hhmm(&dto.entry_time).ok_or_else(|| Error::SnapshotConversionError(format!("{}: invalid entry time '{}'", record, dto.entry_time)))?;
    let exit_time =
        parse_hhmm(&dto.out_time).ok_or_else(|| Error::SnapshotConversionError(format!("{}: invalid out time '{}'", record, dto.out_time)))?;

    let duration_minutes = Decimal::from_f64(dto.duration_minutes.round())
        .and_then(|minutes| minutes.to_u32())
        .ok_or_else(|| Error::SnapshotConversionError(format!("{}: invalid duration {}", record, dto.duration_minutes)))?;

    let beverages: BeverageSelections =
        dto.beverages.iter().filter(|(_, quantity)| **quantity > 0).map(|(raw, quantity)| (catalog.resolve_key(raw), *quantity)).collect();

    let redemption = dto.redemption_token.map(|token| Redemption { token, redeemed: dto.is_redeemed.unwrap_or(false) });

    Ok(Session {
        id: SessionId::new(dto.id),
        serial_number: dto.serial_number,
        date: parse_date(&dto.date, &record)?,
        customer_name: dto.name,
        mobile_number: dto.mobile_number,
        gaming_option: dto.gaming_option,
        station: dto.station_number.filter(|station| !station.trim().is_empty()).map(StationId::new),
        entry_time,
        exit_time,
        duration_minutes,
        discount_applied: dto.is_discount_applied,
        custom_hourly_rate: dto.custom_hourly_rate,
        beverages,
        gaming_price: dto.gaming_pricing,
        beverage_price: dto.beverage_pricing,
        total: dto.total_bill,
        payment_method: PaymentMethod::parse(&dto.payment_method),
        note: dto.notes.filter(|note| !note.trim().is_empty()),
        redemption,
    })
}

impl TryFrom<AdvanceBookingDto> for AdvanceBooking {
    type Error = Error;

    fn try_from(dto: AdvanceBookingDto) -> Result<Self> {
        let record = format!("booking {}", dto.id);
        let time_slot = TimeSlot::parse(&dto.time_slot)
            .ok_or_else(|| Error::SnapshotConversionError(format!("{}: invalid time slot '{}'", record, dto.time_slot)))?;

        Ok(AdvanceBooking {
            booking_date: parse_date(&dto.booking_date, &record)?,
            id: BookingId::new(dto.id),
            time_slot,
            customer_name: dto.name,
            mobile_number: dto.mobile_number,
            num_players: dto.num_players,
            gaming_option: dto.gaming_option,
        })
    }
}

impl From<DynamicBeverageDto> for DynamicBeverage {
    fn from(dto: DynamicBeverageDto) -> Self {
        DynamicBeverage { id: BeverageId::new(dto.id), name: dto.name, price: dto.price }
    }
}

impl From<&Session> for SessionDto {
    fn from(session: &Session) -> Self {
        SessionDto {
            id: session.id.to_string(),
            serial_number: session.serial_number,
            date: session.date.format("%Y-%m-%d").to_string(),
            name: session.customer_name.clone(),
            mobile_number: session.mobile_number.clone(),
            gaming_option: session.gaming_option.clone(),
            station_number: session.station.as_ref().map(StationId::to_string),
            entry_time: format_hhmm(session.entry_time),
            out_time: format_hhmm(session.exit_time),
            duration_minutes: f64::from(session.duration_minutes),
            is_discount_applied: session.discount_applied,
            custom_hourly_rate: session.custom_hourly_rate,
            beverages: session.beverages.iter().map(|(key, quantity)| (key.raw().to_string(), *quantity)).collect(),
            gaming_pricing: session.gaming_price,
            beverage_pricing: session.beverage_price,
            total_bill: session.total,
            payment_method: session.payment_method.to_string(),
            notes: session.note.clone(),
            redemption_token: session.redemption.as_ref().map(|redemption| redemption.token.clone()),
            is_redeemed: session.redemption.as_ref().map(|redemption| redemption.redeemed),
        }
    }
}
