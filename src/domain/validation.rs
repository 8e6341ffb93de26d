use chrono::NaiveDate;
use thiserror::Error;

use crate::domain::utils::id::{BookingId, SessionId, StationId};

/// Recoverable rejection of a user supplied draft. The message is shown to the operator as is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in the {0} field")]
    MissingField(&'static str),

    #[error("Mobile number must be exactly 10 digits")]
    InvalidMobileNumber,

    #[error("Duration must be greater than zero")]
    NonPositiveDuration,

    #[error("Duration must be shorter than 24 hours")]
    DurationTooLong,

    #[error("A custom hourly rate greater than zero is required for {0}")]
    InvalidCustomRate(String),

    #[error("Unknown gaming option '{0}'")]
    UnknownGamingOption(String),

    #[error("No session with id {0}")]
    UnknownSession(SessionId),

    #[error("No booking with id {0}")]
    UnknownBooking(BookingId),

    #[error("Station {station} is not available for {option}")]
    StationUnavailable { station: StationId, option: String },

    #[error("Cannot book a time slot that has already passed")]
    PastBookingSlot,

    #[error("Time slot '{0}' is not offered on {1}")]
    SlotNotOffered(String, NaiveDate),

    #[error("Number of players must be at least 1")]
    InvalidPlayerCount,

    #[error("'{0}' is already a standard beverage")]
    ReservedBeverageName(String),

    #[error("A beverage named '{0}' already exists")]
    DuplicateBeverageName(String),

    #[error("Beverage price must be greater than zero")]
    InvalidBeveragePrice,
}

/// Accepts exactly ten ASCII digits and nothing else.
pub fn validate_mobile_number(mobile_number: &str) -> Result<(), ValidationError> {
    if mobile_number.len() == 10 && mobile_number.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidMobileNumber)
    }
}

/// Trims `value` and rejects it when nothing is left.
pub fn require<'a>(value: &'a str, field: &'static str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() { Err(ValidationError::MissingField(field)) } else { Ok(trimmed) }
}
