pub mod advance_booking;
pub mod slot_generator;
pub mod time_slot;
