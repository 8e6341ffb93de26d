pub mod beverage;
pub mod gaming_option;
pub mod station;
