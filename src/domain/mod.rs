pub mod allocation;
pub mod booking;
pub mod catalog;
pub mod clock;
pub mod lounge;
pub mod notification;
pub mod pricing;
pub mod session;
pub mod settings;
pub mod utils;
pub mod validation;
