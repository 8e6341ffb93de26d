pub mod config;
pub mod engine;
pub mod snapshot;
pub mod views;
