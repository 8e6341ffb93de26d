use crate::domain::lounge::config::LoungeConfig;
use crate::domain::lounge::snapshot::LoungeSnapshot;
use crate::error::Result;

pub mod api;
pub mod domain;
pub mod error;
pub mod loader;
pub mod logger;

/// Loads the lounge configuration, or the built-in lounge when no file is given.
pub fn load_config(file_path: Option<&str>) -> Result<LoungeConfig> {
    match file_path {
        Some(path) => LoungeConfig::load(path),
        None => {
            log::info!("No configuration file given, using the built-in lounge.");
            Ok(LoungeConfig::default())
        }
    }
}

/// Loads a stored snapshot of sessions, bookings and admin-added beverages.
pub fn load_snapshot(file_path: &str, config: &LoungeConfig) -> Result<LoungeSnapshot> {
    let snapshot = LoungeSnapshot::load(file_path, &config.beverages)?;
    log::info!("Snapshot '{}' loaded: {} sessions, {} bookings.", file_path, snapshot.sessions.len(), snapshot.bookings.len());

    Ok(snapshot)
}
