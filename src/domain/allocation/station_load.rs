use std::collections::HashSet;

use crate::domain::utils::id::SessionId;

/// Which gaming option a station is currently running.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostedOption {
    Vacant,
    Hosting(String),
    /// Two different options share the station. It takes no new sessions until it empties.
    Mixed,
}

impl HostedOption {
    fn with(self, option: &str) -> HostedOption {
        match self {
            HostedOption::Vacant => HostedOption::Hosting(option.to_string()),
            HostedOption::Hosting(current) if current == option => HostedOption::Hosting(current),
            _ => HostedOption::Mixed,
        }
    }
}

/// Slots occupied on one station by the sessions currently running on it.
#[derive(Debug, Clone)]
pub struct StationLoad {
    /// Sum of the slots consumed by the counted sessions.
    pub load: u32,

    /// Physical capacity of the station, constant.
    pub capacity: u32,

    pub hosted: HostedOption,

    /// Sessions counted in `load`.
    pub session_ids: HashSet<SessionId>,
}

impl StationLoad {
    pub fn new(capacity: u32) -> Self {
        StationLoad { load: 0, capacity, hosted: HostedOption::Vacant, session_ids: HashSet::new() }
    }

    pub fn available(&self) -> u32 {
        self.capacity.saturating_sub(self.load)
    }

    /// Counts a running session on this station.
    ///
    /// The load is recorded even beyond capacity because it describes sessions that already exist.
    /// Returns `false` for a session that was already counted.
    pub fn record_session(&mut self, session_id: &SessionId, option: &str, slots: u32) -> bool {
        if !self.session_ids.insert(session_id.clone()) {
            log::warn!("Session {} was counted twice on the same station. Load was not updated.", session_id);
            return false;
        }

        self.load += slots;
        self.hosted = std::mem::replace(&mut self.hosted, HostedOption::Vacant).with(option);

        if self.load > self.capacity {
            log::warn!("Station load {} exceeds its capacity {} after counting session {}.", self.load, self.capacity, session_id);
        }

        true
    }

    pub fn hosts(&self, session_id: &SessionId) -> bool {
        self.session_ids.contains(session_id)
    }

    pub fn is_vacant(&self) -> bool {
        self.session_ids.is_empty()
    }
}
