use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use crate::domain::allocation::station_load::{HostedOption, StationLoad};
use crate::domain::catalog::gaming_option::{GamingCatalog, GamingOptionSpec};
use crate::domain::catalog::station::{Station, StationCatalog, StationKind};
use crate::domain::session::session::Session;
use crate::domain::session::status::evaluate_status;
use crate::domain::settings::EngineSettings;
use crate::domain::utils::id::StationId;
use crate::domain::validation::ValidationError;

/// Load of every station in the catalog at one instant.
#[derive(Debug, Clone)]
pub struct Occupancy {
    pub loads: BTreeMap<StationId, StationLoad>,
}

impl Occupancy {
    pub fn load(&self, station: &StationId) -> Option<&StationLoad> {
        self.loads.get(station)
    }

    pub fn slots_used(&self, station: &StationId) -> u32 {
        self.loads.get(station).map(|load| load.load).unwrap_or(0)
    }

    pub fn hosted(&self, station: &StationId) -> HostedOption {
        self.loads.get(station).map(|load| load.hosted.clone()).unwrap_or(HostedOption::Vacant)
    }
}

/// Free stations per kind. A shared station counts as free while at least one slot is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StationSummary {
    pub single_total: usize,
    pub single_available: usize,
    pub shared_total: usize,
    pub shared_available: usize,
    pub shared_free_slots: u32,
}

/// Decides which stations can take a new or edited session.
#[derive(Debug, Clone, Copy)]
pub struct StationAllocator<'a> {
    stations: &'a StationCatalog,
    options: &'a GamingCatalog,
    settings: &'a EngineSettings,
}

impl<'a> StationAllocator<'a> {
    pub fn new(stations: &'a StationCatalog, options: &'a GamingCatalog, settings: &'a EngineSettings) -> Self {
        StationAllocator { stations, options, settings }
    }

    /// Counts every session that still holds its station at `now`. Finished sessions, including
    /// those inside the display grace, hold nothing.
    pub fn occupancy(&self, sessions: &[Session], now: NaiveDateTime) -> Occupancy {
        self.occupancy_excluding(sessions, now, None)
    }

    fn occupancy_excluding(&self, sessions: &[Session], now: NaiveDateTime, excluded: Option<&Session>) -> Occupancy {
        let mut loads: BTreeMap<StationId, StationLoad> =
            self.stations.iter().map(|station| (station.id.clone(), StationLoad::new(station.capacity))).collect();

        for session in sessions {
            if excluded.is_some_and(|edited| edited.id == session.id) {
                continue;
            }

            let Some(station_id) = &session.station else { continue };

            if !evaluate_status(session, now, self.settings).status.occupies_station() {
                continue;
            }

            match loads.get_mut(station_id) {
                Some(load) => {
                    load.record_session(&session.id, &session.gaming_option, self.options.slots_needed(&session.gaming_option));
                }
                None => log::debug!("Session {} sits on station {} which is not in the catalog.", session.id, station_id),
            }
        }

        Occupancy { loads }
    }

    /// Stations a session of `option` may be placed on, in catalog order.
    ///
    /// When `editing` is given, that session's own slots and option are left out of the load, and
    /// its current single occupancy station stays selectable. An unknown option gets no stations.
    pub fn eligible_stations(&self, option: &str, sessions: &[Session], now: NaiveDateTime, editing: Option<&Session>) -> Vec<StationId> {
        let Some(spec) = self.options.get(option) else {
            return Vec::new();
        };

        let occupancy = self.occupancy_excluding(sessions, now, editing);
        let own_station = editing.and_then(|session| session.station.as_ref());

        self.stations
            .iter()
            .filter(|station| spec.runs_on(station.kind))
            .filter(|station| self.accepts(spec, station, &occupancy, own_station == Some(&station.id)))
            .map(|station| station.id.clone())
            .collect()
    }

    fn accepts(&self, spec: &GamingOptionSpec, station: &Station, occupancy: &Occupancy, is_own_station: bool) -> bool {
        let Some(load) = occupancy.load(&station.id) else {
            return false;
        };

        match station.kind {
            StationKind::SingleOccupancy => is_own_station || load.is_vacant(),
            StationKind::Shared => {
                if load.available() < spec.slots_consumed {
                    return false;
                }

                if spec.variable_rate {
                    return true;
                }

                match &load.hosted {
                    HostedOption::Vacant => true,
                    HostedOption::Hosting(current) => current == &spec.name,
                    HostedOption::Mixed => false,
                }
            }
        }
    }

    /// Validates a station choice for a new or edited session.
    pub fn check_station(
        &self,
        option: &str,
        station: &StationId,
        sessions: &[Session],
        now: NaiveDateTime,
        editing: Option<&Session>,
    ) -> Result<(), ValidationError> {
        if self.options.get(option).is_none() {
            return Err(ValidationError::UnknownGamingOption(option.to_string()));
        }

        if self.eligible_stations(option, sessions, now, editing).contains(station) {
            Ok(())
        } else {
            log::warn!("Station {} rejected for {}: not enough room or a different option is running there.", station, option);
            Err(ValidationError::StationUnavailable { station: station.clone(), option: option.to_string() })
        }
    }

    pub fn summary(&self, sessions: &[Session], now: NaiveDateTime) -> StationSummary {
        let occupancy = self.occupancy(sessions, now);
        let mut summary = StationSummary::default();

        for station in self.stations.iter() {
            let Some(load) = occupancy.load(&station.id) else { continue };

            match station.kind {
                StationKind::SingleOccupancy => {
                    summary.single_total += 1;
                    if load.is_vacant() {
                        summary.single_available += 1;
                    }
                }
                StationKind::Shared => {
                    summary.shared_total += 1;
                    summary.shared_free_slots += load.available();
                    if load.available() > 0 {
                        summary.shared_available += 1;
                    }
                }
            }
        }

        summary
    }
}
