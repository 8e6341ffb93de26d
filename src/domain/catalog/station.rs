use serde::{Deserialize, Serialize};

use crate::domain::utils::id::StationId;

/// Physical category of a station. Desktop and cockpit rigs host one customer, console rigs are
/// shared by up to `capacity` players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StationKind {
    SingleOccupancy,
    Shared,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Station {
    pub id: StationId,
    pub kind: StationKind,
    /// Capacity in slots. Always 1 for single occupancy stations.
    pub capacity: u32,
}

impl Station {
    pub fn single(id: impl Into<String>) -> Self {
        Station { id: StationId::new(id), kind: StationKind::SingleOccupancy, capacity: 1 }
    }

    pub fn shared(id: impl Into<String>, capacity: u32) -> Self {
        Station { id: StationId::new(id), kind: StationKind::Shared, capacity }
    }
}

/// Immutable, ordered list of the lounge's stations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StationCatalog {
    stations: Vec<Station>,
}

impl StationCatalog {
    pub fn new(stations: Vec<Station>) -> Self {
        StationCatalog { stations }
    }

    /// Four desktop rigs `PC-1..PC-4` and four console rigs `PS-1..PS-4` with four slots each.
    pub fn default_lounge() -> Self {
        let mut stations: Vec<Station> = (1..=4).map(|i| Station::single(format!("PC-{}", i))).collect();
        stations.extend((1..=4).map(|i| Station::shared(format!("PS-{}", i), 4)));

        StationCatalog { stations }
    }

    pub fn get(&self, id: &StationId) -> Option<&Station> {
        self.stations.iter().find(|station| &station.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Station> {
        self.stations.iter()
    }

    pub fn of_kind(&self, kind: StationKind) -> impl Iterator<Item = &Station> {
        self.stations.iter().filter(move |station| station.kind == kind)
    }

    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }
}

impl Default for StationCatalog {
    fn default() -> Self {
        Self::default_lounge()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lounge_has_four_of_each() {
        let catalog = StationCatalog::default_lounge();

        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.of_kind(StationKind::SingleOccupancy).count(), 4);
        assert!(catalog.of_kind(StationKind::Shared).all(|station| station.capacity == 4));
        assert_eq!(catalog.get(&StationId::new("PS-3")).map(|s| s.kind), Some(StationKind::Shared));
        assert!(catalog.get(&StationId::new("PS-5")).is_none());
    }
}
