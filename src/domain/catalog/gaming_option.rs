use rust_decimal::Decimal;

use crate::domain::catalog::station::StationKind;

/// A billable way of using a station.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamingOptionSpec {
    pub name: String,

    /// Price per hour. Zero for the variable rate option, whose rate is entered per session.
    pub hourly_rate: Decimal,

    /// Slots one session of this option occupies on a station.
    pub slots_consumed: u32,

    /// Kind of station the option runs on. `None` means any station.
    pub station_kind: Option<StationKind>,

    pub variable_rate: bool,
}

impl GamingOptionSpec {
    pub fn fixed(name: &str, hourly_rate: i64, slots_consumed: u32, station_kind: StationKind) -> Self {
        GamingOptionSpec {
            name: name.to_string(),
            hourly_rate: Decimal::from(hourly_rate),
            slots_consumed,
            station_kind: Some(station_kind),
            variable_rate: false,
        }
    }

    pub fn variable(name: &str) -> Self {
        GamingOptionSpec { name: name.to_string(), hourly_rate: Decimal::ZERO, slots_consumed: 1, station_kind: None, variable_rate: true }
    }

    /// Whether a session of this option may be placed on a station of `kind`.
    pub fn runs_on(&self, kind: StationKind) -> bool {
        self.station_kind.is_none_or(|affinity| affinity == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GamingCatalog {
    options: Vec<GamingOptionSpec>,
}

impl GamingCatalog {
    pub fn new(options: Vec<GamingOptionSpec>) -> Self {
        GamingCatalog { options }
    }

    pub fn default_lounge() -> Self {
        use StationKind::*;

        GamingCatalog {
            options: vec![
                GamingOptionSpec::fixed("PC", 90, 1, SingleOccupancy),
                GamingOptionSpec::fixed("PS", 120, 4, Shared),
                GamingOptionSpec::fixed("PS(2P)", 110, 2, Shared),
                GamingOptionSpec::fixed("PS(3P)", 100, 1, Shared),
                GamingOptionSpec::fixed("PS(4P)", 100, 1, Shared),
                GamingOptionSpec::fixed("Racing Cockpit", 150, 1, SingleOccupancy),
                GamingOptionSpec::variable("Custom Price"),
            ],
        }
    }

    pub fn get(&self, name: &str) -> Option<&GamingOptionSpec> {
        self.options.iter().find(|option| option.name == name)
    }

    /// Slots a session of `name` occupies. Unknown options occupy nothing.
    pub fn slots_needed(&self, name: &str) -> u32 {
        self.get(name).map(|option| option.slots_consumed).unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &GamingOptionSpec> {
        self.options.iter()
    }
}

impl Default for GamingCatalog {
    fn default() -> Self {
        Self::default_lounge()
    }
}
