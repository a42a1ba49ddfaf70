// Station aggregator - severity tallies for summary and report views
use crate::domain::device::Device;
use crate::domain::severity::SeverityLevel;
use serde::{Serialize, Serializer};
use serde::ser::SerializeMap;
use std::collections::BTreeMap;

/// Device count per severity, always covering all five levels
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StationTally {
    counts: [usize; 5],
}

impl StationTally {
    pub fn from_devices<'a>(devices: impl IntoIterator<Item = &'a Device>) -> Self {
        let mut tally = Self::default();
        for device in devices {
            tally.counts[device.rank() as usize] += 1;
        }
        tally
    }

    pub fn count(&self, level: SeverityLevel) -> usize {
        self.counts[level.rank() as usize]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Pairs in rank order, zero counts included
    pub fn iter(&self) -> impl Iterator<Item = (SeverityLevel, usize)> + '_ {
        SeverityLevel::ALL.into_iter().map(|level| (level, self.count(level)))
    }

    /// Devices at WARNING or above
    pub fn alarming(&self) -> usize {
        self.iter()
            .filter(|(level, _)| *level >= SeverityLevel::Warning)
            .map(|(_, count)| count)
            .sum()
    }
}

impl Serialize for StationTally {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(6))?;
        for (level, count) in self.iter() {
            map.serialize_entry(level.as_str(), &count)?;
        }
        map.serialize_entry("total", &self.total())?;
        map.end()
    }
}

/// One tally per station name, ordered by name
pub fn tally_by_station(devices: &[Device]) -> BTreeMap<String, StationTally> {
    let mut stations: BTreeMap<String, StationTally> = BTreeMap::new();
    for device in devices {
        stations
            .entry(device.station.clone())
            .or_default()
            .counts[device.rank() as usize] += 1;
    }
    stations
}
