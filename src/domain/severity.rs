// Severity domain model - alarm tiers and their fixed profile table
use crate::domain::error::{Result, TrendError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Alarm tier of a monitored device. Declaration order is the rank order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeverityLevel {
    NoData,
    Normal,
    Warning,
    Danger,
    Critical,
}

/// Display data for one severity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeverityProfile {
    pub label: &'static str,
    pub description: &'static str,
    /// 0xRRGGBB
    pub color: u32,
    pub diagnosis: &'static str,
}

// Indexed by rank
const PROFILES: [SeverityProfile; 5] = [
    SeverityProfile {
        label: "No Data",
        description: "The monitoring unit has not reported a usable reading in the current period.",
        color: 0x94A3B8,
        diagnosis: "No valid partial discharge data has been received from this device. Check the \
                    sensor power supply, the communication link and the acquisition unit before \
                    drawing any conclusion about insulation condition.",
    },
    SeverityProfile {
        label: "Normal",
        description: "Discharge activity is within the expected background level.",
        color: 0x22C55E,
        diagnosis: "Partial discharge amplitudes on all channels are at background level and show no \
                    characteristic discharge pattern. The insulation is in good condition; continue \
                    routine monitoring.",
    },
    SeverityProfile {
        label: "Warning",
        description: "Discharge activity is elevated and should be watched closely.",
        color: 0xEAB308,
        diagnosis: "Intermittent partial discharge signals above the background level have been \
                    detected. The pattern suggests early surface or floating-potential discharge. \
                    Shorten the inspection interval and compare against the next maintenance survey.",
    },
    SeverityProfile {
        label: "Danger",
        description: "Sustained discharge activity indicates developing insulation damage.",
        color: 0xF97316,
        diagnosis: "Sustained partial discharge with rising amplitude has been detected on multiple \
                    channels, consistent with internal void or surface tracking. Schedule an offline \
                    diagnostic test and plan a maintenance outage.",
    },
    SeverityProfile {
        label: "Critical",
        description: "Severe discharge activity; insulation failure may be imminent.",
        color: 0xEF4444,
        diagnosis: "High-energy partial discharge with a rapidly increasing trend has been detected. \
                    The risk of insulation breakdown is high. Reduce load or isolate the equipment as \
                    soon as operationally possible and dispatch maintenance staff immediately.",
    },
];

impl SeverityLevel {
    pub const ALL: [SeverityLevel; 5] = [
        SeverityLevel::NoData,
        SeverityLevel::Normal,
        SeverityLevel::Warning,
        SeverityLevel::Danger,
        SeverityLevel::Critical,
    ];

    /// Total order used for filtering and sorting
    pub fn rank(self) -> u8 {
        match self {
            SeverityLevel::NoData => 0,
            SeverityLevel::Normal => 1,
            SeverityLevel::Warning => 2,
            SeverityLevel::Danger => 3,
            SeverityLevel::Critical => 4,
        }
    }

    pub fn from_rank(rank: u8) -> Result<Self> {
        Self::ALL
            .get(rank as usize)
            .copied()
            .ok_or_else(|| TrendError::UnknownSeverity(format!("rank {}", rank)))
    }

    pub fn profile(self) -> &'static SeverityProfile {
        &PROFILES[self.rank() as usize]
    }

    pub fn label(self) -> &'static str {
        self.profile().label
    }

    pub fn description(self) -> &'static str {
        self.profile().description
    }

    pub fn diagnosis(self) -> &'static str {
        self.profile().diagnosis
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityLevel::NoData => "NO_DATA",
            SeverityLevel::Normal => "NORMAL",
            SeverityLevel::Warning => "WARNING",
            SeverityLevel::Danger => "DANGER",
            SeverityLevel::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for SeverityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeverityLevel {
    type Err = TrendError;

    /// Accepts "CRITICAL", "critical", "NO_DATA", "no-data", "nodata"
    fn from_str(s: &str) -> Result<Self> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match normalized.as_str() {
            "nodata" => Ok(SeverityLevel::NoData),
            "normal" => Ok(SeverityLevel::Normal),
            "warning" => Ok(SeverityLevel::Warning),
            "danger" => Ok(SeverityLevel::Danger),
            "critical" => Ok(SeverityLevel::Critical),
            _ => Err(TrendError::UnknownSeverity(s.to_string())),
        }
    }
}

impl TryFrom<u8> for SeverityLevel {
    type Error = TrendError;

    fn try_from(rank: u8) -> Result<Self> {
        Self::from_rank(rank)
    }
}
