// Device domain model - monitored switchgear assets and their projects
use crate::domain::error::TrendError;
use crate::domain::severity::SeverityLevel;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TREND_SAMPLE_LEN: usize = 20;

/// Sensor modality
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Channel {
    Uhf,
    Tev,
    Hfct,
    Ae,
}

impl Channel {
    pub const ALL: [Channel; 4] = [Channel::Uhf, Channel::Tev, Channel::Hfct, Channel::Ae];

    pub fn as_str(self) -> &'static str {
        match self {
            Channel::Uhf => "UHF",
            Channel::Tev => "TEV",
            Channel::Hfct => "HFCT",
            Channel::Ae => "AE",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelReading {
    pub amplitude: f64,
    pub frequency: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChannelReadings {
    pub uhf: ChannelReading,
    pub tev: ChannelReading,
    pub hfct: ChannelReading,
    pub ae: ChannelReading,
}

impl ChannelReadings {
    pub fn get(&self, channel: Channel) -> &ChannelReading {
        match channel {
            Channel::Uhf => &self.uhf,
            Channel::Tev => &self.tev,
            Channel::Hfct => &self.hfct,
            Channel::Ae => &self.ae,
        }
    }

    /// Channel with the largest amplitude; first channel wins ties
    pub fn peak(&self) -> (Channel, &ChannelReading) {
        let mut best = (Channel::Uhf, &self.uhf);
        for channel in Channel::ALL {
            let reading = self.get(channel);
            if reading.amplitude > best.1.amplitude {
                best = (channel, reading);
            }
        }
        best
    }
}

/// Recent magnitude samples for sparklines, oldest first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct TrendSample {
    capacity: usize,
    values: VecDeque<f64>,
}

impl TrendSample {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            values: VecDeque::with_capacity(capacity.max(1)),
        }
    }

    pub fn from_values(capacity: usize, values: impl IntoIterator<Item = f64>) -> Self {
        let mut sample = Self::new(capacity);
        for value in values {
            sample.push(value);
        }
        sample
    }

    /// Appends a sample, evicting the oldest once full
    pub fn push(&mut self, value: f64) {
        if self.values.len() == self.capacity {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// Changes the bound, evicting the oldest samples that no longer fit
    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        while self.values.len() > self.capacity {
            self.values.pop_front();
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.values.iter().copied()
    }
}

/// Bounded at `DEFAULT_TREND_SAMPLE_LEN`, keeping the newest values; hosts with a
/// different bound call [`TrendSample::set_capacity`] after loading
impl From<Vec<f64>> for TrendSample {
    fn from(values: Vec<f64>) -> Self {
        Self::from_values(DEFAULT_TREND_SAMPLE_LEN, values)
    }
}

impl From<TrendSample> for Vec<f64> {
    fn from(sample: TrendSample) -> Self {
        sample.values.into()
    }
}

impl Default for TrendSample {
    fn default() -> Self {
        Self::new(DEFAULT_TREND_SAMPLE_LEN)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub station: String,
    /// None means unassigned; "none" on the wire
    #[serde(default, deserialize_with = "deserialize_project_id")]
    pub project_id: Option<String>,
    pub severity: SeverityLevel,
    #[serde(default)]
    pub readings: ChannelReadings,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default)]
    pub humidity: f64,
    #[serde(default)]
    pub trend: TrendSample,
    pub last_updated: String,
    #[serde(default)]
    pub image: Option<String>,
}

impl Device {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        station: impl Into<String>,
        severity: SeverityLevel,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            station: station.into(),
            project_id: None,
            severity,
            readings: ChannelReadings::default(),
            temperature: 0.0,
            humidity: 0.0,
            trend: TrendSample::default(),
            last_updated: String::new(),
            image: None,
        }
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_last_updated(mut self, last_updated: impl Into<String>) -> Self {
        self.last_updated = last_updated.into();
        self
    }

    pub fn rank(&self) -> u8 {
        self.severity.rank()
    }

    pub fn reading(&self, channel: Channel) -> &ChannelReading {
        self.readings.get(channel)
    }

    /// "2024-05-01 12:30:00" -> "2024-05-01"
    pub fn last_updated_date(&self) -> &str {
        self.last_updated.split_whitespace().next().unwrap_or("")
    }

    pub fn last_updated_day(&self) -> Option<chrono::NaiveDate> {
        chrono::NaiveDate::parse_from_str(self.last_updated_date(), "%Y-%m-%d").ok()
    }
}

fn deserialize_project_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|id| !id.is_empty() && !id.eq_ignore_ascii_case("none")))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
}

impl Project {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Which projects a population view covers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectScope {
    #[default]
    All,
    Project(String),
}

impl ProjectScope {
    /// Fails when the scope names a project missing from `projects`
    pub fn validate(&self, projects: &[Project]) -> crate::domain::error::Result<()> {
        match self {
            ProjectScope::All => Ok(()),
            ProjectScope::Project(id) if projects.iter().any(|p| &p.id == id) => Ok(()),
            ProjectScope::Project(id) => Err(TrendError::InvalidProjectScope(id.clone())),
        }
    }
}

impl FromStr for ProjectScope {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("all") {
            Ok(ProjectScope::All)
        } else {
            Ok(ProjectScope::Project(s.to_string()))
        }
    }
}
