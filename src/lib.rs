// Partial-discharge trend engine - severity ranking, moving-average trends and diagnosis text
pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::diagnosis::{NarrativeThresholds, TrendNarrative};
pub use application::population::{filter_and_sort, DeviceQuery, SortDirection};
pub use application::station::{tally_by_station, StationTally};
pub use application::trend_service::{TrendService, TrendView};
pub use domain::device::{Channel, ChannelReading, ChannelReadings, Device, Project, ProjectScope, TrendSample};
pub use domain::error::{Result, TrendError};
pub use domain::severity::{SeverityLevel, SeverityProfile};
pub use domain::telemetry::{HistorySample, SeriesSource, TimeSeriesPoint, TrendMetric, TrendSummary};
