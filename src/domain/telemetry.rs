// Telemetry data domain models
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily sample plus its trailing moving averages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub raw: f64,
    pub ma7: f64,
    pub ma30: f64,
    pub ma90: f64,
}

impl TimeSeriesPoint {
    /// Negative magnitudes are clamped to zero
    pub fn new(date: NaiveDate, raw: f64) -> Self {
        Self {
            date,
            raw: round1(raw.max(0.0)),
            ma7: 0.0,
            ma30: 0.0,
            ma90: 0.0,
        }
    }
}

/// An ingested history sample
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistorySample {
    pub date: NaiveDate,
    pub value: f64,
}

impl HistorySample {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesSource {
    Historical,
    Synthetic,
}

/// Current value of one moving-average window and its change over one window length
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendMetric {
    pub window: usize,
    pub value: f64,
    pub growth_pct: f64,
}

impl TrendMetric {
    pub fn new(window: usize, value: f64, growth_pct: f64) -> Self {
        Self {
            window,
            value,
            growth_pct,
        }
    }

    /// Growth rounded for display, e.g. "+14.0%"
    pub fn growth_display(&self) -> String {
        format!("{:+.1}%", round1(self.growth_pct))
    }
}

/// 7/30/90-day metrics for one series
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendSummary {
    pub short_term: TrendMetric,
    pub medium_term: TrendMetric,
    pub long_term: TrendMetric,
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
