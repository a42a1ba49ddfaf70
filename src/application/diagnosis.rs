// Diagnosis narrative generator - fixed diagnostic text from severity and growth thresholds
use crate::domain::severity::SeverityLevel;
use crate::domain::telemetry::TrendSummary;
use serde::{Deserialize, Serialize};

/// Growth thresholds (percent) that select a trend narrative
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NarrativeThresholds {
    #[serde(alias = "short_term_threshold_pct")]
    pub short_term_threshold_pct: f64,
    #[serde(alias = "long_term_threshold_pct")]
    pub long_term_threshold_pct: f64,
}

impl Default for NarrativeThresholds {
    fn default() -> Self {
        Self {
            short_term_threshold_pct: 10.0,
            long_term_threshold_pct: 5.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendNarrative {
    Accelerating,
    SlowDrift,
    Stable,
}

impl TrendNarrative {
    pub fn text(self) -> &'static str {
        match self {
            TrendNarrative::Accelerating => {
                "Accelerating degradation: the 30-day average has risen sharply against the previous \
                 month. Discharge activity is intensifying and the insulation defect is likely \
                 developing. Shorten the monitoring interval and prepare an offline inspection."
            }
            TrendNarrative::SlowDrift => {
                "Slow long-term drift: short-term readings are steady but the 90-day average shows a \
                 gradual upward movement. This is typical of slow insulation ageing; keep the device \
                 on the watch list and compare at the next scheduled survey."
            }
            TrendNarrative::Stable => {
                "Stable: moving averages show no significant growth over the observed period. \
                 Discharge activity is steady and no trend-based action is required."
            }
        }
    }
}

/// Picks a narrative from 30-day and 90-day growth; the short-term check wins
pub fn classify_trend(
    growth_30_pct: f64,
    growth_90_pct: f64,
    thresholds: &NarrativeThresholds,
) -> TrendNarrative {
    if growth_30_pct > thresholds.short_term_threshold_pct {
        TrendNarrative::Accelerating
    } else if growth_90_pct > thresholds.long_term_threshold_pct {
        TrendNarrative::SlowDrift
    } else {
        TrendNarrative::Stable
    }
}

pub fn trend_narrative(growth_30_pct: f64, growth_90_pct: f64, thresholds: &NarrativeThresholds) -> &'static str {
    classify_trend(growth_30_pct, growth_90_pct, thresholds).text()
}

pub fn summary_narrative(summary: &TrendSummary, thresholds: &NarrativeThresholds) -> TrendNarrative {
    classify_trend(
        summary.medium_term.growth_pct,
        summary.long_term.growth_pct,
        thresholds,
    )
}

pub fn severity_diagnosis(severity: SeverityLevel) -> &'static str {
    severity.diagnosis()
}
