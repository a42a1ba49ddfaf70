// Trend service - Use case for building device trend views
use crate::application::diagnosis::{summary_narrative, NarrativeThresholds, TrendNarrative};
use crate::application::moving_average::{apply_moving_averages, trend_summary};
use crate::application::series_synthesizer::synthesize;
use crate::domain::device::{Channel, Device};
use crate::domain::error::{Result, TrendError};
use crate::domain::telemetry::{HistorySample, SeriesSource, TimeSeriesPoint, TrendSummary};
use serde::Serialize;

/// Series with averages, metrics and narratives for one device or channel
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendView {
    pub device_id: String,
    pub channel: Option<Channel>,
    pub source: SeriesSource,
    pub series: Vec<TimeSeriesPoint>,
    pub summary: TrendSummary,
    pub narrative: TrendNarrative,
    pub narrative_text: &'static str,
    pub diagnosis: &'static str,
}

#[derive(Debug, Clone)]
pub struct TrendService {
    thresholds: NarrativeThresholds,
    allow_synthetic_fallback: bool,
}

impl TrendService {
    pub fn new(thresholds: NarrativeThresholds, allow_synthetic_fallback: bool) -> Self {
        Self {
            thresholds,
            allow_synthetic_fallback,
        }
    }

    pub fn thresholds(&self) -> &NarrativeThresholds {
        &self.thresholds
    }

    /// Builds a view from ingested history, or from the synthesizer when
    /// history is absent and the fallback is enabled.
    pub fn device_trend(
        &self,
        device: &Device,
        channel: Option<Channel>,
        history: Option<&[HistorySample]>,
    ) -> Result<TrendView> {
        let (series, source) = match history {
            Some(samples) if !samples.is_empty() => (from_history(samples), SeriesSource::Historical),
            _ if self.allow_synthetic_fallback => {
                tracing::warn!(
                    "No history for device {} ({}), using synthetic series",
                    device.id,
                    channel.map(Channel::as_str).unwrap_or("all channels")
                );
                (synthesize(device.severity, channel), SeriesSource::Synthetic)
            }
            _ => {
                return Err(TrendError::InsufficientData(format!(
                    "no history for device {}",
                    device.id
                )));
            }
        };

        self.build_view(device, channel, series, source)
    }

    /// One view per sensor channel, history looked up by `history_for`
    pub fn channel_overview<'h, F>(&self, device: &Device, mut history_for: F) -> Result<Vec<TrendView>>
    where
        F: FnMut(Channel) -> Option<&'h [HistorySample]>,
    {
        Channel::ALL
            .into_iter()
            .map(|channel| self.device_trend(device, Some(channel), history_for(channel)))
            .collect()
    }

    fn build_view(
        &self,
        device: &Device,
        channel: Option<Channel>,
        mut series: Vec<TimeSeriesPoint>,
        source: SeriesSource,
    ) -> Result<TrendView> {
        apply_moving_averages(&mut series)?;
        let summary = trend_summary(&series)?;
        let narrative = summary_narrative(&summary, &self.thresholds);

        tracing::debug!(
            "Trend for {} {:?}: ma30 growth {:.1}%, ma90 growth {:.1}% -> {:?}",
            device.id,
            channel,
            summary.medium_term.growth_pct,
            summary.long_term.growth_pct,
            narrative
        );

        Ok(TrendView {
            device_id: device.id.clone(),
            channel,
            source,
            series,
            summary,
            narrative,
            narrative_text: narrative.text(),
            diagnosis: device.severity.diagnosis(),
        })
    }
}

impl Default for TrendService {
    fn default() -> Self {
        Self::new(NarrativeThresholds::default(), false)
    }
}

/// Orders samples by date; negative magnitudes clamp to zero
fn from_history(samples: &[HistorySample]) -> Vec<TimeSeriesPoint> {
    let mut points: Vec<TimeSeriesPoint> = samples
        .iter()
        .map(|s| TimeSeriesPoint::new(s.date, s.value))
        .collect();
    points.sort_by_key(|p| p.date);
    points
}
