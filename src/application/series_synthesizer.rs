// Series synthesizer - severity-shaped 90-day fallback series
//
// Stands in for missing history in demos; output is random per call.
use crate::domain::device::Channel;
use crate::domain::severity::SeverityLevel;
use crate::domain::telemetry::TimeSeriesPoint;
use chrono::{Duration, NaiveDate};
use rand::Rng;

pub const SERIES_DAYS: usize = 90;

const SPIKE_PROBABILITY: f64 = 0.1;
const CRITICAL_QUADRATIC: f64 = 0.004;

/// Baseline amplitude and noise span for one sensor mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChannelProfile {
    pub baseline: f64,
    pub volatility: f64,
}

impl ChannelProfile {
    pub fn for_channel(channel: Option<Channel>) -> Self {
        let (baseline, volatility) = match channel {
            Some(Channel::Uhf) => (20.0, 8.0),
            Some(Channel::Tev) => (25.0, 6.0),
            Some(Channel::Hfct) => (10.0, 3.0),
            Some(Channel::Ae) => (5.0, 2.0),
            None => (15.0, 5.0),
        };
        Self {
            baseline,
            volatility,
        }
    }

    /// Channel profile scaled up for the severity tier
    pub fn for_series(severity: SeverityLevel, channel: Option<Channel>) -> Self {
        let base = Self::for_channel(channel);
        let scale = severity_scale(severity);
        Self {
            baseline: base.baseline * scale,
            volatility: base.volatility * scale,
        }
    }
}

/// Baseline and volatility multiplier for a severity tier
pub fn severity_scale(severity: SeverityLevel) -> f64 {
    match severity {
        SeverityLevel::NoData | SeverityLevel::Normal => 1.0,
        SeverityLevel::Warning => 1.2,
        SeverityLevel::Danger => 1.5,
        SeverityLevel::Critical => 2.0,
    }
}

/// Linear slope per day for a severity tier
pub fn trend_factor(severity: SeverityLevel) -> f64 {
    match severity {
        SeverityLevel::NoData | SeverityLevel::Normal => 0.0,
        SeverityLevel::Warning => 0.05,
        SeverityLevel::Danger => 0.15,
        SeverityLevel::Critical => 0.35,
    }
}

/// Deterministic part of the value at day offset `x` (1 = oldest)
pub fn expected_value(severity: SeverityLevel, channel: Option<Channel>, x: usize) -> f64 {
    let x = x as f64;
    let profile = ChannelProfile::for_series(severity, channel);
    let mut value = profile.baseline + trend_factor(severity) * x;
    if severity == SeverityLevel::Critical {
        value += CRITICAL_QUADRATIC * x * x;
    }
    value
}

/// 90 daily points ending at `end`, oldest first, averages left at zero
pub fn synthesize_with<R: Rng>(
    rng: &mut R,
    severity: SeverityLevel,
    channel: Option<Channel>,
    end: NaiveDate,
) -> Vec<TimeSeriesPoint> {
    let profile = ChannelProfile::for_series(severity, channel);
    let half_span = profile.volatility / 2.0;

    (1..=SERIES_DAYS)
        .map(|x| {
            let date = end - Duration::days((SERIES_DAYS - x) as i64);
            let mut value =
                expected_value(severity, channel, x) + rng.gen_range(-half_span..=half_span);

            if channel.is_some() && rng.gen_bool(SPIKE_PROBABILITY) {
                value += rng.gen_range(0.0..=profile.volatility * 2.0);
            }

            TimeSeriesPoint::new(date, value)
        })
        .collect()
}

/// Same as [`synthesize_with`] using the thread RNG and today's date
pub fn synthesize(severity: SeverityLevel, channel: Option<Channel>) -> Vec<TimeSeriesPoint> {
    let today = chrono::Local::now().date_naive();
    synthesize_with(&mut rand::thread_rng(), severity, channel, today)
}
