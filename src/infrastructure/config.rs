use crate::application::diagnosis::NarrativeThresholds;
use crate::application::population::SortDirection;
use crate::application::trend_service::TrendService;
use crate::domain::device::{Device, DEFAULT_TREND_SAMPLE_LEN};
use serde::Deserialize;

pub const DEFAULT_CONFIG_PATH: &str = "config/engine";

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct EngineConfig {
    #[serde(default)]
    pub narrative: NarrativeThresholds,
    #[serde(default)]
    pub series: SeriesSettings,
    #[serde(default)]
    pub population: PopulationSettings,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct SeriesSettings {
    /// Synthesize a demo series when a device has no history
    #[serde(default)]
    pub allow_synthetic_fallback: bool,
    #[serde(default = "default_trend_sample_len")]
    pub trend_sample_len: usize,
}

impl Default for SeriesSettings {
    fn default() -> Self {
        Self {
            allow_synthetic_fallback: false,
            trend_sample_len: DEFAULT_TREND_SAMPLE_LEN,
        }
    }
}

fn default_trend_sample_len() -> usize {
    DEFAULT_TREND_SAMPLE_LEN
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct PopulationSettings {
    #[serde(default)]
    pub default_sort: SortDirection,
}

impl EngineConfig {
    pub fn trend_service(&self) -> TrendService {
        TrendService::new(self.narrative, self.series.allow_synthetic_fallback)
    }

    /// Re-bounds deserialized trend samples to `series.trend_sample_len`
    pub fn apply_trend_bound(&self, devices: &mut [Device]) {
        for device in devices {
            device.trend.set_capacity(self.series.trend_sample_len);
        }
    }
}

/// Loads `<path>.toml` (or any format `config` recognizes); a missing file gives defaults
pub fn load_engine_config(path: &str) -> anyhow::Result<EngineConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_engine_config() {
        let raw = r#"
            [narrative]
            shortTermThresholdPct = 15.0
            longTermThresholdPct = 7.5

            [series]
            allow_synthetic_fallback = true

            [population]
            default_sort = "ascending"
        "#;
        let config: EngineConfig = toml::from_str(raw).unwrap();

        assert_eq!(config.narrative.short_term_threshold_pct, 15.0);
        assert_eq!(config.narrative.long_term_threshold_pct, 7.5);
        assert!(config.series.allow_synthetic_fallback);
        assert_eq!(config.series.trend_sample_len, DEFAULT_TREND_SAMPLE_LEN);
        assert_eq!(config.population.default_sort, SortDirection::Ascending);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: EngineConfig = toml::from_str("").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.narrative.short_term_threshold_pct, 10.0);
        assert_eq!(config.population.default_sort, SortDirection::Descending);
    }

    #[test]
    fn test_trend_bound_applies_to_loaded_devices() {
        let config: EngineConfig = toml::from_str("[series]\ntrend_sample_len = 4").unwrap();
        let json = r#"[{
            "id": "d1", "name": "Bay 1", "station": "East", "severity": "DANGER",
            "trend": [1.0, 2.0, 3.0, 4.0, 5.0, 6.0],
            "last_updated": "2024-05-01 08:00"
        }]"#;
        let mut devices: Vec<Device> = serde_json::from_str(json).unwrap();
        config.apply_trend_bound(&mut devices);

        assert_eq!(devices[0].trend.capacity(), 4);
        assert_eq!(
            devices[0].trend.values().collect::<Vec<_>>(),
            vec![3.0, 4.0, 5.0, 6.0]
        );
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let config = load_engine_config("config/does-not-exist").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.trend_service().thresholds(), &NarrativeThresholds::default());
    }
}
