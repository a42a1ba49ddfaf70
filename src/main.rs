// Demo host - wires configuration, logging and the trend engine over a sample fleet
use std::sync::Arc;

use pd_trends::application::collaborators::DeviceCommandSink;
use pd_trends::infrastructure::config::{load_engine_config, DEFAULT_CONFIG_PATH};
use pd_trends::{
    filter_and_sort, tally_by_station, Device, DeviceQuery, Project, ProjectScope,
    SeverityLevel, StationTally, TrendSample, TrendService,
};
use serde_json::json;
use tracing_subscriber::EnvFilter;

/// Logs requests instead of routing them to a UI
struct LoggingSink;

impl DeviceCommandSink for LoggingSink {
    fn request_image_update(&self, device_id: &str, image_data_uri: String) {
        tracing::info!("Image update for {} ({} bytes)", device_id, image_data_uri.len());
    }

    fn request_device_selection(&self, device_id: &str) {
        tracing::info!("Selected device {}", device_id);
    }
}

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = load_engine_config(DEFAULT_CONFIG_PATH)?;
    tracing::info!("Loaded engine configuration: {:?}", config);

    let projects = vec![
        Project::new("p-grid", "Grid Reinforcement 2024"),
        Project::new("p-retro", "Substation Retrofit"),
    ];
    let devices = sample_fleet(config.series.trend_sample_len);

    let query = DeviceQuery::new()
        .with_scope(ProjectScope::All)
        .with_direction(config.population.default_sort);
    let ranked = filter_and_sort(&devices, &projects, &query);

    let sink: Arc<dyn DeviceCommandSink> = Arc::new(LoggingSink);
    let Some(worst) = ranked.first() else {
        tracing::info!("No matching devices");
        return Ok(());
    };
    sink.request_device_selection(&worst.id);

    let service = config.trend_service();
    let detail = trend_detail(&service, worst);

    let report = json!({
        "ranking": ranked
            .iter()
            .map(|d| json!({
                "id": d.id,
                "name": d.name,
                "station": d.station,
                "severity": d.severity,
                "label": d.severity.label(),
                "updated": d.last_updated_date(),
            }))
            .collect::<Vec<_>>(),
        "tally": StationTally::from_devices(&devices),
        "stations": tally_by_station(&devices),
        "detail": detail,
    });

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Trend section of the report, or null when the device has no usable series
fn trend_detail(service: &TrendService, device: &Device) -> serde_json::Value {
    let (peak_channel, _) = device.readings.peak();
    match (
        service.device_trend(device, None, None),
        service.device_trend(device, Some(peak_channel), None),
    ) {
        (Ok(overall), Ok(channel)) => json!({
            "device": device.id,
            "source": overall.source,
            "summary": overall.summary,
            "growth": {
                "7d": overall.summary.short_term.growth_display(),
                "30d": overall.summary.medium_term.growth_display(),
                "90d": overall.summary.long_term.growth_display(),
            },
            "trend": overall.narrative_text,
            "diagnosis": overall.diagnosis,
            "peak_channel": channel.channel,
            "peak_channel_summary": channel.summary,
        }),
        (Err(err), _) | (_, Err(err)) => {
            tracing::info!("Skipping trend detail for {}: {}", device.id, err);
            serde_json::Value::Null
        }
    }
}

fn sample_fleet(trend_len: usize) -> Vec<Device> {
    let specs = [
        ("sw-101", "Incomer 1", "Riverside 110kV", SeverityLevel::Normal, Some("p-grid"), 12.4),
        ("sw-102", "Bus Section", "Riverside 110kV", SeverityLevel::Warning, Some("p-grid"), 21.8),
        ("sw-201", "Feeder 7", "Hillcrest 33kV", SeverityLevel::Critical, Some("p-retro"), 48.1),
        ("sw-202", "Feeder 9", "Hillcrest 33kV", SeverityLevel::Danger, None, 33.0),
        ("sw-301", "Transformer Bay", "Old Mill 11kV", SeverityLevel::NoData, None, 0.0),
    ];

    specs
        .into_iter()
        .map(|(id, name, station, severity, project, tev)| {
            let mut device = Device::new(id, name, station, severity)
                .with_last_updated("2024-06-30 14:05:00");
            if let Some(project) = project {
                device = device.with_project(project);
            }
            device.readings.tev.amplitude = tev;
            device.readings.tev.frequency = 50.0;
            device.readings.uhf.amplitude = tev * 0.6;
            device.temperature = 27.5;
            device.humidity = 61.0;
            device.trend = TrendSample::from_values(trend_len, (0..trend_len).map(|i| tev + i as f64 * 0.1));
            device
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pd_trends::NarrativeThresholds;

    #[test]
    fn test_detail_skipped_without_history_or_fallback() {
        let fleet = sample_fleet(5);
        let detail = trend_detail(&TrendService::default(), &fleet[2]);
        assert!(detail.is_null());
    }

    #[test]
    fn test_detail_with_synthetic_fallback() {
        let fleet = sample_fleet(5);
        let service = TrendService::new(NarrativeThresholds::default(), true);
        let detail = trend_detail(&service, &fleet[2]);
        assert_eq!(detail["device"], "sw-201");
        assert_eq!(detail["source"], "synthetic");
        assert_eq!(detail["peak_channel"], "TEV");
    }
}
