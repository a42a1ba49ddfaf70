// Moving-average engine - causal windowed averages and window-over-window growth
use crate::domain::error::{Result, TrendError};
use crate::domain::telemetry::{round1, TimeSeriesPoint, TrendMetric, TrendSummary};

pub const SHORT_WINDOW: usize = 7;
pub const MEDIUM_WINDOW: usize = 30;
pub const LONG_WINDOW: usize = 90;

/// Trailing average at every index, rounded to one decimal.
///
/// The window ending at index `i` covers `min(i + 1, window)` values, so the
/// first entries are partial averages rather than gaps. Runs in O(n) using a
/// running sum.
pub fn moving_average(series: &[f64], window: usize) -> Result<Vec<f64>> {
    if series.is_empty() {
        return Err(TrendError::InsufficientData("series is empty".to_string()));
    }
    if window == 0 {
        return Err(TrendError::InsufficientData("window length is zero".to_string()));
    }

    let mut averages = Vec::with_capacity(series.len());
    let mut sum = 0.0;

    for (i, value) in series.iter().enumerate() {
        sum += value;
        if i >= window {
            sum -= series[i - window];
        }
        let len = (i + 1).min(window);
        averages.push(round1(sum / len as f64));
    }

    Ok(averages)
}

/// Percent change of the last average against the one `window` points earlier.
///
/// The reference index is clamped to 0; a zero reference yields 0.
pub fn growth_pct(averages: &[f64], window: usize) -> Result<f64> {
    let last = averages
        .len()
        .checked_sub(1)
        .ok_or_else(|| TrendError::InsufficientData("no averages to compare".to_string()))?;
    let reference = averages[last.saturating_sub(window)];

    if reference == 0.0 {
        return Ok(0.0);
    }

    Ok((averages[last] - reference) / reference * 100.0)
}

pub fn trend_metric(series: &[f64], window: usize) -> Result<TrendMetric> {
    let averages = moving_average(series, window)?;
    let growth = growth_pct(&averages, window)?;
    let current = averages[averages.len() - 1];
    Ok(TrendMetric::new(window, current, growth))
}

/// Fills ma7/ma30/ma90 on every point from the raw values
pub fn apply_moving_averages(points: &mut [TimeSeriesPoint]) -> Result<()> {
    let raw: Vec<f64> = points.iter().map(|p| p.raw).collect();
    let ma7 = moving_average(&raw, SHORT_WINDOW)?;
    let ma30 = moving_average(&raw, MEDIUM_WINDOW)?;
    let ma90 = moving_average(&raw, LONG_WINDOW)?;

    for (i, point) in points.iter_mut().enumerate() {
        point.ma7 = ma7[i];
        point.ma30 = ma30[i];
        point.ma90 = ma90[i];
    }

    Ok(())
}

/// Metrics at the newest point of a series whose averages are already applied
pub fn trend_summary(points: &[TimeSeriesPoint]) -> Result<TrendSummary> {
    if points.is_empty() {
        return Err(TrendError::InsufficientData("series is empty".to_string()));
    }

    let metric = |window: usize, pick: fn(&TimeSeriesPoint) -> f64| -> Result<TrendMetric> {
        let averages: Vec<f64> = points.iter().map(pick).collect();
        let growth = growth_pct(&averages, window)?;
        Ok(TrendMetric::new(window, averages[averages.len() - 1], growth))
    };

    Ok(TrendSummary {
        short_term: metric(SHORT_WINDOW, |p| p.ma7)?,
        medium_term: metric(MEDIUM_WINDOW, |p| p.ma30)?,
        long_term: metric(LONG_WINDOW, |p| p.ma90)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn points(values: &[f64]) -> Vec<TimeSeriesPoint> {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        values
            .iter()
            .enumerate()
            .map(|(i, v)| TimeSeriesPoint::new(start + Duration::days(i as i64), *v))
            .collect()
    }

    #[test]
    fn test_scenario_step_series() {
        let series = [10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 10.0, 20.0];
        let ma7 = moving_average(&series, 7).unwrap();
        assert_eq!(ma7[0], 10.0);
        assert_eq!(ma7[7], 11.4);

        let growth = growth_pct(&ma7, 7).unwrap();
        assert!((growth - 14.0).abs() < 1e-9);
        assert_eq!(trend_metric(&series, 7).unwrap().growth_display(), "+14.0%");
    }

    #[test]
    fn test_partial_windows_at_start() {
        let ma = moving_average(&[2.0, 4.0, 6.0], 30).unwrap();
        assert_eq!(ma, vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_last_average_is_mean_of_trailing_values() {
        let series: Vec<f64> = (0..120).map(|i| ((i * 37) % 23) as f64 * 1.7).collect();
        for window in [SHORT_WINDOW, MEDIUM_WINDOW, LONG_WINDOW] {
            for n in [1usize, 5, 29, 30, 31, 90, 120] {
                let slice = &series[..n];
                let ma = moving_average(slice, window).unwrap();
                let tail = &slice[n - n.min(window)..];
                let mean = tail.iter().sum::<f64>() / tail.len() as f64;
                assert!(
                    (ma[n - 1] - mean).abs() <= 0.05 + 1e-9,
                    "window {} len {}: {} vs {}",
                    window,
                    n,
                    ma[n - 1],
                    mean
                );
            }
        }
    }

    #[test]
    fn test_empty_series_is_insufficient() {
        assert!(matches!(
            moving_average(&[], 7),
            Err(TrendError::InsufficientData(_))
        ));
        assert!(matches!(
            trend_summary(&[]),
            Err(TrendError::InsufficientData(_))
        ));
    }

    #[test]
    fn test_zero_reference_growth_is_zero() {
        let ma = moving_average(&[0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 5.0], 7).unwrap();
        let growth = growth_pct(&ma, 7).unwrap();
        assert_eq!(growth, 0.0);
        assert!(!growth.is_nan());
    }

    #[test]
    fn test_single_point_has_no_growth() {
        let metric = trend_metric(&[4.2], 90).unwrap();
        assert_eq!(metric.value, 4.2);
        assert_eq!(metric.growth_pct, 0.0);
    }

    #[test]
    fn test_apply_is_idempotent_and_non_negative() {
        let mut series = points(&[0.0, 3.5, 1.2, 8.8, 0.0, 2.1, 6.6, 4.4, 9.9, 0.3]);
        apply_moving_averages(&mut series).unwrap();
        let first = series.clone();
        apply_moving_averages(&mut series).unwrap();
        assert_eq!(first, series);
        assert!(series.iter().all(|p| p.ma7 >= 0.0 && p.ma30 >= 0.0 && p.ma90 >= 0.0));
    }

    #[test]
    fn test_summary_uses_window_length_reference() {
        let values: Vec<f64> = (0..90).map(|i| if i < 60 { 10.0 } else { 20.0 }).collect();
        let mut series = points(&values);
        apply_moving_averages(&mut series).unwrap();
        let summary = trend_summary(&series).unwrap();

        assert_eq!(summary.short_term.window, 7);
        assert_eq!(summary.short_term.value, 20.0);
        // MA7 at index 82 is already fully inside the step
        assert_eq!(summary.short_term.growth_pct, 0.0);
        // MA30 at 59 is 10.0, at 89 is 20.0
        assert!((summary.medium_term.growth_pct - 100.0).abs() < 1e-9);
        // MA90 reference clamps to index 0
        assert_eq!(summary.long_term.value, 13.3);
        assert!((summary.long_term.growth_pct - 33.0).abs() < 1e-9);
    }
}
