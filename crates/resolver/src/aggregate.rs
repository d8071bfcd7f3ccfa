//! Temporal aggregation of an hourly series into one scalar.

use archive_client::HourlySeries;
use chrono::{DateTime, Duration, DurationRound, Utc};

/// How the window filters observations.
///
/// `TrailingInclusive` reproduces the historical behavior: the selection
/// only compares against the window end, so everything at or before it is
/// included regardless of the window start. `Bounded` applies the start
/// as a lower bound as well. Which one is intended is still an open
/// question with the data's maintainers, so both stay selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    #[default]
    TrailingInclusive,
    Bounded,
}

/// Reduce the in-window observations of `field` to their arithmetic mean.
///
/// Soft failures all yield `None`: the field is absent from the series,
/// no timestamp falls in the window, or every selected value is null.
pub fn aggregate(
    series: &HourlySeries,
    field: &str,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    mode: WindowMode,
) -> Option<f64> {
    let values = series.values(field)?;

    // Timestamps are compared truncated to the start of their hour, so an
    // observation stamped 12:59 still counts against a 12:00 window end.
    let in_window = |t: &DateTime<Utc>| {
        let hour = start_of_hour(*t);
        match mode {
            WindowMode::TrailingInclusive => hour <= window_end,
            WindowMode::Bounded => hour >= window_start && hour <= window_end,
        }
    };

    let start_index = series.time.iter().position(|t| in_window(t))?;
    let end_index = series.time.iter().rposition(|t| in_window(t))?;

    let selected: Vec<f64> = (start_index..=end_index)
        .filter_map(|i| values.get(i).copied().flatten())
        .collect();

    if selected.is_empty() {
        return None;
    }
    Some(selected.iter().sum::<f64>() / selected.len() as f64)
}

fn start_of_hour(t: DateTime<Utc>) -> DateTime<Utc> {
    t.duration_trunc(Duration::hours(1)).unwrap_or(t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_utils::hourly_series;

    fn utc(d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_mean_of_window() {
        let series = hourly_series("temperature_2m", utc(1, 0), &[Some(10.0), Some(20.0), Some(30.0)]);
        let avg = aggregate(
            &series,
            "temperature_2m",
            utc(1, 0),
            utc(1, 2),
            WindowMode::TrailingInclusive,
        );
        assert_eq!(avg, Some(20.0));
    }

    #[test]
    fn test_missing_field_is_none() {
        let series = hourly_series("temperature_2m", utc(1, 0), &[Some(10.0)]);
        assert_eq!(
            aggregate(&series, "wind_speed_10m", utc(1, 0), utc(1, 5), WindowMode::TrailingInclusive),
            None
        );
    }

    #[test]
    fn test_no_timestamp_in_window_is_none() {
        // All observations start after the window end.
        let series = hourly_series("temperature_2m", utc(5, 0), &[Some(10.0), Some(11.0)]);
        assert_eq!(
            aggregate(&series, "temperature_2m", utc(1, 0), utc(2, 0), WindowMode::TrailingInclusive),
            None
        );
    }

    #[test]
    fn test_all_null_in_range_is_none() {
        let series = hourly_series("temperature_2m", utc(1, 0), &[None, None, None]);
        assert_eq!(
            aggregate(&series, "temperature_2m", utc(1, 0), utc(1, 5), WindowMode::TrailingInclusive),
            None
        );
    }

    #[test]
    fn test_nulls_are_skipped_not_zeroed() {
        let series = hourly_series("temperature_2m", utc(1, 0), &[Some(10.0), None, Some(30.0)]);
        let avg = aggregate(
            &series,
            "temperature_2m",
            utc(1, 0),
            utc(1, 2),
            WindowMode::TrailingInclusive,
        );
        assert_eq!(avg, Some(20.0));
    }

    #[test]
    fn test_trailing_inclusive_ignores_window_start() {
        // Observations on day 1, window starting day 2: the historical
        // selection still includes them because only the end bounds it.
        let series = hourly_series("temperature_2m", utc(1, 0), &[Some(10.0), Some(20.0)]);
        let avg = aggregate(
            &series,
            "temperature_2m",
            utc(2, 0),
            utc(3, 0),
            WindowMode::TrailingInclusive,
        );
        assert_eq!(avg, Some(15.0));
    }

    #[test]
    fn test_bounded_applies_window_start() {
        let series = hourly_series("temperature_2m", utc(1, 0), &[Some(10.0), Some(20.0)]);
        assert_eq!(
            aggregate(&series, "temperature_2m", utc(2, 0), utc(3, 0), WindowMode::Bounded),
            None
        );

        // A window covering only the second observation keeps just it.
        let avg = aggregate(&series, "temperature_2m", utc(1, 1), utc(3, 0), WindowMode::Bounded);
        assert_eq!(avg, Some(20.0));
    }

    #[test]
    fn test_hour_truncation_at_window_end() {
        let mid_hour = Utc.with_ymd_and_hms(2024, 1, 1, 12, 59, 0).unwrap();
        let series = hourly_series("temperature_2m", mid_hour, &[Some(42.0)]);

        // 12:59 truncates to 12:00, which is <= the 12:00 window end.
        let avg = aggregate(
            &series,
            "temperature_2m",
            utc(1, 0),
            utc(1, 12),
            WindowMode::TrailingInclusive,
        );
        assert_eq!(avg, Some(42.0));
    }

    #[test]
    fn test_observations_after_window_end_excluded() {
        let series = hourly_series(
            "temperature_2m",
            utc(1, 0),
            &[Some(10.0), Some(20.0), Some(90.0)],
        );
        // Window ends at hour 1; the hour-2 observation must not count.
        let avg = aggregate(
            &series,
            "temperature_2m",
            utc(1, 0),
            utc(1, 1),
            WindowMode::TrailingInclusive,
        );
        assert_eq!(avg, Some(15.0));
    }
}
