//! Canned hourly series for aggregation and resolution tests.

use std::collections::HashMap;

use archive_client::HourlySeries;
use chrono::{DateTime, Duration, Utc};

/// Build an hourly series for one field, one observation per hour
/// starting at `start`, located at the origin.
pub fn hourly_series(field: &str, start: DateTime<Utc>, values: &[Option<f64>]) -> HourlySeries {
    hourly_series_at(0.0, 0.0, field, start, values)
}

/// Like [`hourly_series`] with an explicit coordinate.
pub fn hourly_series_at(
    latitude: f64,
    longitude: f64,
    field: &str,
    start: DateTime<Utc>,
    values: &[Option<f64>],
) -> HourlySeries {
    let time: Vec<DateTime<Utc>> = (0..values.len())
        .map(|i| start + Duration::hours(i as i64))
        .collect();

    let mut fields = HashMap::new();
    fields.insert(field.to_string(), values.to_vec());

    HourlySeries::from_parts(latitude, longitude, time, fields)
}
