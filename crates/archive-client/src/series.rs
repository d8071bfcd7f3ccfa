//! Parsed hourly time series.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::Deserialize;

use crate::error::FetchError;

/// An hourly time series for one coordinate.
///
/// `time` and each field's value list are index-aligned; gaps in archive
/// coverage appear as `None` values.
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySeries {
    pub latitude: f64,
    pub longitude: f64,
    pub time: Vec<DateTime<Utc>>,
    fields: HashMap<String, Vec<Option<f64>>>,
}

impl HourlySeries {
    /// Values for a named field, index-aligned with `time`.
    pub fn values(&self, field: &str) -> Option<&[Option<f64>]> {
        self.fields.get(field).map(Vec::as_slice)
    }

    #[doc(hidden)]
    pub fn from_parts(
        latitude: f64,
        longitude: f64,
        time: Vec<DateTime<Utc>>,
        fields: HashMap<String, Vec<Option<f64>>>,
    ) -> Self {
        Self {
            latitude,
            longitude,
            time,
            fields,
        }
    }
}

/// Raw archive response body.
#[derive(Debug, Deserialize)]
pub(crate) struct RawResponse {
    pub latitude: f64,
    pub longitude: f64,
    pub hourly: RawHourlyBlock,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RawHourlyBlock {
    pub time: Vec<String>,
    /// Everything that is not `time` is a value list for one variable.
    #[serde(flatten)]
    pub fields: HashMap<String, Vec<Option<f64>>>,
}

impl TryFrom<RawResponse> for HourlySeries {
    type Error = FetchError;

    fn try_from(raw: RawResponse) -> Result<Self, Self::Error> {
        let time = raw
            .hourly
            .time
            .iter()
            .map(|s| parse_archive_timestamp(s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(HourlySeries {
            latitude: raw.latitude,
            longitude: raw.longitude,
            time,
            fields: raw.hourly.fields,
        })
    }
}

/// Parse the archive's naive timestamps ("2024-01-15T06:00") as UTC.
fn parse_archive_timestamp(s: &str) -> Result<DateTime<Utc>, FetchError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .map(|ndt| Utc.from_utc_datetime(&ndt))
        .map_err(|_| FetchError::Malformed(format!("invalid timestamp: {}", s)))
}
