//! HTTP client for the archive API.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error, warn};

use crate::error::FetchError;
use crate::series::{HourlySeries, RawResponse};

/// One fetch: a coordinate, a window, and the variable to retrieve.
#[derive(Debug, Clone)]
pub struct HourlyRequest {
    /// Archive endpoint, e.g. "https://archive-api.open-meteo.com/v1/archive".
    pub endpoint: String,
    pub latitude: f64,
    pub longitude: f64,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Hourly variable key, e.g. "temperature_2m".
    pub field: String,
}

/// Seam between the resolver and the archive, mockable in tests.
#[async_trait]
pub trait WeatherArchive: Send + Sync {
    /// Fetch the hourly series for a request.
    ///
    /// `Ok(None)` means the requested window lies entirely beyond the
    /// archive's availability horizon; no request is made in that case.
    async fn fetch_hourly(&self, request: &HourlyRequest)
        -> Result<Option<HourlySeries>, FetchError>;
}

#[async_trait]
impl<T: WeatherArchive + ?Sized> WeatherArchive for std::sync::Arc<T> {
    async fn fetch_hourly(
        &self,
        request: &HourlyRequest,
    ) -> Result<Option<HourlySeries>, FetchError> {
        (**self).fetch_hourly(request).await
    }
}

/// Reqwest-backed archive client.
pub struct ArchiveClient {
    client: Client,
}

impl ArchiveClient {
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl WeatherArchive for ArchiveClient {
    async fn fetch_hourly(
        &self,
        request: &HourlyRequest,
    ) -> Result<Option<HourlySeries>, FetchError> {
        let Some((start_date, end_date)) = clamp_window(request.start, request.end, Utc::now())
        else {
            warn!(
                start = %request.start,
                end = %request.end,
                "window starts after the latest available archive day, skipping fetch"
            );
            return Ok(None);
        };

        debug!(
            endpoint = %request.endpoint,
            lat = request.latitude,
            lon = request.longitude,
            start_date = %start_date,
            end_date = %end_date,
            field = %request.field,
            "fetching hourly series"
        );

        let response = self
            .client
            .get(&request.endpoint)
            .query(&[
                ("latitude", request.latitude.to_string()),
                ("longitude", request.longitude.to_string()),
                ("start_date", start_date.format("%Y-%m-%d").to_string()),
                ("end_date", end_date.format("%Y-%m-%d").to_string()),
                ("hourly", request.field.clone()),
            ])
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, endpoint = %request.endpoint, "archive request failed");
                FetchError::Transport(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = match response.json::<ErrorPayload>().await {
                Ok(payload) => payload.reason,
                Err(_) => status
                    .canonical_reason()
                    .unwrap_or("unknown error")
                    .to_string(),
            };
            error!(status = status.as_u16(), reason = %reason, "archive rejected request");
            return Err(FetchError::Api {
                status: status.as_u16(),
                reason,
            });
        }

        let raw: RawResponse = response.json().await.map_err(|e| {
            if e.is_decode() {
                FetchError::Malformed(e.to_string())
            } else {
                FetchError::Transport(e)
            }
        })?;

        HourlySeries::try_from(raw).map(Some)
    }
}

/// Archive error body: `{"error": true, "reason": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorPayload {
    reason: String,
}

/// Clamp a window to the archive's availability horizon.
///
/// The archive serves nothing newer than one full day in the past, so the
/// end date is clamped to yesterday. Returns `None` when the start date
/// falls after the clamped end, meaning there is nothing to fetch.
fn clamp_window(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Option<(NaiveDate, NaiveDate)> {
    let yesterday = (now - ChronoDuration::days(1)).date_naive();
    let end_date = end.date_naive().min(yesterday);
    let start_date = start.date_naive();

    if start_date > end_date {
        return None;
    }
    Some((start_date, end_date))
}
