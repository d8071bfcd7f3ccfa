//! Shared setup for atlas-api integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use archive_client::{FetchError, HourlyRequest, HourlySeries, WeatherArchive};
use atlas_api::state::AppState;
use resolver::WindowMode;
use test_utils::hourly_series;

/// Archive stub: every fetch yields the same warm temperatures (mean 20.0).
pub struct WarmArchive;

#[async_trait]
impl WeatherArchive for WarmArchive {
    async fn fetch_hourly(
        &self,
        request: &HourlyRequest,
    ) -> Result<Option<HourlySeries>, FetchError> {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        Ok(Some(hourly_series(
            &request.field,
            start,
            &[Some(19.0), Some(20.0), Some(21.0)],
        )))
    }
}

/// Archive stub that always fails.
pub struct FailingArchive;

#[async_trait]
impl WeatherArchive for FailingArchive {
    async fn fetch_hourly(
        &self,
        _request: &HourlyRequest,
    ) -> Result<Option<HourlySeries>, FetchError> {
        Err(FetchError::Api {
            status: 503,
            reason: "archive unavailable".to_string(),
        })
    }
}

/// Fresh state over a temp blob; the tempdir guards the file's lifetime.
pub async fn test_state(archive: Arc<dyn WeatherArchive>) -> (Arc<AppState>, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::new(
        archive,
        WindowMode::TrailingInclusive,
        "http://archive.test".to_string(),
        dir.path().join("state.json"),
    )
    .await
    .unwrap();
    (Arc::new(state), dir)
}
