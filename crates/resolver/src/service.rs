//! The color resolution orchestrator.

use archive_client::{FetchError, HourlyRequest, WeatherArchive};
use atlas_common::{first_match, Color, DataSource, Polygon, TimeWindow};
use tracing::error;

use crate::aggregate::{aggregate, WindowMode};

/// Outcome of one resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// A value was aggregated and classified through the rules.
    Matched(Color),
    /// No source, no configured field, or no data in the window.
    NoData,
    /// The fetch failed; surfaced as the distinct error color.
    Failed,
}

impl Resolution {
    /// The display color for this outcome.
    pub fn color(&self) -> Color {
        match self {
            Resolution::Matched(color) => *color,
            Resolution::NoData => Color::NEUTRAL,
            Resolution::Failed => Color::ERROR,
        }
    }
}

/// Ties the archive client, aggregator, and rule evaluation together.
///
/// `resolve` never returns an error: every failure is absorbed here and
/// mapped to a color, so one polygon's failure cannot stall another's.
pub struct ColorResolver<A> {
    archive: A,
    mode: WindowMode,
    /// Endpoint used when a data source leaves `api_url` empty.
    default_endpoint: String,
}

impl<A: WeatherArchive> ColorResolver<A> {
    pub fn new(archive: A, mode: WindowMode, default_endpoint: impl Into<String>) -> Self {
        Self {
            archive,
            mode,
            default_endpoint: default_endpoint.into(),
        }
    }

    pub fn window_mode(&self) -> WindowMode {
        self.mode
    }

    /// Resolve the display color for one polygon.
    pub async fn resolve(
        &self,
        polygon: &Polygon,
        source: Option<&DataSource>,
        window: &TimeWindow,
    ) -> Resolution {
        let Some(source) = source else {
            return Resolution::NoData;
        };
        if polygon.data_source.is_none() || source.field.is_empty() {
            return Resolution::NoData;
        }

        match self.try_resolve(polygon, source, window).await {
            Ok(resolution) => resolution,
            Err(e) => {
                error!(
                    polygon = %polygon.id,
                    source = %source.id,
                    error = %e,
                    "color resolution failed"
                );
                Resolution::Failed
            }
        }
    }

    async fn try_resolve(
        &self,
        polygon: &Polygon,
        source: &DataSource,
        window: &TimeWindow,
    ) -> Result<Resolution, FetchError> {
        let endpoint = if source.api_url.is_empty() {
            self.default_endpoint.clone()
        } else {
            source.api_url.clone()
        };

        let request = HourlyRequest {
            endpoint,
            latitude: polygon.centroid.lat,
            longitude: polygon.centroid.lon,
            start: window.start,
            end: window.end,
            field: source.field.clone(),
        };

        let Some(series) = self.archive.fetch_hourly(&request).await? else {
            return Ok(Resolution::NoData);
        };

        let Some(value) = aggregate(&series, &source.field, window.start, window.end, self.mode)
        else {
            return Ok(Resolution::NoData);
        };

        let color = first_match(value, &source.rules)
            .map(|rule| rule.color)
            .unwrap_or(Color::NEUTRAL);

        Ok(Resolution::Matched(color))
    }
}
