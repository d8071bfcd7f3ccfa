//! Error types for weather-atlas services.

use thiserror::Error;
use uuid::Uuid;

/// Result type alias using AtlasError.
pub type AtlasResult<T> = Result<T, AtlasError>;

/// Primary error type for atlas operations.
#[derive(Debug, Error)]
pub enum AtlasError {
    // === Domain Errors ===
    #[error("Polygon not found: {0}")]
    PolygonNotFound(Uuid),

    #[error("Data source not found: {0}")]
    DataSourceNotFound(String),

    #[error("Invalid polygon: {0}")]
    InvalidPolygon(String),

    #[error("Invalid color value: {0}")]
    InvalidColor(String),

    // === Infrastructure Errors ===
    #[error("Persistence error: {0}")]
    PersistenceError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AtlasError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            AtlasError::InvalidPolygon(_) | AtlasError::InvalidColor(_) => 400,
            AtlasError::PolygonNotFound(_) | AtlasError::DataSourceNotFound(_) => 404,
            _ => 500,
        }
    }
}

// Conversion from common error types
impl From<std::io::Error> for AtlasError {
    fn from(err: std::io::Error) -> Self {
        AtlasError::PersistenceError(err.to_string())
    }
}

impl From<serde_json::Error> for AtlasError {
    fn from(err: serde_json::Error) -> Self {
        AtlasError::PersistenceError(format!("JSON error: {}", err))
    }
}
