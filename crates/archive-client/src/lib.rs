//! Client for the historical weather archive.
//!
//! One request per color resolution: given a coordinate, a day-granular
//! date range, and an hourly variable name, fetch the matching time
//! series. Responses are transient; nothing is cached across calls.

pub mod client;
pub mod error;
pub mod series;

pub use client::{ArchiveClient, HourlyRequest, WeatherArchive};
pub use error::FetchError;
pub use series::HourlySeries;
