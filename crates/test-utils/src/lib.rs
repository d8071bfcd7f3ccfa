//! Shared test utilities for the weather-atlas workspace.

pub mod fixtures;

pub use fixtures::{hourly_series, hourly_series_at};
