//! Color resolution for polygons.
//!
//! Turns (polygon, data source, time window) into a display color:
//! fetch the centroid's hourly series, reduce the in-window observations
//! to one value, and classify it through the source's ordered rules.
//! Failures never escape this crate; they become the error color.

pub mod aggregate;
pub mod service;
pub mod tracker;

pub use aggregate::{aggregate, WindowMode};
pub use service::{ColorResolver, Resolution};
pub use tracker::ResolutionTracker;
