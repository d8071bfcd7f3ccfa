//! Common types shared across the weather-atlas workspace.

pub mod color;
pub mod error;
pub mod geometry;
pub mod polygon;
pub mod rules;
pub mod source;
pub mod timeline;

pub use color::Color;
pub use error::{AtlasError, AtlasResult};
pub use geometry::{Bounds, LatLon};
pub use polygon::{Polygon, PolygonPatch};
pub use rules::{first_match, ColorRule, CompareOp};
pub use source::{DataSource, DataSourcePatch};
pub use timeline::{TimeWindow, TimeWindowPatch};
