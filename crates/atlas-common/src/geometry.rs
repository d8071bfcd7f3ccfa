//! Geographic vertex, bounding box, and centroid helpers.
//!
//! Coordinates are EPSG:4326 latitude/longitude in degrees.

use serde::{Deserialize, Serialize};

/// A single geographic vertex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Axis-aligned bounding box over a vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl Bounds {
    /// Check if a point lies within this box (inclusive).
    pub fn contains(&self, point: LatLon) -> bool {
        point.lat <= self.north
            && point.lat >= self.south
            && point.lon <= self.east
            && point.lon >= self.west
    }
}

/// Compute the bounding box of a vertex list: min/max per axis.
///
/// Callers guarantee at least one vertex; polygon construction enforces
/// the real minimum of three.
pub fn bounds(coordinates: &[LatLon]) -> Bounds {
    let mut bounds = Bounds {
        north: f64::NEG_INFINITY,
        south: f64::INFINITY,
        east: f64::NEG_INFINITY,
        west: f64::INFINITY,
    };

    for vertex in coordinates {
        bounds.north = bounds.north.max(vertex.lat);
        bounds.south = bounds.south.min(vertex.lat);
        bounds.east = bounds.east.max(vertex.lon);
        bounds.west = bounds.west.min(vertex.lon);
    }

    bounds
}

/// Compute the arithmetic-mean centroid of a vertex list.
///
/// This is the mean of the vertices, not the area centroid; it is the
/// representative point sampled for weather data.
pub fn centroid(coordinates: &[LatLon]) -> LatLon {
    let n = coordinates.len() as f64;
    let (lat_sum, lon_sum) = coordinates
        .iter()
        .fold((0.0, 0.0), |(lat, lon), v| (lat + v.lat, lon + v.lon));

    LatLon::new(lat_sum / n, lon_sum / n)
}
