//! User-drawn polygons with derived bounds and centroid.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::color::Color;
use crate::error::AtlasError;
use crate::geometry::{self, Bounds, LatLon};

/// Minimum vertices to finalize a draw.
pub const MIN_VERTICES: usize = 3;
/// Maximum vertices a single polygon may carry.
pub const MAX_VERTICES: usize = 12;

/// A drawn polygon bound to at most one data source.
///
/// `bounds` and `centroid` are derived from `coordinates` and recomputed
/// together whenever the coordinates change. Metadata updates (name,
/// source binding, display color) never touch them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub id: Uuid,
    pub name: String,
    /// Vertices in draw order.
    pub coordinates: Vec<LatLon>,
    /// Bound data source id, if any.
    pub data_source: Option<String>,
    /// Last resolved display color.
    pub color: Color,
    pub bounds: Bounds,
    pub centroid: LatLon,
}

impl Polygon {
    /// Finalize a draw into a polygon.
    ///
    /// Fails unless the vertex count is within 3..=12.
    pub fn new(
        name: impl Into<String>,
        coordinates: Vec<LatLon>,
        data_source: Option<String>,
    ) -> Result<Self, AtlasError> {
        validate_vertex_count(coordinates.len())?;

        let bounds = geometry::bounds(&coordinates);
        let centroid = geometry::centroid(&coordinates);

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.into(),
            coordinates,
            data_source,
            color: Color::NEUTRAL,
            bounds,
            centroid,
        })
    }

    /// Replace the vertex list, recomputing bounds and centroid together.
    pub fn set_coordinates(&mut self, coordinates: Vec<LatLon>) -> Result<(), AtlasError> {
        validate_vertex_count(coordinates.len())?;
        self.bounds = geometry::bounds(&coordinates);
        self.centroid = geometry::centroid(&coordinates);
        self.coordinates = coordinates;
        Ok(())
    }

    /// Apply a partial update. Only a coordinate change triggers the
    /// bounds/centroid recomputation.
    pub fn apply(&mut self, patch: PolygonPatch) -> Result<(), AtlasError> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(data_source) = patch.data_source {
            self.data_source = data_source;
        }
        if let Some(color) = patch.color {
            self.color = color;
        }
        if let Some(coordinates) = patch.coordinates {
            self.set_coordinates(coordinates)?;
        }
        Ok(())
    }
}

fn validate_vertex_count(count: usize) -> Result<(), AtlasError> {
    if !(MIN_VERTICES..=MAX_VERTICES).contains(&count) {
        return Err(AtlasError::InvalidPolygon(format!(
            "expected {} to {} vertices, got {}",
            MIN_VERTICES, MAX_VERTICES, count
        )));
    }
    Ok(())
}

/// Partial update for a polygon.
///
/// `data_source` is doubly optional: the outer level distinguishes "leave
/// the binding alone" from "set it", and the inner one allows unbinding.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolygonPatch {
    pub name: Option<String>,
    #[serde(default, with = "double_option")]
    pub data_source: Option<Option<String>>,
    pub color: Option<Color>,
    pub coordinates: Option<Vec<LatLon>>,
}

/// Keeps `"data_source": null` distinguishable from an absent key.
mod double_option {
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        T: Deserialize<'de>,
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
