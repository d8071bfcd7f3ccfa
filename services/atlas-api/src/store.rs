//! The owning state container.
//!
//! All mutation of polygons, data sources, and the time window goes
//! through this type; nothing else in the service holds writable domain
//! state. The drawing and loading flags are transient UI state and are
//! excluded from snapshots, as is the timeline.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use atlas_common::{
    AtlasError, AtlasResult, Color, DataSource, DataSourcePatch, LatLon, Polygon, PolygonPatch,
    TimeWindow, TimeWindowPatch,
};

use crate::persist::Snapshot;

/// Default map center (New Delhi).
const DEFAULT_MAP_CENTER: LatLon = LatLon {
    lat: 28.6139,
    lon: 77.209,
};

#[derive(Debug)]
pub struct Store {
    polygons: Vec<Polygon>,
    data_sources: Vec<DataSource>,
    timeline: TimeWindow,
    map_center: LatLon,
    selected_data_source_id: Option<String>,
    is_drawing: bool,
    is_loading: bool,
}

impl Store {
    /// Seed a fresh store: the default temperature source selected, the
    /// default map center, and a trailing 15-day window.
    pub fn new(now: DateTime<Utc>) -> Self {
        let default_source = DataSource::default_temperature();
        let selected = default_source.id.clone();

        Self {
            polygons: Vec::new(),
            data_sources: vec![default_source],
            timeline: TimeWindow::trailing_default(now),
            map_center: DEFAULT_MAP_CENTER,
            selected_data_source_id: Some(selected),
            is_drawing: false,
            is_loading: false,
        }
    }

    // === Polygons ===

    pub fn polygons(&self) -> &[Polygon] {
        &self.polygons
    }

    pub fn polygon(&self, id: Uuid) -> Option<&Polygon> {
        self.polygons.iter().find(|p| p.id == id)
    }

    pub fn add_polygon(&mut self, polygon: Polygon) {
        self.polygons.push(polygon);
    }

    /// Remove a polygon; true if it existed.
    pub fn remove_polygon(&mut self, id: Uuid) -> bool {
        let before = self.polygons.len();
        self.polygons.retain(|p| p.id != id);
        self.polygons.len() != before
    }

    pub fn update_polygon(&mut self, id: Uuid, patch: PolygonPatch) -> AtlasResult<&Polygon> {
        if let Some(Some(source_id)) = &patch.data_source {
            if self.data_source(source_id).is_none() {
                return Err(AtlasError::DataSourceNotFound(source_id.clone()));
            }
        }

        let polygon = self
            .polygons
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(AtlasError::PolygonNotFound(id))?;
        polygon.apply(patch)?;
        Ok(polygon)
    }

    /// Apply a resolved display color; false if the polygon is gone.
    pub fn set_polygon_color(&mut self, id: Uuid, color: Color) -> bool {
        match self.polygons.iter_mut().find(|p| p.id == id) {
            Some(polygon) => {
                polygon.color = color;
                true
            }
            None => false,
        }
    }

    // === Data sources ===

    pub fn data_sources(&self) -> &[DataSource] {
        &self.data_sources
    }

    pub fn data_source(&self, id: &str) -> Option<&DataSource> {
        self.data_sources.iter().find(|s| s.id == id)
    }

    pub fn update_data_source(&mut self, id: &str, patch: DataSourcePatch) -> AtlasResult<&DataSource> {
        let source = self
            .data_sources
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AtlasError::DataSourceNotFound(id.to_string()))?;
        source.apply(patch);
        Ok(source)
    }

    pub fn selected_data_source_id(&self) -> Option<&str> {
        self.selected_data_source_id.as_deref()
    }

    pub fn set_selected_data_source(&mut self, id: String) -> AtlasResult<()> {
        if self.data_source(&id).is_none() {
            return Err(AtlasError::DataSourceNotFound(id));
        }
        self.selected_data_source_id = Some(id);
        Ok(())
    }

    // === Timeline & map ===

    pub fn timeline(&self) -> TimeWindow {
        self.timeline
    }

    pub fn set_timeline(&mut self, patch: TimeWindowPatch) {
        self.timeline.apply(patch);
    }

    pub fn map_center(&self) -> LatLon {
        self.map_center
    }

    pub fn set_map_center(&mut self, center: LatLon) {
        self.map_center = center;
    }

    // === Transient flags ===

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn set_drawing(&mut self, drawing: bool) {
        self.is_drawing = drawing;
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.is_loading = loading;
    }

    // === Persistence ===

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            polygons: self.polygons.clone(),
            data_sources: self.data_sources.clone(),
            map_center: self.map_center,
            selected_data_source_id: self.selected_data_source_id.clone(),
        }
    }

    /// Restore persisted fields; transient state keeps its defaults.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.polygons = snapshot.polygons;
        self.data_sources = snapshot.data_sources;
        self.map_center = snapshot.map_center;
        self.selected_data_source_id = snapshot.selected_data_source_id;
    }
}
