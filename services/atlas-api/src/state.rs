//! Shared application state and the color refresh loop.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::debug;
use uuid::Uuid;

use archive_client::WeatherArchive;
use atlas_common::AtlasResult;
use resolver::{ColorResolver, Resolution, ResolutionTracker, WindowMode};

use crate::persist;
use crate::store::Store;

/// Shared application state.
///
/// Color refreshes run as one spawned task per polygon; completions are
/// applied through the generation tracker so a stale or orphaned result
/// is discarded instead of overwriting newer state.
pub struct AppState {
    pub store: RwLock<Store>,
    resolver: ColorResolver<Arc<dyn WeatherArchive>>,
    tracker: ResolutionTracker,
    persist_path: PathBuf,
}

impl AppState {
    /// Build state, restoring the persisted blob when one exists.
    pub async fn new(
        archive: Arc<dyn WeatherArchive>,
        mode: WindowMode,
        default_endpoint: String,
        persist_path: PathBuf,
    ) -> AtlasResult<Self> {
        let mut store = Store::new(chrono::Utc::now());
        if let Some(snapshot) = persist::load(&persist_path).await? {
            store.restore(snapshot);
        }

        Ok(Self {
            store: RwLock::new(store),
            resolver: ColorResolver::new(archive, mode, default_endpoint),
            tracker: ResolutionTracker::new(),
            persist_path,
        })
    }

    /// Persist the current snapshot.
    pub async fn save(&self) -> AtlasResult<()> {
        let snapshot = self.store.read().await.snapshot();
        persist::save(&self.persist_path, &snapshot).await
    }

    /// Remove a polygon and forget its in-flight resolutions.
    pub async fn remove_polygon(&self, id: Uuid) -> bool {
        let removed = self.store.write().await.remove_polygon(id);
        if removed {
            self.tracker.forget(id);
        }
        removed
    }

    /// Start an independent color resolution for one polygon.
    ///
    /// Returns `None` when the polygon no longer exists. The returned
    /// handle completes once the result has been applied or discarded.
    pub async fn refresh_polygon(self: &Arc<Self>, id: Uuid) -> Option<JoinHandle<()>> {
        // The generation is issued under the same read lock that takes the
        // snapshot; generation order therefore matches snapshot order.
        let (polygon, source, window, generation) = {
            let store = self.store.read().await;
            let polygon = store.polygon(id)?.clone();
            let source = polygon
                .data_source
                .as_deref()
                .and_then(|sid| store.data_source(sid))
                .cloned();
            (polygon, source, store.timeline(), self.tracker.begin(id))
        };

        let state = Arc::clone(self);

        Some(tokio::spawn(async move {
            let resolution = state
                .resolver
                .resolve(&polygon, source.as_ref(), &window)
                .await;
            state.apply_resolution(id, generation, resolution).await;
        }))
    }

    /// Refresh every polygon, each as its own task.
    ///
    /// The returned handle completes when all resolutions have settled;
    /// the loading flag is held for that span. Individual polygons update
    /// as their own resolutions finish, not as a batch.
    pub async fn refresh_all(self: &Arc<Self>) -> JoinHandle<()> {
        let ids: Vec<Uuid> = self
            .store
            .read()
            .await
            .polygons()
            .iter()
            .map(|p| p.id)
            .collect();

        self.store.write().await.set_loading(true);

        let mut handles = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(handle) = self.refresh_polygon(id).await {
                handles.push(handle);
            }
        }

        let state = Arc::clone(self);
        tokio::spawn(async move {
            futures::future::join_all(handles).await;
            state.store.write().await.set_loading(false);
        })
    }

    /// Refresh the polygons bound to one data source.
    pub async fn refresh_for_source(self: &Arc<Self>, source_id: &str) -> Vec<JoinHandle<()>> {
        let ids: Vec<Uuid> = self
            .store
            .read()
            .await
            .polygons()
            .iter()
            .filter(|p| p.data_source.as_deref() == Some(source_id))
            .map(|p| p.id)
            .collect();

        let mut handles = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(handle) = self.refresh_polygon(id).await {
                handles.push(handle);
            }
        }
        handles
    }

    /// Apply a completed resolution.
    ///
    /// Discarded (returning false) when a newer resolution was issued for
    /// the same polygon in the meantime, or the polygon was removed.
    pub async fn apply_resolution(&self, id: Uuid, generation: u64, resolution: Resolution) -> bool {
        let mut store = self.store.write().await;

        if !self.tracker.is_current(id, generation) {
            debug!(polygon = %id, generation, "resolution superseded, discarding");
            return false;
        }
        if !store.set_polygon_color(id, resolution.color()) {
            debug!(polygon = %id, "polygon removed mid-resolution, discarding");
            return false;
        }
        true
    }

    pub fn tracker(&self) -> &ResolutionTracker {
        &self.tracker
    }
}
