//! Snapshot persistence: one named JSON blob on disk.
//!
//! Writes go to a temp file in the same directory followed by a rename,
//! so a crash mid-write leaves the previous blob intact.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::{debug, info};

use atlas_common::{AtlasError, AtlasResult, DataSource, LatLon, Polygon};

/// The persisted slice of application state.
///
/// Drawing/loading flags and the in-progress timeline are deliberately
/// absent; they reset on every start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub polygons: Vec<Polygon>,
    pub data_sources: Vec<DataSource>,
    pub map_center: LatLon,
    pub selected_data_source_id: Option<String>,
}

/// Load a snapshot, or `None` when no blob exists yet.
pub async fn load(path: &Path) -> AtlasResult<Option<Snapshot>> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no persisted state, starting fresh");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
    info!(
        path = %path.display(),
        polygons = snapshot.polygons.len(),
        sources = snapshot.data_sources.len(),
        "restored persisted state"
    );
    Ok(Some(snapshot))
}

/// Write the snapshot atomically.
pub async fn save(path: &Path, snapshot: &Snapshot) -> AtlasResult<()> {
    let bytes = serde_json::to_vec_pretty(snapshot)?;

    let tmp = path.with_extension("json.tmp");
    fs::write(&tmp, &bytes).await?;
    fs::rename(&tmp, path).await.map_err(|e| {
        AtlasError::PersistenceError(format!(
            "failed to move {} into place: {}",
            tmp.display(),
            e
        ))
    })?;

    debug!(path = %path.display(), bytes = bytes.len(), "persisted state");
    Ok(())
}
