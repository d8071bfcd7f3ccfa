//! HTTP surface for the atlas service.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, patch, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use uuid::Uuid;

use atlas_common::{
    AtlasError, DataSource, DataSourcePatch, LatLon, Polygon, PolygonPatch, TimeWindow,
    TimeWindowPatch,
};

use crate::state::AppState;

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/state", get(get_state))
        .route("/api/polygons", post(create_polygon))
        .route(
            "/api/polygons/:id",
            patch(update_polygon).delete(delete_polygon),
        )
        .route("/api/data-sources", get(list_data_sources))
        .route("/api/data-sources/:id", patch(update_data_source))
        .route("/api/timeline", put(set_timeline))
        .route("/api/map-center", put(set_map_center))
        .route("/api/selected-data-source", put(set_selected_data_source))
        .route("/api/drawing", put(set_drawing))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Error wrapper mapping AtlasError to an HTTP response.
pub struct ApiError(AtlasError);

impl<E: Into<AtlasError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Full application state as the UI consumes it.
#[derive(Debug, Serialize)]
struct StateView {
    polygons: Vec<Polygon>,
    data_sources: Vec<DataSource>,
    timeline: TimeWindow,
    map_center: LatLon,
    selected_data_source_id: Option<String>,
    is_drawing: bool,
    is_loading: bool,
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": "atlas-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

async fn get_state(Extension(state): Extension<Arc<AppState>>) -> Json<StateView> {
    let store = state.store.read().await;
    Json(StateView {
        polygons: store.polygons().to_vec(),
        data_sources: store.data_sources().to_vec(),
        timeline: store.timeline(),
        map_center: store.map_center(),
        selected_data_source_id: store.selected_data_source_id().map(String::from),
        is_drawing: store.is_drawing(),
        is_loading: store.is_loading(),
    })
}

/// A finalized draw.
#[derive(Debug, Deserialize)]
struct CreatePolygonRequest {
    name: String,
    coordinates: Vec<LatLon>,
    #[serde(default)]
    data_source: Option<String>,
}

async fn create_polygon(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<CreatePolygonRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let polygon = {
        let mut store = state.store.write().await;
        if let Some(source_id) = &request.data_source {
            if store.data_source(source_id).is_none() {
                return Err(AtlasError::DataSourceNotFound(source_id.clone()).into());
            }
        }

        let polygon = Polygon::new(request.name, request.coordinates, request.data_source)?;
        store.add_polygon(polygon.clone());
        polygon
    };

    state.save().await?;
    state.refresh_polygon(polygon.id).await;

    Ok((StatusCode::CREATED, Json(polygon)))
}

async fn update_polygon(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<Uuid>,
    Json(patch): Json<PolygonPatch>,
) -> Result<Json<Polygon>, ApiError> {
    // Only a geometry or binding change can alter the resolved color.
    let needs_refresh = patch.coordinates.is_some() || patch.data_source.is_some();

    let polygon = {
        let mut store = state.store.write().await;
        store.update_polygon(id, patch)?.clone()
    };

    state.save().await?;
    if needs_refresh {
        state.refresh_polygon(id).await;
    }

    Ok(Json(polygon))
}

async fn delete_polygon(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    if !state.remove_polygon(id).await {
        return Err(AtlasError::PolygonNotFound(id).into());
    }
    state.save().await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_data_sources(
    Extension(state): Extension<Arc<AppState>>,
) -> Json<Vec<DataSource>> {
    Json(state.store.read().await.data_sources().to_vec())
}

async fn update_data_source(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<String>,
    Json(patch): Json<DataSourcePatch>,
) -> Result<Json<DataSource>, ApiError> {
    let source = {
        let mut store = state.store.write().await;
        store.update_data_source(&id, patch)?.clone()
    };

    state.save().await?;
    state.refresh_for_source(&id).await;

    Ok(Json(source))
}

async fn set_timeline(
    Extension(state): Extension<Arc<AppState>>,
    Json(patch): Json<TimeWindowPatch>,
) -> Json<TimeWindow> {
    let timeline = {
        let mut store = state.store.write().await;
        store.set_timeline(patch);
        store.timeline()
    };

    // The timeline is not persisted; only colors react to it.
    state.refresh_all().await;

    Json(timeline)
}

async fn set_map_center(
    Extension(state): Extension<Arc<AppState>>,
    Json(center): Json<LatLon>,
) -> Result<Json<LatLon>, ApiError> {
    state.store.write().await.set_map_center(center);
    state.save().await?;
    Ok(Json(center))
}

#[derive(Debug, Deserialize)]
struct SelectSourceRequest {
    id: String,
}

async fn set_selected_data_source(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<SelectSourceRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .store
        .write()
        .await
        .set_selected_data_source(request.id)?;
    state.save().await?;
    Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
struct DrawingRequest {
    is_drawing: bool,
}

async fn set_drawing(
    Extension(state): Extension<Arc<AppState>>,
    Json(request): Json<DrawingRequest>,
) -> StatusCode {
    state.store.write().await.set_drawing(request.is_drawing);
    StatusCode::NO_CONTENT
}
