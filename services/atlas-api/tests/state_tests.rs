//! Refresh loop and supersession behavior.

mod support;

use std::sync::Arc;

use atlas_common::{Color, ColorRule, CompareOp, DataSourcePatch, LatLon, Polygon};
use resolver::Resolution;
use support::{test_state, FailingArchive, WarmArchive};

fn bound_polygon() -> Polygon {
    Polygon::new(
        "Area",
        vec![
            LatLon::new(0.0, 0.0),
            LatLon::new(0.0, 10.0),
            LatLon::new(10.0, 0.0),
        ],
        Some("openmeteo-temp".to_string()),
    )
    .unwrap()
}

#[tokio::test]
async fn refresh_applies_resolved_color() {
    let (state, _dir) = test_state(Arc::new(WarmArchive)).await;

    let polygon = bound_polygon();
    let id = polygon.id;
    state.store.write().await.add_polygon(polygon);

    let handle = state.refresh_polygon(id).await.unwrap();
    handle.await.unwrap();

    // Mean 20.0 takes the first matching default band, ">= 0" Cold.
    let color = state.store.read().await.polygon(id).unwrap().color;
    assert_eq!(color, Color::rgb(0x10, 0xB9, 0x81));
}

#[tokio::test]
async fn failed_fetch_paints_error_color_only_for_that_polygon() {
    let (state, _dir) = test_state(Arc::new(FailingArchive)).await;

    let bound = bound_polygon();
    let bound_id = bound.id;
    let unbound = Polygon::new(
        "Unbound",
        vec![
            LatLon::new(1.0, 1.0),
            LatLon::new(1.0, 2.0),
            LatLon::new(2.0, 1.0),
        ],
        None,
    )
    .unwrap();
    let unbound_id = unbound.id;

    {
        let mut store = state.store.write().await;
        store.add_polygon(bound);
        store.add_polygon(unbound);
    }

    state.refresh_all().await.await.unwrap();

    let store = state.store.read().await;
    assert_eq!(store.polygon(bound_id).unwrap().color, Color::ERROR);
    // The unbound polygon resolves to neutral, unaffected by the failure.
    assert_eq!(store.polygon(unbound_id).unwrap().color, Color::NEUTRAL);
}

#[tokio::test]
async fn stale_generation_is_discarded() {
    let (state, _dir) = test_state(Arc::new(WarmArchive)).await;

    let polygon = bound_polygon();
    let id = polygon.id;
    state.store.write().await.add_polygon(polygon);

    let stale = state.tracker().begin(id);
    let current = state.tracker().begin(id);

    let fresh = Resolution::Matched(Color::rgb(0x10, 0xB9, 0x81));
    assert!(state.apply_resolution(id, current, fresh).await);

    // The superseded completion must not overwrite the newer one.
    let outdated = Resolution::Matched(Color::rgb(0xEF, 0x44, 0x44));
    assert!(!state.apply_resolution(id, stale, outdated).await);

    let color = state.store.read().await.polygon(id).unwrap().color;
    assert_eq!(color, fresh.color());
}

#[tokio::test]
async fn later_refresh_snapshot_wins_over_earlier() {
    let (state, _dir) = test_state(Arc::new(WarmArchive)).await;

    let polygon = bound_polygon();
    let id = polygon.id;
    state.store.write().await.add_polygon(polygon);

    let first = state.refresh_polygon(id).await.unwrap();

    // Rewrite the rules so the same mean 20.0 now maps to a single band.
    let hot = Color::rgb(0xEF, 0x44, 0x44);
    state
        .store
        .write()
        .await
        .update_data_source(
            "openmeteo-temp",
            DataSourcePatch {
                rules: Some(vec![ColorRule::new(CompareOp::Ge, 0.0, hot, "Hot")]),
                ..Default::default()
            },
        )
        .unwrap();

    let second = state.refresh_polygon(id).await.unwrap();
    first.await.unwrap();
    second.await.unwrap();

    // The refresh that snapshotted the newer rules carries the higher
    // generation, so its color sticks regardless of completion order.
    let color = state.store.read().await.polygon(id).unwrap().color;
    assert_eq!(color, hot);
}

#[tokio::test]
async fn completion_for_removed_polygon_is_discarded() {
    let (state, _dir) = test_state(Arc::new(WarmArchive)).await;

    let polygon = bound_polygon();
    let id = polygon.id;
    state.store.write().await.add_polygon(polygon);

    let generation = state.tracker().begin(id);
    assert!(state.remove_polygon(id).await);

    let applied = state
        .apply_resolution(id, generation, Resolution::Matched(Color::ERROR))
        .await;
    assert!(!applied);
    assert!(state.store.read().await.polygon(id).is_none());
}

#[tokio::test]
async fn refresh_all_clears_loading_flag_when_settled() {
    let (state, _dir) = test_state(Arc::new(WarmArchive)).await;
    state.store.write().await.add_polygon(bound_polygon());

    let supervisor = state.refresh_all().await;
    supervisor.await.unwrap();

    assert!(!state.store.read().await.is_loading());
}

#[tokio::test]
async fn state_survives_restart_via_blob() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    let polygon = bound_polygon();
    let id = polygon.id;
    let coordinates = polygon.coordinates.clone();

    {
        let state = atlas_api::state::AppState::new(
            Arc::new(WarmArchive),
            resolver::WindowMode::TrailingInclusive,
            "http://archive.test".to_string(),
            path.clone(),
        )
        .await
        .unwrap();
        state.store.write().await.add_polygon(polygon);
        state.save().await.unwrap();
    }

    let reloaded = atlas_api::state::AppState::new(
        Arc::new(WarmArchive),
        resolver::WindowMode::TrailingInclusive,
        "http://archive.test".to_string(),
        path,
    )
    .await
    .unwrap();

    let store = reloaded.store.read().await;
    let restored = store.polygon(id).unwrap();
    assert_eq!(restored.coordinates, coordinates);
    assert_eq!(restored.data_source.as_deref(), Some("openmeteo-temp"));
}
