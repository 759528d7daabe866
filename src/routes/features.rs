use crate::error::{AppError, Result};
use crate::models::{District, Marker, NewMarker};
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /ping
pub async fn ping() -> Json<Value> {
    Json(json!({"ok": true, "service": "backend"}))
}

/// GET /features
pub async fn list_markers(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Marker>>> {
    let markers = state.repo.list_markers().await?;
    tracing::debug!(count = markers.len(), "Listing {} markers", markers.len());
    Ok(Json(markers))
}

/// POST /features
pub async fn add_marker(
    State(state): State<Arc<AppState>>,
    Json(marker): Json<NewMarker>,
) -> Result<Json<Value>> {
    marker.validate().map_err(AppError::InvalidRequest)?;

    let id = state.repo.insert_marker(&marker).await?;
    tracing::info!(
        id,
        marker_type = %marker.marker_type,
        lat = marker.lat,
        lng = marker.lng,
        "Added marker {} '{}'",
        id, marker.name
    );

    Ok(Json(json!({"status": "ok", "id": id})))
}

/// DELETE /features/{fid}
pub async fn delete_marker(
    State(state): State<Arc<AppState>>,
    Path(fid): Path<i32>,
) -> Result<Json<Value>> {
    if !state.repo.delete_marker(fid).await? {
        return Err(AppError::NotFound("Feature not found".to_string()));
    }

    tracing::info!(id = fid, "Deleted marker {}", fid);
    Ok(Json(json!({"status": "deleted", "id": fid})))
}

/// POST /reset_features
pub async fn reset_markers(State(state): State<Arc<AppState>>) -> Result<Json<Value>> {
    state.repo.reset_markers().await?;
    Ok(Json(json!({"status": "reset_done"})))
}

/// GET /districts
pub async fn list_districts(State(state): State<Arc<AppState>>) -> Result<Json<Vec<District>>> {
    Ok(Json(state.repo.list_districts().await?))
}
