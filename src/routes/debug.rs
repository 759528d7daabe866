use crate::error::{AppError, Result};
use crate::models::GreenCategory;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::{json, Value};
use std::sync::Arc;

/// GET /debug/test
pub async fn debug_test() -> Json<Value> {
    Json(json!({"status": "debug endpoints working"}))
}

/// GET /debug/health - Check if services are working
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    let mut status = json!({
        "status": "ok",
        "checks": {}
    });

    // Check database
    match state.repo.ping().await {
        Ok(()) => {
            status["checks"]["database"] = json!("ok");
        }
        Err(e) => {
            status["checks"]["database"] = json!({"error": e.to_string()});
            status["status"] = json!("error");
        }
    }

    // Check marker count
    match state.repo.count_markers().await {
        Ok(count) => {
            status["checks"]["marker_count"] = json!(count);
        }
        Err(e) => {
            status["checks"]["marker_count"] = json!({"error": e.to_string()});
        }
    }

    Json(status)
}

/// GET /debug/{category} - Raw green-area collection for `parks` or `trees`
pub async fn green_area_collection(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<Value>> {
    let category: GreenCategory = category.parse().map_err(AppError::NotFound)?;

    let loader = state.green_routes.loader().clone();
    let read = tokio::task::spawn_blocking(move || loader.read_collection(category))
        .await
        .map_err(|e| AppError::Internal(format!("Green area read failed: {}", e)))?;

    let collection = match read {
        Ok(collection) => collection,
        Err(e) => {
            tracing::warn!(category = %category, error = %e, "Debug read of {} failed", category);
            return Ok(Json(json!({"error": e.to_string()})));
        }
    };

    let total_features = collection.features.len();
    let mut body = serde_json::to_value(&collection)
        .map_err(|e| AppError::Internal(format!("Failed to serialize collection: {}", e)))?;
    body["total_features"] = json!(total_features);

    Ok(Json(body))
}
