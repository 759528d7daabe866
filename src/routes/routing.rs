use crate::error::Result;
use crate::models::route::{
    parse_waypoints, GreenRouteRequest, GreenRouteResponse, PlainRouteRequest,
};
use crate::services::valhalla::RouteRequest;
use crate::AppState;
use axum::{extract::State, Json};
use serde_json::Value;
use std::sync::Arc;

/// POST /api/route
/// Forward a routing request to the engine and return its answer unchanged
pub async fn plain_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<PlainRouteRequest>,
) -> Result<Json<Value>> {
    let waypoints = parse_waypoints(&request.points)?;

    tracing::info!(
        waypoints = waypoints.len(),
        costing = %request.costing,
        alternatives = request.alternatives,
        "Route request: {} waypoints, costing={}, alternatives={}",
        waypoints.len(), request.costing, request.alternatives
    );

    let engine_request = RouteRequest::plain(
        &waypoints,
        &request.costing,
        request.alternatives,
        &state.config.routing.language,
    );

    Ok(Json(state.engine.route(&engine_request).await?))
}

/// POST /api/green-route
/// Greenest alternative within `max_extra_minutes` of the fastest route
pub async fn green_route(
    State(state): State<Arc<AppState>>,
    Json(request): Json<GreenRouteRequest>,
) -> Result<Json<GreenRouteResponse>> {
    let waypoints = parse_waypoints(&request.points)?;

    tracing::info!(
        waypoints = waypoints.len(),
        max_extra_minutes = request.max_extra_minutes,
        prefer_parks = request.prefer_parks,
        prefer_trees = request.prefer_trees,
        "Green route request: {} waypoints, max +{} min",
        waypoints.len(), request.max_extra_minutes
    );

    let decision = state
        .green_routes
        .compute_green_route(
            &waypoints,
            request.max_extra_minutes,
            request.prefer_parks,
            request.prefer_trees,
        )
        .await?;

    Ok(Json(decision.into()))
}
