pub mod debug;
pub mod features;
pub mod routing;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ping", get(features::ping))
        .route(
            "/features",
            get(features::list_markers).post(features::add_marker),
        )
        .route("/features/{fid}", delete(features::delete_marker))
        .route("/reset_features", post(features::reset_markers))
        .route("/districts", get(features::list_districts))
        .route("/api/route", post(routing::plain_route))
        .route("/api/green-route", post(routing::green_route))
        .route("/debug/test", get(debug::debug_test))
        .route("/debug/health", get(debug::health_check))
        .route("/debug/{category}", get(debug::green_area_collection))
        .with_state(state)
}
