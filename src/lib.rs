// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use config::Config;
use db::FeatureRepository;
use services::green_route::GreenRouteService;
use services::valhalla::RoutingEngine;
use std::sync::Arc;

// Read-only state shared by every request
pub struct AppState {
    pub repo: Arc<dyn FeatureRepository>,
    pub engine: Arc<dyn RoutingEngine>,
    pub green_routes: GreenRouteService,
    pub config: Config,
}

impl AppState {
    pub fn new(
        repo: Arc<dyn FeatureRepository>,
        engine: Arc<dyn RoutingEngine>,
        config: Config,
    ) -> Self {
        let green_routes = GreenRouteService::from_config(engine.clone(), &config.green_areas);
        AppState {
            repo,
            engine,
            green_routes,
            config,
        }
    }
}
