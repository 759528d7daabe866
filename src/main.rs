use axum::http::HeaderValue;
use greenroute::config::Config;
use greenroute::db::{FeatureRepository, PgFeatureRepository};
use greenroute::services::valhalla::{RoutingEngine, ValhallaClient};
use greenroute::AppState;
use std::sync::Arc;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "greenroute=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting GreenRoute API server");
    tracing::info!(
        valhalla = %config.routing.valhalla_url,
        containment = ?config.green_areas.containment_mode,
        "Configuration loaded successfully"
    );

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = greenroute::db::create_pool(&config.database_url).await?;
    tracing::info!("Database connection established");

    // Initialize services
    let repo: Arc<dyn FeatureRepository> = Arc::new(PgFeatureRepository::new(db_pool));
    let engine: Arc<dyn RoutingEngine> = Arc::new(ValhallaClient::new(&config.routing)?);

    // Credentialed CORS needs explicit origins rather than a wildcard
    let origins = config
        .cors_allowed_origins
        .iter()
        .map(|origin| origin.parse::<HeaderValue>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| format!("Invalid CORS origin: {}", e))?;
    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let addr = config.server_address();

    // Create application state
    let state = Arc::new(AppState::new(repo, engine, config));

    // Build router with CORS and tracing
    let app = greenroute::routes::create_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start server
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
