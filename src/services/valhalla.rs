use crate::config::RoutingConfig;
use crate::constants::*;
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

/// Anything that can answer a Valhalla-style `/route` request.
///
/// The raw JSON is returned so it can be forwarded to the caller unchanged.
#[async_trait]
pub trait RoutingEngine: Send + Sync {
    async fn route(&self, request: &RouteRequest) -> Result<Value>;
}

// Valhalla request types

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RouteRequest {
    pub locations: Vec<Location>,
    pub costing: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub costing_options: Option<CostingOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternates: Option<u32>,
    pub directions_options: DirectionsOptions,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,
}

impl From<&Coordinates> for Location {
    fn from(c: &Coordinates) -> Self {
        Location {
            lat: c.lat,
            lon: c.lng,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CostingOptions {
    pub pedestrian: PedestrianCosting,
}

#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct PedestrianCosting {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shortest: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walking_speed: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_penalty: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_hiking_difficulty: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_ferry: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_roads: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_tracks: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_footway: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_living_streets: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_sidewalk: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub walkway_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidewalk_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alley_factor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driveway_factor: Option<f64>,
}

impl PedestrianCosting {
    /// Fastest plausible walk, used for plain routing
    pub fn fastest() -> Self {
        PedestrianCosting {
            shortest: Some(true),
            walking_speed: Some(WALKING_SPEED_KMH),
            step_penalty: Some(0.0),
            max_hiking_difficulty: Some(MAX_HIKING_DIFFICULTY),
            use_ferry: Some(0.0),
            use_living_streets: Some(FAST_USE_LIVING_STREETS),
            use_tracks: Some(FAST_USE_TRACKS),
            ..Default::default()
        }
    }

    /// Footways, tracks and sidewalks over roads, used for green alternatives
    pub fn green() -> Self {
        PedestrianCosting {
            shortest: Some(false),
            walking_speed: Some(WALKING_SPEED_KMH),
            step_penalty: Some(0.0),
            max_hiking_difficulty: Some(MAX_HIKING_DIFFICULTY),
            use_roads: Some(GREEN_USE_ROADS),
            use_tracks: Some(GREEN_USE_TRACKS),
            use_footway: Some(GREEN_USE_FOOTWAY),
            use_living_streets: Some(GREEN_USE_LIVING_STREETS),
            use_sidewalk: Some(GREEN_USE_SIDEWALK),
            walkway_factor: Some(GREEN_WALKWAY_FACTOR),
            sidewalk_factor: Some(GREEN_SIDEWALK_FACTOR),
            alley_factor: Some(GREEN_ALLEY_FACTOR),
            driveway_factor: Some(GREEN_DRIVEWAY_FACTOR),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DirectionsOptions {
    pub units: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl DirectionsOptions {
    fn kilometers(language: Option<&str>) -> Self {
        DirectionsOptions {
            units: DIRECTIONS_UNITS.to_string(),
            language: language.map(|l| l.to_string()),
        }
    }
}

fn locations(waypoints: &[Coordinates]) -> Vec<Location> {
    waypoints.iter().map(Location::from).collect()
}

impl RouteRequest {
    /// Proxy request for `/api/route`. Alternates are only sent when more
    /// than one route is wanted, and never more than three.
    pub fn plain(
        waypoints: &[Coordinates],
        costing: &str,
        alternatives: u32,
        language: &str,
    ) -> Self {
        RouteRequest {
            locations: locations(waypoints),
            costing: costing.to_string(),
            costing_options: Some(CostingOptions {
                pedestrian: PedestrianCosting::fastest(),
            }),
            alternates: (alternatives > 1).then(|| alternatives.min(MAX_PLAIN_ALTERNATES)),
            directions_options: DirectionsOptions::kilometers(Some(language)),
        }
    }

    /// Reference route for the extra-time budget: default pedestrian costing
    pub fn baseline(waypoints: &[Coordinates]) -> Self {
        RouteRequest {
            locations: locations(waypoints),
            costing: DEFAULT_COSTING.to_string(),
            costing_options: None,
            alternates: None,
            directions_options: DirectionsOptions::kilometers(None),
        }
    }

    pub fn green_alternatives(waypoints: &[Coordinates]) -> Self {
        RouteRequest {
            locations: locations(waypoints),
            costing: DEFAULT_COSTING.to_string(),
            costing_options: Some(CostingOptions {
                pedestrian: PedestrianCosting::green(),
            }),
            alternates: Some(GREEN_MODE_ALTERNATES),
            directions_options: DirectionsOptions::kilometers(None),
        }
    }
}

#[derive(Clone)]
pub struct ValhallaClient {
    client: Client,
    base_url: String,
}

impl ValhallaClient {
    pub fn new(config: &RoutingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(ValhallaClient {
            client,
            base_url: config.valhalla_url.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl RoutingEngine for ValhallaClient {
    async fn route(&self, request: &RouteRequest) -> Result<Value> {
        let url = format!("{}/route", self.base_url);

        tracing::debug!(
            locations = request.locations.len(),
            costing = %request.costing,
            alternates = ?request.alternates,
            "Valhalla request: {} locations, costing {}",
            request.locations.len(), request.costing
        );

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::RoutingEngine("Request timed out".to_string())
                } else {
                    AppError::RoutingEngine(format!("Request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                locations = request.locations.len(),
                "Valhalla HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::RoutingEngine(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::RoutingEngine(format!("Failed to parse response: {}", e)))
    }
}
