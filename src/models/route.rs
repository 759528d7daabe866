use crate::constants::{DEFAULT_COSTING, DEFAULT_MAX_EXTRA_MINUTES};
use crate::error::{AppError, Result};
use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

/// One routed leg as returned by the engine.
///
/// Only `shape` and `summary` are interpreted; every other field is kept in
/// `extra` so the leg serializes back unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteLeg {
    #[serde(default)]
    pub shape: String,
    #[serde(default)]
    pub summary: LegSummary,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct LegSummary {
    /// Seconds
    #[serde(default)]
    pub time: f64,
    /// Kilometers (we always request `units: kilometers`)
    #[serde(default)]
    pub length: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RouteLeg {
    pub fn new(shape: impl Into<String>, time: f64, length: f64) -> Self {
        RouteLeg {
            shape: shape.into(),
            summary: LegSummary {
                time,
                length,
                extra: Map::new(),
            },
            extra: Map::new(),
        }
    }

    pub fn duration_seconds(&self) -> f64 {
        self.summary.time
    }

    pub fn length_meters(&self) -> f64 {
        self.summary.length * 1000.0
    }
}

// Engine response envelope, only the parts we read

#[derive(Debug, Default, Deserialize)]
struct TripEnvelope {
    #[serde(default)]
    trip: Trip,
    #[serde(default)]
    alternates: Vec<AlternateEnvelope>,
}

#[derive(Debug, Default, Deserialize)]
struct Trip {
    #[serde(default)]
    legs: Vec<RouteLeg>,
}

#[derive(Debug, Deserialize)]
struct AlternateEnvelope {
    #[serde(default)]
    trip: Trip,
}

fn parse_envelope(response: &Value) -> Result<TripEnvelope> {
    TripEnvelope::deserialize(response).map_err(|e| {
        AppError::RoutingEngine(format!("Unexpected route response shape: {}", e))
    })
}

/// `trip.legs` of an engine response.
pub fn trip_legs(response: &Value) -> Result<Vec<RouteLeg>> {
    Ok(parse_envelope(response)?.trip.legs)
}

/// Candidate legs of an alternatives request: `trip.legs` in order, then the
/// first leg of each entry in the engine's `alternates` array.
pub fn alternative_legs(response: &Value) -> Result<Vec<RouteLeg>> {
    let envelope = parse_envelope(response)?;
    let mut legs = envelope.trip.legs;
    legs.extend(
        envelope
            .alternates
            .into_iter()
            .filter_map(|alt| alt.trip.legs.into_iter().next()),
    );
    Ok(legs)
}

/// Convert `[lon, lat]` request points into waypoints.
/// The point count is checked before any coordinate is validated.
pub fn parse_waypoints(points: &[[f64; 2]]) -> Result<Vec<Coordinates>> {
    if points.len() < 2 {
        return Err(AppError::MissingWaypoints);
    }
    points
        .iter()
        .map(|p| Coordinates::from_lon_lat(*p).map_err(AppError::InvalidRequest))
        .collect()
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct PlainRouteRequest {
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
    #[serde(default = "default_costing")]
    pub costing: String,
    #[serde(default = "default_alternatives")]
    pub alternatives: u32,
}

fn default_costing() -> String {
    DEFAULT_COSTING.to_string()
}

fn default_alternatives() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct GreenRouteRequest {
    #[serde(default)]
    pub points: Vec<[f64; 2]>,
    #[serde(default = "default_max_extra_minutes")]
    pub max_extra_minutes: f64,
    #[serde(default = "default_true")]
    pub prefer_parks: bool,
    #[serde(default = "default_true")]
    pub prefer_trees: bool,
}

fn default_max_extra_minutes() -> f64 {
    DEFAULT_MAX_EXTRA_MINUTES
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Rejected,
}

/// Outcome of one green-route computation.
#[derive(Debug, Clone)]
pub struct Decision {
    pub verdict: Verdict,
    /// Chosen green leg; always `None` for a rejection
    pub selected: Option<RouteLeg>,
    pub selected_time: f64,
    /// Raw baseline response from the engine
    pub baseline: Value,
    pub baseline_time: f64,
    /// Raw alternatives response, echoed when no leg could be selected
    pub alternatives: Value,
    pub extra_time_minutes: f64,
    pub max_extra_minutes: f64,
    pub green_polygons_used: usize,
}

impl Decision {
    pub fn is_accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum GreenRouteResponse {
    Accepted {
        success: bool,
        green_route: Value,
        base_route: Value,
        extra_time: f64,
        green_polygons_used: usize,
    },
    Rejected {
        success: bool,
        message: String,
        base_route: Value,
        extra_time: f64,
    },
}

impl From<Decision> for GreenRouteResponse {
    fn from(decision: Decision) -> Self {
        match decision.verdict {
            Verdict::Rejected => GreenRouteResponse::Rejected {
                success: false,
                message: format!(
                    "Green route would take {:.1} minutes longer (limit: {} min)",
                    decision.extra_time_minutes, decision.max_extra_minutes
                ),
                base_route: decision.baseline,
                extra_time: decision.extra_time_minutes,
            },
            Verdict::Accepted => GreenRouteResponse::Accepted {
                success: true,
                green_route: match decision.selected {
                    Some(leg) => json!({ "trip": { "legs": [leg] } }),
                    None => decision.alternatives,
                },
                base_route: decision.baseline,
                extra_time: decision.extra_time_minutes,
                green_polygons_used: decision.green_polygons_used,
            },
        }
    }
}
