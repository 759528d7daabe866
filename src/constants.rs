//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. Routing-engine costing weights
//! live here too: they tune the engine, not the selection algorithm.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "8000";

// --- Routing engine defaults ---

/// Default Valhalla base URL. Overridden by `VALHALLA_URL`.
pub const DEFAULT_VALHALLA_URL: &str = "http://valhalla:8002";
/// Per-request timeout for routing-engine calls. Overridden by `ROUTING_TIMEOUT_SECONDS`.
pub const DEFAULT_ROUTING_TIMEOUT_SECONDS: u64 = 60;
/// Narrative language for plain routing requests. Overridden by `ROUTING_LANGUAGE`.
pub const DEFAULT_ROUTING_LANGUAGE: &str = "de";
/// Costing model used when a plain routing request does not name one.
pub const DEFAULT_COSTING: &str = "pedestrian";
/// Distance units requested from the engine; leg lengths come back in km.
pub const DIRECTIONS_UNITS: &str = "kilometers";

/// Hard cap on alternates for plain routing requests.
pub const MAX_PLAIN_ALTERNATES: u32 = 3;
/// Alternates always requested in green mode.
pub const GREEN_MODE_ALTERNATES: u32 = 10;

// --- Green area sources ---

pub const DEFAULT_PARKS_GEOJSON_PATH: &str = "/data/custom_areas/parks_buffer_mitte.geojson";
pub const DEFAULT_TREES_GEOJSON_PATH: &str = "/data/custom_areas/trees_buffer_mitte.geojson";

// --- Green scoring ---

/// Polyline precision of Valhalla shapes (1e-6 degrees). Overridden by `SHAPE_PRECISION`.
pub const DEFAULT_SHAPE_PRECISION: u32 = 6;
/// Only every Nth decoded shape point is tested against the green polygons.
pub const GREEN_SAMPLE_STRIDE: usize = 5;
/// Heuristic fallback weight on route duration (hours).
pub const HEURISTIC_TIME_WEIGHT: f64 = 0.6;
/// Heuristic fallback weight on route length (km).
pub const HEURISTIC_LENGTH_WEIGHT: f64 = 0.4;

// --- Request defaults ---

/// Extra minutes a green route may take over the baseline.
pub const DEFAULT_MAX_EXTRA_MINUTES: f64 = 5.0;

pub const MISSING_WAYPOINTS_MESSAGE: &str = "need at least two points [[lon,lat],[lon,lat]]";

// --- CORS ---

pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://127.0.0.1:3000",
    "http://localhost:3001",
    "http://127.0.0.1:3001",
];

// --- Pedestrian costing: plain routing (fastest walk) ---

pub const WALKING_SPEED_KMH: f64 = 5.1;
pub const FAST_USE_LIVING_STREETS: f64 = 1.0;
pub const FAST_USE_TRACKS: f64 = 0.5;
pub const MAX_HIKING_DIFFICULTY: u8 = 6;

// --- Pedestrian costing: green mode (footways over roads) ---

pub const GREEN_USE_ROADS: f64 = 0.2;
pub const GREEN_USE_TRACKS: f64 = 1.0;
pub const GREEN_USE_FOOTWAY: f64 = 1.0;
pub const GREEN_USE_LIVING_STREETS: f64 = 0.8;
pub const GREEN_USE_SIDEWALK: f64 = 0.9;
pub const GREEN_WALKWAY_FACTOR: f64 = 1.8;
pub const GREEN_SIDEWALK_FACTOR: f64 = 1.4;
pub const GREEN_ALLEY_FACTOR: f64 = 0.9;
pub const GREEN_DRIVEWAY_FACTOR: f64 = 0.7;
