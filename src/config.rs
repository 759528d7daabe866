use crate::constants::*;
use std::env;
use std::path::PathBuf;

/// Which point-in-polygon strategy the scorer uses. Chosen once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContainmentMode {
    #[default]
    Precise,
    BoundingBox,
}

impl std::str::FromStr for ContainmentMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "precise" => Ok(ContainmentMode::Precise),
            "bbox" | "bounding_box" => Ok(ContainmentMode::BoundingBox),
            _ => Err(format!(
                "Invalid containment mode: {}. Use 'precise' or 'bbox'",
                s
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub routing: RoutingConfig,
    pub green_areas: GreenAreaConfig,
    pub cors_allowed_origins: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Base URL of the Valhalla instance, without the `/route` suffix
    pub valhalla_url: String,
    pub timeout_seconds: u64,
    /// `directions_options.language` for plain routing requests
    pub language: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            valhalla_url: DEFAULT_VALHALLA_URL.to_string(),
            timeout_seconds: DEFAULT_ROUTING_TIMEOUT_SECONDS,
            language: DEFAULT_ROUTING_LANGUAGE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct GreenAreaConfig {
    pub parks_path: PathBuf,
    pub trees_path: PathBuf,
    pub containment_mode: ContainmentMode,
    /// Polyline precision of route shapes returned by the engine
    pub shape_precision: u32,
}

impl Default for GreenAreaConfig {
    fn default() -> Self {
        Self {
            parks_path: PathBuf::from(DEFAULT_PARKS_GEOJSON_PATH),
            trees_path: PathBuf::from(DEFAULT_TREES_GEOJSON_PATH),
            containment_mode: ContainmentMode::default(),
            shape_precision: DEFAULT_SHAPE_PRECISION,
        }
    }
}

impl RoutingConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let timeout_seconds: u64 = env::var("ROUTING_TIMEOUT_SECONDS")
            .unwrap_or_else(|_| defaults.timeout_seconds.to_string())
            .parse()
            .map_err(|_| "Invalid ROUTING_TIMEOUT_SECONDS")?;

        if !(1..=600).contains(&timeout_seconds) {
            return Err("ROUTING_TIMEOUT_SECONDS must be between 1 and 600".to_string());
        }

        Ok(Self {
            valhalla_url: env::var("VALHALLA_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.valhalla_url),
            timeout_seconds,
            language: env::var("ROUTING_LANGUAGE").unwrap_or(defaults.language),
        })
    }
}

impl GreenAreaConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let shape_precision: u32 = env::var("SHAPE_PRECISION")
            .unwrap_or_else(|_| defaults.shape_precision.to_string())
            .parse()
            .map_err(|_| "Invalid SHAPE_PRECISION")?;

        if !(1..=10).contains(&shape_precision) {
            return Err("SHAPE_PRECISION must be between 1 and 10".to_string());
        }

        Ok(Self {
            parks_path: env::var("PARKS_GEOJSON_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.parks_path),
            trees_path: env::var("TREES_GEOJSON_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.trees_path),
            containment_mode: env::var("GREEN_CONTAINMENT_MODE")
                .unwrap_or_else(|_| "precise".to_string())
                .parse()?,
            shape_precision,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let cors_allowed_origins = match env::var("CORS_ALLOWED_ORIGINS") {
            Ok(raw) => parse_origin_list(&raw),
            Err(_) => DEFAULT_CORS_ORIGINS.iter().map(|s| s.to_string()).collect(),
        };

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            database_url: env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?,
            routing: RoutingConfig::from_env()?,
            green_areas: GreenAreaConfig::from_env()?,
            cors_allowed_origins,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}
