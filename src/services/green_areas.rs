use crate::config::GreenAreaConfig;
use crate::models::{GreenCategory, GreenPolygon, GreenPolygonSet};
use geo::Coord;
use geojson::{FeatureCollection, GeoJson};
use std::fs;
use std::path::{Path, PathBuf};

/// Errors reading one green-area source.
#[derive(Debug, thiserror::Error)]
pub enum GreenAreaError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse GeoJSON: {0}")]
    Parse(String),

    #[error("Expected a FeatureCollection")]
    NotFeatureCollection,
}

/// Reads park and tree polygons from GeoJSON files on every call.
#[derive(Debug, Clone)]
pub struct GreenAreaLoader {
    parks_path: PathBuf,
    trees_path: PathBuf,
}

impl GreenAreaLoader {
    pub fn new(parks_path: impl Into<PathBuf>, trees_path: impl Into<PathBuf>) -> Self {
        GreenAreaLoader {
            parks_path: parks_path.into(),
            trees_path: trees_path.into(),
        }
    }

    pub fn from_config(config: &GreenAreaConfig) -> Self {
        Self::new(config.parks_path.clone(), config.trees_path.clone())
    }

    pub fn source_path(&self, category: GreenCategory) -> &Path {
        match category {
            GreenCategory::Parks => &self.parks_path,
            GreenCategory::Trees => &self.trees_path,
        }
    }

    /// Read and parse one category's FeatureCollection.
    pub fn read_collection(
        &self,
        category: GreenCategory,
    ) -> Result<FeatureCollection, GreenAreaError> {
        let path = self.source_path(category);
        let json_data = fs::read_to_string(path).map_err(|source| GreenAreaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse_collection(&json_data)
    }

    /// Like `read_collection`, but a missing or broken source is logged and
    /// reported as absent.
    fn try_collection(&self, category: GreenCategory) -> Option<FeatureCollection> {
        match self.read_collection(category) {
            Ok(collection) => Some(collection),
            Err(e) => {
                tracing::warn!(
                    category = %category,
                    error = %e,
                    "Green area source unavailable, skipping {}",
                    category
                );
                None
            }
        }
    }

    /// Collect the outer rings of every Polygon feature in the enabled
    /// categories. Never fails: unavailable categories contribute nothing.
    pub fn load_green_polygons(&self, include_parks: bool, include_trees: bool) -> GreenPolygonSet {
        let mut set = GreenPolygonSet::default();

        for category in GreenCategory::selected(include_parks, include_trees) {
            let Some(collection) = self.try_collection(category) else {
                continue;
            };
            let polygons = polygons_from_collection(&collection);
            tracing::debug!(
                category = %category,
                features = collection.features.len(),
                polygons = polygons.len(),
                "Loaded {} green polygons from {} features",
                polygons.len(), collection.features.len()
            );
            set.extend(polygons);
        }

        tracing::info!(polygons = set.len(), "Loaded {} green polygons", set.len());
        set
    }
}

pub fn parse_collection(json_data: &str) -> Result<FeatureCollection, GreenAreaError> {
    let geojson: GeoJson = json_data
        .parse()
        .map_err(|e: geojson::Error| GreenAreaError::Parse(e.to_string()))?;

    match geojson {
        GeoJson::FeatureCollection(collection) => Ok(collection),
        _ => Err(GreenAreaError::NotFeatureCollection),
    }
}

/// Outer rings of the Polygon features; other geometry kinds are skipped.
pub fn polygons_from_collection(collection: &FeatureCollection) -> Vec<GreenPolygon> {
    collection
        .features
        .iter()
        .filter_map(|feature| match feature.geometry.as_ref().map(|g| &g.value) {
            Some(geojson::Value::Polygon(rings)) => rings.first(),
            _ => None,
        })
        .map(|outer| {
            let ring = outer
                .iter()
                .filter(|position| position.len() >= 2)
                .map(|position| Coord {
                    x: position[0],
                    y: position[1],
                })
                .collect();
            GreenPolygon::new(ring)
        })
        .collect()
}
