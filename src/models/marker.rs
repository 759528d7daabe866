use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A point of interest stored in the `features` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, sqlx::FromRow)]
pub struct Marker {
    pub id: i32,
    pub name: String,
    /// Free text, e.g. "Drinking fountain", "Bench", "Park"
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub marker_type: String,
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewMarker {
    pub lat: f64,
    pub lng: f64,
    pub name: String,
    #[serde(rename = "type")]
    pub marker_type: String,
}

impl NewMarker {
    pub fn validate(&self) -> Result<(), String> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err("lat must be between -90 and 90".to_string());
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err("lng must be between -180 and 180".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("name must not be empty".to_string());
        }
        Ok(())
    }

    /// WKT for `ST_GeogFromText`; WKT order is lon lat
    pub fn point_wkt(&self) -> String {
        format!("POINT({} {})", self.lng, self.lat)
    }

    pub fn into_marker(self, id: i32) -> Marker {
        Marker {
            id,
            name: self.name,
            marker_type: self.marker_type,
            lat: self.lat,
            lng: self.lng,
        }
    }
}

/// A district boundary with its GeoJSON geometry object.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct District {
    pub name: String,
    pub geometry: Value,
}
