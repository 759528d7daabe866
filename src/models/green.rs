use geo::{Coord, LineString, Polygon, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A configured source of green polygons.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum GreenCategory {
    Parks,
    Trees,
}

impl GreenCategory {
    /// Categories enabled by the request flags, in load order
    pub fn selected(include_parks: bool, include_trees: bool) -> Vec<GreenCategory> {
        let mut categories = Vec::with_capacity(2);
        if include_parks {
            categories.push(GreenCategory::Parks);
        }
        if include_trees {
            categories.push(GreenCategory::Trees);
        }
        categories
    }
}

impl fmt::Display for GreenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GreenCategory::Parks => write!(f, "parks"),
            GreenCategory::Trees => write!(f, "trees"),
        }
    }
}

impl FromStr for GreenCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "parks" | "park" => Ok(GreenCategory::Parks),
            "trees" | "tree" => Ok(GreenCategory::Trees),
            _ => Err(format!("Invalid green category: '{}'", s)),
        }
    }
}

/// Outer ring of one green area, with the derived shapes each containment
/// strategy needs.
///
/// Coordinates are planar with x = longitude, y = latitude. `polygon` is only
/// present for rings with at least three finite vertices; `bounds` for rings
/// with at least one.
#[derive(Debug, Clone)]
pub struct GreenPolygon {
    ring: Vec<Coord<f64>>,
    polygon: Option<Polygon<f64>>,
    bounds: Option<Rect<f64>>,
}

impl GreenPolygon {
    pub fn new(ring: Vec<Coord<f64>>) -> Self {
        let finite: Vec<Coord<f64>> = ring
            .iter()
            .copied()
            .filter(|c| c.x.is_finite() && c.y.is_finite())
            .collect();

        let polygon = if finite.len() >= 3 && finite.len() == ring.len() {
            // LineString -> Polygon closes the ring if needed
            Some(Polygon::new(LineString::from(finite.clone()), vec![]))
        } else {
            None
        };

        let bounds = bounding_rect(&finite);

        GreenPolygon {
            ring,
            polygon,
            bounds,
        }
    }

    pub fn ring(&self) -> &[Coord<f64>] {
        &self.ring
    }

    pub fn polygon(&self) -> Option<&Polygon<f64>> {
        self.polygon.as_ref()
    }

    pub fn bounds(&self) -> Option<&Rect<f64>> {
        self.bounds.as_ref()
    }
}

fn bounding_rect(coords: &[Coord<f64>]) -> Option<Rect<f64>> {
    let first = coords.first()?;
    let (mut min, mut max) = (*first, *first);
    for c in &coords[1..] {
        min.x = min.x.min(c.x);
        min.y = min.y.min(c.y);
        max.x = max.x.max(c.x);
        max.y = max.y.max(c.y);
    }
    Some(Rect::new(min, max))
}

/// Green polygons collected for one request. Duplicates across sources are kept.
#[derive(Debug, Clone, Default)]
pub struct GreenPolygonSet {
    polygons: Vec<GreenPolygon>,
}

impl GreenPolygonSet {
    pub fn new(polygons: Vec<GreenPolygon>) -> Self {
        Self { polygons }
    }

    pub fn extend(&mut self, polygons: impl IntoIterator<Item = GreenPolygon>) {
        self.polygons.extend(polygons);
    }

    pub fn len(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GreenPolygon> {
        self.polygons.iter()
    }
}

impl FromIterator<GreenPolygon> for GreenPolygonSet {
    fn from_iter<I: IntoIterator<Item = GreenPolygon>>(iter: I) -> Self {
        Self {
            polygons: iter.into_iter().collect(),
        }
    }
}
