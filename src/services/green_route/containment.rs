use crate::config::ContainmentMode;
use crate::models::GreenPolygonSet;
use geo::{Coord, Intersects};
use std::sync::Arc;

/// Point-in-green-area test. Implementations never fail: a polygon that
/// cannot be evaluated simply does not contain the point.
pub trait PointInPolygon: Send + Sync {
    fn point_in_green_areas(&self, point: Coord<f64>, polygons: &GreenPolygonSet) -> bool;

    fn mode(&self) -> ContainmentMode;
}

/// Planar polygon containment, boundary inclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreciseContainment;

impl PointInPolygon for PreciseContainment {
    fn point_in_green_areas(&self, point: Coord<f64>, polygons: &GreenPolygonSet) -> bool {
        if !(point.x.is_finite() && point.y.is_finite()) {
            return false;
        }
        // Rings with fewer than 3 usable vertices carry no polygon and are skipped
        polygons
            .iter()
            .filter_map(|p| p.polygon())
            .any(|polygon| polygon.intersects(&point))
    }

    fn mode(&self) -> ContainmentMode {
        ContainmentMode::Precise
    }
}

/// Axis-aligned bounding box approximation. Loose: anything inside a ring's
/// envelope counts as green.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoundingBoxContainment;

impl PointInPolygon for BoundingBoxContainment {
    fn point_in_green_areas(&self, point: Coord<f64>, polygons: &GreenPolygonSet) -> bool {
        polygons.iter().filter_map(|p| p.bounds()).any(|rect| {
            let (min, max) = (rect.min(), rect.max());
            (min.x..=max.x).contains(&point.x) && (min.y..=max.y).contains(&point.y)
        })
    }

    fn mode(&self) -> ContainmentMode {
        ContainmentMode::BoundingBox
    }
}

pub fn strategy_for(mode: ContainmentMode) -> Arc<dyn PointInPolygon> {
    match mode {
        ContainmentMode::Precise => Arc::new(PreciseContainment),
        ContainmentMode::BoundingBox => Arc::new(BoundingBoxContainment),
    }
}
