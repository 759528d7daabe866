use super::containment::PointInPolygon;
use super::shape::{ShapeDecoder, ShapeError};
use crate::constants::{GREEN_SAMPLE_STRIDE, HEURISTIC_LENGTH_WEIGHT, HEURISTIC_TIME_WEIGHT};
use crate::models::{GreenPolygonSet, RouteLeg};
use std::sync::Arc;

/// How green a leg is. The two scales are not comparable with each other.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GreenScore {
    /// Fraction of sampled shape points inside a green polygon, in [0, 1]
    Spatial(f64),
    /// Duration/length heuristic used when the shape cannot be evaluated
    Heuristic(f64),
}

impl GreenScore {
    pub fn value(&self) -> f64 {
        match self {
            GreenScore::Spatial(v) | GreenScore::Heuristic(v) => *v,
        }
    }

    pub fn is_spatial(&self) -> bool {
        matches!(self, GreenScore::Spatial(_))
    }
}

/// `0.6 * hours + 0.4 * kilometers`
pub fn heuristic_score(leg: &RouteLeg) -> f64 {
    let hours = leg.duration_seconds() / 3600.0;
    let kilometers = leg.length_meters() / 1000.0;
    (HEURISTIC_TIME_WEIGHT * hours + HEURISTIC_LENGTH_WEIGHT * kilometers).max(0.0)
}

/// Scores legs against green polygons by sampling their decoded shapes.
#[derive(Clone)]
pub struct GreenScorer {
    decoder: ShapeDecoder,
    containment: Arc<dyn PointInPolygon>,
}

impl GreenScorer {
    pub fn new(decoder: ShapeDecoder, containment: Arc<dyn PointInPolygon>) -> Self {
        GreenScorer {
            decoder,
            containment,
        }
    }

    pub fn containment(&self) -> &dyn PointInPolygon {
        self.containment.as_ref()
    }

    /// Fraction of every 5th shape point (from index 0) that lies in a green
    /// polygon. Zero for an empty polygon set or an empty shape.
    pub fn spatial_score(
        &self,
        leg: &RouteLeg,
        polygons: &GreenPolygonSet,
    ) -> Result<f64, ShapeError> {
        if polygons.is_empty() || leg.shape.is_empty() {
            return Ok(0.0);
        }

        let coords = self.decoder.try_decode(&leg.shape)?;

        let mut sampled = 0usize;
        let mut green = 0usize;
        for point in coords.iter().step_by(GREEN_SAMPLE_STRIDE) {
            sampled += 1;
            if self.containment.point_in_green_areas(*point, polygons) {
                green += 1;
            }
        }

        Ok(green as f64 / sampled.max(1) as f64)
    }

    /// Spatial score, or the heuristic when the shape cannot be decoded.
    pub fn green_score(&self, leg: &RouteLeg, polygons: &GreenPolygonSet) -> GreenScore {
        match self.spatial_score(leg, polygons) {
            Ok(score) => GreenScore::Spatial(score),
            Err(e) => {
                tracing::warn!(error = %e, "Green score falling back to heuristic");
                GreenScore::Heuristic(heuristic_score(leg))
            }
        }
    }
}
