pub mod containment;
pub mod scoring;
pub mod selection;
pub mod shape;

use crate::config::GreenAreaConfig;
use crate::error::{AppError, Result};
use crate::models::route::{alternative_legs, trip_legs};
use crate::models::{Coordinates, Decision, RouteLeg, Verdict};
use crate::services::green_areas::GreenAreaLoader;
use crate::services::valhalla::{RouteRequest, RoutingEngine};
use std::sync::Arc;

pub use containment::{strategy_for, PointInPolygon};
pub use scoring::{GreenScore, GreenScorer};
pub use selection::select_greenest;
pub use shape::ShapeDecoder;

/// Finds the greenest walking route that stays within a time budget of the
/// fastest one.
pub struct GreenRouteService {
    engine: Arc<dyn RoutingEngine>,
    loader: GreenAreaLoader,
    scorer: GreenScorer,
}

impl GreenRouteService {
    pub fn new(engine: Arc<dyn RoutingEngine>, loader: GreenAreaLoader, scorer: GreenScorer) -> Self {
        GreenRouteService {
            engine,
            loader,
            scorer,
        }
    }

    pub fn from_config(engine: Arc<dyn RoutingEngine>, config: &GreenAreaConfig) -> Self {
        let scorer = GreenScorer::new(
            ShapeDecoder::new(config.shape_precision),
            strategy_for(config.containment_mode),
        );
        Self::new(engine, GreenAreaLoader::from_config(config), scorer)
    }

    pub fn loader(&self) -> &GreenAreaLoader {
        &self.loader
    }

    /// Baseline route, green alternatives and polygons are fetched
    /// concurrently; an engine failure on either request fails the call.
    pub async fn compute_green_route(
        &self,
        waypoints: &[Coordinates],
        max_extra_minutes: f64,
        prefer_parks: bool,
        prefer_trees: bool,
    ) -> Result<Decision> {
        if waypoints.len() < 2 {
            return Err(AppError::MissingWaypoints);
        }

        let baseline_request = RouteRequest::baseline(waypoints);
        let green_request = RouteRequest::green_alternatives(waypoints);

        let loader = self.loader.clone();
        let load_polygons = async move {
            tokio::task::spawn_blocking(move || {
                loader.load_green_polygons(prefer_parks, prefer_trees)
            })
            .await
            .map_err(|e| AppError::Internal(format!("Green area loading failed: {}", e)))
        };

        let (baseline, alternatives, polygons) = tokio::try_join!(
            self.engine.route(&baseline_request),
            self.engine.route(&green_request),
            load_polygons,
        )?;

        let baseline_time = trip_legs(&baseline)?
            .first()
            .map(RouteLeg::duration_seconds)
            .unwrap_or(0.0);

        let candidates = alternative_legs(&alternatives)?;
        let selected = if polygons.is_empty() {
            // Nothing to measure greenness against
            candidates.first().cloned()
        } else {
            select_greenest(&self.scorer, &candidates, &polygons).cloned()
        };

        let selected_time = selected
            .as_ref()
            .map(RouteLeg::duration_seconds)
            .unwrap_or(0.0);
        let extra_time_minutes = (selected_time - baseline_time) / 60.0;

        let verdict = if extra_time_minutes > max_extra_minutes {
            Verdict::Rejected
        } else {
            Verdict::Accepted
        };

        tracing::info!(
            waypoints = waypoints.len(),
            candidates = candidates.len(),
            green_polygons = polygons.len(),
            baseline_s = baseline_time,
            selected_s = selected_time,
            extra_min = %format!("{:.2}", extra_time_minutes),
            verdict = ?verdict,
            "Green route: {} candidates, {:.1} extra minutes (limit {})",
            candidates.len(), extra_time_minutes, max_extra_minutes
        );

        Ok(Decision {
            verdict,
            selected: match verdict {
                Verdict::Accepted => selected,
                Verdict::Rejected => None,
            },
            selected_time,
            baseline,
            baseline_time,
            alternatives,
            extra_time_minutes,
            max_extra_minutes,
            green_polygons_used: polygons.len(),
        })
    }
}
