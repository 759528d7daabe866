use super::scoring::{heuristic_score, GreenScore, GreenScorer};
use crate::models::{GreenPolygonSet, RouteLeg};

/// Pick the greenest alternative.
///
/// A single alternative is returned without scoring. With several, the first
/// leg holding the highest score wins.
pub fn select_greenest<'a>(
    scorer: &GreenScorer,
    alternatives: &'a [RouteLeg],
    polygons: &GreenPolygonSet,
) -> Option<&'a RouteLeg> {
    match alternatives {
        [] => None,
        [only] => Some(only),
        _ => {
            let scores = score_batch(scorer, alternatives, polygons);

            let mut best: Option<&RouteLeg> = None;
            let mut best_score = f64::NEG_INFINITY;
            for (leg, score) in alternatives.iter().zip(&scores) {
                if score.value() > best_score {
                    best_score = score.value();
                    best = Some(leg);
                }
            }

            tracing::debug!(
                candidates = alternatives.len(),
                best_score,
                spatial = scores.first().is_some_and(GreenScore::is_spatial),
                "Scored {} alternatives, best {:.3}",
                alternatives.len(), best_score
            );

            best.or_else(|| alternatives.first())
        }
    }
}

/// Scores for a whole batch on one scale: if any shape fails to decode,
/// every leg is scored with the heuristic instead.
pub fn score_batch(
    scorer: &GreenScorer,
    alternatives: &[RouteLeg],
    polygons: &GreenPolygonSet,
) -> Vec<GreenScore> {
    let spatial: Result<Vec<f64>, _> = alternatives
        .iter()
        .map(|leg| scorer.spatial_score(leg, polygons))
        .collect();

    match spatial {
        Ok(scores) => scores.into_iter().map(GreenScore::Spatial).collect(),
        Err(e) => {
            tracing::warn!(
                error = %e,
                candidates = alternatives.len(),
                "Shape unusable, scoring all alternatives by heuristic"
            );
            alternatives
                .iter()
                .map(|leg| GreenScore::Heuristic(heuristic_score(leg)))
                .collect()
        }
    }
}
