use crate::catalog::Catalog;
use crate::core::{
    distance::geodesic_distance_km,
    filters::{is_open_at, matches_category, suits_weather},
    scoring::meta_score,
};
use crate::error::RankError;
use crate::models::{RankedPlace, RankingRequest, ScoringWeights};

/// Main ranking orchestrator - implements the filter → score → rank pipeline
///
/// # Pipeline Stages
/// 1. Distance from the requester to every place
/// 2. Category filter
/// 3. Opening-hours filter
/// 4. Weather filter
/// 5. Meta scoring
/// 6. Stable sort by meta score, descending
///
/// The catalog is only ever borrowed; computed values live on the returned
/// [`RankedPlace`] records, so concurrent calls never observe each other.
#[derive(Debug, Clone)]
pub struct Ranker {
    weights: ScoringWeights,
    strict_gender: bool,
}

impl Ranker {
    pub fn new(weights: ScoringWeights, strict_gender: bool) -> Self {
        Self {
            weights,
            strict_gender,
        }
    }

    pub fn with_default_weights() -> Self {
        Self::new(ScoringWeights::default(), true)
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Rank catalog places for a request
    ///
    /// An empty result is valid at every stage, including for unknown
    /// categories.
    ///
    /// # Errors
    /// * `InvalidInput` for bad coordinates or (when strict) gender
    /// * `InvalidTimeFormat` if a surviving place carries unparseable hours
    ///   or recommended windows
    pub fn rank<'a>(
        &self,
        catalog: &'a Catalog,
        request: &RankingRequest,
    ) -> Result<Vec<RankedPlace<'a>>, RankError> {
        request.validate(self.strict_gender)?;

        // Stage 1: distances for the whole catalog
        let located = catalog
            .places()
            .iter()
            .map(|place| {
                geodesic_distance_km(
                    request.latitude,
                    request.longitude,
                    place.latitude,
                    place.longitude,
                )
                .map(|distance_km| (place, distance_km))
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Stages 2-4: filters, infallible ones first; unreadable hours only
        // fail a request once category and weather have already matched
        let mut survivors = Vec::new();
        for (place, distance_km) in located {
            if !matches_category(place, &request.category) {
                continue;
            }
            if !suits_weather(place, &request.weather) {
                continue;
            }
            if !is_open_at(place, request.reference_time)? {
                continue;
            }
            survivors.push((place, distance_km));
        }

        tracing::debug!(
            "{} of {} places survive filters for category {:?}",
            survivors.len(),
            catalog.len(),
            request.category
        );

        // Stage 5: scoring
        let mut ranked = survivors
            .into_iter()
            .map(|(place, distance_km)| {
                meta_score(
                    place,
                    distance_km,
                    &request.gender,
                    request.reference_time,
                    &self.weights,
                )
                .map(|meta_score| RankedPlace {
                    place,
                    distance_km,
                    meta_score,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        // Stage 6: stable sort keeps catalog order for equal scores
        ranked.sort_by(|a, b| b.meta_score.cmp(&a.meta_score));

        Ok(ranked)
    }
}

impl Default for Ranker {
    fn default() -> Self {
        Self::with_default_weights()
    }
}
