use std::cmp::Ordering;

use thiserror::Error;

use crate::core::distance::haversine_distance;
use crate::core::scoring::score_pair;
use crate::models::{Item, MatchResult, ScoringWeights, UserTradeStats};

/// Input-validation errors surfaced by the ranker
///
/// These are deterministic caller mistakes, never engine faults; the
/// layer above should report them as bad requests.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("item '{item_id}' has a partial coordinate pair; latitude and longitude must both be present or both absent")]
    MalformedCoordinates { item_id: String },
}

/// Candidate ranking orchestrator
///
/// Scores every candidate against one source item, filters by a minimum
/// score, and returns a ranked, capped result list. Holds only the
/// scoring weights; every call is a pure function of its inputs.
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    /// Find ranked potential matches for a source item
    ///
    /// # Arguments
    /// * `source` - The item the requesting user wants to trade away
    /// * `candidates` - The candidate pool; a copy of the source item in the
    ///   pool is excluded by identifier, everything else is scored
    /// * `min_score` - Results scoring strictly below this are discarded
    /// * `limit` - Maximum number of results; 0 yields an empty list
    /// * `stats` - Optional trade statistics for the requesting user
    ///
    /// # Returns
    /// Results sorted by score descending, ties broken by distance ascending
    /// with missing distance sorting last. Output is deterministic for a
    /// fixed input.
    pub fn find_potential_matches(
        &self,
        source: &Item,
        candidates: &[Item],
        min_score: f64,
        limit: usize,
        stats: Option<&UserTradeStats>,
    ) -> Result<Vec<MatchResult>, MatchError> {
        validate_coordinates(source)?;
        for candidate in candidates {
            validate_coordinates(candidate)?;
        }

        let mut results: Vec<MatchResult> = candidates
            .iter()
            .filter(|candidate| candidate.item_id != source.item_id)
            .map(|candidate| {
                let (score, reasons) = score_pair(source, candidate, stats, &self.weights);

                let distance_km = match (source.coordinates(), candidate.coordinates()) {
                    (Some((lat_a, lon_a)), Some((lat_b, lon_b))) => {
                        Some(haversine_distance(lat_a, lon_a, lat_b, lon_b))
                    }
                    _ => None,
                };

                MatchResult {
                    matched_item_id: candidate.item_id.clone(),
                    match_score: score,
                    distance_km,
                    item_title: candidate.title.clone(),
                    owner_name: candidate.owner_name.clone(),
                    estimated_value: candidate.estimated_value,
                    reasons,
                }
            })
            .filter(|result| result.match_score >= min_score)
            .collect();

        // Sort by score (descending), ties by distance (ascending);
        // a missing distance sorts last among equal scores
        results.sort_by(|a, b| {
            b.match_score
                .partial_cmp(&a.match_score)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    let dist_a = a.distance_km.unwrap_or(f64::INFINITY);
                    let dist_b = b.distance_km.unwrap_or(f64::INFINITY);
                    dist_a.partial_cmp(&dist_b).unwrap_or(Ordering::Equal)
                })
        });

        results.truncate(limit);

        Ok(results)
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

fn validate_coordinates(item: &Item) -> Result<(), MatchError> {
    if item.has_partial_coordinates() {
        return Err(MatchError::MalformedCoordinates {
            item_id: item.item_id.clone(),
        });
    }
    Ok(())
}
