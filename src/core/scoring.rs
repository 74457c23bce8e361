use std::collections::HashSet;

use crate::core::distance::haversine_distance;
use crate::models::{ConditionBucket, Item, ItemCondition, MatchFactor, Reasons, ScoringWeights, UserTradeStats};

/// The value factor only earns a reason when its contribution is clearly
/// perceptible, not merely non-zero.
const VALUE_REASON_THRESHOLD: f64 = 0.10;

/// The popularity factor earns a reason only past half its cap.
const POPULARITY_REASON_THRESHOLD: f64 = 0.05;

/// Listings created within this many days of each other count as
/// "around the same time".
const MAX_AGE_GAP_DAYS: i64 = 30;

/// Distance tiers for the location factor, closest first
const LOCATION_TIERS: [(f64, f64, &str); 4] = [
    (5.0, 0.10, "Items are very close (within 5km)"),
    (20.0, 0.07, "Items are nearby (within 20km)"),
    (50.0, 0.05, "Items are in the same region"),
    (100.0, 0.02, "Items are within 100km"),
];

/// Compute the compatibility score for one ordered pair of items
///
/// Eight independent sub-scores are evaluated in a fixed order (category,
/// tags, value, location, condition, popularity, age, preference) and summed.
/// A factor whose required fields are missing on either side contributes
/// exactly 0 and is skipped. The returned reasons hold an entry for each
/// factor that contributed a perceptible amount, in evaluation order.
///
/// The sum is not clamped: the documented weights total 1.0, but callers
/// must not assume a hard upper bound of exactly 1.0.
pub fn score_pair(
    a: &Item,
    b: &Item,
    stats: Option<&UserTradeStats>,
    weights: &ScoringWeights,
) -> (f64, Reasons) {
    let mut total = 0.0;
    let mut reasons = Reasons::new();

    // Category: both present and equal
    if let (Some(cat_a), Some(cat_b)) = (a.category.as_deref(), b.category.as_deref()) {
        if cat_a == cat_b {
            total += weights.category;
            reasons.push(MatchFactor::Category, "Items are in the same category");
        }
    }

    // Tags: overlap over the larger set
    let tag_score = tag_overlap_score(a, b, weights.tags);
    if tag_score > 0.0 {
        // Reported as a percentage of the tag weight's maximum
        let percent = (tag_score / weights.tags * 100.0).round() as i64;
        reasons.push(
            MatchFactor::Tags,
            format!("Items share {}% of tags", percent),
        );
    }
    total += tag_score;

    // Value: proximity of estimated values, guarded against zero/negative
    if let (Some(value_a), Some(value_b)) = (a.usable_value(), b.usable_value()) {
        let max_value = value_a.max(value_b);
        let value_score = (1.0 - (value_a - value_b).abs() / max_value) * weights.value;
        total += value_score;
        if value_score > VALUE_REASON_THRESHOLD {
            reasons.push(MatchFactor::Value, "Items have similar estimated values");
        }
    }

    // Location: tiered by great-circle distance
    if let (Some((lat_a, lon_a)), Some((lat_b, lon_b))) = (a.coordinates(), b.coordinates()) {
        let km = haversine_distance(lat_a, lon_a, lat_b, lon_b);
        if let Some((_, contribution, description)) =
            LOCATION_TIERS.iter().find(|(max_km, _, _)| km <= *max_km)
        {
            total += contribution;
            reasons.push(MatchFactor::Location, *description);
        }
    }

    // Condition: exact match or same comparability bucket
    if let (Some(cond_a), Some(cond_b)) = (a.condition, b.condition) {
        if cond_a == cond_b {
            total += weights.condition_exact;
            reasons.push(MatchFactor::Condition, "Items are in similar condition");
        } else if comparable_condition(cond_a, cond_b) {
            total += weights.condition_comparable;
            reasons.push(MatchFactor::Condition, "Items are in comparable condition");
        }
    }

    // Popularity: combined score, capped; missing treated as 0.
    // Summed as f64 so extreme scores cannot overflow.
    let popularity = ((f64::from(a.popularity()) + f64::from(b.popularity())) / 100.0)
        .min(weights.popularity_cap);
    total += popularity;
    if popularity > POPULARITY_REASON_THRESHOLD {
        reasons.push(MatchFactor::Popularity, "Both items are popular");
    }

    // Age: both listed within 30 days of each other
    if let (Some(created_a), Some(created_b)) = (a.created_at, b.created_at) {
        let days = (created_a - created_b).num_days().abs();
        if days <= MAX_AGE_GAP_DAYS {
            total += weights.age;
            reasons.push(MatchFactor::Age, "Items were listed around the same time");
        }
    }

    // Preference: candidate's category appears in the user's affinity map
    if let (Some(stats), Some(category)) = (stats, b.category.as_deref()) {
        if stats.prefers_category(category) {
            total += weights.preference;
            reasons.push(MatchFactor::Preference, "Matches your trading preferences");
        }
    }

    (total, reasons)
}

/// Tag overlap ratio scaled by the tag weight
///
/// Duplicate tags collapse before the ratio is taken; the denominator is
/// the larger of the two collapsed sets, so the non-empty guard keeps it
/// strictly positive.
#[inline]
fn tag_overlap_score(a: &Item, b: &Item, weight: f64) -> f64 {
    if a.tags.is_empty() || b.tags.is_empty() {
        return 0.0;
    }

    let set_a: HashSet<&str> = a.tags.iter().map(String::as_str).collect();
    let set_b: HashSet<&str> = b.tags.iter().map(String::as_str).collect();

    let intersection = set_a.intersection(&set_b).count();
    let denominator = set_a.len().max(set_b.len());

    (intersection as f64 / denominator as f64) * weight
}

/// Distinct conditions in the same ranked bucket are comparable
#[inline]
fn comparable_condition(a: ItemCondition, b: ItemCondition) -> bool {
    let bucket = a.bucket();
    bucket == b.bucket() && bucket != ConditionBucket::Unranked
}
