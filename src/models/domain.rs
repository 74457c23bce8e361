use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Physical condition of a listing, ordered best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCondition {
    New,
    LikeNew,
    Good,
    Fair,
    Poor,
}

/// Comparability bucket for the condition factor
///
/// Two distinct conditions in the same ranked bucket are "comparable"
/// and earn a partial condition score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionBucket {
    High,
    Mid,
    Unranked,
}

impl ItemCondition {
    /// Static lookup from condition to comparability bucket
    pub fn bucket(self) -> ConditionBucket {
        match self {
            ItemCondition::New | ItemCondition::LikeNew => ConditionBucket::High,
            ItemCondition::Good | ItemCondition::Fair => ConditionBucket::Mid,
            ItemCondition::Poor => ConditionBucket::Unranked,
        }
    }
}

/// A barter listing with the attributes relevant to matching
///
/// Items are immutable inputs to the engine. Every matching-relevant field
/// other than the identifier is optional; a missing field suppresses the
/// corresponding scoring factor rather than erroring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    #[serde(rename = "itemId")]
    pub item_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "ownerId", default)]
    pub owner_id: Option<String>,
    #[serde(rename = "ownerName", default)]
    pub owner_name: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "estimatedValue", default)]
    pub estimated_value: Option<f64>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub condition: Option<ItemCondition>,
    #[serde(rename = "popularityScore", default)]
    pub popularity_score: Option<u32>,
    #[serde(rename = "imageUrl", default)]
    pub image_url: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

impl Item {
    /// Complete coordinate pair, or None when either half is missing
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some((lat, lon)),
            _ => None,
        }
    }

    /// True when exactly one of latitude/longitude is present
    ///
    /// A half-present pair is a caller contract violation, not a
    /// "no location" state, and is rejected by the ranker up front.
    pub fn has_partial_coordinates(&self) -> bool {
        self.latitude.is_some() != self.longitude.is_some()
    }

    /// Estimated value usable for the value factor (present and > 0)
    pub fn usable_value(&self) -> Option<f64> {
        self.estimated_value.filter(|v| *v > 0.0)
    }

    /// Popularity score, defaulting to 0 when absent
    pub fn popularity(&self) -> u32 {
        self.popularity_score.unwrap_or(0)
    }
}

/// Aggregate trading statistics for the requesting user
///
/// Consumed read-only by the preference factor. Only key presence in the
/// affinity map is consulted today; the preferred value range is part of
/// the contract for future scoring rules and must be preserved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserTradeStats {
    #[serde(rename = "categoryAffinities", default)]
    pub category_affinities: HashMap<String, u32>,
    #[serde(rename = "minPrefValue", default = "default_min_pref_value")]
    pub min_pref_value: f64,
    #[serde(rename = "maxPrefValue", default = "default_max_pref_value")]
    pub max_pref_value: f64,
}

impl UserTradeStats {
    /// Key-presence check used by the preference factor
    pub fn prefers_category(&self, category: &str) -> bool {
        self.category_affinities.contains_key(category)
    }
}

impl Default for UserTradeStats {
    fn default() -> Self {
        Self {
            category_affinities: HashMap::new(),
            min_pref_value: default_min_pref_value(),
            max_pref_value: default_max_pref_value(),
        }
    }
}

fn default_min_pref_value() -> f64 {
    0.0
}

// Effectively unbounded by convention
fn default_max_pref_value() -> f64 {
    1_000_000.0
}

/// Scoring weights for the eight match factors
///
/// Location is tiered by distance rather than weighted, so its
/// contributions live as constants next to the tier table.
#[derive(Debug, Clone, Copy)]
pub struct ScoringWeights {
    pub category: f64,
    pub tags: f64,
    pub value: f64,
    pub condition_exact: f64,
    pub condition_comparable: f64,
    pub popularity_cap: f64,
    pub age: f64,
    pub preference: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            category: 0.25,
            tags: 0.15,
            value: 0.15,
            condition_exact: 0.10,
            condition_comparable: 0.05,
            popularity_cap: 0.10,
            age: 0.05,
            preference: 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_item(id: &str) -> Item {
        Item {
            item_id: id.to_string(),
            title: None,
            owner_id: None,
            owner_name: None,
            category: None,
            tags: vec![],
            estimated_value: None,
            latitude: None,
            longitude: None,
            condition: None,
            popularity_score: None,
            image_url: None,
            created_at: None,
        }
    }

    #[test]
    fn test_condition_buckets() {
        assert_eq!(ItemCondition::New.bucket(), ConditionBucket::High);
        assert_eq!(ItemCondition::LikeNew.bucket(), ConditionBucket::High);
        assert_eq!(ItemCondition::Good.bucket(), ConditionBucket::Mid);
        assert_eq!(ItemCondition::Fair.bucket(), ConditionBucket::Mid);
        assert_eq!(ItemCondition::Poor.bucket(), ConditionBucket::Unranked);
    }

    #[test]
    fn test_condition_serde_names() {
        let json = serde_json::to_string(&ItemCondition::LikeNew).unwrap();
        assert_eq!(json, "\"LIKE_NEW\"");

        let parsed: ItemCondition = serde_json::from_str("\"NEW\"").unwrap();
        assert_eq!(parsed, ItemCondition::New);
    }

    #[test]
    fn test_coordinates_both_or_neither() {
        let mut item = bare_item("a");
        item.latitude = Some(37.78);
        item.longitude = Some(-122.43);

        assert_eq!(item.coordinates(), Some((37.78, -122.43)));
        assert!(!item.has_partial_coordinates());

        item.longitude = None;
        assert_eq!(item.coordinates(), None);
        assert!(item.has_partial_coordinates());
    }

    #[test]
    fn test_usable_value_rejects_non_positive() {
        let mut item = bare_item("a");

        item.estimated_value = Some(0.0);
        assert_eq!(item.usable_value(), None);

        item.estimated_value = Some(-5.0);
        assert_eq!(item.usable_value(), None);

        item.estimated_value = Some(19.99);
        assert_eq!(item.usable_value(), Some(19.99));
    }

    #[test]
    fn test_stats_default_range() {
        let stats = UserTradeStats::default();
        assert!(stats.category_affinities.is_empty());
        assert_eq!(stats.min_pref_value, 0.0);
        assert_eq!(stats.max_pref_value, 1_000_000.0);
        assert!(!stats.prefers_category("Books"));
    }

    #[test]
    fn test_item_deserializes_with_missing_optionals() {
        let item: Item = serde_json::from_str(r#"{"itemId": "x"}"#).unwrap();
        assert_eq!(item.item_id, "x");
        assert!(item.category.is_none());
        assert!(item.tags.is_empty());
        assert_eq!(item.popularity(), 0);
    }

    #[test]
    fn test_default_weights() {
        let weights = ScoringWeights::default();
        assert_eq!(weights.category, 0.25);
        assert_eq!(weights.tags, 0.15);
        assert_eq!(weights.value, 0.15);
        assert_eq!(weights.condition_exact, 0.10);
        assert_eq!(weights.condition_comparable, 0.05);
        assert_eq!(weights.popularity_cap, 0.10);
        assert_eq!(weights.age, 0.05);
        assert_eq!(weights.preference, 0.05);
    }
}
