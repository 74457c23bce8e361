use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::config::{MatchingSettings, Settings};
use crate::core::{MatchError, Matcher};
use crate::models::MatchResult;
use crate::repos::{ItemRepository, RepositoryError, StatsRepository};

/// Errors surfaced by the match service
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// Knobs for one ranking call
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    /// Results scoring strictly below this are discarded
    pub min_score: f64,
    /// Maximum number of results returned
    pub limit: usize,
    /// Optional radius prefilter applied to the candidate pool
    pub radius_km: Option<f64>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            min_score: 0.3,
            limit: 20,
            radius_km: None,
        }
    }
}

impl From<&MatchingSettings> for MatchOptions {
    fn from(settings: &MatchingSettings) -> Self {
        Self {
            min_score: settings.min_score,
            limit: settings.default_limit,
            radius_km: settings.radius_km,
        }
    }
}

/// Orchestrates one ranking request end to end
///
/// Resolves the source item, pulls the candidate pool and the requesting
/// user's trade statistics from the injected repositories, then delegates
/// to the matcher. All repository reads complete before scoring starts;
/// the scoring pass itself is synchronous and pure.
pub struct MatchService {
    items: Arc<dyn ItemRepository>,
    stats: Arc<dyn StatsRepository>,
    matcher: Matcher,
}

impl MatchService {
    pub fn new(
        items: Arc<dyn ItemRepository>,
        stats: Arc<dyn StatsRepository>,
        matcher: Matcher,
    ) -> Self {
        Self {
            items,
            stats,
            matcher,
        }
    }

    /// Build a service from loaded settings
    ///
    /// The configured scoring weights drive the matcher; ranking knobs from
    /// the same settings convert via `MatchOptions::from(&settings.matching)`.
    pub fn from_settings(
        settings: &Settings,
        items: Arc<dyn ItemRepository>,
        stats: Arc<dyn StatsRepository>,
    ) -> Self {
        Self::new(items, stats, Matcher::new(settings.scoring.weights.clone().into()))
    }

    /// Find ranked matches for the item `source_item_id`
    ///
    /// `user_id` selects whose trade statistics personalize the preference
    /// factor; `None`, or a user with no recorded statistics, simply runs
    /// the ranking unpersonalized.
    pub async fn find_matches_for_item(
        &self,
        source_item_id: &str,
        user_id: Option<&str>,
        options: MatchOptions,
    ) -> Result<Vec<MatchResult>, ServiceError> {
        info!(
            "Finding matches for item: {}, min_score: {}, limit: {}",
            source_item_id, options.min_score, options.limit
        );

        let source = self.items.get_item(source_item_id).await?;

        let candidates = match (options.radius_km, source.coordinates()) {
            (Some(radius_km), Some((lat, lon))) => {
                self.items
                    .list_items_within_radius(lat, lon, radius_km)
                    .await?
            }
            (Some(_), None) => {
                debug!(
                    "Item {} has no coordinates, skipping radius prefilter",
                    source_item_id
                );
                self.items.list_active_items().await?
            }
            (None, _) => self.items.list_active_items().await?,
        };

        debug!(
            "Scoring {} candidates for item {}",
            candidates.len(),
            source_item_id
        );

        let stats = match user_id {
            Some(id) => self.stats.get_user_stats(id).await?,
            None => None,
        };

        let results = self.matcher.find_potential_matches(
            &source,
            &candidates,
            options.min_score,
            options.limit,
            stats.as_ref(),
        )?;

        info!(
            "Returning {} matches for item {} (from {} candidates)",
            results.len(),
            source_item_id,
            candidates.len()
        );

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Item, ItemCondition, UserTradeStats};
    use crate::repos::{InMemoryItemRepository, InMemoryStatsRepository};
    use chrono::Utc;
    use std::collections::HashMap;

    fn book(id: &str, lat: f64, lon: f64) -> Item {
        Item {
            item_id: id.to_string(),
            title: Some(format!("Book {}", id)),
            owner_id: Some(format!("owner-{}", id)),
            owner_name: Some(format!("Owner {}", id)),
            category: Some("Books".to_string()),
            tags: vec!["classic".to_string()],
            estimated_value: Some(20.0),
            latitude: Some(lat),
            longitude: Some(lon),
            condition: Some(ItemCondition::Good),
            popularity_score: Some(10),
            image_url: None,
            created_at: Some(Utc::now()),
        }
    }

    fn service_with(items: Vec<Item>, stats: HashMap<String, UserTradeStats>) -> MatchService {
        MatchService::new(
            Arc::new(InMemoryItemRepository::new(items)),
            Arc::new(InMemoryStatsRepository::new(stats)),
            Matcher::with_default_weights(),
        )
    }

    #[tokio::test]
    async fn test_end_to_end_match_flow() {
        let service = service_with(
            vec![book("A", 37.78, -122.43), book("B", 37.79, -122.44)],
            HashMap::new(),
        );

        let results = service
            .find_matches_for_item("A", None, MatchOptions::default())
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_item_id, "B");
        assert!(results[0].distance_km.is_some());
    }

    #[tokio::test]
    async fn test_unknown_source_item_fails_fast() {
        let service = service_with(vec![book("A", 37.78, -122.43)], HashMap::new());

        let err = service
            .find_matches_for_item("nope", None, MatchOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, ServiceError::Repository(RepositoryError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_radius_prefilter_shrinks_pool() {
        let service = service_with(
            vec![
                book("A", 37.78, -122.43),
                book("near", 37.79, -122.44),
                book("far", 40.71, -74.00),
            ],
            HashMap::new(),
        );

        let options = MatchOptions {
            radius_km: Some(50.0),
            min_score: 0.0,
            limit: 10,
        };
        let results = service
            .find_matches_for_item("A", None, options)
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].matched_item_id, "near");
    }

    #[tokio::test]
    async fn test_stats_personalize_the_preference_factor() {
        let mut stats = UserTradeStats::default();
        stats.category_affinities.insert("Books".to_string(), 5);
        let mut stats_by_user = HashMap::new();
        stats_by_user.insert("u1".to_string(), stats);

        let items = vec![book("A", 37.78, -122.43), book("B", 37.79, -122.44)];
        let service = service_with(items, stats_by_user);

        let personalized = service
            .find_matches_for_item("A", Some("u1"), MatchOptions::default())
            .await
            .unwrap();
        let anonymous = service
            .find_matches_for_item("A", None, MatchOptions::default())
            .await
            .unwrap();

        assert!((personalized[0].match_score - anonymous[0].match_score - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_match_options_from_settings() {
        let matching = MatchingSettings {
            min_score: 0.42,
            default_limit: 7,
            max_limit: 50,
            radius_km: Some(25.0),
        };

        let options = MatchOptions::from(&matching);
        assert_eq!(options.min_score, 0.42);
        assert_eq!(options.limit, 7);
        assert_eq!(options.radius_km, Some(25.0));
    }

    #[tokio::test]
    async fn test_from_settings_wires_configured_weights() {
        use crate::config::{LoggingSettings, ScoringSettings};

        let mut settings = Settings {
            matching: MatchingSettings::default(),
            scoring: ScoringSettings::default(),
            logging: LoggingSettings::default(),
        };
        settings.scoring.weights.category = 0.5;

        let items = vec![book("A", 37.78, -122.43), book("B", 37.79, -122.44)];
        let service = MatchService::from_settings(
            &settings,
            Arc::new(InMemoryItemRepository::new(items)),
            Arc::new(InMemoryStatsRepository::default()),
        );

        let results = service
            .find_matches_for_item("A", None, MatchOptions::from(&settings.matching))
            .await
            .unwrap();

        // With default weights the pair scores 0.90; the boosted category
        // weight contributes 0.25 more
        assert_eq!(results.len(), 1);
        assert!((results[0].match_score - 1.15).abs() < 1e-6, "got {}", results[0].match_score);
    }

    #[tokio::test]
    async fn test_missing_stats_is_not_an_error() {
        let service = service_with(
            vec![book("A", 37.78, -122.43), book("B", 37.79, -122.44)],
            HashMap::new(),
        );

        let results = service
            .find_matches_for_item("A", Some("unknown-user"), MatchOptions::default())
            .await
            .unwrap();

        assert_eq!(results.len(), 1);
    }
}
