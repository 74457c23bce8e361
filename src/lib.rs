//! Barter Match - item matching engine for the BarterHaven bartering platform
//!
//! This library computes multi-factor compatibility scores between barter
//! listings and ranks candidate items against a source item. Eight additive
//! factors contribute to each score (category, tag overlap, value proximity,
//! geographic proximity, condition compatibility, popularity, listing
//! recency, and user preference boosts), each explained with a
//! human-readable reason. Storage is abstracted behind read-only
//! repository traits; the scoring and ranking core is pure and synchronous.

pub mod config;
pub mod core;
pub mod models;
pub mod repos;

// Re-export commonly used types
pub use crate::core::{haversine_distance, items_within_radius, MatchError, Matcher};
pub use crate::models::{
    Item, ItemCondition, MatchFactor, MatchResult, Reasons, ScoringWeights, UserTradeStats,
};
pub use crate::repos::{
    InMemoryItemRepository, InMemoryStatsRepository, ItemRepository, MatchOptions, MatchService,
    RepositoryError, ServiceError, StatsRepository,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        // Verify that the library exports work correctly
        let distance = haversine_distance(37.78, -122.43, 37.79, -122.44);
        assert!(distance > 0.0 && distance < 5.0);

        let matcher = Matcher::default();
        let _ = matcher;
    }
}
