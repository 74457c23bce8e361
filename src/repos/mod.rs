// Repository contracts consumed by the matching engine
//
// The engine never owns storage; it reads the candidate pool and the
// requesting user's trade statistics through these narrow interfaces.
// In-memory implementations back the test suite and small deployments.
pub mod memory;
pub mod service;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Item, UserTradeStats};

/// Errors surfaced by a repository read
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Read contract for the candidate supply
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Look up a single item by identifier
    async fn get_item(&self, item_id: &str) -> Result<Item, RepositoryError>;

    /// List all active items
    async fn list_active_items(&self) -> Result<Vec<Item>, RepositoryError>;

    /// List active items within a geographic radius
    ///
    /// Must be distance-consistent with the location factor, i.e. use the
    /// same haversine formula as the scorer.
    async fn list_items_within_radius(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Result<Vec<Item>, RepositoryError>;
}

/// Read contract for per-user trade statistics
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Statistics for the requesting user; absence is a valid state
    async fn get_user_stats(
        &self,
        user_id: &str,
    ) -> Result<Option<UserTradeStats>, RepositoryError>;
}

pub use memory::{InMemoryItemRepository, InMemoryStatsRepository};
pub use service::{MatchOptions, MatchService, ServiceError};
