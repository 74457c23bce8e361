use std::collections::HashMap;

use async_trait::async_trait;

use crate::core::filters::items_within_radius;
use crate::models::{Item, UserTradeStats};
use crate::repos::{ItemRepository, RepositoryError, StatsRepository};

/// Item repository backed by an in-memory pool
#[derive(Debug, Clone, Default)]
pub struct InMemoryItemRepository {
    items: Vec<Item>,
}

impl InMemoryItemRepository {
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl ItemRepository for InMemoryItemRepository {
    async fn get_item(&self, item_id: &str) -> Result<Item, RepositoryError> {
        self.items
            .iter()
            .find(|item| item.item_id == item_id)
            .cloned()
            .ok_or_else(|| RepositoryError::NotFound(format!("item '{}'", item_id)))
    }

    async fn list_active_items(&self) -> Result<Vec<Item>, RepositoryError> {
        Ok(self.items.clone())
    }

    async fn list_items_within_radius(
        &self,
        lat: f64,
        lon: f64,
        radius_km: f64,
    ) -> Result<Vec<Item>, RepositoryError> {
        Ok(items_within_radius(self.items.clone(), lat, lon, radius_km))
    }
}

/// Stats repository backed by an in-memory map
#[derive(Debug, Clone, Default)]
pub struct InMemoryStatsRepository {
    stats: HashMap<String, UserTradeStats>,
}

impl InMemoryStatsRepository {
    pub fn new(stats: HashMap<String, UserTradeStats>) -> Self {
        Self { stats }
    }

    pub fn insert(&mut self, user_id: impl Into<String>, stats: UserTradeStats) {
        self.stats.insert(user_id.into(), stats);
    }
}

#[async_trait]
impl StatsRepository for InMemoryStatsRepository {
    async fn get_user_stats(
        &self,
        user_id: &str,
    ) -> Result<Option<UserTradeStats>, RepositoryError> {
        Ok(self.stats.get(user_id).cloned())
    }
}
