use redis::AsyncCommands;
use redis::Client;
use std::fmt::Display;

use crate::{db::SnapshotStore, error::AppResult, models::Catalog};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SnapshotKey {
    Catalog,
}

impl Display for SnapshotKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotKey::Catalog => write!(f, "catalog:snapshot"),
        }
    }
}

/// Creates a Redis client for the snapshot store
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Catalog snapshot stored as JSON under a single Redis key, without expiry
#[derive(Clone)]
pub struct RedisSnapshotStore {
    redis_client: Client,
}

impl RedisSnapshotStore {
    pub fn new(redis_client: Client) -> Self {
        Self { redis_client }
    }
}

#[async_trait::async_trait]
impl SnapshotStore for RedisSnapshotStore {
    async fn load(&self) -> AppResult<Option<Catalog>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let cached: Option<String> = conn.get(SnapshotKey::Catalog.to_string()).await?;

        match cached {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn save(&self, catalog: &Catalog) -> AppResult<()> {
        let json = serde_json::to_string(catalog)?;

        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let _: () = conn.set(SnapshotKey::Catalog.to_string(), json).await?;

        tracing::info!(items = catalog.len(), "Saved catalog snapshot to Redis");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "redis"
    }
}
