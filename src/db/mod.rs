pub mod file;
pub mod redis;

pub use self::file::FileSnapshotStore;
pub use self::redis::{create_redis_client, RedisSnapshotStore};

use crate::{error::AppResult, models::Catalog};

/// Persisted catalog snapshot, so a restart can skip the network fetch
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Returns `Ok(None)` when no snapshot has been written yet
    async fn load(&self) -> AppResult<Option<Catalog>>;

    async fn save(&self, catalog: &Catalog) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}
