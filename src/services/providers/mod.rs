/// Catalog data provider abstraction
///
/// The corpus builder only needs two calls from a listing service: one page of
/// items at a time, and per-item details for genres. Credentials and URLs are
/// the provider's concern.
use crate::{
    error::{AppError, AppResult},
    models::{ItemDetail, RawListing},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for external catalog listing services
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogSource: Send + Sync {
    /// Fetch one listing page; pages are numbered from 1
    async fn list_page(&self, page: u32) -> AppResult<Vec<RawListing>>;

    /// Fetch per-item details (genres)
    async fn item_detail(&self, item_id: u64) -> AppResult<ItemDetail>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Stand-in source used when no listing API key is configured.
///
/// Every call fails, so the corpus builder ends up with the snapshot or an
/// empty catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnconfiguredSource;

#[async_trait::async_trait]
impl CatalogSource for UnconfiguredSource {
    async fn list_page(&self, _page: u32) -> AppResult<Vec<RawListing>> {
        Err(AppError::Unavailable(
            "No catalog source configured (TMDB_API_KEY is not set)".to_string(),
        ))
    }

    async fn item_detail(&self, _item_id: u64) -> AppResult<ItemDetail> {
        Err(AppError::Unavailable(
            "No catalog source configured (TMDB_API_KEY is not set)".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "unconfigured"
    }
}
