use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    db::SnapshotStore,
    models::{Catalog, CatalogItem, RawListing},
    services::providers::CatalogSource,
};

/// Builds the frozen catalog once at startup.
///
/// A readable snapshot wins; otherwise a bounded number of listing pages is
/// fetched, genres are resolved per item, and the result is persisted. Every
/// failure degrades (skipped page, empty genres, empty catalog) instead of
/// aborting the build.
pub struct CorpusBuilder {
    source: Arc<dyn CatalogSource>,
    store: Arc<dyn SnapshotStore>,
    pages: u32,
}

impl CorpusBuilder {
    pub fn new(source: Arc<dyn CatalogSource>, store: Arc<dyn SnapshotStore>, pages: u32) -> Self {
        Self {
            source,
            store,
            pages,
        }
    }

    pub async fn build(&self) -> Catalog {
        match self.store.load().await {
            Ok(Some(catalog)) => {
                tracing::info!(
                    store = self.store.name(),
                    items = catalog.len(),
                    "Loaded cached movie data"
                );
                return catalog;
            }
            Ok(None) => {}
            Err(e) => {
                tracing::warn!(
                    store = self.store.name(),
                    error = %e,
                    "Snapshot unreadable, rebuilding catalog"
                );
            }
        }

        tracing::info!(
            source = self.source.name(),
            pages = self.pages,
            "Fetching movie data"
        );
        let catalog = self.fetch().await;

        if catalog.is_empty() {
            tracing::error!("Catalog build produced no items, recommendations unavailable");
            return catalog;
        }

        if let Err(e) = self.store.save(&catalog).await {
            tracing::error!(store = self.store.name(), error = %e, "Failed to save catalog snapshot");
        }

        catalog
    }

    async fn fetch(&self) -> Catalog {
        let mut seen = HashSet::new();
        let mut items = Vec::new();

        for page in 1..=self.pages {
            let listings = match self.source.list_page(page).await {
                Ok(listings) => listings,
                Err(e) => {
                    tracing::error!(page, error = %e, "Error fetching movies, skipping page");
                    continue;
                }
            };

            let listings: Vec<RawListing> = listings
                .into_iter()
                .filter(|l| !l.synopsis.trim().is_empty())
                .filter(|l| seen.insert(l.id))
                .collect();

            items.extend(self.with_genres(listings).await);
        }

        Catalog::new(items)
    }

    /// Resolves genres for one page concurrently; output keeps listing order
    async fn with_genres(&self, listings: Vec<RawListing>) -> Vec<CatalogItem> {
        let tasks: Vec<_> = listings
            .iter()
            .map(|listing| {
                let source = Arc::clone(&self.source);
                let item_id = listing.id;
                tokio::spawn(async move { source.item_detail(item_id).await })
            })
            .collect();

        let mut items = Vec::with_capacity(listings.len());
        for (listing, task) in listings.into_iter().zip(tasks) {
            let genres = match task.await {
                Ok(Ok(detail)) => detail.genres,
                Ok(Err(e)) => {
                    tracing::warn!(item_id = listing.id, error = %e, "Genre lookup failed");
                    Vec::new()
                }
                Err(e) => {
                    tracing::error!(item_id = listing.id, error = %e, "Task join error");
                    Vec::new()
                }
            };

            items.push(CatalogItem::new(
                listing.id,
                listing.title,
                listing.synopsis,
                genres,
                listing.poster_ref,
                listing.rating,
            ));
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::MockSnapshotStore,
        error::AppError,
        models::ItemDetail,
        services::providers::MockCatalogSource,
    };

    fn listing(id: u64, title: &str, synopsis: &str) -> RawListing {
        RawListing {
            id,
            title: title.to_string(),
            synopsis: synopsis.to_string(),
            poster_ref: Some(format!("/{}.jpg", id)),
            rating: 7.5,
        }
    }

    fn empty_store() -> MockSnapshotStore {
        let mut store = MockSnapshotStore::new();
        store.expect_load().returning(|| Ok(None));
        store.expect_name().return_const("mock");
        store
    }

    fn source_with_name() -> MockCatalogSource {
        let mut source = MockCatalogSource::new();
        source.expect_name().return_const("mock");
        source
    }

    #[tokio::test]
    async fn test_snapshot_skips_network() {
        let snapshot = Catalog::new(vec![CatalogItem::new(1, "A", "plot", vec![], None, 5.0)]);
        let expected = snapshot.clone();

        let mut store = MockSnapshotStore::new();
        store
            .expect_load()
            .times(1)
            .returning(move || Ok(Some(snapshot.clone())));
        store.expect_save().never();
        store.expect_name().return_const("mock");

        let mut source = source_with_name();
        source.expect_list_page().never();
        source.expect_item_detail().never();

        let builder = CorpusBuilder::new(Arc::new(source), Arc::new(store), 10);
        assert_eq!(builder.build().await, expected);
    }

    #[tokio::test]
    async fn test_fetch_filters_and_persists() {
        let mut source = source_with_name();
        source.expect_list_page().times(2).returning(|page| match page {
            1 => Ok(vec![
                listing(1, "Alien", "A crew meets a creature."),
                listing(2, "Blank", "   "),
            ]),
            _ => Ok(vec![
                listing(1, "Alien again", "Duplicate id from a later page."),
                listing(3, "Heat", "A thief and a detective."),
            ]),
        });
        source.expect_item_detail().returning(|id| {
            Ok(ItemDetail {
                genres: vec![format!("Genre{}", id)],
            })
        });

        let mut store = empty_store();
        store
            .expect_save()
            .times(1)
            .withf(|catalog: &Catalog| catalog.len() == 2)
            .returning(|_| Ok(()));

        let builder = CorpusBuilder::new(Arc::new(source), Arc::new(store), 2);
        let catalog = builder.build().await;

        let titles: Vec<&str> = catalog.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Alien", "Heat"]);
        assert_eq!(catalog.get(0).unwrap().genres, vec!["Genre1".to_string()]);
        assert_eq!(catalog.get(1).unwrap().poster_ref, Some("/3.jpg".to_string()));
    }

    #[tokio::test]
    async fn test_failed_page_is_skipped() {
        let mut source = source_with_name();
        source.expect_list_page().returning(|page| {
            if page == 1 {
                Err(AppError::ExternalApi("status 500".to_string()))
            } else {
                Ok(vec![listing(page as u64 * 10, "Movie", "Some plot.")])
            }
        });
        source
            .expect_item_detail()
            .returning(|_| Ok(ItemDetail::default()));

        let mut store = empty_store();
        store.expect_save().returning(|_| Ok(()));

        let builder = CorpusBuilder::new(Arc::new(source), Arc::new(store), 3);
        let catalog = builder.build().await;

        let ids: Vec<u64> = catalog.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![20, 30]);
    }

    #[tokio::test]
    async fn test_genre_failure_yields_empty_genres() {
        let mut source = source_with_name();
        source
            .expect_list_page()
            .returning(|_| Ok(vec![listing(1, "Alien", "A crew meets a creature.")]));
        source
            .expect_item_detail()
            .returning(|_| Err(AppError::ExternalApi("timeout".to_string())));

        let mut store = empty_store();
        store.expect_save().returning(|_| Ok(()));

        let builder = CorpusBuilder::new(Arc::new(source), Arc::new(store), 1);
        let catalog = builder.build().await;

        assert_eq!(catalog.len(), 1);
        assert!(catalog.get(0).unwrap().genres.is_empty());
    }

    #[tokio::test]
    async fn test_total_failure_yields_empty_catalog_without_saving() {
        let mut source = source_with_name();
        source
            .expect_list_page()
            .returning(|_| Err(AppError::ExternalApi("offline".to_string())));

        let mut store = empty_store();
        store.expect_save().never();

        let builder = CorpusBuilder::new(Arc::new(source), Arc::new(store), 10);
        assert!(builder.build().await.is_empty());
    }

    #[tokio::test]
    async fn test_unreadable_snapshot_triggers_fetch() {
        let mut store = MockSnapshotStore::new();
        store
            .expect_load()
            .returning(|| Err(AppError::Internal("corrupt".to_string())));
        store.expect_save().times(1).returning(|_| Ok(()));
        store.expect_name().return_const("mock");

        let mut source = source_with_name();
        source
            .expect_list_page()
            .returning(|_| Ok(vec![listing(1, "Alien", "A crew meets a creature.")]));
        source
            .expect_item_detail()
            .returning(|_| Ok(ItemDetail::default()));

        let builder = CorpusBuilder::new(Arc::new(source), Arc::new(store), 1);
        assert_eq!(builder.build().await.len(), 1);
    }

    #[tokio::test]
    async fn test_save_failure_still_returns_catalog() {
        let mut source = source_with_name();
        source
            .expect_list_page()
            .returning(|_| Ok(vec![listing(1, "Alien", "A crew meets a creature.")]));
        source
            .expect_item_detail()
            .returning(|_| Ok(ItemDetail::default()));

        let mut store = empty_store();
        store
            .expect_save()
            .returning(|_| Err(AppError::Internal("disk full".to_string())));

        let builder = CorpusBuilder::new(Arc::new(source), Arc::new(store), 1);
        assert_eq!(builder.build().await.len(), 1);
    }
}
