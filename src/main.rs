use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use movie_recommender::{
    api::{create_router, AppState},
    config::{Config, SnapshotBackend},
    db::{create_redis_client, FileSnapshotStore, RedisSnapshotStore, SnapshotStore},
    services::{
        providers::{CatalogSource, TmdbProvider, UnconfiguredSource},
        CorpusBuilder, ImageCaptioner, OpenAiCaptioner, RecommendationContext, RetryPolicy,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env()?;
    let retry = RetryPolicy::from_config(&config);

    let source: Arc<dyn CatalogSource> = match &config.tmdb_api_key {
        Some(api_key) => Arc::new(TmdbProvider::new(
            api_key.clone(),
            config.tmdb_api_url.clone(),
            retry,
        )),
        None => {
            tracing::warn!("TMDB_API_KEY not set, catalog can only be loaded from a snapshot");
            Arc::new(UnconfiguredSource)
        }
    };

    let store: Arc<dyn SnapshotStore> = match config.snapshot_backend {
        SnapshotBackend::File => Arc::new(FileSnapshotStore::new(&config.snapshot_path)),
        SnapshotBackend::Redis => {
            Arc::new(RedisSnapshotStore::new(create_redis_client(&config.redis_url)?))
        }
    };

    // The catalog is complete (or empty) before the ranker is built
    let catalog = CorpusBuilder::new(source, store, config.catalog_pages)
        .build()
        .await;
    let context = Arc::new(RecommendationContext::new(catalog));

    let captioner: Option<Arc<dyn ImageCaptioner>> = match &config.openai_api_key {
        Some(api_key) => Some(Arc::new(OpenAiCaptioner::new(
            api_key.clone(),
            config.openai_api_url.clone(),
            config.caption_model.clone(),
            retry,
        ))),
        None => {
            tracing::warn!("OPENAI_API_KEY not set, photo recommendations disabled");
            None
        }
    };

    let state = AppState::new(context, captioner, config.tmdb_image_url.as_str());
    let app = create_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "Server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
