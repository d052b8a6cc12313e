/// TMDB catalog provider
///
/// API Flow:
/// 1. Listing: /3/movie/popular?page=N → id, title, overview, poster path, vote average
/// 2. Details: /3/movie/{id} → genre names
use crate::{
    error::{AppError, AppResult},
    models::{ItemDetail, RawListing, TmdbListingPage, TmdbMovieDetails},
    services::{providers::CatalogSource, retry::RetryPolicy},
};
use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

const LANGUAGE: &str = "en-US";

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    retry: RetryPolicy,
}

impl TmdbProvider {
    pub fn new(api_key: String, api_url: String, retry: RetryPolicy) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            retry,
        }
    }

    /// Single GET against the TMDB API, decoding a JSON body
    async fn get_json<T: DeserializeOwned>(&self, path: &str, page: Option<u32>) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let mut request = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str()), ("language", LANGUAGE)]);
        if let Some(page) = page {
            request = request.query(&[("page", page)]);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalStatus { status, body });
        }

        Ok(response.json().await?)
    }
}

#[async_trait::async_trait]
impl CatalogSource for TmdbProvider {
    async fn list_page(&self, page: u32) -> AppResult<Vec<RawListing>> {
        let listing: TmdbListingPage = self
            .retry
            .run("tmdb.list_page", || {
                self.get_json("/3/movie/popular", Some(page))
            })
            .await?;

        tracing::debug!(
            page,
            results = listing.results.len(),
            "Fetched TMDB listing page"
        );

        Ok(listing.results.into_iter().map(RawListing::from).collect())
    }

    async fn item_detail(&self, item_id: u64) -> AppResult<ItemDetail> {
        let path = format!("/3/movie/{}", item_id);
        let details: TmdbMovieDetails = self
            .retry
            .run("tmdb.item_detail", || self.get_json(&path, None))
            .await?;

        Ok(ItemDetail::from(details))
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
