use serde::{Deserialize, Serialize};

use super::CatalogItem;

/// The single best match handed back to callers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationResult {
    pub title: String,
    pub genres: Vec<String>,
    pub synopsis: String,
    pub rating: f64,
    pub poster_ref: Option<String>,
}

impl RecommendationResult {
    /// Full poster URL, given the image base (e.g. `https://image.tmdb.org/t/p/w500`)
    pub fn poster_url(&self, image_base_url: &str) -> Option<String> {
        self.poster_ref.as_ref().map(|path| {
            let base = image_base_url.trim_end_matches('/');
            if path.starts_with('/') {
                format!("{}{}", base, path)
            } else {
                format!("{}/{}", base, path)
            }
        })
    }
}

impl From<&CatalogItem> for RecommendationResult {
    fn from(item: &CatalogItem) -> Self {
        Self {
            title: item.title.clone(),
            genres: item.genres.clone(),
            synopsis: item.synopsis.clone(),
            rating: item.rating,
            poster_ref: item.poster_ref.clone(),
        }
    }
}

/// A catalog position paired with its cosine similarity to a query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredItem {
    pub index: usize,
    pub score: f64,
}
