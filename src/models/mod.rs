use serde::{Deserialize, Serialize};

pub mod catalog;
pub mod event;
pub mod recommendation;

pub use catalog::{Catalog, CatalogItem};
pub use event::{InboundEvent, Reply};
pub use recommendation::{RecommendationResult, ScoredItem};

/// One entry of a catalog listing page, before genres are resolved
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RawListing {
    pub id: u64,
    pub title: String,
    pub synopsis: String,
    pub poster_ref: Option<String>,
    pub rating: f64,
}

/// Per-item details fetched with a second call
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemDetail {
    pub genres: Vec<String>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// `/3/movie/popular` response page
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbListingPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub results: Vec<TmdbMovie>,
}

/// Movie summary as it appears in listings
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovie {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
}

impl From<TmdbMovie> for RawListing {
    fn from(movie: TmdbMovie) -> Self {
        RawListing {
            id: movie.id,
            title: movie.title,
            synopsis: movie.overview.unwrap_or_default(),
            poster_ref: movie.poster_path,
            rating: movie.vote_average,
        }
    }
}

/// `/3/movie/{id}` response, reduced to the fields we read
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u64,
    pub name: String,
}

impl From<TmdbMovieDetails> for ItemDetail {
    fn from(details: TmdbMovieDetails) -> Self {
        ItemDetail {
            genres: details.genres.into_iter().map(|g| g.name).collect(),
        }
    }
}
