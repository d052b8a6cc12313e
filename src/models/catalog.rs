use serde::{Deserialize, Serialize};

/// A single recommendable movie
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    /// Listing-provider ID, unique within a catalog
    pub id: u64,
    pub title: String,
    /// Plot overview; never empty for items admitted to a catalog
    pub synopsis: String,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Opaque poster path, resolved against an image base URL by the caller
    #[serde(default)]
    pub poster_ref: Option<String>,
    /// Average vote on a 0-10 scale
    pub rating: f64,
}

impl CatalogItem {
    /// Builds an item, clamping the rating into 0-10 and dropping blank poster paths
    pub fn new(
        id: u64,
        title: impl Into<String>,
        synopsis: impl Into<String>,
        genres: Vec<String>,
        poster_ref: Option<String>,
        rating: f64,
    ) -> Self {
        let rating = if rating.is_finite() {
            rating.clamp(0.0, 10.0)
        } else {
            0.0
        };

        Self {
            id,
            title: title.into(),
            synopsis: synopsis.into(),
            genres,
            poster_ref: poster_ref.filter(|p| !p.trim().is_empty()),
            rating,
        }
    }

    /// Genres joined for display, e.g. "Action, Comedy"
    pub fn genre_label(&self) -> String {
        self.genres.join(", ")
    }
}

/// Ordered, immutable collection of catalog items
///
/// Position `i` is the identity the ranker uses for row `i` of its term matrix,
/// so the order must never change after the ranker is built.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&CatalogItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.iter()
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }
}

impl FromIterator<CatalogItem> for Catalog {
    fn from_iter<I: IntoIterator<Item = CatalogItem>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
