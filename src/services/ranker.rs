/// Content-based similarity ranker
///
/// Every catalog synopsis becomes an L2-normalised TF-IDF vector over a vocabulary
/// frozen at construction. Queries are projected into the same space and scored
/// by cosine similarity, so ranking is a read-only pass over immutable state.
use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{
    models::{Catalog, RecommendationResult, ScoredItem},
    services::tokenizer::tokenize,
};

/// Sparse row: (term index, weight) pairs sorted by term index
type SparseVector = Vec<(usize, f64)>;

/// Read-only TF-IDF representation of a catalog
#[derive(Debug, Clone)]
pub struct TermVectorMatrix {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    rows: Vec<SparseVector>,
}

impl TermVectorMatrix {
    /// Builds the matrix from documents; row `i` belongs to document `i`
    pub fn build<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<String>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();

        // Sorted vocabulary keeps term indices independent of document order
        let terms: BTreeSet<&str> = tokenized
            .iter()
            .flat_map(|tokens| tokens.iter().map(String::as_str))
            .collect();
        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for tokens in &tokenized {
            let unique: BTreeSet<usize> = tokens.iter().map(|t| vocabulary[t.as_str()]).collect();
            for idx in unique {
                doc_freq[idx] += 1;
            }
        }

        // Smoothed IDF: ln((1 + n) / (1 + df)) + 1
        let n = documents.len() as f64;
        let idf: Vec<f64> = doc_freq
            .iter()
            .map(|&df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        let mut matrix = Self {
            vocabulary,
            idf,
            rows: Vec::with_capacity(tokenized.len()),
        };
        let rows = tokenized
            .iter()
            .map(|tokens| matrix.weigh(tokens).into_iter().collect())
            .collect();
        matrix.rows = rows;
        matrix
    }

    /// Projects arbitrary text into the frozen vocabulary
    pub fn project(&self, text: &str) -> SparseVector {
        self.weigh(&tokenize(text)).into_iter().collect()
    }

    /// Term count × IDF per known term, L2-normalised; unknown terms are dropped
    fn weigh(&self, tokens: &[String]) -> BTreeMap<usize, f64> {
        let mut weights: BTreeMap<usize, f64> = BTreeMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(token) {
                *weights.entry(idx).or_insert(0.0) += 1.0;
            }
        }
        for (idx, weight) in weights.iter_mut() {
            *weight *= self.idf[*idx];
        }

        let norm = weights.values().map(|w| w * w).sum::<f64>().sqrt();
        if norm > 0.0 {
            for weight in weights.values_mut() {
                *weight /= norm;
            }
        }
        weights
    }

    /// Cosine similarity of a projected query against every row.
    ///
    /// Rows and query are unit length (or zero), so the dot product is the cosine.
    pub fn similarities(&self, query: &SparseVector) -> Vec<f64> {
        let query: HashMap<usize, f64> = query.iter().copied().collect();
        self.rows
            .iter()
            .map(|row| {
                row.iter()
                    .filter_map(|(idx, weight)| query.get(idx).map(|q| q * weight))
                    .sum()
            })
            .collect()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }
}

/// Ranker over a frozen catalog
#[derive(Debug, Clone)]
pub struct SimilarityRanker {
    catalog: Catalog,
    /// `None` when built from an empty catalog
    matrix: Option<TermVectorMatrix>,
}

impl SimilarityRanker {
    /// Builds term vectors for the catalog; an empty catalog yields an uninitialised ranker
    pub fn prepare(catalog: Catalog) -> Self {
        if catalog.is_empty() {
            tracing::warn!("No catalog data available, recommendations disabled");
            return Self {
                catalog,
                matrix: None,
            };
        }

        let synopses: Vec<&str> = catalog.iter().map(|item| item.synopsis.as_str()).collect();
        let matrix = TermVectorMatrix::build(&synopses);

        tracing::info!(
            items = matrix.rows(),
            vocabulary = matrix.vocabulary_size(),
            "Built TF-IDF matrix"
        );

        Self {
            catalog,
            matrix: Some(matrix),
        }
    }

    pub fn is_ready(&self) -> bool {
        self.matrix.is_some()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn vocabulary_size(&self) -> usize {
        self.matrix.as_ref().map_or(0, TermVectorMatrix::vocabulary_size)
    }

    /// Top `top_n` catalog positions by descending cosine similarity.
    ///
    /// Equal scores keep catalog order. A query with no known terms scores 0
    /// everywhere, so the first catalog entry comes first. `top_n` of 0 is
    /// treated as 1.
    pub fn rank(&self, query: &str, top_n: usize) -> Vec<ScoredItem> {
        let Some(matrix) = &self.matrix else {
            tracing::warn!("Recommendation system not initialised");
            return Vec::new();
        };

        let query_vector = matrix.project(query);
        let mut scored: Vec<ScoredItem> = matrix
            .similarities(&query_vector)
            .into_iter()
            .enumerate()
            .map(|(index, score)| ScoredItem { index, score })
            .collect();

        // sort_by is stable, which gives the catalog-order tie break
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_n.max(1));
        scored
    }

    /// Single best match for free text, or `None` when nothing can be recommended
    pub fn recommend(&self, query: &str) -> Option<RecommendationResult> {
        let best = self.rank(query, 1).into_iter().next()?;
        let item = self.catalog.get(best.index)?;

        tracing::debug!(title = %item.title, score = best.score, "Selected recommendation");
        Some(RecommendationResult::from(item))
    }
}
