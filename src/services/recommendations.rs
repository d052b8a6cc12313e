use crate::{
    models::{Catalog, RecommendationResult, ScoredItem},
    services::ranker::SimilarityRanker,
};

/// Frozen recommendation state shared by every request
///
/// Built once from the corpus builder's output. Nothing in here is mutated
/// afterwards, so concurrent queries need no locking.
#[derive(Debug, Clone)]
pub struct RecommendationContext {
    ranker: SimilarityRanker,
}

impl RecommendationContext {
    pub fn new(catalog: Catalog) -> Self {
        Self {
            ranker: SimilarityRanker::prepare(catalog),
        }
    }

    /// Best-matching movie for already-decoded text
    pub fn recommend(&self, text: &str) -> Option<RecommendationResult> {
        self.ranker.recommend(text)
    }

    pub fn rank(&self, text: &str, top_n: usize) -> Vec<ScoredItem> {
        self.ranker.rank(text, top_n)
    }

    pub fn is_ready(&self) -> bool {
        self.ranker.is_ready()
    }

    pub fn catalog(&self) -> &Catalog {
        self.ranker.catalog()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.ranker.vocabulary_size()
    }
}
