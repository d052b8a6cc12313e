pub mod captioning;
pub mod corpus;
pub mod dispatcher;
pub mod providers;
pub mod ranker;
pub mod recommendations;
pub mod retry;
pub mod tokenizer;

pub use captioning::{ImageCaptioner, OpenAiCaptioner};
pub use corpus::CorpusBuilder;
pub use dispatcher::Dispatcher;
pub use ranker::{SimilarityRanker, TermVectorMatrix};
pub use recommendations::RecommendationContext;
pub use retry::RetryPolicy;
