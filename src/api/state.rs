use std::sync::Arc;

use crate::services::{Dispatcher, ImageCaptioner, RecommendationContext};

/// Shared application state
///
/// Everything here is read-only after startup; cloning only bumps reference counts.
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<RecommendationContext>,
    pub dispatcher: Dispatcher,
    /// Base URL that poster paths are resolved against
    pub image_base_url: Arc<str>,
}

impl AppState {
    pub fn new(
        context: Arc<RecommendationContext>,
        captioner: Option<Arc<dyn ImageCaptioner>>,
        image_base_url: impl Into<Arc<str>>,
    ) -> Self {
        Self {
            dispatcher: Dispatcher::new(Arc::clone(&context), captioner),
            context,
            image_base_url: image_base_url.into(),
        }
    }
}
