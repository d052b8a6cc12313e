use std::sync::Arc;

use chrono::Local;

use crate::{
    models::{InboundEvent, Reply},
    services::{captioning::ImageCaptioner, recommendations::RecommendationContext},
};

pub const WELCOME_MESSAGE: &str = "Hi! Tell me what kind of movie you're in the mood for, or send me a photo and I'll find a movie that matches its vibe.";
pub const MOVIE_PROMPT: &str = "Describe the movie you'd like to watch: a mood, a genre or a short plot idea.";
pub const HELP_MESSAGE: &str = "Available commands:\n/start - introduction\n/movie - get a movie recommendation\n/time - current time";
pub const IMAGE_FAILED_MESSAGE: &str = "Sorry, I couldn't analyse that image. Try describing the movie in words instead.";

/// Routes decoded chat events to the recommendation engine or to command replies
#[derive(Clone)]
pub struct Dispatcher {
    context: Arc<RecommendationContext>,
    captioner: Option<Arc<dyn ImageCaptioner>>,
}

impl Dispatcher {
    pub fn new(
        context: Arc<RecommendationContext>,
        captioner: Option<Arc<dyn ImageCaptioner>>,
    ) -> Self {
        Self { context, captioner }
    }

    pub async fn dispatch(&self, event: InboundEvent) -> Reply {
        match event {
            InboundEvent::Text { text } => self.recommend(&text),
            InboundEvent::Photo { image_url } => self.handle_photo(&image_url).await,
            InboundEvent::Command { name } => Self::handle_command(&name),
        }
    }

    fn recommend(&self, text: &str) -> Reply {
        match self.context.recommend(text) {
            Some(result) => Reply::Recommendation(result),
            None => Reply::NoMatch,
        }
    }

    async fn handle_photo(&self, image_url: &str) -> Reply {
        let Some(captioner) = &self.captioner else {
            tracing::warn!("Photo received but captioning is not configured");
            return Reply::Message(IMAGE_FAILED_MESSAGE.to_string());
        };

        match captioner.caption(image_url).await {
            Ok(caption) => {
                tracing::debug!(caption = %caption, "Recommending from image caption");
                self.recommend(&caption)
            }
            Err(e) => {
                tracing::error!(error = %e, "Image captioning failed");
                Reply::Message(IMAGE_FAILED_MESSAGE.to_string())
            }
        }
    }

    fn handle_command(name: &str) -> Reply {
        let command = name.trim().trim_start_matches('/').to_lowercase();
        let text = match command.as_str() {
            "start" => WELCOME_MESSAGE.to_string(),
            "movie" => MOVIE_PROMPT.to_string(),
            "time" => format!("The current time is {}", Local::now().format("%H:%M")),
            _ => HELP_MESSAGE.to_string(),
        };
        Reply::Message(text)
    }
}
