/// Image captioning through an OpenAI-compatible vision model
///
/// The service never looks at pixels itself. A caption describing the mood of
/// a photo comes back as plain text and goes through the normal text path.
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    services::retry::RetryPolicy,
};

const CAPTION_PROMPT: &str =
    "Describe the mood, atmosphere and vibe of this image in a few sentences.";
const MAX_TOKENS: u32 = 1000;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ImageCaptioner: Send + Sync {
    /// Text description of the image at `image_url`
    async fn caption(&self, image_url: &str) -> AppResult<String>;
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Clone)]
pub struct OpenAiCaptioner {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    model: String,
    retry: RetryPolicy,
}

impl OpenAiCaptioner {
    pub fn new(api_key: String, api_url: String, model: String, retry: RetryPolicy) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            model,
            retry,
        }
    }

    async fn request_caption(&self, image_url: &str) -> AppResult<String> {
        let url = format!("{}/v1/chat/completions", self.api_url);
        let body = json!({
            "model": self.model,
            "max_tokens": MAX_TOKENS,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": CAPTION_PROMPT },
                    { "type": "image_url", "image_url": { "url": image_url } }
                ]
            }]
        });

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalStatus { status, body });
        }

        let completion: ChatCompletion = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::ExternalApi("Captioning API returned no content".to_string()))
    }
}

#[async_trait::async_trait]
impl ImageCaptioner for OpenAiCaptioner {
    async fn caption(&self, image_url: &str) -> AppResult<String> {
        let caption = self
            .retry
            .run("captioning", || self.request_caption(image_url))
            .await?;

        tracing::info!(chars = caption.len(), "Image captioned");
        Ok(caption)
    }
}
