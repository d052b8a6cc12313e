use serde::{Deserialize, Serialize};

use super::RecommendationResult;

/// Inbound chat message, already decoded by the chat transport
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InboundEvent {
    /// Free-text mood or genre description
    Text { text: String },
    /// A photo, already hosted somewhere the captioning service can fetch it
    Photo { image_url: String },
    /// Slash command such as `/movie`
    Command { name: String },
}

/// What the chat layer should send back
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "body", rename_all = "snake_case")]
pub enum Reply {
    Recommendation(RecommendationResult),
    NoMatch,
    Message(String),
}
