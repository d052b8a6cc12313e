use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::{
    error::{AppError, AppResult},
    middleware::RequestId,
    models::{CatalogItem, InboundEvent, RecommendationResult, Reply},
};

use super::AppState;

const DEFAULT_LIMIT: usize = 5;
const MAX_LIMIT: usize = 50;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub title: String,
    pub genres: Vec<String>,
    pub synopsis: String,
    pub rating: f64,
    pub poster_url: Option<String>,
}

impl RecommendationResponse {
    fn from_result(result: RecommendationResult, image_base_url: &str) -> Self {
        Self {
            poster_url: result.poster_url(image_base_url),
            title: result.title,
            genres: result.genres,
            synopsis: result.synopsis,
            rating: result.rating,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RankQuery {
    pub q: String,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RankedItemResponse {
    pub id: u64,
    pub title: String,
    pub genres: Vec<String>,
    pub rating: f64,
    pub score: f64,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse {
    pub items: Vec<CatalogItem>,
    pub vocabulary_size: usize,
    pub ready: bool,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Single best recommendation for free text
pub async fn recommend(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> AppResult<Json<RecommendationResponse>> {
    let Json(request) = payload?;
    let text = request
        .text
        .ok_or_else(|| AppError::InvalidInput("Missing field `text`".to_string()))?;

    tracing::info!(request_id = %request_id, chars = text.len(), "Recommendation requested");

    if !state.context.is_ready() {
        return Err(AppError::Unavailable(
            "Recommendations are currently unavailable".to_string(),
        ));
    }

    let result = state
        .context
        .recommend(&text)
        .ok_or_else(|| AppError::NotFound("No recommendation found".to_string()))?;

    Ok(Json(RecommendationResponse::from_result(
        result,
        &state.image_base_url,
    )))
}

/// Ranked list of matches with their similarity scores
pub async fn ranked_recommendations(
    State(state): State<AppState>,
    Query(params): Query<RankQuery>,
) -> AppResult<Json<Vec<RankedItemResponse>>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    if !state.context.is_ready() {
        return Err(AppError::Unavailable(
            "Recommendations are currently unavailable".to_string(),
        ));
    }

    let ranked = state
        .context
        .rank(&params.q, limit)
        .into_iter()
        .filter_map(|scored| {
            state
                .context
                .catalog()
                .get(scored.index)
                .map(|item| RankedItemResponse {
                    id: item.id,
                    title: item.title.clone(),
                    genres: item.genres.clone(),
                    rating: item.rating,
                    score: scored.score,
                })
        })
        .collect();

    Ok(Json(ranked))
}

/// Chat event entry point
pub async fn handle_event(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    payload: Result<Json<InboundEvent>, JsonRejection>,
) -> AppResult<Json<Reply>> {
    let Json(event) = payload?;
    tracing::info!(request_id = %request_id, ?event, "Inbound event");
    Ok(Json(state.dispatcher.dispatch(event).await))
}

/// Catalog contents and ranker status
pub async fn get_catalog(State(state): State<AppState>) -> Json<CatalogResponse> {
    Json(CatalogResponse {
        items: state.context.catalog().items().to_vec(),
        vocabulary_size: state.context.vocabulary_size(),
        ready: state.context.is_ready(),
    })
}
