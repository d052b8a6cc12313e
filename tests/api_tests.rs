use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{json, Value};

use movie_recommender::{
    api::{create_router, AppState},
    models::{Catalog, CatalogItem},
    services::RecommendationContext,
};

const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

fn sample_catalog() -> Catalog {
    Catalog::new(vec![
        CatalogItem::new(
            1,
            "A",
            "a brave astronaut explores space",
            vec!["Science Fiction".to_string()],
            Some("/a.jpg".to_string()),
            7.8,
        ),
        CatalogItem::new(
            2,
            "B",
            "a detective solves a murder mystery",
            vec!["Crime".to_string(), "Mystery".to_string()],
            None,
            6.9,
        ),
    ])
}

fn create_test_server(catalog: Catalog) -> TestServer {
    let context = Arc::new(RecommendationContext::new(catalog));
    let state = AppState::new(context, None, IMAGE_BASE);
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server(sample_catalog());
    let response = server.get("/health").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_recommend_returns_best_match() {
    let server = create_test_server(sample_catalog());

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "text": "space astronaut adventure" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["title"], "A");
    assert_eq!(body["genres"], json!(["Science Fiction"]));
    assert_eq!(body["rating"], 7.8);
    assert_eq!(body["poster_url"], format!("{}/a.jpg", IMAGE_BASE));
}

#[tokio::test]
async fn test_recommend_second_item() {
    let server = create_test_server(sample_catalog());

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "text": "murder detective" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["title"], "B");
    assert!(body["poster_url"].is_null());
}

#[tokio::test]
async fn test_recommend_empty_text_returns_first_item() {
    let server = create_test_server(sample_catalog());

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "text": "" }))
        .await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["title"], "A");
}

#[tokio::test]
async fn test_recommend_missing_text() {
    let server = create_test_server(sample_catalog());

    let response = server.post("/api/v1/recommend").json(&json!({})).await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_with_empty_catalog() {
    let server = create_test_server(Catalog::default());

    let response = server
        .post("/api/v1/recommend")
        .json(&json!({ "text": "anything" }))
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_ranked_recommendations() {
    let server = create_test_server(sample_catalog());

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("q", "murder mystery")
        .add_query_param("limit", 10)
        .await;
    response.assert_status_ok();

    let ranked: Vec<Value> = response.json();
    assert_eq!(ranked.len(), 2);
    assert_eq!(ranked[0]["title"], "B");
    assert_eq!(ranked[0]["id"], 2);
    assert!(ranked[0]["score"].as_f64().unwrap() > 0.0);
    assert_eq!(ranked[1]["score"].as_f64().unwrap(), 0.0);
}

#[tokio::test]
async fn test_ranked_recommendations_empty_catalog() {
    let server = create_test_server(Catalog::default());

    let response = server
        .get("/api/v1/recommendations")
        .add_query_param("q", "anything")
        .await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_recommend_malformed_body_is_json_error() {
    let server = create_test_server(sample_catalog());

    let response = server
        .post("/api/v1/recommend")
        .bytes(axum::body::Bytes::from_static(b"{not json"))
        .content_type("application/json")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_recommend_empty_body_is_json_error() {
    let server = create_test_server(sample_catalog());

    let response = server.post("/api/v1/recommend").await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_unknown_event_type_is_json_error() {
    let server = create_test_server(sample_catalog());

    let response = server
        .post("/api/v1/events")
        .json(&json!({ "type": "sticker", "id": 7 }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_text_event() {
    let server = create_test_server(sample_catalog());

    let response = server
        .post("/api/v1/events")
        .json(&json!({ "type": "text", "text": "murder detective" }))
        .await;
    response.assert_status_ok();

    let reply: Value = response.json();
    assert_eq!(reply["type"], "recommendation");
    assert_eq!(reply["body"]["title"], "B");
}

#[tokio::test]
async fn test_command_event() {
    let server = create_test_server(sample_catalog());

    let response = server
        .post("/api/v1/events")
        .json(&json!({ "type": "command", "name": "/help" }))
        .await;
    response.assert_status_ok();

    let reply: Value = response.json();
    assert_eq!(reply["type"], "message");
    assert!(reply["body"].as_str().unwrap().contains("/movie"));
}

#[tokio::test]
async fn test_photo_event_without_captioning() {
    let server = create_test_server(sample_catalog());

    let response = server
        .post("/api/v1/events")
        .json(&json!({ "type": "photo", "image_url": "https://i.ibb.co/x.jpg" }))
        .await;
    response.assert_status_ok();

    let reply: Value = response.json();
    assert_eq!(reply["type"], "message");
}

#[tokio::test]
async fn test_text_event_empty_catalog_is_no_match() {
    let server = create_test_server(Catalog::default());

    let response = server
        .post("/api/v1/events")
        .json(&json!({ "type": "text", "text": "anything" }))
        .await;
    response.assert_status_ok();

    let reply: Value = response.json();
    assert_eq!(reply["type"], "no_match");
}

#[tokio::test]
async fn test_catalog_endpoint() {
    let server = create_test_server(sample_catalog());

    let response = server.get("/api/v1/catalog").await;
    response.assert_status_ok();

    let body: Value = response.json();
    assert_eq!(body["ready"], true);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][1]["title"], "B");
    assert_eq!(body["vocabulary_size"], 8);
}

#[tokio::test]
async fn test_request_id_header() {
    let server = create_test_server(sample_catalog());

    let response = server.get("/health").await;
    let header = response.header("x-request-id");
    assert!(uuid::Uuid::parse_str(header.to_str().unwrap()).is_ok());

    let id = uuid::Uuid::new_v4().to_string();
    let response = server
        .get("/health")
        .add_header(
            axum::http::HeaderName::from_static("x-request-id"),
            axum::http::HeaderValue::from_str(&id).unwrap(),
        )
        .await;
    assert_eq!(response.header("x-request-id").to_str().unwrap(), id);
}
