//! Functional tests for deterministic stock photo selection

use axum::http::{header, StatusCode};
use food_image_gateway::config::ImageStrategy;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{app, body_bytes, body_json, get, settings, text_response, TEXT_PATH};

fn photo(body: &'static [u8]) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .insert_header("content-type", "image/jpeg")
        .set_body_bytes(body)
}

#[tokio::test]
async fn test_pizza_selects_first_photo() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/0.jpg"))
        .respond_with(photo(b"margherita"))
        .expect(1)
        .mount(&server)
        .await;

    let response = get(app(settings(ImageStrategy::Stock, &server)), "/?prompt=pizza").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "public, max-age=3600");
    assert_eq!(body_bytes(response).await.as_ref(), b"margherita");
}

#[tokio::test]
async fn test_same_prompt_same_photo() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/2.jpg"))
        .respond_with(photo(b"nigiri"))
        .expect(3)
        .mount(&server)
        .await;

    let app = app(settings(ImageStrategy::Stock, &server));
    for _ in 0..3 {
        let response = get(app.clone(), "/?prompt=sushi").await;
        assert_eq!(body_bytes(response).await.as_ref(), b"nigiri");
    }
}

#[tokio::test]
async fn test_enhancement_does_not_change_selection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TEXT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(text_response("A rustic wood-fired pizza")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/photos/0.jpg"))
        .respond_with(photo(b"margherita"))
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = settings(ImageStrategy::Stock, &server);
    settings.handler.enhance_prompt = true;

    let response = get(app(settings), "/?prompt=pizza").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await.as_ref(), b"margherita");
}

#[tokio::test]
async fn test_missing_photo_becomes_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/0.jpg"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let response = get(app(settings(ImageStrategy::Stock, &server)), "/?prompt=pizza").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to generate image");
    assert_eq!(body["message"], "Stock photo API error: 404");
}

#[tokio::test]
async fn test_repeated_prompt_uses_first_value() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/photos/0.jpg"))
        .respond_with(photo(b"margherita"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/photos/2.jpg"))
        .respond_with(photo(b"nigiri"))
        .expect(0)
        .mount(&server)
        .await;

    let response = get(
        app(settings(ImageStrategy::Stock, &server)),
        "/?prompt=pizza&prompt=sushi",
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await.as_ref(), b"margherita");
}
