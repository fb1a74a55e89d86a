//! Functional tests for CORS handling

use axum::http::{header, Method, Request, StatusCode};
use axum::body::Body;
use food_image_gateway::config::ImageStrategy;
use tower::ServiceExt;
use wiremock::{Mock, MockServer, ResponseTemplate};
use wiremock::matchers::any;

use crate::common::{app, body_bytes, get, settings};

fn header_str<'a>(response: &'a axum::http::Response<Body>, name: header::HeaderName) -> &'a str {
    response
        .headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

#[tokio::test]
async fn test_preflight_never_reaches_upstream() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let response = app(settings(ImageStrategy::Direct, &server))
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/?prompt=pizza")
                .header(header::ORIGIN, "https://menu.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");

    let methods = header_str(&response, header::ACCESS_CONTROL_ALLOW_METHODS).to_uppercase();
    for method in ["GET", "POST", "OPTIONS"] {
        assert!(methods.contains(method), "missing {} in {}", method, methods);
    }

    let headers = header_str(&response, header::ACCESS_CONTROL_ALLOW_HEADERS).to_lowercase();
    assert!(headers.contains("content-type"));

    assert!(body_bytes(response).await.is_empty());
}

#[tokio::test]
async fn test_bare_preflight_still_succeeds() {
    let server = MockServer::start().await;

    let response = app(settings(ImageStrategy::Stock, &server))
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
    assert!(!header_str(&response, header::ACCESS_CONTROL_ALLOW_METHODS).is_empty());
    assert!(!header_str(&response, header::ACCESS_CONTROL_ALLOW_HEADERS).is_empty());
}

#[tokio::test]
async fn test_error_responses_keep_allow_origin() {
    let server = MockServer::start().await;
    Mock::given(any())
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let response = get(app(settings(ImageStrategy::Direct, &server)), "/?prompt=pizza").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(header_str(&response, header::ACCESS_CONTROL_ALLOW_ORIGIN), "*");
}

#[tokio::test]
async fn test_health_endpoint() {
    let server = MockServer::start().await;

    let response = get(app(settings(ImageStrategy::Direct, &server)), "/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await.as_ref(), b"ok");
}
