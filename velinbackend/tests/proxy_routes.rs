//! Integration tests for the proxy routes
//!
//! The upstream is mocked with wiremock; the axum router is exercised
//! in-process with tower's `oneshot`.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::util::ServiceExt;
use velinbackend::{create_router, BackendState, PodcastClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn router_for(upstream: &MockServer) -> axum::Router {
    let client = PodcastClient::builder()
        .base_url(upstream.uri())
        .build()
        .unwrap();
    create_router(BackendState::new(Arc::new(client)))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn search_without_query_is_rejected() {
    let upstream = MockServer::start().await;
    let app = router_for(&upstream).await;

    let response = app
        .oneshot(Request::get("/search").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing query parameter");
}

#[tokio::test]
async fn search_forwards_upstream_payload_verbatim() {
    let upstream = MockServer::start().await;

    let payload = json!({
        "items": [{"id": "dQw4w9WgXcQ", "title": "Episode One", "extraField": 42}]
    });

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .mount(&upstream)
        .await;

    let app = router_for(&upstream).await;
    let response = app
        .oneshot(Request::get("/search?q=test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, payload);
}

#[tokio::test]
async fn search_upstream_failure_maps_to_stable_500() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream exploded"))
        .mount(&upstream)
        .await;

    let app = router_for(&upstream).await;
    let response = app
        .oneshot(Request::get("/search?q=test").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    // Upstream details must not leak
    assert_eq!(body["message"], "Failed to search podcasts");
}

#[tokio::test]
async fn streams_forwards_by_video_id() {
    let upstream = MockServer::start().await;

    let payload = json!({"audioStreams": [{"url": "https://cdn.example/a.m4a"}]});

    Mock::given(method("GET"))
        .and(path("/streams/dQw4w9WgXcQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .mount(&upstream)
        .await;

    let app = router_for(&upstream).await;
    let response = app
        .oneshot(
            Request::get("/streams/dQw4w9WgXcQ")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, payload);
}

#[tokio::test]
async fn nextpage_without_token_is_rejected() {
    let upstream = MockServer::start().await;
    let app = router_for(&upstream).await;

    let response = app
        .oneshot(
            Request::get("/nextpage/channel/UC123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Missing nextpage parameter");
}

#[tokio::test]
async fn nextpage_forwards_token_to_upstream() {
    let upstream = MockServer::start().await;

    let payload = json!({"items": [], "nextpage": "token2"});

    Mock::given(method("GET"))
        .and(path("/nextpage/channel/UC123"))
        .and(query_param("nextpage", "token1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
        .mount(&upstream)
        .await;

    let app = router_for(&upstream).await;
    let response = app
        .oneshot(
            Request::get("/nextpage/channel/UC123?nextpage=token1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, payload);
}

#[tokio::test]
async fn channel_failure_uses_its_own_message() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/channel/UC404"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let app = router_for(&upstream).await;
    let response = app
        .oneshot(Request::get("/channel/UC404").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Failed to fetch channel information");
}

#[tokio::test]
async fn featured_newest_and_health_forward() {
    let upstream = MockServer::start().await;

    for (route, payload) in [
        ("/featured", json!({"items": ["a"]})),
        ("/newest", json!({"items": ["b"]})),
        ("/health", json!({"status": "ok"})),
    ] {
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(ResponseTemplate::new(200).set_body_json(payload.clone()))
            .mount(&upstream)
            .await;

        let app = router_for(&upstream).await;
        let response = app
            .oneshot(Request::get(route).body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, payload);
    }
}
