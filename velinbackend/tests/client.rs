//! Client tests against a mocked upstream

use velinbackend::PodcastClient;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(upstream: &MockServer) -> PodcastClient {
    PodcastClient::builder()
        .base_url(upstream.uri())
        .build()
        .unwrap()
}

#[tokio::test]
async fn search_encodes_the_query() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "two words & more"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"items": []})))
        .mount(&upstream)
        .await;

    let client = client_for(&upstream).await;
    let result = client.search("two words & more").await.unwrap();
    assert_eq!(result["items"], serde_json::json!([]));
}

#[tokio::test]
async fn video_stream_success_builds_full_description() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/video/dQw4w9WgXcQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "url": "https://cdn.example/v.mp4",
            "quality": "720p"
        })))
        .mount(&upstream)
        .await;

    let client = client_for(&upstream).await;
    let video = client.video_stream("dQw4w9WgXcQ").await.unwrap().unwrap();

    assert_eq!(video.url, "https://cdn.example/v.mp4");
    assert_eq!(video.height, 720);
    assert_eq!(video.width, 1280);
}

#[tokio::test]
async fn video_stream_non_success_is_none() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/video/dQw4w9WgXcQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "error"
        })))
        .mount(&upstream)
        .await;

    let client = client_for(&upstream).await;
    assert!(client.video_stream("dQw4w9WgXcQ").await.unwrap().is_none());
}

#[tokio::test]
async fn video_stream_missing_url_is_none() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/video/dQw4w9WgXcQ"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "success",
            "quality": "480p"
        })))
        .mount(&upstream)
        .await;

    let client = client_for(&upstream).await;
    assert!(client.video_stream("dQw4w9WgXcQ").await.unwrap().is_none());
}

#[tokio::test]
async fn upstream_error_status_is_an_error() {
    let upstream = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/newest"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&upstream)
        .await;

    let client = client_for(&upstream).await;
    assert!(client.newest().await.is_err());
}
