//! REST proxy endpoints for the podcast backend
//!
//! Thin forwarding layer between the web client and the upstream podcast
//! service. Payloads pass through verbatim; upstream failures are collapsed
//! into a 500 with a stable, route-specific message so upstream details
//! never leak to the client. Missing required parameters are rejected with
//! a 400 naming the parameter.

use crate::velinserver_ext::BackendState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

// ============ Error handling ============

struct ProxyError {
    status: StatusCode,
    message: String,
}

impl ProxyError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.message }));
        (self.status, body).into_response()
    }
}

/// Create the router for the podcast proxy API
pub fn create_router(state: BackendState) -> Router {
    Router::new()
        .route("/search", get(search))
        .route("/streams/{video_id}", get(streams))
        .route("/channel/{id}", get(channel))
        .route("/nextpage/channel/{channel_id}", get(channel_nextpage))
        .route("/featured", get(featured))
        .route("/newest", get(newest))
        .route("/health", get(health))
        .with_state(state)
}

// ============================================================================
// Route Handlers
// ============================================================================

#[derive(Debug, Deserialize)]
struct SearchParams {
    q: Option<String>,
}

/// GET /api/search?q={query}
/// Searches episodes, forwarding the upstream payload verbatim
#[utoipa::path(
    get,
    path = "/search",
    params(("q" = String, Query, description = "Search query")),
    responses(
        (status = 200, description = "Upstream search results"),
        (status = 400, description = "Missing query parameter"),
        (status = 500, description = "Upstream failure")
    ),
    tag = "podcasts"
)]
async fn search(
    State(state): State<BackendState>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Value>, ProxyError> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ProxyError::bad_request("Missing query parameter"))?;

    let data = state.client.search(&query).await.map_err(|e| {
        tracing::error!("Search error: {}", e);
        ProxyError::internal("Failed to search podcasts")
    })?;

    Ok(Json(data))
}

/// GET /api/streams/{video_id}
/// Resolves the audio stream for an episode
#[utoipa::path(
    get,
    path = "/streams/{video_id}",
    params(("video_id" = String, Path, description = "Episode video id")),
    responses(
        (status = 200, description = "Upstream stream description"),
        (status = 500, description = "Upstream failure")
    ),
    tag = "podcasts"
)]
async fn streams(
    State(state): State<BackendState>,
    Path(video_id): Path<String>,
) -> Result<Json<Value>, ProxyError> {
    let data = state.client.audio_streams(&video_id).await.map_err(|e| {
        tracing::error!("Streams error: {}", e);
        ProxyError::internal("Failed to fetch audio stream")
    })?;

    Ok(Json(data))
}

/// GET /api/channel/{id}
/// Returns channel information and its first page of episodes
#[utoipa::path(
    get,
    path = "/channel/{id}",
    params(("id" = String, Path, description = "Channel id")),
    responses(
        (status = 200, description = "Upstream channel payload"),
        (status = 500, description = "Upstream failure")
    ),
    tag = "podcasts"
)]
async fn channel(
    State(state): State<BackendState>,
    Path(id): Path<String>,
) -> Result<Json<Value>, ProxyError> {
    let data = state.client.channel(&id).await.map_err(|e| {
        tracing::error!("Channel error: {}", e);
        ProxyError::internal("Failed to fetch channel information")
    })?;

    Ok(Json(data))
}

#[derive(Debug, Deserialize)]
struct NextPageParams {
    nextpage: Option<String>,
}

/// GET /api/nextpage/channel/{channel_id}?nextpage={token}
/// Returns the next page of episodes for a channel
#[utoipa::path(
    get,
    path = "/nextpage/channel/{channel_id}",
    params(
        ("channel_id" = String, Path, description = "Channel id"),
        ("nextpage" = String, Query, description = "Continuation token")
    ),
    responses(
        (status = 200, description = "Upstream page payload"),
        (status = 400, description = "Missing nextpage parameter"),
        (status = 500, description = "Upstream failure")
    ),
    tag = "podcasts"
)]
async fn channel_nextpage(
    State(state): State<BackendState>,
    Path(channel_id): Path<String>,
    Query(params): Query<NextPageParams>,
) -> Result<Json<Value>, ProxyError> {
    let nextpage = params
        .nextpage
        .filter(|n| !n.is_empty())
        .ok_or_else(|| ProxyError::bad_request("Missing nextpage parameter"))?;

    let data = state
        .client
        .channel_nextpage(&channel_id, &nextpage)
        .await
        .map_err(|e| {
            tracing::error!("Next page error: {}", e);
            ProxyError::internal("Failed to fetch more episodes")
        })?;

    Ok(Json(data))
}

/// GET /api/featured
/// Returns the featured episodes feed
#[utoipa::path(
    get,
    path = "/featured",
    responses(
        (status = 200, description = "Upstream featured feed"),
        (status = 500, description = "Upstream failure")
    ),
    tag = "podcasts"
)]
async fn featured(State(state): State<BackendState>) -> Result<Json<Value>, ProxyError> {
    let data = state.client.featured().await.map_err(|e| {
        tracing::error!("Featured error: {}", e);
        ProxyError::internal("Failed to fetch featured podcasts")
    })?;

    Ok(Json(data))
}

/// GET /api/newest
/// Returns the newest episodes feed
#[utoipa::path(
    get,
    path = "/newest",
    responses(
        (status = 200, description = "Upstream newest feed"),
        (status = 500, description = "Upstream failure")
    ),
    tag = "podcasts"
)]
async fn newest(State(state): State<BackendState>) -> Result<Json<Value>, ProxyError> {
    let data = state.client.newest().await.map_err(|e| {
        tracing::error!("Newest error: {}", e);
        ProxyError::internal("Failed to fetch newest podcasts")
    })?;

    Ok(Json(data))
}

/// GET /api/health
/// Forwards the upstream health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Upstream health payload"),
        (status = 500, description = "Upstream failure")
    ),
    tag = "podcasts"
)]
async fn health(State(state): State<BackendState>) -> Result<Json<Value>, ProxyError> {
    let data = state.client.health().await.map_err(|e| {
        tracing::error!("Health check error: {}", e);
        ProxyError::internal("API health check failed")
    })?;

    Ok(Json(data))
}

/// OpenAPI document for the podcast proxy API
#[derive(utoipa::OpenApi)]
#[openapi(
    paths(
        search,
        streams,
        channel,
        channel_nextpage,
        featured,
        newest,
        health,
    ),
    tags(
        (name = "podcasts", description = "Podcast discovery and stream resolution proxy")
    )
)]
pub struct ApiDoc;
