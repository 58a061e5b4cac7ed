//! HTTP client for the podcast backend API
//!
//! This module provides a client for the upstream podcast service: search,
//! audio stream resolution, channel listings, featured/newest feeds and the
//! video stream resolution endpoint.
//!
//! # Example
//!
//! ```no_run
//! use velinbackend::PodcastClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PodcastClient::new()?;
//!
//!     // Search for episodes
//!     let results = client.search("history of radio").await?;
//!     println!("{}", results);
//!
//!     // Resolve the audio stream of one episode
//!     let stream = client.audio_streams("dQw4w9WgXcQ").await?;
//!     println!("{}", stream);
//!
//!     Ok(())
//! }
//! ```

use crate::error::{Error, Result};
use crate::models::{VideoStream, VideoStreamResponse};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde_json::Value;
use std::sync::OnceLock;
use std::time::Duration;

/// Default upstream base URL
pub const DEFAULT_BASE_URL: &str = "https://backendmix-emergeny.vercel.app";

/// Default timeout for HTTP requests (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default User-Agent
pub const DEFAULT_USER_AGENT: &str = "Velin/0.1.0 (velinbackend)";

/// Podcast backend HTTP client
///
/// The client is stateless and does not cache responses internally. Most
/// methods return the upstream JSON verbatim as [`serde_json::Value`] so the
/// proxy layer can forward payloads without re-modelling them; only video
/// resolution is typed because the player consumes it directly.
#[derive(Debug, Clone)]
pub struct PodcastClient {
    pub(crate) client: Client,
    base_url: String,
}

impl PodcastClient {
    /// Create a new client with default settings
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    /// Create a builder for configuring the client
    pub fn builder() -> ClientBuilder {
        ClientBuilder::default()
    }

    /// Create a client with a custom reqwest::Client
    ///
    /// Useful for sharing HTTP connection pools or custom proxy settings
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the internal HTTP client
    pub fn http_client(&self) -> &Client {
        &self.client
    }

    /// Fetch a JSON document from the upstream, propagating error statuses
    async fn get_json(&self, path_and_query: &str) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            return Err(Error::api_error(format!(
                "Upstream returned {} for {}",
                response.status(),
                path_and_query
            )));
        }

        Ok(response.json::<Value>().await?)
    }

    // ========================================================================
    // Discovery and search
    // ========================================================================

    /// Search episodes matching a query
    pub async fn search(&self, query: &str) -> Result<Value> {
        let encoded = url::form_urlencoded::byte_serialize(query.as_bytes()).collect::<String>();
        self.get_json(&format!("/search?q={}", encoded)).await
    }

    /// Get the featured episodes feed
    pub async fn featured(&self) -> Result<Value> {
        self.get_json("/featured").await
    }

    /// Get the newest episodes feed
    pub async fn newest(&self) -> Result<Value> {
        self.get_json("/newest").await
    }

    // ========================================================================
    // Channels
    // ========================================================================

    /// Get channel information and its first page of episodes
    pub async fn channel(&self, id: &str) -> Result<Value> {
        self.get_json(&format!("/channel/{}", id)).await
    }

    /// Get the next page of episodes for a channel
    ///
    /// `nextpage` is the opaque continuation token from a previous page.
    pub async fn channel_nextpage(&self, channel_id: &str, nextpage: &str) -> Result<Value> {
        let encoded = url::form_urlencoded::byte_serialize(nextpage.as_bytes()).collect::<String>();
        self.get_json(&format!(
            "/nextpage/channel/{}?nextpage={}",
            channel_id, encoded
        ))
        .await
    }

    // ========================================================================
    // Streams
    // ========================================================================

    /// Resolve the audio stream(s) for an episode
    pub async fn audio_streams(&self, video_id: &str) -> Result<Value> {
        self.get_json(&format!("/streams/{}", video_id)).await
    }

    /// Resolve the video stream for an episode
    ///
    /// Returns `Ok(None)` when the upstream answers but reports no playable
    /// stream (`status` not "success" or missing URL). Network and decoding
    /// failures are returned as errors.
    pub async fn video_stream(&self, video_id: &str) -> Result<Option<VideoStream>> {
        let value = self.get_json(&format!("/video/{}", video_id)).await?;
        let response: VideoStreamResponse = serde_json::from_value(value)?;

        if response.status != "success" {
            return Ok(None);
        }

        match response.url {
            Some(url) => Ok(Some(VideoStream::from_resolution(
                url,
                response.quality.as_deref(),
            ))),
            None => Ok(None),
        }
    }

    /// Check the upstream health endpoint
    pub async fn health(&self) -> Result<Value> {
        self.get_json("/health").await
    }
}

/// Extract an 11-character video id from a watch URL or a bare id
///
/// Recognizes the usual URL shapes (`watch?v=`, `youtu.be/`, `/embed/`,
/// `/shorts/`, `/live/`) as well as a bare id. Returns `None` when nothing
/// matches.
pub fn extract_video_id_from_url(input: &str) -> Option<String> {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

    let patterns = PATTERNS.get_or_init(|| {
        [
            r"[?&]v=([A-Za-z0-9_-]{11})",
            r"youtu\.be/([A-Za-z0-9_-]{11})",
            r"/embed/([A-Za-z0-9_-]{11})",
            r"/shorts/([A-Za-z0-9_-]{11})",
            r"/live/([A-Za-z0-9_-]{11})",
            r"^([A-Za-z0-9_-]{11})$",
        ]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
    });

    for re in patterns {
        if let Some(caps) = re.captures(input) {
            if let Some(m) = caps.get(1) {
                return Some(m.as_str().to_string());
            }
        }
    }

    None
}

/// Asynchronous video stream resolution seam
///
/// The playback controller depends on this trait rather than on
/// [`PodcastClient`] directly, so tests can substitute a slow or failing
/// resolver.
#[async_trait]
pub trait VideoResolver: Send + Sync {
    /// Resolve the video stream for an episode, `None` when unavailable
    async fn resolve_video(&self, video_id: &str) -> Result<Option<VideoStream>>;
}

#[async_trait]
impl VideoResolver for PodcastClient {
    async fn resolve_video(&self, video_id: &str) -> Result<Option<VideoStream>> {
        self.video_stream(video_id).await
    }
}

/// Builder for [`PodcastClient`]
pub struct ClientBuilder {
    client: Option<Client>,
    base_url: String,
    timeout: Duration,
    user_agent: String,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            client: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl ClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom HTTP client
    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        let url = url.into();
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the client
    pub fn build(self) -> Result<PodcastClient> {
        let client = match self.client {
            Some(c) => c,
            None => Client::builder()
                .timeout(self.timeout)
                .user_agent(self.user_agent)
                .build()?,
        };

        Ok(PodcastClient {
            client,
            base_url: self.base_url,
        })
    }
}
