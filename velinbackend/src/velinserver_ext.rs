//! Server extension for the podcast proxy
//!
//! This module provides an extension trait for adding the podcast proxy API
//! to a velinserver server.

use crate::client::PodcastClient;
use anyhow::Result;
use std::sync::Arc;

/// Shared state for the proxy handlers
#[derive(Clone)]
pub struct BackendState {
    pub client: Arc<PodcastClient>,
}

impl BackendState {
    pub fn new(client: Arc<PodcastClient>) -> Self {
        Self { client }
    }
}

/// Trait extending velinserver with the podcast proxy
///
/// `velinbackend` adds methods on `velinserver::Server` without velinserver
/// depending on velinbackend: the server stays generic, the extension wires
/// in the proxy routes.
///
/// # Example
///
/// ```rust,no_run
/// use velinbackend::ProxyExt;
/// use velinserver::ServerBuilder;
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let mut server = ServerBuilder::new_configured().build();
///
///     server.init_podcast_proxy().await?;
///
///     server.start().await;
///     server.wait().await;
///     Ok(())
/// }
/// ```
pub trait ProxyExt {
    /// Initialize the podcast proxy and register its HTTP routes
    ///
    /// Builds a [`PodcastClient`] from the global configuration (upstream
    /// base URL and timeout) and mounts the proxy under `/api`:
    ///
    /// - `GET /api/search?q=` - episode search
    /// - `GET /api/streams/{video_id}` - audio stream resolution
    /// - `GET /api/channel/{id}` - channel information
    /// - `GET /api/nextpage/channel/{channel_id}?nextpage=` - channel paging
    /// - `GET /api/featured` - featured feed
    /// - `GET /api/newest` - newest feed
    /// - `GET /api/health` - upstream health check
    ///
    /// Also publishes the Swagger UI at `/swagger-ui/podcasts`.
    async fn init_podcast_proxy(&mut self) -> Result<BackendState>;

    /// Initialize the podcast proxy with an existing client
    ///
    /// Same as [`ProxyExt::init_podcast_proxy`] but reuses a client already
    /// built elsewhere, so the HTTP connection pool is shared with other
    /// consumers.
    async fn init_podcast_proxy_with_client(
        &mut self,
        client: Arc<PodcastClient>,
    ) -> Result<BackendState>;
}

// The trait implementation lives in a separate module (velinserver_impl.rs)
// to keep this interface free of server wiring.
