//! Implementation of [`ProxyExt`] for `velinserver::Server`
//!
//! Wires the podcast proxy routes and their Swagger UI into a running
//! server. Lives apart from the trait definition so the extension interface
//! stays independent of server details.

use crate::api_rest::{create_router, ApiDoc};
use crate::client::PodcastClient;
use crate::velinserver_ext::{BackendState, ProxyExt};
use anyhow::Result;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;
use velinserver::Server;

impl ProxyExt for Server {
    async fn init_podcast_proxy(&mut self) -> Result<BackendState> {
        let config = velinconfig::get_config();

        let base_url = config.get_upstream_base_url();
        let timeout = config.get_upstream_timeout_secs();

        let client = PodcastClient::builder()
            .base_url(base_url)
            .timeout(Duration::from_secs(timeout))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create podcast client: {}", e))?;

        self.init_podcast_proxy_with_client(Arc::new(client)).await
    }

    async fn init_podcast_proxy_with_client(
        &mut self,
        client: Arc<PodcastClient>,
    ) -> Result<BackendState> {
        info!("Initializing podcast proxy...");

        let state = BackendState::new(client);

        let router = create_router(state.clone());
        self.add_router("/api", router).await;

        // Swagger UI lives outside /api so it never shadows proxy routes
        let swagger: Router = SwaggerUi::new("/swagger-ui/podcasts")
            .url("/api-docs/podcasts.json", ApiDoc::openapi())
            .into();
        self.add_router("/", swagger).await;

        info!("Podcast proxy initialized, endpoints available at /api/*");

        Ok(state)
    }
}
