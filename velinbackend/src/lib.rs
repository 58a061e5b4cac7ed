//! Podcast backend client and proxy for Velin
//!
//! This crate provides the HTTP client for the upstream podcast service and
//! the REST proxy that the web client talks to.
//!
//! # Features
//!
//! - **Search and discovery**: episode search, featured and newest feeds
//! - **Channels**: channel information with continuation-token paging
//! - **Stream resolution**: audio streams and the optional video variant
//! - **Proxy layer**: axum routes forwarding upstream JSON verbatim, with
//!   stable error messages that never leak upstream details
//!
//! # Example
//!
//! ```no_run
//! use velinbackend::{extract_video_id_from_url, PodcastClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = PodcastClient::new()?;
//!
//!     let results = client.search("deep sea biology").await?;
//!     println!("{}", results);
//!
//!     if let Some(id) = extract_video_id_from_url("https://youtu.be/dQw4w9WgXcQ") {
//!         if let Some(video) = client.video_stream(&id).await? {
//!             println!("video: {} ({})", video.url, video.quality);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Server integration
//!
//! The [`ProxyExt`] trait mounts the proxy on a `velinserver::Server`:
//!
//! ```no_run
//! use velinbackend::ProxyExt;
//! use velinserver::ServerBuilder;
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let mut server = ServerBuilder::new_configured().build();
//! server.init_podcast_proxy().await?;
//! # Ok(())
//! # }
//! ```

pub mod api_rest;
pub mod client;
pub mod error;
pub mod models;
pub mod velinserver_ext;
mod velinserver_impl;

pub use api_rest::{create_router, ApiDoc};
pub use client::{
    extract_video_id_from_url, ClientBuilder, PodcastClient, VideoResolver, DEFAULT_BASE_URL,
    DEFAULT_REQUEST_TIMEOUT_SECS,
};
pub use error::{Error, Result};
pub use models::{AudioStream, Podcast, VideoStream, VideoStreamResponse};
pub use velinserver_ext::{BackendState, ProxyExt};
