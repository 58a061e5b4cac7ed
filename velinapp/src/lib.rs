//! # velinapp - Embedded web application for Velin
//!
//! This crate embeds the built web client into the binary via `RustEmbed`
//! so production deployments serve the app straight from memory, with no
//! external static files to manage.
//!
//! ## Structure
//!
//! ```text
//! velinapp/
//! ├── Cargo.toml
//! ├── src/
//! │   ├── lib.rs               # Webapp embed + WebAppExt trait
//! │   └── velinserver_impl.rs  # WebAppExt for velinserver::Server
//! └── webapp/
//!     └── dist/                # Built client (index.html, manifest, ...)
//! ```
//!
//! The client build lands in `webapp/dist/`; `RustEmbed` picks it up at
//! compile time. Unknown paths fall back to `index.html` so the
//! client-side router owns navigation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use velinapp::{Webapp, WebAppExt};
//! use velinserver::ServerBuilder;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut server = ServerBuilder::new_configured().build();
//!
//!     // Mount the app and redirect the root to it
//!     server.add_webapp_with_redirect::<Webapp>("/app").await;
//!
//!     server.start().await;
//!     server.wait().await;
//! }
//! ```

use rust_embed::RustEmbed;

/// The embedded web application
///
/// Includes everything under `webapp/dist` in the binary at compile time.
#[derive(RustEmbed, Clone)]
#[folder = "webapp/dist"]
pub struct Webapp;

/// Trait extending an HTTP server with webapp mounting
///
/// `velinapp` adds methods on external server types through this trait so
/// the server crate never depends on the app crate.
pub trait WebAppExt {
    /// Mount a Single Page Application at `path`
    async fn add_webapp<W>(&mut self, path: &str)
    where
        W: RustEmbed + Clone + Send + Sync + 'static;

    /// Mount a Single Page Application and redirect `/` to it
    async fn add_webapp_with_redirect<W>(&mut self, path: &str)
    where
        W: RustEmbed + Clone + Send + Sync + 'static;
}

// Implementation for velinserver::Server (feature-gated)
#[cfg(feature = "velinserver")]
mod velinserver_impl;
