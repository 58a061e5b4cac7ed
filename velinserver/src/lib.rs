//! # velinserver - High-level Axum web server
//!
//! A small, ergonomic abstraction over Axum used by all Velin HTTP surfaces.
//!
//! ## Features
//!
//! - High-level API for adding JSON routes, sub-routers and redirects
//! - Single Page Application serving via `RustEmbed`
//! - OpenAPI documentation with automatic Swagger UI
//! - Server-Sent Events log streaming for live monitoring
//! - Graceful shutdown on Ctrl+C
//!
//! ## Modules
//!
//! - [`server`]: the main server implementation and its builder
//! - [`logs`]: SSE log pipeline (ring buffer, live stream, level control)
//!
//! ## Example
//!
//! ```rust,no_run
//! use velinserver::ServerBuilder;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut server = ServerBuilder::new_configured().build();
//!
//!     server.add_route("/api/status", || async {
//!         serde_json::json!({"status": "ok"})
//!     }).await;
//!
//!     server.init_logging().await;
//!     server.start().await;
//!     server.wait().await;
//! }
//! ```

pub mod logs;
pub mod server;

pub use logs::{log_dump, log_sse, LogState, SseLayer};
pub use server::{Server, ServerBuilder, ServerInfo};
