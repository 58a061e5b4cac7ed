use tracing::info;
use utoipa::OpenApi;
use velinapp::{WebAppExt, Webapp};
use velinbackend::ProxyExt;
use velinserver::logs::{create_logs_router, LogsApiDoc};
use velinserver::ServerBuilder;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ========== PHASE 1 : Infrastructure ==========

    let mut server = ServerBuilder::new_configured().build();

    let log_state = server.init_logging().await;

    server
        .add_route("/info", || async {
            serde_json::json!({"name": "Velin", "version": env!("CARGO_PKG_VERSION")})
        })
        .await;

    // Log level management API with its Swagger UI
    server
        .add_openapi(
            create_logs_router(log_state.clone()),
            LogsApiDoc::openapi(),
            "logs",
        )
        .await;

    // ========== PHASE 2 : Application wiring ==========

    info!("📡 Initializing podcast proxy...");
    server
        .init_podcast_proxy()
        .await
        .expect("Failed to initialize podcast proxy");

    info!("📡 Registering Web application...");
    server.add_webapp_with_redirect::<Webapp>("/app").await;

    // ========== PHASE 3 : Startup ==========

    info!("🌐 Starting HTTP server...");
    server.start().await;

    info!("✅ Velin is ready!");
    info!("Press Ctrl+C to stop...");
    server.wait().await;

    Ok(())
}
