//! Countdown Board - named, categorized countdown timers served over HTTP
//!
//! This is the main entry point for the countdown-board application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use countdown_board::{
    config::Config,
    state::AppState,
    api::create_router,
    tasks::TickerHandle,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("countdown_board={},tower_http=info", config.log_level()))
        .init();

    info!("Starting countdown-board server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    // Create application state
    let state = Arc::new(AppState::new(config.port, config.host.clone()));

    // Start the countdown ticker
    let ticker = TickerHandle::spawn(Arc::clone(&state));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET    /board        - Form and timer cards");
    info!("  GET    /board/events - Live board updates (SSE)");
    info!("  PUT    /form         - Edit the draft form");
    info!("  POST   /form/submit  - Add a timer from the draft form");
    info!("  GET    /timers       - List timers");
    info!("  POST   /timers       - Add a timer");
    info!("  DELETE /timers/:id   - Remove a finished timer");
    info!("  GET    /status       - Timer counts and server info");
    info!("  GET    /health       - Health check");

    let server = axum::serve(listener, app).with_graceful_shutdown(async {
        shutdown_signal().await;
        info!("Shutdown signal received");
    });

    if let Err(e) = server.await {
        tracing::error!("Server error: {}", e);
    }

    ticker.shutdown().await;

    info!("Server shutdown complete");
    Ok(())
}
