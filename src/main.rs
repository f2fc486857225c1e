//! Anchor demo - view-state server for the Anchor landing page
//! 
//! This is the main entry point for the anchor-demo application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use anchor_demo::{
    config::Config,
    state::AppState,
    api::create_router,
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("anchor_demo={},tower_http=info", config.log_level()))
        .init();

    info!("Starting anchor-demo server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, tick={}ms",
          config.host, config.port, config.tick_ms);

    // Create view state
    let state = Arc::new(AppState::new(config.port, config.host.clone(), config.tick_period()));

    // Create HTTP router with all endpoints
    let app = create_router(Arc::clone(&state));

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST /start      - Start the stopwatch");
    info!("  POST /pause      - Pause the stopwatch");
    info!("  POST /toggle     - Start or pause the stopwatch");
    info!("  POST /reset      - Reset the stopwatch to 00:00");
    info!("  POST /select/:id - Select or deselect a feature tile");
    info!("  GET  /status     - Current view and server info");
    info!("  GET  /events     - Stream of view updates");
    info!("  GET  /health     - Health check");

    // Setup graceful shutdown
    let server = axum::serve(listener, app);

    let result = tokio::select! {
        result = server => {
            result.map_err(anyhow::Error::from)
        }
        signal = shutdown_signal() => {
            info!("Shutdown signal received");
            signal.map(|_| ()).map_err(anyhow::Error::from)
        }
    };

    // No tick may outlive the server
    state.teardown();

    if let Err(e) = &result {
        tracing::error!("Server error: {}", e);
    }
    info!("Server shutdown complete");
    result
}
