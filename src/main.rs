//! Event Countdown - shared countdown timer server
//!
//! This is the main entry point for the event-countdown application.

use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use event_countdown::{
    api::create_router,
    clock::SystemClock,
    config::Config,
    engine::TimerEngine,
    state::AppState,
    store::{FileStore, MemoryStore, TimerStore},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("event_countdown={},tower_http=info", config.log_level()))
        .init();

    info!("Starting event-countdown server v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}", config.host, config.port);

    let store: Arc<dyn TimerStore> = if config.in_memory {
        warn!("Using in-memory timer store, state will be lost on exit");
        Arc::new(MemoryStore::new())
    } else {
        info!("Timer state file: {}", config.state_file.display());
        Arc::new(FileStore::new(&config.state_file))
    };

    let engine = TimerEngine::new(store, Arc::new(SystemClock));

    // Fail fast on an unreadable or corrupt record rather than on the first request
    let status = engine.status()?;
    info!(
        "Timer is {} with {}s remaining of {}s",
        if status.is_running { "running" } else { "stopped" },
        status.remaining_seconds,
        status.duration_seconds
    );

    let state = Arc::new(AppState::new(
        engine,
        config.api_key.clone(),
        config.host.clone(),
        config.port,
    ));

    // Create HTTP router with all endpoints
    let app = create_router(state);

    // Bind to the specified address
    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  GET  /api/timer/status       - Get timer status (public)");
    info!("  POST /api/timer/start        - Start timer (auth required)");
    info!("  POST /api/timer/sync         - Sync timer (auth required)");
    info!("  POST /api/timer/stop         - Stop timer (auth required)");
    info!("  POST /api/timer/reset        - Reset timer (auth required)");
    info!("  POST /api/timer/set-duration - Set duration (auth required)");
    info!("  GET  /health                 - Health check");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}
