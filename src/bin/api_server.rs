// API server binary entry point
//
// Purpose: Serve translation + economics endpoints over HTTP
// Usage: cargo run --features api --bin api_server

use agri_advisor::{create_router, AppConfig, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "agri_advisor=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    let config = AppConfig::from_env()?;

    tracing::info!("Configuration:");
    tracing::info!("  DEFAULT_LANGUAGE: {}", config.default_language);
    match &config.locales_dir {
        Some(dir) => tracing::info!("  LOCALES_DIR: {}", dir.display()),
        None => tracing::info!("  LOCALES_DIR: (embedded only)"),
    }
    tracing::info!("  PORT: {}", config.port);

    let port = config.port;
    let state = AppState::new(config)?;
    tracing::info!("Application state initialized successfully");

    // Create router with all endpoints and middleware
    let app = create_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
