mod config;
mod dto;
mod handlers;
mod models;
mod repository;
mod router;
mod service;

use std::sync::Arc;

use repository::PgRepository;
use service::NoteService;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    // Log setup
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    // Load config
    let cfg = config::load_config().unwrap_or_else(|e| {
        tracing::error!("Failed to load configuration: {e}");
        panic!("failed to load configuration: {e}");
    });
    tracing::info!("Successfully loaded notes service config");

    // Repository creation and migration
    let repo = PgRepository::new(&cfg.database_url, cfg.pool_max_size, cfg.acquire_timeout())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to create database pool: {e}");
            panic!("failed to create database pool: {e}");
        });

    repo.migrate().await.unwrap_or_else(|e| {
        tracing::error!("Failed to migrate database: {e}");
        panic!("failed to migrate database: {e}");
    });

    // Service creation
    let service = Arc::new(NoteService::new(Arc::new(repo)));

    // Router config
    let cors = router::cors_layer(&cfg).unwrap_or_else(|e| {
        tracing::error!("Invalid CORS configuration: {e}");
        panic!("invalid CORS configuration: {e}");
    });
    let app = router::build_router(service, cors);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr())
        .await
        .unwrap_or_else(|e| {
            tracing::error!("Failed to bind {}: {e}", cfg.bind_addr());
            panic!("failed to bind {}: {e}", cfg.bind_addr());
        });

    match listener.local_addr() {
        Ok(addr) => tracing::info!("Notes service starting, listening on {}", addr),
        Err(e) => tracing::warn!("Notes service starting, local address unknown: {e}"),
    }

    // Starting router
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("HTTP server error: {e}");
        panic!("failed to start HTTP server: {e}");
    }

    tracing::info!("Notes service stopped");
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }

    tracing::info!("Shutdown signal received");
}
