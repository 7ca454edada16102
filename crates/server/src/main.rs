//! Zidar Server - REST API binary.
//!
//! This binary serves the shop API and the events API from one process on
//! port 3000.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out with Bosnian wire field names
//! - Two `SQLite` databases: shop (accounts, catalog, orders, payments)
//!   and events (venues, events, tickets, staff, comments)
//! - HMAC-signed login tokens; passwords stored as Argon2 hashes
//!
//! The process holds no mutable state of its own; everything lives in the
//! two databases, so several instances can point at the same files.

#![cfg_attr(not(test), forbid(unsafe_code))]

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zidar_server::config::ServerConfig;
use zidar_server::state::AppState;
use zidar_server::{db, routes};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "zidar_server=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize both database connection pools
    let shop_pool = db::create_pool(&config.shop_database_url)
        .await
        .expect("Failed to create shop database pool");
    let events_pool = db::create_pool(&config.events_database_url)
        .await
        .expect("Failed to create events database pool");
    tracing::info!("Database pools created");

    // NOTE: Schema bootstrap is NOT run automatically on startup.
    // Run it explicitly via: cargo run -p zidar-cli -- schema all

    let addr = config.socket_addr();

    // Build application state and router
    let state = AppState::new(config, shop_pool, events_pool);
    let app = routes::app(state);

    // Start server
    tracing::info!("zidar-server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
