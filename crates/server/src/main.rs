//! Nexus server binary.
//!
//! Loads configuration from the environment, prepares the `SQLite` store,
//! and serves the HTTP API (plus the built client in production).

#![cfg_attr(not(test), forbid(unsafe_code))]

use nexus_server::{AppState, ServerConfig, db};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing with `EnvFilter`.
///
/// Defaults to info level for this crate if `RUST_LOG` is not set.
/// Production logs as JSON lines, development as human-readable text.
fn init_tracing(config: &ServerConfig) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "nexus_server=info,tower_http=debug".into());

    if config.run_mode.is_production() {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = ServerConfig::from_env().expect("Failed to load configuration");

    init_tracing(&config);

    // Initialize database connection pool; the file is created if missing
    let pool = db::create_pool(&config.database_path)
        .await
        .expect("Failed to create database pool");
    tracing::info!(path = %config.database_path.display(), "Database pool created");

    // Schema creation is idempotent, so every startup runs it
    db::init_schema(&pool)
        .await
        .expect("Failed to initialize database schema");

    // Build application state and router
    let state = AppState::new(config.clone(), pool);
    let app = nexus_server::app(state);

    // Start server
    let addr = config.socket_addr();
    tracing::info!("nexus listening on {}", addr);

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
