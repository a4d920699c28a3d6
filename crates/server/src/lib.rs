//! Nexus server - HTTP JSON API for the two-role shop.
//!
//! # Architecture
//!
//! - Axum web framework, JSON in and out
//! - `SQLite` for users, products, and sessions (single file, created on
//!   first run)
//! - Bearer-token sessions resolved against the database on every request
//! - In development the client runs on its own dev server and proxies
//!   `/api` here; in production this binary also serves the built client
//!   assets
//!
//! The router is assembled by [`app`] so the binary and the integration
//! test harness run the identical middleware stack.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

pub use config::{RunMode, ServerConfig};
pub use state::AppState;

/// Build the application router.
///
/// Request tracing wraps everything; CORS (development) or static asset
/// serving (production) is decided by the state's run mode.
#[must_use]
pub fn app(state: AppState) -> Router {
    let trace = TraceLayer::new_for_http()
        .make_span_with(|request: &axum::http::Request<_>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                status = tracing::field::Empty,
                latency_ms = tracing::field::Empty,
            )
        })
        .on_response(
            |response: &axum::http::Response<_>, latency: std::time::Duration, span: &Span| {
                span.record("status", response.status().as_u16());
                span.record("latency_ms", latency.as_millis() as u64);
                DefaultOnResponse::default().on_response(response, latency, span);
            },
        );

    let router = routes::routes();

    let router = if state.config().run_mode.is_production() {
        // Built client assets, with an index.html fallback so client-routed
        // paths like /merchant survive a hard reload.
        let static_dir = state.config().static_dir.clone();
        let index = static_dir.join("index.html");
        router.fallback_service(ServeDir::new(static_dir).fallback(ServeFile::new(index)))
    } else {
        // The client dev server runs on another origin and proxies /api here.
        router.layer(CorsLayer::permissive())
    };

    router.layer(trace).with_state(state)
}
