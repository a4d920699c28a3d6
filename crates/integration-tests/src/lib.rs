//! Integration tests for Nexus.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p nexus-integration-tests
//! ```
//!
//! No external services are required. Every test starts its own server on
//! an ephemeral loopback port against a throwaway `SQLite` file, through
//! the same [`nexus_server::app`] router the binary runs.
//!
//! # Test Categories
//!
//! - `api_auth` - register/login/logout wire contract
//! - `api_products` - catalog wire contract
//! - `client_flow` - the client crate driven end to end

use std::path::PathBuf;

use nexus_server::{AppState, RunMode, ServerConfig, db};
use uuid::Uuid;

/// A running server plus everything a test needs to talk to it.
pub struct TestContext {
    /// Plain HTTP client, no cookies or state.
    pub client: reqwest::Client,
    /// Base URL of the spawned server, e.g. `http://127.0.0.1:49152`.
    pub base_url: String,
    database_path: PathBuf,
}

impl TestContext {
    /// Start a fresh server with an empty database.
    ///
    /// # Panics
    ///
    /// Panics if the database or listener cannot be set up; in tests that
    /// is the right failure mode.
    pub async fn new() -> Self {
        let database_path =
            std::env::temp_dir().join(format!("nexus-test-{}.db", Uuid::new_v4()));

        let pool = db::create_pool(&database_path)
            .await
            .expect("Failed to create database pool");
        db::init_schema(&pool)
            .await
            .expect("Failed to initialize schema");

        let config = ServerConfig {
            host: "127.0.0.1".parse().expect("loopback address"),
            port: 0,
            database_path: database_path.clone(),
            run_mode: RunMode::Development,
            static_dir: "dist".into(),
        };

        let app = nexus_server::app(AppState::new(config, pool));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local addr");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server crashed");
        });

        Self {
            client: reqwest::Client::new(),
            base_url: format!("http://{addr}"),
            database_path,
        }
    }

    /// Absolute URL for an API path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Test helper: register a user and return the parsed auth response.
    ///
    /// # Panics
    ///
    /// Panics if the request fails or the registration is rejected.
    pub async fn register(&self, username: &str, password: &str, role: &str) -> serde_json::Value {
        let resp = self
            .client
            .post(self.url("/api/register"))
            .json(&serde_json::json!({
                "username": username,
                "password": password,
                "role": role,
            }))
            .send()
            .await
            .expect("Failed to register test user");

        assert!(
            resp.status().is_success(),
            "registration rejected: {}",
            resp.status()
        );
        resp.json().await.expect("Failed to parse auth response")
    }
}

impl Drop for TestContext {
    fn drop(&mut self) {
        // The WAL sidecar files sit next to the database file.
        let base = self.database_path.display().to_string();
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{base}{suffix}"));
        }
    }
}
