//! Schema initialization command.
//!
//! Uses the same configuration loading as the server, so `NEXUS_DATABASE`
//! points both at the same file.

use nexus_server::{ServerConfig, db};
use tracing::info;

/// Create the database file and its tables.
///
/// Safe to run repeatedly; every statement is `CREATE TABLE IF NOT EXISTS`.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the database cannot be
/// opened.
pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = ServerConfig::from_env()?;

    info!(path = %config.database_path.display(), "Initializing database");
    let pool = db::create_pool(&config.database_path).await?;
    db::init_schema(&pool).await?;

    info!("Schema ready");
    Ok(())
}
