//! Schema bootstrap commands.
//!
//! # Usage
//!
//! ```bash
//! # Apply the shop schema
//! zidar schema shop
//!
//! # Apply the events schema
//! zidar schema events
//!
//! # Apply both
//! zidar schema all
//! ```
//!
//! # Environment Variables
//!
//! - `ZIDAR_SHOP_DATABASE_URL` - `SQLite` connection string for the shop
//!   database (falls back to `DATABASE_URL`)
//! - `ZIDAR_EVENTS_DATABASE_URL` - `SQLite` connection string for the events
//!   database
//!
//! Every statement in the bundled scripts is `IF NOT EXISTS`, so re-running
//! against an existing database is safe.

use secrecy::SecretString;
use thiserror::Error;

use zidar_server::db::{self, EVENTS_SCHEMA, SHOP_SCHEMA};

/// Errors that can occur while applying a schema.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Apply the shop database schema.
///
/// # Errors
///
/// Returns `SchemaError` if the database URL is not configured or a
/// statement fails.
pub async fn shop() -> Result<(), SchemaError> {
    dotenvy::dotenv().ok();

    let database_url = shop_database_url()?;

    tracing::info!("Connecting to shop database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Applying shop schema...");
    db::apply_schema(&pool, SHOP_SCHEMA).await?;

    tracing::info!("Shop schema applied!");
    Ok(())
}

/// Apply the events database schema.
///
/// # Errors
///
/// Returns `SchemaError` if the database URL is not configured or a
/// statement fails.
pub async fn events() -> Result<(), SchemaError> {
    dotenvy::dotenv().ok();

    let database_url = events_database_url()?;

    tracing::info!("Connecting to events database...");
    let pool = db::create_pool(&database_url).await?;

    tracing::info!("Applying events schema...");
    db::apply_schema(&pool, EVENTS_SCHEMA).await?;

    tracing::info!("Events schema applied!");
    Ok(())
}

// Same fallback chain the server config uses.
pub(crate) fn shop_database_url() -> Result<SecretString, SchemaError> {
    std::env::var("ZIDAR_SHOP_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .map(SecretString::from)
        .map_err(|_| SchemaError::MissingEnvVar("ZIDAR_SHOP_DATABASE_URL"))
}

pub(crate) fn events_database_url() -> Result<SecretString, SchemaError> {
    std::env::var("ZIDAR_EVENTS_DATABASE_URL")
        .map(SecretString::from)
        .map_err(|_| SchemaError::MissingEnvVar("ZIDAR_EVENTS_DATABASE_URL"))
}
