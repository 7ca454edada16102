//! Database operations for the two `SQLite` files the server owns.
//!
//! # Databases
//!
//! ## Shop (`ZIDAR_SHOP_DATABASE_URL`)
//!
//! - `korisnici` - Customer and admin accounts
//! - `kategorije` - Article categories
//! - `artikli` - Sellable articles (construction materials)
//! - `narudzbe` - Orders
//! - `stavke_narudzbe` - Order line items
//! - `transakcije` - Payment transactions
//!
//! ## Events (`ZIDAR_EVENTS_DATABASE_URL`, SEPARATE file)
//!
//! - `lokacije`, `dogadjaji`, `karte`, `zaposleni`, `komentari`
//!
//! # Schema
//!
//! There is no migration framework. The DDL lives in `schema/*.sql` and is
//! applied to fresh databases via:
//! ```bash
//! cargo run -p zidar-cli -- schema all
//! ```
//!
//! Queries are checked at runtime (`query_as`), not with the compile-time
//! macros, because the database files do not exist until first boot.

pub mod articles;
pub mod categories;
pub mod events;
pub mod order_items;
pub mod orders;
pub mod transactions;
pub mod users;

use std::str::FromStr;
use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use thiserror::Error;

pub use articles::ArticleRepository;
pub use categories::CategoryRepository;
pub use events::{
    CommentRepository, EmployeeRepository, EventRepository, LocationRepository, TicketRepository,
};
pub use order_items::OrderItemRepository;
pub use orders::OrderRepository;
pub use transactions::TransactionRepository;
pub use users::UserRepository;

/// Shop database DDL, applied by `zidar-cli schema shop`.
pub const SHOP_SCHEMA: &str = include_str!("../../schema/shop.sql");

/// Events database DDL, applied by `zidar-cli schema events`.
pub const EVENTS_SCHEMA: &str = include_str!("../../schema/events.sql");

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested row was not found (zero rows matched the id).
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Create a `SQLite` connection pool.
///
/// The pool is capped at a single connection: `SQLite` serializes writers
/// anyway, and a lone connection keeps every statement strictly ordered the
/// same way the previous single-process store did. It also makes
/// `sqlite::memory:` URLs usable in tests, where each connection would
/// otherwise see its own empty database.
///
/// Missing database files are created on first connect.
///
/// # Errors
///
/// Returns `sqlx::Error` if the URL is invalid or the connection cannot be
/// established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<SqlitePool, sqlx::Error> {
    let options =
        SqliteConnectOptions::from_str(database_url.expose_secret())?.create_if_missing(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect_with(options)
        .await
}

/// Apply a schema script to a database.
///
/// Every statement in the bundled scripts is `IF NOT EXISTS`, so this is safe
/// to run against a database that already has the layout.
///
/// # Errors
///
/// Returns `sqlx::Error` if any statement fails.
pub async fn apply_schema(pool: &SqlitePool, schema: &str) -> Result<(), sqlx::Error> {
    sqlx::raw_sql(schema).execute(pool).await?;
    Ok(())
}
