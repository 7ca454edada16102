//! HTTP route handlers for the Zidar REST API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness check
//! GET  /health/ready               - Readiness check (pings both databases)
//!
//! # Auth
//! POST /login                      - Email/password login, returns signed token
//!
//! # Shop: korisnici
//! GET    /korisnici                - List accounts
//! POST   /korisnici                - Register a new account
//! GET    /korisnici/{id}           - Fetch one account
//! PUT    /korisnici/{id}           - Replace profile (token)
//! DELETE /korisnici/{id}           - Delete account (token)
//!
//! # Shop: katalog
//! GET    /kategorije               - List categories
//! POST   /kategorije               - Create category (token)
//! GET    /kategorije/{id}          - Fetch category
//! PUT    /kategorije/{id}          - Replace category (token)
//! DELETE /kategorije/{id}          - Delete category (token)
//! GET    /artikli?kategorija_id=N  - List articles, optional category filter
//! POST   /artikli                  - Create article (token)
//! GET    /artikli/{id}             - Fetch article
//! PUT    /artikli/{id}             - Replace article (token)
//! DELETE /artikli/{id}             - Delete article (token)
//!
//! # Shop: narudzbe (every route takes a token)
//! GET    /narudzbe                 - List orders
//! POST   /narudzbe                 - Create order header
//! GET    /narudzbe/{id}            - Fetch order
//! PUT    /narudzbe/{id}            - Replace order
//! DELETE /narudzbe/{id}            - Delete order
//! GET    /stavkenarudzbe?narudzba_id=N - List line items, optional order filter
//! POST   /stavkenarudzbe           - Create line item
//! GET    /stavkenarudzbe/{id}      - Fetch line item
//! PUT    /stavkenarudzbe/{id}      - Replace line item
//! DELETE /stavkenarudzbe/{id}      - Delete line item
//! GET    /transakcije              - List transactions
//! POST   /transakcije              - Record transaction
//! GET    /transakcije/{id}         - Fetch transaction
//! PUT    /transakcije/{id}         - Replace transaction
//! DELETE /transakcije/{id}         - Delete transaction
//!
//! # Events (open, stored in the separate events database)
//! GET/POST       /lokacije, /dogadjaji, /karte, /zaposleni, /komentari
//! GET/PUT/DELETE /lokacije/{id}, /dogadjaji/{id}, /karte/{id},
//!                /zaposleni/{id}, /komentari/{id}
//! ```
//!
//! # Wire contract
//!
//! Creates respond `201` with the stored entity; reads respond `200` with
//! the entity or list; updates respond `200 {"izmijenjeno": 1}`; deletes
//! respond `200 {"obrisano": 1}`. A missing required field is a `400` naming
//! the field, an unknown id is a `404` (never a 500), and every error body
//! is `{"greska": "<poruka>"}`.

pub mod articles;
pub mod auth;
pub mod categories;
pub mod events;
pub mod order_items;
pub mod orders;
pub mod transactions;
pub mod users;

use std::str::FromStr;

use axum::{Router, extract::State, http::StatusCode, routing::get};
use serde::Serialize;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use zidar_core::UnknownToken;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Build the complete application router, health endpoints and layers
/// included. `main` serves exactly this; the integration harness mounts it
/// on an ephemeral port.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .merge(shop_routes())
        .merge(events_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Create the shop half of the API.
fn shop_routes() -> Router<AppState> {
    Router::new()
        .route("/login", axum::routing::post(auth::login))
        .nest("/korisnici", users::router())
        .nest("/kategorije", categories::router())
        .nest("/artikli", articles::router())
        .nest("/narudzbe", orders::router())
        .nest("/stavkenarudzbe", order_items::router())
        .nest("/transakcije", transactions::router())
}

/// Create the events half of the API.
fn events_routes() -> Router<AppState> {
    Router::new()
        .nest("/lokacije", events::locations_router())
        .nest("/dogadjaji", events::events_router())
        .nest("/karte", events::tickets_router())
        .nest("/zaposleni", events::employees_router())
        .nest("/komentari", events::comments_router())
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Verifies connectivity to both databases before returning OK.
/// Returns 503 Service Unavailable if either is unreachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    let shop = sqlx::query("SELECT 1").fetch_one(state.shop_pool()).await;
    let events = sqlx::query("SELECT 1").fetch_one(state.events_pool()).await;

    match (shop, events) {
        (Ok(_), Ok(_)) => StatusCode::OK,
        _ => StatusCode::SERVICE_UNAVAILABLE,
    }
}

// =============================================================================
// Shared response bodies
// =============================================================================

/// Body for successful updates: rows changed, the way the store reports it.
#[derive(Debug, Serialize)]
pub struct Updated {
    pub izmijenjeno: u64,
}

/// Body for successful deletes: rows removed.
#[derive(Debug, Serialize)]
pub struct Deleted {
    pub obrisano: u64,
}

// =============================================================================
// Payload validation helpers
// =============================================================================

/// Require a field to be present.
fn require<T>(value: Option<T>, field: &'static str) -> Result<T> {
    value.ok_or_else(|| AppError::BadRequest(format!("Nedostaje obavezno polje: {field}")))
}

/// Require a non-blank string field.
fn require_str(value: Option<String>, field: &'static str) -> Result<String> {
    match value {
        Some(s) if !s.trim().is_empty() => Ok(s),
        _ => Err(AppError::BadRequest(format!(
            "Nedostaje obavezno polje: {field}"
        ))),
    }
}

/// Require a field carrying one of a known set of wire tokens.
fn parse_token<T>(value: Option<String>, field: &'static str) -> Result<T>
where
    T: FromStr<Err = UnknownToken>,
{
    let raw = require(value, field)?;
    raw.parse::<T>()
        .map_err(|_| AppError::BadRequest(format!("Neispravna vrijednost polja: {field}")))
}

/// Like `parse_token`, but an absent field falls back to the default token.
fn parse_token_or_default<T>(value: Option<String>, field: &'static str) -> Result<T>
where
    T: FromStr<Err = UnknownToken> + Default,
{
    match value {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| AppError::BadRequest(format!("Neispravna vrijednost polja: {field}"))),
        None => Ok(T::default()),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use zidar_core::{DeliveryType, OrderStatus};

    use super::*;

    #[test]
    fn test_require_names_the_field() {
        let err = require::<i64>(None, "korisnik_id").unwrap_err();
        assert!(err.to_string().contains("korisnik_id"));
        assert_eq!(require(Some(5), "korisnik_id").unwrap(), 5);
    }

    #[test]
    fn test_require_str_rejects_blank() {
        assert!(require_str(Some("  ".to_string()), "adresa").is_err());
        assert!(require_str(None, "adresa").is_err());
        assert_eq!(
            require_str(Some("Titova 1".to_string()), "adresa").unwrap(),
            "Titova 1"
        );
    }

    #[test]
    fn test_parse_token_rejects_unknown() {
        let parsed: DeliveryType = parse_token(Some("brza".to_string()), "tip_dostave").unwrap();
        assert_eq!(parsed, DeliveryType::Express);

        let err = parse_token::<DeliveryType>(Some("teleport".to_string()), "tip_dostave")
            .unwrap_err();
        assert!(err.to_string().contains("tip_dostave"));
    }

    #[test]
    fn test_parse_token_or_default_falls_back() {
        let status: OrderStatus = parse_token_or_default(None, "status").unwrap();
        assert_eq!(status, OrderStatus::Processing);

        let status: OrderStatus =
            parse_token_or_default(Some("poslana".to_string()), "status").unwrap();
        assert_eq!(status, OrderStatus::Shipped);
    }
}
