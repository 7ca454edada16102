//! Payment record routes (`/transakcije`).
//!
//! One row per checkout attempt. The storefront historically sent the
//! timestamp as `datum`, so the payload accepts that alias alongside
//! `datum_transakcije`. All routes take a token.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use zidar_core::{OrderId, TransactionId};

use crate::db::{TransactionRepository, transactions::TransactionInput};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Transaction;
use crate::state::AppState;

use super::{Deleted, Updated, parse_token, require};

/// Create the `/transakcije` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(destroy))
}

/// Wire payload for creating or replacing a payment record.
#[derive(Debug, Deserialize)]
pub struct TransactionPayload {
    pub narudzba_id: Option<i64>,
    pub iznos: Option<f64>,
    pub status: Option<String>,
    #[serde(alias = "datum")]
    pub datum_transakcije: Option<DateTime<Utc>>,
}

impl TransactionPayload {
    fn validated(self) -> Result<TransactionInput> {
        Ok(TransactionInput {
            order_id: OrderId::new(require(self.narudzba_id, "narudzba_id")?),
            amount: require(self.iznos, "iznos")?,
            status: parse_token(self.status, "status")?,
            occurred_at: self.datum_transakcije.unwrap_or_else(Utc::now),
        })
    }
}

/// GET /transakcije
pub async fn list(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Transaction>>> {
    let transactions = TransactionRepository::new(state.shop_pool())
        .get_all()
        .await?;
    Ok(Json(transactions))
}

/// GET /transakcije/{id}
pub async fn show(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Transaction>> {
    TransactionRepository::new(state.shop_pool())
        .get_by_id(TransactionId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Transakcija nije pronađena".to_owned()))
}

/// POST /transakcije
pub async fn create(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<TransactionPayload>,
) -> Result<(StatusCode, Json<Transaction>)> {
    let input = payload.validated()?;

    let transaction = TransactionRepository::new(state.shop_pool())
        .add(&input)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}

/// PUT /transakcije/{id}
pub async fn update(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<TransactionPayload>,
) -> Result<Json<Updated>> {
    let input = payload.validated()?;

    TransactionRepository::new(state.shop_pool())
        .update_by_id(TransactionId::new(id), &input)
        .await?;

    Ok(Json(Updated { izmijenjeno: 1 }))
}

/// DELETE /transakcije/{id}
pub async fn destroy(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>> {
    TransactionRepository::new(state.shop_pool())
        .delete_by_id(TransactionId::new(id))
        .await?;

    Ok(Json(Deleted { obrisano: 1 }))
}
