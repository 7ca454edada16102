//! Order routes (`/narudzbe`).
//!
//! Orders hold money and addresses, so every route here takes a token.
//! Checkout posts the header first, then its line items, then the payment
//! record; the server stores what it is sent and does not recompute totals.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use zidar_core::{DeliveryType, OrderId, OrderStatus, PaymentMethod, UserId};

use crate::db::{OrderRepository, orders::OrderInput};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Order;
use crate::state::AppState;

use super::{Deleted, Updated, parse_token, parse_token_or_default, require, require_str};

/// Create the `/narudzbe` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(destroy))
}

/// Wire payload for creating or replacing an order header.
///
/// `datum_narudzbe` defaults to now and `status` to `u_obradi`, matching
/// what checkout omits.
#[derive(Debug, Deserialize)]
pub struct OrderPayload {
    pub korisnik_id: Option<i64>,
    pub datum_narudzbe: Option<DateTime<Utc>>,
    pub ukupna_cijena: Option<f64>,
    pub status: Option<String>,
    pub nacin_placanja: Option<String>,
    pub tip_dostave: Option<String>,
    pub adresa_dostave: Option<String>,
}

/// Validated order fields.
struct OrderFields {
    user_id: UserId,
    ordered_at: DateTime<Utc>,
    total: f64,
    status: OrderStatus,
    payment_method: PaymentMethod,
    delivery_type: DeliveryType,
    delivery_address: String,
}

impl OrderPayload {
    fn validated(self) -> Result<OrderFields> {
        Ok(OrderFields {
            user_id: UserId::new(require(self.korisnik_id, "korisnik_id")?),
            ordered_at: self.datum_narudzbe.unwrap_or_else(Utc::now),
            total: require(self.ukupna_cijena, "ukupna_cijena")?,
            status: parse_token_or_default(self.status, "status")?,
            payment_method: parse_token(self.nacin_placanja, "nacin_placanja")?,
            delivery_type: parse_token(self.tip_dostave, "tip_dostave")?,
            delivery_address: require_str(self.adresa_dostave, "adresa_dostave")?,
        })
    }
}

impl OrderFields {
    fn as_input(&self) -> OrderInput<'_> {
        OrderInput {
            user_id: self.user_id,
            ordered_at: self.ordered_at,
            total: self.total,
            status: self.status,
            payment_method: self.payment_method,
            delivery_type: self.delivery_type,
            delivery_address: &self.delivery_address,
        }
    }
}

/// GET /narudzbe
pub async fn list(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Order>>> {
    let orders = OrderRepository::new(state.shop_pool()).get_all().await?;
    Ok(Json(orders))
}

/// GET /narudzbe/{id}
pub async fn show(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Order>> {
    OrderRepository::new(state.shop_pool())
        .get_by_id(OrderId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Narudžba nije pronađena".to_owned()))
}

/// POST /narudzbe
pub async fn create(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<OrderPayload>,
) -> Result<(StatusCode, Json<Order>)> {
    let fields = payload.validated()?;

    let order = OrderRepository::new(state.shop_pool())
        .add(&fields.as_input())
        .await?;

    tracing::info!(order_id = %order.id, user_id = %order.user_id, "order created");

    Ok((StatusCode::CREATED, Json(order)))
}

/// PUT /narudzbe/{id}
pub async fn update(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderPayload>,
) -> Result<Json<Updated>> {
    let fields = payload.validated()?;

    OrderRepository::new(state.shop_pool())
        .update_by_id(OrderId::new(id), &fields.as_input())
        .await?;

    Ok(Json(Updated { izmijenjeno: 1 }))
}

/// DELETE /narudzbe/{id}
pub async fn destroy(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>> {
    OrderRepository::new(state.shop_pool())
        .delete_by_id(OrderId::new(id))
        .await?;

    Ok(Json(Deleted { obrisano: 1 }))
}
