//! Order line item routes (`/stavkenarudzbe`).
//!
//! Checkout posts one line per cart entry after the order header lands.
//! All routes take a token.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use zidar_core::{ArticleId, OrderId, OrderItemId};

use crate::db::{OrderItemRepository, order_items::OrderItemInput};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::OrderItem;
use crate::state::AppState;

use super::{Deleted, Updated, require};

/// Create the `/stavkenarudzbe` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(destroy))
}

/// Query string for line item listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub narudzba_id: Option<i64>,
}

/// Wire payload for creating or replacing a line item.
#[derive(Debug, Deserialize)]
pub struct OrderItemPayload {
    pub narudzba_id: Option<i64>,
    pub artikl_id: Option<i64>,
    pub kolicina: Option<i64>,
    pub cijena_po_komadu: Option<f64>,
}

impl OrderItemPayload {
    fn validated(self) -> Result<OrderItemInput> {
        Ok(OrderItemInput {
            order_id: OrderId::new(require(self.narudzba_id, "narudzba_id")?),
            article_id: ArticleId::new(require(self.artikl_id, "artikl_id")?),
            quantity: require(self.kolicina, "kolicina")?,
            unit_price: require(self.cijena_po_komadu, "cijena_po_komadu")?,
        })
    }
}

/// GET /stavkenarudzbe?narudzba_id=N
pub async fn list(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<OrderItem>>> {
    let items = OrderItemRepository::new(state.shop_pool())
        .get_all(query.narudzba_id.map(OrderId::new))
        .await?;
    Ok(Json(items))
}

/// GET /stavkenarudzbe/{id}
pub async fn show(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderItem>> {
    OrderItemRepository::new(state.shop_pool())
        .get_by_id(OrderItemId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Stavka narudžbe nije pronađena".to_owned()))
}

/// POST /stavkenarudzbe
pub async fn create(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<OrderItemPayload>,
) -> Result<(StatusCode, Json<OrderItem>)> {
    let input = payload.validated()?;

    let item = OrderItemRepository::new(state.shop_pool()).add(&input).await?;

    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /stavkenarudzbe/{id}
pub async fn update(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderItemPayload>,
) -> Result<Json<Updated>> {
    let input = payload.validated()?;

    OrderItemRepository::new(state.shop_pool())
        .update_by_id(OrderItemId::new(id), &input)
        .await?;

    Ok(Json(Updated { izmijenjeno: 1 }))
}

/// DELETE /stavkenarudzbe/{id}
pub async fn destroy(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>> {
    OrderItemRepository::new(state.shop_pool())
        .delete_by_id(OrderItemId::new(id))
        .await?;

    Ok(Json(Deleted { obrisano: 1 }))
}
