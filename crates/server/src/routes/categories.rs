//! Category routes (`/kategorije`).
//!
//! Reads are open so the storefront can render the catalog without a
//! session; writes require a token.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use zidar_core::CategoryId;

use crate::db::{CategoryRepository, categories::CategoryInput};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Category;
use crate::state::AppState;

use super::{Deleted, Updated, require_str};

/// Create the `/kategorije` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(destroy))
}

/// Wire payload for creating or replacing a category.
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub naziv: Option<String>,
    pub opis: Option<String>,
}

impl CategoryPayload {
    fn validated(self) -> Result<(String, String)> {
        let name = require_str(self.naziv, "naziv")?;
        let description = require_str(self.opis, "opis")?;
        Ok((name, description))
    }
}

/// GET /kategorije
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Category>>> {
    let categories = CategoryRepository::new(state.shop_pool()).get_all().await?;
    Ok(Json(categories))
}

/// GET /kategorije/{id}
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Category>> {
    CategoryRepository::new(state.shop_pool())
        .get_by_id(CategoryId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Kategorija nije pronađena".to_owned()))
}

/// POST /kategorije
pub async fn create(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>)> {
    let (name, description) = payload.validated()?;

    let category = CategoryRepository::new(state.shop_pool())
        .add(&CategoryInput {
            name: &name,
            description: &description,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /kategorije/{id}
pub async fn update(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Updated>> {
    let (name, description) = payload.validated()?;

    CategoryRepository::new(state.shop_pool())
        .update_by_id(
            CategoryId::new(id),
            &CategoryInput {
                name: &name,
                description: &description,
            },
        )
        .await?;

    Ok(Json(Updated { izmijenjeno: 1 }))
}

/// DELETE /kategorije/{id}
pub async fn destroy(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>> {
    CategoryRepository::new(state.shop_pool())
        .delete_by_id(CategoryId::new(id))
        .await?;

    Ok(Json(Deleted { obrisano: 1 }))
}
