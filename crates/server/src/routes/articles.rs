//! Article routes (`/artikli`).
//!
//! The catalog is public: listing (optionally filtered by category) and
//! single-article reads need no session. Writes require a token.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use zidar_core::{ArticleId, CategoryId};

use crate::db::{ArticleRepository, articles::ArticleInput};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::Article;
use crate::state::AppState;

use super::{Deleted, Updated, require, require_str};

/// Create the `/artikli` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(destroy))
}

/// Query string for article listing.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub kategorija_id: Option<i64>,
}

/// Wire payload for creating or replacing an article.
#[derive(Debug, Deserialize)]
pub struct ArticlePayload {
    pub naziv: Option<String>,
    pub opis: Option<String>,
    pub cijena: Option<f64>,
    pub kolicina_na_stanju: Option<i64>,
    pub kategorija_id: Option<i64>,
    pub slika: Option<String>,
}

/// Validated article fields, borrowed back out of the payload.
struct ArticleFields {
    name: String,
    description: String,
    price: f64,
    stock: i64,
    category_id: CategoryId,
    image: Option<String>,
}

impl ArticlePayload {
    fn validated(self) -> Result<ArticleFields> {
        Ok(ArticleFields {
            name: require_str(self.naziv, "naziv")?,
            description: require_str(self.opis, "opis")?,
            price: require(self.cijena, "cijena")?,
            stock: require(self.kolicina_na_stanju, "kolicina_na_stanju")?,
            category_id: CategoryId::new(require(self.kategorija_id, "kategorija_id")?),
            image: self.slika,
        })
    }
}

impl ArticleFields {
    fn as_input(&self) -> ArticleInput<'_> {
        ArticleInput {
            name: &self.name,
            description: &self.description,
            price: self.price,
            stock: self.stock,
            category_id: self.category_id,
            image: self.image.as_deref(),
        }
    }
}

/// GET /artikli?kategorija_id=N
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Article>>> {
    let articles = ArticleRepository::new(state.shop_pool())
        .get_all(query.kategorija_id.map(CategoryId::new))
        .await?;
    Ok(Json(articles))
}

/// GET /artikli/{id}
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Article>> {
    ArticleRepository::new(state.shop_pool())
        .get_by_id(ArticleId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Artikl nije pronađen".to_owned()))
}

/// POST /artikli
pub async fn create(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Json(payload): Json<ArticlePayload>,
) -> Result<(StatusCode, Json<Article>)> {
    let fields = payload.validated()?;

    let article = ArticleRepository::new(state.shop_pool())
        .add(&fields.as_input())
        .await?;

    Ok((StatusCode::CREATED, Json(article)))
}

/// PUT /artikli/{id}
pub async fn update(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<ArticlePayload>,
) -> Result<Json<Updated>> {
    let fields = payload.validated()?;

    ArticleRepository::new(state.shop_pool())
        .update_by_id(ArticleId::new(id), &fields.as_input())
        .await?;

    Ok(Json(Updated { izmijenjeno: 1 }))
}

/// DELETE /artikli/{id}
pub async fn destroy(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>> {
    ArticleRepository::new(state.shop_pool())
        .delete_by_id(ArticleId::new(id))
        .await?;

    Ok(Json(Deleted { obrisano: 1 }))
}
