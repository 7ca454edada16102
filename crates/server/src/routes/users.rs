//! Account routes (`/korisnici`).
//!
//! `POST /` is registration and is open, as are the reads the storefront
//! uses to render profile pages. Replacing or deleting an account requires
//! a token.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;

use zidar_core::UserId;

use crate::db::{UserRepository, users::UserUpdate};
use crate::error::{AppError, Result};
use crate::middleware::RequireAuth;
use crate::models::User;
use crate::services::auth::{AuthService, Registration};
use crate::state::AppState;

use super::{Deleted, Updated, parse_token_or_default, require_str};

/// Create the `/korisnici` router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(show).put(update).delete(destroy))
}

/// Wire payload for registration and profile replacement.
///
/// `sifra` is consumed only by registration; profile updates never touch
/// the stored hash. `tip_korisnika` defaults to `fizicko_lice` when absent.
#[derive(Debug, Deserialize)]
pub struct UserPayload {
    pub ime: Option<String>,
    pub prezime: Option<String>,
    pub email: Option<String>,
    pub sifra: Option<String>,
    pub telefon: Option<String>,
    pub adresa: Option<String>,
    pub tip_korisnika: Option<String>,
    pub naziv_firme: Option<String>,
    pub pdv_broj: Option<String>,
}

/// GET /korisnici
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<User>>> {
    let users = UserRepository::new(state.shop_pool()).get_all().await?;
    Ok(Json(users))
}

/// GET /korisnici/{id}
pub async fn show(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<User>> {
    UserRepository::new(state.shop_pool())
        .get_by_id(UserId::new(id))
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Korisnik nije pronađen".to_owned()))
}

/// POST /korisnici
///
/// Registration. The password is hashed before it ever reaches the store
/// and the response never echoes it back.
pub async fn create(
    State(state): State<AppState>,
    Json(payload): Json<UserPayload>,
) -> Result<(StatusCode, Json<User>)> {
    let first_name = require_str(payload.ime, "ime")?;
    let last_name = require_str(payload.prezime, "prezime")?;
    let email = require_str(payload.email, "email")?;
    let password = require_str(payload.sifra, "sifra")?;
    let phone = require_str(payload.telefon, "telefon")?;
    let address = require_str(payload.adresa, "adresa")?;
    let kind = parse_token_or_default(payload.tip_korisnika, "tip_korisnika")?;

    let auth = AuthService::new(state.shop_pool(), state.token_signer());
    let user = auth
        .register(&Registration {
            first_name: &first_name,
            last_name: &last_name,
            email: &email,
            password: &password,
            phone: &phone,
            address: &address,
            kind,
            company_name: payload.naziv_firme.as_deref(),
            tax_id: payload.pdv_broj.as_deref(),
        })
        .await?;

    tracing::info!(user_id = %user.id, "account registered");

    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /korisnici/{id}
///
/// Replaces the profile fields wholesale. Requires a token.
pub async fn update(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<UserPayload>,
) -> Result<Json<Updated>> {
    let first_name = require_str(payload.ime, "ime")?;
    let last_name = require_str(payload.prezime, "prezime")?;
    let email = require_str(payload.email, "email")?;
    let phone = require_str(payload.telefon, "telefon")?;
    let address = require_str(payload.adresa, "adresa")?;
    let kind = parse_token_or_default(payload.tip_korisnika, "tip_korisnika")?;

    UserRepository::new(state.shop_pool())
        .update_by_id(
            UserId::new(id),
            &UserUpdate {
                first_name: &first_name,
                last_name: &last_name,
                email: &email,
                phone: &phone,
                address: &address,
                kind,
                company_name: payload.naziv_firme.as_deref(),
                tax_id: payload.pdv_broj.as_deref(),
            },
        )
        .await?;

    Ok(Json(Updated { izmijenjeno: 1 }))
}

/// DELETE /korisnici/{id}
pub async fn destroy(
    RequireAuth(_claims): RequireAuth,
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Deleted>> {
    UserRepository::new(state.shop_pool())
        .delete_by_id(UserId::new(id))
        .await?;

    Ok(Json(Deleted { obrisano: 1 }))
}
