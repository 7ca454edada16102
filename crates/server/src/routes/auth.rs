//! Login route.
//!
//! Registration lives with the rest of the account routes in
//! [`super::users`]; only the token-issuing endpoint is here.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use zidar_core::{AccountKind, UserId};

use crate::error::Result;
use crate::services::auth::AuthService;
use crate::state::AppState;

use super::require_str;

/// Wire payload for `POST /login`.
#[derive(Debug, Deserialize)]
pub struct LoginPayload {
    pub email: Option<String>,
    pub sifra: Option<String>,
}

/// The slice of the account echoed back on login. The storefront keeps this
/// next to the token to label the session without decoding the claims.
#[derive(Debug, Serialize)]
pub struct LoginUser {
    pub id: UserId,
    pub username: String,
    pub uloga: AccountKind,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// POST /login
///
/// Verifies the password and returns a signed token plus a display slice of
/// the account. Bad credentials are a 401 with a single deliberately vague
/// message, whether the email or the password was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>> {
    let email = require_str(payload.email, "email")?;
    let password = require_str(payload.sifra, "sifra")?;

    let auth = AuthService::new(state.shop_pool(), state.token_signer());
    let (user, token) = auth.login(&email, &password).await?;

    tracing::info!(user_id = %user.id, "user logged in");

    Ok(Json(LoginResponse {
        token,
        user: LoginUser {
            id: user.id,
            username: user.full_name(),
            uloga: user.kind,
        },
    }))
}
