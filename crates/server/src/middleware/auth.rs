//! Authentication extractor for protected routes.
//!
//! Protected handlers take a `RequireAuth` parameter; it reads the
//! `Authorization: Bearer <token>` header and verifies the signature and
//! expiry against the server's token secret. Handlers without the extractor
//! stay open (login, registration, catalog reads, the events API).

use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
    response::{IntoResponse, Response},
};

use zidar_core::TokenClaims;

use crate::error::ErrorBody;
use crate::services::auth::TokenError;
use crate::state::AppState;

/// Extractor that requires a valid login token.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAuth(claims): RequireAuth,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", claims.email)
/// }
/// ```
pub struct RequireAuth(pub TokenClaims);

/// Rejection for requests without a usable token. Always a 401 with the
/// standard `{"greska": ...}` body.
#[derive(Debug)]
pub enum AuthRejection {
    /// No `Authorization: Bearer` header on the request.
    MissingToken,
    /// Token was signed correctly but is past its expiry.
    Expired,
    /// Token is malformed or its signature does not match.
    Invalid,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let greska = match self {
            Self::MissingToken => "Nedostaje token za prijavu",
            Self::Expired => "Token je istekao",
            Self::Invalid => "Neispravan token",
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorBody {
                greska: greska.to_string(),
            }),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or(AuthRejection::MissingToken)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AuthRejection::MissingToken)?;

        let app_state = AppState::from_ref(state);
        let claims = app_state
            .token_signer()
            .verify(token)
            .map_err(|e| match e {
                TokenError::Expired => AuthRejection::Expired,
                _ => AuthRejection::Invalid,
            })?;

        Ok(Self(claims))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_rejections_are_401_with_greska_body() {
        for rejection in [
            AuthRejection::MissingToken,
            AuthRejection::Expired,
            AuthRejection::Invalid,
        ] {
            let response = rejection.into_response();
            assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        }
    }
}
