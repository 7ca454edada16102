//! Unified error handling for the REST API.
//!
//! Provides a unified `AppError` type that maps every failure onto the wire
//! contract the frontend expects: an HTTP status plus a JSON body of the
//! shape `{"greska": "<poruka>"}`. All route handlers return
//! `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::auth::AuthError;

/// JSON error body. The key is `greska` on every error response, success
/// responses never carry it.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub greska: String,
}

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication operation failed.
    #[error("Auth error: {0}")]
    Auth(#[from] AuthError),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Caller is not authenticated.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Bad request from client.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if status_for(&self) == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "Request error");
        }

        let body = ErrorBody {
            greska: message_for(&self),
        };

        (status_for(&self), Json(body)).into_response()
    }
}

/// HTTP status for an error.
///
/// A missing row is always 404, never 500: `updateById`/`deleteById` report
/// zero affected rows as `RepositoryError::NotFound` and it surfaces here.
fn status_for(error: &AppError) -> StatusCode {
    match error {
        AppError::Database(err) => match err {
            RepositoryError::NotFound => StatusCode::NOT_FOUND,
            RepositoryError::Conflict(_) => StatusCode::CONFLICT,
            RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
        AppError::Auth(err) => match err {
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::UserAlreadyExists => StatusCode::CONFLICT,
            AuthError::WeakPassword(_) => StatusCode::BAD_REQUEST,
            AuthError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
            AuthError::Repository(RepositoryError::Conflict(_)) => StatusCode::CONFLICT,
            AuthError::Repository(_) | AuthError::Token(_) | AuthError::PasswordHash => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        },
        AppError::NotFound(_) => StatusCode::NOT_FOUND,
        AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
        AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// User-facing Bosnian message. Internal details never leave the process;
/// they go to the log instead.
fn message_for(error: &AppError) -> String {
    match error {
        AppError::Database(err) => match err {
            RepositoryError::NotFound => "Zapis nije pronađen".to_string(),
            RepositoryError::Conflict(_) => "Zapis već postoji".to_string(),
            RepositoryError::Database(_) | RepositoryError::DataCorruption(_) => {
                "Greška na serveru".to_string()
            }
        },
        AppError::Auth(err) => match err {
            AuthError::InvalidCredentials => "Neispravan email ili šifra".to_string(),
            AuthError::UserAlreadyExists => "Korisnik sa ovim emailom već postoji".to_string(),
            AuthError::WeakPassword(_) => {
                "Šifra mora imati najmanje 6 znakova".to_string()
            }
            AuthError::Repository(RepositoryError::NotFound) => "Zapis nije pronađen".to_string(),
            AuthError::Repository(RepositoryError::Conflict(_)) => "Zapis već postoji".to_string(),
            AuthError::Repository(_) | AuthError::Token(_) | AuthError::PasswordHash => {
                "Greška na serveru".to_string()
            }
        },
        AppError::NotFound(msg) | AppError::Unauthorized(msg) | AppError::BadRequest(msg) => {
            msg.clone()
        }
        AppError::Internal(_) => "Greška na serveru".to_string(),
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_missing_row_is_404_not_500() {
        assert_eq!(
            get_status(AppError::Database(RepositoryError::NotFound)),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            get_status(AppError::NotFound("test".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            get_status(AppError::Unauthorized("test".to_string())),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::InvalidCredentials)),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            get_status(AppError::Auth(AuthError::UserAlreadyExists)),
            StatusCode::CONFLICT
        );
        assert_eq!(
            get_status(AppError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let message = message_for(&AppError::Internal("pool timed out".to_string()));
        assert_eq!(message, "Greška na serveru");
        assert!(!message.contains("pool"));
    }

    #[test]
    fn test_bad_request_keeps_field_message() {
        let message = message_for(&AppError::BadRequest(
            "Nedostaje obavezno polje: adresa_dostave".to_string(),
        ));
        assert!(message.contains("adresa_dostave"));
    }
}
