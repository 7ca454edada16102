//! Authentication service.
//!
//! Password login against `korisnici` plus issuance of the signed login
//! token. Registration also lives here so password hashing stays in one
//! place.

mod error;
pub mod token;

pub use error::AuthError;
pub use token::{TokenError, TokenSigner};

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use chrono::Utc;
use sqlx::SqlitePool;

use zidar_core::{AccountKind, TokenClaims};

use crate::db::RepositoryError;
use crate::db::users::{NewUser, UserRepository};
use crate::models::User;

/// Minimum password length.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Registration payload, validated at the route layer for presence.
#[derive(Debug)]
pub struct Registration<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub kind: AccountKind,
    pub company_name: Option<&'a str>,
    pub tax_id: Option<&'a str>,
}

/// Authentication service.
///
/// Handles account registration and email/password login.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
    signer: &'a TokenSigner,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool, signer: &'a TokenSigner) -> Self {
        Self {
            users: UserRepository::new(pool),
            signer,
        }
    }

    /// Register a new account with a hashed password.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::WeakPassword` if the password is too short.
    /// Returns `AuthError::UserAlreadyExists` if the email is already registered.
    pub async fn register(&self, registration: &Registration<'_>) -> Result<User, AuthError> {
        validate_password(registration.password)?;
        let password_hash = hash_password(registration.password)?;

        let user = self
            .users
            .add(&NewUser {
                first_name: registration.first_name,
                last_name: registration.last_name,
                email: registration.email,
                password_hash: &password_hash,
                phone: registration.phone,
                address: registration.address,
                kind: registration.kind,
                company_name: registration.company_name,
                tax_id: registration.tax_id,
                registered_at: Utc::now(),
            })
            .await
            .map_err(|e| match e {
                RepositoryError::Conflict(_) => AuthError::UserAlreadyExists,
                other => AuthError::Repository(other),
            })?;

        Ok(user)
    }

    /// Login with email and password, issuing a signed token on success.
    ///
    /// The same error comes back for an unknown email and a wrong password,
    /// so the endpoint does not leak which accounts exist.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the email/password is wrong.
    pub async fn login(&self, email: &str, password: &str) -> Result<(User, String), AuthError> {
        let (user, password_hash) = self
            .users
            .get_password_hash(email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        let claims = TokenClaims::new(
            user.id,
            user.email.clone(),
            user.kind,
            Utc::now(),
            self.signer.ttl(),
        );
        let token = self.signer.issue(&claims)?;

        Ok((user, token))
    }
}

/// Validate password meets requirements.
fn validate_password(password: &str) -> Result<(), AuthError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword(format!(
            "password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Hash a password using Argon2id.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;
    let argon2 = Argon2::default();

    argon2
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password_too_short() {
        assert!(matches!(
            validate_password("123"),
            Err(AuthError::WeakPassword(_))
        ));
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = hash_password("gradnja123").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("gradnja123", &hash).is_ok());
        assert!(matches!(
            verify_password("pogresna", &hash),
            Err(AuthError::InvalidCredentials)
        ));
    }
}
