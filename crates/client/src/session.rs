//! Signed-in shopper identity.
//!
//! A session wraps the bearer token issued at login together with the
//! claims decoded from its payload segment. The client holds no signing
//! key, so the claims are decoded without signature verification; the
//! server re-verifies the full token on every authenticated request, and
//! the decoded copy is only used for display and local expiry checks.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::{DateTime, Utc};
use thiserror::Error;

use zidar_core::{AccountKind, TokenClaims, UserId};

use crate::api::LoginResponse;

/// Errors from decoding a token into a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Token does not have the three-segment shape or is not valid base64url.
    #[error("malformed token")]
    Malformed,

    /// Payload segment is not a valid claims document.
    #[error("claims are not valid JSON: {0}")]
    Claims(#[from] serde_json::Error),
}

/// A signed-in shopper.
#[derive(Debug, Clone)]
pub struct Session {
    token: String,
    username: String,
    claims: TokenClaims,
}

impl Session {
    /// Build a session from a successful login response.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the token in the response cannot be
    /// decoded.
    pub fn from_login(response: &LoginResponse) -> Result<Self, SessionError> {
        let claims = decode_claims(&response.token)?;
        Ok(Self {
            token: response.token.clone(),
            username: response.user.username.clone(),
            claims,
        })
    }

    /// Rebuild a session from a stored token, for example after a page
    /// reload. The display name falls back to the claims email because the
    /// login response is no longer available.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the token cannot be decoded.
    pub fn from_token(token: impl Into<String>) -> Result<Self, SessionError> {
        let token = token.into();
        let claims = decode_claims(&token)?;
        let username = claims.email.clone();
        Ok(Self {
            token,
            username,
            claims,
        })
    }

    /// The raw bearer token, sent back on authenticated requests.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// The signed-in user's id.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.claims.id
    }

    /// The signed-in user's email.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.claims.email
    }

    /// The signed-in user's account kind.
    #[must_use]
    pub const fn kind(&self) -> AccountKind {
        self.claims.uloga
    }

    /// Display name for the navigation header.
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    /// Whether the token's claims are past their expiry at `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.claims.is_expired(now)
    }
}

// Reads the claims segment only; the signature segment is carried along
// untouched for the server to check.
fn decode_claims(token: &str) -> Result<TokenClaims, SessionError> {
    let mut parts = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(SessionError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| SessionError::Malformed)?;
    Ok(serde_json::from_slice(&bytes)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;

    use crate::api::LoginUser;

    use super::*;

    // A token shaped like the server's, with a signature the client never
    // checks.
    fn token_for(claims: &TokenClaims) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims).unwrap());
        let signature = URL_SAFE_NO_PAD.encode("potpis");
        format!("{header}.{payload}.{signature}")
    }

    fn claims_valid_for(ttl: Duration) -> TokenClaims {
        TokenClaims::new(
            UserId::new(7),
            "firma@example.ba".to_owned(),
            AccountKind::Business,
            Utc::now(),
            ttl,
        )
    }

    #[test]
    fn test_from_token_decodes_claims() {
        let claims = claims_valid_for(Duration::hours(1));
        let session = Session::from_token(token_for(&claims)).unwrap();

        assert_eq!(session.user_id(), UserId::new(7));
        assert_eq!(session.email(), "firma@example.ba");
        assert_eq!(session.kind(), AccountKind::Business);
        // Without a login response the display name is the email.
        assert_eq!(session.username(), "firma@example.ba");
        assert!(!session.is_expired(Utc::now()));
    }

    #[test]
    fn test_from_login_uses_response_username() {
        let claims = claims_valid_for(Duration::hours(1));
        let response = LoginResponse {
            token: token_for(&claims),
            user: LoginUser {
                id: UserId::new(7),
                username: "Gradnja d.o.o.".to_owned(),
                uloga: AccountKind::Business,
            },
        };

        let session = Session::from_login(&response).unwrap();
        assert_eq!(session.username(), "Gradnja d.o.o.");
        assert_eq!(session.token(), response.token);
    }

    #[test]
    fn test_expired_claims_detected() {
        let claims = claims_valid_for(Duration::seconds(-5));
        let session = Session::from_token(token_for(&claims)).unwrap();
        assert!(session.is_expired(Utc::now()));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        assert!(matches!(
            Session::from_token(""),
            Err(SessionError::Malformed)
        ));
        assert!(matches!(
            Session::from_token("a.b"),
            Err(SessionError::Malformed)
        ));
        assert!(matches!(
            Session::from_token("a.b.c.d"),
            Err(SessionError::Malformed)
        ));
        assert!(matches!(
            Session::from_token("x.ne!base64.y"),
            Err(SessionError::Malformed)
        ));
    }

    #[test]
    fn test_non_claims_payload_rejected() {
        let payload = URL_SAFE_NO_PAD.encode("nije json");
        assert!(matches!(
            Session::from_token(format!("x.{payload}.y")),
            Err(SessionError::Claims(_))
        ));
    }
}
