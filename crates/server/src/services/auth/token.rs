//! Signed login tokens.
//!
//! A token is three base64url segments joined by dots: a fixed header, the
//! JSON claims, and an HMAC-SHA256 signature over the first two segments.
//! The server is the only party holding the secret; the frontend decodes the
//! claims segment without verifying and sends the whole token back as a
//! bearer credential.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

use zidar_core::TokenClaims;

/// Fixed header segment content.
const HEADER: &str = r#"{"alg":"HS256","typ":"JWT"}"#;

/// Errors from signing or verifying a token.
#[derive(Debug, Error)]
pub enum TokenError {
    /// Token does not have the three-segment shape or is not valid base64url.
    #[error("malformed token")]
    Malformed,

    /// Signature does not match the claims.
    #[error("signature mismatch")]
    InvalidSignature,

    /// Claims are past their expiry.
    #[error("token expired")]
    Expired,

    /// Signing key was rejected by the MAC.
    #[error("invalid signing key")]
    InvalidKey,

    /// Claims could not be serialized or deserialized.
    #[error("claims serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Signs and verifies login tokens with a shared HMAC secret.
pub struct TokenSigner {
    secret: SecretString,
    ttl: chrono::Duration,
}

impl TokenSigner {
    /// Create a signer from the configured secret and token lifetime.
    #[must_use]
    pub const fn new(secret: SecretString, ttl: chrono::Duration) -> Self {
        Self { secret, ttl }
    }

    /// How long issued tokens stay valid.
    #[must_use]
    pub const fn ttl(&self) -> chrono::Duration {
        self.ttl
    }

    /// Sign claims into a compact token.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Serialization` if the claims cannot be encoded,
    /// `TokenError::InvalidKey` if the secret is rejected by the MAC.
    pub fn issue(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        let header = URL_SAFE_NO_PAD.encode(HEADER);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(claims)?);
        let message = format!("{header}.{payload}");
        let signature = self.sign(&message)?;
        Ok(format!("{message}.{signature}"))
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Malformed` for anything that is not three
    /// base64url segments, `TokenError::InvalidSignature` on signature
    /// mismatch, `TokenError::Expired` for a stale token.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let mut parts = token.split('.');
        let (Some(header), Some(payload), Some(signature), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(TokenError::Malformed);
        };

        let message = format!("{header}.{payload}");
        let expected = self.sign(&message)?;
        if !constant_time_compare(&expected, signature) {
            return Err(TokenError::InvalidSignature);
        }

        let payload_bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        let claims: TokenClaims = serde_json::from_slice(&payload_bytes)?;

        if claims.is_expired(Utc::now()) {
            return Err(TokenError::Expired);
        }

        Ok(claims)
    }

    fn sign(&self, message: &str) -> Result<String, TokenError> {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|_| TokenError::InvalidKey)?;
        mac.update(message.as_bytes());
        Ok(URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes()))
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Duration;
    use zidar_core::{AccountKind, UserId};

    use super::*;

    fn signer() -> TokenSigner {
        TokenSigner::new(
            SecretString::from("k9#mP2$vL8@nQ5^wR3&tY7*uZ1!xB4%c"),
            Duration::hours(1),
        )
    }

    fn claims_valid_for(ttl: Duration) -> TokenClaims {
        TokenClaims::new(
            UserId::new(42),
            "kupac@example.ba".to_owned(),
            AccountKind::Individual,
            Utc::now(),
            ttl,
        )
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let signer = signer();
        let claims = claims_valid_for(Duration::hours(1));

        let token = signer.issue(&claims).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let verified = signer.verify(&token).unwrap();
        assert_eq!(verified, claims);
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let signer = signer();
        let token = signer.issue(&claims_valid_for(Duration::hours(1))).unwrap();

        let mut parts = token.split('.');
        let header = parts.next().unwrap();
        let _payload = parts.next().unwrap();
        let signature = parts.next().unwrap();

        let forged = URL_SAFE_NO_PAD
            .encode(r#"{"id":1,"email":"x","uloga":"admin","iat":0,"exp":9999999999}"#);
        let tampered = format!("{header}.{forged}.{signature}");

        assert!(matches!(
            signer.verify(&tampered),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = signer().issue(&claims_valid_for(Duration::hours(1))).unwrap();

        let other = TokenSigner::new(
            SecretString::from("z8!qW3@eR6#tY9$uI2%oP5^aS1&dF4*g"),
            Duration::hours(1),
        );
        assert!(matches!(
            other.verify(&token),
            Err(TokenError::InvalidSignature)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let signer = signer();
        let token = signer.issue(&claims_valid_for(Duration::seconds(-5))).unwrap();

        assert!(matches!(signer.verify(&token), Err(TokenError::Expired)));
    }

    #[test]
    fn test_garbage_rejected_as_malformed() {
        let signer = signer();
        assert!(matches!(signer.verify(""), Err(TokenError::Malformed)));
        assert!(matches!(signer.verify("a.b"), Err(TokenError::Malformed)));
        assert!(matches!(
            signer.verify("a.b.c.d"),
            Err(TokenError::Malformed)
        ));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(constant_time_compare("", ""));
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "helloo"));
    }
}
