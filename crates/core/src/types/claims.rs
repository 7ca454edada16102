//! Identity-token claims.
//!
//! The login endpoint signs these claims into a compact three-segment token;
//! the client decodes the payload segment locally and treats it as the user's
//! profile. Shared here so both sides agree on the payload keys.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::id::UserId;
use super::status::AccountKind;

/// Claims embedded in the signed identity token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// The authenticated user's id.
    pub id: UserId,
    /// The authenticated user's email.
    pub email: String,
    /// Account kind, used by the UI for role-dependent rendering.
    pub uloga: AccountKind,
    /// Issued-at, unix seconds.
    pub iat: i64,
    /// Expiry, unix seconds.
    pub exp: i64,
}

impl TokenClaims {
    /// Build claims issued at `now`, valid for `ttl`.
    #[must_use]
    pub fn new(
        id: UserId,
        email: String,
        uloga: AccountKind,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        Self {
            id,
            email,
            uloga,
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    /// Whether the token has expired as of `now`.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry_window() {
        let now = Utc::now();
        let claims = TokenClaims::new(
            UserId::new(1),
            "kupac@example.com".to_owned(),
            AccountKind::Individual,
            now,
            Duration::hours(1),
        );

        assert!(!claims.is_expired(now));
        assert!(!claims.is_expired(now + Duration::minutes(59)));
        assert!(claims.is_expired(now + Duration::hours(1)));
        assert!(claims.is_expired(now + Duration::hours(2)));
    }

    #[test]
    fn test_wire_keys() {
        let claims = TokenClaims::new(
            UserId::new(3),
            "firma@example.com".to_owned(),
            AccountKind::Business,
            Utc::now(),
            Duration::hours(1),
        );

        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["id"], 3);
        assert_eq!(json["uloga"], "pravno_lice");
        assert!(json.get("exp").is_some());
    }
}
