//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ZIDAR_SHOP_DATABASE_URL` - `SQLite` connection string for the shop database
//! - `ZIDAR_EVENTS_DATABASE_URL` - `SQLite` connection string for the events database
//! - `ZIDAR_TOKEN_SECRET` - Login token signing secret (min 32 chars, high entropy)
//!
//! ## Optional
//! - `ZIDAR_HOST` - Bind address (default: 127.0.0.1)
//! - `ZIDAR_PORT` - Listen port (default: 3000)
//! - `ZIDAR_TOKEN_TTL_SECS` - Login token lifetime in seconds (default: 3600)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use chrono::Duration;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_TOKEN_SECRET_LENGTH: usize = 32;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;
const DEFAULT_TOKEN_TTL_SECS: &str = "3600";

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Zidar server configuration.
///
/// `Debug` is safe to derive because `SecretString` redacts itself.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `SQLite` connection string for the shop database
    pub shop_database_url: SecretString,
    /// `SQLite` connection string for the events database
    pub events_database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Login token signing secret
    pub token_secret: SecretString,
    /// How long an issued login token stays valid
    pub token_ttl: Duration,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the token secret fails validation (placeholder detection, entropy
    /// check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let shop_database_url = get_shop_database_url()?;
        let events_database_url = get_required_secret("ZIDAR_EVENTS_DATABASE_URL")?;
        let host = get_env_or_default("ZIDAR_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ZIDAR_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("ZIDAR_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("ZIDAR_PORT".to_string(), e.to_string()))?;
        let token_secret = get_validated_secret("ZIDAR_TOKEN_SECRET")?;
        validate_token_secret(&token_secret, "ZIDAR_TOKEN_SECRET")?;
        let token_ttl = parse_ttl(&get_env_or_default(
            "ZIDAR_TOKEN_TTL_SECS",
            DEFAULT_TOKEN_TTL_SECS,
        ))?;

        Ok(Self {
            shop_database_url,
            events_database_url,
            host,
            port,
            token_secret,
            token_ttl,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get a required environment variable as a secret.
fn get_required_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    Ok(SecretString::from(value))
}

/// Get the shop database URL with fallback to generic `DATABASE_URL`.
fn get_shop_database_url() -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var("ZIDAR_SHOP_DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(
        "ZIDAR_SHOP_DATABASE_URL".to_string(),
    ))
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse the token TTL from its raw seconds value.
fn parse_ttl(raw: &str) -> Result<Duration, ConfigError> {
    let secs = raw.parse::<i64>().map_err(|e| {
        ConfigError::InvalidEnvVar("ZIDAR_TOKEN_TTL_SECS".to_string(), e.to_string())
    })?;
    if secs <= 0 {
        return Err(ConfigError::InvalidEnvVar(
            "ZIDAR_TOKEN_TTL_SECS".to_string(),
            "must be a positive number of seconds".to_string(),
        ));
    }
    Ok(Duration::seconds(secs))
}

/// Validate that the token secret meets minimum length requirements.
fn validate_token_secret(secret: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = secret.expose_secret();
    if value.len() < MIN_TOKEN_SECRET_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_TOKEN_SECRET_LENGTH,
                value.len()
            ),
        ));
    }
    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    // Check blocklist
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    // Check entropy (real secrets like API keys have high entropy)
    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}

/// Load and validate a secret from environment.
fn get_validated_secret(key: &str) -> Result<SecretString, ConfigError> {
    let value = get_required_env(key)?;
    validate_secret_strength(&value, key)?;
    Ok(SecretString::from(value))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_shannon_entropy_empty() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_single_char() {
        // All same character = 0 entropy
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_shannon_entropy_high() {
        // Random-looking string should have high entropy
        let entropy = shannon_entropy("aB3$xY9!mK2@nL5#");
        assert!(entropy > 3.3);
    }

    #[test]
    fn test_validate_secret_strength_placeholder() {
        let result = validate_secret_strength("your-token-key-here", "TEST_VAR");
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InsecureSecret(_, _)));
    }

    #[test]
    fn test_validate_secret_strength_low_entropy() {
        let result = validate_secret_strength("aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "TEST_VAR");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_secret_strength_valid() {
        // High-entropy random string
        let result = validate_secret_strength("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6", "TEST_VAR");
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_token_secret_too_short() {
        let secret = SecretString::from("short");
        let result = validate_token_secret(&secret, "TEST_TOKEN");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_token_secret_valid_length() {
        let secret = SecretString::from("a".repeat(32));
        let result = validate_token_secret(&secret, "TEST_TOKEN");
        assert!(result.is_ok());
    }

    #[test]
    fn test_parse_ttl_default() {
        let ttl = parse_ttl(DEFAULT_TOKEN_TTL_SECS).unwrap();
        assert_eq!(ttl, Duration::hours(1));
    }

    #[test]
    fn test_parse_ttl_rejects_zero_and_garbage() {
        assert!(parse_ttl("0").is_err());
        assert!(parse_ttl("-60").is_err());
        assert!(parse_ttl("soon").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            shop_database_url: SecretString::from("sqlite://zidar_shop.db"),
            events_database_url: SecretString::from("sqlite://zidar_events.db"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            token_secret: SecretString::from("x".repeat(32)),
            token_ttl: Duration::hours(1),
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
