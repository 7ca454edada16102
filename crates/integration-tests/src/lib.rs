//! Integration tests for Zidar.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p zidar-integration-tests
//! ```
//!
//! No external services are required: every test boots the production
//! router on an ephemeral port with fresh in-memory `SQLite` databases.
//!
//! # Test Categories
//!
//! - `server_api` - REST API behavior (statuses, bodies, auth)
//! - `checkout_flow` - The client crate driving a full checkout

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::{IpAddr, Ipv4Addr};

use chrono::Duration;
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::SqlitePool;

use zidar_server::config::ServerConfig;
use zidar_server::db::{self, EVENTS_SCHEMA, SHOP_SCHEMA};
use zidar_server::routes;
use zidar_server::state::AppState;

/// A server instance running the production router against throwaway
/// databases.
///
/// The pools are the same ones the handlers use (in-memory `SQLite` pools
/// are capped at one shared connection), so tests can assert on table
/// contents directly.
pub struct TestServer {
    pub base_url: String,
    pub client: reqwest::Client,
    pub shop_pool: SqlitePool,
    pub events_pool: SqlitePool,
}

impl TestServer {
    /// Boot the full router on an ephemeral port.
    ///
    /// # Panics
    ///
    /// Panics if the databases or the listener cannot be set up.
    pub async fn spawn() -> Self {
        let shop_pool = db::create_pool(&SecretString::from("sqlite::memory:"))
            .await
            .expect("failed to create shop pool");
        let events_pool = db::create_pool(&SecretString::from("sqlite::memory:"))
            .await
            .expect("failed to create events pool");

        db::apply_schema(&shop_pool, SHOP_SCHEMA)
            .await
            .expect("failed to apply shop schema");
        db::apply_schema(&events_pool, EVENTS_SCHEMA)
            .await
            .expect("failed to apply events schema");

        let state = AppState::new(test_config(), shop_pool.clone(), events_pool.clone());
        let app = routes::app(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind test listener");
        let addr = listener.local_addr().expect("listener has no local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("test server crashed");
        });

        Self {
            base_url: format!("http://{addr}"),
            client: reqwest::Client::new(),
            shop_pool,
            events_pool,
        }
    }

    /// Absolute URL for a path like `/artikli`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Register an account through the API, returning its id.
    ///
    /// # Panics
    ///
    /// Panics if the registration request fails.
    pub async fn register_account(&self, email: &str, password: &str) -> i64 {
        let response = self
            .client
            .post(self.url("/korisnici"))
            .json(&json!({
                "ime": "Amar",
                "prezime": "Begić",
                "email": email,
                "sifra": password,
                "telefon": "+387 61 111 222",
                "adresa": "Zmaja od Bosne 8, Sarajevo",
            }))
            .send()
            .await
            .expect("registration request failed");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("registration body not JSON");
        body["id"].as_i64().expect("registration body has no id")
    }

    /// Log in through the API, returning the bearer token.
    ///
    /// # Panics
    ///
    /// Panics if the login request fails.
    pub async fn login_token(&self, email: &str, password: &str) -> String {
        let response = self
            .client
            .post(self.url("/login"))
            .json(&json!({"email": email, "sifra": password}))
            .send()
            .await
            .expect("login request failed");
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("login body not JSON");
        body["token"]
            .as_str()
            .expect("login body has no token")
            .to_owned()
    }

    /// Create one category and one article through the API, returning
    /// `(category_id, article_id)`.
    ///
    /// # Panics
    ///
    /// Panics if either create request fails.
    pub async fn create_catalog(&self, token: &str, price: f64, stock: i64) -> (i64, i64) {
        let response = self
            .client
            .post(self.url("/kategorije"))
            .bearer_auth(token)
            .json(&json!({
                "naziv": "Cement i malteri",
                "opis": "Vezivni materijali",
            }))
            .send()
            .await
            .expect("category create failed");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let category: Value = response.json().await.expect("category body not JSON");
        let category_id = category["id"].as_i64().expect("category has no id");

        let response = self
            .client
            .post(self.url("/artikli"))
            .bearer_auth(token)
            .json(&json!({
                "naziv": "Cement 25kg",
                "opis": "Portland cement CEM II 42.5N",
                "cijena": price,
                "kolicina_na_stanju": stock,
                "kategorija_id": category_id,
            }))
            .send()
            .await
            .expect("article create failed");
        assert_eq!(response.status(), reqwest::StatusCode::CREATED);
        let article: Value = response.json().await.expect("article body not JSON");
        let article_id = article["id"].as_i64().expect("article has no id");

        (category_id, article_id)
    }

    /// Number of rows in a table of the shop database.
    ///
    /// # Panics
    ///
    /// Panics if the query fails.
    pub async fn shop_count(&self, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&self.shop_pool)
            .await
            .expect("count query failed")
    }
}

fn test_config() -> ServerConfig {
    ServerConfig {
        shop_database_url: SecretString::from("sqlite::memory:"),
        events_database_url: SecretString::from("sqlite::memory:"),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        token_secret: SecretString::from("k9#mP2$vL8@nQ5^wR3&tY7*uZ1!xB4%c"),
        token_ttl: Duration::hours(1),
    }
}
