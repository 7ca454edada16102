//! REST client for the Zidar shop API.
//!
//! Thin typed wrapper over the JSON contract in Bosnian field names. The
//! request/response structs here are the stable shapes the cart and
//! checkout code consume; nothing downstream touches raw JSON.

use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::instrument;

use zidar_core::{
    AccountKind, ArticleId, CategoryId, DeliveryType, OrderId, OrderItemId, OrderStatus,
    PaymentMethod, TransactionId, TransactionStatus, UserId,
};

/// Errors talking to the shop API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never completed (connection refused, timeout, bad body).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status. `message` carries the
    /// body's `greska` field when the server sent one.
    #[error("server returned {status}")]
    Server {
        status: StatusCode,
        message: Option<String>,
    },
}

impl ApiError {
    /// The server-provided error message, when there is one.
    #[must_use]
    pub fn server_message(&self) -> Option<&str> {
        match self {
            Self::Server { message, .. } => message.as_deref(),
            Self::Request(_) => None,
        }
    }
}

/// Error body shape every endpoint uses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    greska: String,
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    sifra: &'a str,
}

/// The slice of the account echoed back on login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginUser {
    pub id: UserId,
    pub username: String,
    pub uloga: AccountKind,
}

/// Successful login response.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: LoginUser,
}

/// Catalog article as served by `GET /artikli`.
#[derive(Debug, Clone, Deserialize)]
pub struct Article {
    pub id: ArticleId,
    #[serde(rename = "naziv")]
    pub name: String,
    #[serde(rename = "opis")]
    pub description: String,
    #[serde(rename = "cijena")]
    pub price: f64,
    #[serde(rename = "kolicina_na_stanju")]
    pub stock: i64,
    #[serde(rename = "kategorija_id")]
    pub category_id: CategoryId,
    #[serde(rename = "slika")]
    pub image: Option<String>,
}

/// Order as returned by `POST /narudzbe`.
#[derive(Debug, Clone, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "korisnik_id")]
    pub user_id: UserId,
    #[serde(rename = "datum_narudzbe")]
    pub ordered_at: DateTime<Utc>,
    #[serde(rename = "ukupna_cijena")]
    pub total: f64,
    pub status: OrderStatus,
    #[serde(rename = "nacin_placanja")]
    pub payment_method: PaymentMethod,
    #[serde(rename = "tip_dostave")]
    pub delivery_type: DeliveryType,
    #[serde(rename = "adresa_dostave")]
    pub delivery_address: String,
}

/// Line item as returned by `POST /stavkenarudzbe`.
#[derive(Debug, Clone, Deserialize)]
pub struct OrderItem {
    pub id: OrderItemId,
    #[serde(rename = "narudzba_id")]
    pub order_id: OrderId,
    #[serde(rename = "artikl_id")]
    pub article_id: ArticleId,
    #[serde(rename = "kolicina")]
    pub quantity: i64,
    #[serde(rename = "cijena_po_komadu")]
    pub unit_price: f64,
}

/// Payment record as returned by `POST /transakcije`.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    #[serde(rename = "narudzba_id")]
    pub order_id: OrderId,
    #[serde(rename = "iznos")]
    pub amount: f64,
    pub status: TransactionStatus,
    #[serde(rename = "datum_transakcije")]
    pub occurred_at: DateTime<Utc>,
}

/// Payload for `POST /narudzbe`. Field names are the wire names.
#[derive(Debug, Clone, Serialize)]
pub struct OrderRequest {
    pub korisnik_id: UserId,
    pub datum_narudzbe: DateTime<Utc>,
    pub ukupna_cijena: f64,
    pub status: OrderStatus,
    pub nacin_placanja: PaymentMethod,
    pub tip_dostave: DeliveryType,
    pub adresa_dostave: String,
}

/// Payload for `POST /stavkenarudzbe`.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemRequest {
    pub narudzba_id: OrderId,
    pub artikl_id: ArticleId,
    pub kolicina: i64,
    pub cijena_po_komadu: f64,
}

/// Payload for `POST /transakcije`.
#[derive(Debug, Clone, Serialize)]
pub struct TransactionRequest {
    pub narudzba_id: OrderId,
    pub iznos: f64,
    pub status: TransactionStatus,
    pub datum_transakcije: DateTime<Utc>,
}

// =============================================================================
// ShopApi
// =============================================================================

/// Client for the Zidar REST API.
#[derive(Debug, Clone)]
pub struct ShopApi {
    client: Client,
    base_url: String,
}

impl ShopApi {
    /// Create a client for the API at `base_url`. A trailing slash is
    /// stripped so path building stays uniform.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// POST /login
    ///
    /// # Errors
    ///
    /// Bad credentials surface as `ApiError::Server` with status 401 and
    /// the server's message.
    #[instrument(skip(self, sifra))]
    pub async fn login(&self, email: &str, sifra: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .client
            .post(format!("{}/login", self.base_url))
            .json(&LoginRequest { email, sifra })
            .send()
            .await?;
        decode_response(response).await
    }

    /// GET /artikli, optionally filtered by category.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails or the server rejects it.
    #[instrument(skip(self))]
    pub async fn list_articles(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Article>, ApiError> {
        let mut request = self.client.get(format!("{}/artikli", self.base_url));
        if let Some(category_id) = category {
            request = request.query(&[("kategorija_id", category_id.as_i64())]);
        }
        decode_response(request.send().await?).await
    }

    /// GET /artikli/{id}
    ///
    /// # Errors
    ///
    /// An unknown id surfaces as `ApiError::Server` with status 404.
    #[instrument(skip(self))]
    pub async fn get_article(&self, id: ArticleId) -> Result<Article, ApiError> {
        let response = self
            .client
            .get(format!("{}/artikli/{id}", self.base_url))
            .send()
            .await?;
        decode_response(response).await
    }

    /// POST /narudzbe
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails or the server rejects it.
    #[instrument(skip(self, token, order), fields(user_id = %order.korisnik_id))]
    pub async fn create_order(&self, token: &str, order: &OrderRequest) -> Result<Order, ApiError> {
        let response = self
            .client
            .post(format!("{}/narudzbe", self.base_url))
            .bearer_auth(token)
            .json(order)
            .send()
            .await?;
        decode_response(response).await
    }

    /// POST /stavkenarudzbe
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails or the server rejects it.
    #[instrument(skip(self, token, item), fields(order_id = %item.narudzba_id))]
    pub async fn create_order_item(
        &self,
        token: &str,
        item: &OrderItemRequest,
    ) -> Result<OrderItem, ApiError> {
        let response = self
            .client
            .post(format!("{}/stavkenarudzbe", self.base_url))
            .bearer_auth(token)
            .json(item)
            .send()
            .await?;
        decode_response(response).await
    }

    /// POST /transakcije
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the request fails or the server rejects it.
    #[instrument(skip(self, token, transaction), fields(order_id = %transaction.narudzba_id))]
    pub async fn create_transaction(
        &self,
        token: &str,
        transaction: &TransactionRequest,
    ) -> Result<Transaction, ApiError> {
        let response = self
            .client
            .post(format!("{}/transakcije", self.base_url))
            .bearer_auth(token)
            .json(transaction)
            .send()
            .await?;
        decode_response(response).await
    }
}

/// Decode a JSON success body, or surface the server's `greska` message.
async fn decode_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json().await?);
    }

    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| serde_json::from_str::<ErrorBody>(&body).ok())
        .map(|body| body.greska);
    tracing::debug!(%status, ?message, "api request rejected");
    Err(ApiError::Server { status, message })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_request_wire_shape() {
        let request = OrderRequest {
            korisnik_id: UserId::new(4),
            datum_narudzbe: Utc::now(),
            ukupna_cijena: 234.0,
            status: OrderStatus::Processing,
            nacin_placanja: PaymentMethod::CashOnDelivery,
            tip_dostave: DeliveryType::Standard,
            adresa_dostave: "Zmaja od Bosne 8".to_owned(),
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["korisnik_id"], 4);
        assert_eq!(json["status"], "u_obradi");
        assert_eq!(json["nacin_placanja"], "pouzece");
        assert_eq!(json["tip_dostave"], "standardna");
        assert_eq!(json["adresa_dostave"], "Zmaja od Bosne 8");
    }

    #[test]
    fn test_article_decodes_bosnian_fields() {
        let article: Article = serde_json::from_str(
            r#"{
                "id": 7,
                "naziv": "Cement 25kg",
                "opis": "Portland cement",
                "cijena": 12.5,
                "kolicina_na_stanju": 40,
                "kategorija_id": 2,
                "slika": null
            }"#,
        )
        .unwrap();

        assert_eq!(article.id, ArticleId::new(7));
        assert_eq!(article.name, "Cement 25kg");
        assert!((article.price - 12.5).abs() < f64::EPSILON);
        assert_eq!(article.stock, 40);
        assert!(article.image.is_none());
    }

    #[test]
    fn test_base_url_trailing_slash_stripped() {
        let api = ShopApi::new("http://localhost:3000/");
        assert_eq!(api.base_url, "http://localhost:3000");
    }
}
