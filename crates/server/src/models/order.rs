//! Order domain types: orders, their line items, and payment transactions.

use chrono::{DateTime, Utc};
use serde::Serialize;

use zidar_core::{
    ArticleId, DeliveryType, OrderId, OrderItemId, OrderStatus, PaymentMethod, TransactionId,
    TransactionStatus, UserId,
};

/// An order header.
///
/// The total is the client-computed amount (subtotal + shipping + tax); the
/// server stores it as sent. Line items live in `stavke_narudzbe` and are
/// created by separate requests.
#[derive(Debug, Clone, Serialize)]
pub struct Order {
    /// Unique order ID.
    pub id: OrderId,
    /// Account that placed the order.
    #[serde(rename = "korisnik_id")]
    pub user_id: UserId,
    /// When the order was placed.
    #[serde(rename = "datum_narudzbe")]
    pub ordered_at: DateTime<Utc>,
    /// Grand total in KM, rounded to two decimals.
    #[serde(rename = "ukupna_cijena")]
    pub total: f64,
    /// Fulfilment status.
    pub status: OrderStatus,
    /// How the order is paid.
    #[serde(rename = "nacin_placanja")]
    pub payment_method: PaymentMethod,
    /// Standard or express delivery.
    #[serde(rename = "tip_dostave")]
    pub delivery_type: DeliveryType,
    /// Free-text delivery address.
    #[serde(rename = "adresa_dostave")]
    pub delivery_address: String,
}

/// A single line of an order.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItem {
    /// Unique line item ID.
    pub id: OrderItemId,
    /// Order this line belongs to.
    #[serde(rename = "narudzba_id")]
    pub order_id: OrderId,
    /// Article being bought.
    #[serde(rename = "artikl_id")]
    pub article_id: ArticleId,
    /// Units of the article.
    #[serde(rename = "kolicina")]
    pub quantity: i64,
    /// Unit price in KM at the time of purchase.
    #[serde(rename = "cijena_po_komadu")]
    pub unit_price: f64,
}

/// A payment transaction recorded against an order.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    /// Unique transaction ID.
    pub id: TransactionId,
    /// Order being paid.
    #[serde(rename = "narudzba_id")]
    pub order_id: OrderId,
    /// Amount in KM.
    #[serde(rename = "iznos")]
    pub amount: f64,
    /// Pending, paid, or failed.
    pub status: TransactionStatus,
    /// When the transaction was recorded.
    #[serde(rename = "datum_transakcije")]
    pub occurred_at: DateTime<Utc>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_wire_format() {
        let order = Order {
            id: OrderId::new(11),
            user_id: UserId::new(2),
            ordered_at: Utc::now(),
            total: 234.0,
            status: OrderStatus::Processing,
            payment_method: PaymentMethod::CashOnDelivery,
            delivery_type: DeliveryType::Standard,
            delivery_address: "Titova 1, Zenica".to_string(),
        };
        let json = serde_json::to_value(order).unwrap();
        assert_eq!(json["korisnik_id"], 2);
        assert_eq!(json["ukupna_cijena"], 234.0);
        assert_eq!(json["status"], "u_obradi");
        assert_eq!(json["nacin_placanja"], "pouzece");
        assert_eq!(json["tip_dostave"], "standardna");
    }

    #[test]
    fn test_transaction_wire_format() {
        let tx = Transaction {
            id: TransactionId::new(5),
            order_id: OrderId::new(11),
            amount: 234.0,
            status: TransactionStatus::Pending,
            occurred_at: Utc::now(),
        };
        let json = serde_json::to_value(tx).unwrap();
        assert_eq!(json["narudzba_id"], 11);
        assert_eq!(json["status"], "na_cekanju");
        assert!(json["datum_transakcije"].is_string());
    }
}
