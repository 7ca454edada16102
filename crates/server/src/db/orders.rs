//! Order repository for the `narudzbe` table.
//!
//! Stores order headers only. Line items are separate rows in
//! `stavke_narudzbe`, created by their own requests; nothing here enforces
//! that an order has items.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use zidar_core::{DeliveryType, OrderId, OrderStatus, PaymentMethod, UserId};

use super::RepositoryError;
use crate::models::Order;

/// Insert/update payload for `narudzbe`.
#[derive(Debug)]
pub struct OrderInput<'a> {
    pub user_id: UserId,
    pub ordered_at: DateTime<Utc>,
    pub total: f64,
    pub status: OrderStatus,
    pub payment_method: PaymentMethod,
    pub delivery_type: DeliveryType,
    pub delivery_address: &'a str,
}

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: i64,
    korisnik_id: i64,
    datum_narudzbe: DateTime<Utc>,
    ukupna_cijena: f64,
    status: String,
    nacin_placanja: String,
    tip_dostave: String,
    adresa_dostave: String,
}

impl TryFrom<OrderRow> for Order {
    type Error = RepositoryError;

    fn try_from(r: OrderRow) -> Result<Self, Self::Error> {
        let status = r.status.parse::<OrderStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;
        let payment_method = r.nacin_placanja.parse::<PaymentMethod>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid nacin_placanja in database: {e}"))
        })?;
        let delivery_type = r.tip_dostave.parse::<DeliveryType>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid tip_dostave in database: {e}"))
        })?;

        Ok(Self {
            id: OrderId::new(r.id),
            user_id: UserId::new(r.korisnik_id),
            ordered_at: r.datum_narudzbe,
            total: r.ukupna_cijena,
            status,
            payment_method,
            delivery_type,
            delivery_address: r.adresa_dostave,
        })
    }
}

const ORDER_COLUMNS: &str = "id, korisnik_id, datum_narudzbe, ukupna_cijena, status, \
                             nacin_placanja, tip_dostave, adresa_dostave";

/// Repository for order database operations.
pub struct OrderRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored enum token is invalid.
    pub async fn get_all(&self) -> Result<Vec<Order>, RepositoryError> {
        let rows = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM narudzbe ORDER BY id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Order::try_from).collect()
    }

    /// Get an order by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored enum token is invalid.
    pub async fn get_by_id(&self, id: OrderId) -> Result<Option<Order>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM narudzbe WHERE id = ?"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Order::try_from).transpose()
    }

    /// Create a new order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, order: &OrderInput<'_>) -> Result<Order, RepositoryError> {
        let row = sqlx::query_as::<_, OrderRow>(&format!(
            "INSERT INTO narudzbe \
             (korisnik_id, datum_narudzbe, ukupna_cijena, status, nacin_placanja, tip_dostave, adresa_dostave) \
             VALUES (?, ?, ?, ?, ?, ?, ?) \
             RETURNING {ORDER_COLUMNS}"
        ))
        .bind(order.user_id.as_i64())
        .bind(order.ordered_at)
        .bind(order.total)
        .bind(order.status.as_str())
        .bind(order.payment_method.as_str())
        .bind(order.delivery_type.as_str())
        .bind(order.delivery_address)
        .fetch_one(self.pool)
        .await?;

        Order::try_from(row)
    }

    /// Replace an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_by_id(
        &self,
        id: OrderId,
        order: &OrderInput<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE narudzbe \
             SET korisnik_id = ?, datum_narudzbe = ?, ukupna_cijena = ?, status = ?, \
                 nacin_placanja = ?, tip_dostave = ?, adresa_dostave = ? \
             WHERE id = ?",
        )
        .bind(order.user_id.as_i64())
        .bind(order.ordered_at)
        .bind(order.total)
        .bind(order.status.as_str())
        .bind(order.payment_method.as_str())
        .bind(order.delivery_type.as_str())
        .bind(order.delivery_address)
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an order by ID.
    ///
    /// Line items and transactions referencing the order are left in place,
    /// matching how the store has always behaved.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_id(&self, id: OrderId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM narudzbe WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
