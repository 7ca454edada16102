//! Order line item repository for the `stavke_narudzbe` table.

use sqlx::SqlitePool;

use zidar_core::{ArticleId, OrderId, OrderItemId};

use super::RepositoryError;
use crate::models::OrderItem;

/// Insert/update payload for `stavke_narudzbe`.
#[derive(Debug)]
pub struct OrderItemInput {
    pub order_id: OrderId,
    pub article_id: ArticleId,
    pub quantity: i64,
    pub unit_price: f64,
}

#[derive(sqlx::FromRow)]
struct OrderItemRow {
    id: i64,
    narudzba_id: i64,
    artikl_id: i64,
    kolicina: i64,
    cijena_po_komadu: f64,
}

impl From<OrderItemRow> for OrderItem {
    fn from(r: OrderItemRow) -> Self {
        Self {
            id: OrderItemId::new(r.id),
            order_id: OrderId::new(r.narudzba_id),
            article_id: ArticleId::new(r.artikl_id),
            quantity: r.kolicina,
            unit_price: r.cijena_po_komadu,
        }
    }
}

const ITEM_COLUMNS: &str = "id, narudzba_id, artikl_id, kolicina, cijena_po_komadu";

/// Repository for order line item database operations.
pub struct OrderItemRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> OrderItemRepository<'a> {
    /// Create a new order item repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all line items, optionally narrowed to one order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self, order: Option<OrderId>) -> Result<Vec<OrderItem>, RepositoryError> {
        let rows = match order {
            Some(order_id) => {
                sqlx::query_as::<_, OrderItemRow>(&format!(
                    "SELECT {ITEM_COLUMNS} FROM stavke_narudzbe WHERE narudzba_id = ? ORDER BY id ASC"
                ))
                .bind(order_id.as_i64())
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, OrderItemRow>(&format!(
                    "SELECT {ITEM_COLUMNS} FROM stavke_narudzbe ORDER BY id ASC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(OrderItem::from).collect())
    }

    /// Get a line item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: OrderItemId) -> Result<Option<OrderItem>, RepositoryError> {
        let row = sqlx::query_as::<_, OrderItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM stavke_narudzbe WHERE id = ?"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(OrderItem::from))
    }

    /// Create a new line item.
    ///
    /// The referenced order is not re-checked here; a line item for a missing
    /// order fails on the foreign key.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, item: &OrderItemInput) -> Result<OrderItem, RepositoryError> {
        let row = sqlx::query_as::<_, OrderItemRow>(&format!(
            "INSERT INTO stavke_narudzbe (narudzba_id, artikl_id, kolicina, cijena_po_komadu) \
             VALUES (?, ?, ?, ?) \
             RETURNING {ITEM_COLUMNS}"
        ))
        .bind(item.order_id.as_i64())
        .bind(item.article_id.as_i64())
        .bind(item.quantity)
        .bind(item.unit_price)
        .fetch_one(self.pool)
        .await?;

        Ok(OrderItem::from(row))
    }

    /// Replace a line item.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_by_id(
        &self,
        id: OrderItemId,
        item: &OrderItemInput,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE stavke_narudzbe \
             SET narudzba_id = ?, artikl_id = ?, kolicina = ?, cijena_po_komadu = ? \
             WHERE id = ?",
        )
        .bind(item.order_id.as_i64())
        .bind(item.article_id.as_i64())
        .bind(item.quantity)
        .bind(item.unit_price)
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a line item by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_id(&self, id: OrderItemId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM stavke_narudzbe WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
