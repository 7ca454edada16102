//! Transaction repository for the `transakcije` table.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use zidar_core::{OrderId, TransactionId, TransactionStatus};

use super::RepositoryError;
use crate::models::Transaction;

/// Insert/update payload for `transakcije`.
#[derive(Debug)]
pub struct TransactionInput {
    pub order_id: OrderId,
    pub amount: f64,
    pub status: TransactionStatus,
    pub occurred_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    narudzba_id: i64,
    iznos: f64,
    status: String,
    datum_transakcije: DateTime<Utc>,
}

impl TryFrom<TransactionRow> for Transaction {
    type Error = RepositoryError;

    fn try_from(r: TransactionRow) -> Result<Self, Self::Error> {
        let status = r.status.parse::<TransactionStatus>().map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Self {
            id: TransactionId::new(r.id),
            order_id: OrderId::new(r.narudzba_id),
            amount: r.iznos,
            status,
            occurred_at: r.datum_transakcije,
        })
    }
}

const TRANSACTION_COLUMNS: &str = "id, narudzba_id, iznos, status, datum_transakcije";

/// Repository for transaction database operations.
pub struct TransactionRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TransactionRepository<'a> {
    /// Create a new transaction repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored status is invalid.
    pub async fn get_all(&self) -> Result<Vec<Transaction>, RepositoryError> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transakcije ORDER BY id DESC"
        ))
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Transaction::try_from).collect()
    }

    /// Get a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored status is invalid.
    pub async fn get_by_id(
        &self,
        id: TransactionId,
    ) -> Result<Option<Transaction>, RepositoryError> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "SELECT {TRANSACTION_COLUMNS} FROM transakcije WHERE id = ?"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        row.map(Transaction::try_from).transpose()
    }

    /// Create a new transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, tx: &TransactionInput) -> Result<Transaction, RepositoryError> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "INSERT INTO transakcije (narudzba_id, iznos, status, datum_transakcije) \
             VALUES (?, ?, ?, ?) \
             RETURNING {TRANSACTION_COLUMNS}"
        ))
        .bind(tx.order_id.as_i64())
        .bind(tx.amount)
        .bind(tx.status.as_str())
        .bind(tx.occurred_at)
        .fetch_one(self.pool)
        .await?;

        Transaction::try_from(row)
    }

    /// Replace a transaction.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_by_id(
        &self,
        id: TransactionId,
        tx: &TransactionInput,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE transakcije \
             SET narudzba_id = ?, iznos = ?, status = ?, datum_transakcije = ? \
             WHERE id = ?",
        )
        .bind(tx.order_id.as_i64())
        .bind(tx.amount)
        .bind(tx.status.as_str())
        .bind(tx.occurred_at)
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a transaction by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_id(&self, id: TransactionId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM transakcije WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
