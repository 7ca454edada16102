//! Category repository for the `kategorije` table.

use sqlx::SqlitePool;

use zidar_core::CategoryId;

use super::RepositoryError;
use crate::models::Category;

/// Insert/update payload for `kategorije`.
#[derive(Debug)]
pub struct CategoryInput<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

#[derive(sqlx::FromRow)]
struct CategoryRow {
    id: i64,
    naziv: String,
    opis: String,
}

impl From<CategoryRow> for Category {
    fn from(r: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(r.id),
            name: r.naziv,
            description: r.opis,
        }
    }
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all categories.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(&self) -> Result<Vec<Category>, RepositoryError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, naziv, opis FROM kategorije ORDER BY id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Category::from).collect())
    }

    /// Get a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        let row =
            sqlx::query_as::<_, CategoryRow>("SELECT id, naziv, opis FROM kategorije WHERE id = ?")
                .bind(id.as_i64())
                .fetch_optional(self.pool)
                .await?;

        Ok(row.map(Category::from))
    }

    /// Create a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, category: &CategoryInput<'_>) -> Result<Category, RepositoryError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO kategorije (naziv, opis) VALUES (?, ?) RETURNING id, naziv, opis",
        )
        .bind(category.name)
        .bind(category.description)
        .fetch_one(self.pool)
        .await?;

        Ok(Category::from(row))
    }

    /// Replace a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_by_id(
        &self,
        id: CategoryId,
        category: &CategoryInput<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query("UPDATE kategorije SET naziv = ?, opis = ? WHERE id = ?")
            .bind(category.name)
            .bind(category.description)
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_id(&self, id: CategoryId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM kategorije WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
