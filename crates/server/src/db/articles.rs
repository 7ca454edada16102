//! Article repository for the `artikli` table.

use sqlx::SqlitePool;

use zidar_core::{ArticleId, CategoryId};

use super::RepositoryError;
use crate::models::Article;

/// Insert/update payload for `artikli`.
#[derive(Debug)]
pub struct ArticleInput<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub stock: i64,
    pub category_id: CategoryId,
    pub image: Option<&'a str>,
}

#[derive(sqlx::FromRow)]
struct ArticleRow {
    id: i64,
    naziv: String,
    opis: String,
    cijena: f64,
    kolicina_na_stanju: i64,
    kategorija_id: i64,
    slika: Option<String>,
}

impl From<ArticleRow> for Article {
    fn from(r: ArticleRow) -> Self {
        Self {
            id: ArticleId::new(r.id),
            name: r.naziv,
            description: r.opis,
            price: r.cijena,
            stock: r.kolicina_na_stanju,
            category_id: CategoryId::new(r.kategorija_id),
            image: r.slika,
        }
    }
}

const ARTICLE_COLUMNS: &str = "id, naziv, opis, cijena, kolicina_na_stanju, kategorija_id, slika";

/// Repository for article database operations.
pub struct ArticleRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ArticleRepository<'a> {
    /// Create a new article repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Get all articles, optionally narrowed to one category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_all(
        &self,
        category: Option<CategoryId>,
    ) -> Result<Vec<Article>, RepositoryError> {
        let rows = match category {
            Some(category_id) => {
                sqlx::query_as::<_, ArticleRow>(&format!(
                    "SELECT {ARTICLE_COLUMNS} FROM artikli WHERE kategorija_id = ? ORDER BY id ASC"
                ))
                .bind(category_id.as_i64())
                .fetch_all(self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, ArticleRow>(&format!(
                    "SELECT {ARTICLE_COLUMNS} FROM artikli ORDER BY id ASC"
                ))
                .fetch_all(self.pool)
                .await?
            }
        };

        Ok(rows.into_iter().map(Article::from).collect())
    }

    /// Get an article by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: ArticleId) -> Result<Option<Article>, RepositoryError> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "SELECT {ARTICLE_COLUMNS} FROM artikli WHERE id = ?"
        ))
        .bind(id.as_i64())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Article::from))
    }

    /// Create a new article.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn add(&self, article: &ArticleInput<'_>) -> Result<Article, RepositoryError> {
        let row = sqlx::query_as::<_, ArticleRow>(&format!(
            "INSERT INTO artikli (naziv, opis, cijena, kolicina_na_stanju, kategorija_id, slika) \
             VALUES (?, ?, ?, ?, ?, ?) \
             RETURNING {ARTICLE_COLUMNS}"
        ))
        .bind(article.name)
        .bind(article.description)
        .bind(article.price)
        .bind(article.stock)
        .bind(article.category_id.as_i64())
        .bind(article.image)
        .fetch_one(self.pool)
        .await?;

        Ok(Article::from(row))
    }

    /// Replace an article.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn update_by_id(
        &self,
        id: ArticleId,
        article: &ArticleInput<'_>,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE artikli \
             SET naziv = ?, opis = ?, cijena = ?, kolicina_na_stanju = ?, kategorija_id = ?, slika = ? \
             WHERE id = ?",
        )
        .bind(article.name)
        .bind(article.description)
        .bind(article.price)
        .bind(article.stock)
        .bind(article.category_id.as_i64())
        .bind(article.image)
        .bind(id.as_i64())
        .execute(self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Delete an article by ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no row matched the id.
    /// Returns `RepositoryError::Database` for other database errors.
    pub async fn delete_by_id(&self, id: ArticleId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM artikli WHERE id = ?")
            .bind(id.as_i64())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
