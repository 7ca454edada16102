//! Catalog domain types: categories and sellable articles.

use serde::Serialize;

use zidar_core::{ArticleId, CategoryId};

/// An article category (e.g. "Cement i malteri").
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    /// Unique category ID.
    pub id: CategoryId,
    /// Display name.
    #[serde(rename = "naziv")]
    pub name: String,
    /// Longer description shown on the category page.
    #[serde(rename = "opis")]
    pub description: String,
}

/// A sellable article.
///
/// Prices travel as plain `f64` KM amounts; money arithmetic happens in
/// `zidar_core` on `Decimal` values converted from these.
#[derive(Debug, Clone, Serialize)]
pub struct Article {
    /// Unique article ID.
    pub id: ArticleId,
    /// Display name.
    #[serde(rename = "naziv")]
    pub name: String,
    /// Product description.
    #[serde(rename = "opis")]
    pub description: String,
    /// Unit price in KM.
    #[serde(rename = "cijena")]
    pub price: f64,
    /// Units currently on stock.
    #[serde(rename = "kolicina_na_stanju")]
    pub stock: i64,
    /// Category this article belongs to.
    #[serde(rename = "kategorija_id")]
    pub category_id: CategoryId,
    /// Image reference (path or URL), if any.
    #[serde(rename = "slika")]
    pub image: Option<String>,
}
