//! Client-side cart state.
//!
//! The cart is the shopper's in-progress selection, held in memory and
//! mirrored into a [`CartStore`] blob after every mutation. It knows
//! nothing about the server until checkout; prices and stock are whatever
//! the article snapshot said when the entry was added.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use zidar_core::{ArticleId, DeliveryType, OrderTotals, decimal_from_price, order_totals};

use crate::api::Article;
use crate::store::CartStore;

/// One selected article.
///
/// Name, price and image are denormalized from the article at selection
/// time and never refreshed; checkout sends the captured price as the
/// line's unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartEntry {
    pub id: ArticleId,
    pub name: String,
    pub price: f64,
    pub image: Option<String>,
    pub quantity: u32,
}

/// Cart mutation errors. [`CartError::user_message`] is the notification
/// text shown to the shopper.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("quantity must be at least 1")]
    InvalidQuantity,
    #[error("requested quantity exceeds available stock ({available})")]
    InsufficientStock { available: i64 },
}

impl CartError {
    /// Bosnian notification text for this error.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::InvalidQuantity => "Količina mora biti najmanje 1".to_owned(),
            Self::InsufficientStock { available } => {
                format!("Na stanju je samo {available} komada")
            }
        }
    }
}

/// The shopper's cart, persisted through a [`CartStore`].
///
/// Construction reads the persisted blob back; an absent or malformed blob
/// is an empty cart, never an error. Every mutation synchronously rewrites
/// the blob, and emptying the cart removes the stored key entirely instead
/// of leaving `[]` behind.
#[derive(Debug)]
pub struct CartManager<S> {
    store: S,
    entries: Vec<CartEntry>,
}

impl<S: CartStore> CartManager<S> {
    /// Load the cart from the store.
    pub fn load(store: S) -> Self {
        let entries = store
            .get()
            .and_then(|blob| serde_json::from_str(&blob).ok())
            .unwrap_or_default();
        Self { store, entries }
    }

    /// Add `quantity` of `article`, merging with an existing entry.
    ///
    /// The merged quantity is checked against the article's last-known
    /// stock, so repeated adds behave exactly like one combined add.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::InvalidQuantity`] for a zero quantity and
    /// [`CartError::InsufficientStock`] when the merged quantity would
    /// exceed the snapshot's stock.
    pub fn add(&mut self, article: &Article, quantity: u32) -> Result<(), CartError> {
        if quantity == 0 {
            return Err(CartError::InvalidQuantity);
        }

        let current = self
            .entries
            .iter()
            .find(|entry| entry.id == article.id)
            .map_or(0, |entry| entry.quantity);
        let merged = current.saturating_add(quantity);
        if i64::from(merged) > article.stock {
            return Err(CartError::InsufficientStock {
                available: article.stock,
            });
        }

        if let Some(entry) = self.entries.iter_mut().find(|entry| entry.id == article.id) {
            entry.quantity = merged;
        } else {
            self.entries.push(CartEntry {
                id: article.id,
                name: article.name.clone(),
                price: article.price,
                image: article.image.clone(),
                quantity,
            });
        }
        self.persist();
        Ok(())
    }

    /// Replace an entry's quantity. A zero quantity is ignored; removal is
    /// the only way to empty a line.
    pub fn update_quantity(&mut self, article_id: ArticleId, quantity: u32) {
        if quantity == 0 {
            return;
        }
        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == article_id)
        {
            entry.quantity = quantity;
            self.persist();
        }
    }

    /// Remove an entry.
    pub fn remove(&mut self, article_id: ArticleId) {
        self.entries.retain(|entry| entry.id != article_id);
        self.persist();
    }

    /// Empty the cart and drop the persisted blob.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.persist();
    }

    /// Current entries, in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Whether the cart has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Totals for the current contents under the chosen delivery type.
    #[must_use]
    pub fn totals(&self, delivery: DeliveryType) -> OrderTotals {
        order_totals(
            self.entries
                .iter()
                .map(|entry| (decimal_from_price(entry.price), entry.quantity)),
            delivery,
        )
    }

    /// The backing store.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // An empty cart removes the key instead of storing "[]".
    fn persist(&mut self) {
        if self.entries.is_empty() {
            self.store.remove();
            return;
        }
        match serde_json::to_string(&self.entries) {
            Ok(blob) => self.store.set(blob),
            Err(error) => tracing::error!(%error, "failed to serialize cart"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use core::str::FromStr;

    use rust_decimal::Decimal;

    use zidar_core::CategoryId;

    use crate::store::MemoryCartStore;

    use super::*;

    fn article(id: i64, price: f64, stock: i64) -> Article {
        Article {
            id: ArticleId::new(id),
            name: format!("Artikl {id}"),
            description: "opis".to_owned(),
            price,
            stock,
            category_id: CategoryId::new(1),
            image: None,
        }
    }

    fn cart() -> CartManager<MemoryCartStore> {
        CartManager::load(MemoryCartStore::new())
    }

    #[test]
    fn test_add_merges_existing_entry() {
        let mut split = cart();
        split.add(&article(1, 10.0, 100), 5).unwrap();
        split.add(&article(1, 10.0, 100), 3).unwrap();

        let mut combined = cart();
        combined.add(&article(1, 10.0, 100), 8).unwrap();

        assert_eq!(split.entries(), combined.entries());
        assert_eq!(split.entries().len(), 1);
        assert_eq!(split.entries().first().unwrap().quantity, 8);
    }

    #[test]
    fn test_add_rejects_zero_quantity() {
        let mut cart = cart();
        assert_eq!(
            cart.add(&article(1, 10.0, 100), 0),
            Err(CartError::InvalidQuantity)
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_caps_merged_quantity_at_stock() {
        let mut cart = cart();
        cart.add(&article(1, 10.0, 5), 4).unwrap();
        assert_eq!(
            cart.add(&article(1, 10.0, 5), 2),
            Err(CartError::InsufficientStock { available: 5 })
        );
        // The failed add leaves the existing entry untouched.
        assert_eq!(cart.entries().first().unwrap().quantity, 4);
        cart.add(&article(1, 10.0, 5), 1).unwrap();
        assert_eq!(cart.entries().first().unwrap().quantity, 5);
    }

    #[test]
    fn test_update_quantity_zero_is_noop() {
        let mut cart = cart();
        cart.add(&article(1, 10.0, 100), 3).unwrap();

        cart.update_quantity(ArticleId::new(1), 0);
        assert_eq!(cart.entries().first().unwrap().quantity, 3);

        cart.update_quantity(ArticleId::new(1), 7);
        assert_eq!(cart.entries().first().unwrap().quantity, 7);
    }

    #[test]
    fn test_update_quantity_unknown_article_is_noop() {
        let mut cart = cart();
        cart.add(&article(1, 10.0, 100), 3).unwrap();
        cart.update_quantity(ArticleId::new(99), 5);
        assert_eq!(cart.entries().len(), 1);
        assert_eq!(cart.entries().first().unwrap().quantity, 3);
    }

    #[test]
    fn test_removing_last_entry_drops_persisted_key() {
        let mut cart = cart();
        cart.add(&article(1, 10.0, 100), 2).unwrap();
        assert!(cart.store().get().is_some());

        cart.remove(ArticleId::new(1));
        assert!(cart.is_empty());
        // The key is gone, not set to "[]".
        assert!(cart.store().get().is_none());
    }

    #[test]
    fn test_removing_one_of_two_keeps_blob() {
        let mut cart = cart();
        cart.add(&article(1, 10.0, 100), 2).unwrap();
        cart.add(&article(2, 4.5, 100), 1).unwrap();

        cart.remove(ArticleId::new(1));
        assert_eq!(cart.entries().len(), 1);

        let blob = cart.store().get().unwrap();
        let parsed: Vec<CartEntry> = serde_json::from_str(&blob).unwrap();
        assert_eq!(parsed, cart.entries());
    }

    #[test]
    fn test_malformed_blob_loads_as_empty() {
        let cart = CartManager::load(MemoryCartStore::with_blob("ovo nije json"));
        assert!(cart.is_empty());

        let cart = CartManager::load(MemoryCartStore::with_blob(r#"{"id": 1}"#));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_mutations_persist_and_reload() {
        let mut cart = cart();
        cart.add(&article(1, 19.99, 100), 2).unwrap();
        cart.add(&article(2, 5.0, 100), 1).unwrap();
        cart.update_quantity(ArticleId::new(2), 4);

        let blob = cart.store().get().unwrap();
        let reloaded = CartManager::load(MemoryCartStore::with_blob(blob));
        assert_eq!(reloaded.entries(), cart.entries());
    }

    #[test]
    fn test_blob_uses_plain_field_names() {
        let mut cart = cart();
        cart.add(&article(7, 50.0, 10), 2).unwrap();

        let blob = cart.store().get().unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&blob).unwrap();
        let entry = parsed.get(0).unwrap();
        assert_eq!(entry["id"], 7);
        assert_eq!(entry["quantity"], 2);
        assert!(entry.get("name").is_some());
        assert!(entry.get("price").is_some());
        assert!(entry.get("image").is_some());
    }

    #[test]
    fn test_totals_below_free_shipping() {
        let mut cart = cart();
        cart.add(&article(7, 50.0, 10), 2).unwrap();

        let totals = cart.totals(DeliveryType::Standard);
        assert_eq!(totals.subtotal, Decimal::from_str("100").unwrap());
        assert_eq!(totals.shipping, Decimal::from_str("10").unwrap());
        assert_eq!(totals.tax, Decimal::from_str("17").unwrap());
        assert_eq!(
            totals.total_rounded(),
            Decimal::from_str("127.00").unwrap()
        );
    }

    #[test]
    fn test_totals_at_free_shipping_threshold() {
        let mut cart = cart();
        cart.add(&article(7, 100.0, 10), 2).unwrap();

        let totals = cart.totals(DeliveryType::Standard);
        assert_eq!(totals.subtotal, Decimal::from_str("200").unwrap());
        assert_eq!(totals.shipping, Decimal::ZERO);
        assert_eq!(totals.tax, Decimal::from_str("34").unwrap());
        assert_eq!(
            totals.total_rounded(),
            Decimal::from_str("234.00").unwrap()
        );
    }
}
