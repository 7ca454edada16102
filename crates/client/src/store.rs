//! Persisted cart storage.
//!
//! The cart lives as a single JSON blob under one key in a tab-scoped
//! store. The trait mirrors browser storage: read, replace, or remove the
//! key. Removing the last cart entry removes the key itself rather than
//! leaving an empty list behind.

/// Tab-scoped persisted storage for the cart blob.
pub trait CartStore {
    /// Read the stored blob; `None` when the key is absent.
    fn get(&self) -> Option<String>;

    /// Replace the stored blob.
    fn set(&mut self, blob: String);

    /// Remove the key entirely.
    fn remove(&mut self);
}

/// In-memory store with session-storage semantics: the value lives as long
/// as the process (the tab), then disappears.
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    blob: Option<String>,
}

impl MemoryCartStore {
    /// Create an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self { blob: None }
    }

    /// Create a store already holding a blob, as after a page reload.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
        }
    }
}

impl CartStore for MemoryCartStore {
    fn get(&self) -> Option<String> {
        self.blob.clone()
    }

    fn set(&mut self, blob: String) {
        self.blob = Some(blob);
    }

    fn remove(&mut self) {
        self.blob = None;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let mut store = MemoryCartStore::new();
        assert!(store.get().is_none());

        store.set("[1,2]".to_owned());
        assert_eq!(store.get().unwrap(), "[1,2]");

        store.remove();
        assert!(store.get().is_none());
    }
}
