//! Process-wide inventory store with atomic per-product reservation.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use common::ProductId;

use crate::error::StageError;

/// In-memory stock levels, mutated only through [`reserve`].
///
/// Each product carries its own lock, so the check-and-decrement is
/// indivisible with respect to concurrent reservations of the same
/// product while reservations against different products proceed in
/// parallel. The map itself is never exposed.
///
/// [`reserve`]: InventoryStore::reserve
#[derive(Debug, Default)]
pub struct InventoryStore {
    products: RwLock<HashMap<ProductId, Arc<Mutex<u32>>>>,
}

impl InventoryStore {
    /// Creates an empty inventory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the available quantity for a product, inserting it if absent.
    pub fn seed(&self, product_id: impl Into<ProductId>, quantity: u32) {
        let mut products = self.products.write().unwrap();
        products.insert(product_id.into(), Arc::new(Mutex::new(quantity)));
    }

    /// Seeds several products at once.
    pub fn seed_all<I, P>(&self, entries: I)
    where
        I: IntoIterator<Item = (P, u32)>,
        P: Into<ProductId>,
    {
        for (product_id, quantity) in entries {
            self.seed(product_id, quantity);
        }
    }

    /// Atomically checks and decrements available stock.
    ///
    /// Returns the remaining quantity on success. Fails with
    /// `ProductNotFound` for unknown products and `InsufficientStock`
    /// when availability does not cover the request; in both cases the
    /// stock level is left untouched. Two concurrent reservations can
    /// never jointly exceed availability.
    pub fn reserve(&self, product_id: &ProductId, quantity: u32) -> Result<u32, StageError> {
        let slot = {
            let products = self.products.read().unwrap();
            products.get(product_id).cloned()
        };
        let Some(slot) = slot else {
            return Err(StageError::ProductNotFound(product_id.clone()));
        };

        let mut available = slot.lock().unwrap();
        if *available < quantity {
            return Err(StageError::InsufficientStock {
                available: *available,
                requested: quantity,
            });
        }
        *available -= quantity;
        tracing::debug!(product_id = %product_id, reserved = quantity, remaining = *available, "stock reserved");
        Ok(*available)
    }

    /// Returns the available quantity for a product, if present.
    pub fn available(&self, product_id: &ProductId) -> Option<u32> {
        let slot = {
            let products = self.products.read().unwrap();
            products.get(product_id).cloned()
        };
        slot.map(|slot| *slot.lock().unwrap())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserve_decrements_stock() {
        let store = InventoryStore::new();
        store.seed("PROD-001", 10);

        let remaining = store.reserve(&"PROD-001".into(), 3).unwrap();
        assert_eq!(remaining, 7);
        assert_eq!(store.available(&"PROD-001".into()), Some(7));
    }

    #[test]
    fn test_unknown_product_is_rejected() {
        let store = InventoryStore::new();
        let result = store.reserve(&"PROD-404".into(), 1);
        assert!(matches!(result, Err(StageError::ProductNotFound(_))));
    }

    #[test]
    fn test_insufficient_stock_leaves_level_unchanged() {
        let store = InventoryStore::new();
        store.seed("PROD-001", 2);

        let result = store.reserve(&"PROD-001".into(), 3);
        assert_eq!(
            result,
            Err(StageError::InsufficientStock {
                available: 2,
                requested: 3,
            })
        );
        assert_eq!(store.available(&"PROD-001".into()), Some(2));
    }

    #[test]
    fn test_exact_quantity_drains_to_zero() {
        let store = InventoryStore::new();
        store.seed("PROD-001", 5);

        assert_eq!(store.reserve(&"PROD-001".into(), 5).unwrap(), 0);
        assert!(matches!(
            store.reserve(&"PROD-001".into(), 1),
            Err(StageError::InsufficientStock { available: 0, requested: 1 })
        ));
    }

    #[test]
    fn test_seed_all() {
        let store = InventoryStore::new();
        store.seed_all([("PROD-001", 100), ("PROD-002", 50)]);
        assert_eq!(store.available(&"PROD-001".into()), Some(100));
        assert_eq!(store.available(&"PROD-002".into()), Some(50));
    }

    #[test]
    fn test_concurrent_reservations_never_oversell() {
        let store = Arc::new(InventoryStore::new());
        store.seed("PROD-001", 10);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || store.reserve(&"PROD-001".into(), 3).is_ok())
            })
            .collect();

        let succeeded = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count() as u32;

        let remaining = store.available(&"PROD-001".into()).unwrap();
        assert_eq!(10 - remaining, succeeded * 3);
        assert_eq!(succeeded, 3);
        assert_eq!(remaining, 1);
    }
}
