//! Stock reservation stage.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use domain::Order;

use crate::error::StageError;
use crate::inventory::InventoryStore;
use crate::services::simulate_delay;

/// Trait for the stock reservation stage.
#[async_trait]
pub trait StockService: Send + Sync {
    /// Reserves the ordered quantity, or fails without touching stock.
    async fn reserve(&self, order: &Order) -> Result<(), StageError>;
}

/// Reservation stage backed by the shared [`InventoryStore`].
#[derive(Debug)]
pub struct InventoryStockService {
    inventory: Arc<InventoryStore>,
    delay: Duration,
}

impl InventoryStockService {
    /// Creates a reservation stage over the given store with no
    /// simulated latency.
    pub fn new(inventory: Arc<InventoryStore>) -> Self {
        Self {
            inventory,
            delay: Duration::ZERO,
        }
    }

    /// Creates a reservation stage with the given simulated latency.
    pub fn with_delay(inventory: Arc<InventoryStore>, delay: Duration) -> Self {
        Self { inventory, delay }
    }
}

#[async_trait]
impl StockService for InventoryStockService {
    async fn reserve(&self, order: &Order) -> Result<(), StageError> {
        tracing::info!(
            order_id = %order.order_id,
            product_id = %order.product_id,
            quantity = order.quantity,
            "reserving stock"
        );
        simulate_delay(self.delay).await;

        let remaining = self.inventory.reserve(&order.product_id, order.quantity)?;
        tracing::info!(order_id = %order.order_id, remaining, "stock reservation confirmed");
        Ok(())
    }
}
