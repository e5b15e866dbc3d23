//! Order validation stage.

use std::time::Duration;

use async_trait::async_trait;
use domain::Order;

use crate::error::StageError;
use crate::services::simulate_delay;

/// Trait for the validation stage.
#[async_trait]
pub trait ValidationService: Send + Sync {
    /// Checks the order's basic invariants; success passes the order
    /// through unchanged.
    async fn validate(&self, order: &Order) -> Result<(), StageError>;
}

/// Field-level order validation.
#[derive(Debug, Default)]
pub struct BasicValidationService {
    delay: Duration,
}

impl BasicValidationService {
    /// Creates a validation service with no simulated latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a validation service with the given simulated latency.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl ValidationService for BasicValidationService {
    async fn validate(&self, order: &Order) -> Result<(), StageError> {
        tracing::info!(order_id = %order.order_id, "validating order");
        simulate_delay(self.delay).await;

        if order.order_id.is_blank() {
            return Err(StageError::InvalidOrder(
                "order ID must not be empty".to_string(),
            ));
        }
        if order.quantity == 0 {
            return Err(StageError::InvalidOrder(
                "quantity must be greater than 0".to_string(),
            ));
        }
        if !order.amount.is_positive() {
            return Err(StageError::InvalidOrder(
                "amount must be greater than 0".to_string(),
            ));
        }

        tracing::debug!(order_id = %order.order_id, "order is valid");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;

    fn order(order_id: &str, quantity: u32, cents: i64) -> Order {
        Order::new(order_id, "PROD-001", quantity, Money::from_cents(cents), "a@b.com")
    }

    #[tokio::test]
    async fn test_valid_order_passes() {
        let service = BasicValidationService::new();
        assert!(service.validate(&order("ORD-001", 2, 10_000)).await.is_ok());
    }

    #[tokio::test]
    async fn test_empty_order_id_is_rejected() {
        let service = BasicValidationService::new();
        let result = service.validate(&order("", 2, 10_000)).await;
        assert!(matches!(result, Err(StageError::InvalidOrder(_))));

        let result = service.validate(&order("   ", 2, 10_000)).await;
        assert!(matches!(result, Err(StageError::InvalidOrder(_))));
    }

    #[tokio::test]
    async fn test_zero_quantity_is_rejected() {
        let service = BasicValidationService::new();
        let result = service.validate(&order("ORD-001", 0, 10_000)).await;
        assert!(matches!(result, Err(StageError::InvalidOrder(_))));
    }

    #[tokio::test]
    async fn test_non_positive_amount_is_rejected() {
        let service = BasicValidationService::new();
        assert!(service.validate(&order("ORD-001", 1, 0)).await.is_err());
        assert!(service.validate(&order("ORD-001", 1, -500)).await.is_err());
    }
}
