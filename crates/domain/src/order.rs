//! The order value submitted to the pipeline.

use common::{Money, OrderId, ProductId};
use serde::{Deserialize, Serialize};

/// An order as submitted by the caller.
///
/// Orders are immutable: they are created before submission, passed
/// down the pipeline by reference or clone, and discarded once the
/// caller consumes the terminal [`OrderResult`](crate::OrderResult).
/// Field validity is checked by the validation stage, not on
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Caller-supplied order identifier.
    pub order_id: OrderId,

    /// The product being ordered.
    pub product_id: ProductId,

    /// Quantity ordered.
    pub quantity: u32,

    /// Total order amount.
    pub amount: Money,

    /// Destination for the order notification.
    pub customer_email: String,
}

impl Order {
    /// Creates a new order.
    pub fn new(
        order_id: impl Into<OrderId>,
        product_id: impl Into<ProductId>,
        quantity: u32,
        amount: Money,
        customer_email: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            product_id: product_id.into(),
            quantity,
            amount,
            customer_email: customer_email.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_construction() {
        let order = Order::new("ORD-001", "PROD-001", 2, Money::from_cents(10_000), "a@b.com");
        assert_eq!(order.order_id.as_str(), "ORD-001");
        assert_eq!(order.product_id.as_str(), "PROD-001");
        assert_eq!(order.quantity, 2);
        assert_eq!(order.amount, Money::from_cents(10_000));
        assert_eq!(order.customer_email, "a@b.com");
    }

    #[test]
    fn test_order_serialization_roundtrip() {
        let order = Order::new("ORD-001", "PROD-001", 2, Money::from_cents(10_000), "a@b.com");
        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();
        assert_eq!(order, deserialized);
    }
}
