//! Terminal result values produced by the pipeline.

use common::OrderId;
use serde::{Deserialize, Serialize};

/// Result of a successful payment capture.
///
/// Produced at most once per order. A declined payment is an error of
/// the payment stage, so this value only exists for captured payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResult {
    /// Unique transaction identifier assigned by the payment service.
    pub transaction_id: String,
    /// Human-readable capture message.
    pub message: String,
}

impl PaymentResult {
    /// Creates a new payment result.
    pub fn new(transaction_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            transaction_id: transaction_id.into(),
            message: message.into(),
        }
    }
}

/// The single terminal value produced for every submitted order.
///
/// Exactly one `OrderResult` is resolved per order, whether the
/// pipeline succeeded or failed at some stage. It is the input to the
/// notification stage and the value the caller's handle resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderResult {
    /// The order this result belongs to.
    pub order_id: OrderId,
    /// Whether the order was processed successfully.
    pub success: bool,
    /// Human-readable outcome message.
    pub message: String,
    /// Transaction ID of the captured payment; present iff `success`.
    pub transaction_id: Option<String>,
}

impl OrderResult {
    /// Creates a success result carrying the payment transaction ID.
    pub fn success(
        order_id: OrderId,
        message: impl Into<String>,
        transaction_id: impl Into<String>,
    ) -> Self {
        Self {
            order_id,
            success: true,
            message: message.into(),
            transaction_id: Some(transaction_id.into()),
        }
    }

    /// Creates a failure result. Failure results never carry a transaction ID.
    pub fn failure(order_id: OrderId, message: impl Into<String>) -> Self {
        Self {
            order_id,
            success: false,
            message: message.into(),
            transaction_id: None,
        }
    }
}

impl std::fmt::Display for OrderResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.success {
            write!(
                f,
                "order {} succeeded ({}): {}",
                self.order_id,
                self.transaction_id.as_deref().unwrap_or("-"),
                self.message
            )
        } else {
            write!(f, "order {} failed: {}", self.order_id, self.message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_result_carries_transaction_id() {
        let result = OrderResult::success("ORD-001".into(), "Order processed", "TXN-abc123");
        assert!(result.success);
        assert_eq!(result.transaction_id.as_deref(), Some("TXN-abc123"));
        assert_eq!(result.message, "Order processed");
    }

    #[test]
    fn test_failure_result_has_no_transaction_id() {
        let result = OrderResult::failure("ORD-001".into(), "Error: insufficient stock");
        assert!(!result.success);
        assert!(result.transaction_id.is_none());
    }

    #[test]
    fn test_display_formats() {
        let ok = OrderResult::success("ORD-001".into(), "done", "TXN-1");
        assert!(ok.to_string().contains("succeeded"));
        assert!(ok.to_string().contains("TXN-1"));

        let err = OrderResult::failure("ORD-002".into(), "Error: declined");
        assert!(err.to_string().contains("failed"));
    }

    #[test]
    fn test_result_serialization_roundtrip() {
        let result = OrderResult::success("ORD-001".into(), "ok", "TXN-1");
        let json = serde_json::to_string(&result).unwrap();
        let deserialized: OrderResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, deserialized);
    }
}
