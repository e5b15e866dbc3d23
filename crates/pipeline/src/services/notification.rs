//! Notification stage.
//!
//! Notification observes the terminal `OrderResult` and performs a
//! side effect. It never fails the pipeline: delivery errors are
//! logged by the orchestrator and the already-computed result is
//! returned to the caller untouched.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;
use common::OrderId;
use domain::{Order, OrderResult};

use crate::error::StageError;
use crate::services::simulate_delay;

/// Trait for the notification side effect.
#[async_trait]
pub trait NotificationService: Send + Sync {
    /// Delivers the terminal result to the customer.
    async fn send(&self, order: &Order, result: &OrderResult) -> Result<(), StageError>;
}

/// Notification delivery that only logs.
#[derive(Debug, Default)]
pub struct LoggingNotificationService {
    delay: Duration,
}

impl LoggingNotificationService {
    /// Creates a logging notifier with no simulated latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a logging notifier with the given simulated latency.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }
}

#[async_trait]
impl NotificationService for LoggingNotificationService {
    async fn send(&self, order: &Order, result: &OrderResult) -> Result<(), StageError> {
        tracing::info!(order_id = %order.order_id, email = %order.customer_email, "sending notification");
        simulate_delay(self.delay).await;

        if result.success {
            tracing::info!(
                order_id = %order.order_id,
                transaction_id = result.transaction_id.as_deref().unwrap_or("-"),
                "notification sent: order confirmed"
            );
        } else {
            tracing::warn!(
                order_id = %order.order_id,
                message = %result.message,
                "notification sent: order failed"
            );
        }
        Ok(())
    }
}

#[derive(Debug, Default)]
struct RecordingState {
    deliveries: Vec<(OrderId, bool)>,
    fail_on_send: bool,
}

/// In-memory notifier for tests: records every delivery attempt and
/// can be told to fail.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotificationService {
    state: Arc<RwLock<RecordingState>>,
}

impl RecordingNotificationService {
    /// Creates a new recording notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the notifier to fail deliveries.
    pub fn set_fail_on_send(&self, fail: bool) {
        self.state.write().unwrap().fail_on_send = fail;
    }

    /// Returns the total number of delivery attempts.
    pub fn attempt_count(&self) -> usize {
        self.state.read().unwrap().deliveries.len()
    }

    /// Returns the number of delivery attempts for one order.
    pub fn attempts_for(&self, order_id: &OrderId) -> usize {
        self.state
            .read()
            .unwrap()
            .deliveries
            .iter()
            .filter(|(id, _)| id == order_id)
            .count()
    }

    /// Returns the recorded success flag of the last delivery for an
    /// order, if any.
    pub fn last_outcome_for(&self, order_id: &OrderId) -> Option<bool> {
        self.state
            .read()
            .unwrap()
            .deliveries
            .iter()
            .rev()
            .find(|(id, _)| id == order_id)
            .map(|(_, success)| *success)
    }
}

#[async_trait]
impl NotificationService for RecordingNotificationService {
    async fn send(&self, _order: &Order, result: &OrderResult) -> Result<(), StageError> {
        let mut state = self.state.write().unwrap();
        state
            .deliveries
            .push((result.order_id.clone(), result.success));

        if state.fail_on_send {
            return Err(StageError::Notification("delivery refused".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Money;

    fn order() -> Order {
        Order::new("ORD-001", "PROD-001", 1, Money::from_cents(1000), "a@b.com")
    }

    #[tokio::test]
    async fn test_logging_notifier_never_fails() {
        let service = LoggingNotificationService::new();
        let ok = OrderResult::success("ORD-001".into(), "done", "TXN-1");
        let err = OrderResult::failure("ORD-001".into(), "Error: declined");

        assert!(service.send(&order(), &ok).await.is_ok());
        assert!(service.send(&order(), &err).await.is_ok());
    }

    #[tokio::test]
    async fn test_recording_notifier_counts_attempts() {
        let service = RecordingNotificationService::new();
        let result = OrderResult::success("ORD-001".into(), "done", "TXN-1");

        service.send(&order(), &result).await.unwrap();
        service.send(&order(), &result).await.unwrap();

        assert_eq!(service.attempt_count(), 2);
        assert_eq!(service.attempts_for(&"ORD-001".into()), 2);
        assert_eq!(service.last_outcome_for(&"ORD-001".into()), Some(true));
    }

    #[tokio::test]
    async fn test_delivery_failure_does_not_mutate_result() {
        let service = RecordingNotificationService::new();
        service.set_fail_on_send(true);

        let result = OrderResult::success("ORD-001".into(), "done", "TXN-1");
        let snapshot = result.clone();

        // Delivering the same terminal result twice, even failing,
        // leaves the value untouched.
        assert!(service.send(&order(), &result).await.is_err());
        assert!(service.send(&order(), &result).await.is_err());
        assert_eq!(result, snapshot);
        assert_eq!(service.attempt_count(), 2);
    }
}
