//! Payment capture stage.

use std::time::Duration;

use async_trait::async_trait;
use domain::{Order, PaymentResult};
use uuid::Uuid;

use crate::error::StageError;
use crate::services::simulate_delay;

/// Trait for the payment stage.
#[async_trait]
pub trait PaymentService: Send + Sync {
    /// Captures payment for the order, yielding a fresh transaction ID
    /// on success.
    async fn charge(&self, order: &Order) -> Result<PaymentResult, StageError>;
}

/// Simulated payment gateway.
///
/// Declines charges with a configurable probability; the default rate
/// of zero makes runs deterministic, a rate of `1.0` makes every
/// charge decline.
#[derive(Debug, Default)]
pub struct SimulatedPaymentService {
    delay: Duration,
    failure_rate: f64,
}

impl SimulatedPaymentService {
    /// Creates a payment service that always captures, with no
    /// simulated latency.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the simulated latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Sets the decline probability in `[0.0, 1.0]`.
    pub fn with_failure_rate(mut self, failure_rate: f64) -> Self {
        self.failure_rate = failure_rate;
        self
    }
}

#[async_trait]
impl PaymentService for SimulatedPaymentService {
    async fn charge(&self, order: &Order) -> Result<PaymentResult, StageError> {
        tracing::info!(order_id = %order.order_id, amount = %order.amount, "processing payment");
        simulate_delay(self.delay).await;

        if self.failure_rate > 0.0 && rand::random::<f64>() < self.failure_rate {
            return Err(StageError::PaymentDeclined("gateway timeout".to_string()));
        }

        let transaction_id = format!("TXN-{}", &Uuid::new_v4().simple().to_string()[..8]);
        tracing::info!(order_id = %order.order_id, %transaction_id, "payment captured");
        Ok(PaymentResult::new(transaction_id, "Payment captured"))
    }
}
