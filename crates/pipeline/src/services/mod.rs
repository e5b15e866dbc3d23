//! Stage services for the order pipeline.
//!
//! Each stage is a trait over `(Order) -> Result`, with an in-process
//! implementation carrying an injectable delay that stands in for
//! external-call latency. Tests run with zero delay.

pub mod notification;
pub mod payment;
pub mod stock;
pub mod validation;

pub use notification::{
    LoggingNotificationService, NotificationService, RecordingNotificationService,
};
pub use payment::{PaymentService, SimulatedPaymentService};
pub use stock::{InventoryStockService, StockService};
pub use validation::{BasicValidationService, ValidationService};

use std::time::Duration;

/// Sleeps for the configured simulated latency, if any.
///
/// The pool interrupts this sleep cooperatively during forced
/// shutdown, so a delayed stage abandons work promptly.
pub(crate) async fn simulate_delay(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
