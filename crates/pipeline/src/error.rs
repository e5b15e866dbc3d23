//! Pipeline error types.

use common::ProductId;
use thiserror::Error;

/// Errors produced by the business stages of the pipeline.
///
/// None of these escape `process_order`: the first failing stage
/// short-circuits the rest and the error is rendered into a failure
/// `OrderResult`. Pool-level errors are reported separately to the
/// submit/shutdown caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StageError {
    /// The order failed basic validation.
    #[error("Invalid order: {0}")]
    InvalidOrder(String),

    /// The ordered product does not exist in inventory.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Not enough stock to cover the requested quantity.
    #[error("Insufficient stock. Available: {available}, Requested: {requested}")]
    InsufficientStock { available: u32, requested: u32 },

    /// The payment gateway declined the charge.
    #[error("Payment declined: {0}")]
    PaymentDeclined(String),

    /// Notification delivery failed. Observed and logged only; never
    /// alters the terminal order result.
    #[error("Notification delivery failed: {0}")]
    Notification(String),

    /// The stage was interrupted before it could finish, e.g. by pool
    /// shutdown.
    #[error("Stage interrupted: {0}")]
    Interrupted(String),
}

/// Convenience type alias for stage results.
pub type Result<T> = std::result::Result<T, StageError>;
