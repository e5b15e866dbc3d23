//! Asynchronous multi-stage order-processing pipeline.
//!
//! An order passes through validation, stock reservation, and payment
//! capture on a bounded worker pool, and a notification stage that
//! runs regardless of where failure occurred. Every submitted order
//! resolves to exactly one terminal [`domain::OrderResult`]; stage
//! failures are captured and converted, never thrown at the caller.
//!
//! The only cross-order shared state is the [`InventoryStore`], whose
//! check-and-decrement is atomic per product.

pub mod config;
pub mod error;
pub mod inventory;
pub mod phase;
pub mod processor;
pub mod services;

pub use config::PipelineConfig;
pub use error::StageError;
pub use inventory::InventoryStore;
pub use phase::{OrderPhase, Stage};
pub use processor::{OrderHandle, OrderProcessor};
pub use services::{
    BasicValidationService, InventoryStockService, LoggingNotificationService,
    NotificationService, PaymentService, RecordingNotificationService, SimulatedPaymentService,
    StockService, ValidationService,
};
