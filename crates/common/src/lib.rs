//! Shared types for the order-processing pipeline.

pub mod types;

pub use types::{Money, OrderId, ProductId};
