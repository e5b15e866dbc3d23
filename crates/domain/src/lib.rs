//! Domain values for the order-processing pipeline.
//!
//! This crate provides the immutable values that flow through the
//! pipeline:
//! - `Order`, created by the caller before submission and never mutated
//! - `PaymentResult`, produced once per order by a successful payment capture
//! - `OrderResult`, the single terminal value returned for every order
pub mod order;
pub mod result;

pub use order::Order;
pub use result::{OrderResult, PaymentResult};
