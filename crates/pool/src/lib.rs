//! Bounded worker pool for the order pipeline.
//!
//! A fixed number of worker tasks consume submitted jobs from a single
//! FIFO queue, so at most `size` jobs run at once and jobs start in
//! submission order. Each submission yields a [`TaskHandle`] that the
//! submitter can await without blocking a worker.
//!
//! Shutdown is two-phase: intake closes immediately, queued and
//! in-flight work gets a grace period, and on expiry queued jobs are
//! cancelled while in-flight jobs are interrupted cooperatively.

pub mod error;
pub mod handle;
pub mod worker;

pub use error::PoolError;
pub use handle::TaskHandle;
pub use worker::WorkerPool;
