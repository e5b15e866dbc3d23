//! Worker pool error types.

use std::time::Duration;

use thiserror::Error;

/// Errors reported by the worker pool.
///
/// These surface to whoever called `submit` or `shutdown`; task-level
/// failures are carried in the task's own output type instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The pool no longer accepts submissions.
    #[error("Worker pool is shut down")]
    ShutDown,

    /// Shutdown did not drain queued and in-flight work in time;
    /// remaining work was cancelled.
    #[error("Worker pool shutdown timed out after {0:?}")]
    ShutdownTimedOut(Duration),

    /// The task was cancelled before it produced a result.
    #[error("Task was cancelled before completion")]
    Cancelled,
}

/// Convenience type alias for pool results.
pub type Result<T> = std::result::Result<T, PoolError>;
