//! Handle to a submitted task.

use tokio::sync::oneshot;

use crate::error::PoolError;

/// An asynchronous reference to a task's pending result.
///
/// Awaiting the handle suspends the caller; it never parks a pool
/// worker, so handles can be chained inside other futures to trigger
/// dependent work.
#[derive(Debug)]
pub struct TaskHandle<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> TaskHandle<T> {
    pub(crate) fn new(rx: oneshot::Receiver<T>) -> Self {
        Self { rx }
    }

    /// Waits for the task to finish and returns its output.
    ///
    /// Resolves to [`PoolError::Cancelled`] if the task was discarded
    /// by a forced shutdown before producing a value.
    pub async fn join(self) -> Result<T, PoolError> {
        self.rx.await.map_err(|_| PoolError::Cancelled)
    }
}
