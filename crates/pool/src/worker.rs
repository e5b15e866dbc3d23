//! The worker pool implementation.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, mpsc, oneshot, watch};
use tokio::task::JoinHandle;

use crate::error::PoolError;
use crate::handle::TaskHandle;

/// A unit of work wrapped for dispatch: runs the submitted future and
/// delivers its output through the submitter's oneshot channel.
type Job = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

struct PoolInner {
    /// Intake side of the job queue. Taken (closed) when shutdown begins.
    queue_tx: std::sync::Mutex<Option<mpsc::UnboundedSender<Job>>>,
    /// Broadcast stop signal observed by queued and in-flight jobs.
    stop_tx: watch::Sender<bool>,
    shutting_down: AtomicBool,
    workers: Mutex<Vec<JoinHandle<()>>>,
    size: usize,
}

/// Fixed-size pool of worker tasks sharing one FIFO job queue.
///
/// Jobs begin executing strictly in submission order; at most `size`
/// run concurrently. Cloning the pool clones a handle to the same
/// workers and queue.
#[derive(Clone)]
pub struct WorkerPool {
    inner: Arc<PoolInner>,
}

impl WorkerPool {
    /// Creates a pool with `size` workers.
    ///
    /// # Panics
    /// Panics if `size` is zero.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "worker pool size must be at least 1");

        let (queue_tx, queue_rx) = mpsc::unbounded_channel::<Job>();
        let (stop_tx, _) = watch::channel(false);

        // Workers alone hold the receiver: once every worker exits, any
        // jobs still queued are dropped, resolving their handles as
        // cancelled.
        let queue_rx = Arc::new(Mutex::new(queue_rx));
        let workers = (0..size)
            .map(|id| tokio::spawn(worker_loop(id, queue_rx.clone(), stop_tx.subscribe())))
            .collect();

        Self {
            inner: Arc::new(PoolInner {
                queue_tx: std::sync::Mutex::new(Some(queue_tx)),
                stop_tx,
                shutting_down: AtomicBool::new(false),
                workers: Mutex::new(workers),
                size,
            }),
        }
    }

    /// Returns the number of workers in the pool.
    pub fn size(&self) -> usize {
        self.inner.size
    }

    /// Returns true once shutdown has begun.
    pub fn is_shut_down(&self) -> bool {
        self.inner.shutting_down.load(Ordering::SeqCst)
    }

    /// Submits a unit of work, returning a handle to its result.
    ///
    /// Fails with [`PoolError::ShutDown`] once shutdown has begun. A
    /// task's own failure travels inside `T`; the pool never crashes
    /// on it.
    pub fn submit<F, T>(&self, task: F) -> Result<TaskHandle<T>, PoolError>
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        if self.is_shut_down() {
            return Err(PoolError::ShutDown);
        }

        let (tx, rx) = oneshot::channel();
        let mut stop_rx = self.inner.stop_tx.subscribe();
        let job: Job = Box::pin(async move {
            let output = tokio::select! {
                biased;
                _ = stop_rx.wait_for(|stop| *stop) => None,
                value = task => Some(value),
            };
            if let Some(value) = output {
                // The submitter may have dropped its handle.
                let _ = tx.send(value);
            }
        });

        let guard = self.inner.queue_tx.lock().unwrap();
        match guard.as_ref() {
            Some(sender) => sender
                .send(job)
                .map_err(|_| PoolError::ShutDown)
                .map(|()| TaskHandle::new(rx)),
            None => Err(PoolError::ShutDown),
        }
    }

    /// Shuts the pool down.
    ///
    /// Stops accepting submissions immediately, then waits up to
    /// `timeout` for queued and in-flight work to finish. On expiry,
    /// queued jobs are cancelled, in-flight jobs are interrupted at
    /// their next suspension point, and `ShutdownTimedOut` is returned.
    ///
    /// Idempotent: calls after the first return `Ok(())` immediately.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), PoolError> {
        if self.inner.shutting_down.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        tracing::info!(timeout_ms = timeout.as_millis() as u64, "worker pool shutting down");

        // Close intake: workers drain what is already queued, then see
        // a closed channel and exit.
        drop(self.inner.queue_tx.lock().unwrap().take());

        let mut workers = std::mem::take(&mut *self.inner.workers.lock().await);
        let deadline = tokio::time::Instant::now() + timeout;
        let mut timed_out = false;

        while let Some(mut worker) = workers.pop() {
            if timed_out {
                let _ = worker.await;
                continue;
            }
            if tokio::time::timeout_at(deadline, &mut worker).await.is_err() {
                // Grace period over: stop queued and in-flight work,
                // then collect the workers as they bail out.
                timed_out = true;
                let _ = self.inner.stop_tx.send(true);
                let _ = worker.await;
            }
        }

        if timed_out {
            tracing::warn!("worker pool shutdown timed out, remaining work cancelled");
            Err(PoolError::ShutdownTimedOut(timeout))
        } else {
            tracing::info!("worker pool drained cleanly");
            Ok(())
        }
    }
}

async fn worker_loop(
    id: usize,
    queue: Arc<Mutex<mpsc::UnboundedReceiver<Job>>>,
    mut stop_rx: watch::Receiver<bool>,
) {
    loop {
        if *stop_rx.borrow() {
            break;
        }
        // The queue lock is held only while idle-waiting for the next
        // job, so exactly one free worker contends for dispatch and
        // jobs start in queue order.
        let job = {
            let mut queue = queue.lock().await;
            tokio::select! {
                biased;
                _ = stop_rx.wait_for(|stop| *stop) => break,
                job = queue.recv() => match job {
                    Some(job) => job,
                    None => break,
                },
            }
        };
        job.await;
    }
    tracing::trace!(worker = id, "worker exited");
}
