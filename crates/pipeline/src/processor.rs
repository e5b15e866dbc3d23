//! Order pipeline orchestrator.
//!
//! Composes the four stage services into one asynchronous computation
//! per order. Stage bodies run on the shared worker pool; a
//! lightweight coordinator future awaits one stage's handle before
//! scheduling the next, so no pool worker ever parks waiting on
//! another stage. The notification stage runs exactly once per order,
//! after success and failure alike.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use common::OrderId;
use domain::{Order, OrderResult, PaymentResult};
use pool::{PoolError, TaskHandle, WorkerPool};
use tokio::sync::oneshot;

use crate::error::StageError;
use crate::phase::{OrderPhase, Stage};
use crate::services::{NotificationService, PaymentService, StockService, ValidationService};

/// Handle to an order travelling through the pipeline.
///
/// Resolves to exactly one terminal [`OrderResult`]; stage failures
/// are folded into a failure-shaped result rather than surfaced as
/// errors, so there is no caller-visible error path.
#[derive(Debug)]
pub struct OrderHandle {
    order_id: OrderId,
    rx: oneshot::Receiver<OrderResult>,
}

impl OrderHandle {
    /// Waits for the order's terminal result.
    pub async fn join(self) -> OrderResult {
        let order_id = self.order_id;
        self.rx.await.unwrap_or_else(|_| {
            OrderResult::failure(order_id, "Error: pipeline terminated before completion")
        })
    }
}

/// Orchestrates the order pipeline over a bounded worker pool.
///
/// Generic over the four stage services so tests can inject doubles,
/// mirroring how production wires the simulated implementations.
pub struct OrderProcessor<V, S, P, N>
where
    V: ValidationService + 'static,
    S: StockService + 'static,
    P: PaymentService + 'static,
    N: NotificationService + 'static,
{
    pool: WorkerPool,
    validation: Arc<V>,
    stock: Arc<S>,
    payment: Arc<P>,
    notification: Arc<N>,
}

impl<V, S, P, N> OrderProcessor<V, S, P, N>
where
    V: ValidationService + 'static,
    S: StockService + 'static,
    P: PaymentService + 'static,
    N: NotificationService + 'static,
{
    /// Creates a processor with its own worker pool of `pool_size`.
    pub fn new(pool_size: usize, validation: V, stock: S, payment: P, notification: N) -> Self {
        Self {
            pool: WorkerPool::new(pool_size),
            validation: Arc::new(validation),
            stock: Arc::new(stock),
            payment: Arc::new(payment),
            notification: Arc::new(notification),
        }
    }

    /// Submits an order to the pipeline.
    ///
    /// Fails only with [`PoolError::ShutDown`] when the pool no longer
    /// accepts work; otherwise the returned handle resolves to exactly
    /// one well-formed `OrderResult`, never an error.
    #[tracing::instrument(skip(self, order), fields(order_id = %order.order_id))]
    pub fn process_order(&self, order: Order) -> Result<OrderHandle, PoolError> {
        metrics::counter!("orders_processed_total").increment(1);
        tracing::info!(
            product_id = %order.product_id,
            quantity = order.quantity,
            "order submitted"
        );

        // Submitted → Validating happens here so a closed pool is
        // reported directly to the submitting caller.
        transition(&order.order_id, OrderPhase::Submitted, OrderPhase::Validating);
        let validating = {
            let validation = self.validation.clone();
            let order = order.clone();
            self.pool
                .submit(async move { validation.validate(&order).await })?
        };

        let (tx, rx) = oneshot::channel();
        let order_id = order.order_id.clone();
        let pool = self.pool.clone();
        let stock = self.stock.clone();
        let payment = self.payment.clone();
        let notification = self.notification.clone();

        tokio::spawn(async move {
            let started = Instant::now();
            let result = drive_order(pool, order, validating, stock, payment, notification).await;
            metrics::histogram!("order_duration_seconds").record(started.elapsed().as_secs_f64());
            // The caller may have dropped its handle; the result is
            // final either way.
            let _ = tx.send(result);
        });

        Ok(OrderHandle { order_id, rx })
    }

    /// Shuts the underlying worker pool down.
    pub async fn shutdown(&self, timeout: Duration) -> Result<(), PoolError> {
        self.pool.shutdown(timeout).await
    }
}

fn transition(order_id: &OrderId, from: OrderPhase, to: OrderPhase) {
    debug_assert!(
        from.can_transition_to(to),
        "invalid phase transition {from} -> {to}"
    );
    tracing::debug!(order_id = %order_id, from = %from, to = %to, "phase transition");
}

/// A stage failure tagged with the stage it came from, so the
/// terminal message can reference its origin.
type StageFailure = (Stage, StageError);

fn submit_stage<F, T>(
    pool: &WorkerPool,
    stage: Stage,
    task: F,
) -> Result<TaskHandle<T>, StageFailure>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    pool.submit(task)
        .map_err(|e| (stage, StageError::Interrupted(e.to_string())))
}

async fn join_stage<T>(
    stage: Stage,
    handle: TaskHandle<Result<T, StageError>>,
) -> Result<T, StageFailure> {
    match handle.join().await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err((stage, error)),
        Err(pool_error) => Err((stage, StageError::Interrupted(pool_error.to_string()))),
    }
}

/// Runs the business stages in sequence, scheduling each on the pool
/// only after its predecessor resolved.
async fn business_stages<S, P>(
    pool: &WorkerPool,
    order: &Order,
    validating: TaskHandle<Result<(), StageError>>,
    stock: Arc<S>,
    payment: Arc<P>,
) -> Result<PaymentResult, StageFailure>
where
    S: StockService + 'static,
    P: PaymentService + 'static,
{
    let order_id = &order.order_id;

    join_stage(Stage::Validation, validating).await?;
    transition(order_id, OrderPhase::Validating, OrderPhase::Reserving);

    let reserving = {
        let order = order.clone();
        submit_stage(pool, Stage::Reservation, async move {
            stock.reserve(&order).await
        })?
    };
    join_stage(Stage::Reservation, reserving).await?;
    transition(order_id, OrderPhase::Reserving, OrderPhase::Paying);

    let paying = {
        let order = order.clone();
        submit_stage(pool, Stage::Payment, async move {
            payment.charge(&order).await
        })?
    };
    join_stage(Stage::Payment, paying).await
}

/// Delivers the terminal result to the notification stage.
///
/// Delivery failures are observed only; they never alter the result.
/// If the pool refuses the job, or accepted it but shut down before it
/// ran, delivery runs on the coordinator task itself so the terminal
/// stage still happens.
async fn notify<N>(pool: &WorkerPool, notification: Arc<N>, order: &Order, result: &OrderResult)
where
    N: NotificationService + 'static,
{
    let submitted = {
        let notification = notification.clone();
        let order = order.clone();
        let result = result.clone();
        pool.submit(async move { notification.send(&order, &result).await })
    };

    let delivery = match submitted {
        Ok(handle) => match handle.join().await {
            Ok(outcome) => outcome,
            Err(_) => notification.send(order, result).await,
        },
        Err(_) => notification.send(order, result).await,
    };

    if let Err(error) = delivery {
        metrics::counter!("notifications_failed").increment(1);
        tracing::warn!(
            order_id = %order.order_id,
            stage = %Stage::Notification,
            %error,
            "notification delivery failed"
        );
    }
}

async fn drive_order<S, P, N>(
    pool: WorkerPool,
    order: Order,
    validating: TaskHandle<Result<(), StageError>>,
    stock: Arc<S>,
    payment: Arc<P>,
    notification: Arc<N>,
) -> OrderResult
where
    S: StockService + 'static,
    P: PaymentService + 'static,
    N: NotificationService + 'static,
{
    let order_id = order.order_id.clone();

    let result = match business_stages(&pool, &order, validating, stock, payment).await {
        Ok(payment_result) => {
            metrics::counter!("orders_completed").increment(1);
            transition(&order_id, OrderPhase::Paying, OrderPhase::Finalizing);
            OrderResult::success(
                order_id.clone(),
                "Order processed successfully",
                payment_result.transaction_id,
            )
        }
        Err((stage, error)) => {
            metrics::counter!("orders_failed").increment(1);
            tracing::warn!(order_id = %order_id, stage = %stage, %error, "order failed");
            transition(&order_id, stage.phase(), OrderPhase::Finalizing);
            OrderResult::failure(order_id.clone(), format!("Error: {stage}: {error}"))
        }
    };

    notify(&pool, notification, &order, &result).await;
    transition(&order_id, OrderPhase::Finalizing, OrderPhase::Notified);
    result
}
