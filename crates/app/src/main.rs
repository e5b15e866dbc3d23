//! Demo entry point: seeds inventory, races a batch of orders through
//! the pipeline, and shuts down gracefully.

mod config;

use std::sync::Arc;
use std::time::Duration;

use common::Money;
use domain::Order;
use pipeline::{
    BasicValidationService, InventoryStockService, InventoryStore, LoggingNotificationService,
    OrderProcessor, SimulatedPaymentService,
};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::Config;

#[tokio::main]
async fn main() {
    // 1. Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // 2. Install Prometheus metrics recorder
    let prometheus_builder = metrics_exporter_prometheus::PrometheusBuilder::new();
    let metrics_handle = prometheus_builder
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    // 3. Load configuration and seed inventory
    let config = Config::from_env();
    tracing::info!(?config, "starting order pipeline demo");

    let inventory = Arc::new(InventoryStore::new());
    inventory.seed_all([("PROD-001", 100), ("PROD-002", 50), ("PROD-003", 200), ("P1", 5)]);

    // 4. Wire the stage services and the processor
    let delay = config.pipeline.stage_delay;
    let processor = OrderProcessor::new(
        config.pipeline.pool_size,
        BasicValidationService::with_delay(delay),
        InventoryStockService::with_delay(inventory.clone(), delay),
        SimulatedPaymentService::new()
            .with_delay(delay)
            .with_failure_rate(config.pipeline.payment_failure_rate),
        LoggingNotificationService::with_delay(delay),
    );

    // 5. Submit a batch of concurrent orders: a clean one, an invalid
    // one, an unknown product, and two racing for the last of P1.
    let orders = vec![
        Order::new("ORD-001", "PROD-001", 2, Money::from_cents(10_000), "alice@example.com"),
        Order::new("ORD-002", "PROD-002", 0, Money::from_cents(2_500), "bob@example.com"),
        Order::new("ORD-003", "PROD-404", 1, Money::from_cents(999), "carol@example.com"),
        Order::new("ORD-004", "P1", 3, Money::from_cents(7_500), "dave@example.com"),
        Order::new("ORD-005", "P1", 3, Money::from_cents(7_500), "erin@example.com"),
    ];

    let mut handles = Vec::new();
    for order in orders {
        match processor.process_order(order) {
            Ok(handle) => handles.push(handle),
            Err(error) => tracing::error!(%error, "order rejected"),
        }
    }

    for handle in handles {
        let result = handle.join().await;
        tracing::info!(%result, "terminal result");
    }

    tracing::info!(
        remaining_p1 = ?inventory.available(&"P1".into()),
        "inventory after batch"
    );

    // 6. Orderly shutdown, then dump the metrics snapshot
    if let Err(error) = processor.shutdown(Duration::from_secs(5)).await {
        tracing::warn!(%error, "shutdown did not drain cleanly");
    }
    println!("{}", metrics_handle.render());
}
