use std::sync::Arc;

use common::Money;
use criterion::{Criterion, criterion_group, criterion_main};
use domain::Order;
use pipeline::{
    BasicValidationService, InventoryStockService, InventoryStore, OrderProcessor,
    SimulatedPaymentService,
};

/// End-to-end throughput of a single order at zero simulated delay.
fn bench_process_order(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    let (processor, _inventory) = rt.block_on(async {
        let inventory = Arc::new(InventoryStore::new());
        inventory.seed("PROD-001", u32::MAX);
        let processor = OrderProcessor::new(
            10,
            BasicValidationService::new(),
            InventoryStockService::new(inventory.clone()),
            SimulatedPaymentService::new(),
            pipeline::LoggingNotificationService::new(),
        );
        (processor, inventory)
    });

    c.bench_function("process_order_zero_delay", |b| {
        b.to_async(&rt).iter(|| async {
            let order = Order::new("ORD-001", "PROD-001", 1, Money::from_cents(1000), "a@b.com");
            processor.process_order(order).unwrap().join().await
        });
    });
}

criterion_group!(benches, bench_process_order);
criterion_main!(benches);
