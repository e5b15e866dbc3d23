//! Pipeline configuration with sensible defaults.

use std::time::Duration;

/// Tuning knobs for the pipeline.
///
/// Defaults are test-friendly: no simulated latency and a payment
/// failure rate of zero, so runs are deterministic unless configured
/// otherwise.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of workers shared by all pipeline stages.
    pub pool_size: usize,
    /// Simulated external-call latency injected into each stage.
    pub stage_delay: Duration,
    /// Probability in `[0.0, 1.0]` that a payment is declined.
    pub payment_failure_rate: f64,
}

impl PipelineConfig {
    /// Sets the worker pool size.
    pub fn with_pool_size(mut self, pool_size: usize) -> Self {
        self.pool_size = pool_size;
        self
    }

    /// Sets the simulated per-stage delay.
    pub fn with_stage_delay(mut self, stage_delay: Duration) -> Self {
        self.stage_delay = stage_delay;
        self
    }

    /// Sets the payment decline probability.
    pub fn with_payment_failure_rate(mut self, rate: f64) -> Self {
        self.payment_failure_rate = rate;
        self
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pool_size: 10,
            stage_delay: Duration::ZERO,
            payment_failure_rate: 0.0,
        }
    }
}
