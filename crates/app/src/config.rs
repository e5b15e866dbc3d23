//! Application configuration loaded from environment variables.

use std::time::Duration;

use pipeline::PipelineConfig;

/// Demo configuration with sensible defaults.
///
/// Reads from environment variables:
/// - `POOL_SIZE` — worker pool size (default: `10`)
/// - `STAGE_DELAY_MS` — simulated per-stage latency (default: `0`)
/// - `PAYMENT_FAILURE_RATE` — payment decline probability (default: `0`)
/// - `RUST_LOG` — tracing filter directive (default: `"info"`)
#[derive(Debug, Clone)]
pub struct Config {
    pub pipeline: PipelineConfig,
    pub log_level: String,
}

impl Config {
    /// Loads configuration from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = PipelineConfig::default();
        let pipeline = defaults
            .clone()
            .with_pool_size(read_env("POOL_SIZE").unwrap_or(defaults.pool_size))
            .with_stage_delay(
                read_env("STAGE_DELAY_MS")
                    .map(Duration::from_millis)
                    .unwrap_or(defaults.stage_delay),
            )
            .with_payment_failure_rate(
                read_env("PAYMENT_FAILURE_RATE").unwrap_or(defaults.payment_failure_rate),
            );

        Self {
            pipeline,
            log_level: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pipeline: PipelineConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

fn read_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}
