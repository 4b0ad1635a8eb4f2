//! Prometheus metrics for the clue engine
//!
//! This module provides metrics tracking for:
//! - Partition search: attempts per successful generation, capped searches
//! - Engine triggers: assignments by player count, reveal reshuffles
//!
//! # Usage
//!
//! Call `init_metrics()` at application startup to register all metrics.
//! Until then (or if registration fails) every record function is a no-op,
//! so library users and tests never need a registry.

use prometheus::{
    register_counter, register_counter_vec, register_histogram_vec, Counter, CounterVec, Encoder,
    HistogramVec, TextEncoder,
};
use std::sync::OnceLock;

// ============================================================================
// Metrics Storage
// ============================================================================

/// Container for all engine metrics
struct EngineMetrics {
    generation_attempts: HistogramVec,
    assignments: CounterVec,
    infeasible: CounterVec,
    reshuffles: Counter,
}

/// Global storage for engine metrics
static ENGINE_METRICS: OnceLock<EngineMetrics> = OnceLock::new();

/// Flag to track if initialization was attempted
static METRICS_INIT_ATTEMPTED: OnceLock<bool> = OnceLock::new();

// ============================================================================
// Initialization
// ============================================================================

/// Initialize all Prometheus metrics
///
/// Safe to call more than once; only the first call registers anything.
pub fn init_metrics() -> Result<(), Box<dyn std::error::Error>> {
    if METRICS_INIT_ATTEMPTED.get().is_some() {
        return Ok(());
    }
    METRICS_INIT_ATTEMPTED.set(true).ok();

    let engine = EngineMetrics {
        generation_attempts: register_histogram_vec!(
            "whiterabbit_generation_attempts",
            "Partitions drawn before one passed the separation check",
            &["players"],
            vec![1.0, 5.0, 10.0, 50.0, 100.0, 500.0, 1000.0, 5000.0, 10000.0, 50000.0]
        )?,
        assignments: register_counter_vec!(
            "whiterabbit_assignments_total",
            "Total clue assignments generated",
            &["players"]
        )?,
        infeasible: register_counter_vec!(
            "whiterabbit_generation_infeasible_total",
            "Partition searches that hit the attempt cap",
            &["players"]
        )?,
        reshuffles: register_counter!(
            "whiterabbit_reveal_reshuffles_total",
            "Total reveal variant reshuffles"
        )?,
    };

    ENGINE_METRICS
        .set(engine)
        .map_err(|_| "Engine metrics already initialized")?;

    tracing::info!("Prometheus metrics initialized successfully");
    Ok(())
}

/// Check if metrics have been initialized
pub fn metrics_initialized() -> bool {
    ENGINE_METRICS.get().is_some()
}

// ============================================================================
// Helper Functions
// ============================================================================

/// Encode all metrics to Prometheus text format
pub fn encode_metrics() -> Result<String, Box<dyn std::error::Error>> {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

/// Record a successful partition search
pub fn record_generation(player_count: usize, attempts: u64) {
    if let Some(m) = ENGINE_METRICS.get() {
        m.generation_attempts
            .with_label_values(&[player_count.to_string().as_str()])
            .observe(attempts as f64);
    }
}

/// Record a search abandoned at the attempt cap
pub fn record_infeasible(player_count: usize) {
    if let Some(m) = ENGINE_METRICS.get() {
        m.infeasible
            .with_label_values(&[player_count.to_string().as_str()])
            .inc();
    }
}

/// Record a committed assignment
pub fn record_assignment(player_count: usize) {
    if let Some(m) = ENGINE_METRICS.get() {
        m.assignments
            .with_label_values(&[player_count.to_string().as_str()])
            .inc();
    }
}

/// Record a reveal reshuffle
pub fn record_reshuffle() {
    if let Some(m) = ENGINE_METRICS.get() {
        m.reshuffles.inc();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_functions_are_safe_without_init() {
        // Must not panic whether or not another test initialized metrics
        record_generation(3, 12);
        record_infeasible(3);
        record_assignment(4);
        record_reshuffle();
    }

    #[test]
    fn test_init_is_idempotent() {
        assert!(init_metrics().is_ok());
        assert!(init_metrics().is_ok());
        assert!(metrics_initialized());

        record_assignment(5);
        let text = encode_metrics().unwrap();
        assert!(text.contains("whiterabbit_assignments_total"));
    }
}
