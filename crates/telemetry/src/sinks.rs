// Path: crates/telemetry/src/sinks.rs
//! Defines abstract traits for metrics reporting, decoupling core logic from the backend.

use once_cell::sync::OnceCell;

// --- Static Sink Access ---

/// A no-op sink for use in tests or when telemetry is disabled.
#[derive(Debug, Clone, Copy)]
pub struct NopSink;

/// A lazily-initialized static reference to the global `MetricsSink` implementation.
pub static SINK: OnceCell<&'static dyn MetricsSink> = OnceCell::new();
static NOP_SINK: NopSink = NopSink;

/// Returns a static reference to the configured error metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn error_metrics() -> &'static dyn ErrorMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

/// Returns a static reference to the configured gate metrics sink.
/// If no sink has been initialized, it returns a no-op sink.
pub fn gate_metrics() -> &'static dyn GateMetricsSink {
    SINK.get().copied().unwrap_or(&NOP_SINK)
}

// --- Trait Definitions ---

/// A sink for metrics related to the master gate.
pub trait GateMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for decided submissions, labeled by outcome
    /// (`executed`, `stale_round`, `insufficient_quorum`).
    fn inc_submissions(&self, outcome: &'static str);
    /// Increments a counter for votes that did not count, labeled by verdict.
    fn inc_discarded_votes(&self, verdict: &'static str);
    /// Observes the wall-clock duration of one batch signature verification.
    fn observe_verification_duration(&self, duration_secs: f64);
    /// Sets the gauge tracking the gate's current round.
    fn set_current_round(&self, round: u64);
}
impl GateMetricsSink for NopSink {
    fn inc_submissions(&self, _outcome: &'static str) {}
    fn inc_discarded_votes(&self, _verdict: &'static str) {}
    fn observe_verification_duration(&self, _duration_secs: f64) {}
    fn set_current_round(&self, _round: u64) {}
}

/// A sink for recording structured error metrics.
pub trait ErrorMetricsSink: Send + Sync + std::fmt::Debug {
    /// Increments a counter for a specific error, categorized by its kind and variant.
    fn inc_error(&self, kind: &'static str, variant: &'static str);
}
impl ErrorMetricsSink for NopSink {
    fn inc_error(&self, _kind: &'static str, _variant: &'static str) {}
}

/// A unified sink that implements all domain-specific traits, providing a single
/// point of implementation for metrics backends like Prometheus.
pub trait MetricsSink: GateMetricsSink + ErrorMetricsSink {}

// Blanket implementation to allow any type that implements all sub-traits
// to be used as a `MetricsSink`.
impl<T> MetricsSink for T where T: GateMetricsSink + ErrorMetricsSink {}
