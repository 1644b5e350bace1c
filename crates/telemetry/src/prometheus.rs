// Path: crates/telemetry/src/prometheus.rs
//! A concrete implementation of the metrics sinks using the Prometheus crate.

use crate::sinks::*;
use once_cell::sync::OnceCell;
use prometheus::{
    exponential_buckets, register_histogram, register_int_counter_vec, register_int_gauge,
    Encoder, Histogram, IntCounterVec, IntGauge, TextEncoder,
};

// --- Metric Statics ---
// The collectors are registered with the default registry exactly once by `install`.

struct GateCollectors {
    submissions_total: IntCounterVec,
    discarded_votes_total: IntCounterVec,
    verification_duration_seconds: Histogram,
    current_round: IntGauge,
    errors_total: IntCounterVec,
}

static COLLECTORS: OnceCell<GateCollectors> = OnceCell::new();

#[derive(Debug, Clone, Copy)]
pub struct PrometheusSink;

impl GateMetricsSink for PrometheusSink {
    fn inc_submissions(&self, outcome: &'static str) {
        if let Some(c) = COLLECTORS.get() {
            c.submissions_total.with_label_values(&[outcome]).inc();
        }
    }
    fn inc_discarded_votes(&self, verdict: &'static str) {
        if let Some(c) = COLLECTORS.get() {
            c.discarded_votes_total.with_label_values(&[verdict]).inc();
        }
    }
    fn observe_verification_duration(&self, duration_secs: f64) {
        if let Some(c) = COLLECTORS.get() {
            c.verification_duration_seconds.observe(duration_secs);
        }
    }
    fn set_current_round(&self, round: u64) {
        if let Some(c) = COLLECTORS.get() {
            c.current_round.set(i64::try_from(round).unwrap_or(i64::MAX));
        }
    }
}

impl ErrorMetricsSink for PrometheusSink {
    fn inc_error(&self, kind: &'static str, variant: &'static str) {
        if let Some(c) = COLLECTORS.get() {
            c.errors_total.with_label_values(&[kind, variant]).inc();
        }
    }
}

fn register_collectors() -> Result<GateCollectors, prometheus::Error> {
    Ok(GateCollectors {
        submissions_total: register_int_counter_vec!(
            "council_gate_submissions_total",
            "Total decided submissions, by outcome.",
            &["outcome"]
        )?,
        discarded_votes_total: register_int_counter_vec!(
            "council_gate_discarded_votes_total",
            "Total votes that did not count toward quorum, by verdict.",
            &["verdict"]
        )?,
        verification_duration_seconds: register_histogram!(
            "council_gate_verification_duration_seconds",
            "Latency of one batch signature verification.",
            exponential_buckets(0.0001, 2.0, 16)?
        )?,
        current_round: register_int_gauge!(
            "council_gate_current_round",
            "The gate's current round."
        )?,
        errors_total: register_int_counter_vec!(
            "council_errors_total",
            "Total number of errors, categorized by type and variant.",
            &["kind", "variant"]
        )?,
    })
}

/// Registers the Prometheus collectors and makes `PrometheusSink` the global sink.
///
/// Repeated calls return the already installed sink.
pub fn install() -> Result<&'static dyn MetricsSink, prometheus::Error> {
    static PROMETHEUS_SINK: PrometheusSink = PrometheusSink;
    COLLECTORS.get_or_try_init(register_collectors)?;
    let sink: &'static dyn MetricsSink = &PROMETHEUS_SINK;
    // A sink installed earlier by someone else keeps precedence.
    let _ = SINK.set(sink);
    Ok(sink)
}

/// Renders every metric in the default registry in the text exposition format.
pub fn gather_text() -> Result<String, anyhow::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}
