// Path: crates/telemetry/src/time.rs
use crate::sinks::GateMetricsSink;
use std::time::Instant;

/// Reports the time between its creation and drop as a verification duration.
pub struct Timer<'a> {
    sink: &'a dyn GateMetricsSink,
    start: Instant,
}

impl<'a> Timer<'a> {
    pub fn new(sink: &'a dyn GateMetricsSink) -> Self {
        Self {
            sink,
            start: Instant::now(),
        }
    }
}

impl Drop for Timer<'_> {
    fn drop(&mut self) {
        self.sink
            .observe_verification_duration(self.start.elapsed().as_secs_f64());
    }
}
