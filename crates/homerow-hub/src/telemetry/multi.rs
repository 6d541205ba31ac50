//! Fan-out sink that dispatches to several backends.

use std::sync::Arc;

use homerow_core::telemetry::{TelemetryEvent, TelemetrySink};

/// Dispatches every event to all inner sinks, in order.
pub struct MultiTelemetry {
    sinks: Vec<Arc<dyn TelemetrySink>>,
}

impl MultiTelemetry {
    /// An empty list behaves like a noop.
    pub fn new(sinks: Vec<Arc<dyn TelemetrySink>>) -> Self {
        Self { sinks }
    }
}

impl TelemetrySink for MultiTelemetry {
    fn record(&self, event: TelemetryEvent) {
        for sink in &self.sinks {
            sink.record(event.clone());
        }
    }

    fn flush(&self) {
        for sink in &self.sinks {
            sink.flush();
        }
    }

    fn name(&self) -> &str {
        "multi"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::RecordingTelemetry;

    #[test]
    fn fans_out_to_every_sink() {
        let a = Arc::new(RecordingTelemetry::new());
        let b = Arc::new(RecordingTelemetry::new());
        let multi = MultiTelemetry::new(vec![a.clone() as Arc<dyn TelemetrySink>, b.clone()]);

        multi.record_content_click("vid-9");
        multi.record_content_impression("vid-9");

        assert_eq!(a.events(), b.events());
        assert_eq!(a.len(), 2);
    }

    #[test]
    fn empty_is_noop() {
        let multi = MultiTelemetry::new(Vec::new());
        multi.record_content_click("vid-9");
        multi.flush();
        assert_eq!(multi.name(), "multi");
    }
}
