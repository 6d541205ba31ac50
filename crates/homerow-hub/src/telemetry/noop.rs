//! Telemetry sink that discards everything.

use homerow_core::telemetry::{TelemetryEvent, TelemetrySink};

/// Sink used when telemetry is disabled.
pub struct NoopTelemetry;

impl TelemetrySink for NoopTelemetry {
    #[inline(always)]
    fn record(&self, _event: TelemetryEvent) {}

    fn name(&self) -> &str {
        "noop"
    }
}
