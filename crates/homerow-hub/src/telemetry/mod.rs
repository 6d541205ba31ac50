//! Telemetry backends for channel hooks.
//!
//! | Backend     | Description |
//! |-------------|-------------|
//! | `noop`      | Discards everything |
//! | `log`       | Emits structured events via `tracing` |
//! | `multi`     | Fan-out to several sinks |
//! | `queued`    | Non-blocking wrapper around any sink |
//! | `recording` | In-memory, for tests and previews |
//!
//! [`create_sink`] builds the configured backend.

mod log;
mod multi;
mod noop;
mod queued;
mod recording;

pub use self::log::LogTelemetry;
pub use self::multi::MultiTelemetry;
pub use self::noop::NoopTelemetry;
pub use self::queued::QueuedTelemetry;
pub use self::recording::{RecordedEvent, RecordingTelemetry};

use std::sync::Arc;

use homerow_core::config::TelemetrySection;
use homerow_core::telemetry::TelemetrySink;

/// Build the base backend named in `config`.
///
/// "log" gives a [`LogTelemetry`]; "none", "noop" and unknown names give a
/// [`NoopTelemetry`].
pub fn create_backend(config: &TelemetrySection) -> Arc<dyn TelemetrySink> {
    match config.backend.as_str() {
        "log" => Arc::new(LogTelemetry),
        "none" | "noop" => Arc::new(NoopTelemetry),
        other => {
            tracing::warn!(backend = other, "Unknown telemetry backend, using noop");
            Arc::new(NoopTelemetry)
        }
    }
}

/// Build the configured sink, queued when `queue_capacity > 0` and a tokio
/// runtime is available. Without a runtime events are recorded inline.
pub fn create_sink(config: &TelemetrySection) -> Arc<dyn TelemetrySink> {
    let backend = create_backend(config);
    if config.queue_capacity == 0 || backend.name() == "noop" {
        return backend;
    }
    match tokio::runtime::Handle::try_current() {
        Ok(_) => {
            // Detached: dropping the last sink drains the queue and stops the task.
            let (queued, _handle) = QueuedTelemetry::spawn(backend, config.queue_capacity);
            Arc::new(queued)
        }
        Err(_) => {
            tracing::warn!("No tokio runtime, telemetry will be recorded inline");
            backend
        }
    }
}
