//! In-memory sink that keeps every event, for tests and previews.

use chrono::{DateTime, Utc};
use std::sync::Mutex;

use homerow_core::telemetry::{TelemetryEvent, TelemetrySink};

/// An event plus the time it was recorded.
#[derive(Debug, Clone)]
pub struct RecordedEvent {
    pub at: DateTime<Utc>,
    pub event: TelemetryEvent,
}

/// Sink that appends events to an in-memory list.
#[derive(Default)]
pub struct RecordingTelemetry {
    records: Mutex<Vec<RecordedEvent>>,
}

impl RecordingTelemetry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    pub fn events(&self) -> Vec<TelemetryEvent> {
        self.records().into_iter().map(|r| r.event).collect()
    }

    pub fn records(&self) -> Vec<RecordedEvent> {
        self.records
            .lock()
            .map(|records| records.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.records.lock().map(|r| r.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut records) = self.records.lock() {
            records.clear();
        }
    }

    /// Export as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        let events: Vec<serde_json::Value> = self
            .records()
            .into_iter()
            .map(|r| {
                let mut value = match &r.event {
                    TelemetryEvent::ContentClick { id }
                    | TelemetryEvent::ContentImpression { id } => serde_json::json!({ "id": id }),
                    TelemetryEvent::HomeTileClick { tile_id, source } => serde_json::json!({
                        "tile_id": tile_id,
                        "source": source,
                    }),
                };
                value["event"] = serde_json::json!(r.event.name());
                value["at"] = serde_json::json!(r.at.to_rfc3339());
                value
            })
            .collect();
        serde_json::Value::Array(events)
    }
}

impl TelemetrySink for RecordingTelemetry {
    fn record(&self, event: TelemetryEvent) {
        // A poisoned lock only loses this event.
        if let Ok(mut records) = self.records.lock() {
            records.push(RecordedEvent {
                at: Utc::now(),
                event,
            });
        }
    }

    fn name(&self) -> &str {
        "recording"
    }
}
