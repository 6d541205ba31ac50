//! Telemetry sink trait — where channel hooks send analytics events.

use crate::tile::{ChannelTile, TileSource};

/// Analytics events emitted by channel hooks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelemetryEvent {
    /// A curated content tile was clicked.
    ContentClick { id: String },
    /// A curated content tile was shown to the user.
    ContentImpression { id: String },
    /// Any home screen tile was clicked.
    HomeTileClick { tile_id: String, source: TileSource },
}

impl TelemetryEvent {
    /// Stable dotted event name, used by log backends.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ContentClick { .. } => "content.click",
            Self::ContentImpression { .. } => "content.impression",
            Self::HomeTileClick { .. } => "home_tile.click",
        }
    }
}

/// Fire-and-forget analytics sink.
///
/// `record` must not block the caller and must not retry; delivery and
/// failure handling belong to the implementation.
pub trait TelemetrySink: Send + Sync {
    /// Record one event.
    fn record(&self, event: TelemetryEvent);

    /// Flush buffered events. No-op by default.
    fn flush(&self) {}

    /// Backend name (e.g. "noop", "log", "multi").
    fn name(&self) -> &str;

    fn record_content_click(&self, id: &str) {
        self.record(TelemetryEvent::ContentClick { id: id.to_string() });
    }

    fn record_content_impression(&self, id: &str) {
        self.record(TelemetryEvent::ContentImpression { id: id.to_string() });
    }

    fn record_home_tile_click(&self, tile: &ChannelTile) {
        self.record(TelemetryEvent::HomeTileClick {
            tile_id: tile.id.clone(),
            source: tile.source,
        });
    }
}
