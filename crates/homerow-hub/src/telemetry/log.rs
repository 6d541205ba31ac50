//! Tracing-based sink that emits structured log events.

use homerow_core::telemetry::{TelemetryEvent, TelemetrySink};

/// Sink that logs every event via `tracing`.
pub struct LogTelemetry;

impl TelemetrySink for LogTelemetry {
    fn record(&self, event: TelemetryEvent) {
        match &event {
            TelemetryEvent::ContentClick { id } => {
                tracing::info!(id = id.as_str(), "telemetry: content.click");
            }
            TelemetryEvent::ContentImpression { id } => {
                tracing::info!(id = id.as_str(), "telemetry: content.impression");
            }
            TelemetryEvent::HomeTileClick { tile_id, source } => {
                tracing::info!(
                    tile_id = tile_id.as_str(),
                    source = %source,
                    "telemetry: home_tile.click"
                );
            }
        }
    }

    fn name(&self) -> &str {
        "log"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use homerow_core::tile::{ChannelTile, TileSource};

    #[test]
    fn name_is_log() {
        assert_eq!(LogTelemetry.name(), "log");
    }

    #[test]
    fn record_does_not_panic() {
        let sink = LogTelemetry;
        sink.record_content_click("vid-1");
        sink.record_content_impression("vid-1");
        sink.record_home_tile_click(&ChannelTile::new("youtube", TileSource::Bundled));
        sink.flush();
    }
}
