//! Channel tiles — the items a renderer passes back into hooks.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a tile came from. Carried into home-tile click telemetry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TileSource {
    /// Shipped with the app.
    Bundled,
    /// Pinned by the user.
    Custom,
    /// From the curated recommendation feed.
    CuratedContent,
    /// From the TV guide feed.
    Guide,
}

impl fmt::Display for TileSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bundled => write!(f, "bundled"),
            Self::Custom => write!(f, "custom"),
            Self::CuratedContent => write!(f, "curated_content"),
            Self::Guide => write!(f, "guide"),
        }
    }
}

/// One item within a channel.
///
/// The core only reads `id` (telemetry correlation) and `source`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelTile {
    pub id: String,
    pub source: TileSource,
}

impl ChannelTile {
    pub fn new(id: &str, source: TileSource) -> Self {
        Self {
            id: id.to_string(),
            source,
        }
    }
}
