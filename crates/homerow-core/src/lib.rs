//! # HomeRow Core
//!
//! Channel gating for TV home screens: locale policies, experiment flags,
//! and telemetry hooks bound per channel type. Concrete collaborators
//! (telemetry backends, experiment providers, locale sources) live in
//! `homerow-hub`; this crate only defines the seams and the decisions.

pub mod channel;
pub mod config;
pub mod error;
pub mod experiment;
pub mod locale;
pub mod telemetry;
pub mod tile;

pub use channel::{
    is_channel_enabled, ChannelConfig, ChannelContext, ChannelKind, ChannelSettings, ClickHook,
    FocusHook, FocusImpressionPolicy,
};
pub use config::HomeRowConfig;
pub use error::{HomeRowError, Result};
pub use experiment::ExperimentProvider;
pub use locale::{permits, Locale, LocalePolicy, LocaleSource};
pub use telemetry::{TelemetryEvent, TelemetrySink};
pub use tile::{ChannelTile, TileSource};
