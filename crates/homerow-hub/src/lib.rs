//! # HomeRow Hub
//!
//! Concrete collaborators for `homerow-core`: telemetry backends,
//! experiment providers, locale sources, and home screen assembly.

pub mod experiments;
pub mod home;
pub mod locale;
pub mod telemetry;

pub use home::{context_from_config, context_with_overrides, ChannelStatus, HomeScreen};
