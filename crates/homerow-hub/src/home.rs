//! Home screen assembly — one config per channel kind, built together.

use serde::Serialize;
use std::sync::Arc;

use homerow_core::channel::{
    is_channel_enabled, ChannelConfig, ChannelContext, ChannelKind, ChannelSettings,
};
use homerow_core::config::HomeRowConfig;
use homerow_core::experiment::ExperimentProvider;
use homerow_core::locale::{permits, LocaleSource};
use homerow_core::telemetry::TelemetrySink;

use crate::experiments::{OverrideExperiments, StaticExperiments};
use crate::locale::{EnvLocale, FixedLocale};
use crate::telemetry::create_sink;

/// Build a [`ChannelContext`] from configuration.
///
/// Experiments come from the `[experiments]` table. The device locale is
/// `device.locale` when set, otherwise the process environment.
pub fn context_from_config(config: &HomeRowConfig) -> ChannelContext {
    context_with_overrides(config, StaticExperiments::new(), create_sink(&config.telemetry))
}

/// Like [`context_from_config`], with local flag `overrides` layered over the
/// `[experiments]` table and an explicit telemetry sink.
pub fn context_with_overrides(
    config: &HomeRowConfig,
    overrides: StaticExperiments,
    telemetry: Arc<dyn TelemetrySink>,
) -> ChannelContext {
    let locale: Arc<dyn LocaleSource> = match config.device.locale.as_deref() {
        Some(tag) => Arc::new(FixedLocale::parse(tag)),
        None => Arc::new(EnvLocale),
    };
    let base: Arc<dyn ExperimentProvider> =
        Arc::new(StaticExperiments::from_table(&config.experiments));
    let experiments: Arc<dyn ExperimentProvider> = if overrides.is_empty() {
        base
    } else {
        Arc::new(OverrideExperiments::new(overrides, base))
    };
    ChannelContext::new(experiments, telemetry, locale)
        .with_settings(ChannelSettings::from(&config.channels))
}

/// Visibility report for one channel.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelStatus {
    pub kind: ChannelKind,
    pub experiment_enabled: bool,
    pub locale_permitted: bool,
    pub enabled: bool,
    pub items_removable: bool,
    pub locale_policy: String,
}

/// Every channel for one screen session.
///
/// Configs are built once in [`HomeScreen::build`] and dropped with the
/// screen.
pub struct HomeScreen {
    channels: Vec<ChannelConfig>,
    locale: Arc<dyn LocaleSource>,
}

impl HomeScreen {
    pub fn build(ctx: &ChannelContext) -> Self {
        let channels: Vec<ChannelConfig> = ChannelKind::ALL
            .iter()
            .map(|kind| ChannelConfig::for_kind(*kind, ctx))
            .collect();
        tracing::debug!(count = channels.len(), "Home screen channels built");
        Self {
            channels,
            locale: Arc::clone(&ctx.locale),
        }
    }

    /// All channels in display order, visible or not.
    pub fn channels(&self) -> &[ChannelConfig] {
        &self.channels
    }

    pub fn config(&self, kind: ChannelKind) -> Option<&ChannelConfig> {
        self.channels.iter().find(|c| c.kind() == kind)
    }

    pub fn is_visible(&self, kind: ChannelKind) -> bool {
        self.config(kind)
            .is_some_and(|config| is_channel_enabled(config, self.locale.as_ref()))
    }

    /// Channels the renderer should show, in display order.
    pub fn visible_channels(&self) -> Vec<&ChannelConfig> {
        let device = self.locale.current_device_locale();
        self.channels
            .iter()
            .filter(|config| config.is_enabled_for(device.as_ref()))
            .collect()
    }

    pub fn status(&self) -> Vec<ChannelStatus> {
        let device = self.locale.current_device_locale();
        self.channels
            .iter()
            .map(|config| {
                let locale_permitted = permits(config.locale_policy(), device.as_ref());
                ChannelStatus {
                    kind: config.kind(),
                    experiment_enabled: config.experiment_enabled(),
                    locale_permitted,
                    enabled: config.experiment_enabled() && locale_permitted,
                    items_removable: config.items_removable(),
                    locale_policy: config.locale_policy().to_string(),
                }
            })
            .collect()
    }
}
