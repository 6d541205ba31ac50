//! Channel configuration — per-type visibility gates and telemetry hooks.
//!
//! Each channel type has a factory that takes a [`ChannelContext`] and
//! returns an immutable [`ChannelConfig`]. The renderer later calls the
//! bound hooks on user interaction and asks [`is_channel_enabled`] before
//! showing the row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::config::{default_guide_feature, ChannelsSection};
use crate::error::HomeRowError;
use crate::experiment::{feature_or_disabled, ExperimentProvider};
use crate::locale::{permits, Locale, LocalePolicy, LocaleSource};
use crate::telemetry::TelemetrySink;
use crate::tile::ChannelTile;

/// Hook for click and long-click interactions.
pub type ClickHook = Arc<dyn Fn(&ChannelTile) + Send + Sync>;

/// Hook for focus changes. The flag is `true` when focus was gained.
pub type FocusHook = Arc<dyn Fn(&ChannelTile, bool) + Send + Sync>;

/// Channel types shown on the home screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelKind {
    /// Curated recommendation feed.
    #[serde(rename = "curated")]
    CuratedContent,
    /// User-pinned shortcuts.
    #[serde(rename = "pinned")]
    PinnedTiles,
    /// TV guide feed.
    #[serde(rename = "guide")]
    TvGuide,
}

impl ChannelKind {
    /// Every channel kind, in home screen order.
    pub const ALL: [ChannelKind; 3] = [Self::PinnedTiles, Self::CuratedContent, Self::TvGuide];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CuratedContent => "curated",
            Self::PinnedTiles => "pinned",
            Self::TvGuide => "guide",
        }
    }
}

impl fmt::Display for ChannelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChannelKind {
    type Err = HomeRowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "curated" | "curated_content" | "pocket" => Ok(Self::CuratedContent),
            "pinned" | "pinned_tiles" => Ok(Self::PinnedTiles),
            "guide" | "tv_guide" => Ok(Self::TvGuide),
            other => Err(HomeRowError::UnknownChannel(other.to_string())),
        }
    }
}

/// When the curated content channel records impressions.
///
/// Older builds recorded an impression on every focus change, losses
/// included. `OnGain` counts only focus gains; `EveryChange` keeps the old
/// numbers comparable for dashboards that need continuity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FocusImpressionPolicy {
    #[default]
    OnGain,
    EveryChange,
}

impl FocusImpressionPolicy {
    fn should_record(&self, gained: bool) -> bool {
        match self {
            Self::OnGain => gained,
            Self::EveryChange => true,
        }
    }
}

/// Tunables read by the channel factories.
///
/// Reference locales are not tunable: curated content is always `en` and
/// the guide always `en-US`.
#[derive(Debug, Clone)]
pub struct ChannelSettings {
    pub focus_impressions: FocusImpressionPolicy,
    /// Feature flag queried for the TV guide channel.
    pub guide_feature: String,
}

impl Default for ChannelSettings {
    fn default() -> Self {
        Self {
            focus_impressions: FocusImpressionPolicy::default(),
            guide_feature: default_guide_feature(),
        }
    }
}

impl From<&ChannelsSection> for ChannelSettings {
    fn from(section: &ChannelsSection) -> Self {
        Self {
            focus_impressions: section.focus_impressions,
            guide_feature: section.guide_feature.clone(),
        }
    }
}

/// Collaborators handed to every channel factory.
#[derive(Clone)]
pub struct ChannelContext {
    pub experiments: Arc<dyn ExperimentProvider>,
    pub telemetry: Arc<dyn TelemetrySink>,
    pub locale: Arc<dyn LocaleSource>,
    pub settings: ChannelSettings,
}

impl ChannelContext {
    pub fn new(
        experiments: Arc<dyn ExperimentProvider>,
        telemetry: Arc<dyn TelemetrySink>,
        locale: Arc<dyn LocaleSource>,
    ) -> Self {
        Self {
            experiments,
            telemetry,
            locale,
            settings: ChannelSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: ChannelSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// Immutable per-channel configuration.
#[derive(Clone)]
pub struct ChannelConfig {
    kind: ChannelKind,
    on_click: Option<ClickHook>,
    on_long_click: Option<ClickHook>,
    on_focus_change: Option<FocusHook>,
    items_removable: bool,
    experiment_enabled: bool,
    locale_policy: LocalePolicy,
}

impl ChannelConfig {
    /// Curated recommendations: English only, tiles cannot be dismissed.
    ///
    /// A click records the content click before the generic home tile
    /// click. Impressions follow [`ChannelSettings::focus_impressions`].
    pub fn curated_content(ctx: &ChannelContext) -> Self {
        let click_sink = Arc::clone(&ctx.telemetry);
        let focus_sink = Arc::clone(&ctx.telemetry);
        let policy = ctx.settings.focus_impressions;

        let on_click: ClickHook = Arc::new(move |tile: &ChannelTile| {
            click_sink.record_content_click(&tile.id);
            click_sink.record_home_tile_click(tile);
        });
        let on_focus_change: FocusHook = Arc::new(move |tile: &ChannelTile, gained: bool| {
            if policy.should_record(gained) {
                focus_sink.record_content_impression(&tile.id);
            }
        });

        Self::build(
            ChannelKind::CuratedContent,
            Some(on_click),
            Some(on_focus_change),
            false,
            true,
            LocalePolicy::RestrictedTo(Locale::english()),
        )
    }

    /// User-pinned shortcuts: everywhere, removable.
    pub fn pinned_tiles(ctx: &ChannelContext) -> Self {
        Self::build(
            ChannelKind::PinnedTiles,
            Some(home_tile_click(&ctx.telemetry)),
            None,
            true,
            true,
            LocalePolicy::AllLocales,
        )
    }

    /// TV guide: gated on the guide feature flag and the guide locale.
    pub fn tv_guide(ctx: &ChannelContext) -> Self {
        let experiment_enabled =
            feature_or_disabled(ctx.experiments.as_ref(), &ctx.settings.guide_feature);

        Self::build(
            ChannelKind::TvGuide,
            Some(home_tile_click(&ctx.telemetry)),
            None,
            true,
            experiment_enabled,
            LocalePolicy::RestrictedTo(Locale::us()),
        )
    }

    /// Dispatch to the factory for `kind`.
    pub fn for_kind(kind: ChannelKind, ctx: &ChannelContext) -> Self {
        match kind {
            ChannelKind::CuratedContent => Self::curated_content(ctx),
            ChannelKind::PinnedTiles => Self::pinned_tiles(ctx),
            ChannelKind::TvGuide => Self::tv_guide(ctx),
        }
    }

    fn build(
        kind: ChannelKind,
        on_click: Option<ClickHook>,
        on_focus_change: Option<FocusHook>,
        items_removable: bool,
        experiment_enabled: bool,
        locale_policy: LocalePolicy,
    ) -> Self {
        tracing::debug!(
            channel = %kind,
            experiment_enabled,
            items_removable,
            policy = ?locale_policy,
            "Built channel config"
        );
        Self {
            kind,
            on_click,
            // No channel records long clicks yet.
            on_long_click: None,
            on_focus_change,
            items_removable,
            experiment_enabled,
            locale_policy,
        }
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    pub fn on_click(&self) -> Option<&ClickHook> {
        self.on_click.as_ref()
    }

    pub fn on_long_click(&self) -> Option<&ClickHook> {
        self.on_long_click.as_ref()
    }

    pub fn on_focus_change(&self) -> Option<&FocusHook> {
        self.on_focus_change.as_ref()
    }

    /// Whether the renderer may offer per-tile dismissal.
    pub fn items_removable(&self) -> bool {
        self.items_removable
    }

    /// Experiment state captured when the config was built.
    pub fn experiment_enabled(&self) -> bool {
        self.experiment_enabled
    }

    pub fn locale_policy(&self) -> &LocalePolicy {
        &self.locale_policy
    }

    /// Run the click hook. Returns `false` if there is none.
    pub fn click(&self, tile: &ChannelTile) -> bool {
        invoke(self.on_click.as_ref(), |hook| hook(tile))
    }

    /// Run the long-click hook. Returns `false` if there is none.
    pub fn long_click(&self, tile: &ChannelTile) -> bool {
        invoke(self.on_long_click.as_ref(), |hook| hook(tile))
    }

    /// Run the focus hook. Returns `false` if there is none.
    pub fn focus_changed(&self, tile: &ChannelTile, gained: bool) -> bool {
        invoke(self.on_focus_change.as_ref(), |hook| hook(tile, gained))
    }

    /// Experiment flag AND locale gate for an already-resolved locale.
    pub fn is_enabled_for(&self, device: Option<&Locale>) -> bool {
        self.experiment_enabled && permits(&self.locale_policy, device)
    }
}

impl fmt::Debug for ChannelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChannelConfig")
            .field("kind", &self.kind)
            .field("on_click", &self.on_click.is_some())
            .field("on_long_click", &self.on_long_click.is_some())
            .field("on_focus_change", &self.on_focus_change.is_some())
            .field("items_removable", &self.items_removable)
            .field("experiment_enabled", &self.experiment_enabled)
            .field("locale_policy", &self.locale_policy)
            .finish()
    }
}

fn home_tile_click(sink: &Arc<dyn TelemetrySink>) -> ClickHook {
    let sink = Arc::clone(sink);
    Arc::new(move |tile: &ChannelTile| sink.record_home_tile_click(tile))
}

fn invoke<H: ?Sized>(hook: Option<&Arc<H>>, call: impl FnOnce(&H)) -> bool {
    match hook {
        Some(hook) => {
            call(hook);
            true
        }
        None => false,
    }
}

/// Whether the renderer should show `config` on this device right now.
pub fn is_channel_enabled(config: &ChannelConfig, locale: &dyn LocaleSource) -> bool {
    config.is_enabled_for(locale.current_device_locale().as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::telemetry::TelemetryEvent;
    use crate::tile::TileSource;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<TelemetryEvent>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<TelemetryEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl TelemetrySink for Recorder {
        fn record(&self, event: TelemetryEvent) {
            self.events.lock().unwrap().push(event);
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    struct Flags(HashMap<String, bool>);

    impl ExperimentProvider for Flags {
        fn is_feature_enabled(&self, feature: &str) -> Result<bool> {
            Ok(self.0.get(feature).copied().unwrap_or(false))
        }
    }

    struct Unreachable;

    impl ExperimentProvider for Unreachable {
        fn is_feature_enabled(&self, _feature: &str) -> Result<bool> {
            Err(HomeRowError::ExperimentUnavailable("offline".into()))
        }
    }

    struct Device(Option<Locale>);

    impl LocaleSource for Device {
        fn current_device_locale(&self) -> Option<Locale> {
            self.0.clone()
        }
    }

    fn context(guide_flag: bool) -> (ChannelContext, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let flags = Flags(HashMap::from([("tv_guide_channels".to_string(), guide_flag)]));
        let ctx = ChannelContext::new(
            Arc::new(flags),
            recorder.clone(),
            Arc::new(Device(Some(Locale::us()))),
        );
        (ctx, recorder)
    }

    fn tile(id: &str) -> ChannelTile {
        ChannelTile::new(id, TileSource::CuratedContent)
    }

    #[test]
    fn test_curated_content_flags() {
        let (ctx, _) = context(true);
        let guide_off = context(false).0;
        let offline = ChannelContext {
            experiments: Arc::new(Unreachable),
            locale: Arc::new(Device(None)),
            ..ctx.clone()
        };
        let french = ChannelContext {
            locale: Arc::new(Device(Some(Locale::new("fr", Some("FR"))))),
            ..ctx.clone()
        };

        for ctx in [ctx, guide_off, offline, french] {
            let config = ChannelConfig::curated_content(&ctx);
            assert!(config.experiment_enabled());
            assert!(!config.items_removable());
            assert_eq!(
                config.locale_policy(),
                &LocalePolicy::RestrictedTo(Locale::english())
            );
            assert!(config.on_long_click().is_none());
        }
    }

    #[test]
    fn test_reference_locales_are_fixed_and_distinct() {
        let (ctx, _) = context(true);
        let ctx = ctx.with_settings(ChannelSettings {
            focus_impressions: FocusImpressionPolicy::EveryChange,
            guide_feature: "guide_rollout_b".into(),
        });
        let curated = ChannelConfig::curated_content(&ctx);
        let guide = ChannelConfig::tv_guide(&ctx);
        assert_eq!(
            curated.locale_policy(),
            &LocalePolicy::RestrictedTo(Locale::english())
        );
        assert_eq!(guide.locale_policy(), &LocalePolicy::RestrictedTo(Locale::us()));
        assert_ne!(curated.locale_policy(), guide.locale_policy());
    }

    #[test]
    fn test_curated_click_emits_content_then_home_tile() {
        let (ctx, recorder) = context(false);
        let config = ChannelConfig::curated_content(&ctx);

        assert!(config.click(&tile("vid-42")));
        assert_eq!(
            recorder.events(),
            vec![
                TelemetryEvent::ContentClick {
                    id: "vid-42".into()
                },
                TelemetryEvent::HomeTileClick {
                    tile_id: "vid-42".into(),
                    source: TileSource::CuratedContent,
                },
            ]
        );
    }

    #[test]
    fn test_curated_focus_records_only_on_gain_by_default() {
        let (ctx, recorder) = context(false);
        let config = ChannelConfig::curated_content(&ctx);

        assert!(config.focus_changed(&tile("vid-7"), true));
        assert_eq!(
            recorder.events(),
            vec![TelemetryEvent::ContentImpression { id: "vid-7".into() }]
        );

        // Losing focus runs the hook but records nothing.
        assert!(config.focus_changed(&tile("vid-7"), false));
        assert_eq!(recorder.events().len(), 1);
    }

    #[test]
    fn test_curated_focus_every_change_policy() {
        let (ctx, recorder) = context(false);
        let ctx = ctx.with_settings(ChannelSettings {
            focus_impressions: FocusImpressionPolicy::EveryChange,
            ..ChannelSettings::default()
        });
        let config = ChannelConfig::curated_content(&ctx);

        config.focus_changed(&tile("vid-7"), true);
        config.focus_changed(&tile("vid-7"), false);
        assert_eq!(
            recorder.events(),
            vec![
                TelemetryEvent::ContentImpression { id: "vid-7".into() },
                TelemetryEvent::ContentImpression { id: "vid-7".into() },
            ]
        );
    }

    #[test]
    fn test_pinned_tiles_config() {
        let (ctx, recorder) = context(false);
        let config = ChannelConfig::pinned_tiles(&ctx);
        assert!(config.experiment_enabled());
        assert!(config.items_removable());
        assert_eq!(config.locale_policy(), &LocalePolicy::AllLocales);
        assert!(config.on_focus_change().is_none());
        assert!(config.on_long_click().is_none());

        let pinned = ChannelTile::new("youtube", TileSource::Bundled);
        assert!(config.click(&pinned));
        assert_eq!(
            recorder.events(),
            vec![TelemetryEvent::HomeTileClick {
                tile_id: "youtube".into(),
                source: TileSource::Bundled,
            }]
        );
    }

    #[test]
    fn test_guide_follows_experiment_flag() {
        let (ctx, _) = context(true);
        assert!(ChannelConfig::tv_guide(&ctx).experiment_enabled());

        let (ctx, _) = context(false);
        let config = ChannelConfig::tv_guide(&ctx);
        assert!(!config.experiment_enabled());
        assert!(config.items_removable());
        assert_eq!(
            config.locale_policy(),
            &LocalePolicy::RestrictedTo(Locale::us())
        );
    }

    #[test]
    fn test_guide_uses_configured_feature_name() {
        let (ctx, _) = context(true);
        let ctx = ctx.with_settings(ChannelSettings {
            guide_feature: "guide_rollout_b".into(),
            ..ChannelSettings::default()
        });
        assert!(!ChannelConfig::tv_guide(&ctx).experiment_enabled());
    }

    #[test]
    fn test_guide_fails_closed_when_provider_unreachable() {
        let (ctx, _) = context(true);
        let ctx = ChannelContext {
            experiments: Arc::new(Unreachable),
            ..ctx
        };
        assert!(!ChannelConfig::tv_guide(&ctx).experiment_enabled());
    }

    #[test]
    fn test_guide_click_emits_single_home_tile_event() {
        let (ctx, recorder) = context(true);
        let config = ChannelConfig::tv_guide(&ctx);
        assert!(config.click(&ChannelTile::new("news-1", TileSource::Guide)));
        assert_eq!(recorder.events().len(), 1);
        assert!(matches!(
            recorder.events()[0],
            TelemetryEvent::HomeTileClick { .. }
        ));
    }

    #[test]
    fn test_missing_hooks_are_noops() {
        let (ctx, recorder) = context(true);
        for config in [ChannelConfig::pinned_tiles(&ctx), ChannelConfig::tv_guide(&ctx)] {
            assert!(!config.focus_changed(&tile("x"), true));
            assert!(!config.long_click(&tile("x")));
        }
        assert!(recorder.events().is_empty());
    }

    #[test]
    fn test_is_channel_enabled_requires_both_gates() {
        let (ctx, _) = context(false);
        let us = Device(Some(Locale::us()));
        let france = Device(Some(Locale::new("fr", Some("FR"))));
        let unknown = Device(None);

        // Experiment off, locale ok.
        let guide = ChannelConfig::tv_guide(&ctx);
        assert!(!is_channel_enabled(&guide, &us));

        // Experiment on, locale ok / denied / unknown.
        let curated = ChannelConfig::curated_content(&ctx);
        assert!(is_channel_enabled(&curated, &us));
        assert!(!is_channel_enabled(&curated, &france));
        assert!(!is_channel_enabled(&curated, &unknown));

        // Experiment on, all locales.
        let pinned = ChannelConfig::pinned_tiles(&ctx);
        assert!(is_channel_enabled(&pinned, &france));
        assert!(is_channel_enabled(&pinned, &unknown));

        let (ctx, _) = context(true);
        let guide = ChannelConfig::tv_guide(&ctx);
        assert!(is_channel_enabled(&guide, &us));
        assert!(!is_channel_enabled(&guide, &Device(Some(Locale::new("en", Some("GB"))))));
    }

    #[test]
    fn test_for_kind_dispatch() {
        let (ctx, _) = context(true);
        for kind in ChannelKind::ALL {
            assert_eq!(ChannelConfig::for_kind(kind, &ctx).kind(), kind);
        }
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("guide".parse::<ChannelKind>().unwrap(), ChannelKind::TvGuide);
        assert_eq!(
            "Curated".parse::<ChannelKind>().unwrap(),
            ChannelKind::CuratedContent
        );
        assert!(matches!(
            "weather".parse::<ChannelKind>(),
            Err(HomeRowError::UnknownChannel(_))
        ));
    }
}
