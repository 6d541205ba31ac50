//! Configuration management for HomeRow.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::channel::FocusImpressionPolicy;
use crate::error::{HomeRowError, Result};

/// Top-level HomeRow configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HomeRowConfig {
    /// Telemetry backend settings.
    #[serde(default)]
    pub telemetry: TelemetrySection,

    /// Channel behaviour settings.
    #[serde(default)]
    pub channels: ChannelsSection,

    /// Static feature flag values, keyed by flag name.
    #[serde(default)]
    pub experiments: BTreeMap<String, bool>,

    /// Device overrides.
    #[serde(default)]
    pub device: DeviceSection,
}

/// Telemetry backend settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySection {
    /// Backend name: "none", "noop", "log".
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Capacity of the non-blocking event queue. 0 = emit inline.
    #[serde(default = "default_queue_capacity")]
    pub queue_capacity: usize,
}

fn default_backend() -> String {
    "log".to_string()
}

fn default_queue_capacity() -> usize {
    256
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            queue_capacity: default_queue_capacity(),
        }
    }
}

/// Channel behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelsSection {
    /// When curated content impressions fire.
    #[serde(default)]
    pub focus_impressions: FocusImpressionPolicy,

    /// Feature flag gating the TV guide channel.
    #[serde(default = "default_guide_feature")]
    pub guide_feature: String,
}

pub(crate) fn default_guide_feature() -> String {
    "tv_guide_channels".to_string()
}

impl Default for ChannelsSection {
    fn default() -> Self {
        Self {
            focus_impressions: FocusImpressionPolicy::default(),
            guide_feature: default_guide_feature(),
        }
    }
}

/// Device overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceSection {
    /// Locale tag that replaces the environment locale (e.g. "en-US").
    pub locale: Option<String>,
}

impl HomeRowConfig {
    /// Load config from a TOML file. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .map_err(|e| HomeRowError::Config(format!("Failed to read config: {}", e)))?;
        Ok(toml::from_str(&content)?)
    }

    /// Save config to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("homerow")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = HomeRowConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.telemetry.backend, "log");
        assert_eq!(config.telemetry.queue_capacity, 256);
        assert_eq!(config.channels.guide_feature, "tv_guide_channels");
        assert_eq!(
            config.channels.focus_impressions,
            FocusImpressionPolicy::OnGain
        );
        assert!(config.experiments.is_empty());
        assert!(config.device.locale.is_none());
    }

    #[test]
    fn test_parse_full_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[telemetry]
backend = "noop"
queue_capacity = 0

[channels]
focus_impressions = "every_change"
guide_feature = "guide_rollout_b"

[experiments]
guide_rollout_b = true

[device]
locale = "en-GB"
"#,
        )
        .unwrap();

        let config = HomeRowConfig::load(&path).unwrap();
        assert_eq!(config.telemetry.backend, "noop");
        assert_eq!(config.telemetry.queue_capacity, 0);
        assert_eq!(
            config.channels.focus_impressions,
            FocusImpressionPolicy::EveryChange
        );
        assert_eq!(config.channels.guide_feature, "guide_rollout_b");
        assert_eq!(config.experiments.get("guide_rollout_b"), Some(&true));
        assert_eq!(config.device.locale.as_deref(), Some("en-GB"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = HomeRowConfig::default();
        config.experiments.insert("tv_guide_channels".into(), true);
        config.device.locale = Some("fr-CA".into());
        config.save(&path).unwrap();

        let loaded = HomeRowConfig::load(&path).unwrap();
        assert_eq!(loaded.experiments.get("tv_guide_channels"), Some(&true));
        assert_eq!(loaded.device.locale.as_deref(), Some("fr-CA"));
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[channels\nfocus_impressions = 3").unwrap();
        assert!(matches!(
            HomeRowConfig::load(&path),
            Err(HomeRowError::TomlDe(_))
        ));
    }
}
