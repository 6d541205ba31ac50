//! Experiment providers.

mod overrides;

pub use overrides::OverrideExperiments;

use std::collections::{BTreeMap, HashMap};

use homerow_core::error::{HomeRowError, Result};
use homerow_core::experiment::ExperimentProvider;

/// Fixed flag values, usually from the `[experiments]` config table.
/// Unknown flags are disabled.
#[derive(Debug, Clone, Default)]
pub struct StaticExperiments {
    flags: HashMap<String, bool>,
}

impl StaticExperiments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one flag, builder style.
    pub fn with_flag(mut self, feature: &str, enabled: bool) -> Self {
        self.flags.insert(feature.to_string(), enabled);
        self
    }

    pub fn from_table(table: &BTreeMap<String, bool>) -> Self {
        Self {
            flags: table.iter().map(|(k, v)| (k.clone(), *v)).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Whether `feature` has an explicit value.
    pub fn contains(&self, feature: &str) -> bool {
        self.flags.contains_key(feature)
    }
}

impl ExperimentProvider for StaticExperiments {
    fn is_feature_enabled(&self, feature: &str) -> Result<bool> {
        Ok(self.flags.get(feature).copied().unwrap_or(false))
    }

    fn name(&self) -> &str {
        "static"
    }
}

/// Provider that can never be reached. Stands in for a remote experiment
/// service that has not synced yet.
#[derive(Debug, Clone, Default)]
pub struct UnavailableExperiments {
    reason: String,
}

impl UnavailableExperiments {
    pub fn new(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

impl ExperimentProvider for UnavailableExperiments {
    fn is_feature_enabled(&self, _feature: &str) -> Result<bool> {
        Err(HomeRowError::ExperimentUnavailable(self.reason.clone()))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}
