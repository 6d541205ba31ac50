//! Local overrides layered over another provider.
//!
//! Lets a developer or QA build force a flag without touching the remote
//! experiment service. Flags without an override fall through to `inner`.

use std::sync::Arc;
use tracing::debug;

use homerow_core::error::Result;
use homerow_core::experiment::ExperimentProvider;

use super::StaticExperiments;

pub struct OverrideExperiments {
    overrides: StaticExperiments,
    inner: Arc<dyn ExperimentProvider>,
}

impl OverrideExperiments {
    pub fn new(overrides: StaticExperiments, inner: Arc<dyn ExperimentProvider>) -> Self {
        Self { overrides, inner }
    }
}

impl ExperimentProvider for OverrideExperiments {
    fn is_feature_enabled(&self, feature: &str) -> Result<bool> {
        if self.overrides.contains(feature) {
            debug!(feature, "Using local experiment override");
            return self.overrides.is_feature_enabled(feature);
        }
        self.inner.is_feature_enabled(feature)
    }

    fn name(&self) -> &str {
        "overrides"
    }
}
