//! Experiment provider trait — remotely controlled feature flags.

use crate::error::Result;

/// Feature flag lookup.
///
/// Implementations answer synchronously from whatever they have cached.
/// An `Err` means the provider could not be consulted at all; callers in
/// this crate treat that as "disabled".
///
/// # Example
///
/// ```rust,ignore
/// struct AlwaysOn;
///
/// impl ExperimentProvider for AlwaysOn {
///     fn is_feature_enabled(&self, _feature: &str) -> Result<bool> { Ok(true) }
/// }
/// ```
pub trait ExperimentProvider: Send + Sync {
    /// Whether `feature` is enabled for this device right now.
    fn is_feature_enabled(&self, feature: &str) -> Result<bool>;

    /// Provider name for logs (e.g., "static", "remote").
    fn name(&self) -> &str {
        "experiments"
    }
}

/// Query `feature`, failing closed.
pub(crate) fn feature_or_disabled(provider: &dyn ExperimentProvider, feature: &str) -> bool {
    match provider.is_feature_enabled(feature) {
        Ok(enabled) => enabled,
        Err(e) => {
            tracing::warn!(
                provider = provider.name(),
                feature,
                "Experiment lookup failed, treating as disabled: {}",
                e
            );
            false
        }
    }
}
