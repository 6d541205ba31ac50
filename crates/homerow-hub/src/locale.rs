//! Locale sources.

use homerow_core::locale::{Locale, LocaleSource};

/// A locale pinned by configuration or tests.
#[derive(Debug, Clone)]
pub struct FixedLocale(Option<Locale>);

impl FixedLocale {
    pub fn new(locale: Locale) -> Self {
        Self(Some(locale))
    }

    /// A device whose locale is unknown.
    pub fn unknown() -> Self {
        Self(None)
    }

    /// Parse a tag such as "en-US". Unparseable tags give an unknown locale.
    pub fn parse(tag: &str) -> Self {
        Self(Locale::parse(tag))
    }
}

impl LocaleSource for FixedLocale {
    fn current_device_locale(&self) -> Option<Locale> {
        self.0.clone()
    }
}

/// Reads the POSIX locale environment: `LC_ALL`, then `LC_MESSAGES`, then
/// `LANG`. The first non-empty variable decides.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvLocale;

const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_MESSAGES", "LANG"];

impl EnvLocale {
    /// Resolve with a custom variable lookup.
    pub fn resolve_with(lookup: impl Fn(&str) -> Option<String>) -> Option<Locale> {
        let value = LOCALE_VARS
            .iter()
            .filter_map(|var| lookup(*var))
            .find(|value| !value.trim().is_empty())?;
        let locale = Locale::parse(&value);
        if locale.is_none() {
            tracing::debug!(value = value.as_str(), "Unrecognised locale in environment");
        }
        locale
    }
}

impl LocaleSource for EnvLocale {
    fn current_device_locale(&self) -> Option<Locale> {
        Self::resolve_with(|var| std::env::var(var).ok())
    }
}
