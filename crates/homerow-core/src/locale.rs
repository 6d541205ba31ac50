//! Locale gate — decides whether a channel may appear for the device locale.

use std::fmt;

/// A device or reference locale.
///
/// Only the language and region are modelled; script and variant subtags
/// are dropped by [`Locale::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale {
    pub language: String,
    pub region: Option<String>,
}

impl Locale {
    /// Build a locale verbatim. No case folding is applied.
    pub fn new(language: &str, region: Option<&str>) -> Self {
        Self {
            language: language.to_string(),
            region: region.map(|r| r.to_string()),
        }
    }

    /// Any English locale.
    pub fn english() -> Self {
        Self::new("en", None)
    }

    /// English as spoken in the United States.
    pub fn us() -> Self {
        Self::new("en", Some("US"))
    }

    /// Parse a BCP 47 (`en-US`) or POSIX (`en_US.UTF-8`) tag.
    ///
    /// The language is lowercased and the region uppercased. Returns `None`
    /// for empty tags, the `C`/`POSIX` pseudo-locales, and tags whose
    /// language subtag is not alphabetic.
    pub fn parse(tag: &str) -> Option<Self> {
        // Drop POSIX codeset and modifier: `de_DE.UTF-8@euro`
        let tag = tag.trim();
        let tag = tag.split(['.', '@']).next().unwrap_or("");
        if tag.is_empty() || tag.eq_ignore_ascii_case("c") || tag.eq_ignore_ascii_case("posix") {
            return None;
        }

        let mut subtags = tag.split(['-', '_']);
        let language = subtags.next()?;
        if !(2..=8).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic())
        {
            return None;
        }

        // First 2-letter or 3-digit subtag after the language is the region;
        // 4-letter script subtags are skipped.
        let region = subtags.find(|s| {
            (s.len() == 2 && s.chars().all(|c| c.is_ascii_alphabetic()))
                || (s.len() == 3 && s.chars().all(|c| c.is_ascii_digit()))
        });

        Some(Self {
            language: language.to_ascii_lowercase(),
            region: region.map(|r| r.to_ascii_uppercase()),
        })
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.region {
            Some(region) => write!(f, "{}-{}", self.language, region),
            None => write!(f, "{}", self.language),
        }
    }
}

/// Which device locales a channel is visible in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalePolicy {
    /// Every locale passes, including unknown ones.
    AllLocales,
    /// Only devices whose language matches. If the reference locale carries
    /// a region, the device region must match it as well.
    RestrictedTo(Locale),
    /// Nothing passes.
    NoLocales,
}

impl fmt::Display for LocalePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllLocales => write!(f, "all"),
            Self::RestrictedTo(locale) => write!(f, "{}", locale),
            Self::NoLocales => write!(f, "none"),
        }
    }
}

/// Evaluate `policy` against the device locale.
///
/// An absent or empty device locale never satisfies a restricted policy.
pub fn permits(policy: &LocalePolicy, device: Option<&Locale>) -> bool {
    match policy {
        LocalePolicy::AllLocales => true,
        LocalePolicy::NoLocales => false,
        LocalePolicy::RestrictedTo(reference) => {
            let Some(device) = device else {
                return false;
            };
            if device.language.is_empty() || device.language != reference.language {
                return false;
            }
            match &reference.region {
                Some(region) => device.region.as_ref() == Some(region),
                None => true,
            }
        }
    }
}

/// Source of the device's active locale.
///
/// `None` means the locale could not be determined; the gate treats that
/// as a mismatch.
pub trait LocaleSource: Send + Sync {
    fn current_device_locale(&self) -> Option<Locale>;
}
