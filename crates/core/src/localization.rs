//! Localized text resolution.
//!
//! Turns a [`LocalizedText`] and a requested language into a single display string. Lookup
//! order:
//!
//! 1. the requested language
//! 2. the default language (`it` unless configured otherwise)
//! 3. every other populated language, alphabetically by code
//!
//! A value only counts when it is non-blank after trimming; the returned string is the original,
//! untrimmed value. Resolution never fails: an absent map yields `""` and a map with nothing
//! usable yields [`MISSING_TEXT`], so callers can tell the two apart.

use crate::constants::{DEFAULT_LANGUAGE, MISSING_TEXT};
use qform_types::{LanguageCode, LocalizedText};

/// Resolver bound to a default language.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolver {
    default_language: LanguageCode,
}

impl Resolver {
    pub fn new(default_language: LanguageCode) -> Self {
        Self { default_language }
    }

    pub fn default_language(&self) -> LanguageCode {
        self.default_language
    }

    /// Resolve `text` for `language`, falling back through the default language and then all
    /// remaining languages in canonical order.
    pub fn resolve<'a>(&self, text: Option<&'a LocalizedText>, language: &LanguageCode) -> &'a str {
        let Some(text) = text else {
            return "";
        };

        let usable = move |lang: &LanguageCode| text.get(lang).filter(|v| !v.trim().is_empty());

        if let Some(value) = usable(language) {
            return value;
        }
        if let Some(value) = usable(&self.default_language) {
            return value;
        }

        text.iter()
            .map(|(_, value)| value)
            .find(|value| !value.trim().is_empty())
            .unwrap_or(MISSING_TEXT)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGE)
    }
}

/// Resolve with the system default language. See [`Resolver::resolve`].
pub fn resolve<'a>(text: Option<&'a LocalizedText>, language: &LanguageCode) -> &'a str {
    Resolver::default().resolve(text, language)
}

/// True if `resolved` is the missing-text sentinel.
pub fn is_missing(resolved: &str) -> bool {
    resolved == MISSING_TEXT
}
