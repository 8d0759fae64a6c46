//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into core services. Core
//! code never reads environment variables while handling a request; binaries read them in
//! `main` and hand the parsed values to [`CoreConfig::new`].

use crate::constants::{DEFAULT_DATE_FORMAT, DEFAULT_LANGUAGE};
use crate::{CoreError, CoreResult};
use chrono::format::{Item, StrftimeItems};
use qform_types::LanguageCode;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    default_language: LanguageCode,
    date_format: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidInput`] if `date_format` is blank or is not a valid
    /// `strftime`-style pattern.
    pub fn new(default_language: LanguageCode, date_format: String) -> CoreResult<Self> {
        validate_date_format(&date_format)?;

        Ok(Self {
            default_language,
            date_format,
        })
    }

    pub fn default_language(&self) -> LanguageCode {
        self.default_language
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_language: DEFAULT_LANGUAGE,
            date_format: DEFAULT_DATE_FORMAT.to_owned(),
        }
    }
}

fn validate_date_format(format: &str) -> CoreResult<()> {
    if format.trim().is_empty() {
        return Err(CoreError::InvalidInput("date format cannot be empty".into()));
    }

    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(CoreError::InvalidInput(format!(
            "date format {format:?} is not a valid strftime pattern"
        )));
    }

    Ok(())
}

/// Parse the default language from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_LANGUAGE`].
pub fn default_language_from_env_value(value: Option<String>) -> CoreResult<LanguageCode> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(v) => LanguageCode::parse(&v).map_err(|e| CoreError::InvalidInput(e.to_string())),
        None => Ok(DEFAULT_LANGUAGE),
    }
}

/// Parse the export date format from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_DATE_FORMAT`]. Validation happens
/// in [`CoreConfig::new`].
pub fn date_format_from_env_value(value: Option<String>) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_italian_and_day_first_dates() {
        let cfg = CoreConfig::default();
        assert_eq!(cfg.default_language(), LanguageCode::IT);
        assert_eq!(cfg.date_format(), "%d/%m/%Y %H:%M");
    }

    #[test]
    fn rejects_invalid_date_format() {
        let err = CoreConfig::new(LanguageCode::EN, "%Q-%".into()).expect_err("bad format");
        assert!(matches!(err, CoreError::InvalidInput(_)));

        let err = CoreConfig::new(LanguageCode::EN, "  ".into()).expect_err("blank format");
        assert!(matches!(err, CoreError::InvalidInput(_)));
    }

    #[test]
    fn env_values_fall_back_to_defaults() {
        assert_eq!(
            default_language_from_env_value(None).unwrap(),
            LanguageCode::IT
        );
        assert_eq!(
            default_language_from_env_value(Some("  ".into())).unwrap(),
            LanguageCode::IT
        );
        assert_eq!(
            default_language_from_env_value(Some("es".into())).unwrap(),
            LanguageCode::ES
        );
        assert!(default_language_from_env_value(Some("spanish".into())).is_err());

        assert_eq!(date_format_from_env_value(None), DEFAULT_DATE_FORMAT);
        assert_eq!(date_format_from_env_value(Some("%Y-%m-%d".into())), "%Y-%m-%d");
    }
}
