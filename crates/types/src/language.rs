//! Language codes.
//!
//! A [`LanguageCode`] is a lowercase ISO 639-1 two-letter code stored inline, so it is `Copy`
//! and cheap to use as a map key. The derived ordering is alphabetical by code, which is the
//! canonical iteration order of [`crate::LocalizedText`].

use std::fmt;
use std::str::FromStr;

/// Errors returned when parsing a [`LanguageCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LanguageCodeError {
    #[error("language code must be two lowercase ASCII letters, got {0:?}")]
    Malformed(String),
}

/// A lowercase two-letter language code such as `it` or `en`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LanguageCode([u8; 2]);

impl LanguageCode {
    /// Italian, the system default language.
    pub const IT: LanguageCode = LanguageCode(*b"it");
    /// English.
    pub const EN: LanguageCode = LanguageCode(*b"en");
    /// Spanish.
    pub const ES: LanguageCode = LanguageCode(*b"es");
    /// Arabic.
    pub const AR: LanguageCode = LanguageCode(*b"ar");

    /// Languages the platform ships content for, in canonical order.
    pub const KNOWN: [LanguageCode; 4] = [Self::AR, Self::EN, Self::ES, Self::IT];

    /// Parses a language code.
    ///
    /// Surrounding whitespace is ignored. Uppercase input is rejected rather than folded so that
    /// stored documents keep a single spelling per language.
    ///
    /// # Errors
    ///
    /// Returns [`LanguageCodeError::Malformed`] unless the input is exactly two ASCII lowercase
    /// letters.
    pub fn parse(input: &str) -> Result<Self, LanguageCodeError> {
        let trimmed = input.trim();
        match trimmed.as_bytes() {
            [a, b] if a.is_ascii_lowercase() && b.is_ascii_lowercase() => Ok(Self([*a, *b])),
            _ => Err(LanguageCodeError::Malformed(input.to_owned())),
        }
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        // Both bytes are ASCII lowercase letters by construction.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Whether this is one of the languages in [`LanguageCode::KNOWN`].
    pub fn is_known(&self) -> bool {
        Self::KNOWN.contains(self)
    }

    /// Whether text in this language is laid out right-to-left.
    pub fn is_rtl(&self) -> bool {
        *self == Self::AR
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self::IT
    }
}

impl FromStr for LanguageCode {
    type Err = LanguageCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl serde::Serialize for LanguageCode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for LanguageCode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        LanguageCode::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_codes() {
        assert_eq!(LanguageCode::parse("it").unwrap(), LanguageCode::IT);
        assert_eq!(LanguageCode::parse(" ar ").unwrap(), LanguageCode::AR);
        assert!(LanguageCode::EN.is_known());
    }

    #[test]
    fn accepts_unlisted_but_well_formed_codes() {
        let fr = LanguageCode::parse("fr").expect("fr is well formed");
        assert_eq!(fr.as_str(), "fr");
        assert!(!fr.is_known());
    }

    #[test]
    fn rejects_malformed_codes() {
        for bad in ["", "e", "EN", "eng", "e1", "it-IT"] {
            assert!(LanguageCode::parse(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn orders_alphabetically() {
        let mut codes = vec![LanguageCode::IT, LanguageCode::ES, LanguageCode::AR, LanguageCode::EN];
        codes.sort();
        assert_eq!(codes, LanguageCode::KNOWN.to_vec());
    }

    #[test]
    fn only_arabic_is_rtl() {
        assert!(LanguageCode::AR.is_rtl());
        assert!(!LanguageCode::IT.is_rtl());
    }
}
