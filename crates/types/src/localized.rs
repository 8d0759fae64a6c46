//! Per-language text maps.

use crate::LanguageCode;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A mapping from language to an optional display string.
///
/// No language is required: any subset may be populated, `null`, or blank. Entries are kept in
/// canonical (alphabetical) language order regardless of how they were inserted or serialized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(BTreeMap<LanguageCode, Option<String>>);

impl LocalizedText {
    /// Returns the raw value stored for `language`, if any. Blank strings are returned as-is.
    pub fn get(&self, language: &LanguageCode) -> Option<&str> {
        self.0.get(language).and_then(|v| v.as_deref())
    }

    /// Iterates over entries that hold a value, in canonical language order.
    pub fn iter(&self) -> impl Iterator<Item = (&LanguageCode, &str)> {
        self.0
            .iter()
            .filter_map(|(lang, value)| value.as_deref().map(|v| (lang, v)))
    }

    /// Languages present as keys, including ones mapped to `null`.
    pub fn languages(&self) -> impl Iterator<Item = &LanguageCode> {
        self.0.keys()
    }
}

impl<S: Into<String>> FromIterator<(LanguageCode, S)> for LocalizedText {
    fn from_iter<I: IntoIterator<Item = (LanguageCode, S)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(lang, text)| (lang, Some(text.into())))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_sparse_maps_with_nulls() {
        let text: LocalizedText =
            serde_json::from_str(r#"{"it": "Ciao", "en": null, "es": ""}"#).expect("parse");
        assert_eq!(text.get(&LanguageCode::IT), Some("Ciao"));
        assert_eq!(text.get(&LanguageCode::EN), None);
        assert_eq!(text.get(&LanguageCode::ES), Some(""));
        assert_eq!(text.languages().count(), 3);
    }

    #[test]
    fn iterates_in_canonical_order() {
        let text: LocalizedText =
            serde_json::from_str(r#"{"it": "Ciao", "es": "Hola", "en": "Hello"}"#).expect("parse");
        let order: Vec<&str> = text.iter().map(|(lang, _)| lang.as_str()).collect();
        assert_eq!(order, vec!["en", "es", "it"]);
    }

    #[test]
    fn rejects_malformed_language_keys() {
        let err = serde_json::from_str::<LocalizedText>(r#"{"ITA": "Ciao"}"#)
            .expect_err("bad key rejected");
        assert!(err.to_string().contains("language code"));
    }

    #[test]
    fn collects_from_pairs() {
        let text: LocalizedText = [(LanguageCode::EN, "Hello"), (LanguageCode::AR, "مرحبا")]
            .into_iter()
            .collect();
        assert_eq!(text.iter().count(), 2);
        assert_eq!(text.get(&LanguageCode::AR), Some("مرحبا"));
    }
}
