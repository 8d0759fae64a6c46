//! Questionnaire documents.
//!
//! A [`QuestionnaireDocument`] is the authored template: a title, a version tag, a default
//! language and an ordered list of sections, each holding an ordered list of questions. Every
//! piece of display text is a [`LocalizedText`].
//!
//! Documents are loaded read-only. The wire format (JSON or YAML) uses camelCase keys and is
//! strict: unknown keys are rejected.

use crate::parsing;
use crate::CoreResult;
use qform_types::{LanguageCode, LocalizedText};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The root of an authored questionnaire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuestionnaireDocument {
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    pub version: String,
    #[serde(default)]
    pub default_language: LanguageCode,
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Section {
    pub id: String,
    pub title: LocalizedText,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<LocalizedText>,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Question {
    pub id: String,
    pub text: LocalizedText,
    #[serde(rename = "type")]
    pub kind: QuestionType,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<QuestionOption>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

/// The kind of input a question expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// Free text.
    Text,
    /// Single choice among the question's options.
    MultipleChoice,
    /// An integer on a bounded scale.
    Rating,
    /// A calendar date.
    Date,
}

impl QuestionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::MultipleChoice => "multiple_choice",
            Self::Rating => "rating",
            Self::Date => "date",
        }
    }
}

/// One selectable answer of a multiple-choice or rating question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct QuestionOption {
    /// Machine value stored in answers.
    pub value: String,
    pub text: LocalizedText,
}

impl QuestionnaireDocument {
    /// Parse a document from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Parse`] naming the failing field if the YAML does not match
    /// the document schema (wrong types, unknown keys, malformed language codes).
    pub fn from_yaml_str(yaml_text: &str) -> CoreResult<Self> {
        parsing::from_yaml_str("questionnaire", yaml_text)
    }

    /// Parse a document from JSON text. See [`QuestionnaireDocument::from_yaml_str`].
    pub fn from_json_str(json_text: &str) -> CoreResult<Self> {
        parsing::from_json_str("questionnaire", json_text)
    }

    /// Load a document from a `.yaml`, `.yml` or `.json` file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        parsing::from_path("questionnaire", path)
    }

    /// All questions in document order, across sections.
    pub fn questions(&self) -> impl Iterator<Item = &Question> {
        self.sections.iter().flat_map(|s| s.questions.iter())
    }

    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions().find(|q| q.id == id)
    }

    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }
}

impl Question {
    /// Finds the option whose machine value equals `value`.
    pub fn option(&self, value: &str) -> Option<&QuestionOption> {
        self.options
            .as_deref()
            .and_then(|options| options.iter().find(|o| o.value == value))
    }

    /// Whether answers to this question are option values that should be shown by label.
    pub fn answers_are_option_values(&self) -> bool {
        matches!(self.kind, QuestionType::MultipleChoice | QuestionType::Rating)
            && self.options.as_ref().is_some_and(|o| !o.is_empty())
    }
}
