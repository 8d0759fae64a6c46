//! Submissions: recorded answers, operator notes and the metadata shown on export.
//!
//! These are supplied by the calling service as flat sequences keyed by question id. Nothing
//! here checks that the ids exist in the document; consumers walk the document and look answers
//! up, so stray answers are simply never visited.

use crate::parsing;
use crate::questionnaire::QuestionnaireDocument;
use crate::CoreResult;
use chrono::{DateTime, NaiveDate, Utc};
use qform_types::LanguageCode;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::Path;

/// A recorded answer to one question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Answer {
    pub question_id: String,
    /// Raw text for text/date questions, an option value for multiple choice, a stringified
    /// integer for ratings.
    #[serde(deserialize_with = "deserialize_answer_value")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            value: value.into(),
            saved_at: None,
        }
    }
}

/// Clients send ratings as numbers and the occasional yes/no as booleans; all are kept as text.
fn deserialize_answer_value<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawValue {
        Text(String),
        Integer(i64),
        Float(f64),
        Bool(bool),
    }

    Ok(match RawValue::deserialize(deserializer)? {
        RawValue::Text(s) => s,
        RawValue::Integer(n) => n.to_string(),
        RawValue::Float(n) => n.to_string(),
        RawValue::Bool(b) => b.to_string(),
    })
}

/// A free-text annotation left by an operator, optionally attached to a question.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct OperatorNote {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<String>,
    pub text: String,
    /// Display name of the operator. Exported as given, even when blank.
    pub author: String,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    InProgress,
    Completed,
}

impl SubmissionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Human-readable label used in exported documents.
    pub fn label(&self) -> &'static str {
        match self {
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubmissionMetadata {
    pub id: String,
    pub subject_code: String,
    pub template_name: String,
    pub status: SubmissionStatus,
    pub language_used: LanguageCode,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    pub last_updated_at: DateTime<Utc>,
}

/// Everything needed to export one submission.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubmissionExport {
    pub document: QuestionnaireDocument,
    #[serde(default)]
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub notes: Vec<OperatorNote>,
    /// Language the export is rendered in.
    pub language: LanguageCode,
    pub metadata: SubmissionMetadata,
}

impl SubmissionExport {
    /// Parse a submission from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`crate::CoreError::Parse`] naming the failing field on schema mismatch.
    pub fn from_yaml_str(yaml_text: &str) -> CoreResult<Self> {
        parsing::from_yaml_str("submission", yaml_text)
    }

    /// Parse a submission from JSON text.
    pub fn from_json_str(json_text: &str) -> CoreResult<Self> {
        parsing::from_json_str("submission", json_text)
    }

    /// Load a submission from a `.yaml`, `.yml` or `.json` file.
    pub fn from_path(path: &Path) -> CoreResult<Self> {
        parsing::from_path("submission", path)
    }

    /// The current answer for a question.
    ///
    /// Upstream storage keeps one answer per question; if several are supplied anyway the first
    /// in sequence order wins.
    pub fn answer_for(&self, question_id: &str) -> Option<&Answer> {
        self.answers.iter().find(|a| a.question_id == question_id)
    }

    /// Notes attached to a question, in supplied order.
    pub fn notes_for<'a>(&'a self, question_id: &'a str) -> impl Iterator<Item = &'a OperatorNote> {
        self.notes
            .iter()
            .filter(move |n| n.question_id.as_deref() == Some(question_id))
    }

    /// Download filename for an export produced on `date`.
    pub fn filename(&self, date: NaiveDate) -> String {
        export_filename(&self.metadata.subject_code, date)
    }

    pub fn progress(&self) -> Progress {
        progress(&self.document, &self.answers)
    }
}

/// Build the conventional download name `submission_<subjectCode>_<YYYY-MM-DD>.xlsx`.
///
/// Characters other than ASCII letters, digits, `-` and `_` in the subject code are replaced
/// with `_` so the result is safe in a `Content-Disposition` header and on any filesystem.
pub fn export_filename(subject_code: &str, date: NaiveDate) -> String {
    let code: String = subject_code
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    let code = if code.is_empty() { "unknown".into() } else { code };

    format!("submission_{code}_{}.xlsx", date.format("%Y-%m-%d"))
}

/// How far a submission has got.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub total: usize,
    pub answered: usize,
    /// Required questions without a non-blank answer, in document order.
    pub missing_required: Vec<String>,
}

impl Progress {
    /// Whole-number percentage of answered questions; an empty document counts as complete.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.answered * 100) / self.total) as u8
    }

    pub fn is_complete(&self) -> bool {
        self.missing_required.is_empty()
    }
}

/// Count answered questions and list required ones still missing.
///
/// A question counts as answered when its current answer has a non-blank value.
pub fn progress(document: &QuestionnaireDocument, answers: &[Answer]) -> Progress {
    let mut answered = 0;
    let mut missing_required = Vec::new();

    for question in document.questions() {
        let has_value = answers
            .iter()
            .find(|a| a.question_id == question.id)
            .is_some_and(|a| !a.value.trim().is_empty());

        if has_value {
            answered += 1;
        } else if question.required {
            missing_required.push(question.id.clone());
        }
    }

    Progress {
        total: document.question_count(),
        answered,
        missing_required,
    }
}
