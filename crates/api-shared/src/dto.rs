//! Request and response bodies of the qform HTTP API.
//!
//! Core domain types (documents, submissions) are embedded as-is and appear in the OpenAPI
//! document as plain objects; their schema is owned by `qform-core`.

use qform_core::{
    DocumentProblem, LanguageCode, LocalizedText, Progress, QuestionnaireDocument,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveReq {
    /// Per-language text map; omit to resolve "no text at all".
    #[serde(default)]
    #[schema(value_type = Option<Object>)]
    pub text: Option<LocalizedText>,
    #[schema(value_type = String, example = "en")]
    pub language: LanguageCode,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResolveRes {
    pub text: String,
    /// True when the map exists but no language has usable text.
    pub missing: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDocumentReq {
    #[schema(value_type = Object)]
    pub document: QuestionnaireDocument,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValidateDocumentRes {
    pub valid: bool,
    pub problems: Vec<ProblemRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProblemRes {
    pub message: String,
    #[schema(value_type = Object)]
    pub detail: serde_json::Value,
}

impl From<&DocumentProblem> for ProblemRes {
    fn from(problem: &DocumentProblem) -> Self {
        Self {
            message: problem.to_string(),
            detail: serde_json::to_value(problem).unwrap_or(serde_json::Value::Null),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgressRes {
    pub total: usize,
    pub answered: usize,
    pub percent: u8,
    pub missing_required: Vec<String>,
}

impl From<Progress> for ProgressRes {
    fn from(progress: Progress) -> Self {
        Self {
            total: progress.total,
            answered: progress.answered,
            percent: progress.percent(),
            missing_required: progress.missing_required,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionReq {
    #[schema(example = "new")]
    pub from: String,
    #[schema(example = "investigating")]
    pub to: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransitionRes {
    /// The status after the change.
    #[schema(example = "investigating")]
    pub status: String,
    /// Statuses reachable from `status` in one step.
    pub next: Vec<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteActionReq {
    pub actor: String,
    #[schema(example = "operator")]
    pub role: String,
    pub note_author: String,
    #[schema(example = "edit")]
    pub action: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NoteActionRes {
    pub allowed: bool,
}

/// Body of every error response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorRes {
    pub status: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub details: Option<serde_json::Value>,
}
