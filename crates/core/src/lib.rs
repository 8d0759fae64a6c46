//! # qform Core
//!
//! Core logic for the qform questionnaire platform.
//!
//! This crate contains pure, in-memory operations:
//! - Localized text resolution with a deterministic language fallback chain
//! - Questionnaire documents and submissions (JSON/YAML loading, structural validation)
//! - Spreadsheet export of a submission (summary sheet plus one sheet per section)
//! - The canonical feedback status table and note permissions
//!
//! **No API concerns**: HTTP servers, authentication and persistence belong in `api-rest`,
//! `api-shared` or the calling service.

pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod localization;
mod parsing;
pub mod questionnaire;
pub mod status;
pub mod submission;
pub mod validation;

#[cfg(test)]
mod test_support;

pub use config::CoreConfig;
pub use error::{CoreError, CoreResult};
pub use export::{export, ExportService, ExportWorkbook};
pub use localization::{is_missing, resolve, Resolver};
pub use questionnaire::{Question, QuestionOption, QuestionType, QuestionnaireDocument, Section};
pub use status::{authorize_note_action, FeedbackStatus, NoteAction, OperatorRole};
pub use submission::{
    export_filename, progress, Answer, OperatorNote, Progress, SubmissionExport,
    SubmissionMetadata, SubmissionStatus,
};
pub use validation::{validate_document, DocumentProblem};

// Re-export the shared value types so callers need only this crate.
pub use qform_types::{LanguageCode, LocalizedText, NonEmptyText};
