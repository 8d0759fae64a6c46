//! Authoring-time structural checks for questionnaire documents.
//!
//! The exporter does not call these: it assumes a well-formed document and degrades leniently.
//! Authoring tools run [`validate_document`] before a template version is published.

use crate::localization::{is_missing, Resolver};
use crate::questionnaire::{QuestionType, QuestionnaireDocument};
use qform_types::LocalizedText;
use serde::Serialize;
use std::collections::HashSet;

/// A single structural problem found in a document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DocumentProblem {
    #[error("{location}: identifier is blank")]
    BlankId { location: String },
    #[error("section id {id:?} is used more than once")]
    DuplicateSectionId { id: String },
    #[error("question id {id:?} is used more than once")]
    DuplicateQuestionId { id: String },
    #[error("question {question_id:?} is multiple choice but has no options")]
    MissingOptions { question_id: String },
    #[error("question {question_id:?} has option value {value:?} more than once")]
    DuplicateOptionValue { question_id: String, value: String },
    #[error("question {question_id:?} has rating bounds min {min} >= max {max}")]
    InvalidRatingBounds {
        question_id: String,
        min: i64,
        max: i64,
    },
    #[error("{location}: no language has any text")]
    MissingText { location: String },
    #[error("{location}: language {language:?} is not one the platform ships")]
    UnknownLanguage { location: String, language: String },
}

/// Check a document for problems, in document order. An empty result means the document is
/// well-formed.
pub fn validate_document(document: &QuestionnaireDocument) -> Vec<DocumentProblem> {
    let resolver = Resolver::new(document.default_language);
    let mut problems = Vec::new();
    let check_text = |text: &LocalizedText, location: String, problems: &mut Vec<DocumentProblem>| {
        for language in text.languages().filter(|l| !l.is_known()) {
            problems.push(DocumentProblem::UnknownLanguage {
                location: location.clone(),
                language: language.to_string(),
            });
        }
        if is_missing(resolver.resolve(Some(text), &document.default_language)) {
            problems.push(DocumentProblem::MissingText { location });
        }
    };

    check_text(&document.title, "title".into(), &mut problems);

    let mut section_ids = HashSet::new();
    let mut question_ids = HashSet::new();

    for (s_idx, section) in document.sections.iter().enumerate() {
        let section_loc = format!("sections[{s_idx}]");
        if section.id.trim().is_empty() {
            problems.push(DocumentProblem::BlankId {
                location: section_loc.clone(),
            });
        } else if !section_ids.insert(section.id.as_str()) {
            problems.push(DocumentProblem::DuplicateSectionId {
                id: section.id.clone(),
            });
        }
        check_text(&section.title, format!("{section_loc}.title"), &mut problems);

        for (q_idx, question) in section.questions.iter().enumerate() {
            let question_loc = format!("{section_loc}.questions[{q_idx}]");
            if question.id.trim().is_empty() {
                problems.push(DocumentProblem::BlankId {
                    location: question_loc.clone(),
                });
            } else if !question_ids.insert(question.id.as_str()) {
                problems.push(DocumentProblem::DuplicateQuestionId {
                    id: question.id.clone(),
                });
            }
            check_text(&question.text, format!("{question_loc}.text"), &mut problems);

            let options = question.options.as_deref().unwrap_or_default();
            if question.kind == QuestionType::MultipleChoice && options.is_empty() {
                problems.push(DocumentProblem::MissingOptions {
                    question_id: question.id.clone(),
                });
            }

            let mut values = HashSet::new();
            for (o_idx, option) in options.iter().enumerate() {
                if !values.insert(option.value.as_str()) {
                    problems.push(DocumentProblem::DuplicateOptionValue {
                        question_id: question.id.clone(),
                        value: option.value.clone(),
                    });
                }
                check_text(
                    &option.text,
                    format!("{question_loc}.options[{o_idx}].text"),
                    &mut problems,
                );
            }

            if question.kind == QuestionType::Rating {
                if let (Some(min), Some(max)) = (question.min, question.max) {
                    if min >= max {
                        problems.push(DocumentProblem::InvalidRatingBounds {
                            question_id: question.id.clone(),
                            min,
                            max,
                        });
                    }
                }
            }
        }
    }

    if !problems.is_empty() {
        tracing::debug!("document validation found {} problem(s)", problems.len());
    }

    problems
}
