//! In-memory workbook model and its construction from a submission.
//!
//! Building is pure and document-driven: the document's sections and questions decide the shape
//! of the output, answers and notes are looked up by question id. Rendering to bytes lives in
//! [`super::xlsx`].

use crate::constants::{
    CELL_MAX_CHARS, NOTE_SEPARATOR, NOT_ANSWERED, SECTION_HEADER, SECTION_TITLE_MAX_CHARS,
    SHEET_NAME_MAX_CHARS, SUMMARY_HEADER, SUMMARY_SHEET_NAME, TRUNCATION_MARKER,
};
use crate::localization::{is_missing, Resolver};
use crate::questionnaire::{Question, Section};
use crate::submission::{OperatorNote, SubmissionExport};
use chrono::{DateTime, Utc};
use qform_types::LanguageCode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SheetKind {
    /// Key/value overview of the submission.
    Summary,
    /// One row per question of a section.
    Section,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportSheet {
    pub name: String,
    pub kind: SheetKind,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportWorkbook {
    pub sheets: Vec<ExportSheet>,
    /// Lay sheets out right-to-left (export language is Arabic).
    pub right_to_left: bool,
}

impl ExportWorkbook {
    pub fn sheet(&self, name: &str) -> Option<&ExportSheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn section_sheets(&self) -> impl Iterator<Item = &ExportSheet> {
        self.sheets.iter().filter(|s| s.kind == SheetKind::Section)
    }

    /// Total data rows over all section sheets; equals the number of questions exported.
    pub fn question_row_count(&self) -> usize {
        self.section_sheets().map(|s| s.rows.len()).sum()
    }
}

/// Build the workbook for `submission`: a summary sheet followed by one sheet per section.
pub fn build_workbook(
    submission: &SubmissionExport,
    resolver: &Resolver,
    date_format: &str,
) -> ExportWorkbook {
    let mut sheets = Vec::with_capacity(submission.document.sections.len() + 1);
    sheets.push(summary_sheet(submission, date_format));

    for (idx, section) in submission.document.sections.iter().enumerate() {
        sheets.push(section_sheet(
            idx + 1,
            section,
            submission,
            resolver,
            date_format,
        ));
    }

    ExportWorkbook {
        sheets,
        right_to_left: submission.language.is_rtl(),
    }
}

fn summary_sheet(submission: &SubmissionExport, date_format: &str) -> ExportSheet {
    let meta = &submission.metadata;
    let completed_at = meta
        .completed_at
        .map(|ts| format_timestamp(&ts, date_format))
        .unwrap_or_else(|| NOT_ANSWERED.to_owned());

    let rows = [
        ("Submission ID", meta.id.clone()),
        ("Subject code", meta.subject_code.clone()),
        ("Template", meta.template_name.clone()),
        ("Status", meta.status.label().to_owned()),
        ("Language", meta.language_used.to_string()),
        ("Created at", format_timestamp(&meta.created_at, date_format)),
        ("Completed at", completed_at),
        (
            "Last updated at",
            format_timestamp(&meta.last_updated_at, date_format),
        ),
    ]
    .into_iter()
    .map(|(field, value)| vec![field.to_owned(), fit_cell(value, field)])
    .collect();

    ExportSheet {
        name: SUMMARY_SHEET_NAME.to_owned(),
        kind: SheetKind::Summary,
        header: SUMMARY_HEADER.iter().map(|h| (*h).to_owned()).collect(),
        rows,
    }
}

fn section_sheet(
    ordinal: usize,
    section: &Section,
    submission: &SubmissionExport,
    resolver: &Resolver,
    date_format: &str,
) -> ExportSheet {
    let language = &submission.language;
    let title = resolver.resolve(Some(&section.title), language);

    let rows = section
        .questions
        .iter()
        .map(|question| {
            let text = resolver.resolve(Some(&question.text), language);
            if is_missing(text) {
                tracing::warn!(
                    "question {} has no text in any language (section {})",
                    question.id,
                    section.id
                );
            }

            vec![
                question.id.clone(),
                fit_cell(text.to_owned(), &question.id),
                fit_cell(
                    answer_display(question, submission, resolver, language),
                    &question.id,
                ),
                fit_cell(
                    notes_display(submission.notes_for(&question.id), date_format),
                    &question.id,
                ),
            ]
        })
        .collect();

    ExportSheet {
        name: section_sheet_name(ordinal, title),
        kind: SheetKind::Section,
        header: SECTION_HEADER.iter().map(|h| (*h).to_owned()).collect(),
        rows,
    }
}

/// The answer cell: `N/A` when unanswered, the option label for option-valued questions, the raw
/// value otherwise (including option values that match no option).
fn answer_display(
    question: &Question,
    submission: &SubmissionExport,
    resolver: &Resolver,
    language: &LanguageCode,
) -> String {
    let Some(answer) = submission.answer_for(&question.id) else {
        return NOT_ANSWERED.to_owned();
    };

    if question.answers_are_option_values() {
        if let Some(option) = question.option(&answer.value) {
            return resolver.resolve(Some(&option.text), language).to_owned();
        }
        tracing::debug!(
            "answer {:?} to question {} matches no option; exporting raw value",
            answer.value,
            question.id
        );
    }

    answer.value.clone()
}

fn notes_display<'a>(notes: impl Iterator<Item = &'a OperatorNote>, date_format: &str) -> String {
    notes
        .map(|note| {
            format!(
                "[{}, {}] {}",
                note.author,
                format_timestamp(&note.created_at, date_format),
                note.text
            )
        })
        .collect::<Vec<_>>()
        .join(NOTE_SEPARATOR)
}

/// Cut `value` to [`CELL_MAX_CHARS`] characters, ending with [`TRUNCATION_MARKER`].
fn fit_cell(value: String, owner: &str) -> String {
    if value.chars().count() <= CELL_MAX_CHARS {
        return value;
    }

    tracing::warn!(
        "cell for {} exceeds {} characters; truncating",
        owner,
        CELL_MAX_CHARS
    );
    let keep = CELL_MAX_CHARS - TRUNCATION_MARKER.chars().count();
    let mut cut: String = value.chars().take(keep).collect();
    cut.push_str(TRUNCATION_MARKER);
    cut
}

fn format_timestamp(ts: &DateTime<Utc>, date_format: &str) -> String {
    ts.format(date_format).to_string()
}

/// Sheet name for the section at 1-based `ordinal`: `S<ordinal> - <title>`.
///
/// The title is cut to 25 characters, characters spreadsheet applications reject in sheet names
/// become `-`, and the result never exceeds 31 characters or ends in an apostrophe. The ordinal
/// prefix keeps names unique even when titles collide after truncation.
pub fn section_sheet_name(ordinal: usize, resolved_title: &str) -> String {
    let title: String = resolved_title
        .trim()
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '-',
            c if c.is_control() => ' ',
            c => c,
        })
        .take(SECTION_TITLE_MAX_CHARS)
        .collect();

    let name: String = format!("S{ordinal} - {}", title.trim_end())
        .chars()
        .take(SHEET_NAME_MAX_CHARS)
        .collect();

    name.trim_end_matches(|c: char| c == '\'' || c.is_whitespace())
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_DATE_FORMAT;
    use crate::questionnaire::{QuestionType, QuestionnaireDocument};
    use crate::submission::Answer;
    use crate::test_support::{at, lt, sample_submission};

    fn build(submission: &SubmissionExport) -> ExportWorkbook {
        build_workbook(submission, &Resolver::default(), DEFAULT_DATE_FORMAT)
    }

    fn row<'a>(workbook: &'a ExportWorkbook, question_id: &str) -> &'a [String] {
        workbook
            .section_sheets()
            .flat_map(|s| s.rows.iter())
            .find(|r| r[0] == question_id)
            .map(Vec::as_slice)
            .expect("row for question")
    }

    #[test]
    fn one_row_per_question_regardless_of_answers() {
        let mut submission = sample_submission();
        let workbook = build(&submission);
        assert_eq!(workbook.sheets.len(), 3);
        assert_eq!(
            workbook.question_row_count(),
            submission.document.question_count()
        );

        submission.answers.clear();
        assert_eq!(build(&submission).question_row_count(), 4);
    }

    #[test]
    fn summary_sheet_lists_metadata() {
        let workbook = build(&sample_submission());
        let summary = workbook.sheet("Summary").expect("summary sheet");
        assert_eq!(summary.kind, SheetKind::Summary);
        assert_eq!(summary.header, vec!["Field", "Value"]);

        let fields: Vec<(&str, &str)> = summary
            .rows
            .iter()
            .map(|r| (r[0].as_str(), r[1].as_str()))
            .collect();
        assert_eq!(
            fields,
            vec![
                ("Submission ID", "sub-001"),
                ("Subject code", "FAM-042"),
                ("Template", "Family questionnaire"),
                ("Status", "Completed"),
                ("Language", "it"),
                ("Created at", "01/05/2024 08:00"),
                ("Completed at", "01/05/2024 08:40"),
                ("Last updated at", "03/05/2024 16:10"),
            ]
        );
    }

    #[test]
    fn missing_completion_time_is_marked() {
        let mut submission = sample_submission();
        submission.metadata.completed_at = None;
        let workbook = build(&submission);
        let summary = workbook.sheet("Summary").expect("summary sheet");
        assert_eq!(summary.rows[6], vec!["Completed at", "N/A"]);
    }

    #[test]
    fn section_sheets_are_named_by_ordinal_and_truncated_title() {
        let workbook = build(&sample_submission());
        let names: Vec<&str> = workbook.section_sheets().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["S1 - Basics", "S2 - Wellbeing and daily life"]);
        for sheet in workbook.section_sheets() {
            assert_eq!(sheet.header, vec!["Question ID", "Question", "Answer", "Notes"]);
        }
    }

    #[test]
    fn unanswered_questions_show_marker() {
        let workbook = build(&sample_submission());
        assert_eq!(row(&workbook, "q-visit")[2], "N/A");
    }

    #[test]
    fn empty_answer_is_exported_as_empty_cell() {
        let mut submission = sample_submission();
        submission.answers = vec![Answer::new("q-visit", ""), Answer::new("q-housing", "")];
        let workbook = build(&submission);
        assert_eq!(row(&workbook, "q-visit")[2], "");
        assert_eq!(row(&workbook, "q-housing")[2], "");
        assert_eq!(row(&workbook, "q-name")[2], "N/A");
    }

    #[test]
    fn oversized_cells_are_truncated_on_char_boundaries() {
        let mut submission = sample_submission();
        submission.answers = vec![Answer::new("q-name", "a".repeat(40_000))];
        submission.notes[0].text = "è".repeat(40_000);
        let workbook = build(&submission);

        let answer = &row(&workbook, "q-name")[2];
        assert_eq!(answer.chars().count(), CELL_MAX_CHARS);
        assert!(answer.starts_with("aaaa"));
        assert!(answer.ends_with(TRUNCATION_MARKER));

        let notes = &row(&workbook, "q-housing")[3];
        assert_eq!(notes.chars().count(), CELL_MAX_CHARS);
        assert!(notes.starts_with("[Giulia, 02/05/2024 09:30] èèè"));
        assert!(notes.ends_with(TRUNCATION_MARKER));

        assert_eq!(fit_cell("short".into(), "q-name"), "short");
    }

    #[test]
    fn blank_note_author_is_rendered_as_given() {
        let mut submission = sample_submission();
        submission.notes[0].author = String::new();
        let workbook = build(&submission);
        assert!(row(&workbook, "q-housing")[3].starts_with("[, 02/05/2024 09:30] Lives with"));
    }

    #[test]
    fn option_values_resolve_to_labels_in_export_language() {
        let mut submission = sample_submission();
        assert_eq!(row(&build(&submission), "q-housing")[2], "Rented");
        assert_eq!(row(&build(&submission), "q-mood")[2], "So-so");

        submission.language = LanguageCode::IT;
        assert_eq!(row(&build(&submission), "q-housing")[2], "In affitto");
    }

    #[test]
    fn unknown_option_value_falls_back_to_raw_value() {
        let mut submission = sample_submission();
        submission.answers = vec![Answer::new("q-housing", "shelter")];
        assert_eq!(row(&build(&submission), "q-housing")[2], "shelter");
    }

    #[test]
    fn question_text_falls_back_to_default_language() {
        let workbook = build(&sample_submission());
        assert_eq!(row(&workbook, "q-mood")[1], "Come ti senti oggi?");
    }

    #[test]
    fn notes_are_joined_in_supplied_order() {
        let workbook = build(&sample_submission());
        assert_eq!(
            row(&workbook, "q-housing")[3],
            "[Giulia, 02/05/2024 09:30] Lives with grandparents\n\
             [Marco, 03/05/2024 16:05] Confirmed by phone"
        );
        assert_eq!(row(&workbook, "q-name")[3], "");
    }

    #[test]
    fn answers_and_notes_for_unknown_questions_are_ignored() {
        let workbook = build(&sample_submission());
        let all_cells: Vec<&String> = workbook
            .section_sheets()
            .flat_map(|s| s.rows.iter().flatten())
            .collect();
        assert!(!all_cells.iter().any(|c| c.contains("never shown")));
        assert!(!all_cells.iter().any(|c| c.contains("Orphan note")));
        assert!(!all_cells.iter().any(|c| c.contains("General remark")));
    }

    #[test]
    fn single_text_question_scenario() {
        let mut submission = sample_submission();
        submission.document = QuestionnaireDocument {
            title: lt(&[(LanguageCode::EN, "Intake")]),
            description: None,
            version: "1".into(),
            default_language: LanguageCode::IT,
            sections: vec![Section {
                id: "s1".into(),
                title: lt(&[(LanguageCode::EN, "Basics")]),
                description: None,
                questions: vec![Question {
                    id: "q1".into(),
                    text: lt(&[
                        (LanguageCode::IT, "Come ti chiami?"),
                        (LanguageCode::EN, "What is your name?"),
                    ]),
                    kind: QuestionType::Text,
                    required: true,
                    options: None,
                    min: None,
                    max: None,
                }],
            }],
        };
        submission.answers = vec![Answer::new("q1", "Maria")];
        submission.notes.clear();
        submission.language = LanguageCode::EN;

        let workbook = build(&submission);
        let sheets: Vec<&ExportSheet> = workbook.section_sheets().collect();
        assert_eq!(sheets.len(), 1);
        assert_eq!(
            sheets[0].rows,
            vec![vec![
                "q1".to_string(),
                "What is your name?".to_string(),
                "Maria".to_string(),
                String::new(),
            ]]
        );
    }

    #[test]
    fn arabic_exports_are_right_to_left() {
        let mut submission = sample_submission();
        assert!(!build(&submission).right_to_left);
        submission.language = LanguageCode::AR;
        assert!(build(&submission).right_to_left);
    }

    #[test]
    fn custom_date_format_applies_to_summary_and_notes() {
        let mut submission = sample_submission();
        submission.metadata.created_at = at(2024, 12, 31, 23, 59);
        let workbook = build_workbook(&submission, &Resolver::default(), "%Y-%m-%d");
        let summary = workbook.sheet("Summary").expect("summary sheet");
        assert_eq!(summary.rows[5][1], "2024-12-31");
        assert!(row(&workbook, "q-housing")[3].starts_with("[Giulia, 2024-05-02]"));
    }

    #[test]
    fn sheet_names_are_sanitized_and_bounded() {
        assert_eq!(section_sheet_name(1, "Basics"), "S1 - Basics");
        assert_eq!(
            section_sheet_name(2, "Wellbeing and daily life at home"),
            "S2 - Wellbeing and daily life"
        );
        assert_eq!(section_sheet_name(3, "Income/expenses: [2024]?"), "S3 - Income-expenses- -2024--");
        assert_eq!(section_sheet_name(4, "Famiglia d'"), "S4 - Famiglia d");

        let long = section_sheet_name(120, &"x".repeat(40));
        assert_eq!(long.chars().count(), 31);
        assert!(long.starts_with("S120 - "));
    }
}
