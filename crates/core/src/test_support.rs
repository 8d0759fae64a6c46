//! Fixtures shared by unit tests across the crate.

use crate::questionnaire::{Question, QuestionOption, QuestionType, QuestionnaireDocument, Section};
use crate::submission::{Answer, OperatorNote, SubmissionExport, SubmissionMetadata, SubmissionStatus};
use chrono::{DateTime, TimeZone, Utc};
use qform_types::{LanguageCode, LocalizedText};

pub(crate) fn lt(pairs: &[(LanguageCode, &str)]) -> LocalizedText {
    pairs.iter().copied().collect()
}

pub(crate) fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0)
        .single()
        .expect("valid fixture timestamp")
}

fn option(value: &str, it: &str, en: &str) -> QuestionOption {
    QuestionOption {
        value: value.into(),
        text: lt(&[(LanguageCode::IT, it), (LanguageCode::EN, en)]),
    }
}

fn question(id: &str, text: LocalizedText, kind: QuestionType) -> Question {
    Question {
        id: id.into(),
        text,
        kind,
        required: false,
        options: None,
        min: None,
        max: None,
    }
}

/// Two sections, four questions: text, multiple choice, rating with labels, date.
pub(crate) fn sample_document() -> QuestionnaireDocument {
    let mut name = question(
        "q-name",
        lt(&[
            (LanguageCode::IT, "Come ti chiami?"),
            (LanguageCode::EN, "What is your name?"),
        ]),
        QuestionType::Text,
    );
    name.required = true;

    let mut housing = question(
        "q-housing",
        lt(&[
            (LanguageCode::IT, "Tipo di abitazione"),
            (LanguageCode::EN, "Housing type"),
        ]),
        QuestionType::MultipleChoice,
    );
    housing.options = Some(vec![
        option("rent", "In affitto", "Rented"),
        option("own", "Di proprietà", "Owned"),
    ]);

    let mut mood = question(
        "q-mood",
        lt(&[(LanguageCode::IT, "Come ti senti oggi?")]),
        QuestionType::Rating,
    );
    mood.min = Some(1);
    mood.max = Some(3);
    mood.options = Some(vec![
        option("1", "Male", "Bad"),
        option("2", "Così così", "So-so"),
        option("3", "Bene", "Good"),
    ]);

    let visit = question(
        "q-visit",
        lt(&[
            (LanguageCode::IT, "Data della visita"),
            (LanguageCode::EN, "Visit date"),
        ]),
        QuestionType::Date,
    );

    QuestionnaireDocument {
        title: lt(&[
            (LanguageCode::IT, "Questionario famiglie"),
            (LanguageCode::EN, "Family questionnaire"),
        ]),
        description: None,
        version: "2024.1".into(),
        default_language: LanguageCode::IT,
        sections: vec![
            Section {
                id: "basics".into(),
                title: lt(&[(LanguageCode::IT, "Dati di base"), (LanguageCode::EN, "Basics")]),
                description: None,
                questions: vec![name, housing],
            },
            Section {
                id: "wellbeing".into(),
                title: lt(&[(LanguageCode::EN, "Wellbeing and daily life at home")]),
                description: Some(lt(&[(LanguageCode::EN, "How things are going")])),
                questions: vec![mood, visit],
            },
        ],
    }
}

fn note(question_id: Option<&str>, text: &str, author: &str, created_at: DateTime<Utc>) -> OperatorNote {
    OperatorNote {
        question_id: question_id.map(str::to_owned),
        text: text.into(),
        author: author.into(),
        created_at,
        updated_at: None,
    }
}

/// English export of [`sample_document`] with three of four questions answered.
pub(crate) fn sample_submission() -> SubmissionExport {
    SubmissionExport {
        document: sample_document(),
        answers: vec![
            Answer::new("q-name", "Maria"),
            Answer::new("q-housing", "rent"),
            Answer::new("q-mood", "2"),
            Answer::new("q-ghost", "never shown"),
        ],
        notes: vec![
            note(Some("q-housing"), "Lives with grandparents", "Giulia", at(2024, 5, 2, 9, 30)),
            note(None, "General remark", "Giulia", at(2024, 5, 2, 9, 45)),
            note(Some("q-housing"), "Confirmed by phone", "Marco", at(2024, 5, 3, 16, 5)),
            note(Some("q-ghost"), "Orphan note", "Marco", at(2024, 5, 3, 16, 10)),
        ],
        language: LanguageCode::EN,
        metadata: SubmissionMetadata {
            id: "sub-001".into(),
            subject_code: "FAM-042".into(),
            template_name: "Family questionnaire".into(),
            status: SubmissionStatus::Completed,
            language_used: LanguageCode::IT,
            created_at: at(2024, 5, 1, 8, 0),
            completed_at: Some(at(2024, 5, 1, 8, 40)),
            last_updated_at: at(2024, 5, 3, 16, 10),
        },
    }
}
