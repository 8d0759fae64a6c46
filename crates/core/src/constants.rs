//! Constants used throughout the qform core crate.
//!
//! Display markers, sheet labels and formatting defaults live here so the exporter, the REST
//! layer and the CLI agree on them.

use qform_types::LanguageCode;

/// Language used when the requested one has no usable text.
pub const DEFAULT_LANGUAGE: LanguageCode = LanguageCode::IT;

/// Returned by the resolver when a text map exists but every value is blank.
pub const MISSING_TEXT: &str = "[missing text]";

/// Shown in place of an answer (or a timestamp) that was never recorded.
pub const NOT_ANSWERED: &str = "N/A";

/// Default `chrono` format for timestamps in exported documents.
pub const DEFAULT_DATE_FORMAT: &str = "%d/%m/%Y %H:%M";

/// Name of the first sheet of every export.
pub const SUMMARY_SHEET_NAME: &str = "Summary";

/// Resolved section titles are cut to this many characters in sheet names.
pub const SECTION_TITLE_MAX_CHARS: usize = 25;

/// Hard limit imposed by spreadsheet applications on sheet names.
pub const SHEET_NAME_MAX_CHARS: usize = 31;

/// Longest text a single spreadsheet cell may hold, in characters.
pub const CELL_MAX_CHARS: usize = 32_767;

/// Appended to cell text cut down to [`CELL_MAX_CHARS`].
pub const TRUNCATION_MARKER: &str = " [truncated]";

/// Separator between notes attached to the same question.
pub const NOTE_SEPARATOR: &str = "\n";

/// MIME type of generated workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Header row of the summary sheet.
pub const SUMMARY_HEADER: [&str; 2] = ["Field", "Value"];

/// Header row of every section sheet.
pub const SECTION_HEADER: [&str; 4] = ["Question ID", "Question", "Answer", "Notes"];
