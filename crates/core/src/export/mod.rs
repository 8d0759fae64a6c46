//! Submission export.
//!
//! Produces a spreadsheet with a summary sheet followed by one sheet per questionnaire section.
//! Construction ([`build_workbook`]) is pure and separate from serialization ([`render_xlsx`]),
//! so tests and previews can inspect the cells without decoding a zip archive.
//!
//! Inputs are assumed valid. Answers and notes pointing at unknown questions are never visited,
//! option values with no matching option are exported raw, and spreadsheet engine failures are
//! propagated to the caller without retry.

mod workbook;
mod xlsx;

pub use workbook::{build_workbook, section_sheet_name, ExportSheet, ExportWorkbook, SheetKind};
pub use xlsx::render_xlsx;

use crate::config::CoreConfig;
use crate::localization::Resolver;
use crate::submission::SubmissionExport;
use crate::{CoreError, CoreResult};
use std::path::Path;
use std::sync::Arc;

/// Export operations bound to a startup configuration.
#[derive(Clone, Debug)]
pub struct ExportService {
    cfg: Arc<CoreConfig>,
}

impl ExportService {
    pub fn new(cfg: Arc<CoreConfig>) -> Self {
        Self { cfg }
    }

    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.cfg.default_language())
    }

    /// Build the in-memory workbook without serializing it.
    pub fn build_workbook(&self, submission: &SubmissionExport) -> ExportWorkbook {
        build_workbook(submission, &self.resolver(), self.cfg.date_format())
    }

    /// Export `submission` to `.xlsx` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Export`] if the spreadsheet cannot be generated.
    pub fn export(&self, submission: &SubmissionExport) -> CoreResult<Vec<u8>> {
        let workbook = self.build_workbook(submission);
        let bytes = render_xlsx(&workbook)?;

        tracing::info!(
            "exported submission {} ({} sheets, {} questions, {} bytes)",
            submission.metadata.id,
            workbook.sheets.len(),
            workbook.question_row_count(),
            bytes.len()
        );

        Ok(bytes)
    }

    /// Export `submission` and write the result to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Export`] if generation fails or [`CoreError::FileWrite`] if the file
    /// cannot be written.
    pub fn export_to_path(&self, submission: &SubmissionExport, path: &Path) -> CoreResult<()> {
        let bytes = self.export(submission)?;
        std::fs::write(path, bytes).map_err(CoreError::FileWrite)
    }
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new(Arc::new(CoreConfig::default()))
    }
}

/// Export with the default configuration. See [`ExportService::export`].
pub fn export(submission: &SubmissionExport) -> CoreResult<Vec<u8>> {
    ExportService::default().export(submission)
}
