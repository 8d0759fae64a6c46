//! Rendering an [`ExportWorkbook`] to `.xlsx` bytes with `rust_xlsxwriter`.

use super::workbook::{ExportWorkbook, SheetKind};
use crate::CoreResult;
use rust_xlsxwriter::{Format, FormatAlign, Workbook};

const SUMMARY_COLUMN_WIDTHS: [f64; 2] = [20.0, 45.0];
const SECTION_COLUMN_WIDTHS: [f64; 4] = [16.0, 60.0, 40.0, 60.0];

/// Serialize the workbook. Header rows are bold and frozen; on section sheets the question,
/// answer and notes columns wrap and align to the top.
///
/// # Errors
///
/// Returns [`crate::CoreError::Export`] if the spreadsheet engine rejects a sheet name or cell,
/// or fails to produce the buffer.
pub fn render_xlsx(workbook: &ExportWorkbook) -> CoreResult<Vec<u8>> {
    let mut book = Workbook::new();

    let header_format = Format::new().set_bold();
    let top_format = Format::new().set_align(FormatAlign::Top);
    let wrap_format = Format::new()
        .set_text_wrap()
        .set_align(FormatAlign::Top);

    for sheet in &workbook.sheets {
        let worksheet = book.add_worksheet();
        worksheet.set_name(&sheet.name)?;

        if workbook.right_to_left {
            worksheet.set_right_to_left(true);
        }

        let widths: &[f64] = match sheet.kind {
            SheetKind::Summary => &SUMMARY_COLUMN_WIDTHS,
            SheetKind::Section => &SECTION_COLUMN_WIDTHS,
        };
        for (col, width) in (0u16..).zip(widths) {
            worksheet.set_column_width(col, *width)?;
        }

        for (col, title) in (0u16..).zip(&sheet.header) {
            worksheet.write_string_with_format(0, col, title, &header_format)?;
        }
        worksheet.set_freeze_panes(1, 0)?;

        for (row_num, row) in (1u32..).zip(&sheet.rows) {
            for (col, value) in (0u16..).zip(row) {
                let format = match sheet.kind {
                    SheetKind::Section if col > 0 => &wrap_format,
                    _ => &top_format,
                };
                worksheet.write_string_with_format(row_num, col, value, format)?;
            }
        }
    }

    let bytes = book.save_to_buffer()?;
    Ok(bytes)
}
