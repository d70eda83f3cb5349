//! XLSX writer kernel for composition tables and paragraph documents.

use std::collections::BTreeSet;
use std::path::PathBuf;

use formulakit_grid::{
    EnumCompositionRow, EnumParagraphVariant, SpecCompositionTable, SpecConvertOutput,
    SpecParagraphDocument,
};
use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::conf::{
    C_SHEET_COMPOSITION, C_SHEET_ENGLISH_HINDI_MIX, C_SHEET_ENGLISH_ONLY,
    N_LEN_EXCEL_SHEET_NAME_MAX,
};
use crate::spec::{SpecCompositionXlsxStyle, SpecXlsxReport, SpecXlsxSheet, XlsxExportError};
use crate::util::{
    cast_col_num, cast_row_num, derive_column_widths, derive_rust_xlsx_format,
    sanitize_sheet_name, validate_policy_autofit,
};

/// Stateful workbook writer.
pub struct CompositionXlsxWriter {
    path_file_out: PathBuf,
    workbook: Workbook,
    style: SpecCompositionXlsxStyle,
    set_sheet_names_existing: BTreeSet<String>,
    l_reports: Vec<SpecXlsxReport>,
    if_closed: bool,
}

impl CompositionXlsxWriter {
    /// Create writer bound to output path and style presets.
    ///
    /// The workbook is buffered in memory until [`Self::close`] is called.
    pub fn new(
        path_file_out: PathBuf,
        style: SpecCompositionXlsxStyle,
    ) -> Result<Self, XlsxExportError> {
        validate_policy_autofit(&style.policy_autofit)?;
        Ok(Self {
            path_file_out,
            workbook: Workbook::new(),
            style,
            set_sheet_names_existing: BTreeSet::new(),
            l_reports: Vec::new(),
            if_closed: false,
        })
    }

    /// Return output file path as string.
    pub fn file_out(&self) -> String {
        self.path_file_out.to_string_lossy().to_string()
    }

    /// Return immutable snapshot of per-sheet write reports.
    pub fn report(&self) -> Vec<SpecXlsxReport> {
        self.l_reports.clone()
    }

    /// Flush workbook to disk. Idempotent.
    pub fn close(&mut self) -> Result<(), XlsxExportError> {
        if self.if_closed {
            return Ok(());
        }
        self.workbook.save(&self.path_file_out)?;
        self.if_closed = true;
        tracing::debug!(
            target: "formulakit_io_xlsx",
            path = %self.path_file_out.display(),
            n_sheets = self.set_sheet_names_existing.len(),
            "saved workbook"
        );
        Ok(())
    }

    /// Write the composition table and both paragraphs under their default sheet names.
    pub fn write_output(&mut self, output: &SpecConvertOutput) -> Result<(), XlsxExportError> {
        self.write_composition_sheet(&output.composition_table, C_SHEET_COMPOSITION)?;
        self.write_paragraph_sheet(&output.english_only, None)?;
        self.write_paragraph_sheet(&output.english_hindi_mix, None)?;
        Ok(())
    }

    /// Write one composition table sheet.
    ///
    /// Caption, section and footer rows are merged across the table width;
    /// header, ingredient and additives rows fill individual cells.
    pub fn write_composition_sheet(
        &mut self,
        table: &SpecCompositionTable,
        sheet_name: &str,
    ) -> Result<(), XlsxExportError> {
        if self.if_closed {
            return Err(XlsxExportError::Closed);
        }

        let mut report = SpecXlsxReport::default();
        let sheet_name_unique = self.derive_unique_sheet_name(sheet_name, &mut report);

        let fmt_text = derive_rust_xlsx_format(&self.style.fmt_text);
        let fmt_header = derive_rust_xlsx_format(&self.style.fmt_header);
        let fmt_caption = derive_rust_xlsx_format(&self.style.fmt_caption);
        let fmt_section = derive_rust_xlsx_format(&self.style.fmt_section);
        let fmt_footer = derive_rust_xlsx_format(&self.style.fmt_footer);

        let n_width = usize::max(1, table.width);
        let n_col_last = cast_col_num(n_width - 1)?;
        let l_grid = table.to_string_grid();

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name_unique)?;

        let mut l_grid_measured: Vec<Vec<String>> = Vec::new();
        let mut n_merges = 0usize;
        for (n_idx_row, (row, l_cells)) in table.rows.iter().zip(&l_grid).enumerate() {
            let n_row = cast_row_num(n_idx_row)?;
            match row {
                EnumCompositionRow::Caption(text) => {
                    n_merges +=
                        write_spanning_row(worksheet, n_row, n_col_last, text, &fmt_caption)?;
                }
                EnumCompositionRow::Section(text) => {
                    n_merges +=
                        write_spanning_row(worksheet, n_row, n_col_last, text, &fmt_section)?;
                }
                EnumCompositionRow::Footer(text) => {
                    n_merges +=
                        write_spanning_row(worksheet, n_row, n_col_last, text, &fmt_footer)?;
                }
                EnumCompositionRow::Header(_) => {
                    write_row_cells(worksheet, n_row, l_cells, &fmt_header)?;
                    l_grid_measured.push(l_cells.clone());
                    worksheet.set_freeze_panes(n_row + 1, 0)?;
                }
                EnumCompositionRow::Ingredient(entry) => {
                    write_row_cells(worksheet, n_row, l_cells, &fmt_text)?;
                    worksheet.write_number_with_format(n_row, 0, entry.serial as f64, &fmt_text)?;
                    l_grid_measured.push(l_cells.clone());
                }
                EnumCompositionRow::Additives { .. } => {
                    write_row_cells(worksheet, n_row, l_cells, &fmt_text)?;
                    l_grid_measured.push(l_cells.clone());
                }
            }
        }

        if self.style.policy_autofit.if_autofit {
            let l_widths =
                derive_column_widths(&l_grid_measured, n_width, &self.style.policy_autofit);
            for (n_idx_col, n_width_col) in l_widths.into_iter().enumerate() {
                worksheet.set_column_width(cast_col_num(n_idx_col)?, n_width_col as f64)?;
            }
        }

        tracing::debug!(
            target: "formulakit_io_xlsx",
            sheet = %sheet_name_unique,
            n_rows = table.rows.len(),
            n_merges,
            "wrote composition sheet"
        );
        report.sheets.push(SpecXlsxSheet {
            sheet_name: sheet_name_unique,
            cnt_rows: table.rows.len(),
            cnt_cols: n_width,
            cnt_merges: n_merges,
        });
        self.l_reports.push(report);
        Ok(())
    }

    /// Write one paragraph document, one line per row in a single wrapped column.
    ///
    /// `sheet_name` defaults to the variant's sheet name.
    pub fn write_paragraph_sheet(
        &mut self,
        document: &SpecParagraphDocument,
        sheet_name: Option<&str>,
    ) -> Result<(), XlsxExportError> {
        if self.if_closed {
            return Err(XlsxExportError::Closed);
        }

        let c_sheet_name = sheet_name.unwrap_or(match document.variant {
            EnumParagraphVariant::EnglishOnly => C_SHEET_ENGLISH_ONLY,
            EnumParagraphVariant::EnglishHindiMix => C_SHEET_ENGLISH_HINDI_MIX,
        });
        let mut report = SpecXlsxReport::default();
        let sheet_name_unique = self.derive_unique_sheet_name(c_sheet_name, &mut report);

        let fmt_title = derive_rust_xlsx_format(&self.style.fmt_section);
        let fmt_paragraph = derive_rust_xlsx_format(&self.style.fmt_paragraph);

        let worksheet = self.workbook.add_worksheet();
        worksheet.set_name(&sheet_name_unique)?;
        worksheet.set_column_width(0, self.style.width_paragraph_col)?;

        for (n_idx_row, line) in document.lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let fmt = if n_idx_row == 0 { &fmt_title } else { &fmt_paragraph };
            worksheet.write_string_with_format(cast_row_num(n_idx_row)?, 0, line, fmt)?;
        }

        report.sheets.push(SpecXlsxSheet {
            sheet_name: sheet_name_unique,
            cnt_rows: document.lines.len(),
            cnt_cols: 1,
            cnt_merges: 0,
        });
        self.l_reports.push(report);
        Ok(())
    }

    fn derive_unique_sheet_name(&mut self, name: &str, report: &mut SpecXlsxReport) -> String {
        let c_name = sanitize_sheet_name(name, "_");
        if c_name != name {
            report.warn(format!("Sheet name {name:?} sanitized to {c_name:?}."));
        }
        if !self.set_sheet_names_existing.contains(&c_name) {
            self.set_sheet_names_existing.insert(c_name.clone());
            return c_name;
        }

        let base_name: String = c_name
            .chars()
            .take(usize::max(1, N_LEN_EXCEL_SHEET_NAME_MAX - 3))
            .collect();

        let mut n_idx = 2usize;
        loop {
            let candidate: String = format!("{base_name}__{n_idx}")
                .chars()
                .take(N_LEN_EXCEL_SHEET_NAME_MAX)
                .collect();
            if !self.set_sheet_names_existing.contains(&candidate) {
                report.warn(format!("Sheet name {c_name:?} already used; wrote {candidate:?}."));
                self.set_sheet_names_existing.insert(candidate.clone());
                return candidate;
            }
            n_idx += 1;
        }
    }
}

/// Write all three documents of `output` to `path_file_out` and flush.
pub fn write_output_xlsx(
    path_file_out: PathBuf,
    output: &SpecConvertOutput,
    style: SpecCompositionXlsxStyle,
) -> Result<Vec<SpecXlsxReport>, XlsxExportError> {
    let mut writer = CompositionXlsxWriter::new(path_file_out, style)?;
    writer.write_output(output)?;
    writer.close()?;
    Ok(writer.report())
}

fn write_spanning_row(
    worksheet: &mut Worksheet,
    row: u32,
    col_last: u16,
    text: &str,
    format: &Format,
) -> Result<usize, XlsxExportError> {
    if col_last == 0 {
        worksheet.write_string_with_format(row, 0, text, format)?;
        return Ok(0);
    }
    worksheet.merge_range(row, 0, row, col_last, text, format)?;
    Ok(1)
}

fn write_row_cells(
    worksheet: &mut Worksheet,
    row: u32,
    cells: &[String],
    format: &Format,
) -> Result<(), XlsxExportError> {
    for (n_idx_col, value) in cells.iter().enumerate() {
        let n_col = cast_col_num(n_idx_col)?;
        if value.is_empty() {
            worksheet.write_blank(row, n_col, format)?;
        } else {
            worksheet.write_string_with_format(row, n_col, value, format)?;
        }
    }
    Ok(())
}
