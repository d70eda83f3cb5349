//! Shared XLSX specification models.

use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormatSpecification

/// Cell format specification; unset fields fall through on merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Text wrap.
    pub text_wrap: Option<bool>,

    /// Background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            text_wrap: other.text_wrap.or(self.text_wrap),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleOptions

/// Autofit policy for table column widths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecAutofitCellsPolicy {
    /// Infer widths at all.
    pub if_autofit: bool,
    /// Minimum final width.
    pub width_cell_min: usize,
    /// Maximum final width.
    pub width_cell_max: usize,
    /// Width padding added after inference.
    pub width_cell_padding: usize,
}

impl Default for SpecAutofitCellsPolicy {
    fn default() -> Self {
        Self {
            if_autofit: true,
            width_cell_min: 8,
            width_cell_max: 60,
            width_cell_padding: 2,
        }
    }
}

/// Read-only styling shared by every sheet of one workbook.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecCompositionXlsxStyle {
    /// Ingredient and additives cells.
    pub fmt_text: SpecCellFormat,
    /// Column header cells.
    pub fmt_header: SpecCellFormat,
    /// Title and legend rows, merged across the table width.
    pub fmt_caption: SpecCellFormat,
    /// Group section rows, merged across the table width.
    pub fmt_section: SpecCellFormat,
    /// Footer marker row.
    pub fmt_footer: SpecCellFormat,
    /// Paragraph sheet lines.
    pub fmt_paragraph: SpecCellFormat,
    /// Table column autofit.
    pub policy_autofit: SpecAutofitCellsPolicy,
    /// Fixed width of the single paragraph column.
    pub width_paragraph_col: f64,
}

impl Default for SpecCompositionXlsxStyle {
    fn default() -> Self {
        crate::conf::derive_default_composition_style()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ReportSpecification

/// One written worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecXlsxSheet {
    /// Actual unique sheet name in workbook.
    pub sheet_name: String,
    /// Rows written.
    pub cnt_rows: usize,
    /// Columns written.
    pub cnt_cols: usize,
    /// Merged ranges written.
    pub cnt_merges: usize,
}

/// Per-write call report.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecXlsxReport {
    /// Sheets produced by the write call.
    pub sheets: Vec<SpecXlsxSheet>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl SpecXlsxReport {
    /// Add a warning message.
    pub fn warn(&mut self, msg: impl AsRef<str>) {
        tracing::warn!(target: "formulakit_io_xlsx", "{}", msg.as_ref());
        self.warnings.push(msg.as_ref().to_string());
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Workbook export failures.
#[derive(Debug, Error)]
pub enum XlsxExportError {
    /// Writer already flushed.
    #[error("Cannot write after close().")]
    Closed,
    /// Style policy is inconsistent.
    #[error("Invalid style: {0}")]
    InvalidStyle(String),
    /// Row/column index exceeds Excel's address space.
    #[error("{axis} index overflow: {value}")]
    IndexOverflow {
        /// `row` or `column`.
        axis: &'static str,
        /// Offending zero-based index.
        value: usize,
    },
    /// Error raised by the workbook backend.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
