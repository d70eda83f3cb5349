//! `formulakit_io_xlsx` v1:
//! Styled XLSX export of composition documents.
//!
//! Modules:
//! - `conf`   : Excel limits, sheet names and default style presets
//! - `spec`   : formats/policies/reports/errors
//! - `util`   : pure helper functions
//! - `writer` : workbook writer kernel
pub mod conf;
pub mod spec;
pub mod util;
pub mod writer;

pub use conf::{
    C_SHEET_COMPOSITION, C_SHEET_ENGLISH_HINDI_MIX, C_SHEET_ENGLISH_ONLY,
    N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL, derive_default_composition_formats,
    derive_default_composition_style,
};
pub use spec::{
    SpecAutofitCellsPolicy, SpecCellFormat, SpecCompositionXlsxStyle, SpecXlsxReport,
    SpecXlsxSheet, XlsxExportError,
};
pub use util::sanitize_sheet_name;
pub use writer::{CompositionXlsxWriter, write_output_xlsx};
