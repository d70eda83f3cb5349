//! Shared grid specification models, options and error types.

use serde::Deserialize;
use thiserror::Error;

use crate::conf::{
    C_ADDITIVES_NAME, C_ADDITIVES_QUANTITY, C_ADDITIVES_SUFFIX, C_FOOTER_OFFICIAL_SUBSTITUTE,
    C_LEGEND_ENGLISH_ONLY, C_LEGEND_ENGLISH_HINDI_MIX, C_LEGEND_TABLE, C_PREAMBLE,
    C_TITLE_ENGLISH_ONLY, C_TITLE_ENGLISH_HINDI_MIX, C_TITLE_TABLE, TUP_TABLE_HEADER,
};
use crate::schema::SpecColumnSchema;

////////////////////////////////////////////////////////////////////////////////
// #region CellValues

/// Raw cell value as handed over by the table reader.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl<T> From<Option<T>> for EnumCellValue
where
    T: Into<EnumCellValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

/// Rectangular input table: header names plus rows of raw cells.
///
/// Rows may be ragged; missing trailing cells read as [`EnumCellValue::None`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SpecGridTable {
    /// Header names in column order.
    pub columns: Vec<String>,
    /// Body rows.
    pub rows: Vec<Vec<EnumCellValue>>,
}

impl SpecGridTable {
    /// Create a table from header names and body rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<EnumCellValue>>) -> Self {
        Self { columns, rows }
    }

    /// Number of body rows.
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Number of header columns.
    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// Borrow one cell, treating out-of-range cells as missing.
    pub fn cell(&self, row_idx: usize, col_idx: usize) -> &EnumCellValue {
        self.cell_of(row_idx, Some(col_idx))
    }

    /// Borrow one cell of an optionally bound column; unbound reads as missing.
    pub fn cell_of(&self, row_idx: usize, col_idx: Option<usize>) -> &EnumCellValue {
        static CELL_NONE: EnumCellValue = EnumCellValue::None;
        col_idx
            .and_then(|n_idx_col| self.rows.get(row_idx)?.get(n_idx_col))
            .unwrap_or(&CELL_NONE)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// How rows get their group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumGroupResolution {
    /// Forward-fill a dedicated `Group` column; rows without part used are headers.
    ExplicitColumn,
    /// Rows whose name ends with `:` open a new group.
    InlineHeaderScan,
}

/// Whether rows sharing one quantity collapse into an `each` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumQuantityMerge {
    /// One fragment per row.
    None,
    /// Merge rows with identical quantity+unit text (default).
    #[default]
    ClusterBySharedQuantity,
}

/// Acceptance policy for quantity cells that are not numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumQuantityMode {
    /// Non-numeric quantity text makes the row malformed (default).
    #[default]
    Numeric,
    /// Keep non-numeric quantity text verbatim.
    Text,
}

/// Paragraph language variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnumParagraphVariant {
    /// English names with botanical qualifier.
    EnglishOnly,
    /// English names with Hindi transliteration after the qualifier.
    EnglishHindiMix,
}

impl EnumParagraphVariant {
    /// `true` for the mix variant.
    pub fn is_mix(self) -> bool {
        matches!(self, Self::EnglishHindiMix)
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Fixed document texts inserted by the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpecDocumentTexts {
    /// Title line of the English-only paragraph.
    pub title_english_only: String,
    /// Title line of the English-Hindi mix paragraph.
    pub title_english_hindi_mix: String,
    /// Caption line of the composition table.
    pub title_table: String,
    /// Column legend of the English-only paragraph.
    pub legend_english_only: String,
    /// Column legend of the English-Hindi mix paragraph.
    pub legend_english_hindi_mix: String,
    /// Column legend caption of the composition table.
    pub legend_table: String,
    /// Line preceding the group lines.
    pub preamble: String,
    /// Text attached to the last group line, without the final period.
    pub additives_suffix: String,
    /// Name cell of the table additives row.
    pub additives_name: String,
    /// Quantity cell of the table additives row.
    pub additives_quantity: String,
    /// Footer marker line.
    pub footer: String,
    /// Composition table column header.
    pub table_header: Vec<String>,
}

impl Default for SpecDocumentTexts {
    fn default() -> Self {
        Self {
            title_english_only: C_TITLE_ENGLISH_ONLY.to_string(),
            title_english_hindi_mix: C_TITLE_ENGLISH_HINDI_MIX.to_string(),
            title_table: C_TITLE_TABLE.to_string(),
            legend_english_only: C_LEGEND_ENGLISH_ONLY.to_string(),
            legend_english_hindi_mix: C_LEGEND_ENGLISH_HINDI_MIX.to_string(),
            legend_table: C_LEGEND_TABLE.to_string(),
            preamble: C_PREAMBLE.to_string(),
            additives_suffix: C_ADDITIVES_SUFFIX.to_string(),
            additives_name: C_ADDITIVES_NAME.to_string(),
            additives_quantity: C_ADDITIVES_QUANTITY.to_string(),
            footer: C_FOOTER_OFFICIAL_SUBSTITUTE.to_string(),
            table_header: TUP_TABLE_HEADER.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Input options for [`crate::convert::convert_grid`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpecConvertOptions {
    /// Group resolution strategy; `None` detects it from the columns present.
    pub rule_group_resolution: Option<EnumGroupResolution>,
    /// Quantity clustering strategy.
    pub rule_quantity_merge: EnumQuantityMerge,
    /// Quantity acceptance policy.
    pub rule_quantity: EnumQuantityMode,
    /// Give single-row quantity clusters an `each` clause too.
    pub if_singleton_each: bool,
    /// Print part used as a second parenthesized group after a botanical name.
    pub if_show_part_used: bool,
    /// Text placed between quantity and a non-empty unit.
    pub unit_separator: String,
    /// Column schema override; `None` picks the preset of the resolved strategy.
    pub schema: Option<SpecColumnSchema>,
    /// Fixed document texts.
    pub texts: SpecDocumentTexts,
}

impl Default for SpecConvertOptions {
    fn default() -> Self {
        Self {
            rule_group_resolution: None,
            rule_quantity_merge: EnumQuantityMerge::ClusterBySharedQuantity,
            rule_quantity: EnumQuantityMode::Numeric,
            if_singleton_each: false,
            if_show_part_used: true,
            unit_separator: String::new(),
            schema: None,
            texts: SpecDocumentTexts::default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Models

/// One normalized constituent of a formulation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecIngredientRow {
    /// Zero-based index of the source body row.
    pub row_idx: usize,
    /// English name; never empty, never a `:` header marker.
    pub english_name: String,
    /// Botanical name, empty when absent.
    pub botanical_name: String,
    /// Hindi name, empty when absent.
    pub hindi_name: String,
    /// Part used, full form.
    pub part_used_full_form: String,
    /// Part used, abbreviated form.
    pub part_used_short_form: String,
    /// Quantity as normalized text (`5`, `1.75`, or verbatim text).
    pub quantity: String,
    /// Unit, empty when absent.
    pub unit: String,
    /// Proof-of-concept reference.
    pub proof_of_concept: String,
    /// Resolved group name; empty for rows preceding any group header.
    pub group: String,
}

/// Ingredient rows of one group, in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecGroup<'a> {
    /// Group name.
    pub name: &'a str,
    /// Member rows.
    pub rows: Vec<&'a SpecIngredientRow>,
}

/// Ordered lines of one paragraph document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecParagraphDocument {
    /// Language variant.
    pub variant: EnumParagraphVariant,
    /// Title, legend, blank, preamble, group lines, footer.
    pub lines: Vec<String>,
}

impl SpecParagraphDocument {
    /// Join lines with newlines.
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }
}

/// Data row of the composition table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCompositionEntry {
    /// 1-based serial, continuous across groups.
    pub serial: usize,
    /// English name plus parenthesized botanical name when present.
    pub english_combined_name: String,
    /// Part used, full form.
    pub part_used_full_form: String,
    /// Quantity+unit text.
    pub quantity: String,
    /// Proof-of-concept reference.
    pub proof_of_concept: String,
}

/// One composition table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumCompositionRow {
    /// Caption text spanning the table width.
    Caption(String),
    /// Column header cells.
    Header(Vec<String>),
    /// Group section header spanning the table width.
    Section(String),
    /// Ingredient data row.
    Ingredient(SpecCompositionEntry),
    /// Trailing permitted additives row.
    Additives {
        /// Name cell text.
        name: String,
        /// Quantity cell text.
        quantity: String,
    },
    /// Footer marker spanning the table width.
    Footer(String),
}

/// Ordered composition table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecCompositionTable {
    /// Table width in cells.
    pub width: usize,
    /// Rows in display order.
    pub rows: Vec<EnumCompositionRow>,
}

impl SpecCompositionTable {
    /// Iterate ingredient data rows only.
    pub fn entries(&self) -> impl Iterator<Item = &SpecCompositionEntry> {
        self.rows.iter().filter_map(|row| match row {
            EnumCompositionRow::Ingredient(entry) => Some(entry),
            _ => None,
        })
    }

    /// Group names of the section rows, in order.
    pub fn section_names(&self) -> Vec<&str> {
        self.rows
            .iter()
            .filter_map(|row| match row {
                EnumCompositionRow::Section(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Flatten into a rectangular text grid; spanning rows fill column 0 only.
    pub fn to_string_grid(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| {
                let mut l_cells = vec![String::new(); self.width];
                match row {
                    EnumCompositionRow::Caption(text)
                    | EnumCompositionRow::Section(text)
                    | EnumCompositionRow::Footer(text) => {
                        if let Some(cell) = l_cells.first_mut() {
                            *cell = text.clone();
                        }
                    }
                    EnumCompositionRow::Header(l_header) => {
                        for (cell, text) in l_cells.iter_mut().zip(l_header) {
                            *cell = text.clone();
                        }
                    }
                    EnumCompositionRow::Ingredient(entry) => {
                        for (cell, text) in l_cells.iter_mut().zip([
                            entry.serial.to_string(),
                            entry.english_combined_name.clone(),
                            entry.part_used_full_form.clone(),
                            entry.quantity.clone(),
                            entry.proof_of_concept.clone(),
                        ]) {
                            *cell = text;
                        }
                    }
                    EnumCompositionRow::Additives { name, quantity } => {
                        if let Some(cell) = l_cells.get_mut(1) {
                            *cell = name.clone();
                        }
                        if let Some(cell) = l_cells.get_mut(3) {
                            *cell = quantity.clone();
                        }
                    }
                }
                l_cells
            })
            .collect()
    }
}

/// The three documents of one conversion plus its diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecConvertOutput {
    /// English-only paragraph.
    pub english_only: SpecParagraphDocument,
    /// English-Hindi mix paragraph.
    pub english_hindi_mix: SpecParagraphDocument,
    /// Composition table.
    pub composition_table: SpecCompositionTable,
    /// Counters, skipped rows and warnings.
    pub report: crate::report::ReportConvert,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Required columns are absent from the input header.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Missing required columns: {}", .missing.join(", "))]
pub struct SchemaError {
    /// Canonical names of the missing columns, in schema order.
    pub missing: Vec<String>,
}

/// A row that could not be coerced into an ingredient; skipped, not fatal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Row {row_idx} ({english_name:?}) skipped: {reason}")]
pub struct MalformedRowError {
    /// Zero-based index of the source body row.
    pub row_idx: usize,
    /// English name of the skipped row.
    pub english_name: String,
    /// User-facing reason.
    pub reason: String,
}

/// "Conversion call failed" errors; no output is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Required columns missing.
    #[error(transparent)]
    Schema(#[from] SchemaError),
    /// A header bound to a field appears more than once.
    #[error("{0}")]
    DuplicateColumns(String),
    /// Options are contradictory.
    #[error("Invalid options: {0}")]
    InvalidOptions(String),
    /// Input frame could not be read.
    #[error("Failed to read DataFrame: {0}")]
    DataFrame(String),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
