//! Stateless helper utilities used by the XLSX writer kernel.

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder};

use crate::conf::{N_LEN_EXCEL_SHEET_NAME_MAX, TUP_EXCEL_ILLEGAL};
use crate::spec::{SpecAutofitCellsPolicy, SpecCellFormat, XlsxExportError};

////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnWidths

/// Displayed width units of `s`; non-ASCII glyphs (Devanagari) count wider.
///
/// Multi-line text is measured by its longest line.
pub fn estimate_unicode_string_width(s: &str) -> usize {
    s.lines()
        .map(|line| {
            let n_ascii = line.chars().filter(|chr| chr.is_ascii()).count();
            let n_non_ascii = line.chars().count().saturating_sub(n_ascii);
            n_ascii + (n_non_ascii as f64 * 1.6).round() as usize
        })
        .max()
        .unwrap_or(0)
}

/// Validate min/max bounds of an autofit policy.
pub fn validate_policy_autofit(
    policy_autofit: &SpecAutofitCellsPolicy,
) -> Result<(), XlsxExportError> {
    if policy_autofit.width_cell_min == 0 {
        return Err(XlsxExportError::InvalidStyle(
            "policy_autofit.width_cell_min must be >= 1.".to_string(),
        ));
    }
    if policy_autofit.width_cell_max < policy_autofit.width_cell_min {
        return Err(XlsxExportError::InvalidStyle(
            "policy_autofit.width_cell_max must be >= policy_autofit.width_cell_min.".to_string(),
        ));
    }
    Ok(())
}

/// Final column widths for `width` columns from the measured cells of `grid`.
///
/// `grid` holds only rows that occupy individual cells; merged rows are left out.
pub fn derive_column_widths(
    grid: &[Vec<String>],
    width: usize,
    policy_autofit: &SpecAutofitCellsPolicy,
) -> Vec<usize> {
    let n_min = usize::max(1, policy_autofit.width_cell_min);
    let n_max = usize::min(255, usize::max(n_min, policy_autofit.width_cell_max));
    let n_pad = policy_autofit.width_cell_padding;

    let mut l_width_by_col = vec![0usize; width];
    for row in grid {
        for (n_idx_col, value) in row.iter().enumerate().take(width) {
            l_width_by_col[n_idx_col] =
                usize::max(l_width_by_col[n_idx_col], estimate_unicode_string_width(value));
        }
    }

    l_width_by_col
        .into_iter()
        .map(|n_width| usize::min(n_max, usize::max(n_min, n_width + n_pad)))
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Formats

/// Translate a [`SpecCellFormat`] into a `rust_xlsxwriter` format.
pub fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }
    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }
    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "justify" => Some(FormatAlign::Justify),
        "center_across" => Some(FormatAlign::CenterAcross),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        _ => None,
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Addressing

/// Zero-based row index as an Excel row number.
pub fn cast_row_num(value: usize) -> Result<u32, XlsxExportError> {
    u32::try_from(value).map_err(|_| XlsxExportError::IndexOverflow { axis: "row", value })
}

/// Zero-based column index as an Excel column number.
pub fn cast_col_num(value: usize) -> Result<u16, XlsxExportError> {
    u16::try_from(value).map_err(|_| XlsxExportError::IndexOverflow {
        axis: "column",
        value,
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_sheet_name_replaces_illegal_and_truncates() {
        assert_eq!(sanitize_sheet_name("Mix: A/B", "_"), "Mix_ A_B");
        assert_eq!(sanitize_sheet_name("  ", "_"), "Sheet");
        assert_eq!(sanitize_sheet_name(&"x".repeat(40), "_").len(), 31);
    }

    #[test]
    fn unicode_width_counts_devanagari_wider_and_uses_longest_line() {
        assert_eq!(estimate_unicode_string_width("Bel"), 3);
        assert!(estimate_unicode_string_width("बेल") > 3);
        assert_eq!(estimate_unicode_string_width("Group:\nAB"), 6);
        assert_eq!(estimate_unicode_string_width(""), 0);
    }

    #[test]
    fn column_widths_are_clamped_and_padded() {
        let grid = vec![
            vec!["S. No.".to_string(), "x".repeat(100)],
            vec!["1".to_string(), "Bel".to_string()],
        ];
        let policy = SpecAutofitCellsPolicy::default();
        assert_eq!(derive_column_widths(&grid, 3, &policy), vec![8, 60, 8]);
    }

    #[test]
    fn invalid_autofit_bounds_are_rejected() {
        let policy = SpecAutofitCellsPolicy {
            width_cell_min: 10,
            width_cell_max: 5,
            ..Default::default()
        };
        assert!(matches!(
            validate_policy_autofit(&policy),
            Err(XlsxExportError::InvalidStyle(_))
        ));
    }
}
