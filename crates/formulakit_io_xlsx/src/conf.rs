//! XLSX constants and default style preset factories.

use std::collections::BTreeMap;

use crate::spec::{SpecCellFormat, SpecCompositionXlsxStyle};

/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Default sheet name of the composition table.
pub const C_SHEET_COMPOSITION: &str = "Composition Table";
/// Default sheet name of the English-only paragraph.
pub const C_SHEET_ENGLISH_ONLY: &str = "English Only";
/// Default sheet name of the English-Hindi mix paragraph.
pub const C_SHEET_ENGLISH_HINDI_MIX: &str = "English-Hindi Mix";

/// Column width of paragraph sheets.
pub const N_WIDTH_PARAGRAPH_COL: f64 = 100.0;

/// Build default named format presets used by [`crate::writer::CompositionXlsxWriter`].
///
/// Keys: `text`, `header`, `caption`, `section`, `footer`, `paragraph`.
pub fn derive_default_composition_formats() -> BTreeMap<String, SpecCellFormat> {
    let cfg_base_fmt_spec = SpecCellFormat {
        font_name: Some("Times New Roman".to_string()),
        font_size: Some(11),
        border: Some(1),
        align: Some("left".to_string()),
        valign: Some("vcenter".to_string()),
        ..Default::default()
    };

    let mut dict_fmt = BTreeMap::new();
    dict_fmt.insert("text".to_string(), cfg_base_fmt_spec.clone());
    dict_fmt.insert(
        "header".to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            align: Some("center".to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        "caption".to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            font_size: Some(12),
            align: Some("center".to_string()),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        "section".to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            bold: Some(true),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        "footer".to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            italic: Some(true),
            border: Some(0),
            ..Default::default()
        }),
    );
    dict_fmt.insert(
        "paragraph".to_string(),
        cfg_base_fmt_spec.with_(SpecCellFormat {
            border: Some(0),
            text_wrap: Some(true),
            valign: Some("top".to_string()),
            ..Default::default()
        }),
    );

    dict_fmt
}

/// Build the default workbook style from [`derive_default_composition_formats`].
pub fn derive_default_composition_style() -> SpecCompositionXlsxStyle {
    let dict_fmt = derive_default_composition_formats();
    let take = |key: &str| dict_fmt.get(key).cloned().unwrap_or_default();

    SpecCompositionXlsxStyle {
        fmt_text: take("text"),
        fmt_header: take("header"),
        fmt_caption: take("caption"),
        fmt_section: take("section"),
        fmt_footer: take("footer"),
        fmt_paragraph: take("paragraph"),
        policy_autofit: Default::default(),
        width_paragraph_col: N_WIDTH_PARAGRAPH_COL,
    }
}
