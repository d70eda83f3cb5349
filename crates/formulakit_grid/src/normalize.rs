//! Row normalizer: raw table rows to grouped ingredient rows.

use crate::conf::C_GROUP_HEADER_MARKER;
use crate::report::ReportConvertBuilder;
use crate::schema::{EnumIngredientField, SpecResolvedSchema};
use crate::spec::{
    EnumGroupResolution, EnumQuantityMode, MalformedRowError, SpecGridTable, SpecIngredientRow,
};
use crate::util::{convert_cell_to_text, convert_quantity_to_text, strip_group_header_marker};

/// Normalize all body rows of `table` into ingredient rows tagged with their group.
///
/// - rows with an empty English name are dropped first,
/// - header rows are consumed into the `group` of the rows that follow them,
/// - malformed rows are skipped and recorded in `builder`.
pub fn normalize_rows(
    table: &SpecGridTable,
    schema: &SpecResolvedSchema,
    rule_group_resolution: EnumGroupResolution,
    rule_quantity: EnumQuantityMode,
    builder: &mut ReportConvertBuilder,
) -> Vec<SpecIngredientRow> {
    let mut l_rows = Vec::with_capacity(table.height());
    let mut c_group_current = String::new();

    for n_idx_row in 0..table.height() {
        builder.add_input();
        let read_text = |field: EnumIngredientField| -> String {
            convert_cell_to_text(table.cell_of(n_idx_row, schema.index_of(field)))
        };

        let c_english_name = read_text(EnumIngredientField::EnglishName);

        match rule_group_resolution {
            EnumGroupResolution::ExplicitColumn => {
                if c_english_name.is_empty() {
                    builder.add_blank();
                    continue;
                }
                let c_group_cell = read_text(EnumIngredientField::Group);
                let if_has_group_cell = !c_group_cell.is_empty();
                if if_has_group_cell {
                    c_group_current = c_group_cell;
                }
                if read_text(EnumIngredientField::PartUsedFullForm).is_empty() {
                    builder.add_header();
                    if !if_has_group_cell {
                        builder.add_warning(format!(
                            "Row {n_idx_row} ({c_english_name:?}) has neither part used nor \
                             group; dropped as header."
                        ));
                    }
                    continue;
                }
            }
            EnumGroupResolution::InlineHeaderScan => {
                if c_english_name.is_empty() {
                    builder.add_blank();
                    continue;
                }
                if let Some(c_group) =
                    strip_group_header_marker(&c_english_name, C_GROUP_HEADER_MARKER)
                {
                    c_group_current = c_group;
                    builder.add_header();
                    continue;
                }
            }
        }

        let c_quantity = match convert_quantity_to_text(
            table.cell_of(n_idx_row, schema.index_of(EnumIngredientField::Quantity)),
            rule_quantity,
        ) {
            Ok(c_quantity) => c_quantity,
            Err(reason) => {
                builder.add_skipped(MalformedRowError {
                    row_idx: n_idx_row,
                    english_name: c_english_name,
                    reason,
                });
                continue;
            }
        };

        builder.add_kept();
        l_rows.push(SpecIngredientRow {
            row_idx: n_idx_row,
            english_name: c_english_name,
            botanical_name: read_text(EnumIngredientField::BotanicalName),
            hindi_name: read_text(EnumIngredientField::HindiName),
            part_used_full_form: read_text(EnumIngredientField::PartUsedFullForm),
            part_used_short_form: read_text(EnumIngredientField::PartUsedShortForm),
            quantity: c_quantity,
            unit: read_text(EnumIngredientField::Unit),
            proof_of_concept: read_text(EnumIngredientField::ProofOfConcept),
            group: c_group_current.clone(),
        });
    }

    l_rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::SpecColumnSchema;
    use crate::spec::EnumCellValue;

    fn text_row(cells: &[&str]) -> Vec<EnumCellValue> {
        cells
            .iter()
            .map(|c| {
                if c.is_empty() {
                    EnumCellValue::None
                } else {
                    EnumCellValue::from(*c)
                }
            })
            .collect()
    }

    fn explicit_table(rows: Vec<Vec<EnumCellValue>>) -> SpecGridTable {
        SpecGridTable::new(
            [
                "English Name",
                "Botanical Name",
                "Hindi Name",
                "Part Used Full Form",
                "Part Used Short Form",
                "Quantity",
                "Unit",
                "Proof Of Concept",
                "Group",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            rows,
        )
    }

    fn inline_table(rows: Vec<Vec<EnumCellValue>>) -> SpecGridTable {
        SpecGridTable::new(
            [
                "Name",
                "Botanical Name",
                "हिंदी नाम (Hindi Name)",
                "Part Used Full Form",
                "Quantity",
                "Unit",
                "Proof Of Concept",
            ]
            .iter()
            .map(ToString::to_string)
            .collect(),
            rows,
        )
    }

    fn run(
        table: &SpecGridTable,
        rule: EnumGroupResolution,
    ) -> (Vec<SpecIngredientRow>, crate::report::ReportConvert) {
        let resolved = SpecColumnSchema::for_resolution(rule)
            .resolve(&table.columns)
            .expect("resolve");
        let mut builder = ReportConvertBuilder::default();
        let l_rows =
            normalize_rows(table, &resolved, rule, EnumQuantityMode::Numeric, &mut builder);
        (l_rows, builder.build())
    }

    #[test]
    fn explicit_group_forward_fills_and_drops_headers() {
        let table = explicit_table(vec![
            text_row(&["Amla Pishti", "", "", "", "", "", "", "", "Amla Pishti"]),
            text_row(&["Bel", "Aegle marmelos", "बेल", "St. Bk.", "", "1.75", "mg", "API", ""]),
            text_row(&["Amla", "Emblica officinalis", "आंवला", "Fr.", "", "2", "mg", "", ""]),
            text_row(&["Kwath Dravya", "", "", "", "", "", "", "", "Kwath Dravya"]),
            text_row(&["Haritaki", "Terminalia chebula", "", "Fr. P.", "", "5", "g", "", ""]),
        ]);

        let (l_rows, report) = run(&table, EnumGroupResolution::ExplicitColumn);
        let l_pairs: Vec<(&str, &str)> = l_rows
            .iter()
            .map(|row| (row.group.as_str(), row.english_name.as_str()))
            .collect();
        assert_eq!(
            l_pairs,
            vec![
                ("Amla Pishti", "Bel"),
                ("Amla Pishti", "Amla"),
                ("Kwath Dravya", "Haritaki"),
            ]
        );
        assert_eq!(report.cnt_rows_header, 2);
        assert_eq!(report.cnt_rows_kept, 3);
        assert_eq!(l_rows[0].quantity, "1.75");
    }

    #[test]
    fn explicit_group_blank_named_row_sets_no_group() {
        let table = explicit_table(vec![
            text_row(&["", "", "", "", "", "", "", "", "Churna"]),
            text_row(&["Sonth", "Zingiber officinale", "", "Rz.", "", "3", "g", "", ""]),
        ]);
        let (l_rows, report) = run(&table, EnumGroupResolution::ExplicitColumn);
        assert_eq!(l_rows.len(), 1);
        assert_eq!(l_rows[0].group, "");
        assert_eq!(report.cnt_rows_blank, 1);
        assert_eq!(report.cnt_rows_header, 0);
    }

    #[test]
    fn inline_header_scan_consumes_colon_rows() {
        let table = inline_table(vec![
            text_row(&["Pre", "", "", "Lf.", "1", "g", ""]),
            text_row(&[" Amla Pishti: ", "", "", "", "", "", ""]),
            text_row(&["Bel", "Aegle marmelos", "बेल", "St. Bk.", "1.75", "mg", ""]),
            text_row(&["", "", "", "", "", "", ""]),
            text_row(&["Kwath Dravya (Coarse Powders Of):", "", "", "", "", "", ""]),
            text_row(&["Haritaki", "", "", "Fr.", "5", "g", ""]),
        ]);

        let (l_rows, report) = run(&table, EnumGroupResolution::InlineHeaderScan);
        let l_groups: Vec<&str> = l_rows.iter().map(|row| row.group.as_str()).collect();
        assert_eq!(
            l_groups,
            vec!["", "Amla Pishti", "Kwath Dravya (Coarse Powders Of)"]
        );
        assert!(l_rows.iter().all(|row| !row.english_name.ends_with(':')));
        assert_eq!(report.cnt_rows_input, 6);
        assert_eq!(report.cnt_rows_blank, 1);
        assert_eq!(report.cnt_rows_header, 2);
    }

    #[test]
    fn malformed_quantity_is_skipped_and_reported() {
        let table = inline_table(vec![
            text_row(&["Group A:", "", "", "", "", "", ""]),
            text_row(&["Guggul", "", "", "Gum", "QS", "", ""]),
            vec![
                EnumCellValue::from("Amla"),
                EnumCellValue::None,
                EnumCellValue::None,
                EnumCellValue::from("Fr."),
                EnumCellValue::Number(10.0),
            ],
        ]);

        let (l_rows, report) = run(&table, EnumGroupResolution::InlineHeaderScan);
        assert_eq!(l_rows.len(), 1);
        assert_eq!(l_rows[0].quantity, "10");
        assert_eq!(l_rows[0].unit, "");
        assert_eq!(report.rows_skipped.len(), 1);
        assert_eq!(report.rows_skipped[0].row_idx, 1);
        assert_eq!(report.rows_skipped[0].english_name, "Guggul");
    }
}
