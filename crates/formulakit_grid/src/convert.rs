//! Conversion orchestration: normalize, render, assemble.

use crate::assemble::{assemble_composition_table, assemble_paragraph};
use crate::normalize::normalize_rows;
use crate::render::{collect_groups, render_group_lines, render_table_blocks};
use crate::report::ReportConvertBuilder;
use crate::schema::{SpecColumnSchema, detect_group_resolution};
use crate::spec::{
    EnumGroupResolution, EnumParagraphVariant, GridError, SpecConvertOptions, SpecConvertOutput,
    SpecGridTable,
};

/// Convert one ingredient grid into its three documents.
///
/// Behavior is controlled by [`SpecConvertOptions`], including:
/// - group resolution (explicit `Group` column or inline `Name:` headers),
/// - quantity clustering and the singleton `each` rule,
/// - quantity acceptance, unit separator and part-used display,
/// - fixed document texts.
///
/// This function performs:
/// 1. Strategy selection and column schema resolution.
/// 2. Row normalization (blank/header/malformed rows removed).
/// 3. Group rendering for both paragraph variants and the table.
/// 4. Document assembly.
///
/// Returns [`SpecConvertOutput`] with malformed rows listed in its report.
/// Returns [`GridError`] only when the input cannot be read as a grid at all
/// (missing or ambiguous bound columns, contradictory options); no partial output
/// is produced in that case.
pub fn convert_grid(
    table: &SpecGridTable,
    options: &SpecConvertOptions,
) -> Result<SpecConvertOutput, GridError> {
    let rule_group_resolution = resolve_group_resolution(table, options)?;
    let schema = match &options.schema {
        Some(schema) => schema.clone(),
        None => SpecColumnSchema::for_resolution(rule_group_resolution),
    };
    let resolved = schema.resolve(&table.columns)?;
    tracing::debug!(
        target: "formulakit_grid",
        ?rule_group_resolution,
        rule_quantity_merge = ?options.rule_quantity_merge,
        n_rows = table.height(),
        "resolved grid schema"
    );

    let mut builder = ReportConvertBuilder::default();
    let l_rows = normalize_rows(
        table,
        &resolved,
        rule_group_resolution,
        options.rule_quantity,
        &mut builder,
    );

    let l_groups = collect_groups(&l_rows);
    builder.set_groups(l_groups.len());
    if l_groups.is_empty() {
        builder.add_warning("No ingredient rows survived normalization.");
    }

    let english_only = assemble_paragraph(
        EnumParagraphVariant::EnglishOnly,
        render_group_lines(&l_groups, false, options),
        &options.texts,
    );
    let english_hindi_mix = assemble_paragraph(
        EnumParagraphVariant::EnglishHindiMix,
        render_group_lines(&l_groups, true, options),
        &options.texts,
    );
    let composition_table =
        assemble_composition_table(render_table_blocks(&l_groups, options), &options.texts);

    let report = builder.build();
    tracing::debug!(target: "formulakit_grid", "{report}");

    Ok(SpecConvertOutput {
        english_only,
        english_hindi_mix,
        composition_table,
        report,
    })
}

fn resolve_group_resolution(
    table: &SpecGridTable,
    options: &SpecConvertOptions,
) -> Result<EnumGroupResolution, GridError> {
    let rule = match (options.rule_group_resolution, &options.schema) {
        (Some(rule), _) => rule,
        (None, Some(schema)) if schema.has_group_field() => EnumGroupResolution::ExplicitColumn,
        (None, Some(_)) => EnumGroupResolution::InlineHeaderScan,
        (None, None) => detect_group_resolution(&table.columns),
    };

    if let (EnumGroupResolution::ExplicitColumn, Some(schema)) = (rule, &options.schema)
        && !schema.has_group_field()
    {
        return Err(GridError::InvalidOptions(
            "explicit_column group resolution needs a schema binding for `group`.".to_string(),
        ));
    }
    Ok(rule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::EnumCellValue;

    #[test]
    fn explicit_rule_with_groupless_schema_is_rejected() {
        let options = SpecConvertOptions {
            rule_group_resolution: Some(EnumGroupResolution::ExplicitColumn),
            schema: Some(SpecColumnSchema::inline_header()),
            ..Default::default()
        };
        let err = convert_grid(&SpecGridTable::default(), &options).expect_err("invalid");
        assert!(matches!(err, GridError::InvalidOptions(_)));
    }

    #[test]
    fn missing_columns_fail_before_output() {
        let table = SpecGridTable::new(
            vec!["Name".to_string(), "Quantity".to_string()],
            vec![vec![EnumCellValue::from("Bel"), EnumCellValue::Number(1.0)]],
        );
        let err = convert_grid(&table, &SpecConvertOptions::default()).expect_err("schema");
        let GridError::Schema(schema_err) = err else {
            panic!("expected schema error");
        };
        assert!(schema_err.missing.contains(&"Botanical Name".to_string()));
        assert!(schema_err.missing.contains(&"हिंदी नाम (Hindi Name)".to_string()));
        assert!(!schema_err.missing.contains(&"Group".to_string()));
    }
}
