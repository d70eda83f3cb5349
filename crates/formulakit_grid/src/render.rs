//! Group renderer: per-group paragraph lines and composition table blocks.
//!
//! Fragment grammar (brackets mark optional parts):
//!
//! ```text
//! english: NAME[ (QUALIFIER)][ (PART)][ QTY]
//! mix:     NAME[ (QUALIFIER)][/ HINDI][ (PART)][ QTY]
//! ```
//!
//! `QUALIFIER` is the botanical name, or the full part-used form when the
//! botanical name is absent. `PART` only follows a botanical qualifier.

use std::collections::HashMap;

use crate::spec::{
    EnumCompositionRow, EnumQuantityMerge, SpecCompositionEntry, SpecConvertOptions, SpecGroup,
    SpecIngredientRow,
};
use crate::util::join_quantity_unit;

////////////////////////////////////////////////////////////////////////////////
// #region Grouping

/// Collect rows into groups ordered by first appearance.
///
/// Rows of one group keep their source order even when the group is interrupted.
pub fn collect_groups(rows: &[SpecIngredientRow]) -> Vec<SpecGroup<'_>> {
    let mut l_groups: Vec<SpecGroup<'_>> = Vec::new();
    let mut dict_pos_by_name: HashMap<&str, usize> = HashMap::new();

    for row in rows {
        let n_pos = *dict_pos_by_name
            .entry(row.group.as_str())
            .or_insert_with(|| {
                l_groups.push(SpecGroup {
                    name: row.group.as_str(),
                    rows: Vec::new(),
                });
                l_groups.len() - 1
            });
        l_groups[n_pos].rows.push(row);
    }

    l_groups
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Fragments

/// Rendered `quantity+unit` text of one row.
pub fn render_quantity(row: &SpecIngredientRow, options: &SpecConvertOptions) -> String {
    join_quantity_unit(&row.quantity, &row.unit, &options.unit_separator)
}

/// Name, qualifier, Hindi name and part used of one row, without quantity.
pub fn render_name_fragment(
    row: &SpecIngredientRow,
    if_mix: bool,
    options: &SpecConvertOptions,
) -> String {
    let mut c_fragment = row.english_name.clone();

    let if_has_botanical = !row.botanical_name.is_empty();
    let c_qualifier = if if_has_botanical {
        row.botanical_name.as_str()
    } else {
        row.part_used_full_form.as_str()
    };
    if !c_qualifier.is_empty() {
        c_fragment.push_str(&format!(" ({c_qualifier})"));
    }

    if if_mix && !row.hindi_name.is_empty() {
        c_fragment.push_str(&format!("/ {}", row.hindi_name));
    }

    if options.if_show_part_used && if_has_botanical {
        let c_part = if row.part_used_short_form.is_empty() {
            row.part_used_full_form.as_str()
        } else {
            row.part_used_short_form.as_str()
        };
        if !c_part.is_empty() {
            c_fragment.push_str(&format!(" ({c_part})"));
        }
    }

    c_fragment
}

/// Full fragment of one row: name fragment followed by its quantity.
pub fn render_row_fragment(
    row: &SpecIngredientRow,
    if_mix: bool,
    options: &SpecConvertOptions,
) -> String {
    let c_name = render_name_fragment(row, if_mix, options);
    let c_qty = render_quantity(row, options);
    if c_qty.is_empty() {
        c_name
    } else {
        format!("{c_name} {c_qty}")
    }
}

/// Partition rows by rendered quantity, distinct quantities in first-seen order.
pub fn cluster_by_quantity<'a>(
    rows: &[&'a SpecIngredientRow],
    options: &SpecConvertOptions,
) -> Vec<(String, Vec<&'a SpecIngredientRow>)> {
    let mut l_clusters: Vec<(String, Vec<&'a SpecIngredientRow>)> = Vec::new();
    let mut dict_pos_by_qty: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let c_qty = render_quantity(row, options);
        match dict_pos_by_qty.get(&c_qty) {
            Some(n_pos) => l_clusters[*n_pos].1.push(*row),
            None => {
                dict_pos_by_qty.insert(c_qty.clone(), l_clusters.len());
                l_clusters.push((c_qty, vec![*row]));
            }
        }
    }

    l_clusters
}

/// Fragments of one group, already clustered when the options ask for it.
pub fn render_group_fragments(
    rows: &[&SpecIngredientRow],
    if_mix: bool,
    options: &SpecConvertOptions,
) -> Vec<String> {
    match options.rule_quantity_merge {
        EnumQuantityMerge::None => rows
            .iter()
            .map(|row| render_row_fragment(row, if_mix, options))
            .collect(),
        EnumQuantityMerge::ClusterBySharedQuantity => cluster_by_quantity(rows, options)
            .into_iter()
            .flat_map(|(c_qty, l_members)| {
                let if_use_each =
                    !c_qty.is_empty() && (l_members.len() > 1 || options.if_singleton_each);
                if if_use_each {
                    let c_names = l_members
                        .iter()
                        .map(|row| render_name_fragment(row, if_mix, options))
                        .collect::<Vec<_>>()
                        .join(", ");
                    vec![format!("{c_names} each {c_qty}")]
                } else {
                    l_members
                        .iter()
                        .map(|row| render_row_fragment(row, if_mix, options))
                        .collect()
                }
            })
            .collect(),
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Lines

/// One group's paragraph line.
///
/// The last group of a document carries the additives suffix in place of the
/// bare final period. An unnamed group has no `"<Group>:\n"` prefix.
pub fn render_group_line(
    group: &SpecGroup<'_>,
    if_mix: bool,
    if_is_last: bool,
    options: &SpecConvertOptions,
) -> String {
    let c_body = render_group_fragments(&group.rows, if_mix, options).join("; ");
    let c_tail = if if_is_last {
        format!(" {}.", options.texts.additives_suffix)
    } else {
        ".".to_string()
    };

    if group.name.is_empty() {
        format!("{c_body}{c_tail}")
    } else {
        format!("{}:\n{c_body}{c_tail}", group.name)
    }
}

/// All group lines of one paragraph variant, in group order.
pub fn render_group_lines(
    groups: &[SpecGroup<'_>],
    if_mix: bool,
    options: &SpecConvertOptions,
) -> Vec<String> {
    let n_groups = groups.len();
    groups
        .iter()
        .enumerate()
        .map(|(n_idx, group)| render_group_line(group, if_mix, n_idx + 1 == n_groups, options))
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TableRows

/// Ingredient name column of the composition table.
pub fn render_combined_name(row: &SpecIngredientRow) -> String {
    if row.botanical_name.is_empty() {
        row.english_name.clone()
    } else {
        format!("{} ({})", row.english_name, row.botanical_name)
    }
}

/// Section and data rows for all groups; serials run across group boundaries.
pub fn render_table_blocks(
    groups: &[SpecGroup<'_>],
    options: &SpecConvertOptions,
) -> Vec<EnumCompositionRow> {
    let mut l_rows = Vec::new();
    let mut n_serial = 0usize;

    for group in groups {
        if !group.name.is_empty() {
            l_rows.push(EnumCompositionRow::Section(group.name.to_string()));
        }
        for row in &group.rows {
            n_serial += 1;
            l_rows.push(EnumCompositionRow::Ingredient(SpecCompositionEntry {
                serial: n_serial,
                english_combined_name: render_combined_name(row),
                part_used_full_form: row.part_used_full_form.clone(),
                quantity: render_quantity(row, options),
                proof_of_concept: row.proof_of_concept.clone(),
            }));
        }
    }

    l_rows
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    fn row(group: &str, name: &str, hindi: &str, qty: &str, unit: &str) -> SpecIngredientRow {
        SpecIngredientRow {
            english_name: name.to_string(),
            hindi_name: hindi.to_string(),
            quantity: qty.to_string(),
            unit: unit.to_string(),
            group: group.to_string(),
            ..Default::default()
        }
    }

    fn bel() -> SpecIngredientRow {
        SpecIngredientRow {
            english_name: "Bel".to_string(),
            botanical_name: "Aegle marmelos".to_string(),
            hindi_name: "बेल".to_string(),
            part_used_full_form: "St. Bk.".to_string(),
            quantity: "1.75".to_string(),
            unit: "mg".to_string(),
            group: "Amla Pishti".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn fragment_prefers_botanical_and_appends_part_used() {
        let options = SpecConvertOptions::default();
        assert_eq!(
            render_row_fragment(&bel(), false, &options),
            "Bel (Aegle marmelos) (St. Bk.) 1.75mg"
        );
        assert_eq!(
            render_row_fragment(&bel(), true, &options),
            "Bel (Aegle marmelos)/ बेल (St. Bk.) 1.75mg"
        );
    }

    #[test]
    fn fragment_falls_back_to_part_used_and_never_prints_empty_parens() {
        let options = SpecConvertOptions::default();
        let mut r = bel();
        r.botanical_name.clear();
        assert_eq!(render_row_fragment(&r, false, &options), "Bel (St. Bk.) 1.75mg");
        assert_eq!(render_row_fragment(&r, true, &options), "Bel (St. Bk.)/ बेल 1.75mg");

        r.part_used_full_form.clear();
        r.hindi_name.clear();
        let c_frag = render_row_fragment(&r, true, &options);
        assert_eq!(c_frag, "Bel 1.75mg");
        assert!(!c_frag.contains("()"));
    }

    #[test]
    fn fragment_prefers_short_part_form_and_honors_unit_separator() {
        let options = SpecConvertOptions {
            unit_separator: " ".to_string(),
            ..Default::default()
        };
        let mut r = bel();
        r.part_used_short_form = "Bk.".to_string();
        assert_eq!(
            render_row_fragment(&r, false, &options),
            "Bel (Aegle marmelos) (Bk.) 1.75 mg"
        );
    }

    #[test]
    fn clustering_with_singleton_each() {
        let rows = [
            row("G", "A", "hA", "5", "g"),
            row("G", "B", "hB", "5", "g"),
            row("G", "C", "hC", "10", "g"),
        ];
        let l_refs: Vec<&SpecIngredientRow> = rows.iter().collect();
        let options = SpecConvertOptions {
            if_singleton_each: true,
            ..Default::default()
        };
        assert_eq!(
            render_group_fragments(&l_refs, true, &options).join("; "),
            "A/ hA, B/ hB each 5g; C/ hC each 10g"
        );
    }

    #[test]
    fn clustering_without_singleton_each() {
        let rows = [
            row("G", "A", "hA", "5", "g"),
            row("G", "C", "hC", "10", "g"),
            row("G", "B", "hB", "5", "g"),
        ];
        let l_refs: Vec<&SpecIngredientRow> = rows.iter().collect();
        let options = SpecConvertOptions::default();
        assert_eq!(
            render_group_fragments(&l_refs, true, &options),
            vec!["A/ hA, B/ hB each 5g".to_string(), "C/ hC 10g".to_string()]
        );
        assert_eq!(
            render_group_fragments(&l_refs, false, &options),
            vec!["A, B each 5g".to_string(), "C 10g".to_string()]
        );
    }

    #[test]
    fn no_merge_renders_one_fragment_per_row() {
        let rows = [row("G", "A", "", "5", "g"), row("G", "B", "", "5", "g")];
        let l_refs: Vec<&SpecIngredientRow> = rows.iter().collect();
        let options = SpecConvertOptions {
            rule_quantity_merge: EnumQuantityMerge::None,
            if_singleton_each: true,
            ..Default::default()
        };
        assert_eq!(
            render_group_fragments(&l_refs, false, &options),
            vec!["A 5g".to_string(), "B 5g".to_string()]
        );
    }

    #[test]
    fn empty_quantity_never_gets_each() {
        let rows = [row("G", "A", "", "", ""), row("G", "B", "", "", "")];
        let l_refs: Vec<&SpecIngredientRow> = rows.iter().collect();
        let options = SpecConvertOptions::default();
        assert_eq!(
            render_group_fragments(&l_refs, false, &options),
            vec!["A".to_string(), "B".to_string()]
        );
    }

    #[test]
    fn last_group_line_carries_additives_suffix_once() {
        let rows = vec![bel()];
        let groups = collect_groups(&rows);
        let options = SpecConvertOptions::default();
        let l_lines = render_group_lines(&groups, false, &options);
        assert_eq!(
            l_lines,
            vec![
                "Amla Pishti:\nBel (Aegle marmelos) (St. Bk.) 1.75mg Permitted Additives QS."
                    .to_string()
            ]
        );
        assert_eq!(l_lines, render_group_lines(&groups, false, &options));
    }

    #[test]
    fn collect_groups_keeps_first_seen_order() {
        let rows = vec![
            row("B", "b1", "", "1", ""),
            row("A", "a1", "", "1", ""),
            row("B", "b2", "", "1", ""),
        ];
        let groups = collect_groups(&rows);
        let l_names: Vec<&str> = groups.iter().map(|g| g.name).collect();
        assert_eq!(l_names, vec!["B", "A"]);
        assert_eq!(groups[0].rows.len(), 2);
    }

    #[test]
    fn table_serials_continue_across_groups() {
        let rows = vec![
            row("A", "a1", "", "1", "g"),
            row("A", "a2", "", "2", "g"),
            row("B", "b1", "", "3", "g"),
        ];
        let groups = collect_groups(&rows);
        let l_table = render_table_blocks(&groups, &SpecConvertOptions::default());
        let l_serials: Vec<usize> = l_table
            .iter()
            .filter_map(|r| match r {
                EnumCompositionRow::Ingredient(entry) => Some(entry.serial),
                _ => None,
            })
            .collect();
        assert_eq!(l_serials, vec![1, 2, 3]);
        assert_eq!(l_table[0], EnumCompositionRow::Section("A".to_string()));
        assert_eq!(l_table[3], EnumCompositionRow::Section("B".to_string()));
    }
}
