//! Column schema mapping: binds logical ingredient fields to header names.

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::conf::{
    C_COL_BOTANICAL_NAME, C_COL_ENGLISH_NAME, C_COL_GROUP, C_COL_HINDI_NAME,
    C_COL_HINDI_NAME_DEVANAGARI, C_COL_HINDI_NAME_DEVANAGARI_SHORT, C_COL_NAME,
    C_COL_PART_USED_FULL_FORM, C_COL_PART_USED_SHORT_FORM, C_COL_PROOF_OF_CONCEPT,
    C_COL_QUANTITY, C_COL_UNIT,
};
use crate::spec::{EnumGroupResolution, GridError, SchemaError};

/// Logical ingredient fields read from the input table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnumIngredientField {
    EnglishName,
    BotanicalName,
    HindiName,
    PartUsedFullForm,
    PartUsedShortForm,
    Quantity,
    Unit,
    ProofOfConcept,
    Group,
}

/// One field-to-header binding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpecColumnBinding {
    /// Bound field.
    pub field: EnumIngredientField,
    /// Canonical header, reported when missing.
    pub header: String,
    /// Additional accepted headers, tried after `header`.
    #[serde(default)]
    pub aliases: Vec<String>,
    /// Missing column fails the conversion.
    #[serde(default = "_default_required")]
    pub if_required: bool,
}

fn _default_required() -> bool {
    true
}

impl SpecColumnBinding {
    fn new(field: EnumIngredientField, header: &str, aliases: &[&str], if_required: bool) -> Self {
        Self {
            field,
            header: header.to_string(),
            aliases: aliases.iter().map(ToString::to_string).collect(),
            if_required,
        }
    }

    fn candidates(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.header.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

/// Ordered set of bindings describing one input layout.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpecColumnSchema {
    /// Bindings in report order.
    pub bindings: Vec<SpecColumnBinding>,
}

impl SpecColumnSchema {
    /// Layout with a dedicated `Group` column.
    pub fn explicit_group() -> Self {
        use EnumIngredientField as F;
        Self {
            bindings: vec![
                SpecColumnBinding::new(F::EnglishName, C_COL_ENGLISH_NAME, &[], true),
                SpecColumnBinding::new(F::BotanicalName, C_COL_BOTANICAL_NAME, &[], true),
                SpecColumnBinding::new(F::HindiName, C_COL_HINDI_NAME, &[], true),
                SpecColumnBinding::new(F::PartUsedFullForm, C_COL_PART_USED_FULL_FORM, &[], true),
                SpecColumnBinding::new(
                    F::PartUsedShortForm,
                    C_COL_PART_USED_SHORT_FORM,
                    &[],
                    true,
                ),
                SpecColumnBinding::new(F::Quantity, C_COL_QUANTITY, &[], true),
                SpecColumnBinding::new(F::Unit, C_COL_UNIT, &[], true),
                SpecColumnBinding::new(F::ProofOfConcept, C_COL_PROOF_OF_CONCEPT, &[], true),
                SpecColumnBinding::new(F::Group, C_COL_GROUP, &[], true),
            ],
        }
    }

    /// Layout where groups are announced by `Name:` rows.
    pub fn inline_header() -> Self {
        use EnumIngredientField as F;
        Self {
            bindings: vec![
                SpecColumnBinding::new(F::EnglishName, C_COL_NAME, &[C_COL_ENGLISH_NAME], true),
                SpecColumnBinding::new(F::BotanicalName, C_COL_BOTANICAL_NAME, &[], true),
                SpecColumnBinding::new(
                    F::HindiName,
                    C_COL_HINDI_NAME_DEVANAGARI,
                    &[C_COL_HINDI_NAME_DEVANAGARI_SHORT, C_COL_HINDI_NAME],
                    true,
                ),
                SpecColumnBinding::new(F::PartUsedFullForm, C_COL_PART_USED_FULL_FORM, &[], true),
                SpecColumnBinding::new(
                    F::PartUsedShortForm,
                    C_COL_PART_USED_SHORT_FORM,
                    &[],
                    false,
                ),
                SpecColumnBinding::new(F::Quantity, C_COL_QUANTITY, &[], true),
                SpecColumnBinding::new(F::Unit, C_COL_UNIT, &[], true),
                SpecColumnBinding::new(F::ProofOfConcept, C_COL_PROOF_OF_CONCEPT, &[], true),
            ],
        }
    }

    /// Preset matching a group resolution strategy.
    pub fn for_resolution(rule: EnumGroupResolution) -> Self {
        match rule {
            EnumGroupResolution::ExplicitColumn => Self::explicit_group(),
            EnumGroupResolution::InlineHeaderScan => Self::inline_header(),
        }
    }

    /// `true` when the schema binds a group column.
    pub fn has_group_field(&self) -> bool {
        self.bindings
            .iter()
            .any(|binding| binding.field == EnumIngredientField::Group)
    }

    /// Resolve bindings against header names.
    ///
    /// Headers are compared after trimming. Every missing required column is
    /// collected before failing.
    pub fn resolve(&self, columns: &[String]) -> Result<SpecResolvedSchema, GridError> {
        let l_columns_trimmed: Vec<&str> = columns.iter().map(|c_name| c_name.trim()).collect();
        let mut dict_idx_by_field = BTreeMap::new();
        let mut l_missing = Vec::new();

        for binding in &self.bindings {
            let n_idx = binding.candidates().find_map(|c_candidate| {
                l_columns_trimmed
                    .iter()
                    .position(|c_name| *c_name == c_candidate.trim())
            });
            match n_idx {
                Some(n_idx) => {
                    dict_idx_by_field.insert(binding.field, n_idx);
                }
                None if binding.if_required => l_missing.push(binding.header.clone()),
                None => {}
            }
        }

        if !l_missing.is_empty() {
            return Err(SchemaError { missing: l_missing }.into());
        }
        validate_unique_bound_columns(&l_columns_trimmed, dict_idx_by_field.values().copied())?;
        Ok(SpecResolvedSchema { dict_idx_by_field })
    }
}

/// Field-to-column-index lookup after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecResolvedSchema {
    dict_idx_by_field: BTreeMap<EnumIngredientField, usize>,
}

impl SpecResolvedSchema {
    /// Column index of `field`, if bound.
    pub fn index_of(&self, field: EnumIngredientField) -> Option<usize> {
        self.dict_idx_by_field.get(&field).copied()
    }
}

/// Pick the group strategy from the header: a `Group` column means explicit groups.
pub fn detect_group_resolution(columns: &[String]) -> EnumGroupResolution {
    if columns.iter().any(|c_name| c_name.trim() == C_COL_GROUP) {
        EnumGroupResolution::ExplicitColumn
    } else {
        EnumGroupResolution::InlineHeaderScan
    }
}

/// Validate that no bound column shares its name with another column.
///
/// Unbound columns may repeat freely (blank trailing headers, notes).
pub fn validate_unique_bound_columns(
    columns_trimmed: &[&str],
    bound_indices: impl IntoIterator<Item = usize>,
) -> Result<(), GridError> {
    let set_bound_names: BTreeSet<&str> = bound_indices
        .into_iter()
        .filter_map(|n_idx| columns_trimmed.get(n_idx).copied())
        .collect();

    let mut dict_pos: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    for (n_idx, c_name) in columns_trimmed.iter().copied().enumerate() {
        if set_bound_names.contains(c_name) {
            dict_pos.entry(c_name).or_default().push(n_idx);
        }
    }
    if dict_pos.values().all(|l_pos| l_pos.len() == 1) {
        return Ok(());
    }

    let c_msg = dict_pos
        .iter()
        .filter(|(_, l_pos)| l_pos.len() > 1)
        .map(|(c_name, l_pos)| format!("{c_name:?} x{} at indices {l_pos:?}", l_pos.len()))
        .collect::<Vec<_>>()
        .join("; ");

    Err(GridError::DuplicateColumns(format!(
        "Duplicate column names detected: {c_msg}"
    )))
}
