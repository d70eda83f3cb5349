//! Grid constants: canonical column names and fixed document texts.

/// Canonical `Group` column name; its presence selects the explicit-group strategy.
pub const C_COL_GROUP: &str = "Group";
/// English name column (explicit-group layout).
pub const C_COL_ENGLISH_NAME: &str = "English Name";
/// English name column (inline-header layout).
pub const C_COL_NAME: &str = "Name";
/// Botanical name column.
pub const C_COL_BOTANICAL_NAME: &str = "Botanical Name";
/// Hindi name column (explicit-group layout).
pub const C_COL_HINDI_NAME: &str = "Hindi Name";
/// Hindi name column (inline-header layout).
pub const C_COL_HINDI_NAME_DEVANAGARI: &str = "हिंदी नाम (Hindi Name)";
/// Short Devanagari alias of the Hindi name column.
pub const C_COL_HINDI_NAME_DEVANAGARI_SHORT: &str = "हिंदी नाम";
/// Part used (full form) column.
pub const C_COL_PART_USED_FULL_FORM: &str = "Part Used Full Form";
/// Part used (short form) column.
pub const C_COL_PART_USED_SHORT_FORM: &str = "Part Used Short Form";
/// Quantity column.
pub const C_COL_QUANTITY: &str = "Quantity";
/// Unit column.
pub const C_COL_UNIT: &str = "Unit";
/// Proof-of-concept column.
pub const C_COL_PROOF_OF_CONCEPT: &str = "Proof Of Concept";

/// Trailing marker of an inline group header row.
pub const C_GROUP_HEADER_MARKER: char = ':';

pub const C_TITLE_ENGLISH_ONLY: &str = "Composition (English Only)";
pub const C_TITLE_ENGLISH_HINDI_MIX: &str = "Composition (English-Hindi Mix)";
pub const C_TITLE_TABLE: &str = "Composition Table";
pub const C_LEGEND_ENGLISH_ONLY: &str = "English Name (Botanical Name) (Part Used) Quantity";
pub const C_LEGEND_ENGLISH_HINDI_MIX: &str =
    "English Name (Botanical Name)/ Hindi Name (Part Used) Quantity";
pub const C_LEGEND_TABLE: &str = "Ingredient (Botanical Name), Part Used, Quantity, Proof Of Concept";
pub const C_PREAMBLE: &str = "Each 50g contains:";
pub const C_ADDITIVES_SUFFIX: &str = "Permitted Additives QS";
pub const C_ADDITIVES_NAME: &str = "Permitted Additives";
pub const C_ADDITIVES_QUANTITY: &str = "QS";
pub const C_FOOTER_OFFICIAL_SUBSTITUTE: &str = "*Official Substitute";

/// Composition table column header.
pub const TUP_TABLE_HEADER: [&str; 5] = [
    "S. No.",
    "Ingredient",
    "Part Used",
    "Quantity",
    "Proof Of Concept",
];

/// Composition table width.
pub const N_TABLE_WIDTH: usize = TUP_TABLE_HEADER.len();
