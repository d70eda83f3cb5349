//! `formulakit_grid` v1:
//! Ingredient grid to composition paragraph/table transform.
//!
//! Pipeline stages map onto modules:
//! - `schema`    : column schema mapping and strategy detection
//! - `normalize` : blank/header/malformed row handling, group resolution
//! - `render`    : per-group fragments, quantity clusters, lines, table blocks
//! - `assemble`  : titles, preamble, additives and footer placement
//! - `convert`   : orchestration of the three stages
//!
//! Supporting modules:
//! - `conf`   : column names and fixed texts
//! - `spec`   : models/options/errors
//! - `report` : per-call counters and skipped rows
//! - `frame`  : polars `DataFrame` adapters
//! - `util`   : pure helper functions
pub mod assemble;
pub mod conf;
pub mod convert;
mod frame;
pub mod normalize;
pub mod render;
pub mod report;
pub mod schema;
pub mod spec;
pub mod util;

pub use convert::convert_grid;
pub use report::{ReportConvert, ReportConvertBuilder};
pub use schema::{EnumIngredientField, SpecColumnBinding, SpecColumnSchema};
pub use spec::{
    EnumCellValue, EnumCompositionRow, EnumGroupResolution, EnumParagraphVariant,
    EnumQuantityMerge, EnumQuantityMode, GridError, MalformedRowError, SchemaError,
    SpecCompositionEntry, SpecCompositionTable, SpecConvertOptions, SpecConvertOutput,
    SpecDocumentTexts, SpecGridTable, SpecIngredientRow, SpecParagraphDocument,
};
