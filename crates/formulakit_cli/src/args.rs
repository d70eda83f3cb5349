use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use formulakit_grid::{EnumGroupResolution, EnumQuantityMerge, EnumQuantityMode};

/// Convert an ingredient grid (CSV/XLSX) into composition paragraphs and a composition table.
#[derive(Parser, Debug, Clone)]
#[command(name = "formulakit")]
#[command(version)]
pub struct Cli {
    /// Input table (`.csv`, `.xlsx`, `.xls`, `.ods`).
    pub input: PathBuf,

    /// Output directory.
    #[arg(short = 'o', long = "out-dir", default_value = ".")]
    pub dir_out: PathBuf,

    /// Worksheet to read from a workbook input (default: first sheet).
    #[arg(long)]
    pub sheet: Option<String>,

    /// TOML file with `[convert]` and `[output]` sections.
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Group resolution strategy.
    #[arg(long = "group-resolution", value_enum)]
    pub group_resolution: Option<ArgGroupResolution>,

    /// Quantity clustering strategy.
    #[arg(long = "quantity-merge", value_enum)]
    pub quantity_merge: Option<ArgQuantityMerge>,

    /// Quantity acceptance policy.
    #[arg(long = "quantity-mode", value_enum)]
    pub quantity_mode: Option<ArgQuantityMode>,

    /// Give single-row quantity clusters an `each` clause too.
    #[arg(long = "singleton-each")]
    pub singleton_each: bool,

    /// Do not print part used after a botanical name.
    #[arg(long = "hide-part-used")]
    pub hide_part_used: bool,

    /// Text between quantity and unit.
    #[arg(long = "unit-separator")]
    pub unit_separator: Option<String>,

    /// Also write the composition table as CSV.
    #[arg(long)]
    pub csv: bool,

    /// Skip the XLSX workbook.
    #[arg(long = "no-xlsx")]
    pub no_xlsx: bool,

    /// Debug logging.
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgGroupResolution {
    Auto,
    ExplicitColumn,
    InlineHeaderScan,
}

impl From<ArgGroupResolution> for Option<EnumGroupResolution> {
    fn from(value: ArgGroupResolution) -> Self {
        match value {
            ArgGroupResolution::Auto => None,
            ArgGroupResolution::ExplicitColumn => Some(EnumGroupResolution::ExplicitColumn),
            ArgGroupResolution::InlineHeaderScan => Some(EnumGroupResolution::InlineHeaderScan),
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgQuantityMerge {
    None,
    Cluster,
}

impl From<ArgQuantityMerge> for EnumQuantityMerge {
    fn from(value: ArgQuantityMerge) -> Self {
        match value {
            ArgQuantityMerge::None => EnumQuantityMerge::None,
            ArgQuantityMerge::Cluster => EnumQuantityMerge::ClusterBySharedQuantity,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgQuantityMode {
    Numeric,
    Text,
}

impl From<ArgQuantityMode> for EnumQuantityMode {
    fn from(value: ArgQuantityMode) -> Self {
        match value {
            ArgQuantityMode::Numeric => EnumQuantityMode::Numeric,
            ArgQuantityMode::Text => EnumQuantityMode::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_parse_into_value_enums() {
        let cli = Cli::try_parse_from([
            "formulakit",
            "grid.csv",
            "--group-resolution",
            "inline-header-scan",
            "--quantity-merge",
            "none",
            "--singleton-each",
            "--csv",
        ])
        .expect("parse");
        assert_eq!(cli.input, PathBuf::from("grid.csv"));
        assert_eq!(cli.dir_out, PathBuf::from("."));
        assert_eq!(cli.group_resolution, Some(ArgGroupResolution::InlineHeaderScan));
        assert_eq!(cli.quantity_merge, Some(ArgQuantityMerge::None));
        assert!(cli.singleton_each);
        assert!(cli.csv);
        assert!(!cli.no_xlsx);
    }
}
