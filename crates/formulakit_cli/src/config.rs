//! TOML configuration file plus command-line overrides.

use std::path::Path;

use anyhow::{Context, Result};
use formulakit_grid::SpecConvertOptions;
use serde::Deserialize;

use crate::args::Cli;

/// Which files to write next to the text documents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpecOutputTargets {
    /// Styled workbook with the table and both paragraphs.
    pub if_write_xlsx: bool,
    /// Plain CSV of the composition table.
    pub if_write_csv: bool,
}

impl Default for SpecOutputTargets {
    fn default() -> Self {
        Self {
            if_write_xlsx: true,
            if_write_csv: false,
        }
    }
}

/// Whole configuration file.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct SpecCliConfig {
    /// Conversion options.
    pub convert: SpecConvertOptions,
    /// Output targets.
    pub output: SpecOutputTargets,
}

/// Parse a configuration file body.
pub fn parse_config(text: &str) -> Result<SpecCliConfig> {
    toml::from_str(text).context("Invalid configuration TOML")
}

/// Read the `--config` file if given, then apply command-line overrides.
pub fn load_config(cli: &Cli) -> Result<SpecCliConfig> {
    let mut cfg = match &cli.config {
        Some(path) => read_config_file(path)?,
        None => SpecCliConfig::default(),
    };
    apply_overrides(&mut cfg, cli);
    Ok(cfg)
}

fn read_config_file(path: &Path) -> Result<SpecCliConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    parse_config(&text).with_context(|| format!("Failed to load config: {}", path.display()))
}

fn apply_overrides(cfg: &mut SpecCliConfig, cli: &Cli) {
    let options = &mut cfg.convert;
    if let Some(rule) = cli.group_resolution {
        options.rule_group_resolution = rule.into();
    }
    if let Some(rule) = cli.quantity_merge {
        options.rule_quantity_merge = rule.into();
    }
    if let Some(rule) = cli.quantity_mode {
        options.rule_quantity = rule.into();
    }
    if cli.singleton_each {
        options.if_singleton_each = true;
    }
    if cli.hide_part_used {
        options.if_show_part_used = false;
    }
    if let Some(sep) = &cli.unit_separator {
        options.unit_separator = sep.clone();
    }

    if cli.csv {
        cfg.output.if_write_csv = true;
    }
    if cli.no_xlsx {
        cfg.output.if_write_xlsx = false;
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use formulakit_grid::{EnumGroupResolution, EnumQuantityMerge, EnumQuantityMode};

    use super::*;

    #[test]
    fn config_file_fills_options_and_keeps_defaults() {
        let cfg = parse_config(
            r#"
            [convert]
            rule_group_resolution = "explicit_column"
            rule_quantity = "text"
            unit_separator = " "

            [convert.texts]
            preamble = "Each 10ml contains:"

            [output]
            if_write_csv = true
            "#,
        )
        .expect("parse");

        assert_eq!(
            cfg.convert.rule_group_resolution,
            Some(EnumGroupResolution::ExplicitColumn)
        );
        assert_eq!(cfg.convert.rule_quantity, EnumQuantityMode::Text);
        assert_eq!(
            cfg.convert.rule_quantity_merge,
            EnumQuantityMerge::ClusterBySharedQuantity
        );
        assert!(cfg.convert.if_show_part_used);
        assert_eq!(cfg.convert.texts.preamble, "Each 10ml contains:");
        assert_eq!(cfg.convert.texts.footer, "*Official Substitute");
        assert!(cfg.output.if_write_csv);
        assert!(cfg.output.if_write_xlsx);
    }

    #[test]
    fn unknown_rule_is_rejected() {
        assert!(parse_config("[convert]\nrule_quantity = \"fuzzy\"\n").is_err());
    }

    #[test]
    fn command_line_flags_override_file_values() {
        let mut cfg = parse_config("[convert]\nrule_quantity_merge = \"none\"\n").expect("parse");
        let cli = Cli::try_parse_from([
            "formulakit",
            "grid.csv",
            "--quantity-merge",
            "cluster",
            "--hide-part-used",
            "--no-xlsx",
        ])
        .expect("cli");

        apply_overrides(&mut cfg, &cli);
        assert_eq!(
            cfg.convert.rule_quantity_merge,
            EnumQuantityMerge::ClusterBySharedQuantity
        );
        assert!(!cfg.convert.if_show_part_used);
        assert!(!cfg.output.if_write_xlsx);
    }
}
