//! Conversion report model and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;

use crate::spec::MalformedRowError;

/// Aggregate counters and diagnostics for one `convert_grid` run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ReportConvert {
    /// Body rows in the input table.
    pub cnt_rows_input: u64,
    /// Rows dropped for an empty English name.
    pub cnt_rows_blank: u64,
    /// Group header rows consumed into the `group` field.
    pub cnt_rows_header: u64,
    /// Ingredient rows that survived normalization.
    pub cnt_rows_kept: u64,
    /// Distinct groups in output order.
    pub cnt_groups: u64,
    /// Rows skipped as malformed.
    pub rows_skipped: Vec<MalformedRowError>,
    /// Non-fatal warnings.
    pub warnings: Vec<String>,
}

impl ReportConvert {
    /// Number of skipped rows.
    pub fn skipped_count(&self) -> usize {
        self.rows_skipped.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_rows_input".to_string(), self.cnt_rows_input);
        dict_counts.insert("cnt_rows_blank".to_string(), self.cnt_rows_blank);
        dict_counts.insert("cnt_rows_header".to_string(), self.cnt_rows_header);
        dict_counts.insert("cnt_rows_kept".to_string(), self.cnt_rows_kept);
        dict_counts.insert("cnt_groups".to_string(), self.cnt_groups);
        dict_counts.insert("cnt_rows_skipped".to_string(), self.skipped_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} input={} kept={} headers={} blank={} skipped={} groups={} warnings={}",
            dict_counts["cnt_rows_input"],
            dict_counts["cnt_rows_kept"],
            dict_counts["cnt_rows_header"],
            dict_counts["cnt_rows_blank"],
            dict_counts["cnt_rows_skipped"],
            dict_counts["cnt_groups"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportConvert {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[GRID]"))
    }
}

/// Mutable accumulator filled while normalizing and rendering.
#[derive(Debug, Default, Clone)]
pub struct ReportConvertBuilder {
    /// See [`ReportConvert::cnt_rows_input`].
    pub cnt_rows_input: u64,
    /// See [`ReportConvert::cnt_rows_blank`].
    pub cnt_rows_blank: u64,
    /// See [`ReportConvert::cnt_rows_header`].
    pub cnt_rows_header: u64,
    /// See [`ReportConvert::cnt_rows_kept`].
    pub cnt_rows_kept: u64,
    /// See [`ReportConvert::cnt_groups`].
    pub cnt_groups: u64,
    /// See [`ReportConvert::rows_skipped`].
    pub rows_skipped: Vec<MalformedRowError>,
    /// See [`ReportConvert::warnings`].
    pub warnings: Vec<String>,
}

impl ReportConvertBuilder {
    /// Increment input count by one.
    pub fn add_input(&mut self) {
        self.cnt_rows_input += 1;
    }

    /// Increment blank count by one.
    pub fn add_blank(&mut self) {
        self.cnt_rows_blank += 1;
    }

    /// Increment header count by one.
    pub fn add_header(&mut self) {
        self.cnt_rows_header += 1;
    }

    /// Increment kept count by one.
    pub fn add_kept(&mut self) {
        self.cnt_rows_kept += 1;
    }

    /// Record the number of rendered groups.
    pub fn set_groups(&mut self, cnt_groups: usize) {
        self.cnt_groups = cnt_groups as u64;
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        let warning = warning.into();
        tracing::warn!(target: "formulakit_grid", "{warning}");
        self.warnings.push(warning);
    }

    /// Record one skipped row.
    pub fn add_skipped(&mut self, error: MalformedRowError) {
        tracing::warn!(target: "formulakit_grid", row_idx = error.row_idx, "{error}");
        self.rows_skipped.push(error);
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportConvert {
        ReportConvert {
            cnt_rows_input: self.cnt_rows_input,
            cnt_rows_blank: self.cnt_rows_blank,
            cnt_rows_header: self.cnt_rows_header,
            cnt_rows_kept: self.cnt_rows_kept,
            cnt_groups: self.cnt_groups,
            rows_skipped: self.rows_skipped,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_convert_to_dict_and_format() {
        let mut builder = ReportConvertBuilder::default();
        for _ in 0..4 {
            builder.add_input();
        }
        builder.add_header();
        builder.add_blank();
        builder.add_kept();
        builder.set_groups(1);
        builder.add_skipped(MalformedRowError {
            row_idx: 3,
            english_name: "Guggul".to_string(),
            reason: "quantity is not numeric: \"QS\"".to_string(),
        });
        let report = builder.build();

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_rows_input"], 4);
        assert_eq!(dict_counts["cnt_rows_skipped"], 1);
        assert_eq!(dict_counts["cnt_warnings"], 0);

        let txt = report.format("[GRID]");
        assert_eq!(
            txt,
            "[GRID] input=4 kept=1 headers=1 blank=1 skipped=1 groups=1 warnings=0"
        );
        assert_eq!(report.to_string(), txt);
    }
}
