//! Output writers: text documents, workbook and optional CSV table.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use formulakit_grid::SpecConvertOutput;
use formulakit_io_xlsx::{SpecCompositionXlsxStyle, write_output_xlsx};
use polars::prelude::{CsvWriter, SerWriter};

use crate::config::SpecOutputTargets;

pub const C_FILE_ENGLISH_ONLY: &str = "english_only.txt";
pub const C_FILE_ENGLISH_HINDI_MIX: &str = "english_hindi_mix.txt";
pub const C_FILE_COMPOSITION_XLSX: &str = "composition.xlsx";
pub const C_FILE_COMPOSITION_CSV: &str = "composition.csv";

/// Write every requested document under `dir_out`; returns the written paths.
pub fn write_outputs(
    dir_out: &Path,
    output: &SpecConvertOutput,
    targets: &SpecOutputTargets,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir_out)
        .with_context(|| format!("Failed to create output directory: {}", dir_out.display()))?;

    let mut l_paths = Vec::new();
    for (c_file, document) in [
        (C_FILE_ENGLISH_ONLY, &output.english_only),
        (C_FILE_ENGLISH_HINDI_MIX, &output.english_hindi_mix),
    ] {
        let path = dir_out.join(c_file);
        std::fs::write(&path, document.to_text() + "\n")
            .with_context(|| format!("Failed to write {}", path.display()))?;
        l_paths.push(path);
    }

    if targets.if_write_xlsx {
        let path = dir_out.join(C_FILE_COMPOSITION_XLSX);
        let l_reports =
            write_output_xlsx(path.clone(), output, SpecCompositionXlsxStyle::default())
                .with_context(|| format!("Failed to write {}", path.display()))?;
        for c_warning in l_reports.iter().flat_map(|report| &report.warnings) {
            tracing::warn!("{c_warning}");
        }
        l_paths.push(path);
    }

    if targets.if_write_csv {
        let path = dir_out.join(C_FILE_COMPOSITION_CSV);
        write_composition_csv(&path, output)?;
        l_paths.push(path);
    }

    tracing::debug!(n_files = l_paths.len(), "wrote outputs");
    Ok(l_paths)
}

fn write_composition_csv(path: &Path, output: &SpecConvertOutput) -> Result<()> {
    let mut df = output
        .composition_table
        .to_dataframe(&[])
        .context("Failed to build composition table frame")?;
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(false)
        .finish(&mut df)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
