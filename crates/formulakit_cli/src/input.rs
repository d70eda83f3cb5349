//! Input table readers: CSV through polars, workbooks through calamine.

use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use formulakit_grid::{EnumCellValue, SpecGridTable};
use polars::prelude::{CsvReadOptions, SerReader};

/// Read the input table at `path`, dispatching on the file extension.
pub fn read_grid(path: &Path, sheet: Option<&str>) -> Result<SpecGridTable> {
    let c_ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let table = match c_ext.as_str() {
        "csv" => read_grid_csv(path)?,
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => read_grid_workbook(path, sheet)?,
        _ => bail!(
            "Unsupported input extension {c_ext:?}: {} (expected csv, xlsx, xls or ods)",
            path.display()
        ),
    };
    tracing::info!(
        path = %path.display(),
        n_rows = table.height(),
        n_cols = table.width(),
        "read input table"
    );
    Ok(table)
}

fn read_grid_csv(path: &Path) -> Result<SpecGridTable> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .and_then(|reader| reader.finish())
        .with_context(|| format!("Failed to read CSV: {}", path.display()))?;
    SpecGridTable::from_dataframe(&df)
        .with_context(|| format!("Failed to load CSV table: {}", path.display()))
}

fn read_grid_workbook(path: &Path, sheet: Option<&str>) -> Result<SpecGridTable> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;

    let c_sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .with_context(|| format!("Workbook has no sheets: {}", path.display()))?,
    };
    let range = workbook
        .worksheet_range(&c_sheet_name)
        .with_context(|| format!("Failed to read sheet {c_sheet_name:?}: {}", path.display()))?;

    let mut rows = range.rows();
    let Some(l_header) = rows.next() else {
        bail!("Sheet {c_sheet_name:?} is empty: {}", path.display());
    };
    let columns = l_header
        .iter()
        .map(|cell| match derive_cell_value_from_data(cell) {
            EnumCellValue::None => String::new(),
            EnumCellValue::String(val) => val,
            EnumCellValue::Number(val) => formulakit_grid::util::format_number(val),
        })
        .collect();
    let body = rows
        .map(|row| row.iter().map(derive_cell_value_from_data).collect())
        .collect();

    Ok(SpecGridTable::new(columns, body))
}

fn derive_cell_value_from_data(cell: &Data) -> EnumCellValue {
    match cell {
        Data::Empty | Data::Error(_) => EnumCellValue::None,
        Data::String(val) => EnumCellValue::String(val.clone()),
        Data::Float(val) => EnumCellValue::Number(*val),
        Data::Int(val) => EnumCellValue::Number(*val as f64),
        Data::Bool(val) => EnumCellValue::String(if *val { "True" } else { "False" }.to_string()),
        Data::DateTime(val) => EnumCellValue::String(val.to_string()),
        Data::DateTimeIso(val) | Data::DurationIso(val) => EnumCellValue::String(val.clone()),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    struct TestDir {
        path: PathBuf,
    }

    impl TestDir {
        fn new() -> Self {
            let n = SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .expect("clock")
                .as_nanos();
            let path = std::env::temp_dir().join(format!("formulakit_cli_input_test_{n}"));
            std::fs::create_dir_all(&path).expect("create test dir");
            Self { path }
        }

        fn path(&self) -> &Path {
            &self.path
        }
    }

    impl Drop for TestDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.path);
        }
    }

    #[test]
    fn csv_input_keeps_headers_and_blank_cells() {
        let tmp = TestDir::new();
        let path = tmp.path().join("grid.csv");
        std::fs::write(
            &path,
            "Name,Botanical Name,Quantity,Unit\n\
             Amla Pishti:,,,\n\
             Bel,Aegle marmelos,1.75,mg\n",
        )
        .expect("write csv");

        let table = read_grid(&path, None).expect("read");
        assert_eq!(
            table.columns,
            vec!["Name", "Botanical Name", "Quantity", "Unit"]
        );
        assert_eq!(table.height(), 2);
        assert_eq!(table.cell(0, 0), &EnumCellValue::from("Amla Pishti:"));
        assert_eq!(table.cell(0, 1), &EnumCellValue::None);
        assert_eq!(table.cell(1, 2), &EnumCellValue::Number(1.75));
    }

    #[test]
    fn unsupported_extension_is_an_error() {
        let err = read_grid(Path::new("grid.json"), None).expect_err("unsupported");
        assert!(err.to_string().contains("Unsupported input extension"));
    }

    #[test]
    fn workbook_cells_map_to_grid_values() {
        assert_eq!(derive_cell_value_from_data(&Data::Empty), EnumCellValue::None);
        assert_eq!(
            derive_cell_value_from_data(&Data::Int(5)),
            EnumCellValue::Number(5.0)
        );
        assert_eq!(
            derive_cell_value_from_data(&Data::String("Bel".to_string())),
            EnumCellValue::from("Bel")
        );
    }
}
