//! Polars `DataFrame` adapters at the grid boundary.

use polars::prelude::{AnyValue, Column, DataFrame};

use crate::spec::{EnumCellValue, GridError, SpecCompositionTable, SpecGridTable};

impl SpecGridTable {
    /// Build an input table from a `DataFrame`; nulls become missing cells.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, GridError> {
        let columns: Vec<String> = df
            .get_column_names_str()
            .into_iter()
            .map(ToString::to_string)
            .collect();

        let l_cols = df.get_columns();
        let mut rows = Vec::with_capacity(df.height());
        for n_idx_row in 0..df.height() {
            let mut l_cells = Vec::with_capacity(l_cols.len());
            for col in l_cols {
                let value = col.get(n_idx_row).map_err(|err| {
                    GridError::DataFrame(format!("Failed to access cell value: {err}"))
                })?;
                l_cells.push(derive_cell_value_from_any_value(value));
            }
            rows.push(l_cells);
        }

        Ok(Self { columns, rows })
    }
}

impl SpecCompositionTable {
    /// Text-only `DataFrame` view of [`Self::to_string_grid`], headed by `column_names`.
    ///
    /// Missing names are filled with `column_<idx>`.
    pub fn to_dataframe(&self, column_names: &[String]) -> Result<DataFrame, GridError> {
        let l_grid = self.to_string_grid();
        let l_columns: Vec<Column> = (0..self.width)
            .map(|n_idx_col| {
                let c_name = column_names
                    .get(n_idx_col)
                    .cloned()
                    .unwrap_or_else(|| format!("column_{n_idx_col}"));
                let l_values: Vec<String> =
                    l_grid.iter().map(|row| row[n_idx_col].clone()).collect();
                Column::new(c_name.as_str().into(), l_values)
            })
            .collect();

        DataFrame::new(l_columns)
            .map_err(|err| GridError::DataFrame(format!("Failed to build DataFrame: {err}")))
    }
}

fn derive_cell_value_from_any_value(value: AnyValue<'_>) -> EnumCellValue {
    match value {
        AnyValue::Null => EnumCellValue::None,
        AnyValue::String(val) => EnumCellValue::String(val.to_string()),
        AnyValue::StringOwned(val) => EnumCellValue::String(val.to_string()),
        AnyValue::Boolean(val) => {
            EnumCellValue::String(if val { "True" } else { "False" }.to_string())
        }
        AnyValue::UInt8(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt16(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt32(val) => EnumCellValue::Number(val as f64),
        AnyValue::UInt64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int8(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int16(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int32(val) => EnumCellValue::Number(val as f64),
        AnyValue::Int64(val) => EnumCellValue::Number(val as f64),
        AnyValue::Float32(val) => {
            EnumCellValue::Number(val.to_string().parse().unwrap_or(val as f64))
        }
        AnyValue::Float64(val) => EnumCellValue::Number(val),
        _ => EnumCellValue::String(value.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_dataframe_maps_nulls_and_numbers() {
        let df = DataFrame::new(vec![
            Column::new("Name".into(), vec![Some("Bel"), None]),
            Column::new("Quantity".into(), vec![Some(1.75f64), Some(2.0)]),
        ])
        .expect("frame");

        let table = SpecGridTable::from_dataframe(&df).expect("table");
        assert_eq!(table.columns, vec!["Name".to_string(), "Quantity".to_string()]);
        assert_eq!(table.rows[0][0], EnumCellValue::from("Bel"));
        assert_eq!(table.rows[1][0], EnumCellValue::None);
        assert_eq!(table.rows[1][1], EnumCellValue::Number(2.0));
    }

    #[test]
    fn from_dataframe_keeps_float32_decimal_text() {
        let df = DataFrame::new(vec![Column::new("Quantity".into(), vec![0.1f32, 1.75])])
            .expect("frame");

        let table = SpecGridTable::from_dataframe(&df).expect("table");
        assert_eq!(table.rows[0][0], EnumCellValue::Number(0.1));
        assert_eq!(table.rows[1][0], EnumCellValue::Number(1.75));
    }
}
