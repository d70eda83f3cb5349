use std::collections::BTreeMap;
use std::path::PathBuf;

use formulakit_grid::{
    EnumCellValue, EnumGroupResolution, EnumQuantityMerge, EnumQuantityMode, GridError,
    MalformedRowError, ReportConvert, SpecConvertOptions, SpecConvertOutput, SpecGridTable,
    convert_grid,
};
use formulakit_io_xlsx::{SpecCompositionXlsxStyle, XlsxExportError, write_output_xlsx};
use pyo3::exceptions::{PyOSError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "formulakit.grid.convert_grid.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

/// Python cell value; `None` arrives as `Option::None`.
#[derive(Debug, Clone, FromPyObject)]
enum PyCellInput {
    Text(String),
    Number(f64),
}

impl From<PyCellInput> for EnumCellValue {
    fn from(value: PyCellInput) -> Self {
        match value {
            PyCellInput::Text(val) => EnumCellValue::String(val),
            PyCellInput::Number(val) => EnumCellValue::Number(val),
        }
    }
}

#[pyclass(name = "MalformedRow")]
#[derive(Debug, Clone)]
struct PyMalformedRow {
    #[pyo3(get)]
    row_idx: usize,
    #[pyo3(get)]
    english_name: String,
    #[pyo3(get)]
    reason: String,
}

impl From<MalformedRowError> for PyMalformedRow {
    fn from(row_error: MalformedRowError) -> Self {
        Self {
            row_idx: row_error.row_idx,
            english_name: row_error.english_name,
            reason: row_error.reason,
        }
    }
}

#[pyclass(name = "ReportConvert")]
#[derive(Debug, Clone)]
struct PyReportConvert {
    inner: ReportConvert,
    #[pyo3(get)]
    rows_skipped: Vec<PyMalformedRow>,
    #[pyo3(get)]
    warnings: Vec<String>,
}

impl From<ReportConvert> for PyReportConvert {
    fn from(report_convert: ReportConvert) -> Self {
        Self {
            rows_skipped: report_convert
                .rows_skipped
                .iter()
                .cloned()
                .map(PyMalformedRow::from)
                .collect(),
            warnings: report_convert.warnings.clone(),
            inner: report_convert,
        }
    }
}

#[pymethods]
impl PyReportConvert {
    #[getter]
    fn cnt_rows_input(&self) -> u64 {
        self.inner.cnt_rows_input
    }

    #[getter]
    fn cnt_rows_kept(&self) -> u64 {
        self.inner.cnt_rows_kept
    }

    #[getter]
    fn cnt_groups(&self) -> u64 {
        self.inner.cnt_groups
    }

    #[getter]
    fn skipped_count(&self) -> usize {
        self.inner.skipped_count()
    }

    #[getter]
    fn warning_count(&self) -> usize {
        self.inner.warning_count()
    }

    fn to_dict(&self) -> BTreeMap<String, u64> {
        self.inner.to_dict()
    }

    #[pyo3(signature = (prefix = "[GRID]"))]
    fn format(&self, prefix: &str) -> String {
        self.inner.format(prefix)
    }

    fn __str__(&self) -> String {
        self.inner.format("[GRID]")
    }
}

#[pyclass(name = "ConvertOutput")]
struct PyConvertOutput {
    inner: SpecConvertOutput,
}

#[pymethods]
impl PyConvertOutput {
    #[getter]
    fn english_only(&self) -> String {
        self.inner.english_only.to_text()
    }

    #[getter]
    fn english_hindi_mix(&self) -> String {
        self.inner.english_hindi_mix.to_text()
    }

    #[getter]
    fn english_only_lines(&self) -> Vec<String> {
        self.inner.english_only.lines.clone()
    }

    #[getter]
    fn english_hindi_mix_lines(&self) -> Vec<String> {
        self.inner.english_hindi_mix.lines.clone()
    }

    /// Composition table as a rectangular list of string rows.
    #[getter]
    fn composition_table(&self) -> Vec<Vec<String>> {
        self.inner.composition_table.to_string_grid()
    }

    #[getter]
    fn report(&self) -> PyReportConvert {
        PyReportConvert::from(self.inner.report.clone())
    }
}

fn parse_rule_group_resolution(value: Option<&str>) -> PyResult<Option<EnumGroupResolution>> {
    match value {
        None | Some("auto") => Ok(None),
        Some("explicit_column") => Ok(Some(EnumGroupResolution::ExplicitColumn)),
        Some("inline_header_scan") => Ok(Some(EnumGroupResolution::InlineHeaderScan)),
        Some(other) => Err(PyValueError::new_err(format!(
            "Invalid group resolution: `{other}`. Expected one of: ['auto', 'explicit_column', 'inline_header_scan']"
        ))),
    }
}

fn parse_rule_quantity_merge(value: &str) -> PyResult<EnumQuantityMerge> {
    match value {
        "none" => Ok(EnumQuantityMerge::None),
        "cluster_by_shared_quantity" => Ok(EnumQuantityMerge::ClusterBySharedQuantity),
        _ => Err(PyValueError::new_err(format!(
            "Invalid quantity merge: `{value}`. Expected one of: ['none', 'cluster_by_shared_quantity']"
        ))),
    }
}

fn parse_rule_quantity(value: &str) -> PyResult<EnumQuantityMode> {
    match value {
        "numeric" => Ok(EnumQuantityMode::Numeric),
        "text" => Ok(EnumQuantityMode::Text),
        _ => Err(PyValueError::new_err(format!(
            "Invalid quantity mode: `{value}`. Expected one of: ['numeric', 'text']"
        ))),
    }
}

fn map_grid_error(exception: GridError) -> PyErr {
    match exception {
        GridError::DataFrame(message) => PyRuntimeError::new_err(message),
        other => PyValueError::new_err(other.to_string()),
    }
}

fn map_xlsx_error(exception: XlsxExportError) -> PyErr {
    match exception {
        XlsxExportError::InvalidStyle(message) => PyValueError::new_err(message),
        XlsxExportError::Xlsx(err) => PyOSError::new_err(format!("xlsx write error: {err}")),
        other => PyRuntimeError::new_err(other.to_string()),
    }
}

#[pyfunction(name = "convert_grid")]
#[pyo3(signature = (
    columns,
    rows,
    rule_group_resolution = None,
    rule_quantity_merge = "cluster_by_shared_quantity",
    rule_quantity = "numeric",
    if_singleton_each = false,
    if_show_part_used = true,
    unit_separator = ""
))]
#[allow(clippy::too_many_arguments)]
fn convert_grid_py(
    py: Python<'_>,
    columns: Vec<String>,
    rows: Vec<Vec<Option<PyCellInput>>>,
    rule_group_resolution: Option<&str>,
    rule_quantity_merge: &str,
    rule_quantity: &str,
    if_singleton_each: bool,
    if_show_part_used: bool,
    unit_separator: &str,
) -> PyResult<PyConvertOutput> {
    let spec_options = SpecConvertOptions {
        rule_group_resolution: parse_rule_group_resolution(rule_group_resolution)?,
        rule_quantity_merge: parse_rule_quantity_merge(rule_quantity_merge)?,
        rule_quantity: parse_rule_quantity(rule_quantity)?,
        if_singleton_each,
        if_show_part_used,
        unit_separator: unit_separator.to_string(),
        ..Default::default()
    };
    let table = SpecGridTable::new(
        columns,
        rows.into_iter()
            .map(|row| row.into_iter().map(EnumCellValue::from).collect())
            .collect(),
    );

    let output = py.allow_threads(|| convert_grid(&table, &spec_options));
    let output = output.map_err(map_grid_error)?;
    Ok(PyConvertOutput { inner: output })
}

#[pyfunction(name = "write_xlsx")]
#[pyo3(signature = (output, file_out))]
fn write_xlsx_py(
    py: Python<'_>,
    output: PyRef<'_, PyConvertOutput>,
    file_out: String,
) -> PyResult<Vec<String>> {
    let spec_output = &output.inner;
    let l_reports = py.allow_threads(|| {
        write_output_xlsx(
            PathBuf::from(file_out),
            spec_output,
            SpecCompositionXlsxStyle::default(),
        )
    });
    let l_reports = l_reports.map_err(map_xlsx_error)?;
    Ok(l_reports
        .into_iter()
        .flat_map(|report| report.warnings)
        .collect())
}

#[pymodule]
fn _formulakit_grid_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PyMalformedRow>()?;
    module.add_class::<PyReportConvert>()?;
    module.add_class::<PyConvertOutput>()?;
    module.add_function(wrap_pyfunction!(convert_grid_py, module)?)?;
    module.add_function(wrap_pyfunction!(write_xlsx_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
