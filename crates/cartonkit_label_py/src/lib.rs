use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use cartonkit_label::{
    EnumLabelTemplate, EnumOverwriteDecision, FixedOverwriteDecider, LabelBatchError,
    OverwriteDecider, ReportLabelBatch, SpecBatchRequest, SpecLabelConfig, SpecLabelFileError,
    SpecLabelFileSkip, SpecLabelOptions, SpecStyleKey, SpecStyleOverride, generate_labels,
    load_label_config, scan_style_keys,
};
use pyo3::exceptions::{PyFileNotFoundError, PyNotADirectoryError, PyOSError, PyValueError};
use pyo3::prelude::*;
use tracing_subscriber::EnvFilter;

const N_BRIDGE_ABI_VERSION: u64 = 1;
const C_BRIDGE_CONTRACT_VERSION: &str = "cartonkit.label.generate_labels.v1";
const C_BRIDGE_TRANSPORT: &str = "rust_native";

type StyleOverrideRow = (String, String, String, String, Option<String>);

#[pyclass(name = "SpecLabelFileError")]
#[derive(Debug, Clone)]
struct PySpecLabelFileError {
    #[pyo3(get)]
    path: String,
    #[pyo3(get)]
    rule_failure: String,
    #[pyo3(get)]
    exception: String,
}

impl From<SpecLabelFileError> for PySpecLabelFileError {
    fn from(spec_error: SpecLabelFileError) -> Self {
        Self {
            path: spec_error.path.to_string_lossy().to_string(),
            rule_failure: spec_error.rule_failure.as_str().to_string(),
            exception: spec_error.exception,
        }
    }
}

#[pyclass(name = "SpecLabelFileSkip")]
#[derive(Debug, Clone)]
struct PySpecLabelFileSkip {
    #[pyo3(get)]
    path: String,
    #[pyo3(get)]
    path_file_out: String,
}

impl From<SpecLabelFileSkip> for PySpecLabelFileSkip {
    fn from(spec_skip: SpecLabelFileSkip) -> Self {
        Self {
            path: spec_skip.path.to_string_lossy().to_string(),
            path_file_out: spec_skip.path_file_out.to_string_lossy().to_string(),
        }
    }
}

#[pyclass(name = "ReportLabelBatch")]
#[derive(Debug, Clone)]
struct PyReportLabelBatch {
    #[pyo3(get)]
    cnt_scanned: u64,
    #[pyo3(get)]
    cnt_saved: u64,
    #[pyo3(get)]
    cnt_skipped: u64,
    #[pyo3(get)]
    saved: Vec<String>,
    #[pyo3(get)]
    skipped: Vec<PySpecLabelFileSkip>,
    #[pyo3(get)]
    warnings: Vec<String>,
    #[pyo3(get)]
    errors: Vec<PySpecLabelFileError>,
}

impl From<ReportLabelBatch> for PyReportLabelBatch {
    fn from(report: ReportLabelBatch) -> Self {
        Self {
            cnt_scanned: report.cnt_scanned,
            cnt_saved: report.cnt_saved,
            cnt_skipped: report.cnt_skipped,
            saved: report
                .saved
                .iter()
                .map(|p| p.to_string_lossy().to_string())
                .collect(),
            skipped: report
                .skipped
                .into_iter()
                .map(PySpecLabelFileSkip::from)
                .collect(),
            warnings: report.warnings,
            errors: report
                .errors
                .into_iter()
                .map(PySpecLabelFileError::from)
                .collect(),
        }
    }
}

#[pymethods]
impl PyReportLabelBatch {
    #[getter]
    fn cnt_failed(&self) -> usize {
        self.errors.len()
    }

    #[getter]
    fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_saved".to_string(), self.cnt_saved);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts.insert("cnt_failed".to_string(), self.cnt_failed() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    #[pyo3(signature = (prefix = "[LABELS]"))]
    fn format(&self, prefix: &str) -> String {
        format!(
            "{prefix} scanned={} saved={} skipped={} failed={} warnings={}",
            self.cnt_scanned,
            self.cnt_saved,
            self.cnt_skipped,
            self.cnt_failed(),
            self.warning_count()
        )
    }

    fn __str__(&self) -> String {
        self.format("[LABELS]")
    }
}

/// Bridges a Python `on_conflict(path) -> str` callable.
///
/// A raising or malformed callback leaves that output untouched and is
/// reported as a `decision` error for its input file.
struct PyOverwriteDecider {
    callback: Py<PyAny>,
    failure: Option<String>,
}

impl OverwriteDecider for PyOverwriteDecider {
    fn decide(&mut self, path_file_out: &Path) -> EnumOverwriteDecision {
        let result = Python::with_gil(|py| -> PyResult<EnumOverwriteDecision> {
            let answer = self
                .callback
                .call1(py, (path_file_out.to_string_lossy().to_string(),))?;
            parse_overwrite_decision(&answer.extract::<String>(py)?)
        });
        match result {
            Ok(decision) => decision,
            Err(e) => {
                self.failure = Some(format!("`on_conflict` callback failed: {e}"));
                EnumOverwriteDecision::Deny
            }
        }
    }

    fn take_failure(&mut self) -> Option<String> {
        self.failure.take()
    }
}

fn parse_overwrite_decision(value: &str) -> PyResult<EnumOverwriteDecision> {
    match value {
        "allow" => Ok(EnumOverwriteDecision::Allow),
        "deny" => Ok(EnumOverwriteDecision::Deny),
        "allow_all" => Ok(EnumOverwriteDecision::AllowAll),
        _ => Err(PyValueError::new_err(format!(
            "Invalid overwrite decision: `{value}`. Expected one of: ['allow', 'deny', 'allow_all']"
        ))),
    }
}

fn parse_rule_conflict(value: &str) -> PyResult<EnumOverwriteDecision> {
    match value {
        "allow" => Ok(EnumOverwriteDecision::Allow),
        "deny" => Ok(EnumOverwriteDecision::Deny),
        _ => Err(PyValueError::new_err(format!(
            "Invalid conflict strategy: `{value}`. Expected one of: ['allow', 'deny']"
        ))),
    }
}

fn parse_template(value: &str) -> PyResult<EnumLabelTemplate> {
    EnumLabelTemplate::from_identifier(value).ok_or_else(|| {
        PyValueError::new_err(format!(
            "Invalid template: `{value}`. Expected one of: ['template1', 'template2', 'template3']"
        ))
    })
}

fn map_label_batch_error(exception: LabelBatchError) -> PyErr {
    let message = exception.to_string();
    match exception {
        LabelBatchError::SourceUnset
        | LabelBatchError::DestinationUnset
        | LabelBatchError::InvalidConfig { .. } => PyValueError::new_err(message),
        LabelBatchError::SourceNotFound(_) | LabelBatchError::TemplateUnavailable { .. } => {
            PyFileNotFoundError::new_err(message)
        }
        LabelBatchError::DestinationNotDirectory(_) => PyNotADirectoryError::new_err(message),
        LabelBatchError::SourceUnreadable { .. } => PyOSError::new_err(message),
    }
}

fn derive_label_config(
    dir_templates: Option<String>,
    config_file: Option<String>,
) -> PyResult<SpecLabelConfig> {
    let mut config = match config_file {
        Some(path_config) => load_label_config(path_config).map_err(map_label_batch_error)?,
        None => SpecLabelConfig::default(),
    };
    if let Some(dir_templates) = dir_templates {
        config.dir_templates = PathBuf::from(dir_templates);
    }
    Ok(config)
}

fn derive_style_overrides(
    rows: Option<Vec<StyleOverrideRow>>,
) -> BTreeMap<SpecStyleKey, SpecStyleOverride> {
    rows.unwrap_or_default()
        .into_iter()
        .map(|(file_name, vendor_style, description, color, style_label)| {
            (
                SpecStyleKey {
                    file_name,
                    vendor_style,
                    description,
                },
                SpecStyleOverride { color, style_label },
            )
        })
        .collect()
}

#[pyfunction(name = "generate_labels")]
#[pyo3(signature = (
    source,
    destination,
    template,
    dir_templates = None,
    if_store_ready = false,
    if_pre_ticketed = false,
    color = String::new(),
    style_label = String::new(),
    if_multiple_styles = false,
    style_overrides = None,
    config_file = None,
    on_conflict = None,
    rule_conflict = "deny"
))]
#[allow(clippy::too_many_arguments)]
fn generate_labels_py(
    py: Python<'_>,
    source: Option<String>,
    destination: Option<String>,
    template: &str,
    dir_templates: Option<String>,
    if_store_ready: bool,
    if_pre_ticketed: bool,
    color: String,
    style_label: String,
    if_multiple_styles: bool,
    style_overrides: Option<Vec<StyleOverrideRow>>,
    config_file: Option<String>,
    on_conflict: Option<Py<PyAny>>,
    rule_conflict: &str,
) -> PyResult<PyReportLabelBatch> {
    let request = SpecBatchRequest {
        path_source: source.map(PathBuf::from),
        path_dir_destination: destination.map(PathBuf::from),
        template: parse_template(template)?,
        options: SpecLabelOptions {
            if_store_ready,
            if_pre_ticketed,
            color,
            style_label,
            if_multiple_styles,
            style_overrides: derive_style_overrides(style_overrides),
        },
        config: derive_label_config(dir_templates, config_file)?,
    };
    let rule_conflict = parse_rule_conflict(rule_conflict)?;

    let report = match on_conflict {
        Some(callback) => {
            let mut decider = PyOverwriteDecider {
                callback,
                failure: None,
            };
            py.allow_threads(|| generate_labels(&request, &mut decider))
        }
        None => {
            let mut decider = FixedOverwriteDecider(rule_conflict);
            py.allow_threads(|| generate_labels(&request, &mut decider))
        }
    };
    let report = report.map_err(map_label_batch_error)?;
    Ok(PyReportLabelBatch::from(report))
}

#[pyfunction(name = "scan_style_keys")]
#[pyo3(signature = (source, dir_templates = None, config_file = None))]
fn scan_style_keys_py(
    py: Python<'_>,
    source: String,
    dir_templates: Option<String>,
    config_file: Option<String>,
) -> PyResult<Vec<(String, String, String)>> {
    let config = derive_label_config(dir_templates, config_file)?;
    let spec_scan = py
        .allow_threads(|| scan_style_keys(&source, &config))
        .map_err(map_label_batch_error)?;
    Ok(spec_scan
        .keys
        .into_iter()
        .map(|key| (key.file_name, key.vendor_style, key.description))
        .collect())
}

/// Install a fmt subscriber at `level`. Returns `false` when one already exists.
#[pyfunction(name = "init_logging")]
#[pyo3(signature = (level = "info"))]
fn init_logging_py(level: &str) -> PyResult<bool> {
    let filter = EnvFilter::try_new(level)
        .map_err(|e| PyValueError::new_err(format!("Invalid log level `{level}`: {e}")))?;
    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_ok())
}

#[pymodule]
fn _cartonkit_label_rs(module: &Bound<'_, PyModule>) -> PyResult<()> {
    module.add_class::<PySpecLabelFileError>()?;
    module.add_class::<PySpecLabelFileSkip>()?;
    module.add_class::<PyReportLabelBatch>()?;
    module.add_function(wrap_pyfunction!(generate_labels_py, module)?)?;
    module.add_function(wrap_pyfunction!(scan_style_keys_py, module)?)?;
    module.add_function(wrap_pyfunction!(init_logging_py, module)?)?;
    module.add("__bridge_abi__", N_BRIDGE_ABI_VERSION)?;
    module.add("__bridge_contract__", C_BRIDGE_CONTRACT_VERSION)?;
    module.add("__bridge_transport__", C_BRIDGE_TRANSPORT)?;
    Ok(())
}
