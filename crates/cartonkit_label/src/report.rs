//! Label batch report models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use crate::spec::{EnumLabelFailureKind, SpecLabelFileError, SpecLabelFileSkip};

/// Aggregate counters and diagnostics for one `generate_labels` run.
#[derive(Debug, Default, Clone)]
pub struct ReportLabelBatch {
    /// Input files considered.
    pub cnt_scanned: u64,
    /// Label workbooks written.
    pub cnt_saved: u64,
    /// Inputs skipped because the existing output was kept.
    pub cnt_skipped: u64,
    /// Written output paths, in processing order.
    pub saved: Vec<PathBuf>,
    /// Overwrite denials.
    pub skipped: Vec<SpecLabelFileSkip>,
    /// Non-fatal warnings collected during the run.
    pub warnings: Vec<String>,
    /// Per-file failures.
    pub errors: Vec<SpecLabelFileError>,
}

impl ReportLabelBatch {
    /// Number of failed input files.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Number of collected warnings.
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, u64> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_scanned".to_string(), self.cnt_scanned);
        dict_counts.insert("cnt_saved".to_string(), self.cnt_saved);
        dict_counts.insert("cnt_skipped".to_string(), self.cnt_skipped);
        dict_counts.insert("cnt_failed".to_string(), self.error_count() as u64);
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count() as u64);
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let dict_counts = self.to_dict();
        format!(
            "{prefix} scanned={} saved={} skipped={} failed={} warnings={}",
            dict_counts["cnt_scanned"],
            dict_counts["cnt_saved"],
            dict_counts["cnt_skipped"],
            dict_counts["cnt_failed"],
            dict_counts["cnt_warnings"]
        )
    }
}

impl fmt::Display for ReportLabelBatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[LABELS]"))
    }
}

/// Mutable accumulator for batch statistics.
#[derive(Debug, Default, Clone)]
pub struct ReportLabelBatchBuilder {
    /// See [`ReportLabelBatch::cnt_scanned`].
    pub cnt_scanned: u64,
    /// See [`ReportLabelBatch::saved`].
    pub saved: Vec<PathBuf>,
    /// See [`ReportLabelBatch::skipped`].
    pub skipped: Vec<SpecLabelFileSkip>,
    /// See [`ReportLabelBatch::errors`].
    pub errors: Vec<SpecLabelFileError>,
    /// See [`ReportLabelBatch::warnings`].
    pub warnings: Vec<String>,
}

impl ReportLabelBatchBuilder {
    /// Increment scanned count by one.
    pub fn add_scanned(&mut self) {
        self.cnt_scanned += 1;
    }

    /// Record one written output.
    pub fn add_saved(&mut self, path_file_out: PathBuf) {
        self.saved.push(path_file_out);
    }

    /// Record one overwrite denial.
    pub fn add_skipped(&mut self, path: PathBuf, path_file_out: PathBuf) {
        self.skipped.push(SpecLabelFileSkip {
            path,
            path_file_out,
        });
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Add one path-scoped failure.
    pub fn add_error(
        &mut self,
        path: PathBuf,
        rule_failure: EnumLabelFailureKind,
        exception: String,
    ) {
        self.errors.push(SpecLabelFileError {
            path,
            rule_failure,
            exception,
        });
    }

    /// Finalize builder into immutable report.
    pub fn build(self) -> ReportLabelBatch {
        ReportLabelBatch {
            cnt_scanned: self.cnt_scanned,
            cnt_saved: self.saved.len() as u64,
            cnt_skipped: self.skipped.len() as u64,
            saved: self.saved,
            skipped: self.skipped,
            errors: self.errors,
            warnings: self.warnings,
        }
    }
}
