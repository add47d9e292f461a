//! Style override keys, resolution, and the pre-run key scan.

use std::collections::BTreeSet;
use std::path::Path;

use cartonkit_packing::{SpecCarton, parse_carton_table, read_packing_sheet};
use tracing::{debug, warn};

use crate::spec::{
    EnumLabelFailureKind, LabelBatchError, SpecLabelConfig, SpecLabelFileError, SpecLabelOptions,
    SpecResolvedStyle, SpecStyleKey,
};
use crate::util::{derive_file_name, derive_input_files};

impl SpecStyleKey {
    /// Key of `carton` inside the file named `file_name`.
    pub fn from_carton(file_name: &str, carton: &SpecCarton) -> Self {
        Self {
            file_name: file_name.to_string(),
            vendor_style: carton.vendor_style.to_text().trim().to_string(),
            description: carton.description.to_text().trim().to_string(),
        }
    }
}

/// Resolve color and style label for one carton key.
///
/// The per-style override applies only in multiple-styles mode and only when
/// the key was entered; everything else falls back to the global values.
pub fn resolve_style(key: &SpecStyleKey, options: &SpecLabelOptions) -> SpecResolvedStyle {
    let spec_override = options
        .if_multiple_styles
        .then(|| options.style_overrides.get(key))
        .flatten();
    match spec_override {
        Some(spec_override) => SpecResolvedStyle {
            color: spec_override.color.clone(),
            style_label: spec_override
                .style_label
                .clone()
                .unwrap_or_else(|| options.style_label.clone()),
        },
        None => SpecResolvedStyle {
            color: options.color.clone(),
            style_label: options.style_label.clone(),
        },
    }
}

/// Distinct keys of `cartons`, in first-seen order.
pub fn collect_style_keys(file_name: &str, cartons: &[SpecCarton]) -> Vec<SpecStyleKey> {
    let mut set_seen = BTreeSet::new();
    cartons
        .iter()
        .map(|carton| SpecStyleKey::from_carton(file_name, carton))
        .filter(|key| set_seen.insert(key.clone()))
        .collect()
}

/// Result of [`scan_style_keys`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpecStyleScan {
    /// Distinct keys across all inputs, grouped by file in processing order.
    pub keys: Vec<SpecStyleKey>,
    /// Inputs whose carton table could not be read.
    pub errors: Vec<SpecLabelFileError>,
}

impl SpecStyleScan {
    /// `true` when more than one distinct key was found.
    pub fn if_multiple_styles_detected(&self) -> bool {
        self.keys.len() > 1
    }
}

/// Collect the style keys of every input under `path_source`.
///
/// Only the carton table is read; header problems surface later during the
/// batch run. Unreadable files are reported, not fatal.
pub fn scan_style_keys<P: AsRef<Path>>(
    path_source: P,
    config: &SpecLabelConfig,
) -> Result<SpecStyleScan, LabelBatchError> {
    let path_source = path_source.as_ref();
    if !path_source.exists() {
        return Err(LabelBatchError::SourceNotFound(path_source.to_path_buf()));
    }

    let mut spec_scan = SpecStyleScan::default();
    for path_file in derive_input_files(path_source)? {
        let cartons = read_packing_sheet(&path_file)
            .and_then(|grid| parse_carton_table(&grid, &config.carton_table));
        match cartons {
            Ok(cartons) => {
                let l_keys = collect_style_keys(&derive_file_name(&path_file), &cartons);
                debug!(path = %path_file.display(), n_keys = l_keys.len(), "scanned style keys");
                spec_scan.keys.extend(l_keys);
            }
            Err(e) => {
                warn!(path = %path_file.display(), error = %e, "style scan failed");
                spec_scan.errors.push(SpecLabelFileError {
                    path: path_file,
                    rule_failure: EnumLabelFailureKind::Parse,
                    exception: e.to_string(),
                });
            }
        }
    }
    Ok(spec_scan)
}
