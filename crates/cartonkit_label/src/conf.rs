use std::fs;
use std::path::Path;

use crate::spec::{LabelBatchError, SpecLabelConfig};

/// Default template directory, relative to the working directory.
pub const C_DIR_TEMPLATES: &str = "templates";
/// Suffix appended to the input stem for the output file name.
pub const C_OUTPUT_SUFFIX: &str = "-LABELS";
/// Output file extension.
pub const C_OUTPUT_EXTENSION: &str = "xlsx";
/// Basename pattern of packing-list inputs in folder mode.
pub const C_PATTERN_INPUT_FILES: &str = "*.xlsx";
/// Prefix of spreadsheet lock files that never count as inputs.
pub const C_PREFIX_LOCK_FILE: &str = "~$";
/// Generated sheet names are `"{prefix} {i}"`.
pub const C_SHEET_NAME_PREFIX: &str = "Carton";
/// Text printed for enabled boolean options.
pub const C_FLAG_YES: &str = "Yes";
/// Text printed for disabled boolean options.
pub const C_FLAG_NO: &str = "No";
/// Separator between joined shipper lines.
pub const C_SEP_JOINED_LINES: &str = ", ";
/// Separator between description and vendor style.
pub const C_SEP_DESCRIPTION_STYLE: &str = " # ";
/// Separator between carton dimensions.
pub const C_SEP_DIMENSIONS: &str = "x";

/// Load a TOML deployment config. Missing keys keep their defaults.
pub fn load_label_config<P: AsRef<Path>>(path: P) -> Result<SpecLabelConfig, LabelBatchError> {
    let path_file = path.as_ref();
    let txt = fs::read_to_string(path_file).map_err(|e| LabelBatchError::InvalidConfig {
        path: path_file.to_path_buf(),
        message: e.to_string(),
    })?;
    toml::from_str(&txt).map_err(|e| LabelBatchError::InvalidConfig {
        path: path_file.to_path_buf(),
        message: e.to_string(),
    })
}
