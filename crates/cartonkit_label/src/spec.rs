//! Label batch models, request options, and top-level error types.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

use cartonkit_packing::{SpecCartonTableOptions, SpecHeaderLayout};
use serde::Deserialize;

use crate::conf::C_DIR_TEMPLATES;

////////////////////////////////////////////////////////////////////////////////
// #region EnumsInit

/// Label template layouts shipped with the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnumLabelTemplate {
    /// `template1.xlsx`: store-ready/pre-ticketed flags, split size ratio, no color.
    Standard,
    /// `template2.xlsx`: ship-to address lines, color, combined size ratio.
    Destination,
    /// `template3.xlsx`: color + style label, per-size quantity row.
    SizeGrid,
}

impl EnumLabelTemplate {
    /// All templates in identifier order.
    pub const ALL: [Self; 3] = [Self::Standard, Self::Destination, Self::SizeGrid];

    /// Stable identifier used by the UI bridge.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::Standard => "template1",
            Self::Destination => "template2",
            Self::SizeGrid => "template3",
        }
    }

    /// Parse an identifier (`template1`) or layout name (`standard`).
    pub fn from_identifier(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "template1" | "standard" => Some(Self::Standard),
            "template2" | "destination" => Some(Self::Destination),
            "template3" | "size_grid" | "sizegrid" => Some(Self::SizeGrid),
            _ => None,
        }
    }
}

impl fmt::Display for EnumLabelTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

/// Answer of the overwrite collaborator for one existing output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumOverwriteDecision {
    /// Replace this output file.
    Allow,
    /// Keep the existing file and skip this input.
    Deny,
    /// Replace this file and every later collision of the batch without asking.
    AllowAll,
}

/// Per-file failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumLabelFailureKind {
    /// Packing list unreadable or malformed.
    Parse,
    /// Template population failed.
    Emit,
    /// Output could not be written.
    Persistence,
    /// Overwrite decider failed to answer for an existing output.
    Decision,
}

impl EnumLabelFailureKind {
    /// Lowercase category name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parse => "parse",
            Self::Emit => "emit",
            Self::Persistence => "persistence",
            Self::Decision => "decision",
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region StyleOverrides

/// Identity of one style line: file name plus vendor style and description.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpecStyleKey {
    /// Source packing-list file name (no directory).
    pub file_name: String,
    /// Vendor style code as displayed.
    pub vendor_style: String,
    /// Style description as displayed.
    pub description: String,
}

/// Operator-entered values for one style line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecStyleOverride {
    /// Color printed on the label.
    pub color: String,
    /// Secondary style label; the global value is used when absent.
    pub style_label: Option<String>,
}

/// Final per-carton override values after resolution.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecResolvedStyle {
    /// Resolved color.
    pub color: String,
    /// Resolved style label.
    pub style_label: String,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region OptionsAndRequest

/// Operator options for one batch run.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SpecLabelOptions {
    /// Print "Yes" in the store-ready field.
    pub if_store_ready: bool,
    /// Print "Yes" in the pre-ticketed field.
    pub if_pre_ticketed: bool,
    /// Global color, used for keys without override.
    pub color: String,
    /// Global style label, used for keys without override.
    pub style_label: String,
    /// Enable per-style overrides from `style_overrides`.
    pub if_multiple_styles: bool,
    /// Per-style overrides keyed by (file, style, description).
    pub style_overrides: BTreeMap<SpecStyleKey, SpecStyleOverride>,
}

/// Deployment configuration: template location and packing-list geometry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpecLabelConfig {
    /// Directory holding `template1.xlsx` .. `template3.xlsx`.
    pub dir_templates: PathBuf,
    /// Header cell layout.
    pub header: SpecHeaderLayout,
    /// Carton table geometry.
    pub carton_table: SpecCartonTableOptions,
}

impl Default for SpecLabelConfig {
    fn default() -> Self {
        Self {
            dir_templates: PathBuf::from(C_DIR_TEMPLATES),
            header: SpecHeaderLayout::default(),
            carton_table: SpecCartonTableOptions::default(),
        }
    }
}

/// Immutable input of [`crate::generate_labels`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecBatchRequest {
    /// Packing-list file, or directory whose `*.xlsx` children are processed.
    pub path_source: Option<PathBuf>,
    /// Directory receiving `<stem>-LABELS.xlsx` files.
    pub path_dir_destination: Option<PathBuf>,
    /// Selected label template.
    pub template: EnumLabelTemplate,
    /// Operator options.
    pub options: SpecLabelOptions,
    /// Deployment configuration.
    pub config: SpecLabelConfig,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// One per-file failure with path + error text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLabelFileError {
    /// Offending input file.
    pub path: PathBuf,
    /// Failure category.
    pub rule_failure: EnumLabelFailureKind,
    /// User-facing error text.
    pub exception: String,
}

/// One input skipped because the operator kept the existing output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecLabelFileSkip {
    /// Input file.
    pub path: PathBuf,
    /// Existing output that was kept.
    pub path_file_out: PathBuf,
}

/// "Top-level call failed" errors. The batch stops before touching files.
#[derive(Debug, thiserror::Error)]
pub enum LabelBatchError {
    /// No source selected.
    #[error("Source is not set.")]
    SourceUnset,
    /// Source path does not exist.
    #[error("Source does not exist: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// Source directory listing failed.
    #[error("Failed to list source {}: {message}", .path.display())]
    SourceUnreadable {
        /// Source path.
        path: PathBuf,
        /// Underlying IO error text.
        message: String,
    },
    /// No destination selected.
    #[error("Destination is not set.")]
    DestinationUnset,
    /// Destination is missing or not a directory.
    #[error("Destination is not a directory: {}", .0.display())]
    DestinationNotDirectory(PathBuf),
    /// Template workbook missing or unreadable.
    #[error("Template {template} unavailable at {}: {message}", .path.display())]
    TemplateUnavailable {
        /// Selected template.
        template: EnumLabelTemplate,
        /// Expected template path.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },
    /// Deployment config file unreadable or malformed.
    #[error("Invalid config {}: {message}", .path.display())]
    InvalidConfig {
        /// Config file path.
        path: PathBuf,
        /// Underlying error text.
        message: String,
    },
}

/// Template population failures for one document.
#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    /// Template workbook has no worksheet to clone.
    #[error("Template workbook has no worksheet.")]
    TemplateWithoutSheet,
    /// Generated sheet name rejected by the workbook.
    #[error("Cannot add sheet `{name}`: {message}")]
    SheetName {
        /// Rejected sheet name.
        name: String,
        /// Workbook error text.
        message: String,
    },
    /// Layout target cell is malformed.
    #[error("Invalid target cell `{0}` in layout")]
    InvalidTargetCell(String),
    /// Template sheet could not be removed.
    #[error("Cannot remove template sheet `{name}`: {message}")]
    RemoveTemplate {
        /// Template sheet name.
        name: String,
        /// Workbook error text.
        message: String,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
