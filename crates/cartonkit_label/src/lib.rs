//! `cartonkit_label` v1:
//! Per-carton shipping label generation from vendor packing lists.
//!
//! Module layout:
//! - `conf`    : constants and TOML config loading
//! - `spec`    : templates, options, request, errors
//! - `layout`  : declarative per-template field mappings
//! - `style`   : style override keys and resolution
//! - `emitter` : template cloning and cell population
//! - `policy`  : overwrite decision policy
//! - `report`  : batch report + builder
//! - `util`    : input discovery, output naming, atomic save
//! - `batch`   : batch orchestration
pub mod batch;
pub mod conf;
pub mod emitter;
pub mod layout;
pub mod policy;
pub mod report;
pub mod spec;
pub mod style;
pub mod util;

pub use batch::{generate_labels, load_template_book};
pub use conf::{C_OUTPUT_SUFFIX, C_PREFIX_LOCK_FILE, load_label_config};
pub use emitter::{derive_sheet_name, emit_label_document};
pub use layout::{
    EnumFieldValue, EnumLabelField, SpecFieldMapping, SpecLabelContext, SpecTemplateLayout,
    derive_field_value,
};
pub use policy::{FixedOverwriteDecider, OverwriteDecider, OverwritePolicy};
pub use report::{ReportLabelBatch, ReportLabelBatchBuilder};
pub use spec::{
    EmitError, EnumLabelFailureKind, EnumLabelTemplate, EnumOverwriteDecision, LabelBatchError,
    SpecBatchRequest, SpecLabelConfig, SpecLabelFileError, SpecLabelFileSkip, SpecLabelOptions,
    SpecResolvedStyle, SpecStyleKey, SpecStyleOverride,
};
pub use style::{SpecStyleScan, collect_style_keys, resolve_style, scan_style_keys};
pub use util::{derive_input_files, derive_output_path};
