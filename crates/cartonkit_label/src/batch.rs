//! Batch orchestration: inputs -> parse -> emit -> overwrite check -> save.

use std::path::{Path, PathBuf};

use cartonkit_packing::{derive_size_pairs, parse_packing_list, read_packing_sheet};
use tracing::{debug, info, warn};
use umya_spreadsheet::Spreadsheet;

use crate::emitter::emit_label_document;
use crate::layout::SpecTemplateLayout;
use crate::policy::{OverwriteDecider, OverwritePolicy};
use crate::report::{ReportLabelBatch, ReportLabelBatchBuilder};
use crate::spec::{EnumLabelFailureKind, EnumLabelTemplate, LabelBatchError, SpecBatchRequest};
use crate::util::{derive_file_name, derive_input_files, derive_output_path, save_workbook_atomic};

struct SpecBatchContext<'a, 'b> {
    request: &'a SpecBatchRequest,
    layout: &'static SpecTemplateLayout,
    template_book: Spreadsheet,
    path_dir_dst: PathBuf,
    policy: OverwritePolicy<'b>,
    builder_report: ReportLabelBatchBuilder,
}

/// Load the template workbook of `template` from `dir_templates`.
///
/// A missing, unreadable, or sheet-less template is fatal for the whole run.
pub fn load_template_book(
    dir_templates: &Path,
    template: EnumLabelTemplate,
) -> Result<Spreadsheet, LabelBatchError> {
    let path_template = dir_templates.join(template.layout().file_name);
    let map_error = |message: String| LabelBatchError::TemplateUnavailable {
        template,
        path: path_template.clone(),
        message,
    };
    if !path_template.is_file() {
        return Err(map_error("file not found".to_string()));
    }
    let book = umya_spreadsheet::reader::xlsx::read(&path_template)
        .map_err(|e| map_error(e.to_string()))?;
    if book.get_sheet_count() == 0 {
        return Err(map_error("workbook has no worksheet".to_string()));
    }
    Ok(book)
}

fn validate_request(request: &SpecBatchRequest) -> Result<(PathBuf, PathBuf), LabelBatchError> {
    let path_source = request
        .path_source
        .clone()
        .ok_or(LabelBatchError::SourceUnset)?;
    let path_dir_dst = request
        .path_dir_destination
        .clone()
        .ok_or(LabelBatchError::DestinationUnset)?;
    if !path_source.exists() {
        return Err(LabelBatchError::SourceNotFound(path_source));
    }
    if !path_dir_dst.is_dir() {
        return Err(LabelBatchError::DestinationNotDirectory(path_dir_dst));
    }
    Ok((path_source, path_dir_dst))
}

/// Generate one label workbook per packing list under the request's source.
///
/// This function performs:
/// 1. Path validation and template loading (fatal on failure).
/// 2. Input discovery (single file, or `*.xlsx` children of a folder).
/// 3. Per file: parse, emit, overwrite decision, atomic save.
///
/// A file that fails is recorded in the report and the run continues.
/// `decider` is consulted only for outputs that already exist; an
/// [`crate::EnumOverwriteDecision::AllowAll`] answer holds until the end of this
/// run.
pub fn generate_labels(
    request: &SpecBatchRequest,
    decider: &mut dyn OverwriteDecider,
) -> Result<ReportLabelBatch, LabelBatchError> {
    let (path_source, path_dir_dst) = validate_request(request)?;
    let template_book = load_template_book(&request.config.dir_templates, request.template)?;
    let l_files = derive_input_files(&path_source)?;
    info!(
        source = %path_source.display(),
        destination = %path_dir_dst.display(),
        template = %request.template,
        n_files = l_files.len(),
        "label batch started"
    );

    let mut spec_ctx = SpecBatchContext {
        request,
        layout: request.template.layout(),
        template_book,
        path_dir_dst,
        policy: OverwritePolicy::new(decider),
        builder_report: ReportLabelBatchBuilder::default(),
    };
    for path_file in l_files {
        spec_ctx.builder_report.add_scanned();
        process_file(&mut spec_ctx, path_file);
    }

    let report = spec_ctx.builder_report.build();
    info!(
        saved = report.cnt_saved,
        skipped = report.cnt_skipped,
        failed = report.error_count(),
        "label batch finished"
    );
    Ok(report)
}

fn process_file(spec_ctx: &mut SpecBatchContext<'_, '_>, path_file: PathBuf) {
    let config = &spec_ctx.request.config;
    let name_file = derive_file_name(&path_file);

    let packing = match read_packing_sheet(&path_file)
        .and_then(|grid| parse_packing_list(&grid, &config.header, &config.carton_table))
    {
        Ok(packing) => packing,
        Err(e) => {
            warn!(path = %path_file.display(), error = %e, "packing list skipped");
            spec_ctx.builder_report.add_error(
                path_file,
                EnumLabelFailureKind::Parse,
                e.to_string(),
            );
            return;
        }
    };
    info!(
        path = %path_file.display(),
        n_cartons = packing.cartons.len(),
        "packing list parsed"
    );
    debug!(header = ?packing.header, "packing list header");

    let size_labels = &config.carton_table.size_labels;
    for carton in &packing.cartons {
        if derive_size_pairs(carton, size_labels).is_empty() {
            spec_ctx.builder_report.add_warning(format!(
                "{name_file}: carton at row {} has no size quantities",
                carton.row_source
            ));
        }
    }

    let book = match emit_label_document(
        &spec_ctx.template_book,
        spec_ctx.layout,
        &packing,
        size_labels,
        &spec_ctx.request.options,
        &name_file,
    ) {
        Ok(book) => book,
        Err(e) => {
            warn!(path = %path_file.display(), error = %e, "label emission failed");
            spec_ctx
                .builder_report
                .add_error(path_file, EnumLabelFailureKind::Emit, e.to_string());
            return;
        }
    };

    let path_file_out = derive_output_path(&path_file, &spec_ctx.path_dir_dst);
    match spec_ctx.policy.should_write(&path_file_out) {
        Ok(true) => {}
        Ok(false) => {
            warn!(path = %path_file_out.display(), "existing output kept");
            spec_ctx
                .builder_report
                .add_skipped(path_file, path_file_out);
            return;
        }
        Err(message) => {
            warn!(path = %path_file_out.display(), error = %message, "overwrite decision failed");
            spec_ctx.builder_report.add_error(
                path_file,
                EnumLabelFailureKind::Decision,
                format!(
                    "No overwrite decision for {}: {message}",
                    path_file_out.display()
                ),
            );
            return;
        }
    }

    match save_workbook_atomic(&book, &path_file_out) {
        Ok(()) => {
            info!(path = %path_file_out.display(), "label workbook saved");
            spec_ctx.builder_report.add_saved(path_file_out);
        }
        Err(e) => {
            warn!(path = %path_file_out.display(), error = %e, "label workbook not saved");
            spec_ctx.builder_report.add_error(
                path_file,
                EnumLabelFailureKind::Persistence,
                format!("Failed to write {}: {e}", path_file_out.display()),
            );
        }
    }
}
