use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use umya_spreadsheet::Spreadsheet;

use crate::conf::{C_OUTPUT_EXTENSION, C_OUTPUT_SUFFIX, C_PATTERN_INPUT_FILES, C_PREFIX_LOCK_FILE};
use crate::spec::LabelBatchError;

/// Basename of `path` as lossy UTF-8.
pub fn derive_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// `<dir_destination>/<stem>-LABELS.xlsx`.
pub fn derive_output_path(path_file_in: &Path, path_dir_destination: &Path) -> PathBuf {
    let stem = path_file_in
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    path_dir_destination.join(format!("{stem}{C_OUTPUT_SUFFIX}.{C_OUTPUT_EXTENSION}"))
}

fn create_input_matcher() -> Result<GlobMatcher, LabelBatchError> {
    GlobBuilder::new(C_PATTERN_INPUT_FILES)
        .case_insensitive(true)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| LabelBatchError::SourceUnreadable {
            path: PathBuf::from(C_PATTERN_INPUT_FILES),
            message: e.to_string(),
        })
}

/// `true` for spreadsheet lock files (`~$name.xlsx`).
pub fn is_lock_file(name_file: &str) -> bool {
    name_file.starts_with(C_PREFIX_LOCK_FILE)
}

/// Packing-list inputs under `path_source`.
///
/// A file is returned as-is. For a directory only its immediate `*.xlsx`
/// children are taken, lock files excluded, sorted by file name.
pub fn derive_input_files(path_source: &Path) -> Result<Vec<PathBuf>, LabelBatchError> {
    if !path_source.is_dir() {
        return Ok(vec![path_source.to_path_buf()]);
    }

    let matcher = create_input_matcher()?;
    let map_read_error = |e: io::Error| LabelBatchError::SourceUnreadable {
        path: path_source.to_path_buf(),
        message: e.to_string(),
    };
    let mut l_files = Vec::new();
    for entry in fs::read_dir(path_source).map_err(map_read_error)? {
        let entry = entry.map_err(map_read_error)?;
        let path_entry = entry.path();
        if !path_entry.is_file() {
            continue;
        }
        let name_file = derive_file_name(&path_entry);
        if is_lock_file(&name_file) || !matcher.is_match(&name_file) {
            continue;
        }
        l_files.push(path_entry);
    }
    l_files.sort_by_key(|path| derive_file_name(path));
    Ok(l_files)
}

/// Write `book` to `path_file_out` through a temp file in the same directory.
///
/// The destination is replaced only after the workbook was fully written.
pub fn save_workbook_atomic(book: &Spreadsheet, path_file_out: &Path) -> io::Result<()> {
    let path_dir = path_file_out
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let mut file_tmp = tempfile::Builder::new()
        .prefix(".cartonkit-")
        .suffix(".tmp")
        .tempfile_in(path_dir)?;
    umya_spreadsheet::writer::xlsx::write_writer(book, file_tmp.as_file_mut())
        .map_err(|e| io::Error::other(e.to_string()))?;
    file_tmp.as_file_mut().sync_all()?;
    file_tmp.persist(path_file_out).map_err(|e| e.error)?;
    Ok(())
}
