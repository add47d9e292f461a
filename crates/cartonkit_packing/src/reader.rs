//! Workbook reading (calamine) into [`SpecSheetGrid`] plus the one-call parse.

use std::path::Path;

use calamine::{Data, Reader, Xlsx, open_workbook};
use tracing::debug;

use crate::carton::parse_carton_table;
use crate::header::parse_packing_header;
use crate::spec::{
    EnumCellValue, PackingListError, SpecCartonTableOptions, SpecHeaderLayout, SpecPackingList,
    SpecSheetGrid,
};

/// Map a calamine cell to the normalized cell model.
///
/// Cached formula results are what calamine reports, so formula cells read as
/// their last computed value.
pub fn convert_calamine_data(value: &Data) -> EnumCellValue {
    match value {
        Data::Empty => EnumCellValue::None,
        Data::String(s) => EnumCellValue::String(s.clone()),
        Data::Float(f) => EnumCellValue::Number(*f),
        Data::Int(i) => EnumCellValue::Number(*i as f64),
        Data::Bool(b) => EnumCellValue::String(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => EnumCellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => EnumCellValue::String(s.clone()),
        Data::Error(e) => EnumCellValue::String(e.to_string()),
    }
}

/// Read the first worksheet of a packing-list workbook into memory.
pub fn read_packing_sheet<P: AsRef<Path>>(path: P) -> Result<SpecSheetGrid, PackingListError> {
    let path_file = path.as_ref();
    let mut workbook: Xlsx<_> =
        open_workbook(path_file).map_err(|e: calamine::XlsxError| PackingListError::Open {
            path: path_file.to_path_buf(),
            message: e.to_string(),
        })?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PackingListError::MissingSheet(path_file.to_path_buf()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| PackingListError::Open {
            path: path_file.to_path_buf(),
            message: e.to_string(),
        })?;

    let mut grid = SpecSheetGrid::new(sheet_name);
    let (n_row_start, n_col_start) = range.start().unwrap_or((0, 0));
    for (n_row, n_col, value) in range.used_cells() {
        let (Ok(n_row), Ok(n_col)) = (u32::try_from(n_row), u32::try_from(n_col)) else {
            continue;
        };
        grid.set_cell(
            n_row_start + n_row,
            n_col_start + n_col,
            convert_calamine_data(value),
        );
    }
    debug!(
        path = %path_file.display(),
        sheet = %grid.sheet_name,
        n_cells = grid.len(),
        "read packing-list sheet"
    );
    Ok(grid)
}

/// Parse header and carton table of an in-memory sheet.
///
/// A sheet without any carton row is rejected with
/// [`PackingListError::NoCartons`].
pub fn parse_packing_list(
    grid: &SpecSheetGrid,
    layout: &SpecHeaderLayout,
    options: &SpecCartonTableOptions,
) -> Result<SpecPackingList, PackingListError> {
    let header = parse_packing_header(grid, layout)?;
    let cartons = parse_carton_table(grid, options)?;
    if cartons.is_empty() {
        return Err(PackingListError::NoCartons {
            row_start: options.row_start,
        });
    }
    Ok(SpecPackingList { header, cartons })
}
