//! Stateless helpers shared by the header and carton parsers.

use regex::Regex;

use crate::spec::{EnumCellValue, PackingListError, SpecSheetGrid};

////////////////////////////////////////////////////////////////////////////////
// #region CellReferences

/// Convert column letters (`"A"`, `"S"`, `"AA"`) to a 0-based column index.
pub fn parse_col_letters(col_letters: &str) -> Result<u32, PackingListError> {
    let txt = col_letters.trim();
    if txt.is_empty() || !txt.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(PackingListError::InvalidCellReference(
            col_letters.to_string(),
        ));
    }

    let mut n_col: u32 = 0;
    for c in txt.chars() {
        let n_digit = u32::from(c.to_ascii_uppercase()) - u32::from('A') + 1;
        n_col = n_col
            .checked_mul(26)
            .and_then(|v| v.checked_add(n_digit))
            .ok_or_else(|| PackingListError::InvalidCellReference(col_letters.to_string()))?;
    }
    Ok(n_col - 1)
}

/// Convert an A1 reference (`"B5"`) to 0-based `(row, col)`.
pub fn parse_cell_ref(cell_ref: &str) -> Result<(u32, u32), PackingListError> {
    let txt = cell_ref.trim();
    let n_split = txt
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| PackingListError::InvalidCellReference(cell_ref.to_string()))?;
    let (col_letters, row_digits) = txt.split_at(n_split);

    let n_col = parse_col_letters(col_letters)
        .map_err(|_| PackingListError::InvalidCellReference(cell_ref.to_string()))?;
    let n_row = row_digits
        .parse::<u32>()
        .ok()
        .filter(|v| *v >= 1)
        .ok_or_else(|| PackingListError::InvalidCellReference(cell_ref.to_string()))?;
    Ok((n_row - 1, n_col))
}

/// Read the value at an A1 reference.
pub fn read_cell_a1<'a>(
    grid: &'a SpecSheetGrid,
    cell_ref: &str,
) -> Result<&'a EnumCellValue, PackingListError> {
    let (n_row, n_col) = parse_cell_ref(cell_ref)?;
    Ok(grid.cell(n_row, n_col))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ValueHelpers

/// Round to one decimal place on the stored binary value, ties to even.
pub fn round_to_one_decimal(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

/// Render a number the way a spreadsheet user expects (`12` not `12.0`).
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        return format!("{}", value as i64);
    }
    value.to_string()
}

/// Compile a configured extraction pattern.
pub fn compile_pattern(pattern: &str) -> Result<Regex, PackingListError> {
    Regex::new(pattern).map_err(|e| PackingListError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
