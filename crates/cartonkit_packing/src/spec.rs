//! Packing-list models, layouts, and top-level error types.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::conf::{derive_default_carton_table_options, derive_default_header_layout};
use crate::util::format_number;

////////////////////////////////////////////////////////////////////////////////
// #region CellValues

/// Normalized cell value read from a packing-list sheet.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EnumCellValue {
    /// Missing/blank value.
    #[default]
    None,
    /// Text value.
    String(String),
    /// Numeric value.
    Number(f64),
}

impl EnumCellValue {
    /// `true` for missing cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Self::None => true,
            Self::String(s) => s.trim().is_empty(),
            Self::Number(_) => false,
        }
    }

    /// Display text; integral numbers render without a fractional part.
    pub fn to_text(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::String(s) => s.clone(),
            Self::Number(n) => format_number(*n),
        }
    }

    /// Numeric view of the cell, if it holds a number.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::None | Self::String(_) => None,
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// Sparse in-memory copy of one worksheet, addressed by 0-based (row, col).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpecSheetGrid {
    /// Worksheet name in the source workbook.
    pub sheet_name: String,
    cells: BTreeMap<(u32, u32), EnumCellValue>,
}

static CELL_VALUE_NONE: EnumCellValue = EnumCellValue::None;

impl SpecSheetGrid {
    /// Create an empty grid.
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            cells: BTreeMap::new(),
        }
    }

    /// Store a value; blank values are dropped.
    pub fn set_cell(&mut self, row: u32, col: u32, value: EnumCellValue) {
        if matches!(value, EnumCellValue::None) {
            self.cells.remove(&(row, col));
            return;
        }
        self.cells.insert((row, col), value);
    }

    /// Value at 0-based (row, col), `EnumCellValue::None` when absent.
    pub fn cell(&self, row: u32, col: u32) -> &EnumCellValue {
        self.cells.get(&(row, col)).unwrap_or(&CELL_VALUE_NONE)
    }

    /// Largest 0-based row index holding a value.
    pub fn row_max(&self) -> Option<u32> {
        self.cells.keys().map(|(row, _)| *row).max()
    }

    /// Number of non-blank cells stored.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` when the grid holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region LayoutOptions

/// Cell coordinates (A1 references) of the packing-list header block.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpecHeaderLayout {
    /// Ship-to address lines, top to bottom (up to 4).
    pub cells_ship_to: Vec<String>,
    /// Shipper address lines, top to bottom.
    pub cells_shipper: Vec<String>,
    /// Invoice number cell.
    pub cell_invoice_number: String,
    /// Total units cell.
    pub cell_total_units: String,
    /// Total weight cell (must be numeric).
    pub cell_total_weight: String,
    /// Cubic feet cell (must be numeric).
    pub cell_cubic_feet: String,
    /// Structured PO box cell.
    pub cell_po_box: String,
    /// Free-text PO box cell used when the structured cell is empty.
    pub cell_po_box_fallback: String,
    /// Structured pallet count cell.
    pub cell_pallets: String,
    /// Free-text pallet count cell used when the structured cell is empty.
    pub cell_pallets_fallback: String,
    /// Regex with one capture group for the PO number.
    pub pattern_po_box: String,
    /// Regex with one capture group for the pallet count.
    pub pattern_pallets: String,
    /// Bare pallet label treated as "no value".
    pub label_pallets: String,
}

impl Default for SpecHeaderLayout {
    fn default() -> Self {
        derive_default_header_layout()
    }
}

/// Carton table geometry. Columns are given as letters (`"B"`, `"AA"`).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SpecCartonTableOptions {
    /// First table row (1-based).
    pub row_start: u32,
    /// Leading columns inspected for the empty-row stop rule.
    pub n_cols_inspected: usize,
    /// Columns inside the inspected span that never count as data.
    pub cols_excluded: Vec<String>,
    /// Carton number column.
    pub col_carton_number: String,
    /// Length/width/height columns.
    pub cols_dimension: [String; 3],
    /// Carton weight column.
    pub col_weight: String,
    /// Vendor style column.
    pub col_vendor_style: String,
    /// Description column; size quantities start right after it.
    pub col_description: String,
    /// Total units column.
    pub col_total_units: String,
    /// Size labels, one per quantity column, small to large.
    pub size_labels: Vec<String>,
}

impl Default for SpecCartonTableOptions {
    fn default() -> Self {
        derive_default_carton_table_options()
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Records

/// Invoice/shipping metadata shared by every carton of one packing list.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPackingListHeader {
    /// Ship-to address lines.
    pub ship_to: Vec<EnumCellValue>,
    /// Shipper address lines.
    pub shipper: Vec<EnumCellValue>,
    /// Invoice number.
    pub invoice_number: EnumCellValue,
    /// Total units across the shipment.
    pub total_units: EnumCellValue,
    /// Total weight, rounded to one decimal.
    pub total_weight: f64,
    /// Cubic feet, rounded to one decimal.
    pub cubic_feet: f64,
    /// PO box identifier.
    pub po_box: String,
    /// Pallet count, absent when the sheet carries only the bare label.
    pub pallet_count: Option<String>,
}

/// One carton row of the packing list.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecCarton {
    /// 1-based sheet row the carton was read from.
    pub row_source: u32,
    /// Carton number.
    pub carton_number: EnumCellValue,
    /// Length/width/height.
    pub dimensions: [EnumCellValue; 3],
    /// Carton weight.
    pub weight: EnumCellValue,
    /// Vendor style code.
    pub vendor_style: EnumCellValue,
    /// Style description.
    pub description: EnumCellValue,
    /// Per-size quantities, same length and order as the size labels.
    pub size_quantities: Vec<EnumCellValue>,
    /// Units in this carton.
    pub total_units: EnumCellValue,
}

/// Parsed packing list: one header plus cartons in row order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecPackingList {
    /// Shared header.
    pub header: SpecPackingListHeader,
    /// Cartons in source row order.
    pub cartons: Vec<SpecCarton>,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SizeRatio

/// Size ratio rendering mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EnumSizeRatioMode {
    /// `"S/M"` plus a parallel `"3/5"`.
    #[default]
    Split,
    /// `"S (3), M (5)"` with no separate quantity string.
    Combined,
}

/// Rendered size ratio for one carton.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumSizeRatio {
    /// Label sequence and quantity sequence.
    Split {
        /// `/`-joined labels.
        ratio: String,
        /// `/`-joined quantities.
        quantities: String,
    },
    /// `label (qty)` pairs joined by `", "`.
    Combined(String),
}

impl EnumSizeRatio {
    /// Label-side text (the only text in combined mode).
    pub fn ratio_text(&self) -> &str {
        match self {
            Self::Split { ratio, .. } => ratio,
            Self::Combined(text) => text,
        }
    }

    /// Quantity-side text; empty in combined mode.
    pub fn quantities_text(&self) -> &str {
        match self {
            Self::Split { quantities, .. } => quantities,
            Self::Combined(_) => "",
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Packing-list read/parse failures. Each one aborts the current file only.
#[derive(Debug, thiserror::Error)]
pub enum PackingListError {
    /// Workbook could not be opened or decoded.
    #[error("Failed to open packing list {}: {message}", .path.display())]
    Open {
        /// Packing-list path.
        path: PathBuf,
        /// Underlying reader error text.
        message: String,
    },
    /// Workbook has no worksheet to read.
    #[error("Packing list has no worksheet: {}", .0.display())]
    MissingSheet(PathBuf),
    /// A configured cell/column reference is malformed.
    #[error("Invalid cell reference `{0}`")]
    InvalidCellReference(String),
    /// A configured extraction pattern does not compile.
    #[error("Invalid pattern `{pattern}`: {message}")]
    InvalidPattern {
        /// Offending pattern.
        pattern: String,
        /// Regex compiler message.
        message: String,
    },
    /// A required numeric header field holds something else.
    #[error("Field `{field}` at {cell} is not numeric (found {found:?})")]
    NonNumericField {
        /// Header field name.
        field: &'static str,
        /// A1 reference of the cell.
        cell: String,
        /// Text found in the cell.
        found: String,
    },
    /// Carton table is empty below the start row.
    #[error("No carton rows found starting at row {row_start}")]
    NoCartons {
        /// 1-based start row that was scanned.
        row_start: u32,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
