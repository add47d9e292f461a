//! `cartonkit_packing` v1:
//! Vendor packing-list extraction kernel.
//!
//! Module layout:
//! - `conf`   : constants and default presets
//! - `spec`   : cell model, layouts, records, errors
//! - `util`   : pure helper functions
//! - `reader` : calamine workbook reader and one-call parse
//! - `header` : header block parser with fallback resolution
//! - `carton` : carton table scanner
//! - `ratio`  : size ratio formatter
pub mod carton;
pub mod conf;
pub mod header;
pub mod ratio;
pub mod reader;
pub mod spec;
pub mod util;

pub use carton::parse_carton_table;
pub use conf::{
    C_LABEL_PALLETS, C_PATTERN_PALLETS, C_PATTERN_PO_BOX, N_COLS_CARTON_INSPECTED,
    N_ROW_CARTON_START, TUP_SIZE_LABELS,
};
pub use header::{parse_packing_header, resolve_pallet_count, resolve_po_box};
pub use ratio::{derive_size_pairs, derive_size_ratio};
pub use reader::{convert_calamine_data, parse_packing_list, read_packing_sheet};
pub use spec::{
    EnumCellValue, EnumSizeRatio, EnumSizeRatioMode, PackingListError, SpecCarton,
    SpecCartonTableOptions, SpecHeaderLayout, SpecPackingList, SpecPackingListHeader,
    SpecSheetGrid,
};
pub use util::{format_number, parse_cell_ref, parse_col_letters};
