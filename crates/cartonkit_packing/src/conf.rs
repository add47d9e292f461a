//! Packing-list constants and default preset factories.

use crate::spec::{SpecCartonTableOptions, SpecHeaderLayout};

/// First carton row (1-based) in the vendor packing list.
pub const N_ROW_CARTON_START: u32 = 17;
/// Number of leading columns inspected for the "row is empty" stop rule.
pub const N_COLS_CARTON_INSPECTED: usize = 6;
/// Recognized size labels, small to large.
pub const TUP_SIZE_LABELS: [&str; 8] = ["XS", "S", "M", "L", "XL", "2XL", "3XL", "4XL"];

/// Extraction pattern for the PO number in free-text cells.
pub const C_PATTERN_PO_BOX: &str = r"PO#:\s*([\d\s]+)";
/// Literal label preceding the pallet count in free-text cells.
pub const C_LABEL_PALLETS: &str = "# of Pallets:";
/// Extraction pattern for the pallet count in free-text cells.
pub const C_PATTERN_PALLETS: &str = r"# of Pallets:\s*([\d\s]+)";

/// Build the default header cell layout.
pub fn derive_default_header_layout() -> SpecHeaderLayout {
    SpecHeaderLayout {
        cells_ship_to: vec![
            "B5".to_string(),
            "B6".to_string(),
            "B7".to_string(),
            "B8".to_string(),
        ],
        cells_shipper: vec!["L5".to_string(), "L6".to_string(), "L7".to_string()],
        cell_invoice_number: "H10".to_string(),
        cell_total_units: "S14".to_string(),
        cell_total_weight: "I14".to_string(),
        cell_cubic_feet: "C14".to_string(),
        cell_po_box: "C10".to_string(),
        cell_po_box_fallback: "B10".to_string(),
        cell_pallets: "C12".to_string(),
        cell_pallets_fallback: "B12".to_string(),
        pattern_po_box: C_PATTERN_PO_BOX.to_string(),
        pattern_pallets: C_PATTERN_PALLETS.to_string(),
        label_pallets: C_LABEL_PALLETS.to_string(),
    }
}

/// Build the default carton table options.
pub fn derive_default_carton_table_options() -> SpecCartonTableOptions {
    SpecCartonTableOptions {
        row_start: N_ROW_CARTON_START,
        n_cols_inspected: N_COLS_CARTON_INSPECTED,
        cols_excluded: Vec::new(),
        col_carton_number: "B".to_string(),
        cols_dimension: ["C".to_string(), "E".to_string(), "G".to_string()],
        col_weight: "H".to_string(),
        col_vendor_style: "I".to_string(),
        col_description: "J".to_string(),
        col_total_units: "S".to_string(),
        size_labels: TUP_SIZE_LABELS.iter().map(ToString::to_string).collect(),
    }
}
