//! Packing-list header extraction.
//!
//! Most header fields sit at fixed coordinates. PO box and pallet count are
//! resolved in two stages because vendors either fill a structured cell or
//! type the value into a free-text label cell next to it:
//! 1. structured primary cell, when non-empty;
//! 2. pattern capture from the fallback cell;
//! 3. raw fallback text.

use regex::Regex;
use tracing::debug;

use crate::spec::{
    EnumCellValue, PackingListError, SpecHeaderLayout, SpecPackingListHeader, SpecSheetGrid,
};
use crate::util::{compile_pattern, read_cell_a1, round_to_one_decimal};

/// Parse the header block of a packing-list sheet.
///
/// Fails with [`PackingListError::NonNumericField`] when total weight or cubic
/// feet is not a number.
pub fn parse_packing_header(
    grid: &SpecSheetGrid,
    layout: &SpecHeaderLayout,
) -> Result<SpecPackingListHeader, PackingListError> {
    let re_po_box = compile_pattern(&layout.pattern_po_box)?;
    let re_pallets = compile_pattern(&layout.pattern_pallets)?;

    let l_ship_to = layout
        .cells_ship_to
        .iter()
        .map(|cell_ref| read_cell_a1(grid, cell_ref).cloned())
        .collect::<Result<Vec<_>, _>>()?;
    let l_shipper = layout
        .cells_shipper
        .iter()
        .map(|cell_ref| read_cell_a1(grid, cell_ref).cloned())
        .collect::<Result<Vec<_>, _>>()?;

    let total_weight = derive_rounded_field(grid, &layout.cell_total_weight, "total_weight")?;
    let cubic_feet = derive_rounded_field(grid, &layout.cell_cubic_feet, "cubic_feet")?;

    let po_box = resolve_po_box(
        read_cell_a1(grid, &layout.cell_po_box)?,
        read_cell_a1(grid, &layout.cell_po_box_fallback)?,
        &re_po_box,
    );
    let pallet_count = resolve_pallet_count(
        read_cell_a1(grid, &layout.cell_pallets)?,
        read_cell_a1(grid, &layout.cell_pallets_fallback)?,
        &re_pallets,
        &layout.label_pallets,
    );

    let header = SpecPackingListHeader {
        ship_to: l_ship_to,
        shipper: l_shipper,
        invoice_number: read_cell_a1(grid, &layout.cell_invoice_number)?.clone(),
        total_units: read_cell_a1(grid, &layout.cell_total_units)?.clone(),
        total_weight,
        cubic_feet,
        po_box,
        pallet_count,
    };
    debug!(sheet = %grid.sheet_name, ?header, "parsed packing-list header");
    Ok(header)
}

fn derive_rounded_field(
    grid: &SpecSheetGrid,
    cell_ref: &str,
    field: &'static str,
) -> Result<f64, PackingListError> {
    let value = read_cell_a1(grid, cell_ref)?;
    value
        .as_f64()
        .map(round_to_one_decimal)
        .ok_or_else(|| PackingListError::NonNumericField {
            field,
            cell: cell_ref.to_string(),
            found: value.to_text(),
        })
}

fn capture_trimmed(re: &Regex, txt: &str) -> Option<String> {
    re.captures(txt)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Resolve the PO box: primary cell, else pattern capture, else fallback text.
pub fn resolve_po_box(
    primary: &EnumCellValue,
    fallback: &EnumCellValue,
    re_po_box: &Regex,
) -> String {
    if !primary.is_blank() {
        return primary.to_text().trim().to_string();
    }
    let txt_fallback = fallback.to_text();
    capture_trimmed(re_po_box, &txt_fallback).unwrap_or_else(|| txt_fallback.trim().to_string())
}

/// Resolve the pallet count with the same stages as [`resolve_po_box`].
///
/// Empty results and the bare `label_pallets` text resolve to `None`.
pub fn resolve_pallet_count(
    primary: &EnumCellValue,
    fallback: &EnumCellValue,
    re_pallets: &Regex,
    label_pallets: &str,
) -> Option<String> {
    let txt_resolved = if !primary.is_blank() {
        primary.to_text().trim().to_string()
    } else {
        let txt_fallback = fallback.to_text();
        capture_trimmed(re_pallets, &txt_fallback)
            .unwrap_or_else(|| txt_fallback.trim().to_string())
    };

    if txt_resolved.is_empty() || txt_resolved == label_pallets.trim() {
        return None;
    }
    Some(txt_resolved)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{parse_packing_header, resolve_pallet_count, resolve_po_box};
    use crate::conf::{C_LABEL_PALLETS, C_PATTERN_PALLETS, C_PATTERN_PO_BOX};
    use crate::spec::{EnumCellValue, PackingListError, SpecHeaderLayout, SpecSheetGrid};
    use crate::util::{compile_pattern, parse_cell_ref};

    fn put(grid: &mut SpecSheetGrid, cell_ref: &str, value: EnumCellValue) {
        let (row, col) = parse_cell_ref(cell_ref).unwrap();
        grid.set_cell(row, col, value);
    }

    fn create_header_grid() -> SpecSheetGrid {
        let mut grid = SpecSheetGrid::new("Packing List");
        put(&mut grid, "B5", "Store 42".into());
        put(&mut grid, "B6", "100 Main St".into());
        put(&mut grid, "B7", "Springfield".into());
        put(&mut grid, "L5", "ACME Apparel".into());
        put(&mut grid, "L6", "1 Factory Rd".into());
        put(&mut grid, "L7", "Shenzhen".into());
        put(&mut grid, "H10", 90817.0.into());
        put(&mut grid, "S14", 240.0.into());
        put(&mut grid, "I14", 123.456.into());
        put(&mut grid, "C14", 45.04.into());
        put(&mut grid, "C10", 555123.0.into());
        put(&mut grid, "C12", "3".into());
        grid
    }

    #[test]
    fn header_reads_fixed_cells_and_rounds_numbers() {
        let grid = create_header_grid();
        let header = parse_packing_header(&grid, &SpecHeaderLayout::default()).unwrap();

        assert_eq!(header.ship_to.len(), 4);
        assert_eq!(header.ship_to[0], EnumCellValue::from("Store 42"));
        assert_eq!(header.ship_to[3], EnumCellValue::None);
        assert_eq!(header.shipper[2], EnumCellValue::from("Shenzhen"));
        assert_eq!(header.invoice_number, EnumCellValue::Number(90817.0));
        assert_eq!(header.total_weight, 123.5);
        assert_eq!(header.cubic_feet, 45.0);
        assert_eq!(header.po_box, "555123");
        assert_eq!(header.pallet_count.as_deref(), Some("3"));
    }

    #[test]
    fn header_fails_fast_on_non_numeric_weight() {
        let mut grid = create_header_grid();
        put(&mut grid, "I14", "n/a".into());

        let err = parse_packing_header(&grid, &SpecHeaderLayout::default()).unwrap_err();
        match err {
            PackingListError::NonNumericField { field, cell, found } => {
                assert_eq!(field, "total_weight");
                assert_eq!(cell, "I14");
                assert_eq!(found, "n/a");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn header_fails_fast_on_missing_cubic_feet() {
        let mut grid = create_header_grid();
        put(&mut grid, "C14", EnumCellValue::None);

        let err = parse_packing_header(&grid, &SpecHeaderLayout::default()).unwrap_err();
        assert!(matches!(
            err,
            PackingListError::NonNumericField {
                field: "cubic_feet",
                ..
            }
        ));
    }

    #[test]
    fn po_box_primary_wins_over_fallback() {
        let re = compile_pattern(C_PATTERN_PO_BOX).unwrap();
        let po_box = resolve_po_box(&" 777 ".into(), &"PO#: 12345".into(), &re);
        assert_eq!(po_box, "777");
    }

    #[test]
    fn po_box_fallback_extracts_number_after_label() {
        let re = compile_pattern(C_PATTERN_PO_BOX).unwrap();
        let po_box = resolve_po_box(&EnumCellValue::None, &"PO#: 12345 ".into(), &re);
        assert_eq!(po_box, "12345");
    }

    #[test]
    fn po_box_fallback_without_label_uses_trimmed_text() {
        let re = compile_pattern(C_PATTERN_PO_BOX).unwrap();
        let po_box = resolve_po_box(&EnumCellValue::None, &"  BOX 9A  ".into(), &re);
        assert_eq!(po_box, "BOX 9A");
    }

    #[test]
    fn pallet_fallback_bare_label_is_absent() {
        let re = compile_pattern(C_PATTERN_PALLETS).unwrap();
        let pallets = resolve_pallet_count(
            &EnumCellValue::None,
            &"# of Pallets:".into(),
            &re,
            C_LABEL_PALLETS,
        );
        assert_eq!(pallets, None);

        let pallets = resolve_pallet_count(
            &EnumCellValue::None,
            &"# of Pallets: ".into(),
            &re,
            C_LABEL_PALLETS,
        );
        assert_eq!(pallets, None);
    }

    #[test]
    fn pallet_fallback_extracts_count() {
        let re = compile_pattern(C_PATTERN_PALLETS).unwrap();
        let pallets = resolve_pallet_count(
            &EnumCellValue::None,
            &"# of Pallets: 4".into(),
            &re,
            C_LABEL_PALLETS,
        );
        assert_eq!(pallets.as_deref(), Some("4"));
    }

    #[test]
    fn pallet_primary_bare_label_is_absent() {
        let re = compile_pattern(C_PATTERN_PALLETS).unwrap();
        let pallets =
            resolve_pallet_count(&"# of Pallets:".into(), &EnumCellValue::None, &re, C_LABEL_PALLETS);
        assert_eq!(pallets, None);

        let pallets =
            resolve_pallet_count(&EnumCellValue::None, &EnumCellValue::None, &re, C_LABEL_PALLETS);
        assert_eq!(pallets, None);
    }
}
