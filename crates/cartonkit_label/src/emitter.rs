//! Label document emission (umya-spreadsheet).

use cartonkit_packing::{EnumCellValue, SpecPackingList, derive_size_ratio, parse_cell_ref};
use tracing::debug;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::conf::C_SHEET_NAME_PREFIX;
use crate::layout::{EnumFieldValue, SpecLabelContext, SpecTemplateLayout, derive_field_value};
use crate::spec::{EmitError, SpecLabelOptions, SpecStyleKey};
use crate::style::resolve_style;

/// Sheet name of the carton at 1-based `n_position`.
pub fn derive_sheet_name(n_position: usize) -> String {
    format!("{C_SHEET_NAME_PREFIX} {n_position}")
}

fn write_cell_value(worksheet: &mut Worksheet, n_col: u32, n_row: u32, value: &EnumCellValue) {
    let cell = worksheet.get_cell_mut((n_col, n_row));
    match value {
        EnumCellValue::Number(n) => {
            cell.set_value_number(*n);
        }
        EnumCellValue::String(s) => {
            cell.set_value_string(s.as_str());
        }
        EnumCellValue::None => {
            cell.set_value_string("");
        }
    }
}

fn write_field_value(
    worksheet: &mut Worksheet,
    cell_ref: &str,
    value: &EnumFieldValue,
) -> Result<(), EmitError> {
    let (n_row, n_col) =
        parse_cell_ref(cell_ref).map_err(|_| EmitError::InvalidTargetCell(cell_ref.to_string()))?;
    // umya addresses cells as 1-based (col, row).
    let (n_row, n_col) = (n_row + 1, n_col + 1);
    match value {
        EnumFieldValue::Single(value) => write_cell_value(worksheet, n_col, n_row, value),
        EnumFieldValue::Row(values) => {
            for (n_offset, value) in (0u32..).zip(values.iter()) {
                write_cell_value(worksheet, n_col + n_offset, n_row, value);
            }
        }
    }
    Ok(())
}

/// Produce one label workbook for `packing`.
///
/// The active sheet of `template_book` is cloned once per carton, named
/// `"Carton {i}"`, and filled according to `layout`. The template sheet is
/// removed afterwards; other sheets of the template workbook are kept.
/// `file_name` is the packing-list file name used for style lookups.
pub fn emit_label_document(
    template_book: &Spreadsheet,
    layout: &SpecTemplateLayout,
    packing: &SpecPackingList,
    size_labels: &[String],
    options: &SpecLabelOptions,
    file_name: &str,
) -> Result<Spreadsheet, EmitError> {
    if template_book.get_sheet_count() == 0 {
        return Err(EmitError::TemplateWithoutSheet);
    }
    let mut book = template_book.clone();
    let template_sheet = book.get_active_sheet().clone();
    let name_template = template_sheet.get_name().to_string();

    let n_total = packing.cartons.len();
    for (n_idx, carton) in packing.cartons.iter().enumerate() {
        let n_position = n_idx + 1;
        let ratio = derive_size_ratio(carton, size_labels, layout.rule_ratio);
        let style = resolve_style(&SpecStyleKey::from_carton(file_name, carton), options);
        let ctx = SpecLabelContext {
            header: &packing.header,
            carton,
            n_position,
            n_total,
            ratio: &ratio,
            size_labels,
            style: &style,
            options,
        };

        let name_sheet = derive_sheet_name(n_position);
        let mut worksheet = template_sheet.clone();
        worksheet.set_name(name_sheet.as_str());
        let worksheet = book
            .add_sheet(worksheet)
            .map_err(|message| EmitError::SheetName {
                name: name_sheet.clone(),
                message: message.to_string(),
            })?;
        for mapping in layout.mappings {
            let value = derive_field_value(mapping.field, &ctx);
            write_field_value(worksheet, mapping.cell, &value)?;
        }
        debug!(
            sheet = %name_sheet,
            row_source = carton.row_source,
            ratio = ratio.ratio_text(),
            "emitted carton label"
        );
    }

    book.remove_sheet_by_name(&name_template)
        .map_err(|message| EmitError::RemoveTemplate {
            name: name_template.clone(),
            message: message.to_string(),
        })?;
    book.set_active_sheet(0);
    Ok(book)
}

#[cfg(test)]
mod tests {
    use cartonkit_packing::{EnumCellValue, SpecCarton, SpecPackingList, SpecPackingListHeader};
    use pretty_assertions::assert_eq;
    use umya_spreadsheet::Spreadsheet;

    use super::emit_label_document;
    use crate::spec::{EmitError, EnumLabelTemplate, SpecLabelOptions};

    fn create_packing_list(n_cartons: usize) -> SpecPackingList {
        let header = SpecPackingListHeader {
            ship_to: vec!["Store 42".into()],
            shipper: vec!["ACME".into(), "Dock 3".into(), "Portland".into()],
            invoice_number: "INV-7".into(),
            total_units: 16.0.into(),
            total_weight: 36.0,
            cubic_feet: 4.4,
            po_box: "12345".to_string(),
            pallet_count: Some("2".to_string()),
        };
        let cartons = (1..=n_cartons)
            .map(|n| SpecCarton {
                row_source: 16 + n as u32,
                carton_number: (n as f64).into(),
                dimensions: [20.0.into(), 16.0.into(), 12.0.into()],
                weight: 18.0.into(),
                vendor_style: "ST-1".into(),
                description: "Crew Tee".into(),
                size_quantities: vec![
                    EnumCellValue::None,
                    3.0.into(),
                    5.0.into(),
                    EnumCellValue::None,
                ],
                total_units: 8.0.into(),
            })
            .collect();
        SpecPackingList { header, cartons }
    }

    fn create_template_book() -> Spreadsheet {
        let mut book = umya_spreadsheet::new_file();
        book.get_sheet_mut(&0)
            .unwrap()
            .get_cell_mut("A1")
            .set_value_string("SHIP FROM:");
        book
    }

    fn labels() -> Vec<String> {
        ["XS", "S", "M", "L"].iter().map(ToString::to_string).collect()
    }

    #[test]
    fn emits_one_sheet_per_carton_and_drops_template() {
        let book = emit_label_document(
            &create_template_book(),
            EnumLabelTemplate::Standard.layout(),
            &create_packing_list(3),
            &labels(),
            &SpecLabelOptions::default(),
            "pl.xlsx",
        )
        .unwrap();

        let l_names = book
            .get_sheet_collection()
            .iter()
            .map(|ws| ws.get_name().to_string())
            .collect::<Vec<_>>();
        assert_eq!(l_names, vec!["Carton 1", "Carton 2", "Carton 3"]);

        let worksheet = book.get_sheet_by_name("Carton 2").unwrap();
        assert_eq!(worksheet.get_value("A1"), "SHIP FROM:");
        assert_eq!(worksheet.get_value("H14"), "2 of 3");
        assert_eq!(worksheet.get_value("E11"), "S/M");
        assert_eq!(worksheet.get_value("E12"), "3/5");
        assert_eq!(worksheet.get_value("C5"), "Dock 3, Portland");
        assert_eq!(worksheet.get_value("C14"), "No");
    }

    #[test]
    fn size_grid_writes_adjacent_rows() {
        let book = emit_label_document(
            &create_template_book(),
            EnumLabelTemplate::SizeGrid.layout(),
            &create_packing_list(1),
            &labels(),
            &SpecLabelOptions {
                color: "Navy".to_string(),
                ..SpecLabelOptions::default()
            },
            "pl.xlsx",
        )
        .unwrap();

        let worksheet = book.get_sheet_by_name("Carton 1").unwrap();
        assert_eq!(worksheet.get_value("C12"), "XS");
        assert_eq!(worksheet.get_value("F12"), "L");
        assert_eq!(worksheet.get_value("D13"), "3");
        assert_eq!(worksheet.get_value("E13"), "5");
        assert_eq!(worksheet.get_value("C9"), "2");
        assert_eq!(worksheet.get_value("F4"), "20x16x12");
        assert_eq!(worksheet.get_value("F8"), "Navy");
    }

    #[test]
    fn template_without_sheet_is_rejected() {
        let book = umya_spreadsheet::new_file_empty_worksheet();
        let err = emit_label_document(
            &book,
            EnumLabelTemplate::Destination.layout(),
            &create_packing_list(1),
            &labels(),
            &SpecLabelOptions::default(),
            "pl.xlsx",
        )
        .unwrap_err();
        assert!(matches!(err, EmitError::TemplateWithoutSheet));
    }
}
