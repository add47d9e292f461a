#![allow(dead_code)]

use std::path::{Path, PathBuf};

use calamine::{Reader, Xlsx, open_workbook};
use cartonkit_label::{
    EnumLabelTemplate, SpecBatchRequest, SpecLabelConfig, SpecLabelOptions,
};
use rust_xlsxwriter::Workbook;

/// One carton row of a packing-list fixture.
pub struct FixtureCarton {
    pub carton_number: f64,
    pub vendor_style: &'static str,
    pub description: &'static str,
    /// Quantities for XS, S, M, L, XL, 2XL, 3XL, 4XL; zero cells stay blank.
    pub sizes: [f64; 8],
}

pub fn create_cartons_two() -> Vec<FixtureCarton> {
    vec![
        FixtureCarton {
            carton_number: 1.0,
            vendor_style: "ST-100",
            description: "Crew Tee",
            sizes: [0.0, 3.0, 5.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        },
        FixtureCarton {
            carton_number: 2.0,
            vendor_style: "ST-100",
            description: "Crew Tee",
            sizes: [0.0, 0.0, 4.0, 4.0, 0.0, 0.0, 0.0, 0.0],
        },
    ]
}

/// Write a packing list in the default vendor layout.
pub fn write_packing_list(path_file: &Path, cartons: &[FixtureCarton]) {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Packing List").unwrap();

    for (n_row, line) in (4u32..).zip(["Store 42", "100 Harbor Rd", "Oakland CA", "USA"]) {
        worksheet.write_string(n_row, 1, line).unwrap();
    }
    for (n_row, line) in (4u32..).zip(["ACME Apparel", "Dock 3", "Portland OR"]) {
        worksheet.write_string(n_row, 11, line).unwrap();
    }
    worksheet.write_string(9, 7, "INV-2024-7").unwrap();
    worksheet.write_string(9, 1, "PO#: 12345 ").unwrap();
    worksheet.write_string(11, 1, "# of Pallets: 3").unwrap();
    worksheet.write_number(13, 2, 4.44).unwrap();
    worksheet.write_number(13, 8, 36.04).unwrap();

    let mut n_units_total = 0.0;
    for (n_row, carton) in (16u32..).zip(cartons) {
        worksheet.write_number(n_row, 1, carton.carton_number).unwrap();
        worksheet.write_number(n_row, 2, 20.0).unwrap();
        worksheet.write_number(n_row, 4, 16.0).unwrap();
        worksheet.write_number(n_row, 6, 12.0).unwrap();
        worksheet.write_number(n_row, 7, 18.5).unwrap();
        worksheet.write_string(n_row, 8, carton.vendor_style).unwrap();
        worksheet.write_string(n_row, 9, carton.description).unwrap();
        for (n_col, qty) in (10u16..).zip(carton.sizes) {
            if qty != 0.0 {
                worksheet.write_number(n_row, n_col, qty).unwrap();
            }
        }
        let n_units: f64 = carton.sizes.iter().sum();
        worksheet.write_number(n_row, 18, n_units).unwrap();
        n_units_total += n_units;
    }
    worksheet.write_number(13, 18, n_units_total).unwrap();
    workbook.save(path_file).unwrap();
}

/// Write all three single-sheet label templates into `dir_templates`.
pub fn write_templates(dir_templates: &Path) {
    for template in EnumLabelTemplate::ALL {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name("Label").unwrap();
        worksheet.write_string(0, 0, "SHIP FROM:").unwrap();
        worksheet
            .write_string(0, 3, template.identifier())
            .unwrap();
        workbook
            .save(dir_templates.join(template.layout().file_name))
            .unwrap();
    }
}

/// Workspace with `in/`, `out/`, and `templates/` directories.
pub struct FixtureDirs {
    pub tmp: tempfile::TempDir,
    pub path_dir_in: PathBuf,
    pub path_dir_out: PathBuf,
    pub path_dir_templates: PathBuf,
}

pub fn create_fixture_dirs() -> FixtureDirs {
    let tmp = tempfile::tempdir().unwrap();
    let path_dir_in = tmp.path().join("in");
    let path_dir_out = tmp.path().join("out");
    let path_dir_templates = tmp.path().join("templates");
    for path_dir in [&path_dir_in, &path_dir_out, &path_dir_templates] {
        std::fs::create_dir_all(path_dir).unwrap();
    }
    write_templates(&path_dir_templates);
    FixtureDirs {
        tmp,
        path_dir_in,
        path_dir_out,
        path_dir_templates,
    }
}

pub fn create_request(
    dirs: &FixtureDirs,
    path_source: &Path,
    template: EnumLabelTemplate,
    options: SpecLabelOptions,
) -> SpecBatchRequest {
    SpecBatchRequest {
        path_source: Some(path_source.to_path_buf()),
        path_dir_destination: Some(dirs.path_dir_out.clone()),
        template,
        options,
        config: SpecLabelConfig {
            dir_templates: dirs.path_dir_templates.clone(),
            ..SpecLabelConfig::default()
        },
    }
}

/// Sheet names of an output workbook, read with calamine.
pub fn read_sheet_names(path_file: &Path) -> Vec<String> {
    let workbook: Xlsx<_> = open_workbook(path_file).unwrap();
    workbook.sheet_names()
}

/// Display value of one cell, read with umya-spreadsheet.
pub fn read_cell_text(path_file: &Path, name_sheet: &str, cell_ref: &str) -> String {
    let book = umya_spreadsheet::reader::xlsx::read(path_file).unwrap();
    book.get_sheet_by_name(name_sheet).unwrap().get_value(cell_ref)
}
