//! Carton table scanning.

use std::collections::BTreeSet;

use tracing::debug;

use crate::spec::{
    EnumCellValue, PackingListError, SpecCarton, SpecCartonTableOptions, SpecSheetGrid,
};
use crate::util::parse_col_letters;

/// Resolved 0-based column indices for one table scan.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SpecCartonColumnPlan {
    row_start: u32,
    cols_inspected: Vec<u32>,
    col_carton_number: u32,
    cols_dimension: [u32; 3],
    col_weight: u32,
    col_vendor_style: u32,
    col_description: u32,
    cols_size: Vec<u32>,
    col_total_units: u32,
}

impl SpecCartonColumnPlan {
    fn from_options(options: &SpecCartonTableOptions) -> Result<Self, PackingListError> {
        if options.row_start == 0 {
            return Err(PackingListError::InvalidCellReference(format!(
                "row_start={}",
                options.row_start
            )));
        }

        let set_cols_excluded = options
            .cols_excluded
            .iter()
            .map(|col| parse_col_letters(col))
            .collect::<Result<BTreeSet<_>, _>>()?;
        let n_cols_inspected = u32::try_from(options.n_cols_inspected).map_err(|_| {
            PackingListError::InvalidCellReference(format!(
                "n_cols_inspected={}",
                options.n_cols_inspected
            ))
        })?;
        let cols_inspected = (0..n_cols_inspected)
            .filter(|col| !set_cols_excluded.contains(col))
            .collect::<Vec<_>>();

        let col_description = parse_col_letters(&options.col_description)?;
        let cols_size = (0..options.size_labels.len())
            .map(|n_offset| {
                u32::try_from(n_offset)
                    .ok()
                    .and_then(|v| col_description.checked_add(v + 1))
                    .ok_or_else(|| {
                        PackingListError::InvalidCellReference(options.col_description.clone())
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            row_start: options.row_start - 1,
            cols_inspected,
            col_carton_number: parse_col_letters(&options.col_carton_number)?,
            cols_dimension: [
                parse_col_letters(&options.cols_dimension[0])?,
                parse_col_letters(&options.cols_dimension[1])?,
                parse_col_letters(&options.cols_dimension[2])?,
            ],
            col_weight: parse_col_letters(&options.col_weight)?,
            col_vendor_style: parse_col_letters(&options.col_vendor_style)?,
            col_description,
            cols_size,
            col_total_units: parse_col_letters(&options.col_total_units)?,
        })
    }
}

/// `true` when every inspected cell of `row` is blank.
///
/// An empty inspection span never stops the scan on its own; the grid bound
/// check in [`parse_carton_table`] still does.
fn is_row_empty(grid: &SpecSheetGrid, row: u32, cols_inspected: &[u32]) -> bool {
    !cols_inspected.is_empty() && cols_inspected.iter().all(|col| grid.cell(row, *col).is_blank())
}

fn derive_carton(grid: &SpecSheetGrid, row: u32, plan: &SpecCartonColumnPlan) -> SpecCarton {
    let read = |col: u32| -> EnumCellValue { grid.cell(row, col).clone() };
    SpecCarton {
        row_source: row + 1,
        carton_number: read(plan.col_carton_number),
        dimensions: [
            read(plan.cols_dimension[0]),
            read(plan.cols_dimension[1]),
            read(plan.cols_dimension[2]),
        ],
        weight: read(plan.col_weight),
        vendor_style: read(plan.col_vendor_style),
        description: read(plan.col_description),
        size_quantities: plan.cols_size.iter().map(|col| read(*col)).collect(),
        total_units: read(plan.col_total_units),
    }
}

/// Scan carton rows from `options.row_start` downwards.
///
/// The scan stops at the first row whose inspected columns (the leading
/// `n_cols_inspected` columns minus `cols_excluded`) are all blank. Anything
/// below that row is ignored. Returned cartons keep source row order.
pub fn parse_carton_table(
    grid: &SpecSheetGrid,
    options: &SpecCartonTableOptions,
) -> Result<Vec<SpecCarton>, PackingListError> {
    let plan = SpecCartonColumnPlan::from_options(options)?;
    let n_row_last = grid.row_max().unwrap_or(0);

    let mut l_cartons = Vec::new();
    let mut n_row = plan.row_start;
    while n_row <= n_row_last && !is_row_empty(grid, n_row, &plan.cols_inspected) {
        l_cartons.push(derive_carton(grid, n_row, &plan));
        n_row += 1;
    }

    debug!(
        sheet = %grid.sheet_name,
        n_cartons = l_cartons.len(),
        row_stop = n_row + 1,
        "scanned carton table"
    );
    Ok(l_cartons)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::parse_carton_table;
    use crate::spec::{EnumCellValue, SpecCartonTableOptions, SpecSheetGrid};

    /// Write one populated carton row (0-based `row`) in the default layout.
    fn put_carton_row(grid: &mut SpecSheetGrid, row: u32, carton_no: f64, style: &str) {
        grid.set_cell(row, 0, EnumCellValue::from("CTN"));
        grid.set_cell(row, 1, carton_no.into());
        grid.set_cell(row, 2, 20.0.into());
        grid.set_cell(row, 4, 16.0.into());
        grid.set_cell(row, 6, 12.0.into());
        grid.set_cell(row, 7, 18.5.into());
        grid.set_cell(row, 8, style.into());
        grid.set_cell(row, 9, "Crew Tee".into());
        grid.set_cell(row, 11, 3.0.into());
        grid.set_cell(row, 12, 5.0.into());
        grid.set_cell(row, 18, 8.0.into());
    }

    #[test]
    fn table_stops_at_first_empty_row() {
        let mut grid = SpecSheetGrid::new("PL");
        for n_idx in 0..5 {
            put_carton_row(&mut grid, 16 + n_idx, f64::from(n_idx + 1), "ST-1");
        }
        // Row 22 left empty; later rows carry totals that must be ignored.
        put_carton_row(&mut grid, 22, 99.0, "TOTAL");
        grid.set_cell(23, 9, "Grand total".into());

        let l_cartons = parse_carton_table(&grid, &SpecCartonTableOptions::default()).unwrap();
        assert_eq!(l_cartons.len(), 5);
        let l_numbers = l_cartons
            .iter()
            .map(|c| c.carton_number.to_text())
            .collect::<Vec<_>>();
        assert_eq!(l_numbers, vec!["1", "2", "3", "4", "5"]);
        assert_eq!(l_cartons[0].row_source, 17);
        assert_eq!(l_cartons[4].row_source, 21);
    }

    #[test]
    fn carton_fields_map_to_fixed_columns() {
        let mut grid = SpecSheetGrid::new("PL");
        put_carton_row(&mut grid, 16, 7.0, "ST-9");

        let l_cartons = parse_carton_table(&grid, &SpecCartonTableOptions::default()).unwrap();
        let carton = &l_cartons[0];
        assert_eq!(carton.dimensions[0], EnumCellValue::Number(20.0));
        assert_eq!(carton.dimensions[1], EnumCellValue::Number(16.0));
        assert_eq!(carton.dimensions[2], EnumCellValue::Number(12.0));
        assert_eq!(carton.weight, EnumCellValue::Number(18.5));
        assert_eq!(carton.vendor_style, EnumCellValue::from("ST-9"));
        assert_eq!(carton.description, EnumCellValue::from("Crew Tee"));
        assert_eq!(carton.size_quantities.len(), 8);
        assert_eq!(carton.size_quantities[0], EnumCellValue::None);
        assert_eq!(carton.size_quantities[1], EnumCellValue::Number(3.0));
        assert_eq!(carton.size_quantities[2], EnumCellValue::Number(5.0));
        assert_eq!(carton.total_units, EnumCellValue::Number(8.0));
    }

    #[test]
    fn excluded_filler_column_does_not_keep_table_open() {
        let mut grid = SpecSheetGrid::new("PL");
        put_carton_row(&mut grid, 16, 1.0, "ST-1");
        put_carton_row(&mut grid, 17, 2.0, "ST-1");
        // Filler in column A only.
        grid.set_cell(18, 0, "-".into());
        put_carton_row(&mut grid, 19, 3.0, "ST-1");

        let l_cartons = parse_carton_table(&grid, &SpecCartonTableOptions::default()).unwrap();
        assert_eq!(l_cartons.len(), 4);

        let options = SpecCartonTableOptions {
            cols_excluded: vec!["A".to_string()],
            ..SpecCartonTableOptions::default()
        };
        let l_cartons = parse_carton_table(&grid, &options).unwrap();
        assert_eq!(l_cartons.len(), 2);
    }

    #[test]
    fn empty_table_and_empty_grid_yield_no_cartons() {
        let grid = SpecSheetGrid::new("PL");
        let l_cartons = parse_carton_table(&grid, &SpecCartonTableOptions::default()).unwrap();
        assert!(l_cartons.is_empty());
    }

    #[test]
    fn size_vector_length_follows_label_set() {
        let mut grid = SpecSheetGrid::new("PL");
        put_carton_row(&mut grid, 16, 1.0, "ST-1");
        let options = SpecCartonTableOptions {
            size_labels: vec!["S".to_string(), "M".to_string(), "L".to_string()],
            ..SpecCartonTableOptions::default()
        };

        let l_cartons = parse_carton_table(&grid, &options).unwrap();
        assert_eq!(l_cartons[0].size_quantities.len(), 3);
        assert_eq!(l_cartons[0].size_quantities[1], EnumCellValue::Number(3.0));
    }

    #[test]
    fn invalid_column_letters_are_rejected() {
        let grid = SpecSheetGrid::new("PL");
        let options = SpecCartonTableOptions {
            cols_excluded: vec!["1".to_string()],
            ..SpecCartonTableOptions::default()
        };
        assert!(parse_carton_table(&grid, &options).is_err());
    }
}
