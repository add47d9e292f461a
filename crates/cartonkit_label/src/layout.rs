//! Declarative per-template field mappings and field value derivation.

use cartonkit_packing::{
    EnumCellValue, EnumSizeRatio, EnumSizeRatioMode, SpecCarton, SpecPackingListHeader,
};

use crate::conf::{
    C_FLAG_NO, C_FLAG_YES, C_SEP_DESCRIPTION_STYLE, C_SEP_DIMENSIONS, C_SEP_JOINED_LINES,
};
use crate::spec::{EnumLabelTemplate, SpecLabelOptions, SpecResolvedStyle};

////////////////////////////////////////////////////////////////////////////////
// #region Fields

/// Value written into one label target cell (or row of cells).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumLabelField {
    /// Shipper address line, 0-based.
    ShipperLine(usize),
    /// Shipper lines 2 and 3 joined with `", "`.
    ShipperTail,
    /// Ship-to address line, 0-based.
    ShipToLine(usize),
    /// Invoice number.
    InvoiceNumber,
    /// PO box identifier.
    PoBox,
    /// Pallet count; empty when absent.
    PalletCount,
    /// Shipment total weight.
    TotalWeight,
    /// Shipment cubic feet.
    CubicFeet,
    /// Carton number.
    CartonNumber,
    /// `LxWxH`.
    Dimensions,
    /// Carton weight.
    CartonWeight,
    /// Vendor style code.
    VendorStyle,
    /// Style description.
    Description,
    /// `"<description> # <vendor style>"`.
    DescriptionWithStyle,
    /// Units in the carton.
    TotalUnits,
    /// Ratio text of the layout's ratio mode.
    SizeRatio,
    /// Quantity text of the split ratio.
    SizeQuantities,
    /// Every size label, one per cell to the right.
    SizeLabelRow,
    /// Every raw size quantity, one per cell to the right.
    SizeQuantityRow,
    /// Store-ready flag as `Yes`/`No`.
    StoreReady,
    /// Pre-ticketed flag as `Yes`/`No`.
    PreTicketed,
    /// Resolved color.
    Color,
    /// Resolved style label.
    StyleLabel,
    /// `"i of N"`.
    SequenceLabel,
    /// N, the carton count of the file.
    CartonCount,
}

/// One field bound to its A1 target cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecFieldMapping {
    /// Emitted field.
    pub field: EnumLabelField,
    /// A1 target cell; row fields start here and extend right.
    pub cell: &'static str,
}

/// Fixed layout of one label template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecTemplateLayout {
    /// Template this layout belongs to.
    pub template: EnumLabelTemplate,
    /// Template workbook file name inside the template directory.
    pub file_name: &'static str,
    /// Ratio mode used for `SizeRatio`.
    pub rule_ratio: EnumSizeRatioMode,
    /// Field to cell bindings, written in order.
    pub mappings: &'static [SpecFieldMapping],
}

impl SpecTemplateLayout {
    /// `true` when any mapping consumes the resolved style.
    pub fn if_uses_style(&self) -> bool {
        self.mappings
            .iter()
            .any(|m| matches!(m.field, EnumLabelField::Color | EnumLabelField::StyleLabel))
    }
}

const fn map(field: EnumLabelField, cell: &'static str) -> SpecFieldMapping {
    SpecFieldMapping { field, cell }
}

const L_MAPPINGS_STANDARD: &[SpecFieldMapping] = &[
    map(EnumLabelField::ShipperLine(0), "C4"),
    map(EnumLabelField::ShipperTail, "C5"),
    map(EnumLabelField::PoBox, "C7"),
    map(EnumLabelField::SizeRatio, "E11"),
    map(EnumLabelField::SizeQuantities, "E12"),
    map(EnumLabelField::DescriptionWithStyle, "B11"),
    map(EnumLabelField::TotalUnits, "I11"),
    map(EnumLabelField::StoreReady, "C14"),
    map(EnumLabelField::PreTicketed, "C15"),
    map(EnumLabelField::SequenceLabel, "H14"),
];

const L_MAPPINGS_DESTINATION: &[SpecFieldMapping] = &[
    map(EnumLabelField::ShipperLine(0), "D3"),
    map(EnumLabelField::ShipperLine(1), "D4"),
    map(EnumLabelField::ShipperLine(2), "D5"),
    map(EnumLabelField::ShipToLine(0), "D7"),
    map(EnumLabelField::ShipToLine(1), "D8"),
    map(EnumLabelField::ShipToLine(2), "D9"),
    map(EnumLabelField::ShipToLine(3), "D10"),
    map(EnumLabelField::PoBox, "D11"),
    map(EnumLabelField::Color, "E12"),
    map(EnumLabelField::VendorStyle, "E13"),
    map(EnumLabelField::Description, "E14"),
    map(EnumLabelField::SizeRatio, "E15"),
    map(EnumLabelField::SequenceLabel, "E16"),
    map(EnumLabelField::CartonWeight, "E17"),
    map(EnumLabelField::CartonCount, "E18"),
];

const L_MAPPINGS_SIZE_GRID: &[SpecFieldMapping] = &[
    map(EnumLabelField::ShipperLine(0), "C3"),
    map(EnumLabelField::ShipperLine(1), "C4"),
    map(EnumLabelField::ShipperLine(2), "C5"),
    map(EnumLabelField::InvoiceNumber, "C7"),
    map(EnumLabelField::PoBox, "C8"),
    map(EnumLabelField::PalletCount, "C9"),
    map(EnumLabelField::CartonNumber, "F3"),
    map(EnumLabelField::Dimensions, "F4"),
    map(EnumLabelField::CartonWeight, "F5"),
    map(EnumLabelField::StyleLabel, "F7"),
    map(EnumLabelField::Color, "F8"),
    map(EnumLabelField::TotalWeight, "F10"),
    map(EnumLabelField::CubicFeet, "F11"),
    map(EnumLabelField::SizeLabelRow, "C12"),
    map(EnumLabelField::SizeQuantityRow, "C13"),
    map(EnumLabelField::TotalUnits, "K13"),
    map(EnumLabelField::SequenceLabel, "H3"),
];

static LAYOUT_STANDARD: SpecTemplateLayout = SpecTemplateLayout {
    template: EnumLabelTemplate::Standard,
    file_name: "template1.xlsx",
    rule_ratio: EnumSizeRatioMode::Split,
    mappings: L_MAPPINGS_STANDARD,
};

static LAYOUT_DESTINATION: SpecTemplateLayout = SpecTemplateLayout {
    template: EnumLabelTemplate::Destination,
    file_name: "template2.xlsx",
    rule_ratio: EnumSizeRatioMode::Combined,
    mappings: L_MAPPINGS_DESTINATION,
};

static LAYOUT_SIZE_GRID: SpecTemplateLayout = SpecTemplateLayout {
    template: EnumLabelTemplate::SizeGrid,
    file_name: "template3.xlsx",
    rule_ratio: EnumSizeRatioMode::Split,
    mappings: L_MAPPINGS_SIZE_GRID,
};

impl EnumLabelTemplate {
    /// Fixed layout of this template.
    pub fn layout(self) -> &'static SpecTemplateLayout {
        match self {
            Self::Standard => &LAYOUT_STANDARD,
            Self::Destination => &LAYOUT_DESTINATION,
            Self::SizeGrid => &LAYOUT_SIZE_GRID,
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Values

/// Everything one carton sheet can draw values from.
#[derive(Debug, Clone, Copy)]
pub struct SpecLabelContext<'a> {
    /// Shared packing-list header.
    pub header: &'a SpecPackingListHeader,
    /// Carton being emitted.
    pub carton: &'a SpecCarton,
    /// 1-based carton position.
    pub n_position: usize,
    /// Carton count of the file.
    pub n_total: usize,
    /// Rendered size ratio in the layout's mode.
    pub ratio: &'a EnumSizeRatio,
    /// Size labels, parallel to `carton.size_quantities`.
    pub size_labels: &'a [String],
    /// Resolved color and style label.
    pub style: &'a SpecResolvedStyle,
    /// Batch options.
    pub options: &'a SpecLabelOptions,
}

/// Derived value of one field.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumFieldValue {
    /// One target cell.
    Single(EnumCellValue),
    /// Adjacent cells, left to right.
    Row(Vec<EnumCellValue>),
}

fn derive_line(lines: &[EnumCellValue], n_idx: usize) -> EnumCellValue {
    lines.get(n_idx).cloned().unwrap_or_default()
}

fn derive_flag(if_enabled: bool) -> EnumCellValue {
    EnumCellValue::from(if if_enabled { C_FLAG_YES } else { C_FLAG_NO })
}

fn derive_text(value: impl Into<String>) -> EnumCellValue {
    EnumCellValue::String(value.into())
}

/// Value of `field` for the carton described by `ctx`.
pub fn derive_field_value(field: EnumLabelField, ctx: &SpecLabelContext<'_>) -> EnumFieldValue {
    let header = ctx.header;
    let carton = ctx.carton;
    let value = match field {
        EnumLabelField::ShipperLine(n_idx) => derive_line(&header.shipper, n_idx),
        EnumLabelField::ShipperTail => derive_text(format!(
            "{}{C_SEP_JOINED_LINES}{}",
            derive_line(&header.shipper, 1).to_text(),
            derive_line(&header.shipper, 2).to_text()
        )),
        EnumLabelField::ShipToLine(n_idx) => derive_line(&header.ship_to, n_idx),
        EnumLabelField::InvoiceNumber => header.invoice_number.clone(),
        EnumLabelField::PoBox => derive_text(header.po_box.as_str()),
        EnumLabelField::PalletCount => header
            .pallet_count
            .as_deref()
            .map(derive_text)
            .unwrap_or_default(),
        EnumLabelField::TotalWeight => EnumCellValue::Number(header.total_weight),
        EnumLabelField::CubicFeet => EnumCellValue::Number(header.cubic_feet),
        EnumLabelField::CartonNumber => carton.carton_number.clone(),
        EnumLabelField::Dimensions => derive_text(
            carton
                .dimensions
                .iter()
                .map(EnumCellValue::to_text)
                .collect::<Vec<_>>()
                .join(C_SEP_DIMENSIONS),
        ),
        EnumLabelField::CartonWeight => carton.weight.clone(),
        EnumLabelField::VendorStyle => carton.vendor_style.clone(),
        EnumLabelField::Description => carton.description.clone(),
        EnumLabelField::DescriptionWithStyle => derive_text(format!(
            "{}{C_SEP_DESCRIPTION_STYLE}{}",
            carton.description.to_text(),
            carton.vendor_style.to_text()
        )),
        EnumLabelField::TotalUnits => carton.total_units.clone(),
        EnumLabelField::SizeRatio => derive_text(ctx.ratio.ratio_text()),
        EnumLabelField::SizeQuantities => derive_text(ctx.ratio.quantities_text()),
        EnumLabelField::SizeLabelRow => {
            return EnumFieldValue::Row(
                ctx.size_labels
                    .iter()
                    .map(|label| derive_text(label.as_str()))
                    .collect(),
            );
        }
        EnumLabelField::SizeQuantityRow => {
            return EnumFieldValue::Row(carton.size_quantities.clone());
        }
        EnumLabelField::StoreReady => derive_flag(ctx.options.if_store_ready),
        EnumLabelField::PreTicketed => derive_flag(ctx.options.if_pre_ticketed),
        EnumLabelField::Color => derive_text(ctx.style.color.as_str()),
        EnumLabelField::StyleLabel => derive_text(ctx.style.style_label.as_str()),
        EnumLabelField::SequenceLabel => {
            derive_text(format_sequence_label(ctx.n_position, ctx.n_total))
        }
        EnumLabelField::CartonCount => EnumCellValue::Number(ctx.n_total as f64),
    };
    EnumFieldValue::Single(value)
}

/// Sequence label text, `"i of N"`.
pub fn format_sequence_label(n_position: usize, n_total: usize) -> String {
    format!("{n_position} of {n_total}")
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
