//! Size ratio rendering.

use crate::spec::{EnumCellValue, EnumSizeRatio, EnumSizeRatioMode, SpecCarton};
use crate::util::format_number;

/// Quantity display text, or `None` when the slot is blank or zero.
fn derive_quantity_text(value: &EnumCellValue) -> Option<String> {
    match value {
        EnumCellValue::None => None,
        EnumCellValue::Number(n) => (*n != 0.0).then(|| format_number(*n)),
        EnumCellValue::String(s) => {
            let txt = s.trim();
            if txt.is_empty() || txt.parse::<f64>().is_ok_and(|v| v == 0.0) {
                return None;
            }
            Some(txt.to_string())
        }
    }
}

/// Pair size labels with non-zero quantities, keeping label order.
pub fn derive_size_pairs<'a>(
    carton: &SpecCarton,
    size_labels: &'a [String],
) -> Vec<(&'a str, String)> {
    size_labels
        .iter()
        .zip(carton.size_quantities.iter())
        .filter_map(|(label, value)| derive_quantity_text(value).map(|qty| (label.as_str(), qty)))
        .collect()
}

/// Render the carton's size ratio in the requested mode.
///
/// Cartons without any non-zero size yield empty strings.
pub fn derive_size_ratio(
    carton: &SpecCarton,
    size_labels: &[String],
    rule_mode: EnumSizeRatioMode,
) -> EnumSizeRatio {
    let l_pairs = derive_size_pairs(carton, size_labels);
    match rule_mode {
        EnumSizeRatioMode::Split => EnumSizeRatio::Split {
            ratio: l_pairs
                .iter()
                .map(|(label, _)| *label)
                .collect::<Vec<_>>()
                .join("/"),
            quantities: l_pairs
                .iter()
                .map(|(_, qty)| qty.as_str())
                .collect::<Vec<_>>()
                .join("/"),
        },
        EnumSizeRatioMode::Combined => EnumSizeRatio::Combined(
            l_pairs
                .iter()
                .map(|(label, qty)| format!("{label} ({qty})"))
                .collect::<Vec<_>>()
                .join(", "),
        ),
    }
}
