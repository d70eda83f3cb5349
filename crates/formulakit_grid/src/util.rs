//! Stateless cell-to-text helpers shared by the normalizer and renderer.

use crate::spec::{EnumCellValue, EnumQuantityMode};

/// Render a finite number without a trailing `.0` when integer-valued.
pub fn format_number(x: f64) -> String {
    if x.fract() == 0.0 && x.abs() < 1e15 {
        // `as i64` also folds `-0.0` into `0`.
        return (x as i64).to_string();
    }
    x.to_string()
}

/// Plain text of a non-quantity cell: trimmed strings, formatted numbers, blank for missing.
pub fn convert_cell_to_text(value: &EnumCellValue) -> String {
    match value {
        EnumCellValue::None => String::new(),
        EnumCellValue::String(s) => s.trim().to_string(),
        EnumCellValue::Number(n) if n.is_finite() => format_number(*n),
        EnumCellValue::Number(_) => String::new(),
    }
}

/// Normalize a quantity cell.
///
/// Numeric strings are reformatted like numbers (`"5.0"` -> `"5"`). Returns the
/// reason text when the cell cannot be used under `rule_quantity`.
pub fn convert_quantity_to_text(
    value: &EnumCellValue,
    rule_quantity: EnumQuantityMode,
) -> Result<String, String> {
    match value {
        EnumCellValue::None => Ok(String::new()),
        EnumCellValue::Number(n) if n.is_finite() => Ok(format_number(*n)),
        EnumCellValue::Number(n) => Err(format!("quantity is not finite: {n}")),
        EnumCellValue::String(s) => {
            let c_qty = s.trim();
            if c_qty.is_empty() {
                return Ok(String::new());
            }
            match c_qty.parse::<f64>() {
                Ok(n) if n.is_finite() => Ok(format_number(n)),
                _ if rule_quantity == EnumQuantityMode::Text => Ok(c_qty.to_string()),
                Ok(_) => Err(format!("quantity is not finite: {c_qty:?}")),
                Err(_) => Err(format!("quantity is not numeric: {c_qty:?}")),
            }
        }
    }
}

/// Concatenate quantity and unit; the separator only appears with a non-empty unit.
///
/// A unit without a quantity renders nothing.
pub fn join_quantity_unit(quantity: &str, unit: &str, unit_separator: &str) -> String {
    if quantity.is_empty() {
        return String::new();
    }
    if unit.is_empty() {
        return quantity.to_string();
    }
    format!("{quantity}{unit_separator}{unit}")
}

/// Strip the trailing header marker from a trimmed name, if present.
pub fn strip_group_header_marker(name: &str, marker: char) -> Option<String> {
    name.trim()
        .strip_suffix(marker)
        .map(|c_name| c_name.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_drops_integer_fraction() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(1.75), "1.75");
        assert_eq!(format_number(0.1), "0.1");
    }

    #[test]
    fn convert_quantity_to_text_policies() {
        let strict = EnumQuantityMode::Numeric;
        assert_eq!(
            convert_quantity_to_text(&EnumCellValue::from(" 5.0 "), strict),
            Ok("5".to_string())
        );
        assert_eq!(
            convert_quantity_to_text(&EnumCellValue::None, strict),
            Ok(String::new())
        );
        assert!(convert_quantity_to_text(&EnumCellValue::from("QS"), strict).is_err());
        assert!(convert_quantity_to_text(&EnumCellValue::Number(f64::NAN), strict).is_err());
        assert_eq!(
            convert_quantity_to_text(&EnumCellValue::from("QS"), EnumQuantityMode::Text),
            Ok("QS".to_string())
        );
    }

    #[test]
    fn join_quantity_unit_elides_empty_parts() {
        assert_eq!(join_quantity_unit("5", "g", ""), "5g");
        assert_eq!(join_quantity_unit("5", "g", " "), "5 g");
        assert_eq!(join_quantity_unit("5", "", " "), "5");
        assert_eq!(join_quantity_unit("", "g", " "), "");
    }

    #[test]
    fn strip_group_header_marker_trims() {
        assert_eq!(
            strip_group_header_marker("  Amla Pishti : ", ':'),
            Some("Amla Pishti".to_string())
        );
        assert_eq!(strip_group_header_marker("Bel", ':'), None);
    }
}
