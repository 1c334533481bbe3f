//! Locale-aware number parsing.
//!
//! Municipal exports write amounts the Brazilian way: `.` groups thousands and
//! `,` marks decimals (`"1.234,56"`). Some rows carry proper JSON numbers
//! instead. Either way the screen wants an `f64`, and a bad cell must never
//! abort the batch, so every failure path degrades to `0.0`.

use serde_json::Value;

/// Parse a raw cell into a number.
///
/// - text: trim, drop every `.`, turn `,` into `.`, then parse
/// - JSON number: used as-is
/// - bool: `1.0` / `0.0`
/// - anything else (null, array, object): `0.0`
///
/// Unparseable or non-finite results become `0.0`.
pub fn parse_locale_number(raw: &Value) -> f64 {
    let v = match raw {
        Value::String(s) => parse_locale_text(s),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if v.is_finite() { v } else { 0.0 }
}

fn parse_locale_text(s: &str) -> f64 {
    let cleaned = s.trim().replace('.', "").replace(',', ".");
    cleaned.parse::<f64>().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn ptbr_thousands_and_decimals() {
        assert!((parse_locale_number(&json!("1.234,56")) - 1234.56).abs() < 1e-9);
        assert!((parse_locale_number(&json!("  0,10 ")) - 0.10).abs() < 1e-12);
        assert!((parse_locale_number(&json!("1.000.000")) - 1_000_000.0).abs() < 1e-9);
    }

    #[test]
    fn garbage_text_is_zero() {
        assert_eq!(parse_locale_number(&json!("abc")), 0.0);
        assert_eq!(parse_locale_number(&json!("")), 0.0);
        assert_eq!(parse_locale_number(&json!("R$ 10,00")), 0.0);
    }

    #[test]
    fn json_numbers_pass_through() {
        assert_eq!(parse_locale_number(&json!(42)), 42.0);
        assert_eq!(parse_locale_number(&json!(12.5)), 12.5);
    }

    #[test]
    fn booleans_count_as_numbers() {
        assert_eq!(parse_locale_number(&json!(true)), 1.0);
        assert_eq!(parse_locale_number(&json!(false)), 0.0);
    }

    #[test]
    fn other_types_are_zero() {
        assert_eq!(parse_locale_number(&Value::Null), 0.0);
        assert_eq!(parse_locale_number(&json!([1, 2])), 0.0);
        assert_eq!(parse_locale_number(&json!({"v": 1})), 0.0);
    }

    #[test]
    fn non_finite_text_is_zero() {
        assert_eq!(parse_locale_number(&json!("NaN")), 0.0);
        assert_eq!(parse_locale_number(&json!("inf")), 0.0);
    }
}
