//! Currency parsing for spreadsheet-derived values.
//!
//! Backend tables carry money either as numbers or as formatted strings
//! (`"$1,234.56"`). Sentinels such as `"####"` (an Excel column too narrow to
//! render), empty strings and nulls all count as zero.

use serde_json::Value;

/// Parse a formatted currency string. Anything unparseable is `0.0`.
pub fn parse_currency(raw: &str) -> f64 {
    parse_strict(raw).unwrap_or(0.0)
}

/// Like [`parse_currency`] but distinguishes "no number" from zero.
pub fn parse_strict(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| *c != '$' && *c != ',' && !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric value of a JSON cell, `0.0` for nulls and sentinels.
pub fn currency_value(value: &Value) -> f64 {
    optional_number(value).unwrap_or(0.0)
}

/// Numeric value of a JSON cell if it holds one.
pub fn optional_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_strict(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_formatted_currency() {
        assert_eq!(parse_currency("$1,234.56"), 1234.56);
        assert_eq!(parse_currency("  $ 12 "), 12.0);
        assert_eq!(parse_currency("-$5.10"), -5.1);
        assert_eq!(parse_currency("1,000,000"), 1_000_000.0);
    }

    #[test]
    fn test_sentinels_are_zero() {
        assert_eq!(parse_currency("####"), 0.0);
        assert_eq!(parse_currency(""), 0.0);
        assert_eq!(parse_currency("n/a"), 0.0);
        assert_eq!(parse_currency("NaN"), 0.0);
        assert_eq!(parse_currency("inf"), 0.0);
    }

    #[test]
    fn test_json_cells() {
        assert_eq!(currency_value(&json!(9.99)), 9.99);
        assert_eq!(currency_value(&json!("$2,500")), 2500.0);
        assert_eq!(currency_value(&json!(null)), 0.0);
        assert_eq!(currency_value(&json!(true)), 0.0);
        assert_eq!(optional_number(&json!("####")), None);
        assert_eq!(optional_number(&json!(0)), Some(0.0));
    }
}
