//! Number formatting for tables, cards and axis labels

/// Formats a number with comma thousands separators and fixed decimals
///
/// # Examples
///
/// ```
/// # use frontend::shared::number_format::format_number_with_decimals;
/// let formatted = format_number_with_decimals(1234.567, 2);
/// assert_eq!(formatted, "1,234.57");
/// ```
pub fn format_number_with_decimals(value: f64, decimals: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let formatted = format!("{:.*}", decimals, value.abs());
    let (integer_part, decimal_part) = match formatted.split_once('.') {
        Some((i, d)) => (i, Some(d)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(integer_part.len() + integer_part.len() / 3);
    for (i, c) in integer_part.chars().enumerate() {
        if i > 0 && (integer_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let negative = value < 0.0 && formatted.chars().any(|c| c != '0' && c != '.');
    let sign = if negative { "-" } else { "" };
    match decimal_part {
        Some(d) => format!("{}{}.{}", sign, grouped, d),
        None => format!("{}{}", sign, grouped),
    }
}

/// `$1,234.56`, `-$12.00`
pub fn format_currency(value: f64) -> String {
    let body = format_number_with_decimals(value.abs(), 2);
    if value < 0.0 && body != "0.00" {
        format!("-${}", body)
    } else {
        format!("${}", body)
    }
}

pub fn format_int(value: f64) -> String {
    format_number_with_decimals(value, 0)
}

/// `42.50%`
pub fn format_percent(value: f64) -> String {
    format!("{}%", format_number_with_decimals(value, 2))
}

/// Short axis label: `$950`, `$12.5K`, `$3.2M`
pub fn format_compact_currency(value: f64) -> String {
    let abs = value.abs();
    let sign = if value < 0.0 { "-" } else { "" };
    if abs >= 1_000_000.0 {
        format!("{}${:.1}M", sign, abs / 1_000_000.0)
    } else if abs >= 1_000.0 {
        format!("{}${:.1}K", sign, abs / 1_000.0)
    } else {
        format!("{}${:.0}", sign, abs)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueFormat {
    Currency,
    Integer,
    Percent,
}

impl ValueFormat {
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Currency => format_currency(value),
            Self::Integer => format_int(value),
            Self::Percent => format_percent(value),
        }
    }

    /// Shorter text for axis ticks.
    pub fn axis(self, value: f64) -> String {
        match self {
            Self::Currency => format_compact_currency(value),
            Self::Integer => format_int(value),
            Self::Percent => format!("{}%", format_number_with_decimals(value, 0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number_with_decimals(1234.567, 2), "1,234.57");
        assert_eq!(format_number_with_decimals(1234567.0, 0), "1,234,567");
        assert_eq!(format_number_with_decimals(999.0, 0), "999");
        assert_eq!(format_number_with_decimals(-1234.5, 1), "-1,234.5");
        assert_eq!(format_number_with_decimals(-0.001, 2), "0.00");
        assert_eq!(format_number_with_decimals(f64::NAN, 2), "0");
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.56), "$1,234.56");
        assert_eq!(format_currency(-12.0), "-$12.00");
        assert_eq!(format_currency(0.0), "$0.00");
    }

    #[test]
    fn test_format_percent_and_compact() {
        assert_eq!(format_percent(42.5), "42.50%");
        assert_eq!(format_compact_currency(950.0), "$950");
        assert_eq!(format_compact_currency(12_500.0), "$12.5K");
        assert_eq!(format_compact_currency(3_200_000.0), "$3.2M");
    }

    #[test]
    fn test_value_formats() {
        assert_eq!(ValueFormat::Currency.format(1500.0), "$1,500.00");
        assert_eq!(ValueFormat::Integer.format(1500.4), "1,500");
        assert_eq!(ValueFormat::Percent.format(12.3456), "12.35%");
        assert_eq!(ValueFormat::Percent.axis(25.0), "25%");
        assert_eq!(ValueFormat::Currency.axis(2500.0), "$2.5K");
    }
}
