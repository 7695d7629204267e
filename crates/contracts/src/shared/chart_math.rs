//! Local derivations applied by chart components to aggregated tables.

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator` as a percentage rounded to 2 dp.
///
/// A zero, missing or non-finite denominator yields `0.0`, never NaN or infinity.
pub fn percentage(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 || !denominator.is_finite() || !numerator.is_finite() {
        return 0.0;
    }
    round2(numerator / denominator * 100.0)
}

/// Per-row percentage of one field against another.
pub fn percent_series<T>(
    rows: &[T],
    numerator: impl Fn(&T) -> f64,
    denominator: impl Fn(&T) -> f64,
) -> Vec<f64> {
    rows.iter()
        .map(|row| percentage(numerator(row), denominator(row)))
        .collect()
}

/// Each value as a percentage of the series sum.
pub fn share_of_total(values: &[f64]) -> Vec<f64> {
    let total: f64 = values.iter().filter(|v| v.is_finite()).sum();
    values.iter().map(|v| percentage(*v, total)).collect()
}

/// Centered moving average with window `min(3, n)`.
///
/// With fewer than three points the input is returned unchanged. Edge points
/// average over the part of the window that exists.
pub fn moving_average(values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n < 3 {
        return values.to_vec();
    }
    let half = n.min(3) / 2;
    (0..n)
        .map(|i| {
            let start = i.saturating_sub(half);
            let end = (i + half + 1).min(n);
            let window = &values[start..end];
            window.iter().sum::<f64>() / window.len() as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::currency::currency_value;

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1.0, 3.0), 33.33);
        assert_eq!(percentage(2.0, 3.0), 66.67);
        assert_eq!(percentage(250.0, 1000.0), 25.0);
    }

    #[test]
    fn test_zero_denominator_is_zero() {
        assert_eq!(percentage(50.0, 0.0), 0.0);
        assert_eq!(percentage(0.0, 0.0), 0.0);
        assert_eq!(percentage(10.0, f64::NAN), 0.0);
        assert_eq!(percentage(10.0, f64::INFINITY), 0.0);
        // A missing spreadsheet cell arrives as null.
        assert_eq!(percentage(10.0, currency_value(&serde_json::Value::Null)), 0.0);
        assert!(percentage(-3.0, 0.0).is_finite());
    }

    #[test]
    fn test_percent_series_per_row() {
        let rows = vec![(25.0, 100.0), (5.0, 0.0), (1.0, 8.0)];
        let series = percent_series(&rows, |r| r.0, |r| r.1);
        assert_eq!(series, vec![25.0, 0.0, 12.5]);
    }

    #[test]
    fn test_share_of_total() {
        assert_eq!(share_of_total(&[1.0, 1.0, 2.0]), vec![25.0, 25.0, 50.0]);
        assert_eq!(share_of_total(&[0.0, 0.0]), vec![0.0, 0.0]);
        assert!(share_of_total(&[]).is_empty());
    }

    #[test]
    fn test_moving_average_short_series_is_raw() {
        assert!(moving_average(&[]).is_empty());
        assert_eq!(moving_average(&[4.2]), vec![4.2]);
        assert_eq!(moving_average(&[1.5, 9.0]), vec![1.5, 9.0]);
    }

    #[test]
    fn test_moving_average_centered_window() {
        let trend = moving_average(&[3.0, 6.0, 9.0, 12.0]);
        assert_eq!(trend, vec![4.5, 6.0, 9.0, 10.5]);
    }
}
