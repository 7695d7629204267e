use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::api_error::ApiError;

const ISO_FORMAT: &str = "%Y-%m-%d";

/// Optional inclusive date range used by analytics filters.
///
/// Either bound may be open. When both are set, `start_date <= end_date`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start_date: Option<NaiveDate>, end_date: Option<NaiveDate>) -> Result<Self, ApiError> {
        if let (Some(start), Some(end)) = (start_date, end_date) {
            if start > end {
                return Err(ApiError::Validation(format!(
                    "Start date {} is after end date {}",
                    start.format(ISO_FORMAT),
                    end.format(ISO_FORMAT)
                )));
            }
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// Build from the `yyyy-mm-dd` strings of date inputs; blank means open.
    pub fn from_inputs(start: &str, end: &str) -> Result<Self, ApiError> {
        Self::new(parse_input(start)?, parse_input(end)?)
    }

    pub fn is_open(&self) -> bool {
        self.start_date.is_none() && self.end_date.is_none()
    }

    pub fn start_input(&self) -> String {
        self.start_date
            .map(|d| d.format(ISO_FORMAT).to_string())
            .unwrap_or_default()
    }

    pub fn end_input(&self) -> String {
        self.end_date
            .map(|d| d.format(ISO_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Human label, e.g. `2024-01-01 → 2024-01-31` or `All dates`.
    pub fn label(&self) -> String {
        match (self.start_date, self.end_date) {
            (None, None) => "All dates".to_string(),
            (Some(s), None) => format!("From {}", s.format(ISO_FORMAT)),
            (None, Some(e)) => format!("Until {}", e.format(ISO_FORMAT)),
            (Some(s), Some(e)) => format!("{} → {}", s.format(ISO_FORMAT), e.format(ISO_FORMAT)),
        }
    }
}

fn parse_input(raw: &str) -> Result<Option<NaiveDate>, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(raw, ISO_FORMAT)
        .map(Some)
        .map_err(|_| ApiError::Validation(format!("Invalid date: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_inputs() {
        let range = DateRange::from_inputs("2024-01-01", "2024-01-31").unwrap();
        assert_eq!(range.start_input(), "2024-01-01");
        assert_eq!(range.end_input(), "2024-01-31");
        assert_eq!(range.label(), "2024-01-01 → 2024-01-31");

        let open = DateRange::from_inputs("", " ").unwrap();
        assert!(open.is_open());
        assert_eq!(open.label(), "All dates");
    }

    #[test]
    fn test_inverted_range_rejected() {
        let err = DateRange::from_inputs("2024-02-01", "2024-01-01").unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(DateRange::from_inputs("01/02/2024", "").is_err());
    }

    #[test]
    fn test_serde_shape() {
        let range = DateRange::from_inputs("2024-03-01", "").unwrap();
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, r#"{"start_date":"2024-03-01","end_date":null}"#);
        let back: DateRange = serde_json::from_str(&json).unwrap();
        assert_eq!(back, range);
    }
}
