//! Inline editing of the current-price column.

use contracts::domain::a002_masterfile::{MasterFileRow, UpdateRowRequest};
use contracts::shared::currency::parse_strict;
use serde_json::{Map, Number, Value};

/// Validate a price typed into the grid.
pub fn parse_price(input: &str) -> Result<f64, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("Price is required".to_string());
    }
    let value = parse_strict(trimmed).ok_or_else(|| format!("'{}' is not a number", trimmed))?;
    if value < 0.0 {
        return Err("Price cannot be negative".to_string());
    }
    Ok(value)
}

/// An optimistic cell change that can be rolled back.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEdit {
    pub row_id: String,
    pub key: String,
    pub previous: Value,
    pub next: Value,
}

impl PendingEdit {
    pub fn begin(row: &MasterFileRow, key: &str, input: &str) -> Result<Self, String> {
        let price = parse_price(input)?;
        let next = Number::from_f64(price)
            .map(Value::Number)
            .ok_or_else(|| "Price is out of range".to_string())?;
        Ok(Self {
            row_id: row.id.clone(),
            key: key.to_string(),
            previous: row.cell(key).cloned().unwrap_or(Value::Null),
            next,
        })
    }

    /// Nothing to save when the value is unchanged.
    pub fn is_noop(&self) -> bool {
        match (&self.previous, &self.next) {
            (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
            (a, b) => a == b,
        }
    }

    pub fn updates(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(self.key.clone(), self.next.clone());
        map
    }

    pub fn rollback(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert(self.key.clone(), self.previous.clone());
        map
    }

    /// Save request carrying the whole row with the new value.
    pub fn request(&self, row: &MasterFileRow) -> UpdateRowRequest {
        let mut row_data = row.cells.clone();
        row_data.insert(self.key.clone(), self.next.clone());
        UpdateRowRequest {
            company_id: row.meta.company_id.clone(),
            location_id: row.meta.location_id.clone(),
            filename: row.meta.filename.clone(),
            row_data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_masterfile::RowMeta;
    use serde_json::json;

    fn row() -> MasterFileRow {
        MasterFileRow {
            id: "1_2_0".into(),
            cells: json!({"item": "Tomato", "price": "$4.50"}).as_object().cloned().unwrap(),
            meta: RowMeta {
                company_id: "1".into(),
                location_id: "2".into(),
                filename: "prices.xlsx".into(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price(" 12.5 "), Ok(12.5));
        assert_eq!(parse_price("$1,200"), Ok(1200.0));
        assert_eq!(parse_price("0"), Ok(0.0));
        assert!(parse_price("-1").is_err());
        assert!(parse_price("abc").is_err());
        assert!(parse_price("").is_err());
    }

    #[test]
    fn test_edit_updates_and_rollback() {
        let row = row();
        let edit = PendingEdit::begin(&row, "price", "5").unwrap();
        assert_eq!(edit.updates()["price"], json!(5.0));
        assert_eq!(edit.rollback()["price"], json!("$4.50"));
        assert!(!edit.is_noop());

        let request = edit.request(&row);
        assert_eq!(request.filename, "prices.xlsx");
        assert_eq!(request.row_data["price"], json!(5.0));
        assert_eq!(request.row_data["item"], json!("Tomato"));
    }

    #[test]
    fn test_invalid_input_rejected_before_any_change() {
        assert!(PendingEdit::begin(&row(), "price", "-3").is_err());
    }

    #[test]
    fn test_noop_edit() {
        let mut row = row();
        row.cells.insert("price".into(), json!(5));
        assert!(PendingEdit::begin(&row, "price", "5.0").unwrap().is_noop());
    }
}
