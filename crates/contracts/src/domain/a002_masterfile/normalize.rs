use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dto::{MasterFileQuery, MasterFileResponse};
use super::schema::ColumnSchema;
use crate::shared::currency::optional_number;
use crate::shared::ApiError;

/// Back-reference from a row to the file it came from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowMeta {
    pub company_id: String,
    pub location_id: String,
    pub filename: String,
    pub company_name: String,
    pub location_name: String,
}

/// A grid row: synthetic id, dynamic cells keyed by column id, source meta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterFileRow {
    pub id: String,
    pub cells: Map<String, Value>,
    pub meta: RowMeta,
}

impl MasterFileRow {
    pub fn cell(&self, key: &str) -> Option<&Value> {
        self.cells.get(key)
    }

    /// Display text of a cell; nulls render empty.
    pub fn text(&self, key: &str) -> String {
        match self.cells.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
        }
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.cells.get(key).and_then(optional_number)
    }

    /// Shallow-merge `updates` into the cells.
    pub fn merge(&mut self, updates: &Map<String, Value>) {
        for (key, value) in updates {
            self.cells.insert(key.clone(), value.clone());
        }
    }
}

/// How synthetic row ids are built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowIdScheme {
    /// `{company_id}_{location_id}_{index}`
    Single,
    /// `{company_id}_{location_id}_{filename}_{index}`; unique across files
    PerFile,
}

impl RowIdScheme {
    fn row_id(self, query: &MasterFileQuery, index: usize) -> String {
        match self {
            Self::Single => format!("{}_{}_{}", query.company_id, query.location_id, index),
            Self::PerFile => format!(
                "{}_{}_{}_{}",
                query.company_id, query.location_id, query.filename, index
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedFile {
    pub schema: ColumnSchema,
    pub rows: Vec<MasterFileRow>,
}

/// Validate a master file response and flatten it into grid rows.
///
/// Rows may only use keys present in `columns`. A previous price that is not a
/// positive number is replaced by `null`.
pub fn normalize_master_file(
    query: &MasterFileQuery,
    response: MasterFileResponse,
    scheme: RowIdScheme,
) -> Result<NormalizedFile, ApiError> {
    let schema = ColumnSchema::from_response(&response.columns, &response.field_roles)?;

    for (index, cells) in response.dataframe.iter().enumerate() {
        if let Some(unknown) = cells.keys().find(|k| !response.columns.contains_key(*k)) {
            return Err(ApiError::Payload(format!(
                "row {} has unknown column '{}'",
                index, unknown
            )));
        }
    }

    let meta = RowMeta {
        company_id: query.company_id.clone(),
        location_id: query.location_id.clone(),
        filename: query.filename.clone(),
        company_name: response.company_name.unwrap_or_default(),
        location_name: response.location_name.unwrap_or_default(),
    };

    let previous_key = schema.previous_price_key().map(str::to_string);
    let rows = response
        .dataframe
        .into_iter()
        .enumerate()
        .map(|(index, mut cells)| {
            if let Some(key) = previous_key.as_deref() {
                clean_previous_price(&mut cells, key);
            }
            MasterFileRow {
                id: scheme.row_id(query, index),
                cells,
                meta: meta.clone(),
            }
        })
        .collect();

    Ok(NormalizedFile { schema, rows })
}

fn clean_previous_price(cells: &mut Map<String, Value>, key: &str) {
    if let Some(value) = cells.get_mut(key) {
        match optional_number(value) {
            Some(price) if price > 0.0 => {}
            _ => *value = Value::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response() -> MasterFileResponse {
        serde_json::from_value(json!({
            "columns": {"c0": "Item", "c1": "Current Price", "c2": "Previous Price", "c3": "Unit"},
            "dataframe": [
                {"c0": "Flour", "c1": 9.99, "c2": 8.5, "c3": "kg"},
                {"c0": "Salt", "c1": "$1.20", "c2": 0, "c3": "kg"},
                {"c0": "Oil", "c1": 4.0, "c2": "NaN"},
                {"c0": "Eggs", "c1": 3.1, "c2": "-2"}
            ],
            "field_roles": {"current_price": "c1", "previous_price": "c2", "unit": "c3"},
            "company_name": "Company A",
            "location_name": "Downtown"
        }))
        .unwrap()
    }

    #[test]
    fn test_row_ids_and_meta() {
        let query = MasterFileQuery::new("1", "7", "prices.xlsx");
        let normalized = normalize_master_file(&query, response(), RowIdScheme::Single).unwrap();
        let ids: Vec<&str> = normalized.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["1_7_0", "1_7_1", "1_7_2", "1_7_3"]);
        assert_eq!(normalized.rows[0].meta.location_name, "Downtown");
        assert_eq!(normalized.rows[0].meta.filename, "prices.xlsx");
        assert_eq!(normalized.schema.current_price_key(), Some("c1"));
    }

    #[test]
    fn test_per_file_ids() {
        let query = MasterFileQuery::new("1", "7", "b.xlsx");
        let normalized = normalize_master_file(&query, response(), RowIdScheme::PerFile).unwrap();
        assert_eq!(normalized.rows[2].id, "1_7_b.xlsx_2");
    }

    #[test]
    fn test_previous_price_cleaning() {
        let query = MasterFileQuery::new("1", "7", "prices.xlsx");
        let rows = normalize_master_file(&query, response(), RowIdScheme::Single)
            .unwrap()
            .rows;
        assert_eq!(rows[0].cell("c2"), Some(&json!(8.5)));
        assert_eq!(rows[1].cell("c2"), Some(&Value::Null));
        assert_eq!(rows[2].cell("c2"), Some(&Value::Null));
        assert_eq!(rows[3].cell("c2"), Some(&Value::Null));
        // current price is left untouched
        assert_eq!(rows[1].cell("c1"), Some(&json!("$1.20")));
    }

    #[test]
    fn test_row_keys_must_be_known_columns() {
        let mut bad = response();
        bad.dataframe[1].insert("c9".into(), json!("x"));
        let query = MasterFileQuery::new("1", "7", "prices.xlsx");
        let err = normalize_master_file(&query, bad, RowIdScheme::Single).unwrap_err();
        assert_eq!(
            err,
            ApiError::Payload("row 1 has unknown column 'c9'".to_string())
        );
    }

    #[test]
    fn test_row_accessors_and_merge() {
        let query = MasterFileQuery::new("1", "7", "prices.xlsx");
        let mut row = normalize_master_file(&query, response(), RowIdScheme::Single)
            .unwrap()
            .rows
            .remove(1);
        assert_eq!(row.text("c0"), "Salt");
        assert_eq!(row.number("c1"), Some(1.2));
        assert_eq!(row.text("c2"), "");

        let mut updates = Map::new();
        updates.insert("c1".into(), json!(1.35));
        row.merge(&updates);
        assert_eq!(row.number("c1"), Some(1.35));
        assert_eq!(row.text("c0"), "Salt");
    }
}
