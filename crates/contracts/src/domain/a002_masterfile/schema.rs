use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::dto::FieldRoles;
use crate::shared::ApiError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub key: String,
    pub title: String,
}

/// Validated column layout of a master file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub columns: Vec<ColumnDef>,
    pub roles: FieldRoles,
}

impl ColumnSchema {
    /// Validate the `columns` map and the role mapping of a response.
    pub fn from_response(columns: &Map<String, Value>, roles: &FieldRoles) -> Result<Self, ApiError> {
        let mut defs = Vec::with_capacity(columns.len());
        for (key, title) in columns {
            let title = title.as_str().ok_or_else(|| {
                ApiError::Payload(format!("column '{}' has a non-text display name", key))
            })?;
            defs.push(ColumnDef {
                key: key.clone(),
                title: title.to_string(),
            });
        }

        for (role, key) in roles.named() {
            if !columns.contains_key(key) {
                return Err(ApiError::Payload(format!(
                    "{} column '{}' is not among the file columns",
                    role, key
                )));
            }
        }

        Ok(Self {
            columns: defs,
            roles: roles.clone(),
        })
    }

    pub fn contains(&self, key: &str) -> bool {
        self.columns.iter().any(|c| c.key == key)
    }

    pub fn title(&self, key: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|c| c.key == key)
            .map(|c| c.title.as_str())
    }

    /// Same set of column ids, regardless of order and titles.
    pub fn same_columns(&self, other: &ColumnSchema) -> bool {
        self.columns.len() == other.columns.len()
            && self.columns.iter().all(|c| other.contains(&c.key))
    }

    /// Same columns and the same column for every role, so rows of both
    /// schemas can share one grid.
    pub fn same_layout(&self, other: &ColumnSchema) -> bool {
        self.same_columns(other) && self.roles == other.roles
    }

    pub fn current_price_key(&self) -> Option<&str> {
        self.roles.current_price.as_deref()
    }

    pub fn previous_price_key(&self) -> Option<&str> {
        self.roles.previous_price.as_deref()
    }

    pub fn unit_key(&self) -> Option<&str> {
        self.roles.unit.as_deref()
    }

    pub fn category_key(&self) -> Option<&str> {
        self.roles.category.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn columns() -> Map<String, Value> {
        let value = json!({"c0": "Item", "c1": "Current Price", "c2": "Previous Price"});
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_keeps_backend_column_order() {
        let schema = ColumnSchema::from_response(&columns(), &FieldRoles::default()).unwrap();
        let keys: Vec<&str> = schema.columns.iter().map(|c| c.key.as_str()).collect();
        assert_eq!(keys, vec!["c0", "c1", "c2"]);
        assert_eq!(schema.title("c1"), Some("Current Price"));
    }

    #[test]
    fn test_unknown_role_column_rejected() {
        let roles = FieldRoles {
            current_price: Some("c9".into()),
            ..Default::default()
        };
        let err = ColumnSchema::from_response(&columns(), &roles).unwrap_err();
        assert!(matches!(err, ApiError::Payload(_)));
    }

    #[test]
    fn test_non_text_title_rejected() {
        let cols = json!({"c0": 5}).as_object().cloned().unwrap();
        assert!(ColumnSchema::from_response(&cols, &FieldRoles::default()).is_err());
    }

    #[test]
    fn test_same_columns_ignores_order() {
        let a = ColumnSchema::from_response(&columns(), &FieldRoles::default()).unwrap();
        let reordered = json!({"c2": "Prev", "c0": "Item", "c1": "Now"})
            .as_object()
            .cloned()
            .unwrap();
        let b = ColumnSchema::from_response(&reordered, &FieldRoles::default()).unwrap();
        assert!(a.same_columns(&b));

        let fewer = json!({"c0": "Item"}).as_object().cloned().unwrap();
        let c = ColumnSchema::from_response(&fewer, &FieldRoles::default()).unwrap();
        assert!(!a.same_columns(&c));
    }
}
