use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::shared::serde_helpers::id_string;

/// One uploaded master file (`GET /api/masterfile/details`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MasterFileDetail {
    #[serde(deserialize_with = "id_string")]
    pub company_id: String,
    pub company_name: String,
    pub filename: String,
    #[serde(deserialize_with = "id_string")]
    pub location_id: String,
    pub location_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MasterFileDetailsResponse {
    #[serde(default)]
    pub data: Vec<MasterFileDetail>,
}

/// Identifies a single master file source.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MasterFileQuery {
    pub company_id: String,
    pub location_id: String,
    pub filename: String,
}

impl MasterFileQuery {
    pub fn new(
        company_id: impl Into<String>,
        location_id: impl Into<String>,
        filename: impl Into<String>,
    ) -> Self {
        Self {
            company_id: company_id.into(),
            location_id: location_id.into(),
            filename: filename.into(),
        }
    }
}

/// Column ids that play a known role in the grid.
///
/// Supplied by the backend; every named id must be a key of `columns`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldRoles {
    #[serde(default)]
    pub current_price: Option<String>,
    #[serde(default)]
    pub previous_price: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl FieldRoles {
    pub fn named(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("current_price", self.current_price.as_deref()),
            ("previous_price", self.previous_price.as_deref()),
            ("unit", self.unit.as_deref()),
            ("category", self.category.as_deref()),
        ]
        .into_iter()
        .filter_map(|(role, key)| key.map(|k| (role, k)))
    }
}

/// Contents of one master file
/// (`GET /api/masterfile/details/{company_id}/{location_id}/{filename}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterFileResponse {
    /// Column id → display name, in backend order.
    pub columns: Map<String, Value>,
    pub dataframe: Vec<Map<String, Value>>,
    pub field_roles: FieldRoles,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
}

/// Persist one edited row (`POST /api/masterfile/updatefile`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRowRequest {
    pub company_id: String,
    pub location_id: String,
    pub filename: String,
    pub row_data: Map<String, Value>,
}

/// Upload a master spreadsheet (`POST /api/master/upload`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterUploadRequest {
    pub company_id: String,
    pub location_id: String,
    #[serde(rename = "fileName")]
    pub file_name: String,
    /// Base64 file bytes
    #[serde(rename = "fileContent")]
    pub file_content: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_request_wire_names() {
        let req = MasterUploadRequest {
            company_id: "1".into(),
            location_id: "2".into(),
            file_name: "prices.xlsx".into(),
            file_content: "UEsDBA==".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["fileName"], "prices.xlsx");
        assert_eq!(json["fileContent"], "UEsDBA==");
        assert_eq!(json["company_id"], "1");
    }

    #[test]
    fn test_response_requires_field_roles() {
        let without_roles = r#"{"columns": {"a": "Item"}, "dataframe": []}"#;
        assert!(serde_json::from_str::<MasterFileResponse>(without_roles).is_err());

        let with_roles = r#"{"columns": {"a": "Item"}, "dataframe": [], "field_roles": {}}"#;
        let parsed: MasterFileResponse = serde_json::from_str(with_roles).unwrap();
        assert_eq!(parsed.field_roles, FieldRoles::default());
    }

    #[test]
    fn test_named_roles() {
        let roles = FieldRoles {
            current_price: Some("c3".into()),
            unit: Some("c5".into()),
            ..Default::default()
        };
        let named: Vec<_> = roles.named().collect();
        assert_eq!(named, vec![("current_price", "c3"), ("unit", "c5")]);
    }
}
