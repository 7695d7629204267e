//! Fan-in of a multi-source master file load.

use super::dto::{MasterFileQuery, MasterFileResponse};
use super::normalize::{normalize_master_file, MasterFileRow, RowIdScheme};
use super::schema::ColumnSchema;
use crate::shared::ApiError;

#[derive(Debug, Clone, PartialEq)]
pub struct SourceFailure {
    pub query: MasterFileQuery,
    pub error: ApiError,
}

/// Rows of every successful source, concatenated in request order.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedMasterData {
    pub schema: ColumnSchema,
    pub rows: Vec<MasterFileRow>,
    pub failures: Vec<SourceFailure>,
    pub total_sources: usize,
}

impl MergedMasterData {
    pub fn succeeded(&self) -> usize {
        self.total_sources - self.failures.len()
    }

    /// `"1 source failed: b.xlsx (Not found)"`, or `None` when all succeeded.
    pub fn failure_message(&self) -> Option<String> {
        let failed = self.failures.len();
        if failed == 0 {
            return None;
        }
        let details: Vec<String> = self
            .failures
            .iter()
            .map(|f| format!("{} ({})", f.query.filename, f.error))
            .collect();
        Some(format!(
            "{} source{} failed: {}",
            failed,
            if failed == 1 { "" } else { "s" },
            details.join(", ")
        ))
    }
}

/// Merge per-source results.
///
/// The first success establishes the schema; a later source with a different
/// column set or role mapping is counted as failed rather than mixed in. When nothing
/// succeeded the first error is returned wrapped in
/// [`ApiError::AllSourcesFailed`].
pub fn merge_sources(
    results: Vec<(MasterFileQuery, Result<MasterFileResponse, ApiError>)>,
) -> Result<MergedMasterData, ApiError> {
    let total_sources = results.len();
    let mut schema: Option<ColumnSchema> = None;
    let mut rows = Vec::new();
    let mut failures = Vec::new();

    for (query, result) in results {
        let normalized =
            result.and_then(|response| normalize_master_file(&query, response, RowIdScheme::PerFile));
        match normalized {
            Ok(file) => {
                let compatible = schema
                    .as_ref()
                    .map_or(true, |established| established.same_layout(&file.schema));
                if !compatible {
                    failures.push(SourceFailure {
                        query,
                        error: ApiError::Payload(
                            "column layout or field roles differ from the first file".into(),
                        ),
                    });
                    continue;
                }
                if schema.is_none() {
                    schema = Some(file.schema);
                }
                rows.extend(file.rows);
            }
            Err(error) => failures.push(SourceFailure { query, error }),
        }
    }

    match schema {
        Some(schema) => Ok(MergedMasterData {
            schema,
            rows,
            failures,
            total_sources,
        }),
        None => {
            let first = failures
                .into_iter()
                .next()
                .map(|f| f.error)
                .unwrap_or_else(|| ApiError::Validation("No sources selected".into()));
            Err(ApiError::AllSourcesFailed {
                total: total_sources,
                first: Box::new(first),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn file(items: usize, columns: serde_json::Value) -> MasterFileResponse {
        let dataframe: Vec<_> = (0..items)
            .map(|i| json!({"c0": format!("item {}", i), "c1": i as f64 + 0.5}))
            .collect();
        serde_json::from_value(json!({
            "columns": columns,
            "dataframe": dataframe,
            "field_roles": {"current_price": "c1"}
        }))
        .unwrap()
    }

    fn default_columns() -> serde_json::Value {
        json!({"c0": "Item", "c1": "Current Price"})
    }

    #[test]
    fn test_partial_failure_keeps_successful_rows() {
        let results = vec![
            (
                MasterFileQuery::new("1", "1", "a.xlsx"),
                Ok(file(10, default_columns())),
            ),
            (
                MasterFileQuery::new("1", "1", "b.xlsx"),
                Err(ApiError::Http {
                    status: 404,
                    detail: "Not found".into(),
                }),
            ),
        ];
        let merged = merge_sources(results).unwrap();
        assert_eq!(merged.rows.len(), 10);
        assert_eq!(merged.succeeded(), 1);
        assert_eq!(
            merged.failure_message().unwrap(),
            "1 source failed: b.xlsx (Not found)"
        );
    }

    #[test]
    fn test_rows_concatenated_in_request_order() {
        let results = vec![
            (MasterFileQuery::new("1", "1", "a.xlsx"), Ok(file(2, default_columns()))),
            (MasterFileQuery::new("1", "1", "b.xlsx"), Ok(file(3, default_columns()))),
        ];
        let merged = merge_sources(results).unwrap();
        let ids: Vec<&str> = merged.rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["1_1_a.xlsx_0", "1_1_a.xlsx_1", "1_1_b.xlsx_0", "1_1_b.xlsx_1", "1_1_b.xlsx_2"]
        );
        assert!(merged.failure_message().is_none());
    }

    #[test]
    fn test_mismatched_schema_counts_as_failure() {
        let other = json!({"c0": "Item", "c1": "Current Price", "c2": "Extra"});
        let results = vec![
            (MasterFileQuery::new("1", "1", "a.xlsx"), Ok(file(2, default_columns()))),
            (MasterFileQuery::new("1", "1", "b.xlsx"), Ok(file(4, other))),
        ];
        let merged = merge_sources(results).unwrap();
        assert_eq!(merged.rows.len(), 2);
        assert_eq!(merged.failures.len(), 1);
        assert_eq!(merged.failures[0].query.filename, "b.xlsx");
    }

    #[test]
    fn test_different_price_role_counts_as_failure() {
        let mut swapped = file(3, json!({"c0": "Item", "c1": "Price"}));
        swapped.field_roles.current_price = Some("c0".into());
        let results = vec![
            (MasterFileQuery::new("1", "1", "a.xlsx"), Ok(file(2, default_columns()))),
            (MasterFileQuery::new("1", "1", "b.xlsx"), Ok(swapped)),
        ];
        let merged = merge_sources(results).unwrap();
        assert_eq!(merged.rows.len(), 2);
        assert_eq!(merged.schema.current_price_key(), Some("c1"));
        assert_eq!(merged.failures.len(), 1);
        assert!(merged
            .failure_message()
            .unwrap()
            .contains("field roles differ"));
    }

    #[test]
    fn test_all_failed() {
        let results = vec![
            (
                MasterFileQuery::new("1", "1", "a.xlsx"),
                Err(ApiError::Network("refused".into())),
            ),
            (
                MasterFileQuery::new("1", "1", "b.xlsx"),
                Err(ApiError::Network("refused".into())),
            ),
        ];
        let err = merge_sources(results).unwrap_err();
        assert!(matches!(err, ApiError::AllSourcesFailed { total: 2, .. }));
    }
}
