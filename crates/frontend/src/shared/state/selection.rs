//! Shared scope selection and loaded master data.
//!
//! All mutations go through [`SelectionState::reduce`]. Dependent fields are
//! cleared here and nowhere else: a different company list drops locations and
//! filenames, a different location list drops filenames.

use contracts::domain::a002_masterfile::{
    ColumnSchema, MasterFileQuery, MasterFileRow, MergedMasterData, NormalizedFile,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Current company/location/filename scope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub companies: Vec<String>,
    pub locations: Vec<String>,
    pub filenames: Vec<String>,
}

impl Selection {
    pub fn is_empty(&self) -> bool {
        self.companies.is_empty() && self.locations.is_empty() && self.filenames.is_empty()
    }
}

/// Where the rows currently in the grid came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DataSource {
    #[default]
    None,
    Single(MasterFileQuery),
    Multiple(Vec<MasterFileQuery>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MasterData {
    pub schema: ColumnSchema,
    pub rows: Vec<MasterFileRow>,
}

/// Filters of the last successful load, kept for session resumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AppliedFilters {
    Single { query: MasterFileQuery },
    Multiple { queries: Vec<MasterFileQuery> },
}

const APPLIED_FILTERS_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct StoredFilters {
    version: u32,
    filters: AppliedFilters,
}

impl AppliedFilters {
    pub fn queries(&self) -> Vec<MasterFileQuery> {
        match self {
            Self::Single { query } => vec![query.clone()],
            Self::Multiple { queries } => queries.clone(),
        }
    }

    /// Selection that reproduces these filters in the pickers.
    pub fn selection(&self) -> Selection {
        let mut selection = Selection::default();
        for query in self.queries() {
            push_unique(&mut selection.companies, &query.company_id);
            push_unique(&mut selection.locations, &query.location_id);
            push_unique(&mut selection.filenames, &query.filename);
        }
        selection
    }

    pub fn to_storage(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&StoredFilters {
            version: APPLIED_FILTERS_VERSION,
            filters: self.clone(),
        })
    }

    /// `None` for unreadable, empty or other-version records.
    pub fn from_storage(raw: &str) -> Option<Self> {
        let stored: StoredFilters = serde_json::from_str(raw).ok()?;
        if stored.version != APPLIED_FILTERS_VERSION {
            return None;
        }
        match &stored.filters {
            Self::Multiple { queries } if queries.is_empty() => None,
            _ => Some(stored.filters),
        }
    }
}

fn push_unique(list: &mut Vec<String>, value: &str) {
    if !list.iter().any(|v| v == value) {
        list.push(value.to_string());
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SelectionState {
    pub selection: Selection,
    pub data: Option<MasterData>,
    pub data_source: DataSource,
    pub loading: bool,
    pub error: Option<String>,
    /// Bumped by every scope change and every new load.
    pub generation: u64,
    pub last_applied: Option<AppliedFilters>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SelectionAction {
    SetCompanies(Vec<String>),
    SetLocations(Vec<String>),
    SetFilenames(Vec<String>),
    ClearSelection,
    LoadStarted {
        generation: u64,
    },
    SingleLoaded {
        generation: u64,
        query: MasterFileQuery,
        file: NormalizedFile,
    },
    MultiLoaded {
        generation: u64,
        queries: Vec<MasterFileQuery>,
        merged: MergedMasterData,
    },
    LoadFailed {
        generation: u64,
        error: String,
    },
    UpdateItem {
        id: String,
        updates: Map<String, Value>,
    },
    ClearData,
}

impl SelectionAction {
    fn generation(&self) -> Option<u64> {
        match self {
            Self::SingleLoaded { generation, .. }
            | Self::MultiLoaded { generation, .. }
            | Self::LoadFailed { generation, .. } => Some(*generation),
            _ => None,
        }
    }
}

impl SelectionState {
    /// Generation a new load should carry.
    pub fn next_generation(&self) -> u64 {
        self.generation + 1
    }

    /// Apply one action. Returns `false` when the state did not change, which
    /// includes results of superseded loads.
    pub fn reduce(&mut self, action: SelectionAction) -> bool {
        if let Some(generation) = action.generation() {
            if generation != self.generation {
                log::warn!(
                    "Discarding stale load result (generation {}, current {})",
                    generation,
                    self.generation
                );
                return false;
            }
        }

        match action {
            SelectionAction::SetCompanies(ids) => {
                if self.selection.companies == ids {
                    return false;
                }
                self.selection.companies = ids;
                self.selection.locations.clear();
                self.selection.filenames.clear();
                self.invalidate_loads();
            }
            SelectionAction::SetLocations(ids) => {
                if self.selection.locations == ids {
                    return false;
                }
                self.selection.locations = ids;
                self.selection.filenames.clear();
                self.invalidate_loads();
            }
            SelectionAction::SetFilenames(names) => {
                if self.selection.filenames == names {
                    return false;
                }
                self.selection.filenames = names;
                self.invalidate_loads();
            }
            SelectionAction::ClearSelection => {
                if self.selection.is_empty() {
                    return false;
                }
                self.selection = Selection::default();
                self.invalidate_loads();
            }
            SelectionAction::LoadStarted { generation } => {
                if generation <= self.generation {
                    return false;
                }
                self.generation = generation;
                self.loading = true;
                self.error = None;
            }
            SelectionAction::SingleLoaded { query, file, .. } => {
                self.data = Some(MasterData {
                    schema: file.schema,
                    rows: file.rows,
                });
                self.data_source = DataSource::Single(query.clone());
                self.last_applied = Some(AppliedFilters::Single { query });
                self.loading = false;
                self.error = None;
            }
            SelectionAction::MultiLoaded {
                queries, merged, ..
            } => {
                self.error = merged.failure_message();
                self.data = Some(MasterData {
                    schema: merged.schema,
                    rows: merged.rows,
                });
                self.data_source = DataSource::Multiple(queries.clone());
                self.last_applied = Some(AppliedFilters::Multiple { queries });
                self.loading = false;
            }
            SelectionAction::LoadFailed { error, .. } => {
                self.loading = false;
                self.error = Some(error);
            }
            SelectionAction::UpdateItem { id, updates } => {
                let Some(row) = self
                    .data
                    .as_mut()
                    .and_then(|d| d.rows.iter_mut().find(|r| r.id == id))
                else {
                    return false;
                };
                row.merge(&updates);
            }
            SelectionAction::ClearData => {
                if self.data.is_none()
                    && self.error.is_none()
                    && !self.loading
                    && self.last_applied.is_none()
                {
                    return false;
                }
                self.data = None;
                self.data_source = DataSource::None;
                self.error = None;
                self.last_applied = None;
                self.invalidate_loads();
            }
        }
        true
    }

    /// Apply actions in order; `true` when any of them changed the state.
    pub fn reduce_all(&mut self, actions: impl IntoIterator<Item = SelectionAction>) -> bool {
        actions
            .into_iter()
            .fold(false, |changed, action| self.reduce(action) || changed)
    }

    fn invalidate_loads(&mut self) {
        self.generation += 1;
        self.loading = false;
    }

    pub fn rows(&self) -> &[MasterFileRow] {
        self.data.as_ref().map(|d| d.rows.as_slice()).unwrap_or(&[])
    }

    pub fn row(&self, id: &str) -> Option<&MasterFileRow> {
        self.rows().iter().find(|r| r.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_masterfile::{
        merge_sources, normalize_master_file, MasterFileResponse, RowIdScheme,
    };
    use contracts::shared::ApiError;
    use serde_json::json;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn response(rows: usize) -> MasterFileResponse {
        let dataframe: Vec<Value> = (0..rows)
            .map(|i| json!({"item": format!("Item {}", i), "price": 9.99}))
            .collect();
        serde_json::from_value(json!({
            "columns": {"item": "Item", "price": "Current Price"},
            "dataframe": dataframe,
            "field_roles": {"current_price": "price"},
            "company_name": "Acme",
            "location_name": "Downtown"
        }))
        .unwrap()
    }

    fn selected() -> SelectionState {
        let mut state = SelectionState::default();
        state.reduce_all([
            SelectionAction::SetCompanies(ids(&["1"])),
            SelectionAction::SetLocations(ids(&["10"])),
            SelectionAction::SetFilenames(ids(&["a.xlsx"])),
        ]);
        state
    }

    fn load_single(state: &mut SelectionState, rows: usize) -> u64 {
        let generation = state.next_generation();
        state.reduce(SelectionAction::LoadStarted { generation });
        let query = MasterFileQuery::new("1", "10", "a.xlsx");
        let file = normalize_master_file(&query, response(rows), RowIdScheme::Single).unwrap();
        state.reduce(SelectionAction::SingleLoaded {
            generation,
            query,
            file,
        });
        generation
    }

    #[test]
    fn test_changing_companies_clears_dependents() {
        let mut state = selected();
        assert!(state.reduce(SelectionAction::SetCompanies(ids(&["2"]))));
        assert_eq!(state.selection.companies, ids(&["2"]));
        assert!(state.selection.locations.is_empty());
        assert!(state.selection.filenames.is_empty());
    }

    #[test]
    fn test_changing_locations_clears_filenames() {
        let mut state = selected();
        state.reduce(SelectionAction::SetLocations(ids(&["11"])));
        assert_eq!(state.selection.companies, ids(&["1"]));
        assert!(state.selection.filenames.is_empty());
    }

    #[test]
    fn test_set_locations_is_idempotent() {
        let mut state = selected();
        state.reduce(SelectionAction::SetLocations(vec![]));
        let once = state.clone();
        assert!(!state.reduce(SelectionAction::SetLocations(vec![])));
        assert_eq!(state, once);
    }

    #[test]
    fn test_single_load_stamps_rows_and_records_filters() {
        let mut state = selected();
        load_single(&mut state, 3);

        assert!(!state.loading);
        assert_eq!(state.rows().len(), 3);
        assert_eq!(state.rows()[2].id, "1_10_2");
        assert_eq!(state.rows()[0].meta.company_name, "Acme");
        assert_eq!(
            state.data_source,
            DataSource::Single(MasterFileQuery::new("1", "10", "a.xlsx"))
        );
        assert_eq!(
            state.last_applied,
            Some(AppliedFilters::Single {
                query: MasterFileQuery::new("1", "10", "a.xlsx")
            })
        );
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let mut state = selected();
        let stale = state.next_generation();
        state.reduce(SelectionAction::LoadStarted { generation: stale });

        // The user picks another file while the request is in flight.
        state.reduce(SelectionAction::SetFilenames(ids(&["b.xlsx"])));
        assert!(!state.loading);

        let query = MasterFileQuery::new("1", "10", "a.xlsx");
        let file = normalize_master_file(&query, response(2), RowIdScheme::Single).unwrap();
        let applied = state.reduce(SelectionAction::SingleLoaded {
            generation: stale,
            query,
            file,
        });
        assert!(!applied);
        assert!(state.data.is_none());
    }

    #[test]
    fn test_newer_load_supersedes_older_one() {
        let mut state = selected();
        let first = state.next_generation();
        state.reduce(SelectionAction::LoadStarted { generation: first });
        let second = state.next_generation();
        state.reduce(SelectionAction::LoadStarted { generation: second });

        assert!(!state.reduce(SelectionAction::LoadFailed {
            generation: first,
            error: "late".into(),
        }));
        assert!(state.loading);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_partial_multi_load_keeps_successful_rows() {
        let mut state = selected();
        let generation = state.next_generation();
        state.reduce(SelectionAction::LoadStarted { generation });

        let a = MasterFileQuery::new("1", "10", "a.xlsx");
        let b = MasterFileQuery::new("1", "10", "b.xlsx");
        let merged = merge_sources(vec![
            (a.clone(), Ok(response(10))),
            (
                b.clone(),
                Err(ApiError::Http {
                    status: 404,
                    detail: "Not found".into(),
                }),
            ),
        ])
        .unwrap();
        state.reduce(SelectionAction::MultiLoaded {
            generation,
            queries: vec![a, b],
            merged,
        });

        assert_eq!(state.rows().len(), 10);
        assert_eq!(state.rows()[0].id, "1_10_a.xlsx_0");
        let error = state.error.clone().unwrap();
        assert!(error.starts_with("1 source failed"), "{}", error);
    }

    #[test]
    fn test_failed_load_keeps_previous_rows() {
        let mut state = selected();
        load_single(&mut state, 4);
        let generation = state.next_generation();
        state.reduce(SelectionAction::LoadStarted { generation });
        state.reduce(SelectionAction::LoadFailed {
            generation,
            error: "All 2 sources failed to load".into(),
        });
        assert_eq!(state.rows().len(), 4);
        assert!(state.error.is_some());
    }

    #[test]
    fn test_update_item_merges_cells() {
        let mut state = selected();
        load_single(&mut state, 2);
        let mut updates = Map::new();
        updates.insert("price".into(), json!(12.5));

        assert!(state.reduce(SelectionAction::UpdateItem {
            id: "1_10_1".into(),
            updates: updates.clone(),
        }));
        assert_eq!(state.row("1_10_1").and_then(|r| r.number("price")), Some(12.5));
        assert_eq!(state.row("1_10_0").and_then(|r| r.number("price")), Some(9.99));

        assert!(!state.reduce(SelectionAction::UpdateItem {
            id: "missing".into(),
            updates,
        }));
    }

    #[test]
    fn test_rejected_price_edit_reverts() {
        use crate::domain::a002_masterfile::ui::grid::edit::PendingEdit;

        let mut state = selected();
        load_single(&mut state, 1);
        let row = state.row("1_10_0").cloned().unwrap();
        let edit = PendingEdit::begin(&row, "price", "12.50").unwrap();

        state.reduce(SelectionAction::UpdateItem {
            id: edit.row_id.clone(),
            updates: edit.updates(),
        });
        assert_eq!(state.row("1_10_0").and_then(|r| r.number("price")), Some(12.5));

        state.reduce(SelectionAction::UpdateItem {
            id: edit.row_id.clone(),
            updates: edit.rollback(),
        });
        assert_eq!(state.row("1_10_0").and_then(|r| r.number("price")), Some(9.99));
    }

    #[test]
    fn test_applied_filters_storage_boundary() {
        let filters = AppliedFilters::Multiple {
            queries: vec![
                MasterFileQuery::new("1", "10", "a.xlsx"),
                MasterFileQuery::new("1", "10", "b.xlsx"),
            ],
        };
        let raw = filters.to_storage().unwrap();
        assert!(raw.contains("\"kind\":\"multiple\""));
        assert_eq!(AppliedFilters::from_storage(&raw), Some(filters.clone()));

        let selection = filters.selection();
        assert_eq!(selection.companies, ids(&["1"]));
        assert_eq!(selection.locations, ids(&["10"]));
        assert_eq!(selection.filenames, ids(&["a.xlsx", "b.xlsx"]));

        assert_eq!(AppliedFilters::from_storage("not json"), None);
        assert_eq!(
            AppliedFilters::from_storage(
                r#"{"version":0,"filters":{"kind":"single","query":{"company_id":"1","location_id":"2","filename":"f"}}}"#
            ),
            None
        );
        assert_eq!(
            AppliedFilters::from_storage(r#"{"version":1,"filters":{"kind":"multiple","queries":[]}}"#),
            None
        );
    }

    #[test]
    fn test_clear_data() {
        let mut state = selected();
        load_single(&mut state, 1);
        assert!(state.last_applied.is_some());
        assert!(state.reduce(SelectionAction::ClearData));
        assert!(state.data.is_none());
        assert_eq!(state.data_source, DataSource::None);
        assert!(state.last_applied.is_none());
        assert!(!state.reduce(SelectionAction::ClearData));
    }
}
