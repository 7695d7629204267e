//! Reactive container around [`SelectionState`] and the master file loads.

use contracts::domain::a002_masterfile::{
    merge_sources, normalize_master_file, MasterFileQuery, RowIdScheme,
};
use contracts::shared::ApiError;
use futures::future::join_all;
use leptos::prelude::*;
use serde_json::{Map, Value};

use super::persist;
use super::selection::{AppliedFilters, Selection, SelectionAction, SelectionState};
use crate::domain::a002_masterfile::api;

const LAST_APPLIED_KEY: &str = "masterfile_last_applied_v1";

/// Result of a load that reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    Applied { rows: usize, loaded: usize, failed: usize },
    /// A newer load or a scope change arrived first; nothing was written.
    Superseded,
}

#[derive(Clone, Copy)]
pub struct SelectionStore {
    state: RwSignal<SelectionState>,
}

impl SelectionStore {
    pub fn new() -> Self {
        let state = SelectionState {
            last_applied: persist::load_raw(LAST_APPLIED_KEY)
                .and_then(|raw| AppliedFilters::from_storage(&raw)),
            ..Default::default()
        };
        Self {
            state: RwSignal::new(state),
        }
    }

    pub fn dispatch(&self, action: SelectionAction) -> bool {
        let mut changed = false;
        self.state.maybe_update(|s| {
            changed = s.reduce(action);
            changed
        });
        changed
    }

    /// Apply several actions as one transition; subscribers run once.
    pub fn dispatch_batch(&self, actions: Vec<SelectionAction>) -> bool {
        let mut changed = false;
        self.state.maybe_update(|s| {
            changed = s.reduce_all(actions);
            changed
        });
        changed
    }

    pub fn with<R>(&self, f: impl FnOnce(&SelectionState) -> R) -> R {
        self.state.with(f)
    }

    pub fn with_untracked<R>(&self, f: impl FnOnce(&SelectionState) -> R) -> R {
        self.state.with_untracked(f)
    }

    // selectors

    pub fn selection(&self) -> Selection {
        self.state.with(|s| s.selection.clone())
    }

    pub fn selected_companies(&self) -> Vec<String> {
        self.state.with(|s| s.selection.companies.clone())
    }

    pub fn selected_locations(&self) -> Vec<String> {
        self.state.with(|s| s.selection.locations.clone())
    }

    pub fn selected_filenames(&self) -> Vec<String> {
        self.state.with(|s| s.selection.filenames.clone())
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    pub fn error(&self) -> Option<String> {
        self.state.with(|s| s.error.clone())
    }

    // actions

    pub fn set_selected_companies(&self, ids: Vec<String>) -> bool {
        self.dispatch(SelectionAction::SetCompanies(ids))
    }

    pub fn set_selected_locations(&self, ids: Vec<String>) -> bool {
        self.dispatch(SelectionAction::SetLocations(ids))
    }

    pub fn set_selected_filenames(&self, names: Vec<String>) -> bool {
        self.dispatch(SelectionAction::SetFilenames(names))
    }

    pub fn update_item(&self, id: &str, updates: Map<String, Value>) -> bool {
        self.dispatch(SelectionAction::UpdateItem {
            id: id.to_string(),
            updates,
        })
    }

    /// Drop the loaded rows and forget them as the last applied filters.
    pub fn clear_data(&self) {
        self.dispatch(SelectionAction::ClearData);
        persist::remove(LAST_APPLIED_KEY);
    }

    /// Put the last applied filters back into an empty selection.
    pub fn restore_last_applied(&self) -> Option<AppliedFilters> {
        let (empty, last) = self
            .state
            .with_untracked(|s| (s.selection.is_empty(), s.last_applied.clone()));
        let filters = last.filter(|_| empty)?;
        let selection = filters.selection();
        log::debug!("Restoring last applied filters: {:?}", selection);
        self.dispatch_batch(vec![
            SelectionAction::SetCompanies(selection.companies),
            SelectionAction::SetLocations(selection.locations),
            SelectionAction::SetFilenames(selection.filenames),
        ]);
        Some(filters)
    }

    fn begin_load(&self) -> u64 {
        let generation = self.state.with_untracked(SelectionState::next_generation);
        self.dispatch(SelectionAction::LoadStarted { generation });
        generation
    }

    fn persist_last_applied(&self) {
        let Some(filters) = self.state.with_untracked(|s| s.last_applied.clone()) else {
            return;
        };
        match filters.to_storage() {
            Ok(raw) => persist::save_raw(LAST_APPLIED_KEY, &raw),
            Err(e) => log::warn!("Failed to encode last applied filters: {}", e),
        }
    }

    /// Load one master file into the grid.
    pub async fn load_master_file_data(
        &self,
        query: MasterFileQuery,
    ) -> Result<LoadOutcome, ApiError> {
        let generation = self.begin_load();
        let result = api::fetch_master_file(&query)
            .await
            .and_then(|response| normalize_master_file(&query, response, RowIdScheme::Single));

        match result {
            Ok(file) => {
                let rows = file.rows.len();
                let applied = self.dispatch(SelectionAction::SingleLoaded {
                    generation,
                    query,
                    file,
                });
                if !applied {
                    return Ok(LoadOutcome::Superseded);
                }
                self.persist_last_applied();
                Ok(LoadOutcome::Applied {
                    rows,
                    loaded: 1,
                    failed: 0,
                })
            }
            Err(error) => {
                self.dispatch(SelectionAction::LoadFailed {
                    generation,
                    error: error.to_string(),
                });
                Err(error)
            }
        }
    }

    /// Load several master files concurrently and concatenate them in
    /// request order.
    pub async fn load_multiple_master_file_data(
        &self,
        queries: Vec<MasterFileQuery>,
    ) -> Result<LoadOutcome, ApiError> {
        let generation = self.begin_load();
        let responses = join_all(queries.iter().map(api::fetch_master_file)).await;
        let results = queries.iter().cloned().zip(responses).collect();

        match merge_sources(results) {
            Ok(merged) => {
                let outcome = LoadOutcome::Applied {
                    rows: merged.rows.len(),
                    loaded: merged.succeeded(),
                    failed: merged.failures.len(),
                };
                for failure in &merged.failures {
                    log::warn!(
                        "Master file {} failed to load: {}",
                        failure.query.filename,
                        failure.error
                    );
                }
                let applied = self.dispatch(SelectionAction::MultiLoaded {
                    generation,
                    queries,
                    merged,
                });
                if !applied {
                    return Ok(LoadOutcome::Superseded);
                }
                self.persist_last_applied();
                Ok(outcome)
            }
            Err(error) => {
                self.dispatch(SelectionAction::LoadFailed {
                    generation,
                    error: error.to_string(),
                });
                Err(error)
            }
        }
    }
}

impl Default for SelectionStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_selection() -> SelectionStore {
    use_context::<SelectionStore>().expect("SelectionStore context not found")
}
