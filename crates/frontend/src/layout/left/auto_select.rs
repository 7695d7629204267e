//! First-visit scope selection for the sidebar.

use contracts::domain::a001_company::CompanyCatalog;

use crate::shared::state::{Selection, SelectionAction};

/// Tracks whether the sidebar may still pick a scope on the user's behalf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScopeSelectorState {
    pub initialized: bool,
    pub user_has_interacted: bool,
}

impl ScopeSelectorState {
    /// Any manual change turns auto-selection off for good.
    pub fn mark_interacted(&mut self) {
        self.user_has_interacted = true;
    }

    /// Actions selecting the first company and its first location, or nothing
    /// when auto-selection no longer applies. Marks the state initialized.
    pub fn auto_select(&mut self, selection: &Selection, catalog: &CompanyCatalog) -> Vec<SelectionAction> {
        if self.initialized || self.user_has_interacted || !selection.is_empty() {
            self.initialized = true;
            return Vec::new();
        }
        let Some((company, location)) = catalog.first_scope() else {
            return Vec::new();
        };
        self.initialized = true;
        let mut actions = vec![SelectionAction::SetCompanies(vec![company.company_id.clone()])];
        if let Some(location) = location {
            actions.push(SelectionAction::SetLocations(vec![location.location_id.clone()]));
        }
        actions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_company::Company;
    use crate::shared::state::SelectionState;

    fn catalog() -> CompanyCatalog {
        let json = r#"[
            {"company_id": "A", "company_name": "Company A", "locations": [
                {"location_id": "L1", "location_name": "One"},
                {"location_id": "L2", "location_name": "Two"}
            ]},
            {"company_id": "B", "company_name": "Company B", "locations": [
                {"location_id": "L3", "location_name": "Three"}
            ]}
        ]"#;
        let companies: Vec<Company> = serde_json::from_str(json).unwrap();
        CompanyCatalog::new(companies)
    }

    #[test]
    fn test_first_visit_selects_first_company_and_location() {
        let mut selector = ScopeSelectorState::default();
        let mut state = SelectionState::default();
        let actions = selector.auto_select(&state.selection, &catalog());
        assert!(state.reduce_all(actions));
        assert_eq!(state.selection.companies, vec!["A"]);
        assert_eq!(state.selection.locations, vec!["L1"]);
        assert!(selector.initialized);

        // Only once.
        assert!(selector.auto_select(&Selection::default(), &catalog()).is_empty());
    }

    #[test]
    fn test_switching_company_after_auto_select_leaves_location_empty() {
        let mut selector = ScopeSelectorState::default();
        let mut state = SelectionState::default();
        let actions = selector.auto_select(&state.selection, &catalog());
        state.reduce_all(actions);
        assert_eq!(state.selection.locations, vec!["L1"]);

        selector.mark_interacted();
        assert!(state.reduce(SelectionAction::SetCompanies(vec!["B".into()])));
        assert_eq!(state.selection.companies, vec!["B"]);
        assert!(state.selection.locations.is_empty());

        // L3 is never picked for the user.
        assert!(selector.auto_select(&state.selection, &catalog()).is_empty());
        state.reduce(SelectionAction::SetCompanies(Vec::new()));
        assert!(selector.auto_select(&state.selection, &catalog()).is_empty());
        assert!(state.selection.locations.is_empty());
    }

    #[test]
    fn test_interaction_disables_auto_select() {
        let mut selector = ScopeSelectorState::default();
        selector.mark_interacted();
        assert!(selector.auto_select(&Selection::default(), &catalog()).is_empty());
    }

    #[test]
    fn test_existing_selection_is_kept() {
        let mut selector = ScopeSelectorState::default();
        let selection = Selection {
            companies: vec!["B".into()],
            locations: vec!["L3".into()],
            filenames: vec![],
        };
        assert!(selector.auto_select(&selection, &catalog()).is_empty());
        assert!(selector.initialized);
    }

    #[test]
    fn test_empty_catalog_waits() {
        let mut selector = ScopeSelectorState::default();
        assert!(selector
            .auto_select(&Selection::default(), &CompanyCatalog::default())
            .is_empty());
        assert!(!selector.initialized);
    }
}
