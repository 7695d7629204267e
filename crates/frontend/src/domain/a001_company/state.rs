//! Session-wide company/location catalog, fetched once.

use contracts::domain::a001_company::CompanyCatalog;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api::fetch_company_catalog;
use crate::shared::components::multi_select::SelectOption;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LoadState {
    Idle,
    Loading,
    Loaded,
}

#[derive(Clone, Copy)]
pub struct CompanyCatalogStore {
    catalog: RwSignal<CompanyCatalog>,
    state: RwSignal<LoadState>,
    error: RwSignal<Option<String>>,
}

impl CompanyCatalogStore {
    pub fn new() -> Self {
        Self {
            catalog: RwSignal::new(CompanyCatalog::default()),
            state: RwSignal::new(LoadState::Idle),
            error: RwSignal::new(None),
        }
    }

    pub fn catalog(&self) -> Signal<CompanyCatalog> {
        self.catalog.into()
    }

    pub fn is_loading(&self) -> bool {
        self.state.get() == LoadState::Loading
    }

    pub fn error(&self) -> Option<String> {
        self.error.get()
    }

    /// Fetch the catalog unless it is loaded or already in flight.
    /// `on_loaded` runs once after a successful fetch.
    pub fn ensure_loaded(&self, on_loaded: impl FnOnce(&CompanyCatalog) + 'static) {
        if self.state.get_untracked() != LoadState::Idle {
            return;
        }
        self.state.set(LoadState::Loading);
        let this = *self;
        spawn_local(async move {
            match fetch_company_catalog().await {
                Ok(catalog) => {
                    on_loaded(&catalog);
                    this.catalog.set(catalog);
                    this.error.set(None);
                    this.state.set(LoadState::Loaded);
                }
                Err(e) => {
                    log::warn!("Failed to load companies: {}", e);
                    this.error.set(Some(e.to_string()));
                    // Allow a later mount to retry.
                    this.state.set(LoadState::Idle);
                }
            }
        });
    }

    pub fn company_options(&self) -> Vec<SelectOption> {
        self.catalog.with(|c| company_options(c))
    }

    pub fn location_options(&self, company_ids: &[String]) -> Vec<SelectOption> {
        self.catalog.with(|c| location_options(c, company_ids))
    }
}

impl Default for CompanyCatalogStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_company_catalog() -> CompanyCatalogStore {
    use_context::<CompanyCatalogStore>().expect("CompanyCatalogStore context not found")
}

pub fn company_options(catalog: &CompanyCatalog) -> Vec<SelectOption> {
    catalog
        .companies()
        .iter()
        .map(|c| SelectOption::new(c.company_id.clone(), c.company_name.clone()))
        .collect()
}

/// Locations of the selected companies; the company name is appended when
/// more than one company is selected.
pub fn location_options(catalog: &CompanyCatalog, company_ids: &[String]) -> Vec<SelectOption> {
    let qualify = company_ids.len() > 1;
    catalog
        .locations_of(company_ids)
        .into_iter()
        .map(|(company, location)| {
            let label = if qualify {
                format!("{} ({})", location.location_name, company.company_name)
            } else {
                location.location_name.clone()
            };
            SelectOption::new(location.location_id.clone(), label)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_company::{Company, Location};

    fn catalog() -> CompanyCatalog {
        CompanyCatalog::new(vec![
            Company {
                company_id: "A".into(),
                company_name: "Alpha".into(),
                locations: vec![
                    Location { location_id: "L1".into(), location_name: "Downtown".into() },
                    Location { location_id: "L2".into(), location_name: "Airport".into() },
                ],
            },
            Company {
                company_id: "B".into(),
                company_name: "Beta".into(),
                locations: vec![Location { location_id: "L3".into(), location_name: "Mall".into() }],
            },
        ])
    }

    #[test]
    fn test_location_options_follow_selected_companies() {
        let catalog = catalog();
        let only_b = location_options(&catalog, &["B".to_string()]);
        assert_eq!(only_b, vec![SelectOption::new("L3", "Mall")]);

        let both = location_options(&catalog, &["A".to_string(), "B".to_string()]);
        assert_eq!(both.len(), 3);
        assert_eq!(both[0].label, "Downtown (Alpha)");

        assert!(location_options(&catalog, &[]).is_empty());
    }

    #[test]
    fn test_company_options() {
        let options = company_options(&catalog());
        assert_eq!(options[1], SelectOption::new("B", "Beta"));
    }
}
