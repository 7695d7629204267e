//! Company/location scope shared by the analytics dashboards.
//!
//! Pages start from the sidebar selection and write their own changes back
//! to the selection store, so switching pages keeps the same scope.

use leptos::prelude::*;

use crate::domain::a001_company::use_company_catalog;
use crate::domain::a001_company::state::{company_options, location_options};
use crate::shared::state::{use_selection, Selection};

/// A single company location the analytics endpoints are queried for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scope {
    pub company_id: String,
    pub location_id: String,
}

impl Scope {
    /// `None` until both ids are chosen.
    pub fn from_parts(company_id: &str, location_id: &str) -> Option<Self> {
        if company_id.is_empty() || location_id.is_empty() {
            return None;
        }
        Some(Self {
            company_id: company_id.to_string(),
            location_id: location_id.to_string(),
        })
    }
}

/// First selected company and location, blank where nothing is selected.
pub fn initial_scope(selection: &Selection) -> (String, String) {
    (
        selection.companies.first().cloned().unwrap_or_default(),
        selection.locations.first().cloned().unwrap_or_default(),
    )
}

/// Company and location selects seeded from the selection store.
#[component]
pub fn ScopePicker(company: RwSignal<String>, location: RwSignal<String>) -> impl IntoView {
    let store = use_selection();
    let catalog = use_company_catalog();

    let (company_id, location_id) = store.with_untracked(|s| initial_scope(&s.selection));
    company.set(company_id);
    location.set(location_id);

    let companies = Signal::derive(move || catalog.catalog().with(company_options));
    let locations = Signal::derive(move || {
        let selected = vec![company.get()];
        catalog.catalog().with(|c| location_options(c, &selected))
    });

    let on_company = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        company.set(value.clone());
        location.set(String::new());
        let ids = if value.is_empty() { Vec::new() } else { vec![value] };
        store.set_selected_companies(ids);
    };
    let on_location = move |ev: leptos::ev::Event| {
        let value = event_target_value(&ev);
        location.set(value.clone());
        let ids = if value.is_empty() { Vec::new() } else { vec![value] };
        store.set_selected_locations(ids);
    };

    view! {
        <div class="scope-picker">
            <label class="filter-field">
                <span class="filter-field__label">"Company"</span>
                <select class="filter-field__select" prop:value=move || company.get() on:change=on_company>
                    <option value="">"Select company"</option>
                    {move || companies.get().into_iter().map(|o| view! {
                        <option value=o.value>{o.label}</option>
                    }).collect_view()}
                </select>
            </label>
            <label class="filter-field">
                <span class="filter-field__label">"Location"</span>
                <select
                    class="filter-field__select"
                    prop:value=move || location.get()
                    disabled=move || company.get().is_empty()
                    on:change=on_location
                >
                    <option value="">"Select location"</option>
                    {move || locations.get().into_iter().map(|o| view! {
                        <option value=o.value>{o.label}</option>
                    }).collect_view()}
                </select>
            </label>
        </div>
    }
}
