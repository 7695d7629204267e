use leptos::prelude::*;

use super::auto_select::ScopeSelectorState;
use crate::domain::a001_company::use_company_catalog;
use crate::shared::components::multi_select::MultiSelect;
use crate::shared::state::use_selection;

/// Company and location pickers bound to the selection store.
#[component]
pub fn ScopeSelector() -> impl IntoView {
    let store = use_selection();
    let catalog = use_company_catalog();
    let selector = StoredValue::new(ScopeSelectorState::default());

    catalog.ensure_loaded(move |loaded| {
        let actions = store.with_untracked(|s| {
            let mut state = selector.get_value();
            let actions = state.auto_select(&s.selection, loaded);
            selector.set_value(state);
            actions
        });
        if !actions.is_empty() {
            log::debug!("Auto-selecting the first company location");
            store.dispatch_batch(actions);
        }
    });

    let companies = Signal::derive(move || catalog.company_options());
    let locations = Signal::derive(move || catalog.location_options(&store.selected_companies()));

    let on_companies = Callback::new(move |ids: Vec<String>| {
        selector.update_value(ScopeSelectorState::mark_interacted);
        store.set_selected_companies(ids);
    });
    let on_locations = Callback::new(move |ids: Vec<String>| {
        selector.update_value(ScopeSelectorState::mark_interacted);
        store.set_selected_locations(ids);
    });

    view! {
        <div class="scope-selector">
            <MultiSelect
                label="Companies"
                options=companies
                selected=Signal::derive(move || store.selected_companies())
                on_change=on_companies
                disabled=Signal::derive(move || catalog.is_loading())
                placeholder="All companies"
            />
            <MultiSelect
                label="Locations"
                options=locations
                selected=Signal::derive(move || store.selected_locations())
                on_change=on_locations
                disabled=Signal::derive(move || store.selected_companies().is_empty())
                placeholder="All locations"
            />
            {move || catalog.error().map(|e| view! {
                <div class="scope-selector__error">{e}</div>
            })}
        </div>
    }
}
