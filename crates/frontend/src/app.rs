use crate::domain::a001_company::CompanyCatalogStore;
use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::components::alert::{AlertHost, AlertService};
use crate::shared::state::{DateRangeStore, SelectionStore};
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Layout state for the shell.
    provide_context(AppGlobalContext::new());

    // Session-wide stores shared by the sidebar and the pages.
    provide_context(SelectionStore::new());
    provide_context(DateRangeStore::new());
    provide_context(CompanyCatalogStore::new());
    provide_context(AlertService::new());

    view! {
        <AlertHost />
        <AppRoutes />
    }
}
