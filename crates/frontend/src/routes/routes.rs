use crate::dashboards::{ProductMixDashboard, SalesSplitPage, StoreOrdersDashboard};
use crate::domain::a002_masterfile::ui::MasterFileGrid;
use crate::layout::Shell;
use crate::shared::http::sign_out;
use crate::shared::icons::icon;
use crate::system::auth::storage::get_access_token;
use crate::system::sys_files::FilesPage;
use leptos::prelude::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;

pub const PATH_SALES_SPLIT: &str = "/sales-split";
pub const PATH_PRODUCT_MIX: &str = "/product-mix";
pub const PATH_STORE_ORDERS: &str = "/store-orders";
pub const PATH_MASTER_FILES: &str = "/master-files";
pub const PATH_FILES: &str = "/files";

#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="page">
            <div class="empty-state">
                {icon("alert-circle")}
                <p>"Page not found."</p>
            </div>
        </div>
    }
}

#[component]
fn MainLayout() -> impl IntoView {
    view! {
        <Router>
            <Shell>
                <Routes fallback=|| view! { <NotFound /> }>
                    <Route path=path!("/") view=SalesSplitPage />
                    <Route path=path!("/sales-split") view=SalesSplitPage />
                    <Route path=path!("/product-mix") view=ProductMixDashboard />
                    <Route path=path!("/store-orders") view=StoreOrdersDashboard />
                    <Route path=path!("/master-files") view=MasterFileGrid />
                    <Route path=path!("/files") view=FilesPage />
                </Routes>
            </Shell>
        </Router>
    }
}

/// The login page lives outside this app; without a token the browser goes there.
#[component]
pub fn AppRoutes() -> impl IntoView {
    let has_token = get_access_token().is_some();
    if !has_token {
        log::info!("No access token, redirecting to login");
        sign_out();
    }

    view! {
        <Show
            when=move || has_token
            fallback=|| view! { <div class="page__loading">"Redirecting to sign in..."</div> }
        >
            <MainLayout />
        </Show>
    }
}
