//! Sidebar with the collapsible navigation sections and the scope selector.

use crate::layout::global_context::AppGlobalContext;
use crate::layout::left::ScopeSelector;
use crate::routes::routes::{
    PATH_FILES, PATH_MASTER_FILES, PATH_PRODUCT_MIX, PATH_SALES_SPLIT, PATH_STORE_ORDERS,
};
use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::hooks::{use_location, use_navigate};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Section {
    Analytics,
    DataManagement,
}

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    section: Section,
    label: &'static str,
    icon: &'static str,
    items: Vec<(&'static str, &'static str, &'static str)>, // (path, label, icon)
}

fn get_menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            section: Section::Analytics,
            label: "Analytics",
            icon: "bar-chart",
            items: vec![
                (PATH_SALES_SPLIT, "Sales split", "pie-chart"),
                (PATH_PRODUCT_MIX, "Product mix", "bar-chart"),
                (PATH_STORE_ORDERS, "Store orders", "shopping-cart"),
            ],
        },
        MenuGroup {
            section: Section::DataManagement,
            label: "Data management",
            icon: "database",
            items: vec![
                (PATH_MASTER_FILES, "Master files", "database"),
                (PATH_FILES, "Uploaded files", "folder"),
            ],
        },
    ]
}

/// Whether `path` is the current page; `/` only matches itself.
fn is_active(current: &str, path: &str) -> bool {
    if path == "/" {
        return current == "/";
    }
    current == path || current.starts_with(&format!("{}/", path))
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext not found");
    let location = use_location();
    let navigate = use_navigate();

    let section_open = move |section: Section| match section {
        Section::Analytics => ctx.analytics_open,
        Section::DataManagement => ctx.data_open,
    };

    view! {
        <div class="app-sidebar__content">
            <ScopeSelector />
            {get_menu_groups().into_iter().map(|group| {
                let open = section_open(group.section);
                let navigate = navigate.clone();
                view! {
                    <div>
                        <div
                            class="app-sidebar__item"
                            style:padding-left="12px"
                            on:click=move |_| open.update(|o| *o = !*o)
                        >
                            <div class="app-sidebar__item-content">
                                {icon(group.icon)}
                                <span>{group.label}</span>
                            </div>
                            <div
                                class="app-sidebar__chevron"
                                class:app-sidebar__chevron--expanded=move || open.get()
                            >
                                {icon("chevron-right")}
                            </div>
                        </div>

                        <div class="app-sidebar__children" class:hidden=move || !open.get()>
                            {group.items.iter().map(|&(path, label, icon_name)| {
                                let navigate = navigate.clone();
                                view! {
                                    <div
                                        class="app-sidebar__item"
                                        class:app-sidebar__item--active=move || {
                                            location.pathname.with(|p| is_active(p, path))
                                        }
                                        style:padding-left="10px"
                                        on:click=move |_| {
                                            navigate(path, Default::default());
                                            ctx.mobile_drawer_open.set(false);
                                        }
                                    >
                                        <div class="app-sidebar__item-content">
                                            {icon(icon_name)}
                                            <span>{label}</span>
                                        </div>
                                    </div>
                                }
                            }).collect_view()}
                        </div>
                    </div>
                }
            }).collect_view()}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_active() {
        assert!(is_active("/", "/"));
        assert!(!is_active("/sales-split", "/"));
        assert!(is_active("/sales-split", "/sales-split"));
        assert!(is_active("/files/budget", "/files"));
        assert!(!is_active("/filesystem", "/files"));
    }

    #[test]
    fn test_every_page_is_reachable() {
        let paths: Vec<&str> = get_menu_groups()
            .into_iter()
            .flat_map(|g| g.items.into_iter().map(|(path, _, _)| path))
            .collect();
        assert_eq!(paths.len(), 5);
        assert!(paths.contains(&PATH_MASTER_FILES));
        assert!(paths.contains(&PATH_FILES));
    }
}
