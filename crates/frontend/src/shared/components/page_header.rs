use leptos::prelude::*;

use crate::shared::icons::icon;

/// Page title bar with an icon, an optional scope subtitle and action slots.
#[component]
pub fn PageHeader(
    #[prop(into)] title: String,

    #[prop(optional)] icon_name: Option<&'static str>,

    /// e.g. the selected company and location
    #[prop(optional, into)]
    subtitle: MaybeProp<String>,

    /// Action buttons (pass an empty fragment if not needed)
    children: Children,
) -> impl IntoView {
    view! {
        <div class="page__header">
            <div class="page__header-left">
                {icon_name.map(icon)}
                <div class="page__header-text">
                    <h1 class="page__title">{title}</h1>
                    {move || subtitle.get().map(|s| view! {
                        <div class="page__subtitle">{s}</div>
                    })}
                </div>
            </div>
            <div class="page__header-right">
                {children()}
            </div>
        </div>
    }
}
