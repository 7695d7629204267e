//! Top bar: drawer toggles, title and sign-out.

use crate::layout::global_context::AppGlobalContext;
use crate::shared::http::sign_out;
use crate::shared::icons::icon;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx =
        leptos::context::use_context::<AppGlobalContext>().expect("AppGlobalContext not found");

    let is_drawer_open = move || ctx.drawer_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn top-header__icon-btn--mobile"
                    on:click=move |_| ctx.toggle_mobile_drawer()
                    title="Menu"
                >
                    {icon("menu")}
                </button>
                <button
                    class="top-header__icon-btn top-header__icon-btn--desktop"
                    on:click=move |_| ctx.toggle_drawer()
                    title=move || if is_drawer_open() { "Hide navigation" } else { "Show navigation" }
                >
                    {move || if is_drawer_open() { icon("chevron-left") } else { icon("menu") }}
                </button>
                <span class="top-header__title">"Restaurant BI"</span>
            </div>

            <div class="top-header__actions">
                <button class="top-header__icon-btn" on:click=move |_| sign_out() title="Sign out">
                    {icon("log-out")}
                </button>
            </div>
        </div>
    }
}
