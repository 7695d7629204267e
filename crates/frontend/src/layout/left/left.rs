use crate::layout::global_context::AppGlobalContext;
use leptos::prelude::*;

#[component]
pub fn Left(children: Children) -> impl IntoView {
    let ctx = leptos::context::use_context::<AppGlobalContext>()
        .expect("AppGlobalContext context not found");

    view! {
        <div
            data-zone="left"
            class="left"
            class:hidden=move || !ctx.drawer_open.get()
            class:left--mobile-open=move || ctx.mobile_drawer_open.get()
        >
            {children()}
        </div>
        <div
            class="left__backdrop"
            class:hidden=move || !ctx.mobile_drawer_open.get()
            on:click=move |_| ctx.mobile_drawer_open.set(false)
        ></div>
    }
}
