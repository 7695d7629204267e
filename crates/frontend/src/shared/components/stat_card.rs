use crate::shared::icons::icon;
use crate::shared::number_format::ValueFormat;
use leptos::prelude::*;

/// KPI tile of the analytics pages.
#[component]
pub fn StatCard(
    #[prop(into)] label: String,
    icon_name: &'static str,
    /// `None` while loading or when no data is applied
    #[prop(into)]
    value: Signal<Option<f64>>,
    format: ValueFormat,
    #[prop(into, optional)] subtitle: MaybeProp<String>,
) -> impl IntoView {
    let formatted = move || match value.get() {
        Some(v) => format.format(v),
        None => "—".to_string(),
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__header">
                <span class="stat-card__icon">{icon(icon_name)}</span>
                <span class="stat-card__label">{label}</span>
            </div>
            <div class="stat-card__value">{formatted}</div>
            {move || subtitle.get().map(|s| view! { <div class="stat-card__subtitle">{s}</div> })}
        </div>
    }
}
