use leptos::prelude::*;

use super::state::{GridFilters, PriceRange};
use crate::shared::components::filter_panel::FilterTag;
use crate::shared::number_format::format_currency;

fn parse_input(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok()
}

/// Write the price range into the filters the rows are matched against.
fn sync_price_filter(filters: RwSignal<GridFilters>, range: PriceRange) {
    let (min, max) = range.as_filter();
    filters.update(|f| {
        f.price_min = min;
        f.price_max = max;
    });
}

/// Price, unit and category filters.
///
/// The number inputs and the slider edit one [`PriceRange`], so either
/// control reflects changes made through the other.
#[component]
pub fn SecondaryFilters(
    filters: RwSignal<GridFilters>,
    price_range: RwSignal<Option<PriceRange>>,
    #[prop(into)] unit_options: Signal<Vec<String>>,
    #[prop(into)] category_options: Signal<Vec<String>>,
) -> impl IntoView {
    let set_min = move |value: f64| {
        price_range.update(|r| {
            if let Some(r) = r {
                r.set_min(value);
            }
        });
        if let Some(range) = price_range.get_untracked() {
            sync_price_filter(filters, range);
        }
    };
    let set_max = move |value: f64| {
        price_range.update(|r| {
            if let Some(r) = r {
                r.set_max(value);
            }
        });
        if let Some(range) = price_range.get_untracked() {
            sync_price_filter(filters, range);
        }
    };

    // Structure depends on the bounds only, so dragging a thumb does not
    // rebuild the inputs.
    let bounds = Memo::new(move |_| price_range.with(|r| r.map(|r| (r.bounds, r.step()))));
    let current_min = move || price_range.with(|r| r.map(|r| r.min.to_string()).unwrap_or_default());
    let current_max = move || price_range.with(|r| r.map(|r| r.max.to_string()).unwrap_or_default());

    let price_controls = move || {
        bounds.get().map(|((lo, hi), step)| {
            let (lo, hi, step) = (lo.to_string(), hi.to_string(), step.to_string());
            view! {
                <div class="grid-filters__field grid-filters__field--price">
                    <label class="grid-filters__label">"Price"</label>
                    <div class="grid-filters__price-inputs">
                        <input
                            type="number"
                            class="grid-filters__number"
                            min=lo.clone()
                            max=hi.clone()
                            step=step.clone()
                            prop:value=current_min
                            on:change=move |ev| {
                                if let Some(v) = parse_input(&event_target_value(&ev)) {
                                    set_min(v);
                                }
                            }
                        />
                        <span>"–"</span>
                        <input
                            type="number"
                            class="grid-filters__number"
                            min=lo.clone()
                            max=hi.clone()
                            step=step.clone()
                            prop:value=current_max
                            on:change=move |ev| {
                                if let Some(v) = parse_input(&event_target_value(&ev)) {
                                    set_max(v);
                                }
                            }
                        />
                    </div>
                    <div class="grid-filters__slider">
                        <input
                            type="range"
                            min=lo.clone()
                            max=hi.clone()
                            step=step.clone()
                            prop:value=current_min
                            on:input=move |ev| {
                                if let Some(v) = parse_input(&event_target_value(&ev)) {
                                    set_min(v);
                                }
                            }
                        />
                        <input
                            type="range"
                            min=lo
                            max=hi
                            step=step
                            prop:value=current_max
                            on:input=move |ev| {
                                if let Some(v) = parse_input(&event_target_value(&ev)) {
                                    set_max(v);
                                }
                            }
                        />
                    </div>
                    <div class="grid-filters__hint">
                        {move || price_range.get().map(|r| format!("{} – {}", format_currency(r.min), format_currency(r.max)))}
                    </div>
                </div>
            }
        })
    };

    let choice = move |label: &'static str,
                       options: Signal<Vec<String>>,
                       current: Signal<Option<String>>,
                       apply: fn(&mut GridFilters, Option<String>)| {
        view! {
            <div class="grid-filters__field">
                <label class="grid-filters__label">{label}</label>
                <select
                    class="grid-filters__select"
                    prop:value=move || current.get().unwrap_or_default()
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        let value = (!value.is_empty()).then_some(value);
                        filters.update(|f| apply(f, value));
                    }
                >
                    <option value="">"All"</option>
                    {move || options.get().into_iter().map(|o| {
                        view! { <option value=o.clone()>{o.clone()}</option> }
                    }).collect_view()}
                </select>
            </div>
        }
    };

    let unit = Signal::derive(move || filters.with(|f| f.unit.clone()));
    let category = Signal::derive(move || filters.with(|f| f.category.clone()));

    view! {
        <div class="grid-filters">
            {price_controls}
            {choice("Unit", unit_options, unit, |f, v| f.unit = v)}
            {choice("Category", category_options, category, |f, v| f.category = v)}
        </div>
    }
}

/// Chips for the active filters, each removable on its own.
#[component]
pub fn ActiveFilterTags(
    filters: RwSignal<GridFilters>,
    price_range: RwSignal<Option<PriceRange>>,
) -> impl IntoView {
    let reset_price = move || {
        price_range.update(|r| {
            if let Some(r) = r {
                *r = PriceRange::new(r.bounds);
            }
        });
        filters.update(|f| {
            f.price_min = None;
            f.price_max = None;
        });
    };

    move || {
        let f = filters.get();
        let mut tags = Vec::new();
        if !f.search.trim().is_empty() {
            tags.push(view! {
                <FilterTag
                    label=format!("Search: {}", f.search.trim())
                    on_remove=Callback::new(move |_| filters.update(|f| f.search.clear()))
                />
            }.into_any());
        }
        if f.price_min.is_some() || f.price_max.is_some() {
            let label = format!(
                "Price: {} – {}",
                f.price_min.map(format_currency).unwrap_or_default(),
                f.price_max.map(format_currency).unwrap_or_default()
            );
            tags.push(view! { <FilterTag label=label on_remove=Callback::new(move |_| reset_price()) /> }.into_any());
        }
        if let Some(unit) = f.unit.clone() {
            tags.push(view! {
                <FilterTag
                    label=format!("Unit: {}", unit)
                    on_remove=Callback::new(move |_| filters.update(|f| f.unit = None))
                />
            }.into_any());
        }
        if let Some(category) = f.category.clone() {
            tags.push(view! {
                <FilterTag
                    label=format!("Category: {}", category)
                    on_remove=Callback::new(move |_| filters.update(|f| f.category = None))
                />
            }.into_any());
        }
        tags
    }
}
