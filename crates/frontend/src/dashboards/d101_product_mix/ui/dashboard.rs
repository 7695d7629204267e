use contracts::dashboards::d101_product_mix::ProductMixTables;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d101_product_mix::api;
use crate::dashboards::d101_product_mix::model::{
    category_sales_bars, period_labels, period_sales, request, share_bars, TOP_ITEMS,
};
use crate::dashboards::scope::{Scope, ScopePicker};
use crate::shared::charts::{HorizontalBarChart, TrendChart};
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::StatCard;
use crate::shared::icons::icon;
use crate::shared::number_format::{format_currency, format_int, ValueFormat};
use crate::shared::state::{use_date_range, LoadSequence};

#[component]
pub fn ProductMixDashboard() -> impl IntoView {
    let date_range = use_date_range();

    let company = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let range_error = RwSignal::new(None::<String>);

    let (data, set_data) = signal(None::<ProductMixTables>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let sequence = StoredValue::new(LoadSequence::default());

    let scope = Memo::new(move |_| Scope::from_parts(&company.get(), &location.get()));

    let apply = move |_| {
        let Some(scope) = scope.get_untracked() else {
            return;
        };
        let req = request(&scope, date_range.get_untracked());
        let mut next = sequence.get_value();
        let token = next.begin();
        sequence.set_value(next);
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = api::fetch_product_mix(&req).await;
            if !sequence.get_value().is_current(token) {
                log::warn!("Dropping stale product mix for {}/{}", req.company_id, req.location_id);
                return;
            }
            match result {
                Ok(tables) => set_data.set(Some(tables)),
                Err(e) => {
                    log::warn!("Product mix request failed: {}", e);
                    set_data.set(None);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    let tables = move || data.get().unwrap_or_default();
    let total_sales = Signal::derive(move || data.with(|d| d.as_ref().map(ProductMixTables::total_net_sales)));
    let category_count = Signal::derive(move || data.with(|d| d.as_ref().map(|t| t.categories.len() as f64)));
    let item_count = Signal::derive(move || data.with(|d| d.as_ref().map(|t| t.items.len() as f64)));

    let top_items = move || {
        data.with(|d| d.as_ref().map(|t| t.top_items(TOP_ITEMS)).unwrap_or_default())
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                view! {
                    <tr class="table__row">
                        <td class="table__cell">{i + 1}</td>
                        <td class="table__cell">{item.item_name}</td>
                        <td class="table__cell">{item.category}</td>
                        <td class="table__cell table__cell--right">{format_int(item.quantity)}</td>
                        <td class="table__cell table__cell--right">{format_currency(item.net_sales)}</td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <div class="page">
            <PageHeader
                title="Product mix"
                icon_name="bar-chart"
                subtitle=Signal::derive(move || date_range.range().get().label())
            >
                <ScopePicker company=company location=location />
                <DateRangePicker
                    date_from=Signal::derive(move || date_range.range().get().start_input())
                    date_to=Signal::derive(move || date_range.range().get().end_input())
                    on_change=Callback::new(move |(from, to): (String, String)| {
                        range_error.set(date_range.set_inputs(&from, &to).err());
                    })
                    error=Signal::derive(move || range_error.get())
                />
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || {
                        scope.with(Option::is_none) || range_error.with(Option::is_some) || loading.get()
                    })
                    loading=loading
                    on_click=apply
                >
                    "Apply"
                </Button>
            </PageHeader>

            {move || error.get().map(|e| view! {
                <div class="warning-box">{icon("alert-circle")}<span class="warning-box__text">{e}</span></div>
            })}

            <Show
                when=move || data.with(Option::is_some)
                fallback=|| view! {
                    <div class="empty-state">
                        {icon("bar-chart")}
                        <p>"Choose a location and press Apply."</p>
                    </div>
                }
            >
                <div class="stat-grid">
                    <StatCard label="Net sales" icon_name="trending-up" value=total_sales format=ValueFormat::Currency />
                    <StatCard label="Categories" icon_name="folder" value=category_count format=ValueFormat::Integer />
                    <StatCard label="Items sold" icon_name="shopping-cart" value=item_count format=ValueFormat::Integer />
                </div>
                <div class="chart-grid">
                    <HorizontalBarChart
                        title="Share of net sales by category"
                        data=Signal::derive(move || share_bars(&tables()))
                        format=ValueFormat::Percent
                    />
                    <HorizontalBarChart
                        title="Net sales by category"
                        data=Signal::derive(move || category_sales_bars(&tables()))
                        format=ValueFormat::Currency
                    />
                </div>
                <TrendChart
                    title="Net sales per period"
                    labels=Signal::derive(move || period_labels(&tables()))
                    values=Signal::derive(move || period_sales(&tables()))
                    series_name="Net sales"
                    format=ValueFormat::Currency
                />
                <h3 class="section-title">"Top items"</h3>
                <div class="table">
                    <table class="table__data table--striped">
                        <thead class="table__head">
                            <tr>
                                <th class="table__header-cell">"#"</th>
                                <th class="table__header-cell">"Item"</th>
                                <th class="table__header-cell">"Category"</th>
                                <th class="table__header-cell table__header-cell--right">"Quantity"</th>
                                <th class="table__header-cell table__header-cell--right">"Net sales"</th>
                            </tr>
                        </thead>
                        <tbody>{top_items}</tbody>
                    </table>
                </div>
            </Show>
        </div>
    }
}
