use contracts::dashboards::d100_sales_split::SalesSplitTables;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d100_sales_split::api;
use crate::dashboards::d100_sales_split::model::{
    channel_series, filter_request, grand_totals, overall_ticket, period_labels, third_party_ratio,
    ticket_labels, SalesTab, ViewMode, ALL,
};
use crate::shared::charts::{BarChart, PercentageChart, StackedBarChart, TrendChart};
use crate::shared::components::alert::use_alerts;
use crate::shared::components::page_header::PageHeader;
use crate::shared::file_utils::{is_spreadsheet, read_spreadsheet, selected_file};
use crate::shared::icons::icon;
use crate::shared::number_format::{format_currency, ValueFormat};

/// Upload a sales export and explore its channel split.
#[component]
pub fn SalesSplitPage() -> impl IntoView {
    let alerts = use_alerts();

    let (tables, set_tables) = signal(None::<SalesSplitTables>);
    let (file_name, set_file_name) = signal(None::<String>);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);

    // Selects; the option lists come from the first upload so they survive filtering.
    let location = RwSignal::new(ALL.to_string());
    let date_range = RwSignal::new(ALL.to_string());
    let location_choices = RwSignal::new(Vec::<String>::new());
    let range_choices = RwSignal::new(Vec::<String>::new());

    let view_mode = RwSignal::new(ViewMode::Tabbed);
    let active_tab = RwSignal::new(SalesTab::Sales);

    let on_file = move |ev: leptos::ev::Event| {
        let Some(file) = selected_file(&ev) else {
            return;
        };
        if !is_spreadsheet(&file.name()) {
            set_error.set(Some("Choose an .xlsx, .xls or .csv file".to_string()));
            return;
        }
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            let result = match read_spreadsheet(file).await {
                Ok(encoded) => api::upload_sales_file(&encoded).await.map(|t| (encoded.name, t)),
                Err(e) => Err(e),
            };
            match result {
                Ok((name, data)) => {
                    log::debug!("Sales file {} uploaded: {} periods", name, data.weekly_sales.len());
                    location.set(ALL.to_string());
                    date_range.set(ALL.to_string());
                    location_choices.set(data.locations.clone());
                    range_choices.set(data.date_ranges.clone());
                    alerts.success(format!("{} processed", name));
                    set_file_name.set(Some(name));
                    set_tables.set(Some(data));
                }
                Err(e) => {
                    log::warn!("Sales upload failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    let apply_filters = move || {
        let Some(name) = file_name.get_untracked() else {
            return;
        };
        let request = filter_request(&name, &location.get_untracked(), &date_range.get_untracked());
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::filter_sales(&request).await {
                Ok(data) => set_tables.set(Some(data)),
                Err(e) => {
                    log::warn!("Sales filter failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    let weekly = move || tables.with(|t| t.as_ref().map(|t| t.weekly_sales.clone()).unwrap_or_default());
    let orders = move || tables.with(|t| t.as_ref().map(|t| t.weekly_orders.clone()).unwrap_or_default());
    let tickets = move || tables.with(|t| t.as_ref().map(|t| t.average_ticket.clone()).unwrap_or_default());

    let sales_chart = move || {
        view! {
            <StackedBarChart
                title="Sales by channel"
                labels=Signal::derive(move || period_labels(&weekly()))
                series=Signal::derive(move || channel_series(&weekly()))
                format=ValueFormat::Currency
            />
        }
    };
    let orders_chart = move || {
        view! {
            <StackedBarChart
                title="Orders by channel"
                labels=Signal::derive(move || period_labels(&orders()))
                series=Signal::derive(move || channel_series(&orders()))
                format=ValueFormat::Integer
            />
        }
    };
    let share_chart = move || {
        view! {
            <PercentageChart
                title="Channel share of grand total"
                labels=Signal::derive(move || period_labels(&weekly()))
                series=Signal::derive(move || channel_series(&weekly()))
                denominators=Signal::derive(move || grand_totals(&weekly()))
            />
        }
    };
    let third_party_chart = move || {
        view! {
            <BarChart
                title="Third-party sales as % of in-house"
                data=Signal::derive(move || third_party_ratio(&weekly()))
                format=ValueFormat::Percent
            />
        }
    };
    let ticket_chart = move || {
        view! {
            <TrendChart
                title="Average ticket"
                labels=Signal::derive(move || ticket_labels(&tickets()))
                values=Signal::derive(move || overall_ticket(&tickets()))
                series_name="Overall"
                format=ValueFormat::Currency
            />
        }
    };

    let chart_for = move |tab: SalesTab| match tab {
        SalesTab::Sales => sales_chart().into_any(),
        SalesTab::Orders => orders_chart().into_any(),
        SalesTab::Share => share_chart().into_any(),
        SalesTab::ThirdParty => third_party_chart().into_any(),
        SalesTab::Ticket => ticket_chart().into_any(),
    };

    let charts = move || match view_mode.get() {
        ViewMode::Tabbed => view! {
            <div class="tabs">
                <div class="tabs__bar">
                    {SalesTab::ALL.into_iter().map(|tab| view! {
                        <button
                            class="tabs__tab"
                            class:tabs__tab--active=move || active_tab.get() == tab
                            on:click=move |_| active_tab.set(tab)
                        >
                            {tab.label()}
                        </button>
                    }).collect_view()}
                </div>
                <div class="tabs__panel">{move || chart_for(active_tab.get())}</div>
            </div>
        }
        .into_any(),
        ViewMode::Stacked => view! {
            <div class="chart-stack">
                {SalesTab::ALL.into_iter().map(chart_for).collect_view()}
            </div>
        }
        .into_any(),
    };

    let location_table = move || {
        let rows = tables.with(|t| t.as_ref().map(|t| t.location_totals.clone()).unwrap_or_default());
        (!rows.is_empty()).then(|| view! {
            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Location"</th>
                            <th class="table__header-cell table__header-cell--right">"In-House"</th>
                            <th class="table__header-cell table__header-cell--right">"Third Party"</th>
                            <th class="table__header-cell table__header-cell--right">"Grand Total"</th>
                        </tr>
                    </thead>
                    <tbody>
                        {rows.into_iter().map(|r| view! {
                            <tr class="table__row">
                                <td class="table__cell">{r.location}</td>
                                <td class="table__cell table__cell--right">{format_currency(r.in_house)}</td>
                                <td class="table__cell table__cell--right">{format_currency(r.third_party)}</td>
                                <td class="table__cell table__cell--right">{format_currency(r.grand_total)}</td>
                            </tr>
                        }).collect_view()}
                    </tbody>
                </table>
            </div>
        })
    };

    let select = move |label: &'static str, value: RwSignal<String>, choices: RwSignal<Vec<String>>| {
        view! {
            <label class="filter-field">
                <span class="filter-field__label">{label}</span>
                <select
                    class="filter-field__select"
                    prop:value=move || value.get()
                    disabled=move || loading.get()
                    on:change=move |ev| {
                        value.set(event_target_value(&ev));
                        apply_filters();
                    }
                >
                    <option value=ALL>"All"</option>
                    {move || choices.get().into_iter().map(|c| view! {
                        <option value=c.clone()>{c.clone()}</option>
                    }).collect_view()}
                </select>
            </label>
        }
    };

    view! {
        <div class="page">
            <PageHeader
                title="Sales split"
                icon_name="pie-chart"
                subtitle=Signal::derive(move || file_name.get())
            >
                <label class="button button--primary file-button">
                    {icon("upload")}
                    "Upload sales file"
                    <input type="file" accept=".xlsx,.xls,.csv" class="file-button__input" on:change=on_file />
                </label>
                <Button
                    appearance=ButtonAppearance::Secondary
                    disabled=Signal::derive(move || tables.with(Option::is_none))
                    on_click=move |_| view_mode.update(|m| *m = m.toggled())
                >
                    {move || match view_mode.get() {
                        ViewMode::Tabbed => "Show all charts",
                        ViewMode::Stacked => "Show as tabs",
                    }}
                </Button>
            </PageHeader>

            {move || error.get().map(|e| view! {
                <div class="warning-box">{icon("alert-circle")}<span class="warning-box__text">{e}</span></div>
            })}
            <Show when=move || loading.get()>
                <div class="page__loading"><Spinner size=SpinnerSize::Small /> "Processing..."</div>
            </Show>

            <Show
                when=move || tables.with(Option::is_some)
                fallback=|| view! {
                    <div class="empty-state">
                        {icon("file-text")}
                        <p>"Upload a sales export to see the channel split."</p>
                    </div>
                }
            >
                <div class="filter-row">
                    {select("Location", location, location_choices)}
                    {select("Period", date_range, range_choices)}
                </div>
                {charts}
                {location_table}
            </Show>
        </div>
    }
}
