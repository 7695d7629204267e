use contracts::domain::a003_store_order::{AvailableItem, OrderAnalytics};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::dashboards::d102_store_orders::api;
use crate::dashboards::d102_store_orders::cart::{Cart, CartMode};
use crate::dashboards::d102_store_orders::loaded::LoadedOrders;
use crate::dashboards::scope::{Scope, ScopePicker};
use crate::shared::charts::{BarChart, BarDatum, HorizontalBarChart};
use crate::shared::components::alert::use_alerts;
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::stat_card::StatCard;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::number_format::{format_currency, ValueFormat};
use crate::shared::state::{use_date_range, LoadSequence};

fn matches_item(item: &AvailableItem, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    needle.is_empty()
        || item.name.to_lowercase().contains(&needle)
        || item.category.to_lowercase().contains(&needle)
}

#[component]
pub fn StoreOrdersDashboard() -> impl IntoView {
    let alerts = use_alerts();
    let date_range = use_date_range();

    let company = RwSignal::new(String::new());
    let location = RwSignal::new(String::new());
    let range_error = RwSignal::new(None::<String>);
    let scope = Memo::new(move |_| Scope::from_parts(&company.get(), &location.get()));

    let data = RwSignal::new(LoadedOrders::default());
    let sequence = StoredValue::new(LoadSequence::default());
    let (loading, set_loading) = signal(false);
    let (submitting, set_submitting) = signal(false);
    let search = RwSignal::new(String::new());

    let cart = RwSignal::new(Cart::default());
    let clear_open = RwSignal::new(false);

    let load_all = move |scope: Scope| {
        let range = date_range.get_untracked();
        let mut next = sequence.get_value();
        let token = next.begin();
        sequence.set_value(next);
        set_loading.set(true);
        spawn_local(async move {
            let (available, recent, stats) = futures::join!(
                api::fetch_available_items(&scope),
                api::fetch_recent_orders(&scope),
                api::fetch_analytics(&scope, range),
            );
            if !sequence.get_value().is_current(token) {
                log::warn!("Dropping stale store order data for {}/{}", scope.company_id, scope.location_id);
                return;
            }
            let failures = data
                .try_update(|d| d.apply(scope, available, recent, stats))
                .unwrap_or_default();
            for message in failures {
                alerts.error(message);
            }
            set_loading.set(false);
        });
    };

    let apply = move |_| {
        if let Some(scope) = scope.get_untracked() {
            if data.with_untracked(|d| d.scope.as_ref() != Some(&scope)) {
                cart.update(Cart::reset);
            }
            load_all(scope);
        }
    };

    let submit = move |_| {
        let Some(scope) = data.with_untracked(|d| d.scope.clone()) else {
            return;
        };
        let current = cart.get_untracked();
        if current.is_empty() {
            alerts.warning("Add at least one item to the order");
            return;
        }
        set_submitting.set(true);
        spawn_local(async move {
            let result = match current.update_request(&scope) {
                Some(request) => api::update_order(&request).await,
                None => api::create_order(&current.create_request(&scope)).await,
            };
            match result {
                Ok(response) => {
                    let message = response.message.unwrap_or_else(|| match response.order_id {
                        Some(id) => format!("Order {} saved", id),
                        None => "Order saved".to_string(),
                    });
                    alerts.success(message);
                    cart.update(Cart::reset);
                    load_all(scope);
                }
                Err(e) => {
                    log::warn!("Order submit failed: {}", e);
                    alerts.error(format!("Failed to submit order: {}", e));
                }
            }
            set_submitting.set(false);
        });
    };

    let stat = move |f: fn(&OrderAnalytics) -> f64| {
        Signal::derive(move || data.with(|d| d.analytics.as_ref().map(f)))
    };
    let weekly_bars = Signal::derive(move || {
        data.with(|d| {
            d.analytics
                .as_ref()
                .map(|a| a.weekly.iter().map(|w| BarDatum::new(w.week.clone(), w.spend)).collect())
                .unwrap_or_default()
        })
    });
    let top_item_bars = Signal::derive(move || {
        data.with(|d| {
            d.analytics
                .as_ref()
                .map(|a| a.top_items.iter().map(|t| BarDatum::new(t.name.clone(), t.spend)).collect())
                .unwrap_or_default()
        })
    });

    let item_rows = move || {
        let needle = search.get();
        data.with(|d| d.items.clone())
            .into_iter()
            .filter(|i| matches_item(i, &needle))
            .map(|item| {
                let id = item.id.clone();
                let in_cart = move || cart.with(|c| c.quantity_of(&id));
                let to_add = item.clone();
                view! {
                    <tr class="table__row">
                        <td class="table__cell">{item.name}</td>
                        <td class="table__cell">{item.category}</td>
                        <td class="table__cell">{item.unit}</td>
                        <td class="table__cell table__cell--right">{format_currency(item.price)}</td>
                        <td class="table__cell table__cell--right">
                            <button class="button button--small" on:click=move |_| cart.update(|c| c.add(&to_add))>
                                {icon("plus")}
                                {move || match in_cart() {
                                    0 => "Add".to_string(),
                                    n => format!("Add ({})", n),
                                }}
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    let cart_rows = move || {
        cart.get()
            .items()
            .iter()
            .map(|line| {
                let id = StoredValue::new(line.id.clone());
                view! {
                    <div class="cart__line">
                        <span class="cart__name">{line.name.clone()}</span>
                        <input
                            class="cart__qty"
                            type="number"
                            min="0"
                            prop:value=line.quantity.to_string()
                            on:change=move |ev| {
                                let qty = event_target_value(&ev).trim().parse::<i64>().unwrap_or(0);
                                cart.update(|c| c.set_quantity(&id.get_value(), qty));
                            }
                        />
                        <span class="cart__total">{format_currency(line.line_total())}</span>
                        <button class="button button--icon" title="Remove" on:click=move |_| cart.update(|c| c.remove(&id.get_value()))>
                            {icon("x")}
                        </button>
                    </div>
                }
            })
            .collect_view()
    };

    let recent_rows = move || {
        data.with(|d| d.orders.clone())
            .into_iter()
            .take(config().ui.recent_orders_limit)
            .map(|order| {
                let label = format!("#{} · {}", order.id, order.created_at);
                let count = order.items.len();
                let total = order.total;
                let order = StoredValue::new(order);
                view! {
                    <div class="recent-order">
                        <span class="recent-order__label">{label}</span>
                        <span class="recent-order__meta">{format!("{} items · {}", count, format_currency(total))}</span>
                        <button
                            class="button button--small"
                            on:click=move |_| order.with_value(|o| cart.update(|c| c.load_order(o)))
                        >
                            {icon("edit")}
                            "Edit"
                        </button>
                    </div>
                }
            })
            .collect_view()
    };

    let cart_title = move || match cart.with(|c| c.mode().clone()) {
        CartMode::Creating => "New order".to_string(),
        CartMode::Updating { order_id } => format!("Editing order #{}", order_id),
    };

    view! {
        <div class="page">
            <PageHeader title="Store orders" icon_name="shopping-cart">
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
                    disabled=Signal::derive(move || scope.with(Option::is_none) || loading.get())
                    loading=loading
                    on_click=apply
                >
                    "Apply"
                </Button>
            </PageHeader>

            <Show
                when=move || data.with(|d| d.scope.is_some())
                fallback=|| view! {
                    <div class="empty-state">
                        {icon("shopping-cart")}
                        <p>"Choose a location and press Apply."</p>
                    </div>
                }
            >
                <div class="stat-grid">
                    <StatCard label="Orders" icon_name="file-text" value=stat(|a| a.total_orders as f64) format=ValueFormat::Integer />
                    <StatCard label="Total spend" icon_name="trending-up" value=stat(|a| a.total_spend) format=ValueFormat::Currency />
                    <StatCard label="Average order" icon_name="bar-chart" value=stat(|a| a.average_order_value) format=ValueFormat::Currency />
                </div>
                <div class="chart-grid">
                    <BarChart title="Weekly spend" data=weekly_bars format=ValueFormat::Currency />
                    <HorizontalBarChart title="Top items by spend" data=top_item_bars format=ValueFormat::Currency />
                </div>

                <div class="orders-layout">
                    <div class="orders-layout__items">
                        <SearchInput
                            value=Signal::derive(move || search.get())
                            on_change=Callback::new(move |text| search.set(text))
                            placeholder="Search items..."
                        />
                        <div class="table">
                            <table class="table__data table--striped">
                                <thead class="table__head">
                                    <tr>
                                        <th class="table__header-cell">"Item"</th>
                                        <th class="table__header-cell">"Category"</th>
                                        <th class="table__header-cell">"Unit"</th>
                                        <th class="table__header-cell table__header-cell--right">"Price"</th>
                                        <th class="table__header-cell"></th>
                                    </tr>
                                </thead>
                                <tbody>{item_rows}</tbody>
                            </table>
                        </div>
                    </div>

                    <div class="orders-layout__side">
                        <div class="cart">
                            <h3 class="cart__title">{cart_title}</h3>
                            <Show
                                when=move || !cart.with(Cart::is_empty)
                                fallback=|| view! { <p class="cart__empty">"The cart is empty."</p> }
                            >
                                {cart_rows}
                            </Show>
                            <div class="cart__summary">
                                <span>{move || format!("{} units", cart.with(Cart::item_count))}</span>
                                <strong>{move || format_currency(cart.with(Cart::total))}</strong>
                            </div>
                            <div class="cart__actions">
                                <Button
                                    appearance=ButtonAppearance::Primary
                                    disabled=Signal::derive(move || cart.with(Cart::is_empty))
                                    loading=submitting
                                    on_click=submit
                                >
                                    {move || match cart.with(|c| c.mode().clone()) {
                                        CartMode::Creating => "Submit order",
                                        CartMode::Updating { .. } => "Update order",
                                    }}
                                </Button>
                                <Show when=move || matches!(cart.with(|c| c.mode().clone()), CartMode::Updating { .. })>
                                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| cart.update(Cart::reset)>
                                        "Cancel edit"
                                    </Button>
                                </Show>
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    disabled=Signal::derive(move || cart.with(Cart::is_empty))
                                    on_click=move |_| clear_open.set(true)
                                >
                                    {icon("trash")}
                                    "Clear"
                                </Button>
                            </div>
                        </div>

                        <div class="recent-orders">
                            <h3 class="recent-orders__title">"Recent orders"</h3>
                            {recent_rows}
                        </div>
                    </div>
                </div>
            </Show>

            <ConfirmDialog
                open=clear_open
                title="Clear cart"
                message=Signal::derive(|| "Remove every item from the cart?".to_string())
                confirm_label="Clear"
                on_confirm=Callback::new(move |_| cart.update(Cart::reset))
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_item() {
        let item = AvailableItem {
            id: "1".into(),
            name: "Whole Milk".into(),
            category: "Dairy".into(),
            price: 3.0,
            unit: "gal".into(),
        };
        assert!(matches_item(&item, ""));
        assert!(matches_item(&item, "milk"));
        assert!(matches_item(&item, " DAIRY "));
        assert!(!matches_item(&item, "flour"));
    }
}
