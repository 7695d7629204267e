//! Master file grid: cascading pickers, auto-apply, filters and inline
//! price editing over the rows held by the selection store.

pub mod edit;
pub mod filter_panel;
pub mod state;

use contracts::domain::a002_masterfile::{ColumnDef, MasterFileDetail, MasterFileRow};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::edit::PendingEdit;
use self::filter_panel::{ActiveFilterTags, SecondaryFilters};
use self::state::{
    company_options, distinct_values, filename_options, location_options, next_price_range,
    price_bounds, visible_rows, AutoApply, GridFilters, LoadPlan, PriceRange, SortState,
};
use super::upload_dialog::UploadDialog;
use crate::domain::a002_masterfile::api;
use crate::shared::components::alert::{use_alerts, AlertService};
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::date_range_picker::DateRangePicker;
use crate::shared::components::filter_panel::FilterPanel;
use crate::shared::components::multi_select::MultiSelect;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_utils::{get_sort_class, get_sort_indicator, page_slice, total_pages, SearchInput};
use crate::shared::state::{use_date_range, use_selection, DataSource, LoadOutcome, SelectionStore};

/// Run a load plan through the store and report the outcome.
async fn run_plan(store: SelectionStore, alerts: AlertService, plan: LoadPlan) {
    let result = match plan {
        LoadPlan::Single(query) => store.load_master_file_data(query).await,
        LoadPlan::Multiple(queries) => store.load_multiple_master_file_data(queries).await,
    };
    match result {
        Ok(LoadOutcome::Applied { rows, loaded, failed }) if failed > 0 => {
            alerts.warning(format!(
                "Loaded {} rows from {} of {} files; {} failed",
                rows,
                loaded,
                loaded + failed,
                failed
            ));
        }
        Ok(LoadOutcome::Applied { rows, .. }) => {
            log::debug!("Master data loaded: {} rows", rows);
        }
        Ok(LoadOutcome::Superseded) => {}
        Err(e) => alerts.error(format!("Failed to load master data: {}", e)),
    }
}

#[component]
pub fn MasterFileGrid() -> impl IntoView {
    let store = use_selection();
    let alerts = use_alerts();
    let date_range = use_date_range();

    // Catalog of uploaded files feeding the pickers.
    let details = RwSignal::new(Vec::<MasterFileDetail>::new());
    let details_loading = RwSignal::new(false);
    let load_details = move || {
        details_loading.set(true);
        spawn_local(async move {
            match api::fetch_details().await {
                Ok(data) => details.set(data),
                Err(e) => alerts.error(format!("Failed to load file list: {}", e)),
            }
            details_loading.set(false);
        });
    };
    load_details();

    if let Some(filters) = store.restore_last_applied() {
        log::debug!("Resuming {} master file(s)", filters.queries().len());
    }

    let company_opts = Signal::derive(move || details.with(|d| company_options(d)));
    let location_opts = Signal::derive(move || {
        let companies = store.selected_companies();
        details.with(|d| location_options(d, &companies))
    });
    let filename_opts = Signal::derive(move || {
        let (companies, locations) = (store.selected_companies(), store.selected_locations());
        details.with(|d| filename_options(d, &companies, &locations))
    });

    // Auto-apply: only the newest pending selection fires after the pause.
    let decision = Memo::new(move |_| {
        let selection = store.selection();
        details.with(|d| AutoApply::decide(&selection, d))
    });
    let apply_token = StoredValue::new(0u64);
    let schedule = move |plan: LoadPlan, delay_ms: u32| {
        let token = apply_token.get_value() + 1;
        apply_token.set_value(token);
        spawn_local(async move {
            if delay_ms > 0 {
                TimeoutFuture::new(delay_ms).await;
            }
            if apply_token.get_value() == token {
                run_plan(store, alerts, plan).await;
            }
        });
    };
    Effect::new(move |_| {
        let AutoApply::Ready(plan) = decision.get() else {
            apply_token.update_value(|t| *t += 1);
            return;
        };
        let loaded = store.with_untracked(|s| s.data.is_some() && plan.is_loaded_in(&s.data_source));
        if !loaded {
            schedule(plan, config().ui.auto_apply_debounce_ms);
        }
    });

    let reload = move |_| {
        load_details();
        if let AutoApply::Ready(plan) = decision.get_untracked() {
            schedule(plan, 0);
        }
    };

    // Rows after filters and sort, then the current page.
    let filters = RwSignal::new(GridFilters::default());
    let sort = RwSignal::new(SortState::default());
    let filters_expanded = RwSignal::new(false);
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(config().ui.default_page_size);

    let columns = Memo::new(move |_| {
        store.with(|s| s.data.as_ref().map(|d| d.schema.columns.clone()).unwrap_or_default())
    });
    let price_key = Memo::new(move |_| {
        store.with(|s| {
            s.data
                .as_ref()
                .and_then(|d| d.schema.current_price_key().map(str::to_string))
        })
    });
    let visible = Memo::new(move |_| {
        let (f, o) = (filters.get(), sort.get());
        store.with(|s| match &s.data {
            Some(d) => visible_rows(&d.rows, &d.schema, &f, &o),
            None => Vec::new(),
        })
    });
    let unit_options = Signal::derive(move || {
        store.with(|s| s.data.as_ref().map(|d| distinct_values(&d.rows, d.schema.unit_key())).unwrap_or_default())
    });
    let category_options = Signal::derive(move || {
        store.with(|s| {
            s.data
                .as_ref()
                .map(|d| distinct_values(&d.rows, d.schema.category_key()))
                .unwrap_or_default()
        })
    });

    // The slider follows the loaded prices. New data resets the price filter;
    // an inline edit only moves the bounds.
    let bounds = Memo::new(move |_| {
        store.with(|s| s.data.as_ref().and_then(|d| price_bounds(&d.rows, &d.schema)))
    });
    let source = Memo::new(move |_| store.with(|s| s.data_source.clone()));
    let last_source = StoredValue::new(DataSource::None);
    let price_range = RwSignal::new(None::<PriceRange>);
    Effect::new(move |_| {
        let (next_bounds, current_source) = (bounds.get(), source.get());
        let same_source = last_source.with_value(|s| *s == current_source);
        last_source.set_value(current_source);

        let range = next_price_range(price_range.get_untracked(), next_bounds, same_source);
        price_range.set(range);
        let (lo, hi) = range.map(|r| r.as_filter()).unwrap_or((None, None));
        filters.maybe_update(|f| {
            if f.price_min == lo && f.price_max == hi {
                return false;
            }
            f.price_min = lo;
            f.price_max = hi;
            true
        });
    });

    Effect::new(move |_| {
        filters.track();
        sort.track();
        page.set(0);
    });

    let total_count = Signal::derive(move || visible.with(Vec::len));
    let pages = Signal::derive(move || total_pages(total_count.get(), page_size.get()));
    let page_rows = Signal::derive(move || visible.with(|rows| page_slice(rows, page.get(), page_size.get())));

    // Inline price edit: optimistic, rolled back when the save fails.
    let editing = RwSignal::new(None::<(String, String)>);
    let commit_edit = move |row_id: String, input: String| {
        editing.set(None);
        let Some(key) = price_key.get_untracked() else {
            return;
        };
        let Some(row) = store.with_untracked(|s| s.row(&row_id).cloned()) else {
            return;
        };
        let edit = match PendingEdit::begin(&row, &key, &input) {
            Ok(edit) => edit,
            Err(message) => {
                alerts.error(message);
                return;
            }
        };
        if edit.is_noop() {
            return;
        }
        let request = edit.request(&row);
        store.update_item(&edit.row_id, edit.updates());
        spawn_local(async move {
            match api::update_row(&request).await {
                Ok(response) => {
                    alerts.success(response.message.unwrap_or_else(|| "Price updated".to_string()));
                }
                Err(e) => {
                    log::warn!("Reverting price of {}: {}", edit.row_id, e);
                    store.update_item(&edit.row_id, edit.rollback());
                    alerts.error(format!("Failed to save price: {}", e));
                }
            }
        });
    };

    // Header actions
    let upload_open = RwSignal::new(false);
    let clear_open = RwSignal::new(false);
    let range_error = RwSignal::new(None::<String>);
    let date_from = Signal::derive(move || date_range.range().get().start_input());
    let date_to = Signal::derive(move || date_range.range().get().end_input());
    let on_range_change = Callback::new(move |(from, to): (String, String)| {
        range_error.set(date_range.set_inputs(&from, &to).err());
    });

    let render_cell = move |row: &MasterFileRow, column: &ColumnDef| -> AnyView {
        let is_price = price_key.with_untracked(|k| k.as_deref() == Some(column.key.as_str()));
        let text = row.text(&column.key);
        if !is_price {
            return view! { <td class="table__cell">{text}</td> }.into_any();
        }
        let row_id = StoredValue::new(row.id.clone());
        let is_editing = move || {
            editing.with(|e| e.as_ref().map(|(id, _)| row_id.with_value(|r| r == id)).unwrap_or(false))
        };
        let start_text = text;
        view! {
            <td class="table__cell table__cell--editable">
                <Show
                    when=is_editing
                    fallback=move || {
                        let draft = start_text.clone();
                        view! {
                            <span
                                class="grid__price"
                                title="Click to edit"
                                on:click=move |_| editing.set(Some((row_id.get_value(), draft.clone())))
                            >
                                {start_text.clone()}
                                {icon("edit")}
                            </span>
                        }
                    }
                >
                    <input
                        class="grid__price-input"
                        type="text"
                        autofocus=true
                        prop:value=move || editing.with(|e| e.as_ref().map(|(_, v)| v.clone()).unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            editing.update(|e| {
                                if let Some((_, draft)) = e {
                                    *draft = value;
                                }
                            });
                        }
                        on:keydown=move |ev| match ev.key().as_str() {
                            "Enter" => {
                                let draft = editing.with_untracked(|e| e.as_ref().map(|(_, v)| v.clone()));
                                if let Some(draft) = draft {
                                    commit_edit(row_id.get_value(), draft);
                                }
                            }
                            "Escape" => editing.set(None),
                            _ => {}
                        }
                        on:blur=move |_| {
                            let draft = editing.with_untracked(|e| {
                                e.as_ref()
                                    .filter(|(id, _)| row_id.with_value(|r| r == id))
                                    .map(|(_, v)| v.clone())
                            });
                            if let Some(draft) = draft {
                                commit_edit(row_id.get_value(), draft);
                            }
                        }
                    />
                </Show>
            </td>
        }
        .into_any()
    };

    let table = move || {
        let cols = columns.get();
        if cols.is_empty() {
            return None;
        }
        let header_cols = cols.clone();
        Some(view! {
            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            {header_cols.into_iter().map(|col| {
                                let key = StoredValue::new(col.key.clone());
                                view! {
                                    <th
                                        class="table__header-cell table__header-cell--sortable"
                                        on:click=move |_| sort.update(|s| s.toggle(&key.get_value()))
                                    >
                                        {col.title.clone()}
                                        <span class=move || sort.with(|s| get_sort_class(s.column.as_deref().unwrap_or(""), &key.get_value()))>
                                            {move || sort.with(|s| get_sort_indicator(s.column.as_deref().unwrap_or(""), &key.get_value(), s.ascending))}
                                        </span>
                                    </th>
                                }
                            }).collect_view()}
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each=move || page_rows.get()
                            key=|row| (row.id.clone(), serde_json::to_string(&row.cells).unwrap_or_default())
                            children=move |row: MasterFileRow| {
                                let cols = cols.clone();
                                view! {
                                    <tr class="table__row">
                                        {cols.iter().map(|col| render_cell(&row, col)).collect_view()}
                                    </tr>
                                }
                            }
                        />
                    </tbody>
                </table>
            </div>
        })
    };

    view! {
        <div class="page">
            <PageHeader title="Master files" icon_name="database">
                <DateRangePicker
                    date_from=date_from
                    date_to=date_to
                    on_change=on_range_change
                    error=Signal::derive(move || range_error.get())
                />
                <Button appearance=ButtonAppearance::Primary on_click=move |_| upload_open.set(true)>
                    {icon("upload")}
                    "Upload"
                </Button>
                <Button appearance=ButtonAppearance::Secondary on_click=reload>
                    {icon("refresh")}
                    "Refresh"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=Signal::derive(move || store.with(|s| s.data.is_none()))
                    on_click=move |_| clear_open.set(true)
                >
                    {icon("trash")}
                    "Clear"
                </Button>
            </PageHeader>

            <div class="grid-pickers">
                <MultiSelect
                    label="Company"
                    options=company_opts
                    selected=Signal::derive(move || store.selected_companies())
                    on_change=Callback::new(move |ids| {
                        store.set_selected_companies(ids);
                    })
                    disabled=Signal::derive(move || details_loading.get())
                    placeholder="Select companies"
                />
                <MultiSelect
                    label="Location"
                    options=location_opts
                    selected=Signal::derive(move || store.selected_locations())
                    on_change=Callback::new(move |ids| {
                        store.set_selected_locations(ids);
                    })
                    single=true
                    disabled=Signal::derive(move || store.selected_companies().is_empty())
                    placeholder="Select a location"
                />
                <MultiSelect
                    label="Files"
                    options=filename_opts
                    selected=Signal::derive(move || store.selected_filenames())
                    on_change=Callback::new(move |names| {
                        store.set_selected_filenames(names);
                    })
                    disabled=Signal::derive(move || store.selected_locations().is_empty())
                    placeholder="Select files"
                />
            </div>

            {move || decision.get().message().map(|m| view! {
                <div class="info-box">{icon("info")}<span>{m}</span></div>
            })}
            {move || store.error().map(|e| view! {
                <div class="warning-box">{icon("alert-circle")}<span class="warning-box__text">{e}</span></div>
            })}
            <Show when=move || store.is_loading()>
                <div class="grid__loading"><Spinner size=SpinnerSize::Small /> "Loading master data..."</div>
            </Show>

            <Show when=move || store.with(|s| s.data.is_some())>
                <SearchInput
                    value=Signal::derive(move || filters.with(|f| f.search.clone()))
                    on_change=Callback::new(move |text: String| filters.update(|f| f.search = text))
                    placeholder="Search items..."
                />
                <FilterPanel
                    is_expanded=filters_expanded
                    active_filters_count=Signal::derive(move || filters.with(GridFilters::active_count))
                    header_extra=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || page.get())
                            total_pages=pages
                            total_count=total_count
                            page_size=Signal::derive(move || page_size.get())
                            on_page_change=Callback::new(move |p| page.set(p))
                            on_page_size_change=Callback::new(move |size| {
                                page_size.set(size);
                                page.set(0);
                            })
                        />
                    }
                    filter_tags=move || view! { <ActiveFilterTags filters=filters price_range=price_range /> }
                >
                    <SecondaryFilters
                        filters=filters
                        price_range=price_range
                        unit_options=unit_options
                        category_options=category_options
                    />
                </FilterPanel>
                {table}
            </Show>

            <UploadDialog open=upload_open on_uploaded=Callback::new(move |_| load_details()) />
            <ConfirmDialog
                open=clear_open
                title="Clear grid"
                message=Signal::derive(|| "Remove the loaded rows from the grid? Uploaded files are not affected.".to_string())
                confirm_label="Clear"
                on_confirm=Callback::new(move |_| {
                    apply_token.update_value(|t| *t += 1);
                    store.clear_data();
                    filters.set(GridFilters::default());
                })
            />
        </div>
    }
}
