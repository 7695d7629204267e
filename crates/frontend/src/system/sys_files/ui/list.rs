use contracts::system::sys_files::{DataKind, UploadedFile};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::shared::components::alert::use_alerts;
use crate::shared::components::confirm_dialog::ConfirmDialog;
use crate::shared::components::page_header::PageHeader;
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::config::config;
use crate::shared::icons::icon;
use crate::shared::list_utils::{page_slice, total_pages, SearchInput};
use crate::shared::number_format::format_int;
use crate::system::sys_files::api;

/// What the confirmation dialog will delete.
#[derive(Debug, Clone, PartialEq)]
enum PendingDelete {
    One(String),
    All,
}

/// Newest first; files without an upload time go last.
pub fn sorted_files(mut files: Vec<UploadedFile>, search: &str) -> Vec<UploadedFile> {
    let needle = search.trim().to_lowercase();
    files.retain(|f| needle.is_empty() || f.filename.to_lowercase().contains(&needle));
    files.sort_by(|a, b| match (&a.uploaded_at, &b.uploaded_at) {
        (Some(x), Some(y)) => y.cmp(x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => a.filename.cmp(&b.filename),
    });
    files
}

#[component]
pub fn FilesPage() -> impl IntoView {
    let alerts = use_alerts();

    let kind = RwSignal::new(DataKind::SalesPmix);
    let files = RwSignal::new(Vec::<UploadedFile>::new());
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(None::<String>);
    let search = RwSignal::new(String::new());
    let page = RwSignal::new(0usize);
    let page_size = RwSignal::new(config().ui.default_page_size);

    let confirm_open = RwSignal::new(false);
    let pending = RwSignal::new(None::<PendingDelete>);

    let load = move || {
        let current = kind.get_untracked();
        set_loading.set(true);
        set_error.set(None);
        spawn_local(async move {
            match api::list_files(current).await {
                Ok(list) => {
                    // The kind may have changed while the request was in flight.
                    if kind.get_untracked() == current {
                        files.set(list);
                    }
                }
                Err(e) => {
                    log::warn!("Failed to list {} files: {}", current.path_segment(), e);
                    files.set(Vec::new());
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        kind.track();
        page.set(0);
        load();
    });

    let visible = Memo::new(move |_| sorted_files(files.get(), &search.get()));
    let total_count = Signal::derive(move || visible.with(Vec::len));
    let pages = Signal::derive(move || total_pages(total_count.get(), page_size.get()));

    let ask_delete = move |target: PendingDelete| {
        pending.set(Some(target));
        confirm_open.set(true);
    };

    let confirm_message = Signal::derive(move || match pending.get() {
        Some(PendingDelete::One(name)) => format!("Delete {}? This cannot be undone.", name),
        Some(PendingDelete::All) => format!(
            "Delete all {} files? This cannot be undone.",
            kind.get().label()
        ),
        None => String::new(),
    });

    let run_delete = move |_| {
        let Some(target) = pending.get_untracked() else {
            return;
        };
        pending.set(None);
        let current = kind.get_untracked();
        spawn_local(async move {
            let result = match &target {
                PendingDelete::One(name) => api::delete_file(current, name).await,
                PendingDelete::All => api::clear_files(current).await,
            };
            match result {
                Ok(response) => {
                    let message = response.message.unwrap_or_else(|| match &target {
                        PendingDelete::One(name) => format!("{} deleted", name),
                        PendingDelete::All => format!(
                            "{} files deleted",
                            response.deleted.map(|n| n.to_string()).unwrap_or_else(|| "All".to_string())
                        ),
                    });
                    alerts.success(message);
                    load();
                }
                Err(e) => alerts.error(format!("Delete failed: {}", e)),
            }
        });
    };

    let rows = move || {
        visible.with(|all| page_slice(all, page.get(), page_size.get()))
            .into_iter()
            .map(|file| {
                let name = file.filename.clone();
                view! {
                    <tr class="table__row">
                        <td class="table__cell">{file.filename}</td>
                        <td class="table__cell">{file.uploaded_at.unwrap_or_default()}</td>
                        <td class="table__cell">{file.company_id.unwrap_or_default()}</td>
                        <td class="table__cell">{file.location_id.unwrap_or_default()}</td>
                        <td class="table__cell table__cell--right">
                            {file.row_count.map(|n| format_int(n as f64)).unwrap_or_default()}
                        </td>
                        <td class="table__cell table__cell--right">
                            <button
                                class="button button--icon"
                                title="Delete"
                                on:click=move |_| ask_delete(PendingDelete::One(name.clone()))
                            >
                                {icon("trash")}
                            </button>
                        </td>
                    </tr>
                }
            })
            .collect_view()
    };

    view! {
        <div class="page">
            <PageHeader title="Uploaded files" icon_name="folder">
                <select
                    class="filter-field__select"
                    prop:value=move || kind.get().path_segment()
                    on:change=move |ev| {
                        if let Some(k) = DataKind::from_segment(&event_target_value(&ev)) {
                            kind.set(k);
                        }
                    }
                >
                    {DataKind::ALL.into_iter().map(|k| view! {
                        <option value=k.path_segment()>{k.label()}</option>
                    }).collect_view()}
                </select>
                <Button appearance=ButtonAppearance::Secondary loading=loading on_click=move |_| load()>
                    {icon("refresh")}
                    "Refresh"
                </Button>
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=Signal::derive(move || files.with(Vec::is_empty))
                    on_click=move |_| ask_delete(PendingDelete::All)
                >
                    {icon("trash")}
                    "Delete all"
                </Button>
            </PageHeader>

            {move || error.get().map(|e| view! {
                <div class="warning-box">{icon("alert-circle")}<span class="warning-box__text">{e}</span></div>
            })}

            <div class="list-toolbar">
                <SearchInput
                    value=Signal::derive(move || search.get())
                    on_change=Callback::new(move |text| {
                        search.set(text);
                        page.set(0);
                    })
                    placeholder="Search files..."
                />
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
            </div>

            <div class="table">
                <table class="table__data table--striped">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"File"</th>
                            <th class="table__header-cell">"Uploaded"</th>
                            <th class="table__header-cell">"Company"</th>
                            <th class="table__header-cell">"Location"</th>
                            <th class="table__header-cell table__header-cell--right">"Rows"</th>
                            <th class="table__header-cell"></th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </div>
            <Show when=move || !loading.get() && total_count.get() == 0>
                <div class="empty-state">{icon("folder")}<p>"No files uploaded."</p></div>
            </Show>

            <ConfirmDialog
                open=confirm_open
                title="Delete files"
                message=confirm_message
                confirm_label="Delete"
                on_confirm=Callback::new(run_delete)
            />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, uploaded_at: Option<&str>) -> UploadedFile {
        UploadedFile {
            filename: name.into(),
            uploaded_at: uploaded_at.map(str::to_string),
            company_id: None,
            location_id: None,
            row_count: None,
        }
    }

    #[test]
    fn test_sorted_files_newest_first() {
        let files = vec![
            file("b.xlsx", None),
            file("jan.xlsx", Some("2024-01-05")),
            file("feb.xlsx", Some("2024-02-01")),
            file("a.xlsx", None),
        ];
        let names: Vec<String> = sorted_files(files, "")
            .into_iter()
            .map(|f| f.filename)
            .collect();
        assert_eq!(names, vec!["feb.xlsx", "jan.xlsx", "a.xlsx", "b.xlsx"]);
    }

    #[test]
    fn test_sorted_files_search() {
        let files = vec![file("Sales Jan.xlsx", None), file("budget.csv", None)];
        let found = sorted_files(files, "  sales ");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].filename, "Sales Jan.xlsx");
    }
}
