use contracts::domain::a002_masterfile::MasterUploadRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_company::state::{company_options, location_options};
use crate::domain::a001_company::use_company_catalog;
use crate::domain::a002_masterfile::api;
use crate::shared::components::alert::use_alerts;
use crate::shared::file_utils::{read_spreadsheet, selected_file, EncodedFile};

/// Everything the upload needs, or the first thing missing.
pub fn build_upload_request(
    company_id: &str,
    location_id: &str,
    file: Option<&EncodedFile>,
) -> Result<MasterUploadRequest, String> {
    if company_id.is_empty() {
        return Err("Choose a company".to_string());
    }
    if location_id.is_empty() {
        return Err("Choose a location".to_string());
    }
    let file = file.ok_or_else(|| "Choose a spreadsheet to upload".to_string())?;
    Ok(MasterUploadRequest {
        company_id: company_id.to_string(),
        location_id: location_id.to_string(),
        file_name: file.name.clone(),
        file_content: file.content.clone(),
    })
}

/// Upload a master spreadsheet for one company location.
#[component]
pub fn UploadDialog(open: RwSignal<bool>, on_uploaded: Callback<()>) -> impl IntoView {
    let catalog = use_company_catalog();
    let alerts = use_alerts();

    let company_id = RwSignal::new(String::new());
    let location_id = RwSignal::new(String::new());
    let file = RwSignal::new(None::<EncodedFile>);
    let error = RwSignal::new(None::<String>);
    let (reading, set_reading) = signal(false);
    let (uploading, set_uploading) = signal(false);

    let companies = Signal::derive(move || catalog.catalog().with(company_options));
    let locations = Signal::derive(move || {
        let selected = vec![company_id.get()];
        catalog.catalog().with(|c| location_options(c, &selected))
    });

    let reset = move || {
        company_id.set(String::new());
        location_id.set(String::new());
        file.set(None);
        error.set(None);
    };

    let on_file = move |ev: leptos::ev::Event| {
        let Some(picked) = selected_file(&ev) else {
            return;
        };
        set_reading.set(true);
        error.set(None);
        spawn_local(async move {
            match read_spreadsheet(picked).await {
                Ok(encoded) => file.set(Some(encoded)),
                Err(e) => {
                    file.set(None);
                    error.set(Some(e.to_string()));
                }
            }
            set_reading.set(false);
        });
    };

    let submit = move |_| {
        let request = match file.with_untracked(|f| {
            build_upload_request(&company_id.get_untracked(), &location_id.get_untracked(), f.as_ref())
        }) {
            Ok(request) => request,
            Err(message) => {
                error.set(Some(message));
                return;
            }
        };
        set_uploading.set(true);
        spawn_local(async move {
            match api::upload_master(&request).await {
                Ok(response) => {
                    let message = response
                        .message
                        .unwrap_or_else(|| format!("{} uploaded", request.file_name));
                    alerts.success(message);
                    reset();
                    open.set(false);
                    on_uploaded.run(());
                }
                Err(e) => {
                    log::warn!("Master upload failed: {}", e);
                    error.set(Some(e.to_string()));
                }
            }
            set_uploading.set(false);
        });
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Upload master file"</DialogTitle>
                    <DialogContent>
                        <div class="upload-form">
                            <label class="upload-form__label">"Company"</label>
                            <select
                                class="upload-form__select"
                                prop:value=move || company_id.get()
                                on:change=move |ev| {
                                    company_id.set(event_target_value(&ev));
                                    location_id.set(String::new());
                                }
                            >
                                <option value="">"Select company"</option>
                                {move || companies.get().into_iter().map(|o| view! {
                                    <option value=o.value>{o.label}</option>
                                }).collect_view()}
                            </select>

                            <label class="upload-form__label">"Location"</label>
                            <select
                                class="upload-form__select"
                                prop:value=move || location_id.get()
                                disabled=move || company_id.get().is_empty()
                                on:change=move |ev| location_id.set(event_target_value(&ev))
                            >
                                <option value="">"Select location"</option>
                                {move || locations.get().into_iter().map(|o| view! {
                                    <option value=o.value>{o.label}</option>
                                }).collect_view()}
                            </select>

                            <label class="upload-form__label">"Spreadsheet"</label>
                            <input type="file" accept=".xlsx,.xls,.csv" on:change=on_file />
                            {move || file.get().map(|f| view! {
                                <div class="upload-form__file">{f.name}</div>
                            })}
                            {move || error.get().map(|e| view! {
                                <div class="upload-form__error">{e}</div>
                            })}
                        </div>
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::derive(move || reading.get() || uploading.get())
                            loading=uploading
                            on_click=submit
                        >
                            "Upload"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| {
                                reset();
                                open.set(false);
                            }
                        >
                            "Cancel"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_upload_request() {
        let file = EncodedFile {
            name: "prices.xlsx".into(),
            content: "UEsDBA==".into(),
        };
        assert!(build_upload_request("", "L1", Some(&file)).is_err());
        assert!(build_upload_request("A", "", Some(&file)).is_err());
        assert_eq!(
            build_upload_request("A", "L1", None).unwrap_err(),
            "Choose a spreadsheet to upload"
        );

        let request = build_upload_request("A", "L1", Some(&file)).unwrap();
        assert_eq!(request.file_name, "prices.xlsx");
        assert_eq!(request.file_content, "UEsDBA==");
    }
}
