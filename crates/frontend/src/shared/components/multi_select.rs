use leptos::prelude::*;

use crate::shared::icons::icon;

/// One selectable option: `(value, label)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
        }
    }
}

/// New selection after clicking `value`.
///
/// In single mode picking a value replaces the selection; picking the
/// selected value again clears it.
pub fn toggle_value(selected: &[String], value: &str, single: bool) -> Vec<String> {
    let is_selected = selected.iter().any(|s| s == value);
    match (single, is_selected) {
        (true, true) => Vec::new(),
        (true, false) => vec![value.to_string()],
        (false, true) => selected.iter().filter(|s| *s != value).cloned().collect(),
        (false, false) => {
            let mut next = selected.to_vec();
            next.push(value.to_string());
            next
        }
    }
}

/// Summary shown on the closed control.
pub fn summary_label(options: &[SelectOption], selected: &[String], placeholder: &str) -> String {
    let labels: Vec<&str> = options
        .iter()
        .filter(|o| selected.contains(&o.value))
        .map(|o| o.label.as_str())
        .collect();
    match labels.len() {
        0 => placeholder.to_string(),
        1 | 2 => labels.join(", "),
        n => format!("{} selected", n),
    }
}

/// Dropdown list of checkboxes.
#[component]
pub fn MultiSelect(
    #[prop(into)] label: String,
    #[prop(into)] options: Signal<Vec<SelectOption>>,
    #[prop(into)] selected: Signal<Vec<String>>,
    on_change: Callback<Vec<String>>,
    /// Picking replaces instead of appending
    #[prop(optional)]
    single: bool,
    #[prop(optional, into)] disabled: MaybeProp<bool>,
    #[prop(optional, into)] placeholder: Option<String>,
) -> impl IntoView {
    let placeholder = placeholder.unwrap_or_else(|| "Select...".to_string());
    let open = RwSignal::new(false);
    let is_disabled = move || disabled.get().unwrap_or(false);

    let summary = move || {
        options.with(|opts| selected.with(|sel| summary_label(opts, sel, &placeholder)))
    };

    view! {
        <div class="multi-select" class:multi-select--open=move || open.get()>
            <div class="multi-select__label">{label}</div>
            <button
                class="multi-select__control"
                disabled=is_disabled
                on:click=move |_| open.update(|o| *o = !*o)
            >
                <span class="multi-select__summary">{summary}</span>
                {icon("chevron-down")}
            </button>
            <Show when=move || open.get() && !is_disabled()>
                <div class="multi-select__menu">
                    <Show
                        when=move || options.with(|o| !o.is_empty())
                        fallback=|| view! { <div class="multi-select__empty">"No options"</div> }
                    >
                        <For
                            each=move || options.get()
                            key=|opt| opt.value.clone()
                            let:opt
                        >
                            {
                                let value = opt.value.clone();
                                let value_for_check = opt.value.clone();
                                view! {
                                    <label class="multi-select__option">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || selected.with(|s| s.contains(&value_for_check))
                                            on:change=move |_| {
                                                let next = selected.with_untracked(|s| toggle_value(s, &value, single));
                                                if single {
                                                    open.set(false);
                                                }
                                                on_change.run(next);
                                            }
                                        />
                                        <span>{opt.label.clone()}</span>
                                    </label>
                                }
                            }
                        </For>
                    </Show>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_toggle_multi() {
        assert_eq!(toggle_value(&ids(&["a"]), "b", false), ids(&["a", "b"]));
        assert_eq!(toggle_value(&ids(&["a", "b"]), "a", false), ids(&["b"]));
    }

    #[test]
    fn test_toggle_single_replaces() {
        assert_eq!(toggle_value(&ids(&["a"]), "b", true), ids(&["b"]));
        assert!(toggle_value(&ids(&["a"]), "a", true).is_empty());
    }

    #[test]
    fn test_summary_label() {
        let options = vec![
            SelectOption::new("1", "Acme"),
            SelectOption::new("2", "Globex"),
            SelectOption::new("3", "Initech"),
        ];
        assert_eq!(summary_label(&options, &[], "Company"), "Company");
        assert_eq!(summary_label(&options, &ids(&["2", "1"]), "Company"), "Acme, Globex");
        assert_eq!(summary_label(&options, &ids(&["1", "2", "3"]), "Company"), "3 selected");
    }
}
