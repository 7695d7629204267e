/// List helpers: search box, sort indicators, value ordering, paging
use contracts::shared::currency::parse_strict;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::Value;
use std::cmp::Ordering;

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Order two JSON cells: numbers (and numeric strings such as `$1,200`)
/// numerically, everything else case-insensitively as text. Empty sorts last.
pub fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (sort_key(a), sort_key(b)) {
        (SortKey::Empty, SortKey::Empty) => Ordering::Equal,
        (SortKey::Empty, _) => Ordering::Greater,
        (_, SortKey::Empty) => Ordering::Less,
        (SortKey::Number(x), SortKey::Number(y)) => x.total_cmp(&y),
        (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
        (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        (SortKey::Text(x), SortKey::Text(y)) => x.cmp(&y),
    }
}

enum SortKey {
    Empty,
    Number(f64),
    Text(String),
}

fn sort_key(value: Option<&Value>) -> SortKey {
    match value {
        None | Some(Value::Null) => SortKey::Empty,
        Some(Value::Number(n)) => n.as_f64().map(SortKey::Number).unwrap_or(SortKey::Empty),
        Some(Value::Bool(b)) => SortKey::Number(if *b { 1.0 } else { 0.0 }),
        Some(Value::String(s)) if s.trim().is_empty() => SortKey::Empty,
        Some(Value::String(s)) => match parse_strict(s) {
            Some(n) => SortKey::Number(n),
            None => SortKey::Text(s.to_lowercase()),
        },
        Some(other) => SortKey::Text(other.to_string().to_lowercase()),
    }
}

/// Number of pages for `total` items; at least 1.
pub fn total_pages(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    total.div_ceil(page_size).max(1)
}

/// Items of page `page` (0-indexed); the page is clamped to the last one.
pub fn page_slice<T: Clone>(items: &[T], page: usize, page_size: usize) -> Vec<T> {
    if page_size == 0 {
        return items.to_vec();
    }
    let page = page.min(total_pages(items.len(), page_size) - 1);
    items
        .iter()
        .skip(page * page_size)
        .take(page_size)
        .cloned()
        .collect()
}

/// Sort indicator for a column header
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "sort-icon active"
    } else {
        "sort-icon"
    }
}

/// Search input that reports its value after a short pause in typing.
#[component]
pub fn SearchInput(
    #[prop(into)] value: Signal<String>,
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    // Only the latest keystroke's timer may fire.
    let token = StoredValue::new(0u64);

    let handle_input_change = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let my_token = token.get_value() + 1;
        token.set_value(my_token);
        spawn_local(async move {
            TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if token.get_value() == my_token {
                on_change.run(new_value);
            }
        });
    };

    let clear_filter = move |_| {
        token.update_value(|t| *t += 1);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input" class:search-input--active=move || !value.get().trim().is_empty()>
            <input
                type="text"
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input_change(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear_filter title="Clear">
                    {crate::shared::icons::icon("x")}
                </button>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_compare_values_numeric_aware() {
        let ten = json!("$10.00");
        let nine = json!(9);
        assert_eq!(compare_values(Some(&nine), Some(&ten)), Ordering::Less);
        assert_eq!(
            compare_values(Some(&json!("apple")), Some(&json!("Banana"))),
            Ordering::Less
        );
        assert_eq!(compare_values(Some(&json!(1)), Some(&json!("abc"))), Ordering::Less);
    }

    #[test]
    fn test_empty_sorts_last() {
        assert_eq!(compare_values(None, Some(&json!(1))), Ordering::Greater);
        assert_eq!(compare_values(Some(&json!("")), Some(&json!("x"))), Ordering::Greater);
        assert_eq!(compare_values(Some(&Value::Null), None), Ordering::Equal);
    }

    #[test]
    fn test_paging() {
        let items: Vec<u32> = (0..23).collect();
        assert_eq!(total_pages(items.len(), 10), 3);
        assert_eq!(total_pages(0, 10), 1);
        assert_eq!(page_slice(&items, 2, 10), vec![20, 21, 22]);
        // Out-of-range page clamps to the last one.
        assert_eq!(page_slice(&items, 9, 10), vec![20, 21, 22]);
        assert!(page_slice::<u32>(&[], 0, 10).is_empty());
    }

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("price", "price", true), " ▲");
        assert_eq!(get_sort_indicator("price", "price", false), " ▼");
        assert_eq!(get_sort_indicator("price", "name", true), " ⇅");
    }
}
