use chrono::{Datelike, Duration, NaiveDate, Utc};
use leptos::prelude::*;
use thaw::*;

const ISO_FORMAT: &str = "%Y-%m-%d";

/// First and last day of a month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDate, NaiveDate)> {
    let start = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };
    Some((start, next - Duration::days(1)))
}

/// The month before the one containing `date`.
pub fn previous_month_bounds(date: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
    let (year, month) = if date.month() == 1 {
        (date.year() - 1, 12)
    } else {
        (date.year(), date.month() - 1)
    };
    month_bounds(year, month)
}

/// `days` days ending today, inclusive.
pub fn trailing_days(today: NaiveDate, days: i64) -> (NaiveDate, NaiveDate) {
    (today - Duration::days((days - 1).max(0)), today)
}

fn to_inputs((start, end): (NaiveDate, NaiveDate)) -> (String, String) {
    (
        start.format(ISO_FORMAT).to_string(),
        end.format(ISO_FORMAT).to_string(),
    )
}

/// Date range input: two date fields plus quick presets.
///
/// Values are `yyyy-mm-dd` strings; empty means an open bound. Validation is
/// left to the owner, which passes the resulting message back in `error`.
#[component]
pub fn DateRangePicker(
    #[prop(into)] date_from: Signal<String>,
    #[prop(into)] date_to: Signal<String>,
    on_change: Callback<(String, String)>,
    #[prop(optional, into)] error: MaybeProp<String>,
    #[prop(optional)] label: Option<String>,
) -> impl IntoView {
    let on_current_month = move |_| {
        let today = Utc::now().date_naive();
        if let Some(bounds) = month_bounds(today.year(), today.month()) {
            on_change.run(to_inputs(bounds));
        }
    };

    // Steps back from the currently selected start, so repeated clicks walk back.
    let on_previous_month = move |_| {
        let anchor = NaiveDate::parse_from_str(&date_from.get_untracked(), ISO_FORMAT)
            .unwrap_or_else(|_| Utc::now().date_naive());
        if let Some(bounds) = previous_month_bounds(anchor) {
            on_change.run(to_inputs(bounds));
        }
    };

    let on_last_30_days = move |_| {
        on_change.run(to_inputs(trailing_days(Utc::now().date_naive(), 30)));
    };

    let on_all_dates = move |_| on_change.run((String::new(), String::new()));

    view! {
        <Flex vertical=true gap=FlexGap::Small>
            {label.map(|l| view! { <Label>{l}</Label> })}

            <Flex class="date-range-picker" align=FlexAlign::Center gap=FlexGap::Small>
                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=date_from
                    on:input=move |ev| on_change.run((event_target_value(&ev), date_to.get_untracked()))
                />
                <div>"—"</div>
                <input
                    type="date"
                    class="date-range-picker__input"
                    prop:value=date_to
                    on:input=move |ev| on_change.run((date_from.get_untracked(), event_target_value(&ev)))
                />
                <ButtonGroup>
                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=on_previous_month>
                        "-1M"
                    </Button>
                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=on_current_month>
                        "0M"
                    </Button>
                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=on_last_30_days>
                        "30D"
                    </Button>
                    <Button size=ButtonSize::Small appearance=ButtonAppearance::Subtle on_click=on_all_dates>
                        "All"
                    </Button>
                </ButtonGroup>
            </Flex>

            {move || error.get().map(|e| view! { <div class="date-range-picker__error">{e}</div> })}
        </Flex>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_bounds(2024, 2), Some((date(2024, 2, 1), date(2024, 2, 29))));
        assert_eq!(month_bounds(2023, 12), Some((date(2023, 12, 1), date(2023, 12, 31))));
        assert_eq!(month_bounds(2023, 13), None);
    }

    #[test]
    fn test_previous_month_wraps_year() {
        assert_eq!(
            previous_month_bounds(date(2024, 1, 15)),
            Some((date(2023, 12, 1), date(2023, 12, 31)))
        );
    }

    #[test]
    fn test_trailing_days() {
        assert_eq!(trailing_days(date(2024, 3, 30), 30), (date(2024, 3, 1), date(2024, 3, 30)));
        assert_eq!(trailing_days(date(2024, 3, 30), 1), (date(2024, 3, 30), date(2024, 3, 30)));
    }
}
