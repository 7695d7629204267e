use contracts::shared::chart_math::percentage;
use leptos::prelude::*;

use super::legend::{Legend, LegendItem};
use super::scale::{show_label, ChartFrame};
use super::tooltip::{ChartTooltip, TooltipData, TooltipRow};
use super::{empty_chart, x_label, y_grid, Series};
use crate::shared::number_format::ValueFormat;

const Y_TICKS: usize = 4;
const MAX_X_LABELS: usize = 12;

/// Each raw series divided by the per-category denominator, in percent.
pub fn to_percentages(series: &[Series], denominators: &[f64]) -> Vec<Series> {
    series
        .iter()
        .map(|s| {
            let values = (0..denominators.len())
                .map(|i| percentage(s.value(i), denominators[i]))
                .collect();
            Series::new(s.name.clone(), s.color, values)
        })
        .collect()
}

/// Grouped bars of `series[k][i] / denominators[i]`.
#[component]
pub fn PercentageChart(
    #[prop(into)] title: String,
    #[prop(into)] labels: Signal<Vec<String>>,
    #[prop(into)] series: Signal<Vec<Series>>,
    #[prop(into)] denominators: Signal<Vec<f64>>,
) -> impl IntoView {
    let frame = ChartFrame::default();
    let format = ValueFormat::Percent;
    let hovered = RwSignal::new(None::<usize>);

    let percents = Memo::new(move |_| {
        series.with(|s| denominators.with(|d| to_percentages(s, d)))
    });

    let legend = Signal::derive(move || {
        percents.with(|all| {
            all.iter()
                .map(|s| LegendItem::new(s.name.clone(), s.color))
                .collect::<Vec<_>>()
        })
    });

    let tooltip = Signal::derive(move || {
        let index = hovered.get()?;
        let title = labels.with(|l| l.get(index).cloned())?;
        percents.with(|all| {
            let max = all.iter().flat_map(|s| s.values.iter().copied()).fold(0.0, f64::max);
            let top = all.iter().map(|s| s.value(index)).fold(0.0, f64::max);
            let bands = frame.x_bands(labels.with(Vec::len));
            let y = frame.y_scale(max).map(top);
            let tip = TooltipData::at(bands.center(index), y, frame.width, frame.height, title);
            Some(all.iter().fold(tip, |tip, s| {
                tip.row(TooltipRow::new(s.name.clone(), format.format(s.value(index)), Some(s.color)))
            }))
        })
    });

    let chart = move || {
        let labels = labels.get();
        let all = percents.get();
        if labels.is_empty() || all.is_empty() {
            return empty_chart("No data");
        }
        let count = labels.len();
        let groups = all.len();
        let max = all.iter().flat_map(|s| s.values.iter().copied()).fold(0.0, f64::max);
        let y = frame.y_scale(max);
        let bands = frame.x_bands(count);
        let bar_width = bands.bandwidth() / groups as f64;

        view! {
            <svg viewBox={frame.view_box()} class="chart__svg" on:mouseleave=move |_| hovered.set(None)>
                {y_grid(frame, y, format, Y_TICKS)}
                {labels.into_iter().enumerate().map(|(i, label)| {
                    let bars = all.iter().enumerate().map(|(k, s)| {
                        let top = y.map(s.value(i).max(0.0));
                        let height = (frame.bottom() - top).max(0.0);
                        view! {
                            <rect
                                x={(bands.start(i) + bar_width * k as f64).to_string()}
                                y={top.to_string()}
                                width={bar_width.to_string()}
                                height={height.to_string()}
                                fill=s.color
                            />
                        }
                    }).collect_view();
                    view! {
                        <g
                            class="chart__group"
                            class:chart__group--active=move || hovered.get() == Some(i)
                            on:mouseenter=move |_| hovered.set(Some(i))
                        >
                            {bars}
                        </g>
                        {show_label(i, count, MAX_X_LABELS).then(|| x_label(frame, bands.center(i), label))}
                    }
                }).collect_view()}
            </svg>
        }
        .into_any()
    };

    view! {
        <div class="chart">
            <div class="chart__title">{title}</div>
            <div class="chart__body">
                {chart}
                <ChartTooltip data=tooltip />
            </div>
            <Legend items=legend />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_percentages_handles_zero_denominator() {
        let series = vec![
            Series::new("DoorDash", "#111", vec![25.0, 10.0, 3.0]),
            Series::new("UberEats", "#222", vec![50.0]),
        ];
        let out = to_percentages(&series, &[100.0, 0.0, 8.0]);
        assert_eq!(out[0].values, vec![25.0, 0.0, 37.5]);
        assert_eq!(out[1].values, vec![50.0, 0.0, 0.0]);
        assert_eq!(out[1].name, "UberEats");
    }
}
