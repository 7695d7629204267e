use leptos::prelude::*;

use super::legend::{Legend, LegendItem};
use super::scale::{show_label, ChartFrame};
use super::tooltip::{ChartTooltip, TooltipData, TooltipRow};
use super::{empty_chart, x_label, y_grid, Series};
use crate::shared::number_format::ValueFormat;

const Y_TICKS: usize = 4;
const MAX_X_LABELS: usize = 12;

/// Per-category segment boundaries `(series index, from, to)`; negatives are
/// drawn as zero.
pub fn stack_segments(series: &[Series], index: usize) -> Vec<(usize, f64, f64)> {
    let mut base = 0.0;
    series
        .iter()
        .enumerate()
        .map(|(s, serie)| {
            let value = serie.value(index).max(0.0);
            let segment = (s, base, base + value);
            base += value;
            segment
        })
        .collect()
}

pub fn stack_total(series: &[Series], index: usize) -> f64 {
    series.iter().map(|s| s.value(index).max(0.0)).sum()
}

/// Bars split into one segment per series.
#[component]
pub fn StackedBarChart(
    #[prop(into)] title: String,
    #[prop(into)] labels: Signal<Vec<String>>,
    #[prop(into)] series: Signal<Vec<Series>>,
    format: ValueFormat,
) -> impl IntoView {
    let frame = ChartFrame::default();
    let hovered = RwSignal::new(None::<usize>);

    let legend = Signal::derive(move || {
        series.with(|all| {
            all.iter()
                .map(|s| LegendItem::new(s.name.clone(), s.color))
                .collect::<Vec<_>>()
        })
    });

    let tooltip = Signal::derive(move || {
        let index = hovered.get()?;
        let title = labels.with(|l| l.get(index).cloned())?;
        series.with(|all| {
            let max = (0..labels.with(Vec::len))
                .map(|i| stack_total(all, i))
                .fold(0.0, f64::max);
            let bands = frame.x_bands(labels.with(Vec::len));
            let total = stack_total(all, index);
            let y = frame.y_scale(max).map(total);
            let tip = all.iter().fold(
                TooltipData::at(bands.center(index), y, frame.width, frame.height, title),
                |tip, s| tip.row(TooltipRow::new(s.name.clone(), format.format(s.value(index)), Some(s.color))),
            );
            Some(tip.row(TooltipRow::new("Total", format.format(total), None)))
        })
    });

    let chart = move || {
        let labels = labels.get();
        let all = series.get();
        if labels.is_empty() || all.is_empty() {
            return empty_chart("No data");
        }
        let count = labels.len();
        let max = (0..count).map(|i| stack_total(&all, i)).fold(0.0, f64::max);
        let y = frame.y_scale(max);
        let bands = frame.x_bands(count);

        view! {
            <svg viewBox={frame.view_box()} class="chart__svg" on:mouseleave=move |_| hovered.set(None)>
                {y_grid(frame, y, format, Y_TICKS)}
                {labels.into_iter().enumerate().map(|(i, label)| {
                    let segments = stack_segments(&all, i);
                    view! {
                        <g
                            class="chart__stack"
                            class:chart__stack--active=move || hovered.get() == Some(i)
                            on:mouseenter=move |_| hovered.set(Some(i))
                        >
                            {segments.into_iter().map(|(s, from, to)| {
                                let top = y.map(to);
                                let height = (y.map(from) - top).max(0.0);
                                view! {
                                    <rect
                                        x={bands.start(i).to_string()}
                                        y={top.to_string()}
                                        width={bands.bandwidth().to_string()}
                                        height={height.to_string()}
                                        fill=all[s].color
                                    />
                                }
                            }).collect_view()}
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
    fn test_stack_segments() {
        let series = vec![
            Series::new("In-House", "#000", vec![100.0, 50.0]),
            Series::new("DoorDash", "#111", vec![-5.0, 25.0]),
            Series::new("UberEats", "#222", vec![20.0]),
        ];
        assert_eq!(
            stack_segments(&series, 0),
            vec![(0, 0.0, 100.0), (1, 100.0, 100.0), (2, 100.0, 120.0)]
        );
        // Missing values count as zero.
        assert_eq!(stack_total(&series, 1), 75.0);
    }
}
