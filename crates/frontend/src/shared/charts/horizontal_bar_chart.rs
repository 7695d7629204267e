use leptos::prelude::*;

use super::scale::{nice_max, LinearScale};
use super::tooltip::{ChartTooltip, TooltipData, TooltipRow};
use super::{empty_chart, series_color, BarDatum};
use crate::shared::number_format::ValueFormat;

const WIDTH: f64 = 800.0;
const LABEL_WIDTH: f64 = 180.0;
const VALUE_WIDTH: f64 = 90.0;
const ROW_HEIGHT: f64 = 28.0;
const BAR_HEIGHT: f64 = 18.0;
const PADDING: f64 = 8.0;

/// Total SVG height for `rows` bars.
pub fn chart_height(rows: usize) -> f64 {
    rows as f64 * ROW_HEIGHT + PADDING * 2.0
}

/// Labelled horizontal bars, longest list first as given.
#[component]
pub fn HorizontalBarChart(
    #[prop(into)] title: String,
    #[prop(into)] data: Signal<Vec<BarDatum>>,
    format: ValueFormat,
) -> impl IntoView {
    let hovered = RwSignal::new(None::<usize>);

    let x_scale = move |bars: &[BarDatum]| {
        let max = bars.iter().map(|b| b.value).fold(0.0, f64::max);
        LinearScale::new((0.0, nice_max(max)), (LABEL_WIDTH, WIDTH - VALUE_WIDTH))
    };

    let tooltip = Signal::derive(move || {
        let index = hovered.get()?;
        data.with(|bars| {
            let bar = bars.get(index)?;
            let x = x_scale(bars).map(bar.value.max(0.0));
            let y = PADDING + ROW_HEIGHT * (index as f64 + 0.5);
            Some(
                TooltipData::at(x, y, WIDTH, chart_height(bars.len()), bar.label.clone())
                    .row(TooltipRow::new("Value", format.format(bar.value), Some(series_color(index)))),
            )
        })
    });

    let chart = move || {
        let bars = data.get();
        if bars.is_empty() {
            return empty_chart("No data");
        }
        let x = x_scale(&bars);
        let height = chart_height(bars.len());

        view! {
            <svg
                viewBox={format!("0 0 {} {}", WIDTH, height)}
                class="chart__svg"
                on:mouseleave=move |_| hovered.set(None)
            >
                {bars.into_iter().enumerate().map(|(i, bar)| {
                    let row_y = PADDING + ROW_HEIGHT * i as f64;
                    let bar_y = row_y + (ROW_HEIGHT - BAR_HEIGHT) / 2.0;
                    let text_y = row_y + ROW_HEIGHT / 2.0 + 4.0;
                    let end = x.map(bar.value.max(0.0));
                    view! {
                        <g
                            class="chart__hbar"
                            class:chart__hbar--active=move || hovered.get() == Some(i)
                            on:mouseenter=move |_| hovered.set(Some(i))
                        >
                            <text class="chart__axis-label" x={(LABEL_WIDTH - 8.0).to_string()} y={text_y.to_string()} text-anchor="end">
                                {bar.label}
                            </text>
                            <rect
                                x={LABEL_WIDTH.to_string()}
                                y={bar_y.to_string()}
                                width={(end - LABEL_WIDTH).max(0.0).to_string()}
                                height={BAR_HEIGHT.to_string()}
                                fill=series_color(i)
                            />
                            <text class="chart__value-label" x={(end + 6.0).to_string()} y={text_y.to_string()}>
                                {format.format(bar.value)}
                            </text>
                        </g>
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
        </div>
    }
}
