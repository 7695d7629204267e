use leptos::prelude::*;

use super::scale::{show_label, ChartFrame};
use super::tooltip::{ChartTooltip, TooltipData, TooltipRow};
use super::{empty_chart, x_label, y_grid, BarDatum};
use crate::shared::number_format::ValueFormat;

const Y_TICKS: usize = 4;
const MAX_X_LABELS: usize = 12;

/// Vertical bars, one per category.
#[component]
pub fn BarChart(
    #[prop(into)] title: String,
    #[prop(into)] data: Signal<Vec<BarDatum>>,
    format: ValueFormat,
    #[prop(optional)] color: Option<&'static str>,
) -> impl IntoView {
    let frame = ChartFrame::default();
    let color = color.unwrap_or(super::series_color(0));
    let hovered = RwSignal::new(None::<usize>);

    let tooltip = Signal::derive(move || {
        let index = hovered.get()?;
        data.with(|bars| {
            let bar = bars.get(index)?;
            let max = bars.iter().map(|b| b.value).fold(0.0, f64::max);
            let bands = frame.x_bands(bars.len());
            let y = frame.y_scale(max).map(bar.value.max(0.0));
            Some(
                TooltipData::at(bands.center(index), y, frame.width, frame.height, bar.label.clone())
                    .row(TooltipRow::new("Value", format.format(bar.value), Some(color))),
            )
        })
    });

    let chart = move || {
        let bars = data.get();
        if bars.is_empty() {
            return empty_chart("No data");
        }
        let max = bars.iter().map(|b| b.value).fold(0.0, f64::max);
        let y = frame.y_scale(max);
        let bands = frame.x_bands(bars.len());
        let count = bars.len();

        view! {
            <svg viewBox={frame.view_box()} class="chart__svg" on:mouseleave=move |_| hovered.set(None)>
                {y_grid(frame, y, format, Y_TICKS)}

                {bars.into_iter().enumerate().map(|(i, bar)| {
                    let top = y.map(bar.value.max(0.0));
                    let height = (frame.bottom() - top).max(0.0);
                    view! {
                        <rect
                            class="chart__bar"
                            class:chart__bar--active=move || hovered.get() == Some(i)
                            x={bands.start(i).to_string()}
                            y={top.to_string()}
                            width={bands.bandwidth().to_string()}
                            height={height.to_string()}
                            fill=color
                            on:mouseenter=move |_| hovered.set(Some(i))
                        />
                        {show_label(i, count, MAX_X_LABELS).then(|| x_label(frame, bands.center(i), bar.label))}
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
