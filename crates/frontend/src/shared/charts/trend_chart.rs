use contracts::shared::chart_math::moving_average;
use leptos::prelude::*;

use super::legend::{Legend, LegendItem};
use super::scale::{line_path, show_label, ChartFrame};
use super::tooltip::{ChartTooltip, TooltipData, TooltipRow};
use super::{empty_chart, pointer_x, series_color, x_label, y_grid};
use crate::shared::number_format::ValueFormat;

const Y_TICKS: usize = 4;
const MAX_X_LABELS: usize = 10;
const AVERAGE_COLOR: &str = "#64748b";

/// Index of the point nearest to viewBox x, for `count` points centred in
/// equal bands between `left` and `right`.
pub fn nearest_index(x: f64, count: usize, left: f64, right: f64) -> Option<usize> {
    if count == 0 || right <= left {
        return None;
    }
    let step = (right - left) / count as f64;
    let raw = ((x - left) / step - 0.5).round();
    Some(raw.clamp(0.0, (count - 1) as f64) as usize)
}

/// Raw series as a line with markers plus its moving average dashed.
/// Hovering anywhere on the plot snaps a crosshair to the nearest point.
#[component]
pub fn TrendChart(
    #[prop(into)] title: String,
    #[prop(into)] labels: Signal<Vec<String>>,
    #[prop(into)] values: Signal<Vec<f64>>,
    #[prop(into)] series_name: String,
    format: ValueFormat,
) -> impl IntoView {
    let frame = ChartFrame::default();
    let color = series_color(0);
    let hovered = RwSignal::new(None::<usize>);

    let averages = Memo::new(move |_| values.with(|v| moving_average(v)));
    let max_value = Memo::new(move |_| {
        let raw = values.with(|v| v.iter().copied().filter(|v| v.is_finite()).fold(0.0, f64::max));
        averages.with(|a| a.iter().copied().fold(raw, f64::max))
    });

    let legend_name = series_name.clone();
    let legend = Signal::derive(move || {
        vec![
            LegendItem::new(legend_name.clone(), color),
            LegendItem::new("Moving average", AVERAGE_COLOR).dashed(),
        ]
    });

    let tooltip_name = series_name.clone();
    let tooltip = Signal::derive(move || {
        let index = hovered.get()?;
        let title = labels.with(|l| l.get(index).cloned())?;
        let value = values.with(|v| v.get(index).copied())?;
        let average = averages.with(|a| a.get(index).copied()).unwrap_or(value);
        let bands = frame.x_bands(values.with(Vec::len));
        let y = frame.y_scale(max_value.get()).map(value);
        Some(
            TooltipData::at(bands.center(index), y, frame.width, frame.height, title)
                .row(TooltipRow::new(tooltip_name.clone(), format.format(value), Some(color)))
                .row(TooltipRow::new("Moving average", format.format(average), Some(AVERAGE_COLOR))),
        )
    });

    let on_move = move |ev: web_sys::MouseEvent| {
        let count = values.with_untracked(Vec::len);
        let index = pointer_x(&ev, frame.width)
            .and_then(|x| nearest_index(x, count, frame.margin_left, frame.right()));
        if hovered.get_untracked() != index {
            hovered.set(index);
        }
    };

    let chart = move || {
        let labels = labels.get();
        let raw = values.get();
        if raw.is_empty() {
            return empty_chart("No data");
        }
        let count = raw.len();
        let y = frame.y_scale(max_value.get());
        let bands = frame.x_bands(count);
        let points: Vec<(f64, f64)> = raw
            .iter()
            .enumerate()
            .map(|(i, v)| (bands.center(i), y.map(*v)))
            .collect();
        let average_points: Vec<(f64, f64)> = averages
            .get()
            .iter()
            .enumerate()
            .map(|(i, v)| (bands.center(i), y.map(*v)))
            .collect();

        let crosshair = move || {
            hovered.get().filter(|i| *i < count).map(|i| {
                let x = bands.center(i);
                view! {
                    <line
                        class="chart__crosshair"
                        x1={x.to_string()}
                        x2={x.to_string()}
                        y1={frame.margin_top.to_string()}
                        y2={frame.bottom().to_string()}
                    />
                }
            })
        };

        view! {
            <svg
                viewBox={frame.view_box()}
                class="chart__svg"
                on:mousemove=on_move
                on:mouseleave=move |_| hovered.set(None)
            >
                {y_grid(frame, y, format, Y_TICKS)}
                {crosshair}
                <path class="chart__line" d={line_path(&points)} stroke=color fill="none" />
                <path
                    class="chart__line chart__line--average"
                    d={line_path(&average_points)}
                    stroke=AVERAGE_COLOR
                    stroke-dasharray="6 4"
                    fill="none"
                />
                {points.iter().enumerate().map(|(i, (x, py))| view! {
                    <circle
                        class="chart__point"
                        class:chart__point--active=move || hovered.get() == Some(i)
                        cx={x.to_string()}
                        cy={py.to_string()}
                        r="3.5"
                        fill=color
                    />
                }).collect_view()}
                {labels.into_iter().take(count).enumerate().map(|(i, label)| {
                    show_label(i, count, MAX_X_LABELS).then(|| x_label(frame, bands.center(i), label))
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
    fn test_nearest_index_snaps_and_clamps() {
        // 4 points in [0, 400): centres at 50, 150, 250, 350
        assert_eq!(nearest_index(50.0, 4, 0.0, 400.0), Some(0));
        assert_eq!(nearest_index(140.0, 4, 0.0, 400.0), Some(1));
        assert_eq!(nearest_index(210.0, 4, 0.0, 400.0), Some(2));
        assert_eq!(nearest_index(-30.0, 4, 0.0, 400.0), Some(0));
        assert_eq!(nearest_index(999.0, 4, 0.0, 400.0), Some(3));
    }

    #[test]
    fn test_nearest_index_empty() {
        assert_eq!(nearest_index(10.0, 0, 0.0, 400.0), None);
        assert_eq!(nearest_index(10.0, 3, 400.0, 400.0), None);
    }
}
