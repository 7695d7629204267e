//! SVG charts over already-aggregated tables.
//!
//! Each chart owns only its derived series and hover state.

pub mod bar_chart;
pub mod horizontal_bar_chart;
pub mod legend;
pub mod percentage_chart;
pub mod scale;
pub mod stacked_bar_chart;
pub mod tooltip;
pub mod trend_chart;

pub use bar_chart::BarChart;
pub use horizontal_bar_chart::HorizontalBarChart;
pub use legend::{Legend, LegendItem};
pub use percentage_chart::PercentageChart;
pub use stacked_bar_chart::StackedBarChart;
pub use tooltip::{ChartTooltip, TooltipData, TooltipRow};
pub use trend_chart::TrendChart;

pub const PALETTE: [&str; 8] = [
    "#2563eb", "#f97316", "#10b981", "#e11d48", "#8b5cf6", "#eab308", "#0891b2", "#64748b",
];

pub fn series_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

/// One named value per category.
#[derive(Debug, Clone, PartialEq)]
pub struct BarDatum {
    pub label: String,
    pub value: f64,
}

impl BarDatum {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A named series aligned with the chart's category labels.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub color: &'static str,
    pub values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, color: &'static str, values: Vec<f64>) -> Self {
        Self {
            name: name.into(),
            color,
            values,
        }
    }

    pub fn value(&self, index: usize) -> f64 {
        self.values
            .get(index)
            .copied()
            .filter(|v| v.is_finite())
            .unwrap_or(0.0)
    }
}

/// Mouse x in viewBox units, from an event on the chart's `<svg>`.
pub fn pointer_x(ev: &web_sys::MouseEvent, view_width: f64) -> Option<f64> {
    use wasm_bindgen::JsCast;
    let target = ev.current_target()?.dyn_into::<web_sys::Element>().ok()?;
    let rect = target.get_bounding_client_rect();
    if rect.width() <= 0.0 {
        return None;
    }
    Some((ev.client_x() as f64 - rect.left()) / rect.width() * view_width)
}

pub(crate) fn empty_chart(message: &'static str) -> leptos::prelude::AnyView {
    use leptos::prelude::*;
    view! { <div class="chart__empty">{message}</div> }.into_any()
}

/// Horizontal grid lines with value labels, plus the x axis line.
pub(crate) fn y_grid(
    frame: scale::ChartFrame,
    y: scale::LinearScale,
    format: crate::shared::number_format::ValueFormat,
    ticks: usize,
) -> leptos::prelude::AnyView {
    use leptos::prelude::*;
    view! {
        <g class="chart__y-grid">
            {y.ticks(ticks).into_iter().map(|tick| {
                let ty = y.map(tick);
                view! {
                    <line class="chart__grid" x1={frame.margin_left.to_string()} x2={frame.right().to_string()} y1={ty.to_string()} y2={ty.to_string()} />
                    <text class="chart__axis-label" x={(frame.margin_left - 8.0).to_string()} y={(ty + 4.0).to_string()} text-anchor="end">
                        {format.axis(tick)}
                    </text>
                }
            }).collect_view()}
            <line class="chart__axis" x1={frame.margin_left.to_string()} x2={frame.right().to_string()} y1={frame.bottom().to_string()} y2={frame.bottom().to_string()} />
        </g>
    }
    .into_any()
}

/// Category label under band `index`.
pub(crate) fn x_label(frame: scale::ChartFrame, x: f64, label: String) -> leptos::prelude::AnyView {
    use leptos::prelude::*;
    view! {
        <text class="chart__axis-label" x={x.to_string()} y={(frame.bottom() + 18.0).to_string()} text-anchor="middle">
            {label}
        </text>
    }
    .into_any()
}
