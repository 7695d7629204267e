use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    pub label: String,
    pub color: &'static str,
    /// Dashed swatch for derived lines (moving average)
    pub dashed: bool,
}

impl LegendItem {
    pub fn new(label: impl Into<String>, color: &'static str) -> Self {
        Self {
            label: label.into(),
            color,
            dashed: false,
        }
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

#[component]
pub fn Legend(#[prop(into)] items: Signal<Vec<LegendItem>>) -> impl IntoView {
    view! {
        <div class="chart-legend">
            {move || items.get().into_iter().map(|item| {
                let style = if item.dashed {
                    format!("border-top: 2px dashed {}; background: transparent;", item.color)
                } else {
                    format!("background: {};", item.color)
                };
                view! {
                    <span class="chart-legend__item">
                        <span class="chart-legend__swatch" style=style></span>
                        {item.label}
                    </span>
                }
            }).collect_view()}
        </div>
    }
}
