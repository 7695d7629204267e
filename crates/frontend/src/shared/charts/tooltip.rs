use leptos::prelude::*;

#[derive(Debug, Clone, PartialEq)]
pub struct TooltipRow {
    pub label: String,
    pub value: String,
    pub color: Option<&'static str>,
}

impl TooltipRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>, color: Option<&'static str>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            color,
        }
    }
}

/// Tooltip content anchored at a point of the chart, in percent of its box.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipData {
    pub left_pct: f64,
    pub top_pct: f64,
    pub title: String,
    pub rows: Vec<TooltipRow>,
}

impl TooltipData {
    /// Anchor at viewBox point `(x, y)` of a `width` × `height` chart.
    pub fn at(x: f64, y: f64, width: f64, height: f64, title: impl Into<String>) -> Self {
        let pct = |v: f64, total: f64| if total > 0.0 { (v / total * 100.0).clamp(0.0, 100.0) } else { 0.0 };
        Self {
            left_pct: pct(x, width),
            top_pct: pct(y, height),
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn row(mut self, row: TooltipRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Flip to the left of the anchor in the right half so it stays inside.
    fn transform(&self) -> &'static str {
        if self.left_pct > 60.0 {
            "translate(calc(-100% - 12px), -50%)"
        } else {
            "translate(12px, -50%)"
        }
    }
}

#[component]
pub fn ChartTooltip(#[prop(into)] data: Signal<Option<TooltipData>>) -> impl IntoView {
    move || {
        data.get().map(|tip| {
            let style = format!(
                "left: {:.2}%; top: {:.2}%; transform: {};",
                tip.left_pct,
                tip.top_pct,
                tip.transform()
            );
            view! {
                <div class="chart-tooltip" style=style>
                    <div class="chart-tooltip__title">{tip.title.clone()}</div>
                    {tip.rows.into_iter().map(|row| view! {
                        <div class="chart-tooltip__row">
                            {row.color.map(|c| view! {
                                <span class="chart-tooltip__swatch" style=format!("background: {};", c)></span>
                            })}
                            <span class="chart-tooltip__label">{row.label}</span>
                            <span class="chart-tooltip__value">{row.value}</span>
                        </div>
                    }).collect_view()}
                </div>
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_is_clamped_percent() {
        let tip = TooltipData::at(400.0, 140.0, 800.0, 280.0, "Week 1");
        assert_eq!(tip.left_pct, 50.0);
        assert_eq!(tip.top_pct, 50.0);
        assert_eq!(TooltipData::at(900.0, -5.0, 800.0, 280.0, "").left_pct, 100.0);
        assert_eq!(TooltipData::at(900.0, -5.0, 800.0, 280.0, "").top_pct, 0.0);
    }

    #[test]
    fn test_flips_near_right_edge() {
        assert!(TooltipData::at(700.0, 0.0, 800.0, 280.0, "").transform().contains("-100%"));
        assert!(!TooltipData::at(100.0, 0.0, 800.0, 280.0, "").transform().contains("-100%"));
    }
}
