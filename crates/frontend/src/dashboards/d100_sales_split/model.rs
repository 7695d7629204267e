use contracts::dashboards::d100_sales_split::{
    AverageTicketRow, ExcelFilterRequest, SalesChannel, SalesChannelRow,
};
use contracts::shared::chart_math::percent_series;

use crate::shared::charts::{series_color, BarDatum, Series};

/// Value of the location and period selects meaning "no restriction".
pub const ALL: &str = "";

/// How the chart sections are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Tabbed,
    Stacked,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Tabbed => Self::Stacked,
            Self::Stacked => Self::Tabbed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SalesTab {
    Sales,
    Orders,
    Share,
    ThirdParty,
    Ticket,
}

impl SalesTab {
    pub const ALL: [SalesTab; 5] = [
        SalesTab::Sales,
        SalesTab::Orders,
        SalesTab::Share,
        SalesTab::ThirdParty,
        SalesTab::Ticket,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Sales => "Sales by channel",
            Self::Orders => "Orders by channel",
            Self::Share => "Channel share",
            Self::ThirdParty => "Third party vs in-house",
            Self::Ticket => "Average ticket",
        }
    }
}

pub fn period_labels(rows: &[SalesChannelRow]) -> Vec<String> {
    rows.iter().map(|r| r.period.clone()).collect()
}

/// One series per channel, aligned with [`period_labels`].
pub fn channel_series(rows: &[SalesChannelRow]) -> Vec<Series> {
    SalesChannel::ALL
        .iter()
        .enumerate()
        .map(|(i, channel)| {
            Series::new(
                channel.label(),
                series_color(i),
                rows.iter().map(|r| r.channel(*channel)).collect(),
            )
        })
        .collect()
}

pub fn grand_totals(rows: &[SalesChannelRow]) -> Vec<f64> {
    rows.iter().map(|r| r.grand_total).collect()
}

/// Third-party sales as a percentage of in-house sales, per period.
pub fn third_party_ratio(rows: &[SalesChannelRow]) -> Vec<BarDatum> {
    let ratios = percent_series(rows, SalesChannelRow::third_party, |r| r.in_house);
    rows.iter()
        .zip(ratios)
        .map(|(r, ratio)| BarDatum::new(r.period.clone(), ratio))
        .collect()
}

pub fn ticket_labels(rows: &[AverageTicketRow]) -> Vec<String> {
    rows.iter().map(|r| r.period.clone()).collect()
}

pub fn overall_ticket(rows: &[AverageTicketRow]) -> Vec<f64> {
    rows.iter().map(|r| r.overall).collect()
}

/// Filter request for the current selects; [`ALL`] leaves a field unset.
pub fn filter_request(file_name: &str, location: &str, date_range: &str) -> ExcelFilterRequest {
    let pick = |value: &str| (value != ALL).then(|| value.to_string());
    ExcelFilterRequest {
        file_name: file_name.to_string(),
        location: pick(location),
        date_range: pick(date_range),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(period: &str, in_house: f64, doordash: f64, ubereats: f64, total: f64) -> SalesChannelRow {
        SalesChannelRow {
            period: period.into(),
            in_house,
            doordash,
            ubereats,
            grand_total: total,
            ..Default::default()
        }
    }

    #[test]
    fn test_channel_series_alignment() {
        let rows = vec![row("W1", 100.0, 20.0, 5.0, 125.0), row("W2", 80.0, 0.0, 10.0, 90.0)];
        let series = channel_series(&rows);
        assert_eq!(series.len(), SalesChannel::ALL.len());
        assert_eq!(series[0].name, "In-House");
        assert_eq!(series[0].values, vec![100.0, 80.0]);
        assert_eq!(series[2].values, vec![20.0, 0.0]);
        assert_eq!(period_labels(&rows), vec!["W1", "W2"]);
        assert_eq!(grand_totals(&rows), vec![125.0, 90.0]);
    }

    #[test]
    fn test_third_party_ratio_guards_zero_in_house() {
        let rows = vec![row("W1", 100.0, 20.0, 5.0, 125.0), row("W2", 0.0, 10.0, 0.0, 10.0)];
        let ratio = third_party_ratio(&rows);
        assert_eq!(ratio[0].value, 25.0);
        assert_eq!(ratio[1].value, 0.0);
    }

    #[test]
    fn test_filter_request_all_is_unset() {
        let req = filter_request("sales.xlsx", ALL, "2024-01-01 - 2024-01-07");
        assert_eq!(req.location, None);
        assert_eq!(req.date_range.as_deref(), Some("2024-01-01 - 2024-01-07"));

        let req = filter_request("sales.xlsx", "Downtown", ALL);
        assert_eq!(req.location.as_deref(), Some("Downtown"));
        assert_eq!(req.date_range, None);
    }

    #[test]
    fn test_view_mode_toggle() {
        assert_eq!(ViewMode::Tabbed.toggled(), ViewMode::Stacked);
        assert_eq!(ViewMode::Stacked.toggled().toggled(), ViewMode::Stacked);
    }
}
