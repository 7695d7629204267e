use contracts::dashboards::d101_product_mix::{ProductMixRequest, ProductMixTables};
use contracts::shared::DateRange;

use crate::dashboards::scope::Scope;
use crate::shared::charts::BarDatum;

pub const TOP_ITEMS: usize = 10;

pub fn request(scope: &Scope, range: DateRange) -> ProductMixRequest {
    ProductMixRequest {
        company_id: scope.company_id.clone(),
        location_id: scope.location_id.clone(),
        start_date: range.start_date,
        end_date: range.end_date,
    }
}

/// Category share of net sales, largest first.
pub fn share_bars(tables: &ProductMixTables) -> Vec<BarDatum> {
    let mut bars: Vec<BarDatum> = tables
        .category_shares()
        .into_iter()
        .map(|(category, share)| BarDatum::new(category, share))
        .collect();
    bars.sort_by(|a, b| b.value.total_cmp(&a.value));
    bars
}

pub fn category_sales_bars(tables: &ProductMixTables) -> Vec<BarDatum> {
    tables
        .categories
        .iter()
        .map(|c| BarDatum::new(c.category.clone(), c.net_sales))
        .collect()
}

pub fn period_labels(tables: &ProductMixTables) -> Vec<String> {
    tables.periods.iter().map(|p| p.period.clone()).collect()
}

pub fn period_sales(tables: &ProductMixTables) -> Vec<f64> {
    tables.periods.iter().map(|p| p.net_sales).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::dashboards::d101_product_mix::CategorySalesRow;

    fn category(name: &str, net_sales: f64) -> CategorySalesRow {
        CategorySalesRow {
            category: name.into(),
            quantity: 1.0,
            net_sales,
        }
    }

    #[test]
    fn test_share_bars_sorted() {
        let tables = ProductMixTables {
            categories: vec![category("Drinks", 100.0), category("Food", 300.0)],
            ..Default::default()
        };
        let bars = share_bars(&tables);
        assert_eq!(bars[0], BarDatum::new("Food", 75.0));
        assert_eq!(bars[1], BarDatum::new("Drinks", 25.0));
        assert_eq!(category_sales_bars(&tables)[0].value, 100.0);
    }

    #[test]
    fn test_request_carries_range() {
        let scope = Scope::from_parts("1", "10").unwrap();
        let start = NaiveDate::from_ymd_opt(2024, 1, 1);
        let range = DateRange::new(start, None).unwrap();
        let req = request(&scope, range);
        assert_eq!(req.company_id, "1");
        assert_eq!(req.start_date, start);
        assert_eq!(req.end_date, None);
    }
}
