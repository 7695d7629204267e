use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shared::chart_math::share_of_total;
use crate::shared::serde_helpers::currency;
use crate::shared::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategorySalesRow {
    #[serde(alias = "Category")]
    pub category: String,
    #[serde(default, alias = "Quantity", deserialize_with = "currency")]
    pub quantity: f64,
    #[serde(default, alias = "Net Sales", deserialize_with = "currency")]
    pub net_sales: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSalesRow {
    #[serde(alias = "Item")]
    pub item_name: String,
    #[serde(default, alias = "Category")]
    pub category: String,
    #[serde(default, alias = "Quantity", deserialize_with = "currency")]
    pub quantity: f64,
    #[serde(default, alias = "Net Sales", deserialize_with = "currency")]
    pub net_sales: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodSalesRow {
    #[serde(alias = "Week", alias = "week")]
    pub period: String,
    #[serde(default, alias = "Net Sales", deserialize_with = "currency")]
    pub net_sales: f64,
    #[serde(default, alias = "Quantity", deserialize_with = "currency")]
    pub quantity: f64,
}

/// Product mix analytics (`POST /api/excel/analytics`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductMixTables {
    #[serde(rename = "table1", default)]
    pub categories: Vec<CategorySalesRow>,
    #[serde(rename = "table2", default)]
    pub items: Vec<ItemSalesRow>,
    #[serde(rename = "table3", default)]
    pub periods: Vec<PeriodSalesRow>,
    #[serde(default, alias = "dateRanges")]
    pub date_ranges: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
}

impl ProductMixTables {
    pub fn validate(self) -> Result<Self, ApiError> {
        if self.categories.is_empty() && self.items.is_empty() && self.periods.is_empty() {
            return Err(ApiError::Payload("response contains no product mix tables".into()));
        }
        Ok(self)
    }

    pub fn total_net_sales(&self) -> f64 {
        self.categories.iter().map(|c| c.net_sales).sum()
    }

    /// `(category, % of net sales)` in table order.
    pub fn category_shares(&self) -> Vec<(String, f64)> {
        let sales: Vec<f64> = self.categories.iter().map(|c| c.net_sales).collect();
        self.categories
            .iter()
            .zip(share_of_total(&sales))
            .map(|(c, share)| (c.category.clone(), share))
            .collect()
    }

    /// Items sorted by net sales, highest first.
    pub fn top_items(&self, limit: usize) -> Vec<ItemSalesRow> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| b.net_sales.total_cmp(&a.net_sales));
        items.truncate(limit);
        items
    }
}

/// Request body for `POST /api/excel/analytics`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMixRequest {
    pub company_id: String,
    pub location_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> ProductMixTables {
        serde_json::from_str(
            r#####"{
                "table1": [
                    {"Category": "Food", "Quantity": 120, "Net Sales": "$3,000.00"},
                    {"Category": "Drinks", "Quantity": 80, "Net Sales": "$1,000.00"}
                ],
                "table2": [
                    {"Item": "Latte", "Category": "Drinks", "Quantity": 40, "Net Sales": 200},
                    {"Item": "Burger", "Category": "Food", "Quantity": 60, "Net Sales": 900},
                    {"Item": "Fries", "Category": "Food", "Quantity": 60, "Net Sales": "####"}
                ]
            }"#####,
        )
        .unwrap()
    }

    #[test]
    fn test_category_shares() {
        let tables = tables();
        assert_eq!(tables.total_net_sales(), 4000.0);
        assert_eq!(
            tables.category_shares(),
            vec![("Food".to_string(), 75.0), ("Drinks".to_string(), 25.0)]
        );
    }

    #[test]
    fn test_top_items() {
        let top = tables().top_items(2);
        let names: Vec<&str> = top.iter().map(|i| i.item_name.as_str()).collect();
        assert_eq!(names, vec!["Burger", "Latte"]);
    }

    #[test]
    fn test_validate() {
        assert!(tables().validate().is_ok());
        assert!(ProductMixTables::default().validate().is_err());
    }
}
