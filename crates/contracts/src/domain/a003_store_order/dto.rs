use serde::{Deserialize, Serialize};

use crate::shared::serde_helpers::{currency, id_string, opt_id_string};

/// Orderable item from the location's master file
/// (`GET /api/masterfile/availableitems/{company_id}/{location_id}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailableItem {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "currency")]
    pub price: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AvailableItemsResponse {
    #[serde(default)]
    pub items: Vec<AvailableItem>,
}

/// One line of a submitted or recent order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(deserialize_with = "id_string")]
    pub item_id: String,
    pub name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "currency")]
    pub price: f64,
    #[serde(default)]
    pub unit: String,
    pub quantity: u32,
}

impl OrderLine {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentOrder {
    #[serde(deserialize_with = "id_string")]
    pub id: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub items: Vec<OrderLine>,
    #[serde(default, deserialize_with = "currency")]
    pub total: f64,
}

/// `GET /api/storeorders/detailsrecent/{company_id}/{location_id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecentOrdersResponse {
    #[serde(default)]
    pub orders: Vec<RecentOrder>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySpendRow {
    pub week: String,
    #[serde(default, deserialize_with = "currency")]
    pub spend: f64,
    #[serde(default)]
    pub orders: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopItemRow {
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    #[serde(default, deserialize_with = "currency")]
    pub spend: f64,
}

/// `GET /api/storeorders/analytics/{company_id}/{location_id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderAnalytics {
    #[serde(default)]
    pub total_orders: u32,
    #[serde(default, deserialize_with = "currency")]
    pub total_spend: f64,
    #[serde(default, deserialize_with = "currency")]
    pub average_order_value: f64,
    #[serde(default)]
    pub weekly: Vec<WeeklySpendRow>,
    #[serde(default)]
    pub top_items: Vec<TopItemRow>,
}

/// `POST /api/storeorders/orderitems`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderRequest {
    pub company_id: String,
    pub location_id: String,
    pub items: Vec<OrderLine>,
}

/// `POST /api/storeorders/orderupdate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderRequest {
    pub order_id: String,
    pub company_id: String,
    pub location_id: String,
    pub items: Vec<OrderLine>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderSubmitResponse {
    #[serde(default, deserialize_with = "opt_id_string")]
    pub order_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recent_orders_payload() {
        let json = r#"{"orders": [
            {"id": 42, "created_at": "2024-05-02T10:00:00", "total": "$31.50",
             "items": [{"item_id": 7, "name": "Flour", "price": "10.50", "quantity": 3}]}
        ]}"#;
        let parsed: RecentOrdersResponse = serde_json::from_str(json).unwrap();
        let order = &parsed.orders[0];
        assert_eq!(order.id, "42");
        assert_eq!(order.total, 31.5);
        assert_eq!(order.items[0].item_id, "7");
        assert_eq!(order.items[0].line_total(), 31.5);
    }

    #[test]
    fn test_analytics_defaults() {
        let parsed: OrderAnalytics = serde_json::from_str(r#"{"total_orders": 3}"#).unwrap();
        assert_eq!(parsed.total_orders, 3);
        assert_eq!(parsed.total_spend, 0.0);
        assert!(parsed.weekly.is_empty());
    }

    #[test]
    fn test_submit_response_numeric_id() {
        let parsed: OrderSubmitResponse = serde_json::from_str(r#"{"order_id": 9}"#).unwrap();
        assert_eq!(parsed.order_id.as_deref(), Some("9"));
    }
}
