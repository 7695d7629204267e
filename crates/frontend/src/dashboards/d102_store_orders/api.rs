use chrono::NaiveDate;
use contracts::domain::a003_store_order::{
    AvailableItem, AvailableItemsResponse, CreateOrderRequest, OrderAnalytics,
    OrderSubmitResponse, RecentOrder, RecentOrdersResponse, UpdateOrderRequest,
};
use contracts::shared::{ApiError, DateRange};
use serde::Serialize;

use crate::dashboards::scope::Scope;
use crate::shared::api_utils::{segment, with_query};
use crate::shared::http::{get_json, post_json};

#[derive(Serialize)]
struct AnalyticsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<NaiveDate>,
}

fn scoped(prefix: &str, scope: &Scope) -> String {
    format!(
        "{}/{}/{}",
        prefix,
        segment(&scope.company_id),
        segment(&scope.location_id)
    )
}

/// Items from the location's master file that can be ordered.
pub async fn fetch_available_items(scope: &Scope) -> Result<Vec<AvailableItem>, ApiError> {
    let response: AvailableItemsResponse =
        get_json(&scoped("/api/masterfile/availableitems", scope)).await?;
    Ok(response.items)
}

pub async fn fetch_recent_orders(scope: &Scope) -> Result<Vec<RecentOrder>, ApiError> {
    let response: RecentOrdersResponse =
        get_json(&scoped("/api/storeorders/detailsrecent", scope)).await?;
    Ok(response.orders)
}

pub async fn fetch_analytics(scope: &Scope, range: DateRange) -> Result<OrderAnalytics, ApiError> {
    let query = AnalyticsQuery {
        start_date: range.start_date,
        end_date: range.end_date,
    };
    get_json(&with_query(&scoped("/api/storeorders/analytics", scope), &query)).await
}

pub async fn create_order(request: &CreateOrderRequest) -> Result<OrderSubmitResponse, ApiError> {
    post_json("/api/storeorders/orderitems", request).await
}

pub async fn update_order(request: &UpdateOrderRequest) -> Result<OrderSubmitResponse, ApiError> {
    post_json("/api/storeorders/orderupdate", request).await
}
