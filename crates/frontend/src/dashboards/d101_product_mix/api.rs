use contracts::dashboards::d101_product_mix::{ProductMixRequest, ProductMixTables};
use contracts::shared::ApiError;

use crate::shared::http::post_json;

/// Product mix analytics for one location and an optional date range.
pub async fn fetch_product_mix(request: &ProductMixRequest) -> Result<ProductMixTables, ApiError> {
    let tables: ProductMixTables = post_json("/api/excel/analytics", request).await?;
    tables.validate()
}
