use contracts::dashboards::d100_sales_split::{
    ExcelFilterRequest, ExcelUploadRequest, SalesSplitTables,
};
use contracts::shared::ApiError;

use crate::shared::file_utils::EncodedFile;
use crate::shared::http::post_json;

/// Upload a sales export and get the split tables back.
pub async fn upload_sales_file(file: &EncodedFile) -> Result<SalesSplitTables, ApiError> {
    let request = ExcelUploadRequest {
        file_name: file.name.clone(),
        file_content: file.content.clone(),
    };
    let tables: SalesSplitTables = post_json("/api/excel/upload", &request).await?;
    tables.validate()
}

/// Recompute the tables of an uploaded file for one location and period.
pub async fn filter_sales(request: &ExcelFilterRequest) -> Result<SalesSplitTables, ApiError> {
    let tables: SalesSplitTables = post_json("/api/excel/filter", request).await?;
    tables.validate()
}
