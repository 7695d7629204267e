use contracts::domain::a002_masterfile::{
    MasterFileDetail, MasterFileDetailsResponse, MasterFileQuery, MasterFileResponse,
    MasterUploadRequest, MessageResponse, UpdateRowRequest,
};
use contracts::shared::ApiError;

use crate::shared::api_utils::segment;
use crate::shared::http::{get_json, post_json};

/// Catalog of uploaded master files.
pub async fn fetch_details() -> Result<Vec<MasterFileDetail>, ApiError> {
    let response: MasterFileDetailsResponse = get_json("/api/masterfile/details").await?;
    Ok(response.data)
}

/// Contents of one master file.
pub async fn fetch_master_file(query: &MasterFileQuery) -> Result<MasterFileResponse, ApiError> {
    let path = format!(
        "/api/masterfile/details/{}/{}/{}",
        segment(&query.company_id),
        segment(&query.location_id),
        segment(&query.filename)
    );
    get_json(&path).await
}

/// Persist one edited row.
pub async fn update_row(request: &UpdateRowRequest) -> Result<MessageResponse, ApiError> {
    post_json("/api/masterfile/updatefile", request).await
}

pub async fn upload_master(request: &MasterUploadRequest) -> Result<MessageResponse, ApiError> {
    post_json("/api/master/upload", request).await
}
