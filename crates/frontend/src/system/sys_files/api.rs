use contracts::shared::ApiError;
use contracts::system::sys_files::{
    DataKind, DeleteFilesResponse, UploadedFile, UploadedFilesResponse,
};

use crate::shared::api_utils::segment;
use crate::shared::http::{delete_json, get_json};

fn files_path(kind: DataKind) -> String {
    format!("/api/{}/files", kind.path_segment())
}

pub async fn list_files(kind: DataKind) -> Result<Vec<UploadedFile>, ApiError> {
    let response: UploadedFilesResponse = get_json(&files_path(kind)).await?;
    Ok(response.files)
}

pub async fn delete_file(kind: DataKind, filename: &str) -> Result<DeleteFilesResponse, ApiError> {
    delete_json(&format!("{}/{}", files_path(kind), segment(filename))).await
}

/// Remove every uploaded file of `kind`.
pub async fn clear_files(kind: DataKind) -> Result<DeleteFilesResponse, ApiError> {
    delete_json(&files_path(kind)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_files_path() {
        assert_eq!(files_path(DataKind::SalesPmix), "/api/salespmix/files");
        assert_eq!(files_path(DataKind::Budget), "/api/budget/files");
    }
}
