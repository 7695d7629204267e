use serde::{Deserialize, Serialize};

use crate::shared::serde_helpers::opt_id_string;

/// Kinds of uploaded spreadsheets managed on the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataKind {
    SalesPmix,
    FinancialsCompanywide,
    Budget,
}

impl DataKind {
    pub const ALL: [DataKind; 3] = [
        DataKind::SalesPmix,
        DataKind::FinancialsCompanywide,
        DataKind::Budget,
    ];

    /// Path segment used by the file endpoints (`/api/{segment}/files`).
    pub fn path_segment(self) -> &'static str {
        match self {
            Self::SalesPmix => "salespmix",
            Self::FinancialsCompanywide => "financialscompanywide",
            Self::Budget => "budget",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::SalesPmix => "Sales & Product Mix",
            Self::FinancialsCompanywide => "Company-wide Financials",
            Self::Budget => "Budget",
        }
    }

    pub fn from_segment(segment: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.path_segment() == segment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub filename: String,
    #[serde(default)]
    pub uploaded_at: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub company_id: Option<String>,
    #[serde(default, deserialize_with = "opt_id_string")]
    pub location_id: Option<String>,
    #[serde(default)]
    pub row_count: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadedFilesResponse {
    #[serde(default)]
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteFilesResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub deleted: Option<u64>,
}
