use contracts::domain::a001_company::{Company, CompanyCatalog};
use contracts::shared::ApiError;

use crate::shared::http::get_json;

/// All companies with their locations.
pub async fn fetch_company_catalog() -> Result<CompanyCatalog, ApiError> {
    let companies: Vec<Company> = get_json("/company-locations/all").await?;
    log::debug!("Loaded {} companies", companies.len());
    Ok(CompanyCatalog::new(companies))
}
