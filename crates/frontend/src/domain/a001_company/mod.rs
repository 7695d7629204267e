pub mod api;
pub mod state;

pub use state::{use_company_catalog, CompanyCatalogStore};
