pub mod api_error;
pub mod chart_math;
pub mod currency;
pub mod date_range;
pub mod serde_helpers;

pub use api_error::ApiError;
pub use date_range::DateRange;
