pub mod dto;

pub use dto::{CategorySalesRow, ItemSalesRow, PeriodSalesRow, ProductMixRequest, ProductMixTables};
