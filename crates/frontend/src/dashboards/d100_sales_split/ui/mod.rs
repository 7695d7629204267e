pub mod page;

pub use page::SalesSplitPage;
