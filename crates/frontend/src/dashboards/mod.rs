pub mod d100_sales_split;
pub mod d101_product_mix;
pub mod d102_store_orders;
pub mod scope;

pub use d100_sales_split::ui::SalesSplitPage;
pub use d101_product_mix::ui::ProductMixDashboard;
pub use d102_store_orders::ui::StoreOrdersDashboard;
