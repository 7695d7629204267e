pub mod d100_sales_split;
pub mod d101_product_mix;
