pub mod api;
pub mod cart;
pub mod loaded;
pub mod ui;
