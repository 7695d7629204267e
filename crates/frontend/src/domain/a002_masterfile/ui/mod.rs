pub mod grid;
pub mod upload_dialog;

pub use grid::MasterFileGrid;
