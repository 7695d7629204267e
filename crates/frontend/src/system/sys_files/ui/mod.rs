pub mod list;

pub use list::FilesPage;
