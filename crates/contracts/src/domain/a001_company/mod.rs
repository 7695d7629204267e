pub mod aggregate;

pub use aggregate::{Company, CompanyCatalog, Location};
