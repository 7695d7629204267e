pub mod a001_company;
pub mod a002_masterfile;
pub mod a003_store_order;
