pub mod api_utils;
pub mod charts;
pub mod components;
pub mod config;
pub mod file_utils;
pub mod http;
pub mod icons;
pub mod list_utils;
pub mod number_format;
pub mod state;
