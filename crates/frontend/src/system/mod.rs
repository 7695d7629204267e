pub mod auth;
pub mod sys_files;
