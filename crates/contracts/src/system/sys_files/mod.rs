pub mod dto;

pub use dto::{DataKind, DeleteFilesResponse, UploadedFile, UploadedFilesResponse};
