pub mod dto;
pub mod merge;
pub mod normalize;
pub mod schema;

pub use dto::{
    FieldRoles, MasterFileDetail, MasterFileDetailsResponse, MasterFileQuery, MasterFileResponse,
    MasterUploadRequest, MessageResponse, UpdateRowRequest,
};
pub use merge::{merge_sources, MergedMasterData, SourceFailure};
pub use normalize::{normalize_master_file, MasterFileRow, NormalizedFile, RowIdScheme, RowMeta};
pub use schema::{ColumnDef, ColumnSchema};
