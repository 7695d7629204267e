pub mod dto;

pub use dto::{
    AverageTicketRow, ExcelFilterRequest, ExcelUploadRequest, LocationSalesRow, SalesChannel,
    SalesChannelRow, SalesSplitTables,
};
