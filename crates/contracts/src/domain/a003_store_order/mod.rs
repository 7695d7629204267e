pub mod dto;

pub use dto::{
    AvailableItem, AvailableItemsResponse, CreateOrderRequest, OrderAnalytics, OrderLine,
    OrderSubmitResponse, RecentOrder, RecentOrdersResponse, TopItemRow, UpdateOrderRequest,
    WeeklySpendRow,
};
