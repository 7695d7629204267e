pub mod alert;
pub mod confirm_dialog;
pub mod date_range_picker;
pub mod filter_panel;
pub mod multi_select;
pub mod page_header;
pub mod pagination_controls;
pub mod stat_card;
