pub mod auto_select;
pub mod left;
pub mod scope_selector;
pub mod sidebar;

pub use left::Left;
pub use scope_selector::ScopeSelector;
pub use sidebar::Sidebar;
