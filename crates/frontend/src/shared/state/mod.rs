pub mod date_range;
pub mod load_sequence;
pub mod persist;
pub mod selection;
pub mod selection_store;

pub use date_range::{use_date_range, DateRangeStore};
pub use load_sequence::LoadSequence;
pub use selection::{AppliedFilters, DataSource, MasterData, Selection, SelectionAction, SelectionState};
pub use selection_store::{use_selection, LoadOutcome, SelectionStore};
