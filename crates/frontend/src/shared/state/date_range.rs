//! Persisted date-range slice shared by the analytics pages.

use contracts::shared::DateRange;
use leptos::prelude::*;

use super::persist::{load_json, save_json};

const STORAGE_KEY: &str = "dashboard_date_range_v1";

#[derive(Clone, Copy)]
pub struct DateRangeStore {
    range: RwSignal<DateRange>,
}

impl DateRangeStore {
    pub fn new() -> Self {
        let restored = load_json::<DateRange>(STORAGE_KEY)
            .and_then(|r| DateRange::new(r.start_date, r.end_date).ok())
            .unwrap_or_default();
        Self {
            range: RwSignal::new(restored),
        }
    }

    pub fn range(&self) -> Signal<DateRange> {
        self.range.into()
    }

    pub fn get_untracked(&self) -> DateRange {
        self.range.get_untracked()
    }

    pub fn set(&self, range: DateRange) {
        save_json(STORAGE_KEY, &range);
        self.range.set(range);
    }

    /// Validate raw `yyyy-mm-dd` inputs and store them.
    pub fn set_inputs(&self, start: &str, end: &str) -> Result<(), String> {
        let range = DateRange::from_inputs(start, end).map_err(|e| e.to_string())?;
        self.set(range);
        Ok(())
    }
}

impl Default for DateRangeStore {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_date_range() -> DateRangeStore {
    use_context::<DateRangeStore>().expect("DateRangeStore context not found")
}
