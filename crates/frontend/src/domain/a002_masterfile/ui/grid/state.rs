//! Pure view logic of the master file grid: cascading picker options, the
//! auto-apply decision, secondary filters, sorting and the price range.

use contracts::domain::a002_masterfile::{ColumnSchema, MasterFileDetail, MasterFileQuery, MasterFileRow};
use serde_json::Value;

use crate::shared::components::multi_select::SelectOption;
use crate::shared::list_utils::compare_values;
use crate::shared::state::{DataSource, Selection};

// ---------------------------------------------------------------------------
// Cascading pickers

fn push_option(options: &mut Vec<SelectOption>, value: &str, label: &str) {
    if !options.iter().any(|o| o.value == value) {
        options.push(SelectOption::new(value, label));
    }
}

/// Companies that have at least one uploaded file, in catalog order.
pub fn company_options(details: &[MasterFileDetail]) -> Vec<SelectOption> {
    let mut options = Vec::new();
    for d in details {
        push_option(&mut options, &d.company_id, &d.company_name);
    }
    options
}

/// Locations with files under the selected companies.
pub fn location_options(details: &[MasterFileDetail], companies: &[String]) -> Vec<SelectOption> {
    let mut options = Vec::new();
    for d in details.iter().filter(|d| companies.contains(&d.company_id)) {
        push_option(&mut options, &d.location_id, &d.location_name);
    }
    options
}

/// Files uploaded for the selected companies and locations.
pub fn filename_options(
    details: &[MasterFileDetail],
    companies: &[String],
    locations: &[String],
) -> Vec<SelectOption> {
    let mut options = Vec::new();
    for d in details
        .iter()
        .filter(|d| companies.contains(&d.company_id) && locations.contains(&d.location_id))
    {
        push_option(&mut options, &d.filename, &d.filename);
    }
    options
}

// ---------------------------------------------------------------------------
// Auto-apply

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadPlan {
    Single(MasterFileQuery),
    Multiple(Vec<MasterFileQuery>),
}

impl LoadPlan {
    /// Whether `source` already holds exactly these files.
    pub fn is_loaded_in(&self, source: &DataSource) -> bool {
        match (self, source) {
            (Self::Single(q), DataSource::Single(loaded)) => q == loaded,
            (Self::Multiple(qs), DataSource::Multiple(loaded)) => qs == loaded,
            _ => false,
        }
    }
}

/// What the grid can do with the current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoApply {
    AwaitingCompany,
    AwaitingLocation,
    SingleLocationRequired,
    AwaitingFilename,
    Ready(LoadPlan),
}

impl AutoApply {
    pub fn decide(selection: &Selection, details: &[MasterFileDetail]) -> Self {
        let Selection {
            companies,
            locations,
            filenames,
        } = selection;
        if companies.is_empty() {
            return Self::AwaitingCompany;
        }
        let location = match locations.as_slice() {
            [] => return Self::AwaitingLocation,
            [one] => one,
            _ => return Self::SingleLocationRequired,
        };
        if filenames.is_empty() {
            return Self::AwaitingFilename;
        }

        let mut queries: Vec<MasterFileQuery> = filenames
            .iter()
            .map(|filename| {
                let company_id = owning_company(details, companies, location, filename)
                    .unwrap_or_else(|| companies[0].clone());
                MasterFileQuery::new(company_id, location.clone(), filename.clone())
            })
            .collect();

        if queries.len() == 1 {
            Self::Ready(LoadPlan::Single(queries.remove(0)))
        } else {
            Self::Ready(LoadPlan::Multiple(queries))
        }
    }

    /// Guidance shown while the selection is incomplete.
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Self::AwaitingCompany => Some("Select a company to see its master files."),
            Self::AwaitingLocation => Some("Select a location."),
            Self::SingleLocationRequired => {
                Some("Master files are loaded for one location at a time. Select a single location.")
            }
            Self::AwaitingFilename => Some("Select one or more files to load."),
            Self::Ready(_) => None,
        }
    }
}

fn owning_company(
    details: &[MasterFileDetail],
    companies: &[String],
    location: &str,
    filename: &str,
) -> Option<String> {
    details
        .iter()
        .find(|d| {
            d.location_id == location && d.filename == filename && companies.contains(&d.company_id)
        })
        .map(|d| d.company_id.clone())
}

// ---------------------------------------------------------------------------
// Secondary filters

#[derive(Debug, Clone, Default, PartialEq)]
pub struct GridFilters {
    pub search: String,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    pub unit: Option<String>,
    pub category: Option<String>,
}

impl GridFilters {
    pub fn active_count(&self) -> usize {
        [
            !self.search.trim().is_empty(),
            self.price_min.is_some() || self.price_max.is_some(),
            self.unit.is_some(),
            self.category.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    pub fn matches(&self, row: &MasterFileRow, schema: &ColumnSchema) -> bool {
        matches_search(row, &self.search)
            && self.matches_price(row, schema)
            && matches_choice(row, schema.unit_key(), self.unit.as_deref())
            && matches_choice(row, schema.category_key(), self.category.as_deref())
    }

    fn matches_price(&self, row: &MasterFileRow, schema: &ColumnSchema) -> bool {
        if self.price_min.is_none() && self.price_max.is_none() {
            return true;
        }
        let Some(price) = schema.current_price_key().and_then(|k| row.number(k)) else {
            return false;
        };
        self.price_min.map_or(true, |min| price >= min) && self.price_max.map_or(true, |max| price <= max)
    }
}

/// Case-insensitive substring match over text cells.
pub fn matches_search(row: &MasterFileRow, search: &str) -> bool {
    let needle = search.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    row.cells.values().any(|value| match value {
        Value::String(s) => s.to_lowercase().contains(&needle),
        _ => false,
    })
}

fn matches_choice(row: &MasterFileRow, key: Option<&str>, wanted: Option<&str>) -> bool {
    match (key, wanted) {
        (_, None) => true,
        (None, Some(_)) => true,
        (Some(key), Some(wanted)) => row.text(key) == wanted,
    }
}

/// Distinct non-empty texts of a column, sorted.
pub fn distinct_values(rows: &[MasterFileRow], key: Option<&str>) -> Vec<String> {
    let Some(key) = key else {
        return Vec::new();
    };
    let mut values: Vec<String> = rows
        .iter()
        .map(|r| r.text(key))
        .filter(|v| !v.trim().is_empty())
        .collect();
    values.sort_by_key(|v| v.to_lowercase());
    values.dedup();
    values
}

// ---------------------------------------------------------------------------
// Price range

/// Lowest and highest current price of the loaded rows.
pub fn price_bounds(rows: &[MasterFileRow], schema: &ColumnSchema) -> Option<(f64, f64)> {
    let key = schema.current_price_key()?;
    rows.iter()
        .filter_map(|r| r.number(key))
        .fold(None, |acc, price| match acc {
            None => Some((price, price)),
            Some((lo, hi)) => Some((lo.min(price), hi.max(price))),
        })
}

/// Price filter as edited through the number inputs and the slider.
///
/// Both controls write through [`PriceRange::set_min`]/[`PriceRange::set_max`],
/// so they always show the same clamped values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    pub bounds: (f64, f64),
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(bounds: (f64, f64)) -> Self {
        Self {
            bounds,
            min: bounds.0,
            max: bounds.1,
        }
    }

    pub fn set_min(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.min = value.clamp(self.bounds.0, self.max);
    }

    pub fn set_max(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.max = value.clamp(self.min, self.bounds.1);
    }

    pub fn is_full(&self) -> bool {
        self.min <= self.bounds.0 && self.max >= self.bounds.1
    }

    /// Same selection over new bounds. A full range stays full, a narrowed one
    /// is clamped into the new bounds.
    pub fn rebound(self, bounds: (f64, f64)) -> Self {
        if self.is_full() {
            return Self::new(bounds);
        }
        let min = self.min.clamp(bounds.0, bounds.1);
        Self {
            bounds,
            min,
            max: self.max.clamp(min, bounds.1),
        }
    }

    /// Filter bounds; a full range filters nothing.
    pub fn as_filter(&self) -> (Option<f64>, Option<f64>) {
        if self.is_full() {
            (None, None)
        } else {
            (Some(self.min), Some(self.max))
        }
    }

    /// Slider step: about a hundred steps across the range.
    pub fn step(&self) -> f64 {
        let span = self.bounds.1 - self.bounds.0;
        if span <= 0.0 {
            0.01
        } else {
            (span / 100.0).max(0.01)
        }
    }
}

/// Slider state after the loaded prices changed. New data starts from the
/// full range; an edit within the same data keeps the user's selection.
pub fn next_price_range(
    current: Option<PriceRange>,
    bounds: Option<(f64, f64)>,
    same_source: bool,
) -> Option<PriceRange> {
    match (current, bounds) {
        (Some(range), Some(bounds)) if same_source => Some(range.rebound(bounds)),
        (_, bounds) => bounds.map(PriceRange::new),
    }
}

// ---------------------------------------------------------------------------
// Sorting

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortState {
    pub column: Option<String>,
    pub ascending: bool,
}

impl SortState {
    /// Clicking the sorted column flips the direction; another column sorts ascending.
    pub fn toggle(&mut self, column: &str) {
        if self.column.as_deref() == Some(column) {
            self.ascending = !self.ascending;
        } else {
            self.column = Some(column.to_string());
            self.ascending = true;
        }
    }

    pub fn apply(&self, rows: &mut [MasterFileRow]) {
        let Some(column) = self.column.as_deref() else {
            return;
        };
        rows.sort_by(|a, b| {
            let order = compare_values(a.cell(column), b.cell(column));
            if self.ascending {
                order
            } else {
                // Empty cells stay last in both directions.
                match (is_blank(a.cell(column)), is_blank(b.cell(column))) {
                    (false, false) => order.reverse(),
                    _ => order,
                }
            }
        });
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        _ => false,
    }
}

/// Filtered then sorted rows.
pub fn visible_rows(
    rows: &[MasterFileRow],
    schema: &ColumnSchema,
    filters: &GridFilters,
    sort: &SortState,
) -> Vec<MasterFileRow> {
    let mut visible: Vec<MasterFileRow> = rows
        .iter()
        .filter(|r| filters.matches(r, schema))
        .cloned()
        .collect();
    sort.apply(&mut visible);
    visible
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_masterfile::{FieldRoles, RowMeta};
    use serde_json::{json, Map};

    fn detail(c: &str, l: &str, f: &str) -> MasterFileDetail {
        MasterFileDetail {
            company_id: c.into(),
            company_name: format!("Company {}", c),
            filename: f.into(),
            location_id: l.into(),
            location_name: format!("Location {}", l),
        }
    }

    fn details() -> Vec<MasterFileDetail> {
        vec![
            detail("A", "L1", "prices.xlsx"),
            detail("A", "L1", "drinks.xlsx"),
            detail("A", "L2", "prices.xlsx"),
            detail("B", "L3", "menu.xlsx"),
        ]
    }

    fn ids(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn selection(c: &[&str], l: &[&str], f: &[&str]) -> Selection {
        Selection {
            companies: ids(c),
            locations: ids(l),
            filenames: ids(f),
        }
    }

    fn schema() -> ColumnSchema {
        let columns = json!({"item": "Item", "price": "Price", "unit": "Unit", "cat": "Category"});
        ColumnSchema::from_response(
            columns.as_object().unwrap(),
            &FieldRoles {
                current_price: Some("price".into()),
                unit: Some("unit".into()),
                category: Some("cat".into()),
                ..Default::default()
            },
        )
        .unwrap()
    }

    fn row(id: &str, cells: serde_json::Value) -> MasterFileRow {
        let cells: Map<String, Value> = cells.as_object().cloned().unwrap();
        MasterFileRow {
            id: id.into(),
            cells,
            meta: RowMeta::default(),
        }
    }

    fn rows() -> Vec<MasterFileRow> {
        vec![
            row("r0", json!({"item": "Burger Bun", "price": 2.5, "unit": "ea", "cat": "Bakery"})),
            row("r1", json!({"item": "Tomato", "price": "$10.00", "unit": "kg", "cat": "Produce"})),
            row("r2", json!({"item": "Lettuce", "price": null, "unit": "kg", "cat": "Produce"})),
            row("r3", json!({"item": "Cheddar", "price": 7, "unit": "kg", "cat": "Dairy"})),
        ]
    }

    #[test]
    fn test_cascade_options() {
        let details = details();
        assert_eq!(company_options(&details).len(), 2);

        let locations = location_options(&details, &ids(&["A"]));
        let values: Vec<_> = locations.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["L1", "L2"]);

        let files = filename_options(&details, &ids(&["A"]), &ids(&["L1"]));
        let values: Vec<_> = files.iter().map(|o| o.value.as_str()).collect();
        assert_eq!(values, vec!["prices.xlsx", "drinks.xlsx"]);

        assert!(filename_options(&details, &ids(&["B"]), &ids(&["L1"])).is_empty());
    }

    #[test]
    fn test_auto_apply_decision() {
        let details = details();
        assert_eq!(AutoApply::decide(&selection(&[], &[], &[]), &details), AutoApply::AwaitingCompany);
        assert_eq!(AutoApply::decide(&selection(&["A"], &[], &[]), &details), AutoApply::AwaitingLocation);
        assert_eq!(
            AutoApply::decide(&selection(&["A"], &["L1", "L2"], &[]), &details),
            AutoApply::SingleLocationRequired
        );
        assert_eq!(
            AutoApply::decide(&selection(&["A"], &["L1"], &[]), &details),
            AutoApply::AwaitingFilename
        );
        assert_eq!(
            AutoApply::decide(&selection(&["A"], &["L1"], &["prices.xlsx"]), &details),
            AutoApply::Ready(LoadPlan::Single(MasterFileQuery::new("A", "L1", "prices.xlsx")))
        );
        assert_eq!(
            AutoApply::decide(&selection(&["A"], &["L1"], &["prices.xlsx", "drinks.xlsx"]), &details),
            AutoApply::Ready(LoadPlan::Multiple(vec![
                MasterFileQuery::new("A", "L1", "prices.xlsx"),
                MasterFileQuery::new("A", "L1", "drinks.xlsx"),
            ]))
        );
    }

    #[test]
    fn test_auto_apply_resolves_owning_company() {
        let plan = AutoApply::decide(&selection(&["A", "B"], &["L3"], &["menu.xlsx"]), &details());
        assert_eq!(
            plan,
            AutoApply::Ready(LoadPlan::Single(MasterFileQuery::new("B", "L3", "menu.xlsx")))
        );
        assert!(plan.message().is_none());
        assert!(AutoApply::AwaitingFilename.message().is_some());
    }

    #[test]
    fn test_plan_is_loaded_in_source() {
        let q = MasterFileQuery::new("A", "L1", "prices.xlsx");
        let plan = LoadPlan::Single(q.clone());
        assert!(plan.is_loaded_in(&DataSource::Single(q.clone())));
        assert!(!plan.is_loaded_in(&DataSource::Multiple(vec![q.clone()])));
        assert!(!plan.is_loaded_in(&DataSource::None));
        let other = MasterFileQuery::new("A", "L1", "drinks.xlsx");
        assert!(!LoadPlan::Multiple(vec![q.clone(), other.clone()])
            .is_loaded_in(&DataSource::Multiple(vec![other, q])));
    }

    #[test]
    fn test_search_is_case_insensitive_over_text_cells() {
        let rows = rows();
        assert!(matches_search(&rows[1], "TOMA"));
        assert!(!matches_search(&rows[0], "2.5"));
        assert!(matches_search(&rows[0], "  "));
    }

    #[test]
    fn test_filters_combine() {
        let schema = schema();
        let sort = SortState::default();
        let filters = GridFilters {
            unit: Some("kg".into()),
            price_min: Some(5.0),
            ..Default::default()
        };
        let visible = visible_rows(&rows(), &schema, &filters, &sort);
        let ids: Vec<_> = visible.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3"]);
        assert_eq!(filters.active_count(), 2);

        let by_category = GridFilters {
            category: Some("Produce".into()),
            search: "lett".into(),
            ..Default::default()
        };
        assert_eq!(visible_rows(&rows(), &schema, &by_category, &sort).len(), 1);
    }

    #[test]
    fn test_distinct_values_and_bounds() {
        let rows = rows();
        let schema = schema();
        assert_eq!(distinct_values(&rows, schema.unit_key()), vec!["ea", "kg"]);
        assert!(distinct_values(&rows, None).is_empty());
        assert_eq!(price_bounds(&rows, &schema), Some((2.5, 10.0)));
        assert_eq!(price_bounds(&[], &schema), None);
    }

    #[test]
    fn test_price_range_sync_clamps() {
        let mut range = PriceRange::new((2.5, 10.0));
        assert!(range.is_full());
        assert_eq!(range.as_filter(), (None, None));

        range.set_min(1.0);
        assert_eq!(range.min, 2.5);
        range.set_max(6.0);
        range.set_min(8.0);
        assert_eq!(range.min, 6.0);
        range.set_max(20.0);
        assert_eq!(range.max, 10.0);
        range.set_max(f64::NAN);
        assert_eq!(range.max, 10.0);
        assert_eq!(range.as_filter(), (Some(6.0), Some(10.0)));
    }

    #[test]
    fn test_price_edit_keeps_narrowed_range() {
        let mut range = PriceRange::new((2.5, 10.0));
        range.set_min(4.0);
        range.set_max(8.0);

        // An edit raised the top price; the narrowed selection survives.
        let next = next_price_range(Some(range), Some((2.5, 14.0)), true).unwrap();
        assert_eq!(next.bounds, (2.5, 14.0));
        assert_eq!(next.as_filter(), (Some(4.0), Some(8.0)));

        // An edit below the selected minimum clamps into the new bounds.
        let next = next_price_range(Some(range), Some((5.0, 10.0)), true).unwrap();
        assert_eq!(next.as_filter(), (Some(5.0), Some(8.0)));
    }

    #[test]
    fn test_price_range_resets_for_new_data() {
        let mut range = PriceRange::new((2.5, 10.0));
        range.set_min(4.0);
        let next = next_price_range(Some(range), Some((1.0, 3.0)), false).unwrap();
        assert!(next.is_full());
        assert_eq!(next.bounds, (1.0, 3.0));

        let full = PriceRange::new((2.5, 10.0));
        let widened = next_price_range(Some(full), Some((2.5, 12.0)), true).unwrap();
        assert!(widened.is_full());

        assert_eq!(next_price_range(Some(range), None, true), None);
    }

    #[test]
    fn test_sort_numeric_aware_with_blanks_last() {
        let mut rows = rows();
        let mut sort = SortState::default();
        sort.toggle("price");
        sort.apply(&mut rows);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r0", "r3", "r1", "r2"]);

        sort.toggle("price");
        assert!(!sort.ascending);
        sort.apply(&mut rows);
        let ids: Vec<_> = rows.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["r1", "r3", "r0", "r2"]);

        sort.toggle("item");
        assert!(sort.ascending);
    }
}
