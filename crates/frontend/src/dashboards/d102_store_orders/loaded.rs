//! Data shown on the store orders page and the scope it belongs to.

use contracts::domain::a003_store_order::{AvailableItem, OrderAnalytics, RecentOrder};
use contracts::shared::ApiError;

use crate::dashboards::scope::Scope;

#[derive(Debug, Clone, Default)]
pub struct LoadedOrders {
    /// Owner of `items`; orders are submitted here. `None` until items load.
    pub scope: Option<Scope>,
    pub items: Vec<AvailableItem>,
    pub orders: Vec<RecentOrder>,
    pub analytics: Option<OrderAnalytics>,
}

impl LoadedOrders {
    /// Take the results of one Apply for `scope` and return the failure messages.
    ///
    /// Results for a different scope replace everything, so a failed part stays
    /// empty instead of showing the previous location's data. The scope is only
    /// recorded once its items are in.
    pub fn apply(
        &mut self,
        scope: Scope,
        available: Result<Vec<AvailableItem>, ApiError>,
        recent: Result<Vec<RecentOrder>, ApiError>,
        stats: Result<OrderAnalytics, ApiError>,
    ) -> Vec<String> {
        if self.scope.as_ref() != Some(&scope) {
            *self = Self::default();
        }
        let mut failures = Vec::new();
        match available {
            Ok(list) => {
                self.items = list;
                self.scope = Some(scope);
            }
            Err(e) => failures.push(format!("Failed to load items: {}", e)),
        }
        match recent {
            Ok(list) => self.orders = list,
            Err(e) => failures.push(format!("Failed to load recent orders: {}", e)),
        }
        match stats {
            Ok(data) => self.analytics = Some(data),
            Err(e) => failures.push(format!("Failed to load order analytics: {}", e)),
        }
        failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> AvailableItem {
        AvailableItem {
            id: id.into(),
            name: format!("Item {}", id),
            category: "Dairy".into(),
            price: 2.0,
            unit: "gal".into(),
        }
    }

    fn down() -> ApiError {
        ApiError::Network("offline".into())
    }

    fn loaded_for(scope: &Scope) -> LoadedOrders {
        let mut data = LoadedOrders::default();
        let failures = data.apply(
            scope.clone(),
            Ok(vec![item("a1")]),
            Ok(Vec::new()),
            Ok(OrderAnalytics::default()),
        );
        assert!(failures.is_empty());
        data
    }

    #[test]
    fn test_full_load_records_scope() {
        let a = Scope::from_parts("1", "10").unwrap();
        let data = loaded_for(&a);
        assert_eq!(data.scope, Some(a));
        assert_eq!(data.items.len(), 1);
        assert!(data.analytics.is_some());
    }

    #[test]
    fn test_failed_items_for_new_scope_drop_old_data() {
        let a = Scope::from_parts("1", "10").unwrap();
        let b = Scope::from_parts("1", "20").unwrap();
        let mut data = loaded_for(&a);

        let failures = data.apply(b, Err(down()), Ok(Vec::new()), Err(down()));
        assert_eq!(failures.len(), 2);
        assert!(failures[0].starts_with("Failed to load items"));
        assert_eq!(data.scope, None);
        assert!(data.items.is_empty());
        assert!(data.analytics.is_none());
    }

    #[test]
    fn test_failed_refresh_of_same_scope_keeps_items() {
        let a = Scope::from_parts("1", "10").unwrap();
        let mut data = loaded_for(&a);

        let failures = data.apply(a.clone(), Err(down()), Ok(Vec::new()), Ok(OrderAnalytics::default()));
        assert_eq!(failures.len(), 1);
        assert_eq!(data.scope, Some(a));
        assert_eq!(data.items[0].id, "a1");
    }
}
