//! Order cart of the store orders page.

use contracts::domain::a003_store_order::{
    AvailableItem, CreateOrderRequest, OrderLine, RecentOrder, UpdateOrderRequest,
};

use crate::dashboards::scope::Scope;

#[derive(Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub unit: String,
    pub quantity: u32,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }

    fn to_line(&self) -> OrderLine {
        OrderLine {
            item_id: self.id.clone(),
            name: self.name.clone(),
            category: self.category.clone(),
            price: self.price,
            unit: self.unit.clone(),
            quantity: self.quantity,
        }
    }
}

impl From<&OrderLine> for CartItem {
    fn from(line: &OrderLine) -> Self {
        Self {
            id: line.item_id.clone(),
            name: line.name.clone(),
            category: line.category.clone(),
            price: line.price,
            unit: line.unit.clone(),
            quantity: line.quantity,
        }
    }
}

/// Whether submitting creates a new order or replaces an existing one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CartMode {
    #[default]
    Creating,
    Updating { order_id: String },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    items: Vec<CartItem>,
    mode: CartMode,
}

impl Cart {
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn mode(&self) -> &CartMode {
        &self.mode
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn quantity_of(&self, id: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.id == id)
            .map_or(0, |i| i.quantity)
    }

    /// Add one unit; an item already in the cart is incremented.
    pub fn add(&mut self, item: &AvailableItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            existing.quantity += 1;
            return;
        }
        self.items.push(CartItem {
            id: item.id.clone(),
            name: item.name.clone(),
            category: item.category.clone(),
            price: item.price,
            unit: item.unit.clone(),
            quantity: 1,
        });
    }

    pub fn remove(&mut self, id: &str) {
        self.items.retain(|i| i.id != id);
    }

    /// A quantity of zero or less removes the item.
    pub fn set_quantity(&mut self, id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|i| i.id == id) {
            item.quantity = quantity;
        }
    }

    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    /// Replace the cart with a recent order for editing.
    pub fn load_order(&mut self, order: &RecentOrder) {
        self.items = order.items.iter().map(CartItem::from).collect();
        self.mode = CartMode::Updating {
            order_id: order.id.clone(),
        };
    }

    /// Back to an empty new order.
    pub fn reset(&mut self) {
        self.items.clear();
        self.mode = CartMode::Creating;
    }

    fn lines(&self) -> Vec<OrderLine> {
        self.items.iter().map(CartItem::to_line).collect()
    }

    pub fn create_request(&self, scope: &Scope) -> CreateOrderRequest {
        CreateOrderRequest {
            company_id: scope.company_id.clone(),
            location_id: scope.location_id.clone(),
            items: self.lines(),
        }
    }

    /// `None` unless an existing order is being edited.
    pub fn update_request(&self, scope: &Scope) -> Option<UpdateOrderRequest> {
        match &self.mode {
            CartMode::Updating { order_id } => Some(UpdateOrderRequest {
                order_id: order_id.clone(),
                company_id: scope.company_id.clone(),
                location_id: scope.location_id.clone(),
                items: self.lines(),
            }),
            CartMode::Creating => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64) -> AvailableItem {
        AvailableItem {
            id: id.into(),
            name: format!("Item {}", id),
            category: "Dry goods".into(),
            price,
            unit: "kg".into(),
        }
    }

    #[test]
    fn test_add_increments_existing() {
        let mut cart = Cart::default();
        cart.add(&item("1", 2.5));
        cart.add(&item("2", 10.0));
        cart.add(&item("1", 2.5));
        assert_eq!(cart.items().len(), 2);
        assert_eq!(cart.quantity_of("1"), 2);
        assert_eq!(cart.total(), 15.0);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_set_quantity_non_positive_removes() {
        let mut cart = Cart::default();
        cart.add(&item("1", 2.0));
        cart.set_quantity("1", 4);
        assert_eq!(cart.total(), 8.0);
        cart.set_quantity("1", 0);
        assert!(cart.is_empty());

        cart.add(&item("2", 1.0));
        cart.set_quantity("2", -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_and_unknown_ids() {
        let mut cart = Cart::default();
        cart.add(&item("1", 1.0));
        cart.remove("missing");
        cart.set_quantity("missing", 5);
        assert_eq!(cart.items().len(), 1);
        cart.remove("1");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_mode_round_trip() {
        let order = RecentOrder {
            id: "42".into(),
            created_at: String::new(),
            items: vec![OrderLine {
                item_id: "7".into(),
                name: "Flour".into(),
                category: String::new(),
                price: 10.5,
                unit: "bag".into(),
                quantity: 3,
            }],
            total: 31.5,
        };
        let scope = Scope::from_parts("1", "10").unwrap();
        let mut cart = Cart::default();
        assert!(cart.update_request(&scope).is_none());

        cart.load_order(&order);
        assert_eq!(cart.mode(), &CartMode::Updating { order_id: "42".into() });
        let req = cart.update_request(&scope).unwrap();
        assert_eq!(req.order_id, "42");
        assert_eq!(req.items[0].quantity, 3);
        assert_eq!(cart.total(), 31.5);

        cart.reset();
        assert_eq!(cart.mode(), &CartMode::Creating);
        assert!(cart.is_empty());
        assert!(cart.create_request(&scope).items.is_empty());
    }
}
