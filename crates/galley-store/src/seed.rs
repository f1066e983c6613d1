//! # Seed Data
//!
//! Initial menu and orders loaded into a `RestaurantStore` at startup.
//!
//! ## Sources
//! - [`SeedData::sample`]: a small trattoria menu with orders in every status,
//!   used by the demo binary and tests.
//! - [`SeedData::from_json`]: the external data loader boundary. Input is
//!   validated before the store ever sees it.
//!
//! ## JSON shape
//! Field names are camelCase and timestamps are RFC 3339. Prices are integer
//! cents (`"price": 1299`, `"totalAmount": 4250`), matching `Money`'s serde
//! form; decimal prices such as `12.99` are rejected.
//!
//! Sample order lines hold snapshots of sample menu items, taken when the
//! seed is built, so later menu edits leave them alone.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::debug;

use galley_core::validation::{validate_menu_item, validate_order};
use galley_core::{MenuCategory, MenuItem, Money, NewMenuItem, Order, OrderItem, OrderStatus};

use crate::error::{StoreError, StoreResult};

/// Menu items and orders to start the store with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedData {
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,

    #[serde(default)]
    pub orders: Vec<Order>,
}

impl SeedData {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses and validates seed JSON.
    pub fn from_json(json: &str) -> StoreResult<Self> {
        let seed: SeedData = serde_json::from_str(json)?;
        seed.validate()?;
        debug!(
            menu_items = seed.menu_items.len(),
            orders = seed.orders.len(),
            "Seed data loaded"
        );
        Ok(seed)
    }

    pub fn to_json(&self) -> StoreResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every entity and that ids are unique within each collection.
    pub fn validate(&self) -> StoreResult<()> {
        let mut seen = HashSet::new();
        for item in &self.menu_items {
            validate_menu_item(item)?;
            if !seen.insert(item.id.as_str()) {
                return Err(StoreError::InvalidSeed(format!(
                    "duplicate menu item id '{}'",
                    item.id
                )));
            }
        }

        let mut seen = HashSet::new();
        for order in &self.orders {
            validate_order(order)?;
            if !seen.insert(order.id.as_str()) {
                return Err(StoreError::InvalidSeed(format!(
                    "duplicate order id '{}'",
                    order.id
                )));
            }
        }

        Ok(())
    }

    /// The built-in sample restaurant, timestamped relative to `now`.
    pub fn sample(now: DateTime<Utc>) -> Self {
        let created = now - Duration::days(30);

        let menu_items = vec![
            dish(
                "1",
                "Bruschetta",
                "Grilled sourdough topped with tomato, garlic and basil",
                MenuCategory::Appetizer,
                850,
                &["sourdough", "tomato", "garlic", "basil", "olive oil"],
                true,
                10,
                created,
            ),
            dish(
                "2",
                "Calamari Fritti",
                "Crispy fried squid with lemon aioli",
                MenuCategory::Appetizer,
                1250,
                &["squid", "flour", "lemon", "aioli"],
                true,
                12,
                created,
            ),
            dish(
                "3",
                "Margherita Pizza",
                "Wood-fired pizza with San Marzano tomato and fior di latte",
                MenuCategory::MainCourse,
                1450,
                &["dough", "tomato", "mozzarella", "basil"],
                true,
                15,
                created,
            ),
            dish(
                "4",
                "Osso Buco",
                "Braised veal shank with gremolata and saffron risotto",
                MenuCategory::MainCourse,
                2850,
                &["veal shank", "white wine", "gremolata", "arborio rice", "saffron"],
                false,
                45,
                created,
            ),
            dish(
                "5",
                "Tiramisu",
                "Espresso-soaked ladyfingers with mascarpone cream",
                MenuCategory::Dessert,
                900,
                &["ladyfingers", "espresso", "mascarpone", "cocoa"],
                true,
                5,
                created,
            ),
            dish(
                "6",
                "Panna Cotta",
                "Vanilla cream with berry compote",
                MenuCategory::Dessert,
                800,
                &["cream", "vanilla", "gelatin", "berries"],
                true,
                5,
                created,
            ),
            dish(
                "7",
                "Espresso",
                "Double shot of house blend",
                MenuCategory::Beverage,
                350,
                &["coffee"],
                true,
                2,
                created,
            ),
            dish(
                "8",
                "Blood Orange Soda",
                "House-made sparkling blood orange soda",
                MenuCategory::Beverage,
                450,
                &["blood orange", "sparkling water", "cane sugar"],
                true,
                3,
                created,
            ),
        ];

        let line = |index: usize, qty: u32| OrderItem::snapshot(&menu_items[index], qty);

        let orders = vec![
            order(
                "ord-1",
                "ORD-001",
                vec![line(2, 2), line(6, 2)],
                Money::from_cents(3600),
                OrderStatus::Pending,
                "Maria Rossi",
                4,
                now - Duration::minutes(5),
            ),
            order(
                "ord-2",
                "ORD-002",
                vec![line(0, 1), line(3, 1), line(4, 1)],
                Money::from_cents(4600),
                OrderStatus::Preparing,
                "James Chen",
                7,
                now - Duration::minutes(18),
            ),
            order(
                "ord-3",
                "ORD-003",
                vec![line(1, 1), line(7, 2)],
                Money::from_cents(2150),
                OrderStatus::Ready,
                "Aisha Khan",
                2,
                now - Duration::minutes(32),
            ),
            order(
                "ord-4",
                "ORD-004",
                vec![line(2, 1), line(5, 1), line(6, 1)],
                Money::from_cents(2600),
                OrderStatus::Delivered,
                "Tom Becker",
                11,
                now - Duration::hours(1),
            ),
            order(
                "ord-5",
                "ORD-005",
                vec![line(3, 2)],
                Money::from_cents(5700),
                OrderStatus::Cancelled,
                "Lena Novak",
                5,
                now - Duration::hours(2),
            ),
            order(
                "ord-6",
                "ORD-006",
                vec![line(4, 2), line(6, 2)],
                Money::from_cents(2500),
                OrderStatus::Pending,
                "Diego Alvarez",
                9,
                now - Duration::minutes(2),
            ),
        ];

        SeedData { menu_items, orders }
    }
}

#[allow(clippy::too_many_arguments)]
fn dish(
    id: &str,
    name: &str,
    description: &str,
    category: MenuCategory,
    cents: i64,
    ingredients: &[&str],
    is_available: bool,
    preparation_time: u32,
    created: DateTime<Utc>,
) -> MenuItem {
    MenuItem::from_new(
        id.to_string(),
        NewMenuItem {
            name: name.to_string(),
            description: description.to_string(),
            category,
            price: Money::from_cents(cents),
            ingredients: ingredients.iter().map(|s| s.to_string()).collect(),
            is_available,
            preparation_time,
            image_url: format!(
                "https://images.galley.example/menu/{}.jpg",
                name.to_lowercase().replace(' ', "-")
            ),
        },
        created,
    )
}

#[allow(clippy::too_many_arguments)]
fn order(
    id: &str,
    order_number: &str,
    items: Vec<OrderItem>,
    total_amount: Money,
    status: OrderStatus,
    customer_name: &str,
    table_number: u32,
    placed: DateTime<Utc>,
) -> Order {
    Order {
        id: id.to_string(),
        order_number: order_number.to_string(),
        items,
        total_amount,
        status,
        customer_name: customer_name.to_string(),
        table_number,
        created_at: placed,
        updated_at: placed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use galley_core::compute_stats;

    #[test]
    fn test_sample_is_valid() {
        let seed = SeedData::sample(Utc::now());
        assert!(seed.validate().is_ok());
        assert_eq!(seed.menu_items.len(), 8);
    }

    #[test]
    fn test_sample_covers_every_category_and_status() {
        let seed = SeedData::sample(Utc::now());
        for category in MenuCategory::ALL {
            assert!(seed.menu_items.iter().any(|m| m.category == category));
        }
        for status in OrderStatus::ALL {
            assert!(seed.orders.iter().any(|o| o.status == status));
        }
        assert!(seed.menu_items.iter().any(|m| !m.is_available));
    }

    #[test]
    fn test_sample_stats() {
        let seed = SeedData::sample(Utc::now());
        let stats = compute_stats(&seed.menu_items, &seed.orders);
        assert_eq!(stats.total_orders, 6);
        assert_eq!(stats.pending_orders, 2);
        // everything except the cancelled ORD-005
        assert_eq!(stats.total_revenue.cents(), 3600 + 4600 + 2150 + 2600 + 2500);
        assert_eq!(stats.available_items, 7);
    }

    #[test]
    fn test_json_round_trip_validates() {
        let seed = SeedData::sample(Utc::now());
        let json = seed.to_json().unwrap();
        assert_eq!(SeedData::from_json(&json).unwrap(), seed);
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let mut seed = SeedData::sample(Utc::now());
        let copy = seed.menu_items[0].clone();
        seed.menu_items.push(copy);
        assert!(matches!(seed.validate(), Err(StoreError::InvalidSeed(_))));
    }

    #[test]
    fn test_invalid_json_rejected() {
        assert!(SeedData::from_json("{\"menuItems\": 3}").is_err());

        let mut seed = SeedData::sample(Utc::now());
        seed.orders[0].table_number = 0;
        let json = seed.to_json().unwrap();
        assert!(matches!(
            SeedData::from_json(&json),
            Err(StoreError::Core(_))
        ));
    }

    #[test]
    fn test_decimal_prices_rejected() {
        let mut value = serde_json::to_value(SeedData::sample(Utc::now())).unwrap();
        value["menuItems"][0]["price"] = serde_json::json!(8.5);
        let err = SeedData::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidSeed(_)));

        value["menuItems"][0]["price"] = serde_json::json!(850);
        assert!(SeedData::from_json(&value.to_string()).is_ok());
    }

    #[test]
    fn test_empty_json_object_is_empty_seed() {
        assert_eq!(SeedData::from_json("{}").unwrap(), SeedData::empty());
    }
}
