//! # Domain Types
//!
//! Core domain types for the restaurant back office.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐         ┌─────────────────┐                        │
//! │  │    MenuItem     │ snapshot│      Order      │                        │
//! │  │  ─────────────  │ ──────► │  ─────────────  │                        │
//! │  │  id             │ (copy)  │  id             │                        │
//! │  │  category       │         │  order_number   │                        │
//! │  │  price (Money)  │         │  items: [OrderItem]                      │
//! │  │  is_available   │         │  total_amount   │                        │
//! │  └─────────────────┘         │  status         │                        │
//! │                              └─────────────────┘                        │
//! │                                                                         │
//! │  ┌─────────────────┐         ┌─────────────────┐                        │
//! │  │  MenuCategory   │         │   OrderStatus   │                        │
//! │  │  Appetizer      │         │  Pending        │                        │
//! │  │  Main Course    │         │  Preparing      │                        │
//! │  │  Dessert        │         │  Ready          │                        │
//! │  │  Beverage       │         │  Delivered      │                        │
//! │  └─────────────────┘         │  Cancelled      │                        │
//! │                              └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An `OrderItem` owns a full copy of the `MenuItem` as it was when the order
//! was placed. Editing or deleting the live menu item never reaches back into
//! historical orders.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Timestamps
// =============================================================================

/// Returns the `updated_at` value for a mutation happening at `now`.
///
/// `updated_at` must strictly increase on every mutation, even when the clock
/// is coarse or frozen, so the result is never earlier than one microsecond
/// past `previous`.
pub fn next_timestamp(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    let floor = previous + Duration::microseconds(1);
    if now < floor {
        floor
    } else {
        now
    }
}

// =============================================================================
// Menu Category
// =============================================================================

/// The section of the menu an item belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum MenuCategory {
    Appetizer,
    #[serde(rename = "Main Course")]
    MainCourse,
    Dessert,
    Beverage,
}

impl MenuCategory {
    /// Every category, in menu order.
    pub const ALL: [MenuCategory; 4] = [
        MenuCategory::Appetizer,
        MenuCategory::MainCourse,
        MenuCategory::Dessert,
        MenuCategory::Beverage,
    ];

    /// Human-readable label, identical to the serialized form.
    pub const fn label(&self) -> &'static str {
        match self {
            MenuCategory::Appetizer => "Appetizer",
            MenuCategory::MainCourse => "Main Course",
            MenuCategory::Dessert => "Dessert",
            MenuCategory::Beverage => "Beverage",
        }
    }
}

impl fmt::Display for MenuCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for MenuCategory {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['_', '-'], " ").as_str() {
            "appetizer" => Ok(MenuCategory::Appetizer),
            "main course" | "maincourse" | "main" => Ok(MenuCategory::MainCourse),
            "dessert" => Ok(MenuCategory::Dessert),
            "beverage" | "drink" => Ok(MenuCategory::Beverage),
            other => Err(ValidationError::InvalidFormat {
                field: "category".to_string(),
                reason: format!(
                    "unknown category '{}', expected Appetizer, Main Course, Dessert or Beverage",
                    other
                ),
            }),
        }
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// Kitchen status of an order.
///
/// There is no enforced transition order: staff can move an order from any
/// status to any other, including back out of `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum OrderStatus {
    Pending,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    /// Every status, in the order the dashboard lists them.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub const fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Preparing => "Preparing",
            OrderStatus::Ready => "Ready",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Cancelled => "Cancelled",
        }
    }

    /// Cancelled orders are the only ones excluded from revenue.
    #[inline]
    pub const fn counts_toward_revenue(&self) -> bool {
        !matches!(self, OrderStatus::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "preparing" => Ok(OrderStatus::Preparing),
            "ready" => Ok(OrderStatus::Ready),
            "delivered" => Ok(OrderStatus::Delivered),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            other => Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: format!("unknown order status '{}'", other),
            }),
        }
    }
}

// =============================================================================
// Menu Item
// =============================================================================

/// A dish or drink on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct MenuItem {
    /// Unique, immutable identifier.
    pub id: String,

    pub name: String,

    pub description: String,

    pub category: MenuCategory,

    /// Price in cents. Never negative.
    pub price: Money,

    /// Ingredients as entered; order carries no meaning.
    pub ingredients: Vec<String>,

    /// Whether the kitchen is currently serving this item.
    pub is_available: bool,

    /// Minutes from ticket to pass. Always positive.
    pub preparation_time: u32,

    /// Not checked for reachability.
    pub image_url: String,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Builds a new item from form input, stamping both timestamps with `now`.
    pub fn from_new(id: String, new: NewMenuItem, now: DateTime<Utc>) -> Self {
        MenuItem {
            id,
            name: new.name,
            description: new.description,
            category: new.category,
            price: new.price,
            ingredients: new.ingredients,
            is_available: new.is_available,
            preparation_time: new.preparation_time,
            image_url: new.image_url,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merges the fields present in `patch` and bumps `updated_at`.
    pub fn apply_patch(&mut self, patch: MenuItemPatch, now: DateTime<Utc>) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(ingredients) = patch.ingredients {
            self.ingredients = ingredients;
        }
        if let Some(is_available) = patch.is_available {
            self.is_available = is_available;
        }
        if let Some(preparation_time) = patch.preparation_time {
            self.preparation_time = preparation_time;
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = image_url;
        }
        self.touch(now);
    }

    /// Flips availability and bumps `updated_at`.
    pub fn toggle_availability(&mut self, now: DateTime<Utc>) {
        self.is_available = !self.is_available;
        self.touch(now);
    }

    fn touch(&mut self, now: DateTime<Utc>) {
        self.updated_at = next_timestamp(self.updated_at, now);
    }
}

/// Everything needed to create a menu item; the store assigns id and timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    pub category: MenuCategory,
    pub price: Money,
    pub ingredients: Vec<String>,
    pub is_available: bool,
    pub preparation_time: u32,
    pub image_url: String,
}

/// A partial update. `None` leaves the field as it is.
///
/// `id` and `created_at` are deliberately absent: they never change.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct MenuItemPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<MenuCategory>,
    pub price: Option<Money>,
    pub ingredients: Option<Vec<String>>,
    pub is_available: Option<bool>,
    pub preparation_time: Option<u32>,
    pub image_url: Option<String>,
}

impl MenuItemPatch {
    /// True when the patch would change nothing but `updated_at`.
    pub fn is_empty(&self) -> bool {
        *self == MenuItemPatch::default()
    }
}

/// Splits the comma-separated ingredient field of the item form.
///
/// ```rust
/// use galley_core::types::parse_ingredients;
///
/// assert_eq!(
///     parse_ingredients(" basil, mozzarella ,, tomato "),
///     vec!["basil", "mozzarella", "tomato"]
/// );
/// ```
pub fn parse_ingredients(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

// =============================================================================
// Orders
// =============================================================================

/// A line on an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItem {
    /// Copy of the menu item at the time the order was placed.
    pub menu_item: MenuItem,

    pub quantity: u32,

    /// Line total (unit price × quantity at placement).
    pub price: Money,
}

impl OrderItem {
    /// Freezes `menu_item` into a new line, pricing it at today's price.
    pub fn snapshot(menu_item: &MenuItem, quantity: u32) -> Self {
        OrderItem {
            menu_item: menu_item.clone(),
            quantity,
            price: menu_item.price.multiply_quantity(quantity),
        }
    }
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    pub id: String,

    /// Display number printed on the ticket (e.g. `ORD-001`).
    pub order_number: String,

    /// Set when the order is placed and only read afterwards.
    pub items: Vec<OrderItem>,

    /// Amount charged. Taken as given; not recomputed from `items`.
    pub total_amount: Money,

    pub status: OrderStatus,

    pub customer_name: String,

    pub table_number: u32,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Moves the order to `status` unconditionally and bumps `updated_at`.
    pub fn set_status(&mut self, status: OrderStatus, now: DateTime<Utc>) {
        self.status = status;
        self.updated_at = next_timestamp(self.updated_at, now);
    }

    /// Sum of line totals. Informational only: revenue uses `total_amount`.
    pub fn items_subtotal(&self) -> Money {
        self.items.iter().map(|line| line.price).sum()
    }

    /// Total number of portions across all lines.
    pub fn total_quantity(&self) -> u32 {
        self.items.iter().map(|line| line.quantity).sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn margherita(now: DateTime<Utc>) -> MenuItem {
        MenuItem::from_new(
            "m-1".to_string(),
            NewMenuItem {
                name: "Margherita".to_string(),
                description: "Wood-fired pizza".to_string(),
                category: MenuCategory::MainCourse,
                price: Money::from_cents(1450),
                ingredients: vec!["tomato".to_string(), "mozzarella".to_string()],
                is_available: true,
                preparation_time: 15,
                image_url: "https://img.example/margherita.jpg".to_string(),
            },
            now,
        )
    }

    #[test]
    fn test_from_new_stamps_both_timestamps() {
        let item = margherita(at(0));
        assert_eq!(item.created_at, item.updated_at);
        assert_eq!(item.id, "m-1");
    }

    #[test]
    fn test_next_timestamp_strictly_increases_with_frozen_clock() {
        let t = at(0);
        let bumped = next_timestamp(t, t);
        assert!(bumped > t);
        assert_eq!(next_timestamp(t, at(5)), at(5));
    }

    #[test]
    fn test_apply_patch_only_touches_given_fields() {
        let mut item = margherita(at(0));
        item.apply_patch(
            MenuItemPatch {
                price: Some(Money::from_cents(1550)),
                ..Default::default()
            },
            at(10),
        );
        assert_eq!(item.price.cents(), 1550);
        assert_eq!(item.name, "Margherita");
        assert_eq!(item.created_at, at(0));
        assert_eq!(item.updated_at, at(10));
    }

    #[test]
    fn test_toggle_availability_flips_and_bumps() {
        let mut item = margherita(at(0));
        item.toggle_availability(at(0));
        assert!(!item.is_available);
        assert!(item.updated_at > item.created_at);
    }

    #[test]
    fn test_category_labels_round_trip_through_serde() {
        let json = serde_json::to_string(&MenuCategory::MainCourse).unwrap();
        assert_eq!(json, "\"Main Course\"");
        for category in MenuCategory::ALL {
            assert_eq!(category.label().parse::<MenuCategory>().unwrap(), category);
        }
        assert!("Soup".parse::<MenuCategory>().is_err());
    }

    #[test]
    fn test_order_status_parsing() {
        assert_eq!("delivered".parse::<OrderStatus>().unwrap(), OrderStatus::Delivered);
        assert_eq!("Canceled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("shipped".parse::<OrderStatus>().is_err());
        assert!(!OrderStatus::Cancelled.counts_toward_revenue());
        assert!(OrderStatus::Pending.counts_toward_revenue());
    }

    #[test]
    fn test_menu_item_serializes_camel_case() {
        let value = serde_json::to_value(margherita(at(0))).unwrap();
        assert_eq!(value["isAvailable"], true);
        assert_eq!(value["preparationTime"], 15);
        assert_eq!(value["category"], "Main Course");
    }

    #[test]
    fn test_order_item_snapshot_is_independent() {
        let mut item = margherita(at(0));
        let line = OrderItem::snapshot(&item, 2);
        item.name = "Renamed".to_string();
        assert_eq!(line.menu_item.name, "Margherita");
        assert_eq!(line.price.cents(), 2900);
    }

    #[test]
    fn test_order_set_status_allows_any_transition() {
        let item = margherita(at(0));
        let mut order = Order {
            id: "o-1".to_string(),
            order_number: "ORD-001".to_string(),
            items: vec![OrderItem::snapshot(&item, 1)],
            total_amount: Money::from_cents(4250),
            status: OrderStatus::Cancelled,
            customer_name: "Ada".to_string(),
            table_number: 4,
            created_at: at(0),
            updated_at: at(0),
        };
        order.set_status(OrderStatus::Pending, at(3));
        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.updated_at, at(3));
        // total_amount is independent of the lines
        assert_ne!(order.items_subtotal(), order.total_amount);
        assert_eq!(order.total_quantity(), 1);
    }

    #[test]
    fn test_parse_ingredients() {
        assert_eq!(parse_ingredients(""), Vec::<String>::new());
        assert_eq!(parse_ingredients("a,b"), vec!["a", "b"]);
        assert_eq!(parse_ingredients(" , x , "), vec!["x"]);
    }

    #[test]
    fn test_empty_patch() {
        assert!(MenuItemPatch::default().is_empty());
        let patch = MenuItemPatch {
            is_available: Some(false),
            ..Default::default()
        };
        assert!(!patch.is_empty());
    }
}
