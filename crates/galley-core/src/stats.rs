//! # Dashboard Statistics
//!
//! Aggregates shown on the dashboard cards.
//!
//! ```text
//! ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐
//! │ Revenue      │ │ Orders       │ │ Pending      │ │ Menu         │
//! │ $1,234.50    │ │ 42           │ │ 3            │ │ 9/12         │
//! └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘
//! ```
//!
//! Stats are never stored. Every call walks the current collections, which
//! is linear in their size and keeps the numbers from drifting away from the
//! data they summarize.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{MenuItem, Order, OrderStatus};

/// Aggregate numbers derived from the current menu and orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct DashboardStats {
    /// Every order, whatever its status.
    pub total_orders: usize,

    /// Orders still waiting for the kitchen.
    pub pending_orders: usize,

    /// Sum of `total_amount` over orders that are not cancelled.
    pub total_revenue: Money,

    /// Items on the menu, available or not.
    pub menu_items: usize,

    pub available_items: usize,
}

/// Computes dashboard stats from scratch.
///
/// `total_amount` is taken as stored; order lines are not re-summed.
pub fn compute_stats(menu_items: &[MenuItem], orders: &[Order]) -> DashboardStats {
    DashboardStats {
        total_orders: orders.len(),
        pending_orders: orders
            .iter()
            .filter(|o| o.status == OrderStatus::Pending)
            .count(),
        total_revenue: orders
            .iter()
            .filter(|o| o.status.counts_toward_revenue())
            .map(|o| o.total_amount)
            .sum(),
        menu_items: menu_items.len(),
        available_items: menu_items.iter().filter(|m| m.is_available).count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{MenuCategory, NewMenuItem};
    use chrono::Utc;

    fn item(id: &str, available: bool) -> MenuItem {
        MenuItem::from_new(
            id.to_string(),
            NewMenuItem {
                name: format!("Item {}", id),
                description: String::new(),
                category: MenuCategory::Dessert,
                price: Money::from_cents(700),
                ingredients: Vec::new(),
                is_available: available,
                preparation_time: 5,
                image_url: String::new(),
            },
            Utc::now(),
        )
    }

    fn order(id: &str, status: OrderStatus, cents: i64) -> Order {
        let now = Utc::now();
        Order {
            id: id.to_string(),
            order_number: format!("ORD-{}", id),
            items: Vec::new(),
            total_amount: Money::from_cents(cents),
            status,
            customer_name: "Guest".to_string(),
            table_number: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_empty_collections() {
        assert_eq!(compute_stats(&[], &[]), DashboardStats::default());
    }

    #[test]
    fn test_counts_and_revenue() {
        let menu = vec![item("a", true), item("b", false), item("c", true)];
        let orders = vec![
            order("1", OrderStatus::Pending, 4250),
            order("2", OrderStatus::Delivered, 1000),
            order("3", OrderStatus::Cancelled, 9999),
            order("4", OrderStatus::Pending, 250),
        ];

        let stats = compute_stats(&menu, &orders);
        assert_eq!(stats.total_orders, 4);
        assert_eq!(stats.pending_orders, 2);
        assert_eq!(stats.total_revenue.cents(), 5500);
        assert_eq!(stats.menu_items, 3);
        assert_eq!(stats.available_items, 2);
    }

    #[test]
    fn test_revenue_ignores_collection_order() {
        let mut orders = vec![
            order("1", OrderStatus::Ready, 1234),
            order("2", OrderStatus::Cancelled, 500),
            order("3", OrderStatus::Preparing, 66),
        ];
        let forward = compute_stats(&[], &orders).total_revenue;
        orders.reverse();
        let backward = compute_stats(&[], &orders).total_revenue;
        orders.swap(0, 1);
        let shuffled = compute_stats(&[], &orders).total_revenue;

        assert_eq!(forward.cents(), 1300);
        assert_eq!(forward, backward);
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn test_cancelled_order_counts_but_earns_nothing() {
        let mut orders = vec![order("1", OrderStatus::Pending, 4250)];
        let before = compute_stats(&[], &orders);

        orders.push(order("2", OrderStatus::Cancelled, 1800));
        let after = compute_stats(&[], &orders);

        assert_eq!(after.total_orders, before.total_orders + 1);
        assert_eq!(after.total_revenue, before.total_revenue);
    }

    #[test]
    fn test_revenue_uses_total_amount_not_lines() {
        let dish = item("a", true);
        let mut o = order("1", OrderStatus::Delivered, 100);
        o.items = vec![crate::types::OrderItem::snapshot(&dish, 3)];

        let stats = compute_stats(&[], &[o]);
        assert_eq!(stats.total_revenue.cents(), 100);
    }
}
