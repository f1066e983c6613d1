//! # Queries
//!
//! Read-side helpers behind the menu page, the orders table and the
//! dashboard: filtering, status counts, pagination and previews.
//!
//! ## Menu Page Filter
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  [ search: "basil"      ]  [ Category: All ▾ ]  [ Availability: All ▾ ] │
//! │                                                                         │
//! │  item matches  ⇔  search hits name OR any ingredient (case-insensitive) │
//! │                   AND category matches (or All)                         │
//! │                   AND availability matches (or All)                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All functions keep the collection order of their input.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::{MenuCategory, MenuItem, Order, OrderStatus};

// =============================================================================
// Menu Filtering
// =============================================================================

/// Availability dropdown on the menu page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum AvailabilityFilter {
    #[default]
    All,
    Available,
    Unavailable,
}

impl AvailabilityFilter {
    #[inline]
    pub fn accepts(&self, is_available: bool) -> bool {
        match self {
            AvailabilityFilter::All => true,
            AvailabilityFilter::Available => is_available,
            AvailabilityFilter::Unavailable => !is_available,
        }
    }
}

/// Combined search + category + availability filter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase", default)]
#[ts(export)]
pub struct MenuFilter {
    /// Free-text search over name and ingredients. Blank matches everything.
    pub search: String,

    /// `None` means every category.
    pub category: Option<MenuCategory>,

    pub availability: AvailabilityFilter,
}

impl MenuFilter {
    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = query.into();
        self
    }

    pub fn category(mut self, category: MenuCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn availability(mut self, availability: AvailabilityFilter) -> Self {
        self.availability = availability;
        self
    }

    /// Returns true when `item` passes all three conditions.
    pub fn matches(&self, item: &MenuItem) -> bool {
        let needle = self.search.trim().to_lowercase();
        let matches_search = needle.is_empty()
            || item.name.to_lowercase().contains(&needle)
            || item
                .ingredients
                .iter()
                .any(|ing| ing.to_lowercase().contains(&needle));

        let matches_category = self.category.map_or(true, |c| item.category == c);

        matches_search && matches_category && self.availability.accepts(item.is_available)
    }
}

/// Items passing `filter`, in menu order.
pub fn filter_menu(items: &[MenuItem], filter: &MenuFilter) -> Vec<MenuItem> {
    items.iter().filter(|i| filter.matches(i)).cloned().collect()
}

// =============================================================================
// Orders
// =============================================================================

/// Orders with `status`, or every order when `status` is `None`.
pub fn filter_orders(orders: &[Order], status: Option<OrderStatus>) -> Vec<Order> {
    orders
        .iter()
        .filter(|o| status.map_or(true, |s| o.status == s))
        .cloned()
        .collect()
}

/// Number of orders in each status, in `OrderStatus::ALL` order.
///
/// Every status appears, zero counts included, so the quick-filter buttons
/// render the same row every time.
pub fn status_counts(orders: &[Order]) -> Vec<(OrderStatus, usize)> {
    OrderStatus::ALL
        .iter()
        .map(|&status| (status, orders.iter().filter(|o| o.status == status).count()))
        .collect()
}

/// The first `n` orders in collection order.
pub fn recent_orders(orders: &[Order], n: usize) -> Vec<Order> {
    orders.iter().take(n).cloned().collect()
}

/// The first `n` available menu items, shown on the dashboard.
pub fn featured_items(items: &[MenuItem], n: usize) -> Vec<MenuItem> {
    items
        .iter()
        .filter(|i| i.is_available)
        .take(n)
        .cloned()
        .collect()
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of a longer list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Page<T> {
    pub items: Vec<T>,

    /// 1-based page number that was requested.
    pub page: usize,

    pub page_size: usize,

    /// `ceil(total_items / page_size)`; zero for an empty list.
    pub total_pages: usize,

    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Slices out page `page` (1-based) of `items`.
///
/// Page 0 is treated as page 1. Pages past the end come back empty with the
/// real `total_pages`, so the caller can clamp. A `page_size` of 0 is
/// treated as 1.
///
/// ```rust
/// use galley_core::query::paginate;
///
/// let page = paginate((1..=12).collect(), 3, 5);
/// assert_eq!(page.items, vec![11, 12]);
/// assert_eq!(page.total_pages, 3);
/// ```
pub fn paginate<T>(items: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let start = (page - 1).saturating_mul(page_size);

    let items = items.into_iter().skip(start).take(page_size).collect();

    Page {
        items,
        page,
        page_size,
        total_pages,
        total_items,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
