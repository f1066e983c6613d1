//! # Restaurant Store
//!
//! The single in-memory owner of menu items and orders.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    RestaurantStore Operations                           │
//! │                                                                         │
//! │  Operation               State Change                 Notification      │
//! │  ─────────               ────────────                 ────────────      │
//! │  add_menu_item()   ────► menu.push(new)          ───► success           │
//! │  update_menu_item() ───► menu[i].merge(patch)    ───► success           │
//! │  delete_menu_item() ───► menu.remove(i)          ───► success           │
//! │  toggle_availability() ► menu[i].flip() now,     ───► success / error   │
//! │                          maybe restore later          (after delay)     │
//! │  update_order_status() ► orders[i].status = s    ───► success           │
//! │  compute_stats()   ────► (read only, recomputed)                        │
//! │                                                                         │
//! │  Absent id → Err(NotFound), nothing changes, nothing is notified.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Optimistic Availability Toggle
//! ```text
//!  toggle_availability(id)
//!     │
//!     ├─1─► snapshot = menu.clone()              (rollback point)
//!     ├─2─► menu[id].is_available = !…           (visible immediately)
//!     ├─3─► draw = random.draw()                 (taken NOW, not later)
//!     │     spawn ──► sleep(confirmation_delay)
//!     │                  │
//!     │                  ├─ draw > p_fail ─4─► Committed  + "Availability updated!"
//!     │                  └─ draw ≤ p_fail ─5─► menu = snapshot
//!     │                                         RolledBack + "Failed to update. Reverting changes..."
//!     └───► returns PendingToggle
//! ```
//!
//! Rollback restores the whole collection, so any other menu mutation made
//! while the confirmation was in flight is discarded with it. Two toggles of
//! the same item in flight at once each restore their own snapshot; neither
//! is cancelled. If both fail, the later snapshot already holds the earlier
//! flip, so the item ends up flipped.
//!
//! ## Locking
//! State sits behind `Arc<Mutex<_>>`. The lock is only held for synchronous
//! sections and never across an `.await`.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use galley_core::query::{
    featured_items, filter_menu, filter_orders, paginate, recent_orders, status_counts,
};
use galley_core::{
    compute_stats, DashboardStats, MenuFilter, MenuItem, MenuItemPatch, NewMenuItem, Order,
    OrderStatus, Page, DEFAULT_PAGE_SIZE, DEFAULT_PREVIEW_LEN,
};

use crate::error::{StoreError, StoreResult};
use crate::notify::{Notification, NotificationKind};
use crate::seed::SeedData;
use crate::services::StoreServices;

// =============================================================================
// Settings
// =============================================================================

/// Runtime knobs, usually built from `GalleyConfig::store_settings`.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSettings {
    /// Time before an availability confirmation resolves.
    pub confirmation_delay: Duration,

    /// Chance in `[0, 1]` that a confirmation fails.
    pub failure_probability: f64,

    /// Rows per page for `orders_page`.
    pub page_size: usize,

    /// Length of the dashboard previews.
    pub preview_len: usize,
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            confirmation_delay: Duration::from_millis(500),
            failure_probability: 0.1,
            page_size: DEFAULT_PAGE_SIZE,
            preview_len: DEFAULT_PREVIEW_LEN,
        }
    }
}

// =============================================================================
// Toggle Handle
// =============================================================================

/// How an availability confirmation ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToggleOutcome {
    /// Confirmed; the optimistic flip stays.
    Committed,
    /// Confirmation failed; the menu was restored from the snapshot.
    RolledBack,
}

/// An availability toggle whose confirmation is still in flight.
///
/// Dropping the handle does not cancel the confirmation.
#[derive(Debug)]
pub struct PendingToggle {
    item_id: String,
    commits: bool,
    task: JoinHandle<ToggleOutcome>,
}

impl PendingToggle {
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    /// The outcome the invocation-time draw already decided.
    pub fn will_commit(&self) -> bool {
        self.commits
    }

    /// Waits for the confirmation to resolve.
    pub async fn outcome(self) -> StoreResult<ToggleOutcome> {
        Ok(self.task.await?)
    }
}

/// Everything the dashboard page renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub stats: DashboardStats,
    pub recent_orders: Vec<Order>,
    pub featured_items: Vec<MenuItem>,
}

// =============================================================================
// Store
// =============================================================================

#[derive(Debug, Default)]
struct StoreState {
    menu_items: Vec<MenuItem>,
    orders: Vec<Order>,
}

#[derive(Debug)]
struct Inner {
    state: Mutex<StoreState>,
    services: StoreServices,
    settings: StoreSettings,
}

/// In-memory menu and order store. Clones share the same state.
#[derive(Debug, Clone)]
pub struct RestaurantStore {
    inner: Arc<Inner>,
}

impl RestaurantStore {
    /// Creates a store holding `seed`.
    ///
    /// The seed is trusted as-is; use `SeedData::from_json` or
    /// `SeedData::validate` for untrusted input.
    pub fn new(seed: SeedData, services: StoreServices, settings: StoreSettings) -> Self {
        info!(
            menu_items = seed.menu_items.len(),
            orders = seed.orders.len(),
            "Restaurant store initialized"
        );

        RestaurantStore {
            inner: Arc::new(Inner {
                state: Mutex::new(StoreState {
                    menu_items: seed.menu_items,
                    orders: seed.orders,
                }),
                services,
                settings,
            }),
        }
    }

    pub fn settings(&self) -> &StoreSettings {
        &self.inner.settings
    }

    fn state(&self) -> MutexGuard<'_, StoreState> {
        // No write panics halfway, so a poisoned lock still holds whole data.
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn notify(&self, kind: NotificationKind, subject_id: &str) {
        self.inner
            .services
            .notifier
            .notify(Notification::new(kind, subject_id));
    }

    // =========================================================================
    // Reads
    // =========================================================================

    pub fn menu_items(&self) -> Vec<MenuItem> {
        self.state().menu_items.clone()
    }

    pub fn orders(&self) -> Vec<Order> {
        self.state().orders.clone()
    }

    pub fn menu_item(&self, id: &str) -> Option<MenuItem> {
        self.state().menu_items.iter().find(|m| m.id == id).cloned()
    }

    pub fn order(&self, id: &str) -> Option<Order> {
        self.state().orders.iter().find(|o| o.id == id).cloned()
    }

    /// Recomputes dashboard stats from the current collections.
    pub fn compute_stats(&self) -> DashboardStats {
        let state = self.state();
        compute_stats(&state.menu_items, &state.orders)
    }

    // =========================================================================
    // Menu Mutations
    // =========================================================================

    /// Appends a new item with a fresh id and `created_at == updated_at == now`.
    ///
    /// Never fails; callers validate input first.
    pub fn add_menu_item(&self, new: NewMenuItem) -> MenuItem {
        let id = self.inner.services.ids.next_id();
        let now = self.inner.services.clock.now();
        let item = MenuItem::from_new(id, new, now);

        self.state().menu_items.push(item.clone());

        info!(id = %item.id, name = %item.name, "Menu item added");
        self.notify(NotificationKind::MenuItemAdded, &item.id);
        item
    }

    /// Merges `patch` into the item and bumps `updated_at`.
    pub fn update_menu_item(&self, id: &str, patch: MenuItemPatch) -> StoreResult<MenuItem> {
        let now = self.inner.services.clock.now();
        let updated = {
            let mut state = self.state();
            let item = state
                .menu_items
                .iter_mut()
                .find(|m| m.id == id)
                .ok_or_else(|| menu_item_not_found(id))?;
            item.apply_patch(patch, now);
            item.clone()
        };

        info!(id = %updated.id, "Menu item updated");
        self.notify(NotificationKind::MenuItemUpdated, id);
        Ok(updated)
    }

    /// Removes and returns the item. Orders that reference it keep their snapshot.
    pub fn delete_menu_item(&self, id: &str) -> StoreResult<MenuItem> {
        let removed = {
            let mut state = self.state();
            let index = state
                .menu_items
                .iter()
                .position(|m| m.id == id)
                .ok_or_else(|| menu_item_not_found(id))?;
            state.menu_items.remove(index)
        };

        info!(id = %removed.id, name = %removed.name, "Menu item deleted");
        self.notify(NotificationKind::MenuItemDeleted, id);
        Ok(removed)
    }

    /// Optimistically flips availability and starts the confirmation.
    ///
    /// The flip is visible to readers as soon as this returns. The returned
    /// handle resolves once the confirmation has either committed or rolled
    /// the menu back to its state at the moment of this call.
    ///
    /// Must be called from within a tokio runtime.
    pub fn toggle_availability(&self, id: &str) -> StoreResult<PendingToggle> {
        let runtime = Handle::try_current().map_err(|_| StoreError::NoRuntime)?;
        let now = self.inner.services.clock.now();

        let snapshot = {
            let mut state = self.state();
            let index = state
                .menu_items
                .iter()
                .position(|m| m.id == id)
                .ok_or_else(|| menu_item_not_found(id))?;
            let snapshot = state.menu_items.clone();
            state.menu_items[index].toggle_availability(now);
            debug!(
                id,
                is_available = state.menu_items[index].is_available,
                "Availability flipped optimistically"
            );
            snapshot
        };

        let draw = self.inner.services.random.draw();
        let commits = draw > self.inner.settings.failure_probability;
        debug!(id, draw, commits, "Availability confirmation started");

        let store = self.clone();
        let item_id = id.to_string();
        let task = runtime.spawn(async move {
            store.confirm_toggle(item_id, snapshot, commits).await
        });

        Ok(PendingToggle {
            item_id: id.to_string(),
            commits,
            task,
        })
    }

    async fn confirm_toggle(
        self,
        item_id: String,
        snapshot: Vec<MenuItem>,
        commits: bool,
    ) -> ToggleOutcome {
        self.inner
            .services
            .delay
            .sleep(self.inner.settings.confirmation_delay)
            .await;

        if commits {
            info!(id = %item_id, "Availability change confirmed");
            self.notify(NotificationKind::AvailabilityConfirmed, &item_id);
            return ToggleOutcome::Committed;
        }

        self.state().menu_items = snapshot;

        warn!(id = %item_id, "Availability confirmation failed, menu restored from snapshot");
        self.notify(NotificationKind::AvailabilityReverted, &item_id);
        ToggleOutcome::RolledBack
    }

    // =========================================================================
    // Order Mutations
    // =========================================================================

    /// Sets any status from any status and bumps `updated_at`.
    pub fn update_order_status(&self, id: &str, status: OrderStatus) -> StoreResult<Order> {
        let now = self.inner.services.clock.now();
        let updated = {
            let mut state = self.state();
            let order = state.orders.iter_mut().find(|o| o.id == id).ok_or_else(|| {
                warn!(id, "Order not found");
                StoreError::OrderNotFound(id.to_string())
            })?;
            let previous = order.status;
            order.set_status(status, now);
            info!(id, order_number = %order.order_number, from = %previous, to = %status, "Order status updated");
            order.clone()
        };

        self.notify(NotificationKind::OrderStatusUpdated(status), id);
        Ok(updated)
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Menu items passing `filter`, in menu order.
    pub fn search_menu(&self, filter: &MenuFilter) -> Vec<MenuItem> {
        filter_menu(&self.state().menu_items, filter)
    }

    /// One page of orders, optionally limited to `status`.
    pub fn orders_page(&self, status: Option<OrderStatus>, page: usize) -> Page<Order> {
        let filtered = filter_orders(&self.state().orders, status);
        paginate(filtered, page, self.inner.settings.page_size)
    }

    pub fn order_status_counts(&self) -> Vec<(OrderStatus, usize)> {
        status_counts(&self.state().orders)
    }

    /// Stats plus the recent-orders and featured-items previews, read under one lock.
    pub fn dashboard(&self) -> DashboardSnapshot {
        let n = self.inner.settings.preview_len;
        let state = self.state();
        DashboardSnapshot {
            stats: compute_stats(&state.menu_items, &state.orders),
            recent_orders: recent_orders(&state.orders, n),
            featured_items: featured_items(&state.menu_items, n),
        }
    }
}

fn menu_item_not_found(id: &str) -> StoreError {
    warn!(id, "Menu item not found");
    StoreError::MenuItemNotFound(id.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
