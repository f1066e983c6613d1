//! # Notifications
//!
//! Fire-and-forget toasts emitted by store mutations.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  RestaurantStore ──notify()──► Notifier                                 │
//! │                                 ├── TracingNotifier   (log lines)       │
//! │                                 ├── BroadcastNotifier (UI subscribers)  │
//! │                                 └── NoopNotifier                        │
//! │                                                                         │
//! │  The store never reads anything back from the notifier.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use galley_core::OrderStatus;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{info, warn};
use ts_rs::TS;

/// Default buffer for `BroadcastNotifier`. Slow subscribers lag, the store never blocks.
pub const NOTIFICATION_CHANNEL_CAPACITY: usize = 64;

/// Which toast channel a notification goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// What happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "type", content = "status", rename_all = "camelCase")]
#[ts(export)]
pub enum NotificationKind {
    MenuItemAdded,
    MenuItemUpdated,
    MenuItemDeleted,
    /// The availability confirmation succeeded.
    AvailabilityConfirmed,
    /// The availability confirmation failed and the menu was restored.
    AvailabilityReverted,
    OrderStatusUpdated(OrderStatus),
}

impl NotificationKind {
    pub fn level(&self) -> NotificationLevel {
        match self {
            NotificationKind::AvailabilityReverted => NotificationLevel::Error,
            _ => NotificationLevel::Success,
        }
    }

    /// Toast text shown to staff.
    pub fn message(&self) -> String {
        match self {
            NotificationKind::MenuItemAdded => "Menu item added successfully!".to_string(),
            NotificationKind::MenuItemUpdated => "Menu item updated successfully!".to_string(),
            NotificationKind::MenuItemDeleted => "Menu item deleted successfully!".to_string(),
            NotificationKind::AvailabilityConfirmed => "Availability updated!".to_string(),
            NotificationKind::AvailabilityReverted => {
                "Failed to update. Reverting changes...".to_string()
            }
            NotificationKind::OrderStatusUpdated(status) => {
                format!("Order status updated to {}!", status)
            }
        }
    }
}

/// A single toast.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Notification {
    pub level: NotificationLevel,
    pub kind: NotificationKind,
    /// Id of the menu item or order the notification is about.
    pub subject_id: String,
    pub message: String,
}

impl Notification {
    pub fn new(kind: NotificationKind, subject_id: impl Into<String>) -> Self {
        Notification {
            level: kind.level(),
            kind,
            subject_id: subject_id.into(),
            message: kind.message(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// Sink for store notifications.
pub trait Notifier: Send + Sync + 'static {
    fn notify(&self, notification: Notification);
}

/// Writes every notification to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.level {
            NotificationLevel::Success => {
                info!(subject = %n.subject_id, kind = ?n.kind, "{}", n.message)
            }
            NotificationLevel::Error => {
                warn!(subject = %n.subject_id, kind = ?n.kind, "{}", n.message)
            }
        }
    }
}

/// Fans notifications out to any number of subscribers.
#[derive(Debug, Clone)]
pub struct BroadcastNotifier {
    tx: broadcast::Sender<Notification>,
}

impl BroadcastNotifier {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        BroadcastNotifier { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new(NOTIFICATION_CHANNEL_CAPACITY)
    }
}

impl Notifier for BroadcastNotifier {
    fn notify(&self, notification: Notification) {
        // No subscribers is fine: toasts are fire-and-forget.
        let _ = self.tx.send(notification);
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

impl Notifier for NoopNotifier {
    fn notify(&self, _notification: Notification) {}
}
