//! # galley-store: Restaurant Admin State
//!
//! The in-memory store behind the restaurant admin dashboard. It owns the
//! menu and the order book, applies every mutation, and reports outcomes as
//! toast notifications.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        galley-store Architecture                        │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                 RestaurantStore (Arc<Mutex<state>>)              │  │
//! │  │                                                                  │  │
//! │  │  menu_items: Vec<MenuItem>        orders: Vec<Order>             │  │
//! │  │  add / update / delete / toggle   update_order_status            │  │
//! │  │  compute_stats / dashboard / search_menu / orders_page           │  │
//! │  └────────────────────────────┬─────────────────────────────────────┘  │
//! │                               │                                         │
//! │         ┌─────────────────────┼─────────────────────┐                  │
//! │         ▼                     ▼                     ▼                   │
//! │  ┌────────────────┐  ┌────────────────┐  ┌────────────────────────┐    │
//! │  │ StoreServices  │  │   Notifier     │  │   GalleyConfig         │    │
//! │  │                │  │                │  │                        │    │
//! │  │ clock, rng,    │  │ success/error  │  │ TOML + GALLEY_* env    │    │
//! │  │ delay, ids     │  │ toasts         │  │ → StoreSettings        │    │
//! │  └────────────────┘  └────────────────┘  └────────────────────────┘    │
//! │                                                                         │
//! │  Pure domain logic (types, validation, stats, queries) lives in        │
//! │  galley-core; this crate adds state, time and I/O.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`config`] - TOML/env configuration
//! - [`error`] - Store error types
//! - [`notify`] - Notification types and sinks
//! - [`seed`] - Sample and JSON seed data
//! - [`services`] - Injected clock, randomness, delay and id generation
//! - [`store`] - `RestaurantStore` and the optimistic availability toggle
//!
//! ## Usage
//!
//! ```rust,ignore
//! use galley_store::{GalleyConfig, RestaurantStore, SeedData, StoreServices};
//!
//! let config = GalleyConfig::load_or_default(None);
//! let store = RestaurantStore::new(
//!     SeedData::sample(chrono::Utc::now()),
//!     StoreServices::system(),
//!     config.store_settings(),
//! );
//!
//! let pending = store.toggle_availability("3")?;
//! println!("Available now: {:?}", store.menu_item("3").map(|m| m.is_available));
//! println!("Outcome: {:?}", pending.outcome().await?);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod notify;
pub mod seed;
pub mod services;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::{DashboardSettings, GalleyConfig, LoggingSettings, OrdersSettings, ToggleSettings};
pub use error::{StoreError, StoreResult};
pub use notify::{
    BroadcastNotifier, NoopNotifier, Notification, NotificationKind, NotificationLevel, Notifier,
    TracingNotifier,
};
pub use seed::SeedData;
pub use services::{
    Clock, Delay, FixedDraw, IdGenerator, ManualClock, RandomSource, SequentialIds, StoreServices,
    SystemClock, ThreadRandom, TokioDelay, UuidGenerator,
};
pub use store::{DashboardSnapshot, PendingToggle, RestaurantStore, StoreSettings, ToggleOutcome};
