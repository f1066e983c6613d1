//! # galley-core: Pure Domain Logic for the Galley Back Office
//!
//! Menu items, orders, money, validation, dashboard statistics and list
//! queries. Nothing in here reads a clock, sleeps, draws random numbers or
//! touches the filesystem; timestamps are always passed in.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Galley Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Admin Frontend                               │   │
//! │  │    Dashboard ──► Menu Management ──► Orders Dashboard           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                galley-store (RestaurantStore)                   │   │
//! │  │    add/update/delete items, optimistic toggle, order status     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ galley-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   stats   │  │   query   │  │   │
//! │  │   │ MenuItem  │  │   Money   │  │ Dashboard │  │  filters  │  │   │
//! │  │   │  Order    │  │           │  │   Stats   │  │   pages   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO RANDOMNESS • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - MenuItem, Order, OrderItem, categories and statuses
//! - [`money`] - Integer-cent money
//! - [`stats`] - Dashboard statistics
//! - [`query`] - Menu filters, order filters, pagination
//! - [`validation`] - Input checks
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use galley_core::{compute_stats, Money};
//!
//! let stats = compute_stats(&[], &[]);
//! assert_eq!(stats.total_revenue, Money::zero());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod query;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use query::{AvailabilityFilter, MenuFilter, Page};
pub use stats::{compute_stats, DashboardStats};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Rows per page on the orders table.
pub const DEFAULT_PAGE_SIZE: usize = 5;

/// How many recent orders and featured items the dashboard shows.
pub const DEFAULT_PREVIEW_LEN: usize = 5;
