//! # Store Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Error Categories                             │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │   Lookup        │  │  Confirmation   │  │    Configuration        │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  MenuItemNot-   │  │  NoRuntime      │  │  InvalidConfig          │ │
//! │  │    Found        │  │  Confirmation-  │  │  ConfigLoadFailed       │ │
//! │  │  OrderNotFound  │  │    Aborted      │  │  ConfigSaveFailed       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                              │
//! │  │   Seed data     │  │     Core        │                              │
//! │  │  InvalidSeed    │  │  (validation)   │                              │
//! │  └─────────────────┘  └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failed availability confirmation is NOT an error: the store rolls back,
//! notifies, and reports `ToggleOutcome::RolledBack`.

use galley_core::{CoreError, ValidationError};
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    // =========================================================================
    // Lookup Errors
    // =========================================================================
    /// No menu item with this id. The store is left untouched.
    #[error("Menu item not found: {0}")]
    MenuItemNotFound(String),

    /// No order with this id. The store is left untouched.
    #[error("Order not found: {0}")]
    OrderNotFound(String),

    // =========================================================================
    // Confirmation Errors
    // =========================================================================
    /// `toggle_availability` was called outside a tokio runtime.
    #[error("No async runtime available to run the availability confirmation")]
    NoRuntime,

    /// The confirmation task never finished (runtime shut down or task panicked).
    #[error("Availability confirmation aborted: {0}")]
    ConfirmationAborted(String),

    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Seed Errors
    // =========================================================================
    #[error("Invalid seed data: {0}")]
    InvalidSeed(String),

    /// Domain error from galley-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

impl From<std::io::Error> for StoreError {
    fn from(err: std::io::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for StoreError {
    fn from(err: toml::de::Error) -> Self {
        StoreError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for StoreError {
    fn from(err: toml::ser::Error) -> Self {
        StoreError::ConfigSaveFailed(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::InvalidSeed(err.to_string())
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(err: tokio::task::JoinError) -> Self {
        StoreError::ConfirmationAborted(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl StoreError {
    /// True for the lookup failures callers usually treat as a no-op.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            StoreError::MenuItemNotFound(_) | StoreError::OrderNotFound(_)
        )
    }

    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            StoreError::InvalidConfig(_)
                | StoreError::ConfigLoadFailed(_)
                | StoreError::ConfigSaveFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_classification() {
        assert!(StoreError::MenuItemNotFound("m-1".into()).is_not_found());
        assert!(StoreError::OrderNotFound("o-1".into()).is_not_found());
        let validation: StoreError = ValidationError::Required {
            field: "name".into(),
        }
        .into();
        assert!(!validation.is_not_found());
        assert!(!StoreError::NoRuntime.is_not_found());
        assert!(!StoreError::InvalidConfig("x".into()).is_not_found());
    }

    #[test]
    fn test_validation_error_is_transparent() {
        let err: StoreError = ValidationError::Required {
            field: "name".into(),
        }
        .into();
        assert_eq!(err.to_string(), "Validation error: name is required");
    }

    #[test]
    fn test_config_classification() {
        assert!(StoreError::ConfigLoadFailed("eof".into()).is_config_error());
        assert!(!StoreError::MenuItemNotFound("m".into()).is_config_error());
    }
}
