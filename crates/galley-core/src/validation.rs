//! # Validation Module
//!
//! Input validation for menu items, order data and store settings.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Admin form                                                    │
//! │  ├── Required fields, numeric inputs                                    │
//! │  └── Calls validate_new_menu_item / validate_patch                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: RestaurantStore                                               │
//! │  └── Trusts its caller: add/update never reject input                   │
//! │                                                                         │
//! │  Seed loading and config loading run these checks too, since their     │
//! │  input never passed through a form.                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{MenuItem, MenuItemPatch, NewMenuItem, Order};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted menu item name.
pub const MAX_NAME_LEN: usize = 120;

/// Longest accepted description.
pub const MAX_DESCRIPTION_LEN: usize = 1000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a menu item name.
///
/// ```rust
/// use galley_core::validation::validate_menu_item_name;
///
/// assert!(validate_menu_item_name("Tiramisu").is_ok());
/// assert!(validate_menu_item_name("   ").is_err());
/// ```
pub fn validate_menu_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Prices may be zero (staff meals, free water) but never negative.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

pub fn validate_preparation_time(minutes: u32) -> ValidationResult<()> {
    if minutes == 0 {
        return Err(ValidationError::MustBePositive {
            field: "preparation time".to_string(),
        });
    }

    Ok(())
}

pub fn validate_quantity(quantity: u32) -> ValidationResult<()> {
    if quantity == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

pub fn validate_table_number(table: u32) -> ValidationResult<()> {
    if table == 0 {
        return Err(ValidationError::MustBePositive {
            field: "table number".to_string(),
        });
    }

    Ok(())
}

/// Validates a probability in `[0, 1]`.
///
/// ```rust
/// use galley_core::validation::validate_probability;
///
/// assert!(validate_probability("failure_probability", 0.1).is_ok());
/// assert!(validate_probability("failure_probability", 1.5).is_err());
/// assert!(validate_probability("failure_probability", f64::NAN).is_err());
/// ```
pub fn validate_probability(field: &str, value: f64) -> ValidationResult<()> {
    if value.is_nan() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a number".to_string(),
        });
    }

    if !(0.0..=1.0).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: 1,
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Validates everything the add-item form submits.
pub fn validate_new_menu_item(item: &NewMenuItem) -> ValidationResult<()> {
    validate_menu_item_name(&item.name)?;
    validate_description(&item.description)?;
    validate_price(item.price)?;
    validate_preparation_time(item.preparation_time)?;
    Ok(())
}

/// Validates only the fields a patch actually sets.
pub fn validate_patch(patch: &MenuItemPatch) -> ValidationResult<()> {
    if let Some(name) = &patch.name {
        validate_menu_item_name(name)?;
    }
    if let Some(description) = &patch.description {
        validate_description(description)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(minutes) = patch.preparation_time {
        validate_preparation_time(minutes)?;
    }
    Ok(())
}

/// Validates a stored menu item, including the timestamp invariant.
pub fn validate_menu_item(item: &MenuItem) -> ValidationResult<()> {
    if item.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    validate_menu_item_name(&item.name)?;
    validate_description(&item.description)?;
    validate_price(item.price)?;
    validate_preparation_time(item.preparation_time)?;

    if item.updated_at < item.created_at {
        return Err(ValidationError::InvalidFormat {
            field: "updatedAt".to_string(),
            reason: "must not be earlier than createdAt".to_string(),
        });
    }

    Ok(())
}

/// Validates an order loaded from seed data.
pub fn validate_order(order: &Order) -> ValidationResult<()> {
    if order.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }
    if order.order_number.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "order number".to_string(),
        });
    }
    validate_table_number(order.table_number)?;
    validate_price(order.total_amount)?;

    for line in &order.items {
        validate_quantity(line.quantity)?;
        validate_price(line.price)?;
    }

    if order.updated_at < order.created_at {
        return Err(ValidationError::InvalidFormat {
            field: "updatedAt".to_string(),
            reason: "must not be earlier than createdAt".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
