//! # Validation Module
//!
//! Input validation for Cafe POS requests.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Validation Layers                             │
//! │                                                                     │
//! │  Layer 1: Boundary (deserialization, type checks)                   │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE - business rule validation                    │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Database (NOT NULL / UNIQUE / CHECK / FK constraints)     │
//! │                                                                     │
//! │  Defense in depth: different layers catch different faults          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::{MAX_ITEM_QUANTITY, MAX_ORDER_ITEMS};

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order line quantity.
///
/// ## Rules
/// - Must be ≥ 1
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 1 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a discount percentage in basis points (0..=10000).
pub fn validate_percent_bps(bps: u32) -> ValidationResult<()> {
    if bps > 10_000 {
        return Err(ValidationError::OutOfRange {
            field: "percentage".to_string(),
            min: 0,
            max: 10_000,
        });
    }
    Ok(())
}

/// Validates 1-based pagination parameters.
///
/// Returns the zero-based row offset on success. The offset is computed
/// in u64 so a large-but-valid page number cannot overflow.
pub fn validate_pagination(page: u32, size: u32) -> ValidationResult<u64> {
    if page < 1 {
        return Err(ValidationError::MustBePositive {
            field: "page".to_string(),
        });
    }
    if size < 1 || size > 200 {
        return Err(ValidationError::OutOfRange {
            field: "size".to_string(),
            min: 1,
            max: 200,
        });
    }
    Ok((page as u64 - 1) * size as u64)
}

// =============================================================================
// Order Validators
// =============================================================================

/// Validates the shape of an order's line requests.
///
/// Checks the collection bounds and each line's quantity. Item existence
/// and availability are resolved later against the store.
///
/// ## Example
/// ```rust
/// use cafe_core::validation::validate_order_lines;
///
/// assert!(validate_order_lines(&[("espresso", 2), ("latte", 1)]).is_ok());
/// assert!(validate_order_lines::<&str>(&[]).is_err());
/// assert!(validate_order_lines(&[("espresso", 0)]).is_err());
/// ```
pub fn validate_order_lines<I: AsRef<str>>(lines: &[(I, i64)]) -> ValidationResult<()> {
    if lines.is_empty() {
        return Err(ValidationError::Empty {
            field: "items".to_string(),
        });
    }

    if lines.len() > MAX_ORDER_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_ORDER_ITEMS as i64,
        });
    }

    for (item_id, quantity) in lines {
        if item_id.as_ref().trim().is_empty() {
            return Err(ValidationError::Required {
                field: "itemId".to_string(),
            });
        }
        validate_quantity(*quantity)?;
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a username.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Alphanumeric plus `.`, `-`, `_`
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let username = username.trim();

    if username.is_empty() {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if username.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: 50,
        });
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "username".to_string(),
            reason: "must contain only letters, numbers, dots, hyphens, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a menu item name.
pub fn validate_item_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_bounds() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-3).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_percent_bps_bounds() {
        assert!(validate_percent_bps(0).is_ok());
        assert!(validate_percent_bps(10_000).is_ok());
        assert!(validate_percent_bps(10_001).is_err());
    }

    #[test]
    fn test_pagination() {
        assert_eq!(validate_pagination(1, 10).unwrap(), 0);
        assert_eq!(validate_pagination(3, 25).unwrap(), 50);
        assert!(validate_pagination(0, 10).is_err());
        assert!(validate_pagination(1, 0).is_err());
        assert!(validate_pagination(1, 500).is_err());
    }

    #[test]
    fn test_pagination_huge_page_does_not_overflow() {
        let offset = validate_pagination(u32::MAX, 200).unwrap();
        assert_eq!(offset, (u32::MAX as u64 - 1) * 200);
    }

    #[test]
    fn test_order_lines() {
        assert!(validate_order_lines(&[("a", 1)]).is_ok());
        assert!(validate_order_lines::<&str>(&[]).is_err());
        assert!(validate_order_lines(&[("a", 0)]).is_err());
        assert!(validate_order_lines(&[("", 1)]).is_err());

        let too_many: Vec<(String, i64)> =
            (0..=MAX_ORDER_ITEMS).map(|i| (format!("item-{i}"), 1)).collect();
        assert!(validate_order_lines(&too_many).is_err());
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("anita.k").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username(&"x".repeat(51)).is_err());
    }

    #[test]
    fn test_item_name_rules() {
        assert!(validate_item_name("Masala Chai").is_ok());
        assert!(validate_item_name("  ").is_err());
        assert!(validate_item_name(&"x".repeat(201)).is_err());
    }
}
