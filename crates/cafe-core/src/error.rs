//! # Error Types
//!
//! Validation error types for cafe-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                          Error Types                                │
//! │                                                                     │
//! │  cafe-core (this file)                                              │
//! │  └── ValidationError  - Input validation failures                   │
//! │                                                                     │
//! │  cafe-db (separate crate)                                           │
//! │  └── DbError          - Database operation failures                 │
//! │                                                                     │
//! │  cafe-engine (separate crate)                                       │
//! │  └── EngineError      - NotFound / Conflict / Validation / Storage  │
//! │                                                                     │
//! │  Flow: ValidationError → EngineError → boundary response            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impls)
//! 2. Include context in error messages (field name, allowed values)
//! 3. Errors are enum variants, never bare strings

use thiserror::Error;

/// Input validation errors.
///
/// These occur when request input doesn't meet requirements. They are
/// raised before any business logic runs and map to a 400-class response
/// at the boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// A collection field is empty where at least one entry is required.
    #[error("{field} must contain at least one entry")]
    Empty { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g. malformed date filter).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set (e.g. unknown report range).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ValidationError::Empty {
            field: "items".to_string(),
        };
        assert_eq!(err.to_string(), "items must contain at least one entry");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_not_allowed_lists_choices() {
        let err = ValidationError::NotAllowed {
            field: "range".to_string(),
            allowed: vec!["day".into(), "week".into(), "month".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("range"));
        assert!(msg.contains("week"));
    }
}
