//! # Engine Error Types
//!
//! The error taxonomy the boundary layer maps to response codes.
//!
//! ## Taxonomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  NotFound    - referenced user/item/order/discount absent           │
//! │  Conflict    - unavailable item, duplicate bill, receipt collision  │
//! │  Validation  - empty cart, bad quantity, unknown range value        │
//! │  Storage     - anything the database layer could not classify       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage errors never leak raw sqlx details past this layer; the
//! boundary logs them and reports a generic internal failure.

use thiserror::Error;

use cafe_core::ValidationError;
use cafe_db::DbError;

/// Errors raised by the engine layer.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A referenced entity does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// The operation conflicts with existing state.
    #[error("conflict: {reason}")]
    Conflict { reason: String },

    /// Request input failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// An unclassified storage fault.
    #[error("storage error: {0}")]
    Storage(DbError),
}

impl EngineError {
    /// Creates a NotFound error.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        EngineError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Creates a Conflict error.
    pub fn conflict(reason: impl Into<String>) -> Self {
        EngineError::Conflict {
            reason: reason.into(),
        }
    }

    /// True for errors the client can fix by changing the request.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, EngineError::Storage(_))
    }
}

/// Storage NotFound carries its entity context through; constraint
/// violations that reach this blanket conversion were not anticipated by
/// the calling engine and surface as conflicts with the violated field.
impl From<DbError> for EngineError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => EngineError::NotFound { entity, id },
            DbError::UniqueViolation { field } => EngineError::Conflict {
                reason: format!("duplicate value for {field}"),
            },
            other => EngineError::Storage(other),
        }
    }
}

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
