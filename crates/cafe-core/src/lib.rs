//! # cafe-core: Pure Business Logic for Cafe POS
//!
//! This crate is the **heart** of Cafe POS. It contains all business logic
//! as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Cafe POS Architecture                         │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐ │
//! │  │                 Boundary (HTTP, out of scope)                  │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │                        cafe-engine                             │ │
//! │  │   OrderEngine · BillingEngine · Dashboard · Archival           │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │               ★ cafe-core (THIS CRATE) ★                       │ │
//! │  │   money · types · validation · capability                      │ │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │ │
//! │  └─────────────────────────────┬─────────────────────────────────┘ │
//! │                                │                                    │
//! │  ┌─────────────────────────────▼─────────────────────────────────┐ │
//! │  │                    cafe-db (SQLite layer)                      │ │
//! │  └───────────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain entities (User, Item, Order, Bill, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`error`] - Validation error types
//! - [`validation`] - Business rule validation
//! - [`capability`] - Role → allowed-operation table
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic
//! 2. **Integer Money**: All monetary values are in cents (i64)
//! 3. **Explicit Errors**: All errors are typed, never strings or panics

pub mod capability;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

pub use capability::Operation;
pub use error::{ValidationError, ValidationResult};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single order.
///
/// Prevents runaway carts and keeps transaction sizes reasonable.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity of a single item in an order.
///
/// Guards against fat-finger quantities (1000 typed instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Prefix of every generated receipt identifier.
pub const RECEIPT_PREFIX: &str = "CAFE";

/// Bills older than this many days are compressed into financial
/// summaries by the nightly archival run.
pub const BILL_RETENTION_DAYS: i64 = 30;
