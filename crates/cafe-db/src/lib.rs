//! # cafe-db: Database Layer for Cafe POS
//!
//! SQLite persistence for the order-to-bill engine: connection pooling,
//! embedded migrations, and one repository per aggregate.
//!
//! ## Layer Boundaries
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           cafe-db                                   │
//! │                                                                     │
//! │  ✅ RESPONSIBILITIES                 ❌ NOT RESPONSIBLE FOR          │
//! │  ──────────────────────              ─────────────────────────      │
//! │  • Connection pool management        • Business rules (cafe-core)   │
//! │  • SQL query execution               • Discount math (cafe-engine)  │
//! │  • Schema migrations                 • Report aggregation           │
//! │  • Repository implementations        • Scheduling                   │
//! │  • Transaction management                                           │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Correctness Notes
//! - `bills.order_id` and `bills.receipt_id` carry UNIQUE constraints; the
//!   resulting SQLite errors are classified into [`DbError::UniqueViolation`]
//!   so callers can translate races into domain conflicts.
//! - Multi-row writes (order + items, summary + deletes) run inside a
//!   single transaction; a failure rolls back the whole unit.

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::bill::{BillRepository, TransactionFilter, TransactionRow};
pub use repository::discount::DiscountRepository;
pub use repository::item::ItemRepository;
pub use repository::order::OrderRepository;
pub use repository::summary::SummaryRepository;
pub use repository::user::UserRepository;
