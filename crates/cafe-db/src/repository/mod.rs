//! # Repository Module
//!
//! Database repository implementations for Cafe POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Engine layer                                                       │
//! │       │  db.orders().create_with_items(&order)                      │
//! │       ▼                                                             │
//! │  OrderRepository                                                    │
//! │  ├── create_with_items(&self, order)      ← one transaction         │
//! │  ├── get_by_id(&self, id)                                           │
//! │  └── user_order_rows(&self)                                         │
//! │       │  SQL                                                        │
//! │       ▼                                                             │
//! │  SQLite                                                             │
//! │                                                                     │
//! │  Benefits: SQL isolated in one place, repositories cheap to clone,  │
//! │  transactional units kept next to the tables they touch.            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`user::UserRepository`] - staff lookup
//! - [`item::ItemRepository`] - menu item lookup and authoring
//! - [`discount::DiscountRepository`] - discount lookup
//! - [`order::OrderRepository`] - atomic order+items persistence, order stats
//! - [`bill::BillRepository`] - bill insertion, transaction search
//! - [`summary::SummaryRepository`] - archival (summarize-then-delete)

pub mod bill;
pub mod discount;
pub mod item;
pub mod order;
pub mod summary;
pub mod user;
