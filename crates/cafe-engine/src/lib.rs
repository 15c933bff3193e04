//! # cafe-engine: Transaction and Reporting Engines for Cafe POS
//!
//! Orchestration layer between the boundary (HTTP, out of scope) and
//! storage. Validation rules and money math live in `cafe-core`; SQL
//! lives in `cafe-db`; this crate sequences them into the operations the
//! boundary exposes.
//!
//! ## Data Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                           cafe-engine                               │
//! │                                                                     │
//! │  client ──► OrderEngine ────────► Order (+ OrderItems, atomic)      │
//! │                 │                                                   │
//! │  client ──► BillingEngine ──────► Bill (1:1 with Order, UNIQUE)     │
//! │                 │                                                   │
//! │  client ──► DashboardAggregator ► read-only reports                 │
//! │                                                                     │
//! │  schedule ─► ArchivalProcess ───► FinancialSummary (bill deleted)   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Error Taxonomy
//! Every operation returns [`EngineResult`]; the [`EngineError`] kinds
//! (NotFound / Conflict / Validation / Storage) are what the boundary
//! maps to response codes.

pub mod archive;
pub mod billing;
pub mod dashboard;
pub mod error;
pub mod order;

pub use archive::{ArchivalConfig, ArchivalProcess};
pub use billing::BillingEngine;
pub use dashboard::{
    DashboardAggregator, DashboardSummary, PaymentModeRevenue, RevenueBucket, TopItem,
    TransactionPage, UserPerformance,
};
pub use error::{EngineError, EngineResult};
pub use order::{OrderEngine, OrderLineRequest};
