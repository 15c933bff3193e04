//! # Capability Table
//!
//! Centralized role → allowed-operation mapping.
//!
//! The boundary layer checks an authenticated principal's role against
//! this table exactly once per request, instead of scattering per-endpoint
//! role checks. The core itself trusts the identity collaborator and never
//! re-verifies credentials.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │   Operation             OWNER    MANAGER    WORKER                  │
//! │   ─────────────────     ─────    ───────    ──────                  │
//! │   CreateOrder             ✓         ✓         ✓                     │
//! │   GenerateBill            ✓         ✓         ✓                     │
//! │   ViewDashboard           ✓         ✓                               │
//! │   ManageMenu              ✓         ✓                               │
//! │   ManageDiscounts         ✓         ✓                               │
//! │   ManageUsers             ✓                                         │
//! │   RunArchival             ✓                                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::types::Role;

/// An operation a principal may attempt against the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    /// Create an order from a cart of item references.
    CreateOrder,
    /// Convert an order into a bill.
    GenerateBill,
    /// Any dashboard report (summary, revenue, top items, ...).
    ViewDashboard,
    /// Author or toggle menu items (collaborator surface).
    ManageMenu,
    /// Author or toggle discounts (collaborator surface).
    ManageDiscounts,
    /// Create or modify staff accounts (collaborator surface).
    ManageUsers,
    /// Trigger an archival run outside the schedule.
    RunArchival,
}

impl Role {
    /// Returns whether this role is allowed to perform `op`.
    pub const fn allows(self, op: Operation) -> bool {
        match op {
            Operation::CreateOrder | Operation::GenerateBill => true,
            Operation::ViewDashboard | Operation::ManageMenu | Operation::ManageDiscounts => {
                matches!(self, Role::Owner | Role::Manager)
            }
            Operation::ManageUsers | Operation::RunArchival => matches!(self, Role::Owner),
        }
    }

    /// All operations this role may perform, for boundary introspection.
    pub fn allowed_operations(self) -> Vec<Operation> {
        const ALL: [Operation; 7] = [
            Operation::CreateOrder,
            Operation::GenerateBill,
            Operation::ViewDashboard,
            Operation::ManageMenu,
            Operation::ManageDiscounts,
            Operation::ManageUsers,
            Operation::RunArchival,
        ];
        ALL.into_iter().filter(|op| self.allows(*op)).collect()
    }
}
