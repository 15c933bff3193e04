//! # Domain Types
//!
//! Core domain entities used throughout Cafe POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Entities                             │
//! │                                                                     │
//! │  ┌─────────────┐   ┌──────────────┐   ┌──────────────────────┐      │
//! │  │    User     │   │    Order     │   │        Bill          │      │
//! │  │  ─────────  │   │  ──────────  │   │  ──────────────────  │      │
//! │  │  id (UUID)  │◄──┤  user_id     │◄──┤  order_id (UNIQUE)   │      │
//! │  │  username   │   │  order_date  │   │  receipt_id (UNIQUE) │      │
//! │  │  role       │   │  total_cents │   │  payment_mode        │      │
//! │  └─────────────┘   │  items ───┐  │   └──────────┬───────────┘      │
//! │                    └───────────│──┘              │ archival         │
//! │  ┌─────────────┐   ┌───────────▼──┐   ┌──────────▼───────────┐      │
//! │  │    Item     │◄──┤  OrderItem   │   │  FinancialSummary    │      │
//! │  │  ─────────  │   │  ──────────  │   │  (append-only)       │      │
//! │  │  price      │   │  snapshots   │   └──────────────────────┘      │
//! │  │  available  │   │  qty ≥ 1     │                                 │
//! │  └─────────────┘   └──────────────┘                                 │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! An `OrderItem` freezes the menu item's name and unit price at order
//! time. Later price changes or renames never alter order history.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// Staff role. Created by the user-management collaborator; the core only
/// consults it through the capability table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Owner,
    Manager,
    Worker,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Owner => "OWNER",
            Role::Manager => "MANAGER",
            Role::Worker => "WORKER",
        };
        f.write_str(s)
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "OWNER" => Ok(Role::Owner),
            "MANAGER" => Ok(Role::Manager),
            "WORKER" => Ok(Role::Worker),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["OWNER".into(), "MANAGER".into(), "WORKER".into()],
            }),
        }
    }
}

// =============================================================================
// Payment Mode
// =============================================================================

/// Settlement method recorded on a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "UPPERCASE"))]
#[serde(rename_all = "UPPERCASE")]
pub enum PaymentMode {
    /// Physical cash payment.
    Cash,
    /// Card payment on an external terminal.
    Card,
    /// UPI / QR-code transfer.
    Upi,
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentMode::Cash => "CASH",
            PaymentMode::Card => "CARD",
            PaymentMode::Upi => "UPI",
        };
        f.write_str(s)
    }
}

impl FromStr for PaymentMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "CASH" => Ok(PaymentMode::Cash),
            "CARD" => Ok(PaymentMode::Card),
            "UPI" => Ok(PaymentMode::Upi),
            _ => Err(ValidationError::NotAllowed {
                field: "paymentMode".to_string(),
                allowed: vec!["CASH".into(), "CARD".into(), "UPI".into()],
            }),
        }
    }
}

// =============================================================================
// Report Range
// =============================================================================

/// Reporting time window selector used by the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportRange {
    /// The local calendar day.
    Day,
    /// The ISO week (Monday through Sunday).
    Week,
    /// The calendar month.
    Month,
}

impl FromStr for ReportRange {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(ReportRange::Day),
            "week" => Ok(ReportRange::Week),
            "month" => Ok(ReportRange::Month),
            _ => Err(ValidationError::NotAllowed {
                field: "range".to_string(),
                allowed: vec!["day".into(), "week".into(), "month".into()],
            }),
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A staff member. Referenced, never mutated, by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Unique login name, also shown as "cashier" in reports.
    pub username: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Item
// =============================================================================

/// A menu item. Price is read and snapshotted at order time.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub name: String,
    /// Current price in cents.
    pub price_cents: i64,
    /// Unavailable items cannot be ordered.
    pub available: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Returns the current price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Discount
// =============================================================================

/// A named percentage reduction applicable at billing time. Read-only
/// input to the billing engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub id: String,
    pub name: String,
    /// Percentage in basis points: 1250 = 12.50%. Range 0..=10000.
    pub percent_bps: u32,
    /// Inactive discounts are treated as a zero percentage, not an error.
    pub active: bool,
}

// =============================================================================
// Order
// =============================================================================

/// A persisted customer order. Immutable after creation: the core has no
/// update or delete path for orders (archival removes them together with
/// their bill).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    /// The staff member who took the order.
    pub user_id: String,
    pub order_date: DateTime<Utc>,
    /// Fixed at creation: Σ(unit price snapshot × quantity).
    pub total_cents: i64,
    /// Line items, owned exclusively by this order. Loaded separately
    /// from the order row.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub items: Vec<OrderItem>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A line item in an order. One-directional ownership: the order holds its
/// items, the item carries no back-reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub item_id: String,
    /// Menu item name at order time (frozen).
    pub name_snapshot: String,
    /// Unit price in cents at order time (frozen, independent of later
    /// menu price changes).
    pub unit_price_cents: i64,
    /// Quantity ordered, always ≥ 1.
    pub quantity: i64,
}

impl OrderItem {
    /// Returns the unit price snapshot as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Line total: unit price snapshot × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Bill
// =============================================================================

/// An immutable billing record, generated exactly once per order and
/// deleted only by the archival process.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,
    /// Exactly one order per bill; unique in the store.
    pub order_id: String,
    pub bill_date: DateTime<Utc>,
    /// Copy of the order total at billing time.
    pub total_cents: i64,
    /// Discount amount (not percentage), half-up rounded to cents.
    pub discount_cents: i64,
    /// total − discount, never negative for a valid percentage.
    pub final_cents: i64,
    /// Globally unique, human-legible, sortable receipt identifier.
    pub receipt_id: String,
    pub payment_mode: PaymentMode,
}

impl Bill {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_cents(self.discount_cents)
    }

    #[inline]
    pub fn final_amount(&self) -> Money {
        Money::from_cents(self.final_cents)
    }
}

// =============================================================================
// Financial Summary
// =============================================================================

/// Append-only archival record capturing a deleted bill's monetary facts.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct FinancialSummary {
    pub id: String,
    /// When the archival run removed the bill.
    pub archived_date: DateTime<Utc>,
    pub original_bill_date: DateTime<Utc>,
    pub total_cents: i64,
    pub discount_cents: i64,
    pub final_cents: i64,
    /// Carried over unchanged; stays unique so archival preserves global
    /// receipt uniqueness.
    pub receipt_id: String,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("owner".parse::<Role>().unwrap(), Role::Owner);
        assert_eq!(Role::Manager.to_string(), "MANAGER");
        assert!("ADMIN".parse::<Role>().is_err());
    }

    #[test]
    fn test_payment_mode_round_trip() {
        assert_eq!("cash".parse::<PaymentMode>().unwrap(), PaymentMode::Cash);
        assert_eq!("UPI".parse::<PaymentMode>().unwrap(), PaymentMode::Upi);
        assert_eq!(PaymentMode::Card.to_string(), "CARD");
        assert!("CHEQUE".parse::<PaymentMode>().is_err());
    }

    #[test]
    fn test_report_range_parse() {
        assert_eq!("day".parse::<ReportRange>().unwrap(), ReportRange::Day);
        assert_eq!("WEEK".parse::<ReportRange>().unwrap(), ReportRange::Week);
        assert_eq!("Month".parse::<ReportRange>().unwrap(), ReportRange::Month);
        assert!("year".parse::<ReportRange>().is_err());
    }

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem {
            id: "oi-1".into(),
            order_id: "o-1".into(),
            item_id: "i-1".into(),
            name_snapshot: "Espresso".into(),
            unit_price_cents: 250,
            quantity: 3,
        };
        assert_eq!(item.line_total().cents(), 750);
    }

    #[test]
    fn test_payment_mode_serde_uppercase() {
        let json = serde_json::to_string(&PaymentMode::Cash).unwrap();
        assert_eq!(json, "\"CASH\"");
        let back: PaymentMode = serde_json::from_str("\"UPI\"").unwrap();
        assert_eq!(back, PaymentMode::Upi);
    }
}
