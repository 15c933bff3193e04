//! # Billing Engine
//!
//! Converts an order into exactly one immutable bill.
//!
//! ## One Bill Per Order, Under Concurrency
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  generateBill(orderId, discountId?, paymentMode)                    │
//! │                                                                     │
//! │  fast-fail check:   bill exists for order?  → Conflict              │
//! │        (friendly message only, NOT the correctness mechanism)       │
//! │                                                                     │
//! │  authority:         bills.order_id UNIQUE constraint                │
//! │        two racing inserts → exactly one commits, the loser's        │
//! │        UniqueViolation(bills.order_id) maps to Conflict             │
//! │                                                                     │
//! │  receipt collision: UniqueViolation(bills.receipt_id)               │
//! │        → regenerate suffix, retry (3 attempts), then Conflict       │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Discount Semantics
//! A missing discount id is NotFound; an **inactive** discount row is a
//! zero percentage, not an error. Amount math is half-up cent rounding
//! in [`Money::percent`].

use chrono::Local;
use tracing::{info, warn};
use uuid::Uuid;

use cafe_core::{Bill, Money, PaymentMode, RECEIPT_PREFIX};
use cafe_db::{Database, DbError};

use crate::error::{EngineError, EngineResult};

/// Attempts before a persistent receipt-id collision becomes a Conflict.
const RECEIPT_RETRY_ATTEMPTS: u32 = 3;

/// Generates bills. Stateless; holds only the database handle.
#[derive(Debug, Clone)]
pub struct BillingEngine {
    db: Database,
}

impl BillingEngine {
    /// Creates a new BillingEngine.
    pub fn new(db: Database) -> Self {
        BillingEngine { db }
    }

    /// Bills an order, applying an optional discount.
    pub async fn generate_bill(
        &self,
        order_id: &str,
        discount_id: Option<&str>,
        payment_mode: PaymentMode,
    ) -> EngineResult<Bill> {
        if self.db.bills().get_by_order_id(order_id).await?.is_some() {
            return Err(EngineError::conflict(format!(
                "order already billed: {order_id}"
            )));
        }

        let order = self
            .db
            .orders()
            .get_by_id(order_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Order", order_id))?;

        let percent_bps = match discount_id {
            Some(id) => {
                let discount = self
                    .db
                    .discounts()
                    .get_by_id(id)
                    .await?
                    .ok_or_else(|| EngineError::not_found("Discount", id))?;
                if discount.active {
                    discount.percent_bps
                } else {
                    0
                }
            }
            None => 0,
        };

        let total = order.total();
        let discount_amount = total.percent(percent_bps);
        let final_amount = total - discount_amount;

        for attempt in 1..=RECEIPT_RETRY_ATTEMPTS {
            let bill = Bill {
                id: Uuid::new_v4().to_string(),
                order_id: order.id.clone(),
                bill_date: chrono::Utc::now(),
                total_cents: total.cents(),
                discount_cents: discount_amount.cents(),
                final_cents: final_amount.cents(),
                receipt_id: new_receipt_id(),
                payment_mode,
            };

            match self.db.bills().insert(&bill).await {
                Ok(()) => {
                    info!(
                        bill_id = %bill.id,
                        receipt_id = %bill.receipt_id,
                        total = %bill.total(),
                        discount = %bill.discount(),
                        "Bill generated"
                    );
                    return Ok(bill);
                }
                Err(DbError::UniqueViolation { field }) if field.contains("receipt_id") => {
                    warn!(attempt, receipt_id = %bill.receipt_id, "Receipt id collision, regenerating");
                    continue;
                }
                Err(DbError::UniqueViolation { field }) if field.contains("order_id") => {
                    // Lost the race to a concurrent caller.
                    return Err(EngineError::conflict(format!(
                        "order already billed: {order_id}"
                    )));
                }
                Err(other) => return Err(other.into()),
            }
        }

        Err(EngineError::conflict(
            "could not allocate a unique receipt id",
        ))
    }

    /// The bill for an order, or NotFound when the order is unbilled.
    pub async fn find_bill_for_order(&self, order_id: &str) -> EngineResult<Bill> {
        self.db
            .bills()
            .get_by_order_id(order_id)
            .await?
            .ok_or_else(|| EngineError::not_found("Bill for order", order_id))
    }
}

/// `CAFE-YYYYMMDD-HHMMSS-XXXXXXXX`: fixed prefix, second-precision local
/// timestamp (legible and sortable), 8 random hex chars for dispersion.
fn new_receipt_id() -> String {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    let suffix = Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    format!("{RECEIPT_PREFIX}-{stamp}-{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::order::{OrderEngine, OrderLineRequest};
    use cafe_core::{Discount, Item, Order, Role, User};
    use cafe_db::DbConfig;
    use chrono::Utc;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    async fn seed_order(db: &Database, total_cents: i64) -> Order {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: format!("cashier-{}", &Uuid::new_v4().simple().to_string()[..6]),
            role: Role::Worker,
            created_at: Utc::now(),
        };
        db.users().insert(&user).await.unwrap();

        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: "House Blend".to_string(),
            price_cents: total_cents,
            available: true,
            created_at: now,
            updated_at: now,
        };
        db.items().insert(&item).await.unwrap();

        let engine = OrderEngine::new(db.clone());
        engine
            .create_order(
                &user.id,
                &[OrderLineRequest {
                    item_id: item.id,
                    quantity: 1,
                }],
            )
            .await
            .unwrap()
    }

    async fn seed_discount(db: &Database, percent_bps: u32, active: bool) -> Discount {
        let discount = Discount {
            id: Uuid::new_v4().to_string(),
            name: "Test Discount".to_string(),
            percent_bps,
            active,
        };
        db.discounts().insert(&discount).await.unwrap();
        discount
    }

    #[tokio::test]
    async fn test_generate_bill_without_discount() {
        let db = test_db().await;
        let order = seed_order(&db, 1250).await;

        let engine = BillingEngine::new(db);
        let bill = engine
            .generate_bill(&order.id, None, PaymentMode::Cash)
            .await
            .unwrap();

        assert_eq!(bill.total_cents, 1250);
        assert_eq!(bill.discount_cents, 0);
        assert_eq!(bill.final_cents, 1250);
        assert_eq!(bill.payment_mode, PaymentMode::Cash);
    }

    #[tokio::test]
    async fn test_discount_math_rounds_half_up() {
        let db = test_db().await;
        let order = seed_order(&db, 1000).await;
        // 8.25% of 10.00 = 0.825 → 0.83
        let discount = seed_discount(&db, 825, true).await;

        let engine = BillingEngine::new(db);
        let bill = engine
            .generate_bill(&order.id, Some(&discount.id), PaymentMode::Card)
            .await
            .unwrap();

        assert_eq!(bill.discount_cents, 83);
        assert_eq!(bill.final_cents, 917);
        assert_eq!(
            bill.total_cents,
            bill.discount_cents + bill.final_cents
        );
    }

    #[tokio::test]
    async fn test_inactive_discount_is_zero_percent() {
        let db = test_db().await;
        let order = seed_order(&db, 2000).await;
        let discount = seed_discount(&db, 5000, false).await;

        let engine = BillingEngine::new(db);
        let bill = engine
            .generate_bill(&order.id, Some(&discount.id), PaymentMode::Upi)
            .await
            .unwrap();

        assert_eq!(bill.discount_cents, 0);
        assert_eq!(bill.final_cents, 2000);
    }

    #[tokio::test]
    async fn test_unknown_discount_is_not_found() {
        let db = test_db().await;
        let order = seed_order(&db, 500).await;

        let engine = BillingEngine::new(db);
        let err = engine
            .generate_bill(&order.id, Some("no-such-discount"), PaymentMode::Cash)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_unknown_order_is_not_found() {
        let db = test_db().await;
        let engine = BillingEngine::new(db);

        let err = engine
            .generate_bill("no-such-order", None, PaymentMode::Cash)
            .await
            .unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_second_bill_for_order_is_conflict() {
        let db = test_db().await;
        let order = seed_order(&db, 750).await;

        let engine = BillingEngine::new(db.clone());
        engine
            .generate_bill(&order.id, None, PaymentMode::Cash)
            .await
            .unwrap();

        let err = engine
            .generate_bill(&order.id, None, PaymentMode::Card)
            .await
            .unwrap_err();
        match err {
            EngineError::Conflict { reason } => assert!(reason.contains("already billed")),
            other => panic!("expected conflict, got {other:?}"),
        }
        assert_eq!(db.bills().count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_bill_for_order() {
        let db = test_db().await;
        let order = seed_order(&db, 600).await;

        let engine = BillingEngine::new(db);
        assert!(matches!(
            engine.find_bill_for_order(&order.id).await.unwrap_err(),
            EngineError::NotFound { .. }
        ));

        let bill = engine
            .generate_bill(&order.id, None, PaymentMode::Cash)
            .await
            .unwrap();
        let found = engine.find_bill_for_order(&order.id).await.unwrap();
        assert_eq!(found.receipt_id, bill.receipt_id);
    }

    #[tokio::test]
    async fn test_receipt_ids_are_unique_and_well_formed() {
        let db = test_db().await;
        let engine = BillingEngine::new(db.clone());

        let mut seen = std::collections::HashSet::new();
        for _ in 0..50 {
            let order = seed_order(&db, 300).await;
            let bill = engine
                .generate_bill(&order.id, None, PaymentMode::Cash)
                .await
                .unwrap();

            let parts: Vec<&str> = bill.receipt_id.split('-').collect();
            assert_eq!(parts.len(), 4);
            assert_eq!(parts[0], RECEIPT_PREFIX);
            assert_eq!(parts[1].len(), 8);
            assert_eq!(parts[2].len(), 6);
            assert_eq!(parts[3].len(), 8);
            assert!(parts[3].chars().all(|c| c.is_ascii_hexdigit()));
            assert!(!parts[3].chars().any(|c| c.is_ascii_lowercase()));

            assert!(seen.insert(bill.receipt_id), "duplicate receipt id");
        }
    }

    /// Stress scenario: ten thousand bills, zero shared receipt ids.
    /// Slow, so opt in with `cargo test -- --ignored`.
    #[tokio::test]
    #[ignore]
    async fn test_receipt_ids_unique_across_ten_thousand_bills() {
        let db = test_db().await;

        let user = User {
            id: Uuid::new_v4().to_string(),
            username: "stress".to_string(),
            role: Role::Worker,
            created_at: Utc::now(),
        };
        db.users().insert(&user).await.unwrap();

        let now = Utc::now();
        let item = Item {
            id: Uuid::new_v4().to_string(),
            name: "Drip Coffee".to_string(),
            price_cents: 275,
            available: true,
            created_at: now,
            updated_at: now,
        };
        db.items().insert(&item).await.unwrap();

        let engine = BillingEngine::new(db.clone());
        let mut seen = std::collections::HashSet::with_capacity(10_000);

        for _ in 0..10_000 {
            let order_id = Uuid::new_v4().to_string();
            let order = Order {
                id: order_id.clone(),
                user_id: user.id.clone(),
                order_date: Utc::now(),
                total_cents: 275,
                items: vec![cafe_core::OrderItem {
                    id: Uuid::new_v4().to_string(),
                    order_id,
                    item_id: item.id.clone(),
                    name_snapshot: item.name.clone(),
                    unit_price_cents: 275,
                    quantity: 1,
                }],
            };
            db.orders().create_with_items(&order).await.unwrap();

            let bill = engine
                .generate_bill(&order.id, None, PaymentMode::Cash)
                .await
                .unwrap();
            assert!(seen.insert(bill.receipt_id), "duplicate receipt id");
        }

        assert_eq!(db.bills().count_all().await.unwrap(), 10_000);
    }
}
