//! # Bill Repository
//!
//! Bill insertion and the transaction-search queries behind the dashboard.
//!
//! ## One Bill Per Order
//! The `bills.order_id` UNIQUE constraint is the authority for the 1:1
//! Order↔Bill invariant. Two concurrent inserts for the same order cannot
//! both commit; the loser surfaces as [`DbError::UniqueViolation`] with
//! field `bills.order_id` and is translated to a domain conflict upstream.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::DbResult;
use cafe_core::{Bill, PaymentMode};

/// Optional, AND-combined filters for the recent-transactions search.
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Exact username of the cashier who took the order.
    pub cashier: Option<String>,
    /// Inclusive lower bound on the bill's final amount, in cents.
    pub min_cents: Option<i64>,
    /// Inclusive upper bound on the bill's final amount, in cents.
    pub max_cents: Option<i64>,
    /// Inclusive lower bound on the bill date.
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the bill date.
    pub end_date: Option<DateTime<Utc>>,
    /// Settlement method recorded on the bill.
    pub payment_mode: Option<PaymentMode>,
}

/// A bill joined with its order's user, as shown in the transactions list.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    pub user_id: String,
    /// Username of the staff member who took the order.
    pub cashier: String,
    pub order_id: String,
    pub receipt_id: String,
    pub final_cents: i64,
    pub bill_date: DateTime<Utc>,
    pub payment_mode: PaymentMode,
}

/// Repository for bill database operations.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    /// Creates a new BillRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Inserts a bill.
    ///
    /// Unique violations are NOT absorbed here: the billing engine needs
    /// to distinguish a duplicate order (conflict) from a receipt-id
    /// collision (retry with a fresh suffix).
    pub async fn insert(&self, bill: &Bill) -> DbResult<()> {
        debug!(id = %bill.id, order_id = %bill.order_id, receipt_id = %bill.receipt_id, "Inserting bill");

        sqlx::query(
            r#"
            INSERT INTO bills
                (id, order_id, bill_date, total_cents, discount_cents,
                 final_cents, receipt_id, payment_mode)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&bill.id)
        .bind(&bill.order_id)
        .bind(bill.bill_date)
        .bind(bill.total_cents)
        .bind(bill.discount_cents)
        .bind(bill.final_cents)
        .bind(&bill.receipt_id)
        .bind(bill.payment_mode)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Gets a bill by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Bill>> {
        let bill = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, order_id, bill_date, total_cents, discount_cents,
                   final_cents, receipt_id, payment_mode
            FROM bills
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bill)
    }

    /// Gets the bill for an order, if one exists.
    pub async fn get_by_order_id(&self, order_id: &str) -> DbResult<Option<Bill>> {
        let bill = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, order_id, bill_date, total_cents, discount_cents,
                   final_cents, receipt_id, payment_mode
            FROM bills
            WHERE order_id = ?1
            "#,
        )
        .bind(order_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(bill)
    }

    /// All bills in bill_date ascending order. Revenue buckets derive
    /// their first-seen ordering from this.
    pub async fn list_ordered(&self) -> DbResult<Vec<Bill>> {
        let bills = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, order_id, bill_date, total_cents, discount_cents,
                   final_cents, receipt_id, payment_mode
            FROM bills
            ORDER BY bill_date ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(bills)
    }

    /// Bills strictly older than the cutoff, oldest first. Archival input.
    pub async fn list_older_than(&self, cutoff: DateTime<Utc>) -> DbResult<Vec<Bill>> {
        let bills = sqlx::query_as::<_, Bill>(
            r#"
            SELECT id, order_id, bill_date, total_cents, discount_cents,
                   final_cents, receipt_id, payment_mode
            FROM bills
            WHERE bill_date < ?1
            ORDER BY bill_date ASC
            "#,
        )
        .bind(cutoff)
        .fetch_all(&self.pool)
        .await?;

        Ok(bills)
    }

    /// Counts all bills.
    pub async fn count_all(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bills")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// One page of the filtered transactions list, newest first.
    pub async fn fetch_transactions(
        &self,
        filter: &TransactionFilter,
        limit: i64,
        offset: i64,
    ) -> DbResult<Vec<TransactionRow>> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT o.user_id, u.username AS cashier, b.order_id, b.receipt_id, \
             b.final_cents, b.bill_date, b.payment_mode \
             FROM bills b \
             JOIN orders o ON b.order_id = o.id \
             JOIN users u ON o.user_id = u.id",
        );
        push_filter_clauses(&mut qb, filter);
        qb.push(" ORDER BY b.bill_date DESC LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(offset);

        let rows = qb
            .build_query_as::<TransactionRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Total number of transactions matching the filter, for paging.
    pub async fn count_transactions(&self, filter: &TransactionFilter) -> DbResult<i64> {
        let mut qb = QueryBuilder::<Sqlite>::new(
            "SELECT COUNT(*) \
             FROM bills b \
             JOIN orders o ON b.order_id = o.id \
             JOIN users u ON o.user_id = u.id",
        );
        push_filter_clauses(&mut qb, filter);

        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;

        Ok(count)
    }

    /// Distinct usernames that have ever produced a bill, ascending.
    pub async fn distinct_cashiers(&self) -> DbResult<Vec<String>> {
        let cashiers = sqlx::query_scalar::<_, String>(
            r#"
            SELECT DISTINCT u.username
            FROM bills b
            JOIN orders o ON b.order_id = o.id
            JOIN users u ON o.user_id = u.id
            ORDER BY u.username ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(cashiers)
    }
}

/// Appends WHERE clauses for every supplied filter (AND semantics).
fn push_filter_clauses(qb: &mut QueryBuilder<'_, Sqlite>, filter: &TransactionFilter) {
    qb.push(" WHERE 1 = 1");

    if let Some(cashier) = &filter.cashier {
        qb.push(" AND u.username = ");
        qb.push_bind(cashier.clone());
    }
    if let Some(min) = filter.min_cents {
        qb.push(" AND b.final_cents >= ");
        qb.push_bind(min);
    }
    if let Some(max) = filter.max_cents {
        qb.push(" AND b.final_cents <= ");
        qb.push_bind(max);
    }
    if let Some(start) = filter.start_date {
        qb.push(" AND b.bill_date >= ");
        qb.push_bind(start);
    }
    if let Some(end) = filter.end_date {
        qb.push(" AND b.bill_date <= ");
        qb.push_bind(end);
    }
    if let Some(mode) = filter.payment_mode {
        qb.push(" AND b.payment_mode = ");
        qb.push_bind(mode);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use cafe_core::{Order, OrderItem, Role, User};
    use uuid::Uuid;

    async fn seed_order(db: &Database, username: &str, total_cents: i64) -> Order {
        let user = match db.users().get_by_username(username).await.unwrap() {
            Some(u) => u,
            None => {
                let u = User {
                    id: Uuid::new_v4().to_string(),
                    username: username.to_string(),
                    role: Role::Worker,
                    created_at: Utc::now(),
                };
                db.users().insert(&u).await.unwrap();
                u
            }
        };

        let now = Utc::now();
        let item = cafe_core::Item {
            id: Uuid::new_v4().to_string(),
            name: "Filter Coffee".to_string(),
            price_cents: total_cents,
            available: true,
            created_at: now,
            updated_at: now,
        };
        db.items().insert(&item).await.unwrap();

        let order_id = Uuid::new_v4().to_string();
        let order = Order {
            id: order_id.clone(),
            user_id: user.id,
            order_date: now,
            total_cents,
            items: vec![OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id,
                item_id: item.id,
                name_snapshot: item.name.clone(),
                unit_price_cents: total_cents,
                quantity: 1,
            }],
        };
        db.orders().create_with_items(&order).await.unwrap();
        order
    }

    fn bill_for(order: &Order, receipt_id: &str, mode: PaymentMode) -> Bill {
        Bill {
            id: Uuid::new_v4().to_string(),
            order_id: order.id.clone(),
            bill_date: Utc::now(),
            total_cents: order.total_cents,
            discount_cents: 0,
            final_cents: order.total_cents,
            receipt_id: receipt_id.to_string(),
            payment_mode: mode,
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup_by_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let order = seed_order(&db, "alice", 500).await;

        let bill = bill_for(&order, "CAFE-20260801-100000-AAAA0001", PaymentMode::Cash);
        db.bills().insert(&bill).await.unwrap();

        let fetched = db.bills().get_by_order_id(&order.id).await.unwrap().unwrap();
        assert_eq!(fetched.receipt_id, bill.receipt_id);
        assert_eq!(fetched.final_cents, 500);
    }

    #[tokio::test]
    async fn test_order_id_unique_constraint() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let order = seed_order(&db, "bob", 700).await;

        db.bills()
            .insert(&bill_for(&order, "CAFE-20260801-100001-AAAA0002", PaymentMode::Cash))
            .await
            .unwrap();

        let err = db
            .bills()
            .insert(&bill_for(&order, "CAFE-20260801-100002-AAAA0003", PaymentMode::Card))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field } => assert!(field.contains("order_id")),
            other => panic!("expected unique violation, got {other:?}"),
        }
        assert_eq!(db.bills().count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_receipt_id_unique_constraint() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let first = seed_order(&db, "cara", 300).await;
        let second = seed_order(&db, "cara", 400).await;

        db.bills()
            .insert(&bill_for(&first, "CAFE-20260801-100003-SAME0000", PaymentMode::Upi))
            .await
            .unwrap();

        let err = db
            .bills()
            .insert(&bill_for(&second, "CAFE-20260801-100003-SAME0000", PaymentMode::Upi))
            .await
            .unwrap_err();

        match err {
            DbError::UniqueViolation { field } => assert!(field.contains("receipt_id")),
            other => panic!("expected unique violation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_filtered_transactions() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let o1 = seed_order(&db, "dora", 1000).await;
        let o2 = seed_order(&db, "dora", 5000).await;
        let o3 = seed_order(&db, "ed", 2000).await;

        db.bills().insert(&bill_for(&o1, "R-1", PaymentMode::Cash)).await.unwrap();
        db.bills().insert(&bill_for(&o2, "R-2", PaymentMode::Card)).await.unwrap();
        db.bills().insert(&bill_for(&o3, "R-3", PaymentMode::Cash)).await.unwrap();

        // No filters: everything
        let all = db
            .bills()
            .fetch_transactions(&TransactionFilter::default(), 10, 0)
            .await
            .unwrap();
        assert_eq!(all.len(), 3);

        // Cashier + payment mode, AND semantics
        let filter = TransactionFilter {
            cashier: Some("dora".to_string()),
            payment_mode: Some(PaymentMode::Cash),
            ..Default::default()
        };
        let rows = db.bills().fetch_transactions(&filter, 10, 0).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].receipt_id, "R-1");
        assert_eq!(db.bills().count_transactions(&filter).await.unwrap(), 1);

        // Value range
        let filter = TransactionFilter {
            min_cents: Some(1500),
            max_cents: Some(6000),
            ..Default::default()
        };
        let rows = db.bills().fetch_transactions(&filter, 10, 0).await.unwrap();
        assert_eq!(rows.len(), 2);

        // Cashier list is distinct and sorted
        let cashiers = db.bills().distinct_cashiers().await.unwrap();
        assert_eq!(cashiers, vec!["dora".to_string(), "ed".to_string()]);
    }
}
