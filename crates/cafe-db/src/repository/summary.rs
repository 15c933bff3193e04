//! # Financial Summary Repository
//!
//! Durable financial records that outlive the operational bills they came
//! from, plus the transactional move from `bills` to `financial_summaries`.
//!
//! ## Archival Atomicity
//! [`SummaryRepository::archive_bill`] performs the summary insert and both
//! deletes (bill, then order) inside a single transaction. A crash between
//! steps rolls the whole bill back to the operational side, so no bill is
//! ever half-archived and no receipt is summarised twice.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use cafe_core::{Bill, FinancialSummary};

/// Repository for financial summary database operations.
#[derive(Debug, Clone)]
pub struct SummaryRepository {
    pool: SqlitePool,
}

impl SummaryRepository {
    /// Creates a new SummaryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SummaryRepository { pool }
    }

    /// Moves one bill into the summaries table atomically.
    ///
    /// Deleting the order cascades to its order_items. The bill row is
    /// deleted explicitly first so the summary insert and the cleanup
    /// commit or roll back together.
    pub async fn archive_bill(&self, bill: &Bill, archived_date: DateTime<Utc>) -> DbResult<()> {
        debug!(bill_id = %bill.id, receipt_id = %bill.receipt_id, "Archiving bill");

        let summary = FinancialSummary {
            id: uuid::Uuid::new_v4().to_string(),
            archived_date,
            original_bill_date: bill.bill_date,
            total_cents: bill.total_cents,
            discount_cents: bill.discount_cents,
            final_cents: bill.final_cents,
            receipt_id: bill.receipt_id.clone(),
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO financial_summaries
                (id, archived_date, original_bill_date, total_cents,
                 discount_cents, final_cents, receipt_id)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&summary.id)
        .bind(summary.archived_date)
        .bind(summary.original_bill_date)
        .bind(summary.total_cents)
        .bind(summary.discount_cents)
        .bind(summary.final_cents)
        .bind(&summary.receipt_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM bills WHERE id = ?1")
            .bind(&bill.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(&bill.order_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(())
    }

    /// All summaries, most recently archived first.
    pub async fn list_all(&self) -> DbResult<Vec<FinancialSummary>> {
        let summaries = sqlx::query_as::<_, FinancialSummary>(
            r#"
            SELECT id, archived_date, original_bill_date, total_cents,
                   discount_cents, final_cents, receipt_id
            FROM financial_summaries
            ORDER BY archived_date DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(summaries)
    }

    /// Counts all summaries.
    pub async fn count_all(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM financial_summaries")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
