//! # Dashboard Aggregator
//!
//! Read-only reports derived from accumulated orders and bills.
//!
//! ## Report Catalogue
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  summary()               totals, averages, today's slice            │
//! │  top_items(limit)        best sellers by quantity                   │
//! │  revenue(range)          buckets by day / ISO week / month          │
//! │  recent_transactions()   filtered, paged bill list with cashier     │
//! │  users_performance()     order counts per cashier in a range        │
//! │  todays_revenue_by_payment_mode()                                   │
//! │  all_cashiers()          filter UI support                          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here mutates state. Reads operate on committed data; reports
//! are point-in-time snapshots, never transactionally tied to writers.
//!
//! ## Calendar Windows
//! Timestamps are stored in UTC and converted to the **local** calendar
//! for every "today / this week / this month" window, matching what staff
//! see on the wall clock.

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::Serialize;

use cafe_core::validation::validate_pagination;
use cafe_core::{Money, PaymentMode, ReportRange};
use cafe_db::{Database, TransactionFilter, TransactionRow};

use crate::error::EngineResult;

/// Default entry count for the top-items report.
const DEFAULT_TOP_ITEMS: u32 = 10;

// =============================================================================
// Report Records
// =============================================================================

/// Headline numbers for the dashboard landing view.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    /// Σ final amount over all bills.
    pub total_revenue: Money,
    /// Count of all orders, billed or not.
    pub total_orders: u64,
    /// total_revenue / bill count, half-up to cents; zero with no bills.
    pub average_bill: Money,
    /// Σ discount amount over all bills.
    pub total_discounts: Money,
    /// Today's slice (local calendar day) of revenue and orders.
    pub todays_revenue: Money,
    pub todays_orders: u64,
}

/// One best-seller entry: item name and total quantity sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopItem {
    pub name: String,
    pub sales: i64,
}

/// One revenue bucket for a day, ISO week, or month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBucket {
    /// `2026-08-28`, `2026-W35`, or `2026-08` depending on the range.
    pub label: String,
    pub revenue: Money,
    pub orders: u64,
}

/// One page of the filtered transactions list plus the total match count.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub items: Vec<TransactionRow>,
    pub total_count: i64,
}

/// Order count for one cashier within the requested range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPerformance {
    pub username: String,
    pub orders: u64,
}

/// Today's revenue attributed to one settlement method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentModeRevenue {
    pub payment_mode: PaymentMode,
    pub revenue: Money,
}

// =============================================================================
// Aggregator
// =============================================================================

/// Computes dashboard reports. Stateless; holds only the database handle.
#[derive(Debug, Clone)]
pub struct DashboardAggregator {
    db: Database,
}

impl DashboardAggregator {
    /// Creates a new DashboardAggregator.
    pub fn new(db: Database) -> Self {
        DashboardAggregator { db }
    }

    /// Headline totals plus today's slice.
    pub async fn summary(&self) -> EngineResult<DashboardSummary> {
        let bills = self.db.bills().list_ordered().await?;
        let total_orders = self.db.orders().count_all().await? as u64;

        let total_revenue: Money = bills.iter().map(|b| b.final_amount()).sum();
        let total_discounts: Money = bills.iter().map(|b| b.discount()).sum();
        let average_bill = total_revenue.divide_round(bills.len() as i64);

        let today = Local::now().date_naive();
        let todays_revenue: Money = bills
            .iter()
            .filter(|b| local_date(b.bill_date) == today)
            .map(|b| b.final_amount())
            .sum();
        let todays_orders = self
            .db
            .orders()
            .order_dates()
            .await?
            .into_iter()
            .filter(|d| local_date(*d) == today)
            .count() as u64;

        Ok(DashboardSummary {
            total_revenue,
            total_orders,
            average_bill,
            total_discounts,
            todays_revenue,
            todays_orders,
        })
    }

    /// Best sellers by total quantity across all order lines.
    ///
    /// Ties break by name ascending, so equal sellers list alphabetically.
    pub async fn top_items(&self, limit: Option<u32>) -> EngineResult<Vec<TopItem>> {
        let limit = limit.unwrap_or(DEFAULT_TOP_ITEMS);
        let rows = self.db.orders().item_sales(limit as i64).await?;

        Ok(rows
            .into_iter()
            .map(|(name, sales)| TopItem { name, sales })
            .collect())
    }

    /// Revenue bucketed by the range's calendar label, in chronological
    /// (first-seen) order.
    pub async fn revenue(&self, range: ReportRange) -> EngineResult<Vec<RevenueBucket>> {
        let bills = self.db.bills().list_ordered().await?;

        // Bucket count is small (days in view, weeks, months), so a
        // linear label scan preserves first-seen order without an index.
        let mut buckets: Vec<RevenueBucket> = Vec::new();
        for bill in &bills {
            let label = range_label(range, bill.bill_date);
            match buckets.iter_mut().find(|b| b.label == label) {
                Some(bucket) => {
                    bucket.revenue += bill.final_amount();
                    bucket.orders += 1;
                }
                None => buckets.push(RevenueBucket {
                    label,
                    revenue: bill.final_amount(),
                    orders: 1,
                }),
            }
        }

        Ok(buckets)
    }

    /// Filtered, paged bill list joined with the ordering cashier.
    ///
    /// `page` is 1-based; the total matching count rides along for
    /// client-side paging.
    pub async fn recent_transactions(
        &self,
        page: u32,
        size: u32,
        filter: &TransactionFilter,
    ) -> EngineResult<TransactionPage> {
        let offset = validate_pagination(page, size)?;

        let items = self
            .db
            .bills()
            .fetch_transactions(filter, size as i64, offset as i64)
            .await?;
        let total_count = self.db.bills().count_transactions(filter).await?;

        Ok(TransactionPage { items, total_count })
    }

    /// Order counts per cashier within the range, busiest first (ties by
    /// username ascending).
    pub async fn users_performance(
        &self,
        range: ReportRange,
    ) -> EngineResult<Vec<UserPerformance>> {
        let now = Local::now();
        let rows = self.db.orders().user_order_rows().await?;

        let mut counts: Vec<UserPerformance> = Vec::new();
        for (username, order_date) in rows {
            if !in_range(range, order_date, now) {
                continue;
            }
            match counts.iter_mut().find(|p| p.username == username) {
                Some(perf) => perf.orders += 1,
                None => counts.push(UserPerformance {
                    username,
                    orders: 1,
                }),
            }
        }

        counts.sort_by(|a, b| {
            b.orders
                .cmp(&a.orders)
                .then_with(|| a.username.cmp(&b.username))
        });
        Ok(counts)
    }

    /// Today's revenue split by settlement method. Modes with no bills
    /// today are omitted; present modes list in enum order.
    pub async fn todays_revenue_by_payment_mode(
        &self,
    ) -> EngineResult<Vec<PaymentModeRevenue>> {
        let today = Local::now().date_naive();
        let bills = self.db.bills().list_ordered().await?;

        let mut result: Vec<PaymentModeRevenue> = Vec::new();
        for mode in [PaymentMode::Cash, PaymentMode::Card, PaymentMode::Upi] {
            let revenue: Money = bills
                .iter()
                .filter(|b| b.payment_mode == mode && local_date(b.bill_date) == today)
                .map(|b| b.final_amount())
                .sum();
            let had_bills = bills
                .iter()
                .any(|b| b.payment_mode == mode && local_date(b.bill_date) == today);
            if had_bills {
                result.push(PaymentModeRevenue {
                    payment_mode: mode,
                    revenue,
                });
            }
        }

        Ok(result)
    }

    /// Distinct cashier usernames that have ever produced a bill,
    /// ascending. Feeds the transactions filter UI.
    pub async fn all_cashiers(&self) -> EngineResult<Vec<String>> {
        Ok(self.db.bills().distinct_cashiers().await?)
    }
}

// =============================================================================
// Calendar Helpers
// =============================================================================

/// The local calendar date a stored UTC timestamp falls on.
fn local_date(utc: DateTime<Utc>) -> NaiveDate {
    utc.with_timezone(&Local).date_naive()
}

/// Bucket label for a timestamp under the given range.
fn range_label(range: ReportRange, utc: DateTime<Utc>) -> String {
    let local = utc.with_timezone(&Local);
    match range {
        ReportRange::Day => local.format("%Y-%m-%d").to_string(),
        ReportRange::Week => {
            let week = local.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
        ReportRange::Month => local.format("%Y-%m").to_string(),
    }
}

/// Whether a timestamp falls in "today / this ISO week / this month"
/// relative to `now` on the local calendar.
fn in_range(range: ReportRange, utc: DateTime<Utc>, now: DateTime<Local>) -> bool {
    let local = utc.with_timezone(&Local);
    match range {
        ReportRange::Day => local.date_naive() == now.date_naive(),
        ReportRange::Week => {
            let a = local.iso_week();
            let b = now.iso_week();
            a.year() == b.year() && a.week() == b.week()
        }
        ReportRange::Month => local.year() == now.year() && local.month() == now.month(),
    }
}
