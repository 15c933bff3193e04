//! # Archival Process
//!
//! Daily job that compresses old bills into append-only financial
//! summaries and deletes the originals (with their orders).
//!
//! ## Lifecycle of a Bill
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │   bills (operational)              financial_summaries (archive)    │
//! │                                                                     │
//! │   bill_date < now − 30d  ───────►  one summary row per bill         │
//! │                                    same receipt_id (still UNIQUE)   │
//! │   bill + order + items                                              │
//! │   deleted in the SAME tx                                            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Failure Model
//! Each bill archives in its own transaction. A failure is logged and the
//! run stops; the remaining bills are picked up by the next scheduled run.
//! No in-run retry. The summaries table's receipt_id uniqueness makes a
//! re-run after a crash idempotent.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio::time::MissedTickBehavior;
use tracing::{error, info};

use cafe_core::BILL_RETENTION_DAYS;
use cafe_db::Database;

use crate::error::EngineResult;

// =============================================================================
// Configuration
// =============================================================================

/// Archival schedule and retention settings.
#[derive(Debug, Clone)]
pub struct ArchivalConfig {
    /// Bills older than this many days are archived.
    pub retention_days: i64,
    /// Time between scheduled runs.
    pub interval: Duration,
}

impl Default for ArchivalConfig {
    fn default() -> Self {
        ArchivalConfig {
            retention_days: BILL_RETENTION_DAYS,
            interval: Duration::from_secs(24 * 60 * 60),
        }
    }
}

impl ArchivalConfig {
    /// Sets the retention window in days.
    pub fn retention_days(mut self, days: i64) -> Self {
        self.retention_days = days;
        self
    }

    /// Sets the interval between runs.
    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

// =============================================================================
// Process
// =============================================================================

/// The archival job. Clone-cheap; all clones share one run lock, so two
/// handles can never archive concurrently.
#[derive(Debug, Clone)]
pub struct ArchivalProcess {
    db: Database,
    config: ArchivalConfig,
    run_lock: Arc<Mutex<()>>,
}

impl ArchivalProcess {
    /// Creates a new ArchivalProcess.
    pub fn new(db: Database, config: ArchivalConfig) -> Self {
        ArchivalProcess {
            db,
            config,
            run_lock: Arc::new(Mutex::new(())),
        }
    }

    /// One archival pass against the configured retention cutoff.
    ///
    /// Returns the number of bills archived.
    pub async fn run_once(&self) -> EngineResult<u64> {
        let cutoff = Utc::now() - chrono::Duration::days(self.config.retention_days);
        self.archive_older_than(cutoff).await
    }

    /// Archives every bill dated strictly before `cutoff`.
    ///
    /// Serialized by the run lock: a second caller waits, then finds
    /// nothing left to do.
    pub async fn archive_older_than(&self, cutoff: DateTime<Utc>) -> EngineResult<u64> {
        let _guard = self.run_lock.lock().await;

        let bills = self.db.bills().list_older_than(cutoff).await?;
        if bills.is_empty() {
            return Ok(0);
        }

        info!(candidates = bills.len(), %cutoff, "Archival run started");

        let mut archived = 0u64;
        for bill in &bills {
            match self.db.summaries().archive_bill(bill, Utc::now()).await {
                Ok(()) => archived += 1,
                Err(err) => {
                    // Remaining bills wait for the next scheduled run.
                    error!(
                        bill_id = %bill.id,
                        receipt_id = %bill.receipt_id,
                        error = %err,
                        "Archival step failed, stopping run"
                    );
                    break;
                }
            }
        }

        info!(archived, "Archival run finished");
        Ok(archived)
    }

    /// Spawns the daily schedule: one run at startup, then one per
    /// configured interval. Delayed ticks are not bunched up.
    pub fn spawn(self) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(self.config.interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;
                if let Err(err) = self.run_once().await {
                    error!(error = %err, "Scheduled archival run failed");
                }
            }
        })
    }
}
