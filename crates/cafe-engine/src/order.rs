//! # Order Engine
//!
//! Turns a cart of item references into a persisted, immutable order.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  createOrder(userId, lines)                                         │
//! │                                                                     │
//! │  1. Validate cart shape (non-empty, quantities 1..=999)             │
//! │  2. Resolve user              → NotFound                            │
//! │  3. Resolve each item         → NotFound / Conflict (unavailable)   │
//! │  4. Snapshot name + price into OrderItems                           │
//! │  5. total = Σ(price snapshot × quantity)                            │
//! │  6. Persist order + items in ONE transaction                        │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation failures happen before any write, and the single
//! transaction in step 6 means a failed insert leaves no partial order.

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use cafe_core::validation::validate_order_lines;
use cafe_core::{Money, Order, OrderItem};
use cafe_db::Database;

use crate::error::{EngineError, EngineResult};

/// One requested cart line: which item, how many.
#[derive(Debug, Clone)]
pub struct OrderLineRequest {
    pub item_id: String,
    pub quantity: i64,
}

/// Creates orders from carts. Stateless; holds only the database handle.
#[derive(Debug, Clone)]
pub struct OrderEngine {
    db: Database,
}

impl OrderEngine {
    /// Creates a new OrderEngine.
    pub fn new(db: Database) -> Self {
        OrderEngine { db }
    }

    /// Validates and persists a new order.
    ///
    /// Item name and price are snapshotted at this moment; later menu
    /// edits never alter the stored order.
    pub async fn create_order(
        &self,
        user_id: &str,
        lines: &[OrderLineRequest],
    ) -> EngineResult<Order> {
        let shape: Vec<(&str, i64)> = lines
            .iter()
            .map(|line| (line.item_id.as_str(), line.quantity))
            .collect();
        validate_order_lines(&shape)?;

        let user = self
            .db
            .users()
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| EngineError::not_found("User", user_id))?;

        let order_id = Uuid::new_v4().to_string();
        let mut items = Vec::with_capacity(lines.len());
        let mut total = Money::zero();

        for line in lines {
            let item = self
                .db
                .items()
                .get_by_id(&line.item_id)
                .await?
                .ok_or_else(|| EngineError::not_found("Item", &line.item_id))?;

            if !item.available {
                return Err(EngineError::conflict(format!(
                    "item not available: {}",
                    item.name
                )));
            }

            total += item.price().multiply_quantity(line.quantity);
            items.push(OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                item_id: item.id,
                name_snapshot: item.name,
                unit_price_cents: item.price_cents,
                quantity: line.quantity,
            });
        }

        let order = Order {
            id: order_id,
            user_id: user.id,
            order_date: Utc::now(),
            total_cents: total.cents(),
            items,
        };

        self.db.orders().create_with_items(&order).await?;

        info!(
            order_id = %order.id,
            user = %user.username,
            lines = order.items.len(),
            total = %order.total(),
            "Order created"
        );

        Ok(order)
    }

    /// How many orders the given user has taken during the local calendar
    /// day. Powers the cashier's "my orders today" counter.
    pub async fn todays_order_count_for_user(&self, user_id: &str) -> EngineResult<u64> {
        if self.db.users().get_by_id(user_id).await?.is_none() {
            return Err(EngineError::not_found("User", user_id));
        }

        let today = Utc::now().with_timezone(&chrono::Local).date_naive();
        let count = self
            .db
            .orders()
            .order_dates_for_user(user_id)
            .await?
            .into_iter()
            .filter(|date| date.with_timezone(&chrono::Local).date_naive() == today)
            .count();

        Ok(count as u64)
    }
}
