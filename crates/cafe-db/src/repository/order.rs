//! # Order Repository
//!
//! Persistence for orders and their line items.
//!
//! ## Atomicity
//! An order and its items are one unit of work: `create_with_items` runs
//! a single transaction, so a failure on any line leaves no partial order
//! behind.

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use cafe_core::{Order, OrderItem};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Persists an order together with all of its line items in one
    /// transaction. Either everything is stored or nothing is.
    pub async fn create_with_items(&self, order: &Order) -> DbResult<()> {
        debug!(
            id = %order.id,
            items = order.items.len(),
            total_cents = order.total_cents,
            "Creating order"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, user_id, order_date, total_cents)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&order.id)
        .bind(&order.user_id)
        .bind(order.order_date)
        .bind(order.total_cents)
        .execute(&mut *tx)
        .await?;

        for item in &order.items {
            sqlx::query(
                r#"
                INSERT INTO order_items
                    (id, order_id, item_id, name_snapshot, unit_price_cents, quantity)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                "#,
            )
            .bind(&item.id)
            .bind(&item.order_id)
            .bind(&item.item_id)
            .bind(&item.name_snapshot)
            .bind(item.unit_price_cents)
            .bind(item.quantity)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Gets an order by ID with its line items loaded.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, user_id, order_date, total_cents
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let Some(mut order) = order else {
            return Ok(None);
        };

        order.items = self.get_items(id).await?;
        Ok(Some(order))
    }

    /// Gets all line items for an order, in insertion order.
    pub async fn get_items(&self, order_id: &str) -> DbResult<Vec<OrderItem>> {
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, item_id, name_snapshot, unit_price_cents, quantity
            FROM order_items
            WHERE order_id = ?1
            ORDER BY rowid
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Counts all orders.
    pub async fn count_all(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Returns every order's creation timestamp. The dashboard derives
    /// calendar-window counts from these in local time.
    pub async fn order_dates(&self) -> DbResult<Vec<DateTime<Utc>>> {
        let rows = sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT order_date FROM orders ORDER BY order_date",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns creation timestamps of one user's orders.
    pub async fn order_dates_for_user(&self, user_id: &str) -> DbResult<Vec<DateTime<Utc>>> {
        let rows = sqlx::query_scalar::<_, DateTime<Utc>>(
            "SELECT order_date FROM orders WHERE user_id = ?1 ORDER BY order_date",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Returns (username, order_date) for every order, joined with the
    /// ordering user. Feeds the staff-performance report.
    pub async fn user_order_rows(&self) -> DbResult<Vec<(String, DateTime<Utc>)>> {
        let rows = sqlx::query_as::<_, (String, DateTime<Utc>)>(
            r#"
            SELECT u.username, o.order_date
            FROM orders o
            JOIN users u ON o.user_id = u.id
            ORDER BY o.order_date
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Total quantity sold per snapshotted item name, best sellers first.
    /// Ties break by name ascending so the ordering is deterministic.
    pub async fn item_sales(&self, limit: i64) -> DbResult<Vec<(String, i64)>> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            r#"
            SELECT name_snapshot, SUM(quantity) AS sales
            FROM order_items
            GROUP BY name_snapshot
            ORDER BY sales DESC, name_snapshot ASC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use crate::pool::{Database, DbConfig};
    use cafe_core::{Order, OrderItem, Role, User};
    use chrono::Utc;
    use uuid::Uuid;

    async fn seed_user(db: &Database, username: &str) -> String {
        let user = User {
            id: Uuid::new_v4().to_string(),
            username: username.to_string(),
            role: Role::Worker,
            created_at: Utc::now(),
        };
        db.users().insert(&user).await.unwrap();
        user.id
    }

    async fn seed_item(db: &Database, name: &str, price_cents: i64) -> String {
        let now = Utc::now();
        let item = cafe_core::Item {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price_cents,
            available: true,
            created_at: now,
            updated_at: now,
        };
        db.items().insert(&item).await.unwrap();
        item.id
    }

    fn build_order(user_id: &str, lines: &[(&str, &str, i64, i64)]) -> Order {
        let order_id = Uuid::new_v4().to_string();
        let items: Vec<OrderItem> = lines
            .iter()
            .map(|(item_id, name, price, qty)| OrderItem {
                id: Uuid::new_v4().to_string(),
                order_id: order_id.clone(),
                item_id: item_id.to_string(),
                name_snapshot: name.to_string(),
                unit_price_cents: *price,
                quantity: *qty,
            })
            .collect();
        let total_cents = items.iter().map(|i| i.unit_price_cents * i.quantity).sum();

        Order {
            id: order_id,
            user_id: user_id.to_string(),
            order_date: Utc::now(),
            total_cents,
            items,
        }
    }

    #[tokio::test]
    async fn test_create_and_reload_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user_id = seed_user(&db, "worker1").await;
        let coffee = seed_item(&db, "Coffee", 300).await;
        let tea = seed_item(&db, "Tea", 200).await;

        let order = build_order(&user_id, &[(&coffee, "Coffee", 300, 2), (&tea, "Tea", 200, 1)]);
        db.orders().create_with_items(&order).await.unwrap();

        let loaded = db.orders().get_by_id(&order.id).await.unwrap().unwrap();
        assert_eq!(loaded.total_cents, 800);
        assert_eq!(loaded.items.len(), 2);
        assert_eq!(loaded.items[0].name_snapshot, "Coffee");
        assert_eq!(db.orders().count_all().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_line_rolls_back_whole_order() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user_id = seed_user(&db, "worker2").await;
        let coffee = seed_item(&db, "Coffee", 300).await;

        // Second line references a nonexistent item: FK failure
        let order = build_order(
            &user_id,
            &[(&coffee, "Coffee", 300, 1), ("ghost-item", "Ghost", 100, 1)],
        );
        assert!(db.orders().create_with_items(&order).await.is_err());

        assert_eq!(db.orders().count_all().await.unwrap(), 0);
        let orphans = db.orders().get_items(&order.id).await.unwrap();
        assert!(orphans.is_empty());
    }

    #[tokio::test]
    async fn test_item_sales_aggregation() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let user_id = seed_user(&db, "worker3").await;
        let coffee = seed_item(&db, "Coffee", 300).await;
        let tea = seed_item(&db, "Tea", 200).await;

        // Coffee×3, Tea×1, then Coffee×2 in a second order
        let o1 = build_order(&user_id, &[(&coffee, "Coffee", 300, 3), (&tea, "Tea", 200, 1)]);
        let o2 = build_order(&user_id, &[(&coffee, "Coffee", 300, 2)]);
        db.orders().create_with_items(&o1).await.unwrap();
        db.orders().create_with_items(&o2).await.unwrap();

        let sales = db.orders().item_sales(10).await.unwrap();
        assert_eq!(sales, vec![("Coffee".to_string(), 5), ("Tea".to_string(), 1)]);

        let top_one = db.orders().item_sales(1).await.unwrap();
        assert_eq!(top_one.len(), 1);
        assert_eq!(top_one[0].0, "Coffee");
    }
}
