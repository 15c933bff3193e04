//! # Discount Repository
//!
//! Read-only input to the billing engine, plus seeding inserts.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;
use cafe_core::Discount;

/// Repository for discount database operations.
#[derive(Debug, Clone)]
pub struct DiscountRepository {
    pool: SqlitePool,
}

impl DiscountRepository {
    /// Creates a new DiscountRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DiscountRepository { pool }
    }

    /// Gets a discount by ID.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Discount>> {
        let discount = sqlx::query_as::<_, Discount>(
            r#"
            SELECT id, name, percent_bps, active
            FROM discounts
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(discount)
    }

    /// Inserts a discount.
    pub async fn insert(&self, discount: &Discount) -> DbResult<()> {
        debug!(id = %discount.id, name = %discount.name, "Inserting discount");

        sqlx::query(
            r#"
            INSERT INTO discounts (id, name, percent_bps, active)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&discount.id)
        .bind(&discount.name)
        .bind(discount.percent_bps)
        .bind(discount.active)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Lists active discounts ordered by name.
    pub async fn list_active(&self) -> DbResult<Vec<Discount>> {
        let discounts = sqlx::query_as::<_, Discount>(
            r#"
            SELECT id, name, percent_bps, active
            FROM discounts
            WHERE active = 1
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(discounts)
    }
}
