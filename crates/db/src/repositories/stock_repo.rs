//! Repository for the `stock_items` table.

use nomade_core::types::DbId;
use sqlx::PgPool;

use crate::models::stock_item::{CreateStockItem, StockItem, UpdateStockItem};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, description, quantity, unit, created_at, updated_at";

/// Provides CRUD operations for the global stock catalog.
pub struct StockRepo;

impl StockRepo {
    /// Insert a new stock item, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateStockItem) -> Result<StockItem, sqlx::Error> {
        let query = format!(
            "INSERT INTO stock_items (name, description, quantity, unit)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StockItem>(&query)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.quantity)
            .bind(&input.unit)
            .fetch_one(pool)
            .await
    }

    /// Find a stock item by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<StockItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stock_items WHERE id = $1");
        sqlx::query_as::<_, StockItem>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all stock items, ordered alphabetically by name.
    pub async fn list(pool: &PgPool) -> Result<Vec<StockItem>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM stock_items ORDER BY name");
        sqlx::query_as::<_, StockItem>(&query).fetch_all(pool).await
    }

    /// Update a stock item. Only non-`None` fields in `input` are applied;
    /// `updated_at` is bumped in the same statement.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateStockItem,
    ) -> Result<Option<StockItem>, sqlx::Error> {
        let query = format!(
            "UPDATE stock_items SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                quantity = COALESCE($4, quantity),
                unit = COALESCE($5, unit),
                updated_at = now()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, StockItem>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(input.quantity)
            .bind(&input.unit)
            .fetch_optional(pool)
            .await
    }

    /// Delete a stock item. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM stock_items WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
